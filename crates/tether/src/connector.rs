//! A single connector line between two elements.

use std::fmt;

use log::{debug, trace};

use tether_core::{anchor::Attachment, line::LineGeometry, stroke::StrokeDefinition};

use crate::{
    config::OverlayConfig,
    error::Result,
    host::{Host, OverlayFrame},
    registry::ConnectorId,
};

/// Where and how a connector attaches to its two elements.
///
/// # Examples
///
/// ```
/// use tether::{ConnectOptions, anchor::Attachment};
///
/// let options = ConnectOptions::new(Attachment::BOTTOM_MIDDLE, Attachment::TOP_MIDDLE)
///     .with_class_name("flow");
/// assert_eq!(options.class_name(), Some("flow"));
///
/// let lenient = ConnectOptions::from_names("bottom-middle", "center-center");
/// assert_eq!(lenient.to(), Attachment::TOP_LEFT);
///
/// assert!(ConnectOptions::parse("bottom-middle", "center-center").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectOptions {
    from: Attachment,
    to: Attachment,
    class_name: Option<String>,
    stroke: Option<StrokeDefinition>,
}

impl ConnectOptions {
    pub fn new(from: Attachment, to: Attachment) -> Self {
        Self {
            from,
            to,
            ..Self::default()
        }
    }

    /// Builds options from attachment names, falling back to `top-left` for
    /// unrecognized keywords.
    pub fn from_names(from: &str, to: &str) -> Self {
        Self::new(
            Attachment::from_name_lenient(from),
            Attachment::from_name_lenient(to),
        )
    }

    /// Builds options from attachment names, rejecting unknown keywords.
    ///
    /// # Errors
    ///
    /// Returns `TetherError::Attachment` naming the first invalid name.
    pub fn parse(from: &str, to: &str) -> Result<Self> {
        Ok(Self::new(from.parse()?, to.parse()?))
    }

    /// Sets the CSS class of the line (builder style).
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Sets an explicit stroke for the line (builder style).
    pub fn with_stroke(mut self, stroke: StrokeDefinition) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Attachment on the source element
    pub fn from(&self) -> Attachment {
        self.from
    }

    /// Attachment on the target element
    pub fn to(&self) -> Attachment {
        self.to
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }

    pub(crate) fn or_stroke(mut self, fallback: Option<&StrokeDefinition>) -> Self {
        if self.stroke.is_none() {
            self.stroke = fallback.cloned();
        }
        self
    }
}

/// Lifecycle state of a [`Connector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorState {
    /// The overlay is part of the display tree.
    Attached,
    /// The overlay has been removed from the display tree.
    Destroyed,
}

/// One rendered line between two elements.
///
/// A connector owns exactly one overlay artifact, created and drawn when the
/// connector is attached. Elements are referenced, never owned.
pub struct Connector<H: Host> {
    id: ConnectorId,
    source: H::Element,
    target: H::Element,
    options: ConnectOptions,
    overlay: H::Overlay,
    state: ConnectorState,
}

impl<H: Host> Connector<H> {
    /// Creates the overlay for a new connector and draws it once.
    pub(crate) fn attach(
        id: ConnectorId,
        host: &mut H,
        source: H::Element,
        target: H::Element,
        options: ConnectOptions,
        config: &OverlayConfig,
    ) -> Result<Self> {
        let overlay = host.create_overlay()?;
        let connector = Self {
            id,
            source,
            target,
            options,
            overlay,
            state: ConnectorState::Attached,
        };

        if let Err(err) = connector.update(host, config) {
            host.remove_overlay(&connector.overlay)?;
            return Err(err);
        }

        Ok(connector)
    }

    pub fn id(&self) -> ConnectorId {
        self.id
    }

    pub fn source(&self) -> &H::Element {
        &self.source
    }

    pub fn target(&self) -> &H::Element {
        &self.target
    }

    pub fn options(&self) -> &ConnectOptions {
        &self.options
    }

    pub fn overlay(&self) -> &H::Overlay {
        &self.overlay
    }

    pub fn state(&self) -> ConnectorState {
        self.state
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == ConnectorState::Destroyed
    }

    /// Computes the current line from the elements' bounding boxes.
    pub fn geometry(&self, host: &H) -> Result<LineGeometry> {
        let from_bounds = host.bounds_of(&self.source)?;
        let to_bounds = host.bounds_of(&self.target)?;

        Ok(LineGeometry::between(
            from_bounds,
            self.options.from(),
            to_bounds,
            self.options.to(),
        ))
    }

    /// Recomputes the line and redraws the overlay.
    ///
    /// Idempotent for unchanged element geometry. On a destroyed connector
    /// the detached overlay is updated and stays detached.
    pub fn update(&self, host: &mut H, config: &OverlayConfig) -> Result<()> {
        let line = self.geometry(host)?;
        trace!(
            connector_id = self.id.get(),
            from:? = line.from(),
            to:? = line.to();
            "Updating connector"
        );

        let frame = OverlayFrame::new(line, config)
            .with_class_name(self.options.class_name.clone())
            .with_stroke(self.options.stroke.clone());

        host.apply_frame(&self.overlay, &frame)
    }

    /// Removes the overlay from the display tree.
    ///
    /// Destroying an already destroyed connector does nothing.
    pub fn destroy(&mut self, host: &mut H) -> Result<()> {
        if self.is_destroyed() {
            debug!(connector_id = self.id.get(); "Connector already destroyed");
            return Ok(());
        }

        host.remove_overlay(&self.overlay)?;
        self.state = ConnectorState::Destroyed;

        Ok(())
    }
}

impl<H: Host> fmt::Debug for Connector<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connector")
            .field("id", &self.id)
            .field("source", &self.source)
            .field("target", &self.target)
            .field("options", &self.options)
            .field("overlay", &self.overlay)
            .field("state", &self.state)
            .finish()
    }
}
