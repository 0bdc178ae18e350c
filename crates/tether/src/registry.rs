//! The connector registry and resize coordination.
//!
//! [`Connectors`] is an explicit context object: it owns the host, every
//! connector created through it, and the resize debouncer. Callers pass it
//! around instead of relying on global state.
//!
//! # Lifecycle
//!
//! ```text
//! connect ──► Attached ──destroy──► Destroyed ──remove/prune──► (gone)
//!               │  ▲                  │  ▲
//!               └──┘ update           └──┘ update (overlay stays detached)
//! ```
//!
//! Destroying a connector does not unregister it; its entry stays in the
//! registry and keeps receiving update passes until [`Connectors::remove`] or
//! [`Connectors::prune_destroyed`] is called.

use std::{fmt, time::Duration};

use indexmap::IndexMap;
use log::{debug, info, warn};

use tether_core::{line::LineGeometry, stroke::StrokeDefinition};

use crate::{
    config::{AppConfig, OverlayConfig},
    connector::{ConnectOptions, Connector},
    debounce::Debouncer,
    error::{Result, TetherError},
    host::Host,
};

/// Opaque handle to a connector registered in a [`Connectors`] context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectorId(u64);

impl ConnectorId {
    /// Returns the raw id value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The set of connectors drawn into one host, plus the resize trigger.
///
/// # Examples
///
/// ```
/// use tether::{Connectors, ConnectOptions, anchor::Attachment};
/// use tether::geometry::{Bounds, Size};
/// use tether::scene::SceneHost;
///
/// let mut host = SceneHost::new(Size::new(200.0, 200.0));
/// let a = host.add_element("a", Bounds::from_rect(0.0, 0.0, 10.0, 10.0));
/// let b = host.add_element("b", Bounds::from_rect(50.0, 0.0, 10.0, 10.0));
///
/// let mut connectors = Connectors::new(host);
/// let id = connectors
///     .connect(a, b, ConnectOptions::new(Attachment::BOTTOM_MIDDLE, Attachment::TOP_MIDDLE))
///     .unwrap();
///
/// let line = connectors.geometry(id).unwrap();
/// assert_eq!(line.height(), 40.0);
/// ```
pub struct Connectors<H: Host> {
    host: H,
    overlay: OverlayConfig,
    default_stroke: Option<StrokeDefinition>,
    connectors: IndexMap<ConnectorId, Connector<H>>,
    next_id: u64,
    debouncer: Debouncer,
}

impl<H: Host> Connectors<H> {
    /// Creates an empty registry over `host` with default configuration.
    pub fn new(host: H) -> Self {
        Self {
            host,
            overlay: OverlayConfig::default(),
            default_stroke: None,
            connectors: IndexMap::new(),
            next_id: 0,
            debouncer: Debouncer::default(),
        }
    }

    /// Creates an empty registry over `host` configured by `config`.
    ///
    /// # Errors
    ///
    /// Returns `TetherError::Config` if the configured default stroke is invalid.
    pub fn with_config(host: H, config: &AppConfig) -> Result<Self> {
        let default_stroke = config
            .style()
            .default_stroke()
            .map_err(TetherError::Config)?;

        Ok(Self {
            overlay: *config.overlay(),
            default_stroke,
            debouncer: Debouncer::new(config.resize().delay()),
            ..Self::new(host)
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, e.g. to move elements around.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the registry and returns its host.
    pub fn into_host(self) -> H {
        self.host
    }

    pub fn overlay_config(&self) -> &OverlayConfig {
        &self.overlay
    }

    /// Stroke given to connectors whose options carry none.
    pub fn default_stroke(&self) -> Option<&StrokeDefinition> {
        self.default_stroke.as_ref()
    }

    /// Number of registered connectors, destroyed ones included.
    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }

    /// Returns the connector registered under `id`.
    pub fn get(&self, id: ConnectorId) -> Option<&Connector<H>> {
        self.connectors.get(&id)
    }

    /// Iterates connectors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Connector<H>> {
        self.connectors.values()
    }

    /// Draws a new connector between `source` and `target` and registers it.
    ///
    /// The connector is rendered once, synchronously, before this returns.
    /// Options without a stroke inherit the configured default stroke.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot create the overlay or measure
    /// either element. Nothing is registered in that case.
    pub fn connect(
        &mut self,
        source: H::Element,
        target: H::Element,
        options: ConnectOptions,
    ) -> Result<ConnectorId> {
        let id = ConnectorId(self.next_id);
        let options = options.or_stroke(self.default_stroke.as_ref());

        let connector =
            Connector::attach(id, &mut self.host, source, target, options, &self.overlay)?;

        info!(
            connector_id = id.get(),
            from = connector.options().from().to_string(),
            to = connector.options().to().to_string();
            "Connector attached"
        );

        self.next_id += 1;
        self.connectors.insert(id, connector);

        Ok(id)
    }

    /// Returns the current line geometry of a connector.
    pub fn geometry(&self, id: ConnectorId) -> Result<LineGeometry> {
        self.lookup(id)?.geometry(&self.host)
    }

    /// Recomputes and redraws one connector.
    pub fn update(&mut self, id: ConnectorId) -> Result<()> {
        let connector = self
            .connectors
            .get(&id)
            .ok_or(TetherError::UnknownConnector(id))?;

        connector.update(&mut self.host, &self.overlay)
    }

    /// Removes a connector's overlay from the display tree.
    ///
    /// The connector stays registered; see [`Connectors::remove`].
    pub fn destroy(&mut self, id: ConnectorId) -> Result<()> {
        let connector = self
            .connectors
            .get_mut(&id)
            .ok_or(TetherError::UnknownConnector(id))?;

        connector.destroy(&mut self.host)?;
        info!(connector_id = id.get(); "Connector destroyed");

        Ok(())
    }

    /// Destroys a connector and unregisters it.
    ///
    /// Registration order of the remaining connectors is preserved.
    pub fn remove(&mut self, id: ConnectorId) -> Result<()> {
        let mut connector = self
            .connectors
            .shift_remove(&id)
            .ok_or(TetherError::UnknownConnector(id))?;

        connector.destroy(&mut self.host)?;
        info!(connector_id = id.get(); "Connector removed");

        Ok(())
    }

    /// Unregisters every destroyed connector and returns how many were dropped.
    pub fn prune_destroyed(&mut self) -> usize {
        let before = self.connectors.len();
        self.connectors.retain(|_, connector| !connector.is_destroyed());
        let pruned = before - self.connectors.len();

        debug!(pruned; "Pruned destroyed connectors");
        pruned
    }

    /// Runs `update` on every registered connector, in registration order.
    ///
    /// A failing connector does not stop the pass: every connector is
    /// visited and each failure is logged. Returns the number of connectors
    /// updated, or the first failure once the pass is complete.
    pub fn update_all(&mut self) -> Result<usize> {
        debug!(connectors = self.connectors.len(); "Updating all connectors");

        let mut updated = 0;
        let mut first_error = None;
        for connector in self.connectors.values() {
            match connector.update(&mut self.host, &self.overlay) {
                Ok(()) => updated += 1,
                Err(err) => {
                    warn!(connector_id = connector.id().get(), err:err; "Connector update failed");
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(updated),
        }
    }

    /// Records a resize signal at `now`, re-arming the pending update pass.
    pub fn notify_resize(&mut self, now: Duration) {
        self.debouncer.signal(now);
    }

    /// Returns true while a resize-driven update pass is pending.
    pub fn resize_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Runs the pending update pass if the resize signals have settled.
    ///
    /// Returns `Ok(Some(count))` when the pass ran and `Ok(None)` otherwise.
    pub fn poll(&mut self, now: Duration) -> Result<Option<usize>> {
        if !self.debouncer.poll(now) {
            return Ok(None);
        }

        debug!("Resize settled");
        self.update_all().map(Some)
    }

    fn lookup(&self, id: ConnectorId) -> Result<&Connector<H>> {
        self.connectors
            .get(&id)
            .ok_or(TetherError::UnknownConnector(id))
    }
}

impl<H: Host + fmt::Debug> fmt::Debug for Connectors<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connectors")
            .field("host", &self.host)
            .field("overlay", &self.overlay)
            .field("connectors", &self.connectors)
            .field("debouncer", &self.debouncer)
            .finish()
    }
}
