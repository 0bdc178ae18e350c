//! Browser DOM backend.
//!
//! [`DomHost`] measures real page elements with `getBoundingClientRect` and
//! appends one `<svg>` overlay per connector to `document.body`.
//! [`attach_resize_listener`] wires the window `resize` event to a shared
//! [`Connectors`] context through a single cancellable timeout slot.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use gloo_timers::callback::Timeout;
use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Document, Element, SvgElement, window};

use tether_core::geometry::Bounds;

use crate::{
    config::ResizeConfig,
    error::{Result, TetherError},
    host::{Host, OverlayFrame, SVG_NAMESPACE},
    registry::Connectors,
};

fn host_error(context: &str, err: JsValue) -> TetherError {
    TetherError::Host(format!("{context}: {err:?}"))
}

fn document() -> Result<Document> {
    window()
        .and_then(|window| window.document())
        .ok_or_else(|| TetherError::Host("No document object available".to_string()))
}

fn set_attributes(element: &Element, attributes: &[(&'static str, String)]) -> Result<()> {
    for (name, value) in attributes {
        element
            .set_attribute(name, value)
            .map_err(|err| host_error("Failed to set attribute", err))?;
    }
    Ok(())
}

/// The `<svg>` element of a connector and the `<line>` inside it.
#[derive(Debug, Clone)]
pub struct DomOverlay {
    svg: SvgElement,
    line: Element,
}

impl DomOverlay {
    pub fn svg(&self) -> &SvgElement {
        &self.svg
    }

    pub fn line(&self) -> &Element {
        &self.line
    }
}

/// Host backed by the browser document.
#[derive(Debug, Clone)]
pub struct DomHost {
    document: Document,
}

impl DomHost {
    /// Creates a host over the current window's document.
    ///
    /// # Errors
    ///
    /// Returns an error outside a browser context.
    pub fn new() -> Result<Self> {
        Ok(Self {
            document: document()?,
        })
    }

    fn create_svg_node(&self, tag: &str) -> Result<Element> {
        self.document
            .create_element_ns(Some(SVG_NAMESPACE), tag)
            .map_err(|err| host_error("Failed to create SVG element", err))
    }
}

impl Host for DomHost {
    type Element = Element;
    type Overlay = DomOverlay;

    fn bounds_of(&self, element: &Element) -> Result<Bounds> {
        let rect = element.get_bounding_client_rect();
        Ok(Bounds::from_rect(
            rect.top() as f32,
            rect.left() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ))
    }

    fn create_overlay(&mut self) -> Result<DomOverlay> {
        let body = self
            .document
            .body()
            .ok_or_else(|| TetherError::Host("Document has no body".to_string()))?;

        let svg = self
            .create_svg_node("svg")?
            .dyn_into::<SvgElement>()
            .map_err(|node| host_error("Overlay is not an SVG element", node.into()))?;
        body.append_child(&svg)
            .map_err(|err| host_error("Failed to append overlay", err))?;

        let line = self.create_svg_node("line")?;
        svg.append_child(&line)
            .map_err(|err| host_error("Failed to append line", err))?;

        Ok(DomOverlay { svg, line })
    }

    fn apply_frame(&mut self, overlay: &DomOverlay, frame: &OverlayFrame) -> Result<()> {
        set_attributes(&overlay.svg, &frame.overlay_attributes())?;

        let style = overlay.svg.style();
        for (property, value) in frame.style_properties() {
            style
                .set_property(property, &value)
                .map_err(|err| host_error("Failed to set overlay style", err))?;
        }

        set_attributes(&overlay.line, &frame.line_attributes())
    }

    fn remove_overlay(&mut self, overlay: &DomOverlay) -> Result<()> {
        // No-op when already detached
        overlay.svg.remove();
        Ok(())
    }

    fn contains_overlay(&self, overlay: &DomOverlay) -> bool {
        overlay.svg.is_connected()
    }
}

/// Handle for the window resize listener.
///
/// Dropping the handle without calling [`ResizeListener::remove`] leaves the
/// listener attached but invalidates its callback; always remove it.
pub struct ResizeListener {
    closure: Closure<dyn FnMut()>,
    pending: Rc<RefCell<Option<Timeout>>>,
    passes: Rc<Cell<u32>>,
}

impl ResizeListener {
    /// Number of update passes run since the listener was attached.
    pub fn passes(&self) -> u32 {
        self.passes.get()
    }

    /// Returns true while an update pass is waiting for the resize burst to end.
    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Cancels any pending update pass and detaches the listener.
    ///
    /// # Errors
    ///
    /// Returns an error if the window is gone or the listener cannot be removed.
    pub fn remove(self) -> Result<()> {
        if let Some(timeout) = self.pending.borrow_mut().take() {
            timeout.cancel();
        }

        let window =
            window().ok_or_else(|| TetherError::Host("No window object available".to_string()))?;
        window
            .remove_event_listener_with_callback("resize", self.closure.as_ref().unchecked_ref())
            .map_err(|err| host_error("Failed to remove resize listener", err))?;

        Ok(())
    }
}

/// Updates every connector once the window has stopped resizing.
///
/// Each `resize` event cancels the pending timeout and arms a new one
/// `config.debounce_ms()` later; when it fires, all connectors are updated in
/// registration order.
///
/// # Errors
///
/// Returns an error if the window is not available or the listener cannot
/// be attached.
///
/// # Example
///
/// ```no_run
/// use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};
/// use tether::{Connectors, config::ResizeConfig};
/// use tether::web::{DomHost, attach_resize_listener};
///
/// # fn example() -> Result<(), tether::TetherError> {
/// let connectors = Rc::new(RefCell::new(Connectors::new(DomHost::new()?)));
/// let listener = attach_resize_listener(connectors.clone(), ResizeConfig::default())?;
/// // ... later, on teardown ...
/// listener.remove()?;
/// # Ok(())
/// # }
/// ```
pub fn attach_resize_listener(
    connectors: Rc<RefCell<Connectors<DomHost>>>,
    config: ResizeConfig,
) -> Result<ResizeListener> {
    let window =
        window().ok_or_else(|| TetherError::Host("No window object available".to_string()))?;

    let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
    let passes = Rc::new(Cell::new(0));
    let debounce_ms = config.debounce_ms();

    let pending_for_closure = pending.clone();
    let passes_for_closure = passes.clone();
    let closure = Closure::wrap(Box::new(move || {
        if let Some(timeout) = pending_for_closure.borrow_mut().take() {
            timeout.cancel();
        }

        let connectors = connectors.clone();
        let pending_inner = pending_for_closure.clone();
        let passes_inner = passes_for_closure.clone();
        let timeout = Timeout::new(debounce_ms, move || {
            pending_inner.borrow_mut().take();
            passes_inner.set(passes_inner.get() + 1);

            match connectors.try_borrow_mut() {
                Ok(mut connectors) => match connectors.update_all() {
                    Ok(count) => debug!(count; "Connectors updated after resize"),
                    Err(err) => warn!(err:err; "Failed to update connectors after resize"),
                },
                Err(_) => warn!("Connectors busy, skipping resize update"),
            }
        });

        *pending_for_closure.borrow_mut() = Some(timeout);
    }) as Box<dyn FnMut()>);

    window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .map_err(|err| host_error("Failed to attach resize listener", err))?;

    Ok(ResizeListener {
        closure,
        pending,
        passes,
    })
}

#[cfg(all(test, target_arch = "wasm32"))]
#[path = "web_test.rs"]
mod web_test;
