//! Tether - SVG connector lines between page elements.
//!
//! A connector is an absolutely positioned, non-interactive `<svg>` overlay
//! holding one `<line>` that runs between named attachment points of two
//! elements (for example `bottom-middle` of one box to `top-middle` of
//! another). Connectors live in a [`Connectors`] context which redraws all of
//! them, in creation order, once the viewport has stopped resizing.
//!
//! Rendering goes through the [`host::Host`] trait. [`scene::SceneHost`] is a
//! headless page that serializes to SVG; the `web` feature adds
//! [`web::DomHost`] for the browser.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use tether::{ConnectOptions, Connectors, connect};
//! use tether::geometry::{Bounds, Size};
//! use tether::scene::SceneHost;
//!
//! let mut host = SceneHost::new(Size::new(200.0, 200.0));
//! let a = host.add_element("a", Bounds::from_rect(0.0, 0.0, 10.0, 10.0));
//! let b = host.add_element("b", Bounds::from_rect(50.0, 0.0, 10.0, 10.0));
//!
//! let mut connectors = Connectors::new(host);
//! let id = connect(
//!     &mut connectors,
//!     a.clone(),
//!     b,
//!     ConnectOptions::from_names("bottom-middle", "top-middle"),
//! )
//! .unwrap();
//!
//! // Move an element, then let a resize burst settle.
//! connectors
//!     .host_mut()
//!     .move_element(&a, Bounds::from_rect(0.0, 20.0, 10.0, 10.0))
//!     .unwrap();
//! connectors.notify_resize(Duration::ZERO);
//! assert_eq!(connectors.poll(Duration::from_millis(5)).unwrap(), Some(1));
//!
//! assert_eq!(connectors.geometry(id).unwrap().from().x(), 25.0);
//! ```

pub mod config;
pub mod connector;
pub mod debounce;
pub mod host;
pub mod registry;
pub mod scene;
#[cfg(feature = "web")]
pub mod web;

mod error;

pub use tether_core::{anchor, color, geometry, line, stroke};

pub use connector::{ConnectOptions, Connector, ConnectorState};
pub use error::{Result, TetherError};
pub use registry::{ConnectorId, Connectors};

use host::Host;

/// Draws a connector between two elements and registers it with `connectors`.
///
/// Shorthand for [`Connectors::connect`].
///
/// # Errors
///
/// Returns an error if the host cannot create the overlay or measure either
/// element.
pub fn connect<H: Host>(
    connectors: &mut Connectors<H>,
    source: H::Element,
    target: H::Element,
    options: ConnectOptions,
) -> Result<ConnectorId> {
    connectors.connect(source, target, options)
}
