//! Tether Core Types
//!
//! This crate provides the host-independent pieces of Tether connectors:
//!
//! - **Geometry**: points, sizes and bounding boxes ([`geometry`] module)
//! - **Anchors**: the nine named attachment positions ([`anchor`] module)
//! - **Lines**: overlay box and endpoint computation ([`line`] module)
//! - **Colors** and **Strokes**: line styling ([`color`], [`stroke`] modules)

pub mod anchor;
pub mod color;
pub mod geometry;
pub mod line;
pub mod stroke;
