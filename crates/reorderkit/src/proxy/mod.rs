//! The floating proxy that follows the pointer during a drag.
//!
//! [`ProxyController`] owns the proxy's lifecycle on a host
//! [`ProxySurface`](reorderkit_render::ProxySurface); [`ProxyStyle`] decides
//! how it looks.

mod controller;
mod style;

pub use controller::{ProxyController, ProxyHandle};
pub use style::{ProxyStyle, ShadowStyle};
