//! Public entry points: the HTTP router and the page renderer.

pub mod http;
pub mod render;

pub use http::router;
