// Application layer - Use cases over the domain
pub mod chart_builder;
pub mod chart_service;
pub mod error;
pub mod normalizer;
pub mod range;
pub mod render;

pub use error::{ChartError, SurfaceError};
