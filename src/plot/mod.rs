//! Sampling, chart rendering and post-processing of rendered charts.

pub mod color;
pub mod raster;
pub mod render;
pub mod sampler;
pub mod types;

pub use raster::rasterize_png;
pub use render::render_chart;
pub use sampler::Sampler;
pub use types::{SampleSet, VectorImage, DOMAIN_MAX, DOMAIN_MIN, SVG_MIME_TYPE};
