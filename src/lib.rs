//! Plot a single-variable expression as an SVG line chart and hand the result
//! out as a stream of signed bytes.
//!
//! ```no_run
//! use funcplot::{GraphRenderer, SvgGraphRenderer};
//! use funcplot::stream::{ReadOutcome, SignedByteInput};
//!
//! let mut stream = SvgGraphRenderer::default().render("sin(x / 10) * x", 400)?;
//! let mut buf = [0i8; 1024];
//! while let ReadOutcome::Data(n) = stream.read_into(&mut buf) {
//!     // consume buf[..n]
//! #   let _ = n;
//! }
//! # Ok::<(), funcplot::PlotError>(())
//! ```

pub mod config;
pub mod error;
pub mod lang;
pub mod plot;
pub mod renderer;
pub mod stream;

pub use config::Config;
pub use error::{PlotError, PlotResult};
pub use plot::rasterize_png;
pub use renderer::{GraphRenderer, SvgGraphRenderer};
pub use stream::{ReadOutcome, SignedByteInput, SvgByteStream};
