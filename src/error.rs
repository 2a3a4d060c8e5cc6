use crate::lang::LangError;

pub type PlotResult<T> = Result<T, PlotError>;

/// Failures of the render pipeline and of malformed stream reads.
///
/// Running out of bytes is not an error; see [`ReadOutcome`](crate::stream::ReadOutcome).
#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("evaluation error at x = {x}: {source}")]
    Evaluation {
        x: f64,
        #[source]
        source: LangError,
    },

    #[error("render error: {0}")]
    Render(String),

    #[error("raster error: {0}")]
    Raster(String),

    #[error("config error: {0}")]
    Config(String),
}

impl PlotError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn evaluation(x: f64, source: LangError) -> Self {
        Self::Evaluation { x, source }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
