use crate::config::Config;
use crate::error::{PlotError, PlotResult};
use crate::plot::{color, render_chart, Sampler, SVG_MIME_TYPE};
use crate::stream::SvgByteStream;

/// Turns an expression into a readable chart.
pub trait GraphRenderer {
    /// Sample, render and post-process `expression`, returning the finished
    /// image as a stream. Nothing is returned if any stage fails.
    fn render(&self, expression: &str, step_count: usize) -> PlotResult<SvgByteStream>;

    fn mime_type(&self) -> &'static str {
        SVG_MIME_TYPE
    }
}

/// Line-chart renderer producing SVG with hex-only colors.
#[derive(Default)]
pub struct SvgGraphRenderer {
    config: Config,
    sampler: Sampler,
}

impl SvgGraphRenderer {
    pub fn new(config: Config) -> Self {
        Self::with_sampler(config, Sampler::default())
    }

    pub fn with_sampler(config: Config, sampler: Sampler) -> Self {
        Self { config, sampler }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl GraphRenderer for SvgGraphRenderer {
    fn render(&self, expression: &str, step_count: usize) -> PlotResult<SvgByteStream> {
        tracing::info!("rendering {} with {} steps", expression, step_count);

        if step_count > self.config.max_step_count {
            return Err(PlotError::invalid_argument(format!(
                "step count {} exceeds the maximum of {}",
                step_count, self.config.max_step_count
            )));
        }

        let samples = self.sampler.sample(expression, step_count)?;
        let chart = render_chart(expression, &samples, self.config.width, self.config.height)?;
        let fixed = color::fix(&chart);
        tracing::debug!(bytes = fixed.len(), "chart ready");
        Ok(SvgByteStream::new(fixed))
    }
}
