use crate::error::{PlotError, PlotResult};
use crate::lang::{parse, Evaluator, MathContext};
use crate::plot::types::{SampleSet, DOMAIN_MAX, DOMAIN_MIN};

/// Evaluates expressions over the fixed domain.
pub struct Sampler {
    context: MathContext,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(MathContext::standard())
    }
}

impl Sampler {
    pub fn new(context: MathContext) -> Self {
        Self { context }
    }

    /// Sample `expression` at exactly `step_count` evenly spaced points.
    ///
    /// `x_i = DOMAIN_MIN + i * step` is computed from the index rather than
    /// accumulated, so float drift never adds or drops a point.
    #[tracing::instrument(skip(self))]
    pub fn sample(&self, expression: &str, step_count: usize) -> PlotResult<SampleSet> {
        if step_count == 0 {
            return Err(PlotError::invalid_argument("step count must be greater than 0"));
        }

        // A source that does not parse fails at the first point it would be evaluated at.
        let expr = parse(expression).map_err(|e| PlotError::evaluation(DOMAIN_MIN, e))?;

        let evaluator = Evaluator::new(&self.context);
        let step = (DOMAIN_MAX - DOMAIN_MIN) / step_count as f64;
        let mut values = Vec::with_capacity(step_count);
        for i in 0..step_count {
            let x = DOMAIN_MIN + i as f64 * step;
            let y = evaluator
                .eval(&expr, x)
                .map_err(|e| PlotError::evaluation(x, e))?;
            values.push(y);
        }

        tracing::debug!(samples = values.len(), "sampled expression");
        Ok(SampleSet::new(values, step_count))
    }
}
