//! Sample set, vector image and fixed chart style types.

/// Sampling domain: `[DOMAIN_MIN, DOMAIN_MAX)`.
pub const DOMAIN_MIN: f64 = -100.0;
pub const DOMAIN_MAX: f64 = 100.0;

/// MIME type of every rendered image.
pub const SVG_MIME_TYPE: &str = "image/svg+xml";

/// Fixed chart style, modelled on pygal's default theme. The CSS colors use
/// `rgba()` notation, which the color filter later rewrites.
pub struct Theme {
    pub background: &'static str,
    pub foreground: &'static str,
    pub font_family: &'static str,
    /// Series stroke colors (RGB).
    pub colors: &'static [(u8, u8, u8)],
}

pub const THEME: Theme = Theme {
    background: "rgba(249, 249, 249, 1)",
    foreground: "rgba(0, 0, 0, .87)",
    font_family: "Consolas, \"Liberation Mono\", Menlo, Courier, monospace",
    colors: &[
        (244, 67, 54),  // #F44336
        (63, 81, 181),  // #3F51B5
        (0, 150, 136),  // #009688
        (255, 193, 7),  // #FFC107
        (255, 87, 34),  // #FF5722
    ],
};

/// Ordered y-values, one per sampled x.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    values: Vec<f64>,
    step_count: usize,
}

impl SampleSet {
    pub(crate) fn new(values: Vec<f64>, step_count: usize) -> Self {
        Self { values, step_count }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn step(&self) -> f64 {
        (DOMAIN_MAX - DOMAIN_MIN) / self.step_count as f64
    }

    /// The x-value of sample `i`.
    pub fn x_at(&self, i: usize) -> f64 {
        DOMAIN_MIN + i as f64 * self.step()
    }

    /// `(x, y)` pairs in sample order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &y)| (self.x_at(i), y))
    }
}

/// A serialized SVG document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorImage {
    bytes: Vec<u8>,
}

impl VectorImage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime_type(&self) -> &'static str {
        SVG_MIME_TYPE
    }
}

impl From<String> for VectorImage {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}
