//! Rewrites `rgba(r, g, b, a)` color functions into `#rrggbb` so that SVG
//! consumers without CSS color-level-3 support render the chart correctly.

use crate::plot::types::VectorImage;
use regex::bytes::{Captures, Regex};
use std::sync::OnceLock;

fn rgba_pattern() -> &'static Regex {
    static RGBA: OnceLock<Regex> = OnceLock::new();
    RGBA.get_or_init(|| {
        Regex::new(r"(?-u)rgba\((\d+),\s?(\d+),\s?(\d+),\s?[.0-9]+\)").expect("valid regex")
    })
}

/// Replace every rgba color in `image` with its hex equivalent. Alpha is dropped.
///
/// Components above 255 are clamped. Bytes outside matches are untouched, so an
/// image without rgba colors comes back byte-identical.
pub fn fix(image: &VectorImage) -> VectorImage {
    let fixed = rgba_pattern().replace_all(image.as_bytes(), |caps: &Captures<'_>| {
        format!(
            "#{:02x}{:02x}{:02x}",
            component(&caps[1]),
            component(&caps[2]),
            component(&caps[3]),
        )
        .into_bytes()
    });
    VectorImage::new(fixed.into_owned())
}

/// Parse a run of ASCII digits, saturating at 255.
fn component(digits: &[u8]) -> u8 {
    digits
        .iter()
        .try_fold(0u8, |acc, d| acc.checked_mul(10)?.checked_add(d - b'0'))
        .unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix_str(s: &str) -> String {
        let out = fix(&VectorImage::new(s.as_bytes().to_vec()));
        String::from_utf8(out.into_bytes()).unwrap()
    }

    #[test]
    fn test_rewrites_rgba() {
        assert_eq!(fix_str("fill: rgba(255, 0, 128, 0.5);"), "fill: #ff0080;");
    }

    #[test]
    fn test_leading_dot_alpha_and_no_spaces() {
        assert_eq!(fix_str("rgba(0,0,0,.87)"), "#000000");
        assert_eq!(fix_str("rgba(249, 249, 249, 1)"), "#f9f9f9");
    }

    #[test]
    fn test_multiple_matches() {
        assert_eq!(
            fix_str("a rgba(1, 2, 3, 1) b rgba(16, 32, 48, .5) c"),
            "a #010203 b #102030 c"
        );
    }

    #[test]
    fn test_untouched_without_match() {
        let svg = "<svg><rect fill=\"#F44336\" opacity=\"0.5\"/></svg>";
        assert_eq!(fix_str(svg), svg);
        // rgb() and wider whitespace are not rgba colors in this sense
        assert_eq!(fix_str("rgb(1, 2, 3)"), "rgb(1, 2, 3)");
        assert_eq!(fix_str("rgba(1,  2, 3, 1)"), "rgba(1,  2, 3, 1)");
    }

    #[test]
    fn test_out_of_range_components_clamp() {
        assert_eq!(fix_str("rgba(256, 300, 9999, 1)"), "#ffffff");
        assert_eq!(fix_str("rgba(255, 0255, 00, 1)"), "#ffff00");
    }

    #[test]
    fn test_non_utf8_bytes_preserved() {
        let mut bytes = vec![0xff, 0xfe];
        bytes.extend_from_slice(b"rgba(0, 0, 255, 1)");
        let out = fix(&VectorImage::new(bytes));
        assert_eq!(out.as_bytes(), b"\xff\xfe#0000ff");
    }
}
