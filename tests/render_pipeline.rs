//! End-to-end tests: expression in, hex-colored SVG out through the byte stream.

use funcplot::lang::ErrorKind;
use funcplot::plot::{color, render_chart, Sampler};
use funcplot::stream::to_signed;
use funcplot::{
    rasterize_png, Config, GraphRenderer, PlotError, ReadOutcome, SignedByteInput,
    SvgByteStream, SvgGraphRenderer,
};

fn drain_signed(stream: &mut SvgByteStream) -> Vec<i8> {
    let mut out = Vec::new();
    while let ReadOutcome::Data(b) = stream.read_byte() {
        out.push(b);
    }
    out
}

fn render_text(expression: &str, steps: usize) -> String {
    let mut stream = SvgGraphRenderer::default().render(expression, steps).unwrap();
    let bytes: Vec<u8> = drain_signed(&mut stream).into_iter().map(|b| b as u8).collect();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn test_chart_is_labeled_with_expression() {
    let svg = render_text("x", 4);
    assert!(svg.contains("f(x) = x"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_output_has_no_rgba_colors() {
    let svg = render_text("sin(x)", 200);
    assert!(!svg.contains("rgba("));
    // theme background survives as hex
    assert!(svg.contains("#f9f9f9"));
}

#[test]
fn test_output_parses_as_svg() {
    let mut stream = SvgGraphRenderer::default().render("x**2 / 100", 50).unwrap();
    let bytes: Vec<u8> = drain_signed(&mut stream).into_iter().map(|b| b as u8).collect();
    usvg::Tree::from_data(&bytes, &usvg::Options::default()).unwrap();
}

#[test]
fn test_stream_matches_filtered_chart_bytes() {
    let expression = "x % 7 - 3";
    let steps = 120;

    let samples = Sampler::default().sample(expression, steps).unwrap();
    assert_eq!(samples.len(), steps);
    let expected = color::fix(&render_chart(expression, &samples, 800, 600).unwrap());

    let mut stream = SvgGraphRenderer::default().render(expression, steps).unwrap();
    let signed = drain_signed(&mut stream);
    let converted: Vec<i8> = expected.as_bytes().iter().map(|&b| to_signed(b)).collect();
    assert_eq!(signed, converted);
    for (&s, &b) in signed.iter().zip(expected.as_bytes()) {
        let want = if b > 127 { b as i16 - 256 } else { b as i16 };
        assert_eq!(s as i16, want);
    }
}

#[test]
fn test_division_by_zero_aborts_render() {
    match SvgGraphRenderer::default().render("1/0", 10) {
        Err(PlotError::Evaluation { x, source }) => {
            assert_eq!(x, -100.0);
            assert_eq!(source.kind, ErrorKind::DivisionByZero);
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("render should fail"),
    }
}

#[test]
fn test_log_of_negative_reports_domain_error() {
    match SvgGraphRenderer::default().render("log(x)", 4) {
        Err(PlotError::Evaluation { x, source }) => {
            assert_eq!(x, -100.0);
            assert_eq!(source.kind, ErrorKind::MathDomain);
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("render should fail"),
    }
}

#[test]
fn test_unknown_name_aborts_render() {
    match SvgGraphRenderer::default().render("y + 1", 4) {
        Err(PlotError::Evaluation { source, .. }) => {
            assert_eq!(source.kind, ErrorKind::NameError);
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("render should fail"),
    }
}

#[test]
fn test_configured_canvas_size() {
    let renderer = SvgGraphRenderer::new(Config::from_toml_str("width = 320\nheight = 240").unwrap());
    let mut stream = renderer.render("x", 10).unwrap();
    let bytes: Vec<u8> = drain_signed(&mut stream).into_iter().map(|b| b as u8).collect();
    let tree = usvg::Tree::from_data(&bytes, &usvg::Options::default()).unwrap();
    assert_eq!(tree.size().width(), 320.0);
    assert_eq!(tree.size().height(), 240.0);
}

#[test]
fn test_rasterize_rendered_chart() {
    let mut stream = SvgGraphRenderer::default().render("cos(x / 10) * 50", 100).unwrap();
    let png = rasterize_png(&mut stream, 400, 300).unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (400, 300));
    assert!(stream.is_exhausted());
}

#[test]
fn test_deeply_nested_expression_fails_cleanly() {
    let nested = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
    match SvgGraphRenderer::default().render(&nested, 1) {
        Err(PlotError::Evaluation { x, source }) => {
            assert_eq!(x, -100.0);
            assert!(source.is_syntax());
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("render should fail"),
    }

    let negations = format!("{}x", "-".repeat(200_000));
    assert!(matches!(
        SvgGraphRenderer::default().render(&negations, 1),
        Err(PlotError::Evaluation { .. })
    ));
}
