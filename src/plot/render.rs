//! Chart rendering pipeline: SampleSet → SVG bytes via plotters.

use crate::error::{PlotError, PlotResult};
use crate::plot::types::*;
use plotters::prelude::*;

/// Background color (pygal default style).
const BG_COLOR: RGBColor = RGBColor(249, 249, 249);
/// Axis / guide color.
const AXIS_COLOR: RGBColor = RGBColor(0, 0, 0);
/// Label color.
const LABEL_COLOR: RGBColor = RGBColor(33, 33, 33);

/// Render a single unfilled line series labeled `f(x) = {expression}`.
#[tracing::instrument(skip(samples), fields(samples = samples.len()))]
pub fn render_chart(
    expression: &str,
    samples: &SampleSet,
    width: u32,
    height: u32,
) -> PlotResult<VectorImage> {
    let label = format!("f(x) = {}", expression);
    let mut svg = String::new();

    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&BG_COLOR)
            .map_err(|e| PlotError::render(format!("fill: {}", e)))?;

        let (y_min, y_max) = compute_y_range(samples.values());

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(30)
            .y_label_area_size(60)
            .build_cartesian_2d(DOMAIN_MIN..DOMAIN_MAX, y_min..y_max)
            .map_err(|e| PlotError::render(format!("chart build: {}", e)))?;

        chart
            .plotting_area()
            .fill(&WHITE)
            .map_err(|e| PlotError::render(format!("plot fill: {}", e)))?;

        chart
            .configure_mesh()
            .axis_style(AXIS_COLOR.mix(0.54))
            .bold_line_style(AXIS_COLOR.mix(0.15))
            .light_line_style(AXIS_COLOR.mix(0.05))
            .label_style(("monospace", 12).into_font().color(&LABEL_COLOR))
            .draw()
            .map_err(|e| PlotError::render(format!("mesh: {}", e)))?;

        let (r, g, b) = THEME.colors[0];
        let color = RGBColor(r, g, b);
        let mut segments = split_segments(samples);
        if segments.is_empty() {
            // Nothing finite to draw; keep an empty series so the legend still names the function.
            segments.push(Vec::new());
        }

        for (i, segment) in segments.into_iter().enumerate() {
            let series = chart
                .draw_series(LineSeries::new(segment, color.stroke_width(2)))
                .map_err(|e| PlotError::render(format!("draw series: {}", e)))?;
            if i == 0 {
                series.label(label.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(AXIS_COLOR.mix(0.15))
            .label_font(("monospace", 14).into_font().color(&LABEL_COLOR))
            .draw()
            .map_err(|e| PlotError::render(format!("legend: {}", e)))?;

        root.present()
            .map_err(|e| PlotError::render(format!("present: {}", e)))?;
    }

    Ok(VectorImage::from(embed_stylesheet(&svg)?))
}

/// Insert the theme stylesheet as the first child of the root `<svg>` element.
fn embed_stylesheet(svg: &str) -> PlotResult<String> {
    let root_start = svg
        .find("<svg")
        .ok_or_else(|| PlotError::render("backend produced no <svg> element"))?;
    let root_end = svg[root_start..]
        .find('>')
        .map(|i| root_start + i + 1)
        .ok_or_else(|| PlotError::render("unterminated <svg> element"))?;

    let mut out = String::with_capacity(svg.len() + 512);
    out.push_str(&svg[..root_end]);
    out.push('\n');
    out.push_str(&stylesheet());
    out.push_str(&svg[root_end..]);
    Ok(out)
}

fn stylesheet() -> String {
    format!(
        "<style type=\"text/css\">\n\
         svg {{ background-color: {bg}; font-family: {font}; }}\n\
         text {{ fill: {fg}; }}\n\
         polyline, path {{ stroke-linejoin: round; stroke-linecap: round; }}\n\
         </style>\n",
        bg = THEME.background,
        font = THEME.font_family,
        fg = THEME.foreground,
    )
}

/// Split samples at non-finite values into continuous segments.
fn split_segments(samples: &SampleSet) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for (x, y) in samples.points() {
        if y.is_finite() {
            current.push((x, y));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Compute a y-axis range from the finite samples, with padding.
fn compute_y_range(values: &[f64]) -> (f64, f64) {
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for &y in values {
        if y.is_finite() {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }

    // Fallback for empty/constant data
    if !y_min.is_finite() || !y_max.is_finite() {
        return (-1.0, 1.0);
    }
    if (y_max - y_min).abs() < 1e-10 {
        return (y_min - 1.0, y_max + 1.0);
    }

    // Add 10% padding
    let pad = (y_max - y_min) * 0.1;
    (y_min - pad, y_max + pad)
}
