//! PNG rasterization of a rendered chart, for hosts that cannot display SVG.

use crate::error::{PlotError, PlotResult};
use crate::stream::{ReadOutcome, SignedByteInput};
use image::codecs::png::PngEncoder;
use image::ImageEncoder;
use std::sync::{Arc, OnceLock};

const CHUNK_SIZE: usize = 4096;
const MAX_DIM: u32 = 16_384;

fn system_fonts() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "loaded system fonts");
            Arc::new(db)
        })
        .clone()
}

/// Drain `stream` and rasterize the SVG it carries to a `width`x`height` PNG.
#[tracing::instrument(skip(stream))]
pub fn rasterize_png<S: SignedByteInput + ?Sized>(
    stream: &mut S,
    width: u32,
    height: u32,
) -> PlotResult<Vec<u8>> {
    if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
        return Err(PlotError::raster(format!(
            "raster size {}x{} out of range (max {}x{})",
            width, height, MAX_DIM, MAX_DIM
        )));
    }

    let svg = drain(stream);
    let opts = usvg::Options {
        fontdb: system_fonts(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(&svg, &opts)
        .map_err(|e| PlotError::raster(format!("parse svg: {}", e)))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PlotError::raster("failed to allocate pixmap"))?;
    let sx = width as f32 / tree.size().width();
    let sy = height as f32 / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    encode_rgba_to_png(&demultiply(&pixmap), width, height)
}

fn drain<S: SignedByteInput + ?Sized>(stream: &mut S) -> Vec<u8> {
    let mut out = Vec::new();
    let mut chunk = [0i8; CHUNK_SIZE];
    while let ReadOutcome::Data(n) = stream.read_into(&mut chunk) {
        out.extend(chunk[..n].iter().map(|&b| b as u8));
    }
    out
}

/// tiny-skia stores premultiplied alpha; PNG wants straight alpha.
fn demultiply(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    rgba
}

/// Encode a raw RGBA pixel buffer to PNG.
fn encode_rgba_to_png(rgba: &[u8], width: u32, height: u32) -> PlotResult<Vec<u8>> {
    let mut png = Vec::new();
    let encoder = PngEncoder::new(&mut png);
    encoder
        .write_image(rgba, width, height, image::ExtendedColorType::Rgba8)
        .map_err(|e| PlotError::raster(format!("PNG encode: {}", e)))?;
    Ok(png)
}
