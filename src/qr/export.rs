use crate::qr::svg::Document;
use anyhow::{Context, Result};
use resvg::tiny_skia;
use resvg::usvg;
use std::io::Cursor;

/// Pixel dimensions of a raster export relative to the document's declared
/// width/height. Kept at 2x so exports stay crisp after framing has grown
/// the canvas.
const RASTER_SCALE: f64 = 2.0;

/// Serializes the final vector graphic verbatim.
pub fn to_svg(document: &Document) -> String {
    document.to_svg_string()
}

/// Rasterizes the final vector graphic to PNG bytes at twice its declared
/// dimensions.
pub fn to_png(document: &Document) -> Result<Vec<u8>> {
    let svg = document.to_svg_string();

    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&svg, &options)
        .context("Could not parse the generated SVG for rasterization")?;

    let width = (document.width * RASTER_SCALE).round() as u32;
    let height = (document.height * RASTER_SCALE).round() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .context("Could not allocate a pixmap for rasterization")?;

    let transform = tiny_skia::Transform::from_scale(RASTER_SCALE as f32, RASTER_SCALE as f32);
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    tracing::debug!(width, height, "rasterized document");

    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for pixel in pixmap.pixels() {
        let pixel = pixel.demultiply();
        rgba.extend_from_slice(&[pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()]);
    }

    let image = image::RgbaImage::from_raw(width, height, rgba)
        .context("Rasterized buffer has unexpected dimensions")?;
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, image::ImageFormat::Png)
        .context("Could not encode PNG")?;
    Ok(bytes.into_inner())
}
