//! Fixed-size raster surface backed by a Cairo image surface.
//!
//! The rasterizer talks to the [`Canvas`] trait; [`RasterSurface`] is the
//! concrete bitmap that also provides whole-surface operations (clear,
//! snapshot/restore for undo, image export).

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::{debug, warn};
use thiserror::Error;

use super::color::{BLACK, Color};
use super::font::FontDescriptor;
use crate::util::Rect;

/// Printer width in pixels; the canvas is square.
pub const CANVAS_WIDTH: i32 = 576;
/// Canvas height in pixels.
pub const CANVAS_HEIGHT: i32 = 576;
/// Fixed text size used when the text overlay commits.
pub const DEFAULT_TEXT_SIZE: f64 = 54.0;

const BYTES_PER_PIXEL: usize = 4;

/// Errors raised by surface creation and export.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Failed to create {width}x{height} surface: {source}")]
    Create {
        width: i32,
        height: i32,
        #[source]
        source: cairo::Error,
    },

    #[error("Failed to encode surface: {0}")]
    Encode(#[from] cairo::IoError),
}

/// Output encodings supported by [`RasterSurface::export_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Raw PNG bytes.
    Png,
    /// `data:image/png;base64,...` text, as produced by a browser canvas.
    PngDataUrl,
}

/// Pixel sink used by the rasterizer.
///
/// Coordinates are surface-space integers. Implementations clip anything that
/// falls outside the surface; no call can fail.
pub trait Canvas {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    /// Fills a block with opaque ink.
    fn fill_block(&mut self, x: i32, y: i32, width: i32, height: i32);
    /// Resets a block to fully transparent.
    fn clear_region(&mut self, x: i32, y: i32, width: i32, height: i32);
    /// Draws a thin, non-antialiased straight segment between two pixels.
    fn stroke_segment(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);
    /// Fills text with its baseline starting at `(x, y)`.
    fn fill_text(&mut self, x: i32, y: i32, text: &str);
}

/// A captured copy of every pixel of a surface.
///
/// Two images compare equal exactly when their dimensions and pixel bytes match.
#[derive(Clone, PartialEq, Eq)]
pub struct SurfaceImage {
    width: i32,
    height: i32,
    stride: i32,
    data: Vec<u8>,
}

impl fmt::Debug for SurfaceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("painted", &self.painted_count())
            .finish()
    }
}

impl SurfaceImage {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the premultiplied ARGB value at `(x, y)`, or `None` off-surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        pixel_in(&self.data, self.width, self.height, self.stride, x, y)
    }

    /// Returns true if the pixel at `(x, y)` carries any ink.
    pub fn is_painted(&self, x: i32, y: i32) -> bool {
        self.pixel(x, y).is_some_and(|argb| argb >> 24 != 0)
    }

    /// Number of pixels carrying any ink.
    pub fn painted_count(&self) -> usize {
        let row_bytes = self.width.max(0) as usize * BYTES_PER_PIXEL;
        self.data
            .chunks(self.stride.max(1) as usize)
            .map(|row| {
                row[..row_bytes.min(row.len())]
                    .chunks_exact(BYTES_PER_PIXEL)
                    .filter(|px| argb_from(px) >> 24 != 0)
                    .count()
            })
            .sum()
    }
}

fn argb_from(bytes: &[u8]) -> u32 {
    u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn pixel_in(data: &[u8], width: i32, height: i32, stride: i32, x: i32, y: i32) -> Option<u32> {
    if x < 0 || y < 0 || x >= width || y >= height {
        return None;
    }
    let offset = y as usize * stride as usize + x as usize * BYTES_PER_PIXEL;
    data.get(offset..offset + BYTES_PER_PIXEL).map(argb_from)
}

/// The drawable bitmap: a fixed-size ARGB32 Cairo surface plus drawing style.
///
/// Dimensions are fixed at creation. Cairo contexts are created per operation
/// and dropped before returning, so the pixel buffer is always exclusively owned
/// between calls.
pub struct RasterSurface {
    surface: cairo::ImageSurface,
    ink: Color,
    font: FontDescriptor,
    text_size: f64,
}

impl fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.surface.width())
            .field("height", &self.surface.height())
            .field("ink", &self.ink)
            .field("font", &self.font)
            .field("text_size", &self.text_size)
            .finish()
    }
}

impl RasterSurface {
    /// Creates a transparent surface of the given size.
    pub fn new(width: i32, height: i32) -> Result<Self, SurfaceError> {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
            .map_err(|source| SurfaceError::Create {
                width,
                height,
                source,
            })?;

        Ok(Self {
            surface,
            ink: BLACK,
            font: FontDescriptor::default(),
            text_size: DEFAULT_TEXT_SIZE,
        })
    }

    /// Creates the standard 576x576 printer canvas.
    pub fn printer_canvas() -> Result<Self, SurfaceError> {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    /// Current ink color.
    pub fn ink(&self) -> Color {
        self.ink
    }

    /// Sets the ink used by brush stamps, segments and text. Always applied opaque.
    pub fn set_ink(&mut self, ink: Color) {
        self.ink = ink.opaque();
    }

    /// Sets the font the text tool commits with.
    pub fn set_font(&mut self, font: FontDescriptor, size: f64) {
        self.font = font;
        self.text_size = size;
    }

    fn draw_with(&self, label: &str, draw: impl FnOnce(&cairo::Context) -> Result<(), cairo::Error>) {
        let ctx = match cairo::Context::new(&self.surface) {
            Ok(ctx) => ctx,
            Err(err) => {
                warn!("Unable to create drawing context for {label}: {err}");
                return;
            }
        };
        if let Err(err) = draw(&ctx) {
            warn!("Drawing operation {label} failed: {err}");
        }
    }

    fn clip(&self, x: i32, y: i32, width: i32, height: i32) -> Option<Rect> {
        Rect::new(x, y, width, height)?.clamp_to_bounds(self.surface.width(), self.surface.height())
    }

    /// Resets every pixel to transparent.
    pub fn clear_all(&mut self) {
        self.draw_with("clear_all", |ctx| {
            ctx.set_operator(cairo::Operator::Clear);
            ctx.paint()
        });
    }

    /// Captures an exact copy of the current pixels.
    pub fn snapshot(&self) -> SurfaceImage {
        let mut data = Vec::new();
        if let Err(err) = self.surface.with_data(|bytes| data.extend_from_slice(bytes)) {
            warn!("Unable to read surface pixels for snapshot: {err}");
        }
        SurfaceImage {
            width: self.surface.width(),
            height: self.surface.height(),
            stride: self.surface.stride(),
            data,
        }
    }

    /// Replaces every pixel with the contents of `image`.
    ///
    /// Returns false (leaving the surface untouched) if the image was captured
    /// from a surface of a different shape.
    pub fn restore(&mut self, image: &SurfaceImage) -> bool {
        if image.width != self.surface.width()
            || image.height != self.surface.height()
            || image.stride != self.surface.stride()
        {
            warn!(
                "Ignoring {}x{} snapshot for {}x{} surface",
                image.width,
                image.height,
                self.surface.width(),
                self.surface.height()
            );
            return false;
        }

        match self.surface.data() {
            Ok(mut data) if data.len() == image.data.len() => {
                data.copy_from_slice(&image.data);
                true
            }
            Ok(data) => {
                warn!(
                    "Snapshot holds {} bytes but surface holds {}",
                    image.data.len(),
                    data.len()
                );
                false
            }
            Err(err) => {
                warn!("Unable to write surface pixels for restore: {err}");
                false
            }
        }
    }

    /// Encodes the surface. Never modifies pixels.
    pub fn export_image(&self, format: ImageFormat) -> Result<Vec<u8>, SurfaceError> {
        let mut png = Vec::new();
        self.surface.write_to_png(&mut png)?;
        debug!("Encoded surface as PNG ({} bytes)", png.len());

        match format {
            ImageFormat::Png => Ok(png),
            ImageFormat::PngDataUrl => {
                Ok(format!("data:image/png;base64,{}", BASE64.encode(&png)).into_bytes())
            }
        }
    }

    /// Returns the premultiplied ARGB value at `(x, y)`, or `None` off-surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        let mut value = None;
        let (width, height, stride) = (
            self.surface.width(),
            self.surface.height(),
            self.surface.stride(),
        );
        if let Err(err) = self
            .surface
            .with_data(|bytes| value = pixel_in(bytes, width, height, stride, x, y))
        {
            warn!("Unable to read surface pixel: {err}");
        }
        value
    }

    /// Returns true if the pixel at `(x, y)` carries any ink.
    pub fn is_painted(&self, x: i32, y: i32) -> bool {
        self.pixel(x, y).is_some_and(|argb| argb >> 24 != 0)
    }
}

impl Canvas for RasterSurface {
    fn width(&self) -> i32 {
        self.surface.width()
    }

    fn height(&self) -> i32 {
        self.surface.height()
    }

    fn fill_block(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let Some(rect) = self.clip(x, y, width, height) else {
            return;
        };
        let ink = self.ink;
        self.draw_with("fill_block", |ctx| {
            ctx.set_antialias(cairo::Antialias::None);
            ctx.set_source_rgba(ink.r, ink.g, ink.b, ink.a);
            ctx.rectangle(
                rect.x as f64,
                rect.y as f64,
                rect.width as f64,
                rect.height as f64,
            );
            ctx.fill()
        });
    }

    fn clear_region(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let Some(rect) = self.clip(x, y, width, height) else {
            return;
        };
        self.draw_with("clear_region", |ctx| {
            ctx.set_operator(cairo::Operator::Clear);
            ctx.rectangle(
                rect.x as f64,
                rect.y as f64,
                rect.width as f64,
                rect.height as f64,
            );
            ctx.fill()
        });
    }

    fn stroke_segment(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let ink = self.ink;
        self.draw_with("stroke_segment", |ctx| {
            ctx.set_antialias(cairo::Antialias::None);
            ctx.set_source_rgba(ink.r, ink.g, ink.b, ink.a);
            ctx.set_line_width(1.0);
            ctx.set_line_cap(cairo::LineCap::Square);
            // Pixel centres, so a 1px line covers whole pixels.
            ctx.move_to(x0 as f64 + 0.5, y0 as f64 + 0.5);
            ctx.line_to(x1 as f64 + 0.5, y1 as f64 + 0.5);
            ctx.stroke()
        });
    }

    fn fill_text(&mut self, x: i32, y: i32, text: &str) {
        if text.is_empty() {
            return;
        }
        let ink = self.ink;
        let font_desc_str = self.font.to_pango_string(self.text_size);
        self.draw_with("fill_text", |ctx| {
            let layout = pangocairo::functions::create_layout(ctx);
            let font_desc = pango::FontDescription::from_string(&font_desc_str);
            layout.set_font_description(Some(&font_desc));
            layout.set_text(text);

            // Pango lays out from the top-left corner; the anchor is the baseline.
            let baseline = layout.baseline() as f64 / pango::SCALE as f64;
            ctx.set_source_rgba(ink.r, ink.g, ink.b, ink.a);
            ctx.move_to(x as f64, y as f64 - baseline);
            pangocairo::functions::show_layout(ctx, &layout);
            Ok(())
        });
    }
}
