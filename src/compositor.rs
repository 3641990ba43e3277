use image::{DynamicImage, Rgb, RgbImage, imageops};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::models::BoundingBox;

const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const BOX_STROKE: u32 = 2;

/// How an image sits on the square canvas: its scaled dimensions and the
/// integer offsets that center it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub scaled_w: u32,
    pub scaled_h: u32,
    pub x_offset: u32,
    pub y_offset: u32,
}

impl Layout {
    /// Uniform scale so the image fits inside the canvas on both axes,
    /// centered with truncating integer offsets. Using the smaller of the
    /// two ratios keeps wide-but-short images from running past the bottom
    /// edge of the canvas.
    pub fn fit(image_w: u32, image_h: u32, canvas: u32) -> Self {
        let scale = (canvas as f64 / image_w as f64).min(canvas as f64 / image_h as f64);
        let scaled_w = ((image_w as f64 * scale) as u32).max(1);
        let scaled_h = ((image_h as f64 * scale) as u32).max(1);
        Self {
            scaled_w,
            scaled_h,
            x_offset: (canvas - scaled_w.min(canvas)) / 2,
            y_offset: (canvas - scaled_h.min(canvas)) / 2,
        }
    }

    /// Canvas-space rectangle for a normalized box: corners scaled by the
    /// displayed dimensions, truncated toward zero, then shifted by the
    /// centering offsets. `None` when truncation collapses the box.
    pub fn box_rect(&self, bbox: &BoundingBox) -> Option<Rect> {
        let x_min = ((bbox.x - bbox.width / 2.0) * self.scaled_w as f64) as i32;
        let y_min = ((bbox.y - bbox.height / 2.0) * self.scaled_h as f64) as i32;
        let x_max = ((bbox.x + bbox.width / 2.0) * self.scaled_w as f64) as i32;
        let y_max = ((bbox.y + bbox.height / 2.0) * self.scaled_h as f64) as i32;

        if x_max <= x_min || y_max <= y_min {
            return None;
        }

        Some(
            Rect::at(x_min + self.x_offset as i32, y_min + self.y_offset as i32)
                .of_size((x_max - x_min) as u32, (y_max - y_min) as u32),
        )
    }
}

/// Render one review frame: the image letterboxed onto a black square
/// canvas with every annotation drawn as a hollow green rectangle.
pub fn compose(image: &DynamicImage, boxes: &[BoundingBox], canvas_size: u32) -> RgbImage {
    let layout = Layout::fit(image.width(), image.height(), canvas_size);
    let scaled = image
        .resize_exact(
            layout.scaled_w,
            layout.scaled_h,
            imageops::FilterType::Triangle,
        )
        .to_rgb8();

    let mut canvas = RgbImage::new(canvas_size, canvas_size);
    imageops::overlay(
        &mut canvas,
        &scaled,
        layout.x_offset as i64,
        layout.y_offset as i64,
    );

    for bbox in boxes {
        if let Some(rect) = layout.box_rect(bbox) {
            draw_box(&mut canvas, rect);
        }
    }

    canvas
}

fn draw_box(canvas: &mut RgbImage, rect: Rect) {
    draw_hollow_rect_mut(canvas, rect, BOX_COLOR);
    // Inset rings for the remaining stroke width.
    for inset in 1..BOX_STROKE as i32 {
        let width = rect.width() as i32 - 2 * inset;
        let height = rect.height() as i32 - 2 * inset;
        if width <= 0 || height <= 0 {
            break;
        }
        let inner =
            Rect::at(rect.left() + inset, rect.top() + inset).of_size(width as u32, height as u32);
        draw_hollow_rect_mut(canvas, inner, BOX_COLOR);
    }
}
