//! Freehand signature surface rasterized to a transparent PNG.

use image::{ImageFormat, Rgba, RgbaImage};
use shared::{error::CaptureError, DataUri};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn distance(self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenStyle {
    pub width: f32,
    pub color: [u8; 4],
}

impl Default for PenStyle {
    fn default() -> Self {
        Self {
            width: 2.5,
            color: [0, 0, 0, 255],
        }
    }
}

#[derive(Debug, Clone)]
pub struct SignaturePad {
    width: u32,
    height: u32,
    pen: PenStyle,
    strokes: Vec<Vec<Point>>,
    drawing: bool,
}

impl SignaturePad {
    pub fn new(width: u32, height: u32, pen: PenStyle) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            pen,
            strokes: Vec::new(),
            drawing: false,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pen(&self) -> PenStyle {
        self.pen
    }

    pub fn strokes(&self) -> &[Vec<Point>] {
        &self.strokes
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn begin_stroke(&mut self, at: Point) {
        self.strokes.push(vec![at]);
        self.drawing = true;
    }

    pub fn extend_stroke(&mut self, to: Point) {
        if !self.drawing {
            return;
        }
        if let Some(stroke) = self.strokes.last_mut() {
            if stroke.last() != Some(&to) {
                stroke.push(to);
            }
        }
    }

    pub fn end_stroke(&mut self) {
        self.drawing = false;
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.drawing = false;
    }

    pub fn render(&self) -> RgbaImage {
        let mut canvas = RgbaImage::new(self.width, self.height);
        let radius = (self.pen.width / 2.0).max(0.5);
        let color = Rgba(self.pen.color);
        for stroke in &self.strokes {
            match stroke.as_slice() {
                [] => {}
                [dot] => stamp_disc(&mut canvas, *dot, radius, color),
                points => {
                    for segment in points.windows(2) {
                        stamp_segment(&mut canvas, segment[0], segment[1], radius, color);
                    }
                }
            }
        }
        canvas
    }

    /// Encodes the current surface, strokes or not, as a PNG data URI.
    pub fn to_data_uri(&self) -> Result<DataUri, CaptureError> {
        let mut out = std::io::Cursor::new(Vec::new());
        self.render()
            .write_to(&mut out, ImageFormat::Png)
            .map_err(|err| CaptureError::Encode(err.to_string()))?;
        Ok(DataUri::encode("image/png", &out.into_inner()))
    }
}

fn stamp_segment(canvas: &mut RgbaImage, from: Point, to: Point, radius: f32, color: Rgba<u8>) {
    let steps = (from.distance(to) / 0.5).ceil().max(1.0) as u32;
    for step in 0..=steps {
        let t = step as f32 / steps as f32;
        let at = Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
        stamp_disc(canvas, at, radius, color);
    }
}

fn stamp_disc(canvas: &mut RgbaImage, center: Point, radius: f32, color: Rgba<u8>) {
    let (width, height) = canvas.dimensions();
    let min_x = (center.x - radius).floor().max(0.0) as u32;
    let min_y = (center.y - radius).floor().max(0.0) as u32;
    let max_x = (center.x + radius).ceil().min(width as f32 - 1.0);
    let max_y = (center.y + radius).ceil().min(height as f32 - 1.0);
    if max_x < 0.0 || max_y < 0.0 {
        return;
    }
    let (max_x, max_y) = (max_x as u32, max_y as u32);
    let radius_sq = radius * radius;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - center.x;
            let dy = y as f32 + 0.5 - center.y;
            if dx * dx + dy * dy <= radius_sq {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/signature_tests.rs"]
mod tests;
