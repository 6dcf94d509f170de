//! Deterministic raster surface.
//!
//! Strokes rasterize with plain f64 arithmetic — no platform drawing API —
//! so the invisible grading replicas and the on-screen replicas paint
//! identical pixels. The surface keeps both the pixel buffer and an ordered
//! stroke log; an external grader may compare either.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use terrapin_types::{Color, Point};

use crate::pose::CANVAS_SIZE;

/// Fixed stroke width, in pixels. Segments are painted with round caps.
pub const STROKE_WIDTH: f64 = 3.0;

/// One painted segment, in paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeSegment {
    pub from: Point,
    pub to: Point,
    pub color: Color,
}

/// An in-memory RGBA drawing surface.
///
/// Fully transparent on creation and after [`clear`](Canvas::clear).
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    strokes: Vec<StrokeSegment>,
}

impl Canvas {
    /// A fresh transparent canvas of the standard size.
    pub fn new() -> Self {
        Self::with_size(CANVAS_SIZE, CANVAS_SIZE)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
            strokes: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Erase all painted content and the stroke log.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
        self.strokes.clear();
    }

    /// Paint a round-capped segment of the fixed stroke width.
    ///
    /// A pixel is set when its center lies within half the stroke width of
    /// the segment. Zero-length segments are logged but leave no pixels,
    /// matching the surface the reference renders were produced on.
    pub fn stroke_line(&mut self, from: Point, to: Point, color: Color) {
        self.strokes.push(StrokeSegment { from, to, color });
        if from == to {
            return;
        }

        let half = STROKE_WIDTH / 2.0;
        let min_x = clamp_coord((from.x.min(to.x) - half).floor(), self.width);
        let max_x = clamp_coord((from.x.max(to.x) + half).ceil(), self.width);
        let min_y = clamp_coord((from.y.min(to.y) - half).floor(), self.height);
        let max_y = clamp_coord((from.y.max(to.y) + half).ceil(), self.height);

        for y in min_y..max_y {
            for x in min_x..max_x {
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if distance_to_segment(center, from, to) <= half {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// The RGBA pixel buffer, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA of one pixel, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// The ordered stroke log.
    pub fn strokes(&self) -> &[StrokeSegment] {
        &self.strokes
    }

    /// Serialize the stroke log as a JSON array, in paint order.
    pub fn strokes_to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.strokes).unwrap_or(serde_json::Value::Null)
    }

    /// Hex SHA-256 of the pixel buffer. Identical replays digest
    /// identically.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.pixels);
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let i = ((y * self.width + x) * 4) as usize;
        self.pixels[i] = color.r;
        self.pixels[i + 1] = color.g;
        self.pixels[i + 2] = color.b;
        self.pixels[i + 3] = 0xff;
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp a fractional coordinate into `[0, limit]` as a pixel index bound.
fn clamp_coord(v: f64, limit: u32) -> u32 {
    if v <= 0.0 {
        0
    } else if v >= limit as f64 {
        limit
    } else {
        v as u32
    }
}

/// Distance from `p` to the closed segment `a`–`b`.
fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p.x - a.x) * ab.x + (p.y - a.y) * ab.y) / len_sq;
    let t = t.clamp(0.0, 1.0);
    let nearest = Point::new(a.x + t * ab.x, a.y + t * ab.y);
    p.distance(nearest)
}
