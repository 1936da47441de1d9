//! Raster line plots (PNG) with equal-aspect axes.
//!
//! Layout
//! - Fixed margins hold tick labels and axis labels; the remaining box is the
//!   data area. One data unit spans the same number of pixels on both axes, so
//!   the shorter data range is widened to fill the box.
//! - Text is drawn from a small 5×7 bitmap glyph table that covers digits,
//!   `.`, `-`, brackets and the letters used by the axis labels.

use anyhow::{Context, Result};
use image::{ImageFormat, Rgb, RgbImage};
use std::fs;
use std::path::Path;

const MARGIN_LEFT: u32 = 80;
const MARGIN_RIGHT: u32 = 24;
const MARGIN_TOP: u32 = 24;
const MARGIN_BOTTOM: u32 = 64;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);
/// Line colour of the data series.
pub const SERIES: Rgb<u8> = Rgb([31, 119, 180]);

/// One line series plus labels.
#[derive(Clone, Copy, Debug)]
pub struct PlotSpec<'a> {
    pub x: &'a [f64],
    pub y: &'a [f64],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub width: u32,
    pub height: u32,
}

impl<'a> PlotSpec<'a> {
    pub fn new(x: &'a [f64], y: &'a [f64], x_label: &'a str, y_label: &'a str) -> Self {
        Self {
            x,
            y,
            x_label,
            y_label,
            width: 800,
            height: 640,
        }
    }
}

/// Data-to-pixel mapping for the plot box.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Frame {
    x0: f64,
    y0: f64,
    scale: f64,
    left: f64,
    bottom: f64,
    w: f64,
    h: f64,
}

impl Frame {
    fn fit(x: &[f64], y: &[f64], w: f64, h: f64, left: f64, bottom: f64) -> Self {
        let (xmin, xmax) = padded_range(x);
        let (ymin, ymax) = padded_range(y);
        let scale = (w / (xmax - xmin)).min(h / (ymax - ymin));
        // widen the range that did not set the scale, keeping it centred
        let xc = 0.5 * (xmin + xmax);
        let yc = 0.5 * (ymin + ymax);
        Self {
            x0: xc - 0.5 * w / scale,
            y0: yc - 0.5 * h / scale,
            scale,
            left,
            bottom,
            w,
            h,
        }
    }

    #[inline]
    fn px(&self, x: f64) -> f64 {
        self.left + (x - self.x0) * self.scale
    }

    #[inline]
    fn py(&self, y: f64) -> f64 {
        self.bottom - (y - self.y0) * self.scale
    }

    fn x_range(&self) -> (f64, f64) {
        (self.x0, self.x0 + self.w / self.scale)
    }

    fn y_range(&self) -> (f64, f64) {
        (self.y0, self.y0 + self.h / self.scale)
    }
}

/// Finite min/max with 5% padding; degenerate ranges widen to unit span.
fn padded_range(values: &[f64]) -> (f64, f64) {
    let (lo, hi) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    if span <= f64::EPSILON * lo.abs().max(1.0) {
        return (lo - 0.5, hi + 0.5);
    }
    (lo - 0.05 * span, hi + 0.05 * span)
}

/// 1, 2 or 5 times a power of ten, close to `raw`.
fn nice_step(raw: f64) -> f64 {
    let mag = 10f64.powf(raw.log10().floor());
    let frac = raw / mag;
    let m = if frac < 1.5 {
        1.0
    } else if frac < 3.5 {
        2.0
    } else if frac < 7.5 {
        5.0
    } else {
        10.0
    };
    m * mag
}

fn ticks(lo: f64, hi: f64, target: usize) -> (Vec<f64>, usize) {
    let step = nice_step((hi - lo) / target as f64);
    let decimals = (-step.log10().floor()).max(0.0) as usize;
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    let values = (first..=last).map(|k| k as f64 * step).collect();
    (values, decimals)
}

/// Draw the series into a fresh image.
///
/// Mismatched lengths draw the common prefix; non-finite samples break the line.
pub fn render(spec: &PlotSpec<'_>) -> RgbImage {
    let mut img = RgbImage::from_pixel(spec.width, spec.height, BACKGROUND);
    let w = spec.width.saturating_sub(MARGIN_LEFT + MARGIN_RIGHT).max(1) as f64;
    let h = spec.height.saturating_sub(MARGIN_TOP + MARGIN_BOTTOM).max(1) as f64;
    let left = MARGIN_LEFT as f64;
    let bottom = MARGIN_TOP as f64 + h;
    let frame = Frame::fit(spec.x, spec.y, w, h, left, bottom);

    // axis box
    let (l, r, t, b) = (left, left + w, MARGIN_TOP as f64, bottom);
    draw_line(&mut img, (l, b), (r, b), INK, 1);
    draw_line(&mut img, (l, t), (r, t), INK, 1);
    draw_line(&mut img, (l, t), (l, b), INK, 1);
    draw_line(&mut img, (r, t), (r, b), INK, 1);

    let (xlo, xhi) = frame.x_range();
    let (xt, xdec) = ticks(xlo, xhi, 6);
    for v in xt {
        let px = frame.px(v);
        draw_line(&mut img, (px, b), (px, b + 5.0), INK, 1);
        let label = format!("{v:.xdec$}");
        let tw = text_width(&label, 1) as f64;
        draw_text(&mut img, &label, (px - tw / 2.0) as i64, (b + 9.0) as i64, 1, INK);
    }
    let (ylo, yhi) = frame.y_range();
    let (yt, ydec) = ticks(ylo, yhi, 6);
    for v in yt {
        let py = frame.py(v);
        draw_line(&mut img, (l - 5.0, py), (l, py), INK, 1);
        let label = format!("{v:.ydec$}");
        let tw = text_width(&label, 1) as i64;
        draw_text(&mut img, &label, l as i64 - 8 - tw, py as i64 - 3, 1, INK);
    }

    let xw = text_width(spec.x_label, 2) as f64;
    draw_text(
        &mut img,
        spec.x_label,
        (l + w / 2.0 - xw / 2.0) as i64,
        (b + 30.0) as i64,
        2,
        INK,
    );
    let yw = text_width(spec.y_label, 2) as f64;
    draw_text_vertical(
        &mut img,
        spec.y_label,
        10,
        (t + h / 2.0 + yw / 2.0) as i64,
        2,
        INK,
    );

    let mut prev: Option<(f64, f64)> = None;
    for (&x, &y) in spec.x.iter().zip(spec.y) {
        if !(x.is_finite() && y.is_finite()) {
            prev = None;
            continue;
        }
        let p = (frame.px(x), frame.py(y));
        match prev {
            Some(q) => draw_line(&mut img, q, p, SERIES, 2),
            None => draw_line(&mut img, p, p, SERIES, 2),
        }
        prev = Some(p);
    }
    img
}

/// Write `img` as PNG, creating parent directories.
pub fn save(img: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating plot dir {}", parent.display()))?;
        }
    }
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("writing plot {}", path.display()))
}

#[inline]
fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u64) < img.width() as u64 && (y as u64) < img.height() as u64 {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Bresenham line; `thickness` 2 also fills the pixel below/right.
fn draw_line(img: &mut RgbImage, a: (f64, f64), b: (f64, f64), color: Rgb<u8>, thickness: i64) {
    let (mut x0, mut y0) = (a.0.round() as i64, a.1.round() as i64);
    let (x1, y1) = (b.0.round() as i64, b.1.round() as i64);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        for ox in 0..thickness {
            for oy in 0..thickness {
                put(img, x0 + ox, y0 + oy, color);
            }
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Rows of a 5×7 glyph, bit 4 is the leftmost column.
fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '[' => [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E],
        ']' => [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        'a' => [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F],
        'e' => [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E],
        'l' => [0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'm' => [0x00, 0x00, 0x1A, 0x15, 0x15, 0x11, 0x11],
        'r' => [0x00, 0x00, 0x16, 0x19, 0x10, 0x10, 0x10],
        't' => [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06],
        _ => return None,
    };
    Some(rows)
}

/// Advance per character is 6 columns (5 glyph + 1 gap).
fn text_width(text: &str, scale: i64) -> i64 {
    (text.chars().count() as i64 * 6 - 1).max(0) * scale
}

/// Horizontal text, `(x, y)` is the top-left corner.
fn draw_text(img: &mut RgbImage, text: &str, x: i64, y: i64, scale: i64, color: Rgb<u8>) {
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else { continue };
        let cx = x + i as i64 * 6 * scale;
        for (gy, row) in rows.iter().enumerate() {
            for gx in 0..5 {
                if row & (0x10 >> gx) != 0 {
                    fill_cell(img, cx + gx * scale, y + gy as i64 * scale, scale, color);
                }
            }
        }
    }
}

/// Text rotated 90° counter-clockwise, reading bottom to top from `(x, y)`.
fn draw_text_vertical(img: &mut RgbImage, text: &str, x: i64, y: i64, scale: i64, color: Rgb<u8>) {
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else { continue };
        let cy = y - i as i64 * 6 * scale;
        for (gy, row) in rows.iter().enumerate() {
            for gx in 0..5 {
                if row & (0x10 >> gx) != 0 {
                    fill_cell(img, x + gy as i64 * scale, cy - gx * scale, scale, color);
                }
            }
        }
    }
}

fn fill_cell(img: &mut RgbImage, x: i64, y: i64, scale: i64, color: Rgb<u8>) {
    for dx in 0..scale {
        for dy in 0..scale {
            put(img, x + dx, y + dy, color);
        }
    }
}
