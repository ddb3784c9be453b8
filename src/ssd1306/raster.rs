//! Shape and glyph rasterization
//!
//! Every function here only talks to the [`Canvas`] pixel interface, so the
//! exact sequence of plotted pixels is what matters. In
//! [`DrawMode::Toggle`] a pixel visited twice cancels out; the rectangle
//! functions are laid out to visit each pixel once.
//!
//! Coordinates may lie anywhere in `i32`. Positions are worked out in `i64`,
//! and on a canvas with [`Canvas::bounds`] the walks skip ahead to the part
//! that can land on it, so far off-canvas shapes cost nothing.

use crate::ssd1306::color::{Color, DrawMode};
use crate::ssd1306::error::OledError;
use crate::ssd1306::font::GlyphTable;
use crate::ssd1306::framebuffer::Canvas;

/// Plot a pixel given in wide coordinates; outside `i32` it is off any canvas
fn plot<C: Canvas + ?Sized>(canvas: &mut C, x: i64, y: i64, color: Color, mode: DrawMode) {
    if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
        canvas.set_pixel(x, y, color, mode);
    }
}

/// Line from `(x0, y0)` to `(x1, y1)`, both endpoints included.
///
/// Integer Bresenham with an error accumulator starting at `dx / 2`.
/// Steep lines are walked along y with the axes swapped.
pub fn draw_line<C: Canvas + ?Sized>(
    canvas: &mut C,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Color,
    mode: DrawMode,
) {
    let (mut x0, mut y0) = (i64::from(x0), i64::from(y0));
    let (mut x1, mut y1) = (i64::from(x1), i64::from(y1));

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let ystep = if y0 < y1 { 1 } else { -1 };

    let (mut first, mut last) = (x0, x1);
    if let Some((width, height)) = canvas.bounds() {
        let extent = i64::from(if steep { height } else { width });
        first = first.max(0);
        last = last.min(extent - 1);
    }
    if first > last {
        return;
    }

    // State after `first - x0` steps. The accumulator stays in [0, dx) and
    // every wrap moves y by one, so the wraps so far follow from the total.
    let dx_wide = i128::from(dx);
    let start = i128::from(dx / 2) - i128::from(first - x0) * i128::from(dy);
    let wraps = if start >= 0 {
        0
    } else {
        (-start + dx_wide - 1) / dx_wide
    };
    let mut err = (start + wraps * dx_wide) as i64;
    let mut y = y0 + ystep * wraps as i64;

    for x in first..=last {
        if steep {
            plot(canvas, y, x, color, mode);
        } else {
            plot(canvas, x, y, color, mode);
        }

        err -= dy;
        if err < 0 {
            y += ystep;
            err += dx;
        }
    }
}

/// Horizontal line of `width` pixels starting at `(x, y)`
pub fn draw_line_h<C: Canvas + ?Sized>(
    canvas: &mut C,
    x: i32,
    y: i32,
    width: i32,
    color: Color,
    mode: DrawMode,
) {
    if width < 1 {
        return;
    }
    draw_line(canvas, x, y, x.saturating_add(width - 1), y, color, mode);
}

/// Vertical line of `height` pixels starting at `(x, y)`
pub fn draw_line_v<C: Canvas + ?Sized>(
    canvas: &mut C,
    x: i32,
    y: i32,
    height: i32,
    color: Color,
    mode: DrawMode,
) {
    if height < 1 {
        return;
    }
    draw_line(canvas, x, y, x, y.saturating_add(height - 1), color, mode);
}

/// Rectangle outline covering `[x, x + width) x [y, y + height)`
pub fn draw_rect<C: Canvas + ?Sized>(
    canvas: &mut C,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    color: Color,
    mode: DrawMode,
) {
    if width < 1 || height < 1 {
        return;
    }

    draw_line_h(canvas, x, y, width, color, mode);
    draw_line_h(canvas, x, y.saturating_add(height - 1), width, color, mode);

    // Side edges stop short of the corners the horizontal edges own
    let side = height - 2;
    if side < 1 {
        return;
    }

    let right = x.saturating_add(width - 1);
    draw_line_v(canvas, x, y.saturating_add(1), side, color, mode);
    draw_line_v(canvas, right, y.saturating_add(1), side, color, mode);
}

/// Filled rectangle, drawn one column at a time from left to right
pub fn fill_rect<C: Canvas + ?Sized>(
    canvas: &mut C,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    color: Color,
    mode: DrawMode,
) {
    let mut first = i64::from(x);
    let mut last = i64::from(x) + i64::from(width) - 1;
    if let Some((canvas_width, _)) = canvas.bounds() {
        first = first.max(0);
        last = last.min(i64::from(canvas_width) - 1);
    }

    for column in first..=last {
        let Ok(column) = i32::try_from(column) else {
            break;
        };
        draw_line_v(canvas, column, y, height, color, mode);
    }
}

/// Circle outline around `(x0, y0)` using the midpoint algorithm.
///
/// Plots the four axis points first, then eight mirrored points per step.
/// The last step can revisit the diagonal points, which cancels them in
/// toggle mode.
pub fn draw_circle<C: Canvas + ?Sized>(
    canvas: &mut C,
    x0: i32,
    y0: i32,
    radius: i32,
    color: Color,
    mode: DrawMode,
) {
    if radius < 0 {
        return;
    }
    let (cx, cy, r) = (i64::from(x0), i64::from(y0), i64::from(radius));

    let mut f = 1 - r;
    let mut ddf_x = 1;
    let mut ddf_y = -2 * r;
    let mut x = 0;
    let mut y = r;

    plot(canvas, cx, cy + r, color, mode);
    plot(canvas, cx, cy - r, color, mode);
    plot(canvas, cx + r, cy, color, mode);
    plot(canvas, cx - r, cy, color, mode);

    for (first, last) in circle_steps(canvas.bounds(), cx, cy, r) {
        if first - 1 > x {
            x = first - 1;
            y = circle_y(r, x);
            // f is (x + 1)^2 + y^2 - y - r^2 at the top of every step
            f = (x + 1) * (x + 1) - r * r + y * y - y;
            ddf_x = 2 * x + 1;
            ddf_y = -2 * y;
        }

        while x < y && x < last {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            plot(canvas, cx + x, cy + y, color, mode);
            plot(canvas, cx - x, cy + y, color, mode);
            plot(canvas, cx + x, cy - y, color, mode);
            plot(canvas, cx - x, cy - y, color, mode);

            plot(canvas, cx + y, cy + x, color, mode);
            plot(canvas, cx - y, cy + x, color, mode);
            plot(canvas, cx + y, cy - x, color, mode);
            plot(canvas, cx - y, cy - x, color, mode);
        }
        if x >= y {
            break;
        }
    }
}

/// Step ranges of the midpoint walk whose points can land on the canvas,
/// sorted and disjoint.
///
/// Step `x` plots every point `x` away from the center along one axis, so
/// it can only show when `cx +- x` is inside the width or `cy +- x` inside
/// the height.
fn circle_steps(bounds: Option<(i32, i32)>, cx: i64, cy: i64, r: i64) -> Vec<(i64, i64)> {
    let Some((width, height)) = bounds else {
        return vec![(1, r)];
    };
    let (w, h) = (i64::from(width), i64::from(height));

    let mut ranges: Vec<(i64, i64)> = [
        (-cx, w - 1 - cx),
        (cx - (w - 1), cx),
        (-cy, h - 1 - cy),
        (cy - (h - 1), cy),
    ]
    .into_iter()
    .map(|(a, b)| (a.max(1), b.min(r)))
    .filter(|(a, b)| a <= b)
    .collect();
    ranges.sort_unstable();

    let mut merged: Vec<(i64, i64)> = Vec::with_capacity(ranges.len());
    for (a, b) in ranges {
        match merged.last_mut() {
            Some(prev) if a <= prev.1 + 1 => prev.1 = prev.1.max(b),
            _ => merged.push((a, b)),
        }
    }
    merged
}

/// `y` of the midpoint walk after `x` steps: the largest `y` with
/// `y^2 - y < r^2 - x^2`. Only the final step can come out lower, and the
/// walk stops there either way.
fn circle_y(r: i64, x: i64) -> i64 {
    let t = r * r - x * x;
    if t < 1 {
        return 0;
    }
    let mut y = (((4.0 * (t - 1) as f64 + 1.0).sqrt() + 1.0) / 2.0) as i64;
    while y > 0 && y * y - y > t - 1 {
        y -= 1;
    }
    while (y + 1) * (y + 1) - (y + 1) <= t - 1 {
        y += 1;
    }
    y
}

/// Blit the glyph for `code` with its top left corner at `(x, y)`.
///
/// A code the font has no glyph for draws nothing. The glyph box is opaque:
/// set bits are drawn in `color`, clear bits in the complement of `color`,
/// which erases whatever was under the box. A row lookup past the end of
/// the table means the font file is inconsistent and is reported.
pub fn draw_glyph<C: Canvas + ?Sized>(
    canvas: &mut C,
    x: i32,
    y: i32,
    code: u8,
    font: &GlyphTable,
    color: Color,
    mode: DrawMode,
) -> Result<(), OledError> {
    if !font.contains(code) {
        return Ok(());
    }

    let chars_per_row = font.chars_per_row();
    if chars_per_row == 0 {
        return Ok(());
    }

    let index = usize::from(code - font.start_char());
    let strip = index / chars_per_row;
    let column = index % chars_per_row;

    // One page of the panel is 8 pixels; a glyph covers at least one
    let bands = (usize::from(font.height()) / 8).max(1);
    let background = color.complement();

    let left = i64::from(x);
    for band in 0..bands {
        let row = font.row_at(strip * bands + band, column)?;
        let top = i64::from(y) + band as i64 * 8;

        for (i, &byte) in row.iter().enumerate() {
            for bit in 0..8u8 {
                let pixel = if byte & (1 << bit) != 0 {
                    color
                } else {
                    background
                };
                plot(canvas, left + i as i64, top + i64::from(bit), pixel, mode);
            }
        }
    }
    Ok(())
}
