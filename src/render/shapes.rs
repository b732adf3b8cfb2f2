//! Clipped primitive shape fills shared by the draw routines.
//!
//! Coordinates are signed so callers can anchor shapes partially off-canvas;
//! everything outside the raster is silently clipped.

use image::Rgb;

use super::texture::point_in_triangle;
use super::Canvas;

/// Writes one pixel, ignoring out-of-bounds coordinates.
pub(crate) fn put(canvas: &mut Canvas, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}

/// Solid axis-aligned rectangle fill.
pub(crate) fn fill_rect(canvas: &mut Canvas, x: i64, y: i64, w: i64, h: i64, color: Rgb<u8>) {
    fill_rect_with(canvas, x, y, w, h, |_, _| color);
}

/// Rectangle fill where each pixel color is computed from its absolute
/// canvas coordinates, used for textured surfaces.
pub(crate) fn fill_rect_with(
    canvas: &mut Canvas,
    x: i64,
    y: i64,
    w: i64,
    h: i64,
    shade: impl Fn(u32, u32) -> Rgb<u8>,
) {
    if w <= 0 || h <= 0 {
        return;
    }
    let x0 = x.max(0) as u32;
    let y0 = y.max(0) as u32;
    let x1 = ((x + w).max(0) as u64).min(canvas.width() as u64) as u32;
    let y1 = ((y + h).max(0) as u64).min(canvas.height() as u64) as u32;
    for py in y0..y1 {
        for px in x0..x1 {
            canvas.put_pixel(px, py, shade(px, py));
        }
    }
}

/// Solid disc fill.
pub(crate) fn fill_circle(canvas: &mut Canvas, cx: i64, cy: i64, r: i64, color: Rgb<u8>) {
    let r2 = r * r;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r2 {
                put(canvas, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Triangle fill with per-pixel shading, used for textured masks such as
/// roofs and sails. Callers wanting a flat fill pass a constant closure.
pub(crate) fn fill_triangle_with(
    canvas: &mut Canvas,
    a: (f32, f32),
    b: (f32, f32),
    c: (f32, f32),
    shade: impl Fn(u32, u32) -> Rgb<u8>,
) {
    let min_x = a.0.min(b.0).min(c.0).floor().max(0.0) as u32;
    let max_x = (a.0.max(b.0).max(c.0).ceil() as i64).clamp(0, canvas.width() as i64) as u32;
    let min_y = a.1.min(b.1).min(c.1).floor().max(0.0) as u32;
    let max_y = (a.1.max(b.1).max(c.1).ceil() as i64).clamp(0, canvas.height() as i64) as u32;
    for py in min_y..max_y {
        for px in min_x..max_x {
            if point_in_triangle((px as f32 + 0.5, py as f32 + 0.5), a, b, c) {
                canvas.put_pixel(px, py, shade(px, py));
            }
        }
    }
}

/// Bresenham line, clipped per pixel. Used for rain streaks, branches and
/// bird silhouettes.
pub(crate) fn draw_line(canvas: &mut Canvas, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);
    loop {
        put(canvas, x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn fills_clip_to_canvas() {
        let mut canvas = RgbImage::new(10, 10);
        fill_rect(&mut canvas, -5, -5, 20, 20, Rgb([1, 2, 3]));
        fill_circle(&mut canvas, 9, 9, 5, Rgb([4, 5, 6]));
        draw_line(&mut canvas, -3, 2, 15, 2, Rgb([7, 8, 9]));
        // No panic and corner pixels written.
        assert_eq!(*canvas.get_pixel(0, 0), Rgb([1, 2, 3]));
        assert_eq!(*canvas.get_pixel(9, 9), Rgb([4, 5, 6]));
        assert_eq!(*canvas.get_pixel(0, 2), Rgb([7, 8, 9]));
    }

    #[test]
    fn triangle_fill_covers_centroid() {
        let mut canvas = RgbImage::new(20, 20);
        fill_triangle_with(&mut canvas, (2.0, 18.0), (18.0, 18.0), (10.0, 2.0), |_, _| {
            Rgb([9, 9, 9])
        });
        assert_eq!(*canvas.get_pixel(10, 12), Rgb([9, 9, 9]));
        assert_eq!(*canvas.get_pixel(1, 1), Rgb([0, 0, 0]));
    }
}
