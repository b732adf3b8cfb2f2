//! Shared texture and noise primitives used by the draw routines.
//!
//! Everything here is a pure function: identical inputs always produce
//! identical outputs. The renderer relies on that so a textured fill can be
//! sampled in multiple passes of a single render without cross-call drift.

use image::Rgb;

/// Closed-form pseudo-noise over `(x, y)`, result in `[-1, 1]`.
///
/// Averages three trig terms over `x/scale`, `y/scale` and `(x + y)/scale`.
/// This is deliberately not Perlin noise (no gradient grid, no
/// interpolation); it just has to look organic at texture scale while being
/// bit-for-bit deterministic. `scale` must be positive.
pub fn pseudo_noise(x: f32, y: f32, scale: f32) -> f32 {
    let a = (x / scale).sin();
    let b = (y / scale).cos();
    let c = ((x + y) / (scale * 0.7)).sin();
    (a + b + c) / 3.0
}

/// Multiplies each channel by `factor` and clamps to `[0, 255]`.
pub fn darken(color: Rgb<u8>, factor: f32) -> Rgb<u8> {
    Rgb(color.0.map(|ch| (ch as f32 * factor).clamp(0.0, 255.0) as u8))
}

/// Wood grain: low-frequency noise plus a tighter horizontal grain term
/// blended into `base`, clamped per channel.
pub fn wood_texture(x: u32, y: u32, base: Rgb<u8>) -> Rgb<u8> {
    let low = pseudo_noise(x as f32, y as f32, 24.0);
    let grain = (y as f32 * 0.7).sin() * 0.5 + pseudo_noise(x as f32 * 3.0, y as f32 * 0.5, 5.0) * 0.5;
    darken(base, 1.0 + 0.18 * low + 0.12 * grain)
}

const BRICK_W: u32 = 24;
const BRICK_H: u32 = 10;
const MORTAR: u32 = 2;

const MORTAR_COLOR: Rgb<u8> = Rgb([204, 199, 193]);
const BRICK_COLOR: Rgb<u8> = Rgb([156, 66, 54]);

/// Brick pattern at `(x, y)`: mortar lines at a fixed stride, bricks offset
/// by half a brick on odd rows, otherwise a noise-modulated brick red.
pub fn brick_texture(x: u32, y: u32, row: u32) -> Rgb<u8> {
    let offset = if row % 2 == 0 { 0 } else { BRICK_W / 2 };
    if y % BRICK_H < MORTAR || (x + offset) % BRICK_W < MORTAR {
        MORTAR_COLOR
    } else {
        darken(BRICK_COLOR, 1.0 + 0.15 * pseudo_noise(x as f32, y as f32, 7.0))
    }
}

fn edge_sign(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    (p.0 - b.0) * (a.1 - b.1) - (a.0 - b.0) * (p.1 - b.1)
}

/// Sign-consistency test: `p` is inside (or on the edge of) triangle `abc`
/// when all three edge cross products share a sign.
pub fn point_in_triangle(p: (f32, f32), a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> bool {
    let d1 = edge_sign(p, a, b);
    let d2 = edge_sign(p, b, c);
    let d3 = edge_sign(p, c, a);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Even-odd ray casting test against an arbitrary closed polygon. Used to
/// constrain textured fills to non-rectangular masks (sails, snow caps).
pub fn point_in_polygon(p: (f32, f32), vertices: &[(f32, f32)]) -> bool {
    let mut inside = false;
    let n = vertices.len();
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];
        if (yi > p.1) != (yj > p.1)
            && p.0 < (xj - xi) * (p.1 - yi) / (yj - yi) + xi
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pseudo_noise_is_deterministic() {
        let a = pseudo_noise(13.5, 78.25, 11.0);
        let b = pseudo_noise(13.5, 78.25, 11.0);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn pseudo_noise_stays_in_range() {
        for x in 0..50 {
            for y in 0..50 {
                let n = pseudo_noise(x as f32 * 3.7, y as f32 * 5.1, 9.0);
                assert!((-1.0..=1.0).contains(&n), "out of range: {n}");
            }
        }
    }

    #[test]
    fn darken_clamps_channels() {
        assert_eq!(darken(Rgb([200, 100, 0]), 0.5), Rgb([100, 50, 0]));
        assert_eq!(darken(Rgb([200, 200, 200]), 2.0), Rgb([255, 255, 255]));
        assert_eq!(darken(Rgb([10, 10, 10]), 0.0), Rgb([0, 0, 0]));
    }

    #[test]
    fn brick_texture_has_mortar_rows() {
        // y = 0 falls on a horizontal mortar line at every x.
        for x in 0..60 {
            assert_eq!(brick_texture(x, 0, 0), MORTAR_COLOR);
        }
        // Interior of a brick is not mortar.
        assert_ne!(brick_texture(10, 5, 0), MORTAR_COLOR);
    }

    #[test]
    fn brick_rows_are_offset() {
        // x = 0 is a vertical mortar joint on even rows but brick on odd rows.
        assert_eq!(brick_texture(0, 5, 0), MORTAR_COLOR);
        assert_ne!(brick_texture(0, 5, 1), MORTAR_COLOR);
    }

    #[test]
    fn triangle_containment() {
        let (a, b, c) = ((0.0, 0.0), (10.0, 0.0), (5.0, 10.0));
        assert!(point_in_triangle((5.0, 3.0), a, b, c));
        assert!(!point_in_triangle((0.0, 9.0), a, b, c));
    }

    #[test]
    fn polygon_containment() {
        let square = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        assert!(point_in_polygon((5.0, 5.0), &square));
        assert!(!point_in_polygon((15.0, 5.0), &square));
    }
}
