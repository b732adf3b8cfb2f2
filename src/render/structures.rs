//! Structure and decor draw routines: house, fence, flowers.

use image::Rgb;
use rand::Rng;

use super::shapes::{draw_line, fill_circle, fill_rect, fill_rect_with, fill_triangle_with};
use super::terrain::time_dim;
use super::texture::{brick_texture, darken, wood_texture};
use super::DrawCtx;
use crate::scene::TimeOfDay;

pub(crate) fn draw_house<R: Rng>(ctx: &mut DrawCtx<R>) {
    let dim = time_dim(ctx.scene.time);
    let left = ctx.fx(0.10);
    let right = ctx.fx(0.30);
    let base = ctx.fy(0.82);
    let wall_h = ctx.unit(0.22);
    let top = base - wall_h;
    let width = right - left;

    // Walls: brick pattern, blended toward the prompt color when one was
    // recognized ("a red house" reads red, not brick-red).
    let tint = ctx.scene.primary_color().map(|c| c.rgb);
    fill_rect_with(ctx.canvas, left, top, width, wall_h, |px, py| {
        let row = (py as i64 - top).max(0) as u32 / 10;
        let brick = brick_texture(px, py, row);
        let color = match tint {
            Some(t) => Rgb([
                ((brick[0] as u16 + t[0] as u16) / 2) as u8,
                ((brick[1] as u16 + t[1] as u16) / 2) as u8,
                ((brick[2] as u16 + t[2] as u16) / 2) as u8,
            ]),
            None => brick,
        };
        darken(color, dim)
    });

    // Roof: textured wood triangle overhanging the walls.
    let overhang = width / 10;
    let roof_peak = (
        ((left + right) / 2) as f32,
        (top - wall_h * 2 / 3) as f32,
    );
    let roof_base = darken(Rgb([104, 62, 40]), dim);
    fill_triangle_with(
        ctx.canvas,
        ((left - overhang) as f32, top as f32),
        ((right + overhang) as f32, top as f32),
        roof_peak,
        |px, py| wood_texture(px, py, roof_base),
    );

    // Door and windows.
    let door_w = width / 5;
    let door_h = wall_h / 2;
    let door_x = left + width / 2 - door_w / 2;
    let door_base = darken(Rgb([92, 58, 34]), dim);
    fill_rect_with(ctx.canvas, door_x, base - door_h, door_w, door_h, |px, py| {
        wood_texture(px, py, door_base)
    });
    let lit = ctx.scene.time == TimeOfDay::Night;
    let glass = if lit {
        Rgb([238, 218, 130])
    } else {
        darken(Rgb([176, 212, 230]), dim)
    };
    let win = (width / 6).max(3);
    fill_rect(ctx.canvas, left + width / 6, top + wall_h / 4, win, win, glass);
    fill_rect(ctx.canvas, right - width / 6 - win, top + wall_h / 4, win, win, glass);
}

pub(crate) fn draw_fence<R: Rng>(ctx: &mut DrawCtx<R>) {
    let dim = time_dim(ctx.scene.time);
    let base = ctx.fy(0.95);
    let post_h = ctx.unit(0.08);
    let post_w = ctx.unit(0.012).max(2);
    let gap = post_w * 5;
    let wood = darken(Rgb([150, 110, 70]), dim);
    let mut x = ctx.fx(0.02);
    let limit = ctx.fx(0.98);
    while x < limit {
        fill_rect_with(ctx.canvas, x, base - post_h, post_w, post_h, |px, py| {
            wood_texture(px, py, wood)
        });
        x += gap;
    }
    // Two horizontal rails across the posts.
    for frac in [0.3, 0.7] {
        let y = base - (post_h as f32 * frac) as i64;
        fill_rect_with(ctx.canvas, ctx.fx(0.02), y, limit - ctx.fx(0.02), post_w, |px, py| {
            wood_texture(px, py, wood)
        });
    }
}

const PETAL_COLORS: &[[u8; 3]] = &[
    [220, 70, 80],
    [235, 200, 80],
    [225, 130, 180],
    [150, 90, 190],
];

pub(crate) fn draw_flowers<R: Rng>(ctx: &mut DrawCtx<R>) {
    let dim = time_dim(ctx.scene.time);
    let stem = darken(Rgb([60, 130, 55]), dim);
    let count = 12 * ctx.detail * (ctx.w() / 300).max(1);
    let top = ctx.fy(0.85);
    let bottom = ctx.h() as i64 - 2;
    for _ in 0..count {
        let x = ctx.rng.gen_range(0..ctx.w()) as i64;
        let y = ctx.rng.gen_range(top.max(0)..bottom.max(top + 1));
        let petal = darken(
            Rgb(PETAL_COLORS[ctx.rng.gen_range(0..PETAL_COLORS.len())]),
            dim,
        );
        draw_line(ctx.canvas, x, y, x, y - 5, stem);
        fill_circle(ctx.canvas, x, y - 6, 2, petal);
        fill_circle(ctx.canvas, x, y - 6, 1, darken(Rgb([240, 220, 110]), dim));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{layout, render, Canvas, DrawCtx};
    use crate::scene::parse;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn red_house_walls_lean_red() {
        let scene = parse("a red house");
        let canvas = render(&scene, 400, 300, 1).unwrap();
        // Sample a wall pixel: x in [0.10w, 0.30w], clear of door and windows.
        let p = canvas.get_pixel(50, 200);
        assert!(p[0] > p[2], "expected red-dominant wall, got {:?}", p);
    }

    #[test]
    fn flowers_only_touch_the_foreground_band() {
        let scene = parse("flowers");
        let mut canvas = Canvas::new(100, 100);
        let mut rng = StdRng::seed_from_u64(5);
        let mut ctx = DrawCtx {
            anchors: layout(&scene, 100, 100),
            horizon: 55,
            canvas: &mut canvas,
            scene: &scene,
            rng: &mut rng,
            detail: 1,
        };
        draw_flowers(&mut ctx);
        for y in 0..60 {
            for x in 0..100 {
                assert_eq!(canvas.get_pixel(x, y).0, [0, 0, 0], "pixel above band at {x},{y}");
            }
        }
    }
}
