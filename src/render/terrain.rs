//! Terrain draw routines: mountains, water, city skyline, road, grass.

use image::Rgb;
use rand::Rng;

use super::shapes::{draw_line, fill_rect, fill_rect_with, fill_triangle_with, put};
use super::texture::{darken, point_in_triangle, pseudo_noise};
use super::DrawCtx;
use crate::scene::TimeOfDay;

/// Night scenes dim solid object fills so they sit in the darker palette.
pub(crate) fn time_dim(time: TimeOfDay) -> f32 {
    match time {
        TimeOfDay::Day => 1.0,
        TimeOfDay::Night => 0.45,
        TimeOfDay::Sunset => 0.85,
        TimeOfDay::Sunrise => 0.9,
    }
}

pub(crate) fn draw_mountain<R: Rng>(ctx: &mut DrawCtx<R>) {
    let dim = time_dim(ctx.scene.time);
    let base = ctx.horizon as f32;
    let peaks: &[(f32, f32, f32)] = &[(0.15, 0.45, 0.22), (0.42, 0.62, 0.34), (0.72, 0.40, 0.20)];
    for &(left, span, rise) in peaks {
        let a = (ctx.fx(left) as f32, base);
        let b = (ctx.fx(left + span) as f32, base);
        let apex = (
            ctx.fx(left + span * 0.5) as f32,
            base - rise * ctx.h() as f32,
        );
        let rock = darken(Rgb([120, 110, 104]), dim);
        fill_triangle_with(ctx.canvas, a, b, apex, |px, py| {
            darken(rock, 1.0 + 0.2 * pseudo_noise(px as f32, py as f32, 14.0))
        });
        // Snow cap: the top quarter of the peak, masked by the same triangle
        // so the cap never bleeds past the slopes.
        let cap_y = apex.1 + (base - apex.1) * 0.25;
        let cap = darken(Rgb([235, 238, 242]), dim.max(0.7));
        let (ca, cb, cc) = (a, b, apex);
        fill_triangle_with(
            ctx.canvas,
            (apex.0 - (apex.0 - a.0) * 0.3, cap_y),
            (apex.0 + (b.0 - apex.0) * 0.3, cap_y),
            apex,
            |px, py| {
                let p = (px as f32 + 0.5, py as f32 + 0.5);
                if point_in_triangle(p, ca, cb, cc) {
                    darken(cap, 1.0 + 0.08 * pseudo_noise(px as f32, py as f32, 9.0))
                } else {
                    darken(rock, 1.0 + 0.2 * pseudo_noise(px as f32, py as f32, 14.0))
                }
            },
        );
    }
}

pub(crate) fn draw_water<R: Rng>(ctx: &mut DrawCtx<R>) {
    let dim = time_dim(ctx.scene.time);
    let top = ctx.horizon as i64;
    let bottom = ctx.fy(0.74);
    let w = ctx.w() as i64;
    let deep = darken(Rgb([42, 92, 158]), dim);
    fill_rect_with(ctx.canvas, 0, top, w, bottom - top, |px, py| {
        let wave = pseudo_noise(px as f32 * 1.4, py as f32 * 4.0, 11.0);
        darken(deep, 1.0 + 0.22 * wave)
    });
    // Foam specks, density scaled by detail.
    let foam = darken(Rgb([225, 235, 245]), dim.max(0.8));
    let count = 30 * ctx.detail * (ctx.w() / 200).max(1);
    for _ in 0..count {
        let x = ctx.rng.gen_range(0..ctx.w()) as i64;
        let y = ctx.rng.gen_range(top.max(0)..bottom.max(top + 1));
        put(ctx.canvas, x, y, foam);
        put(ctx.canvas, x + 1, y, foam);
    }
}

pub(crate) fn draw_city<R: Rng>(ctx: &mut DrawCtx<R>) {
    let night = ctx.scene.time == TimeOfDay::Night;
    let silhouette = if night {
        Rgb([24, 26, 38])
    } else {
        darken(Rgb([88, 92, 104]), time_dim(ctx.scene.time))
    };
    let base = ctx.horizon as i64;
    let bw = ctx.unit(0.055).max(4);
    let mut x = ctx.fx(0.05);
    let limit = ctx.fx(0.95);
    while x < limit {
        let height = ctx.unit(0.10) + ctx.rng.gen_range(0..ctx.unit(0.18).max(1));
        fill_rect(ctx.canvas, x, base - height, bw, height, silhouette);
        // Lit windows; rows scale with detail, and night windows glow.
        let window = if night {
            Rgb([240, 220, 130])
        } else {
            Rgb([180, 200, 215])
        };
        let rows = (height / 6).min(3 * ctx.detail as i64);
        for row in 0..rows {
            for col in 0..(bw / 6) {
                if ctx.rng.gen_range(0..3) > 0 {
                    let wx = x + 2 + col * 6;
                    let wy = base - height + 3 + row * 6;
                    fill_rect(ctx.canvas, wx, wy, 2, 3, window);
                }
            }
        }
        x += bw + ctx.rng.gen_range(2..6);
    }
}

pub(crate) fn draw_road<R: Rng>(ctx: &mut DrawCtx<R>) {
    let top = ctx.fy(0.80);
    let bottom = ctx.fy(0.92);
    let w = ctx.w() as i64;
    let asphalt = darken(Rgb([74, 74, 78]), time_dim(ctx.scene.time).max(0.6));
    fill_rect_with(ctx.canvas, 0, top, w, bottom - top, |px, py| {
        darken(asphalt, 1.0 + 0.1 * pseudo_noise(px as f32, py as f32, 6.0))
    });
    // Dashed center line.
    let mid = (top + bottom) / 2;
    let dash = Rgb([222, 208, 120]);
    let mut x = 0;
    while x < w {
        fill_rect(ctx.canvas, x, mid, 12, 2, dash);
        x += 24;
    }
}

pub(crate) fn draw_grass<R: Rng>(ctx: &mut DrawCtx<R>) {
    let dim = time_dim(ctx.scene.time);
    let top = (ctx.horizon as i64 + 2).max(0);
    let h = ctx.h() as i64;
    if top >= h {
        return;
    }
    let blades = 150 * ctx.detail * (ctx.w() / 200).max(1);
    for _ in 0..blades {
        let x = ctx.rng.gen_range(0..ctx.w()) as i64;
        let y = ctx.rng.gen_range(top..h);
        let sway = ctx.rng.gen_range(-2..=2);
        let len = ctx.rng.gen_range(3..7);
        let shade = darken(
            Rgb([70 + ctx.rng.gen_range(0..40), 150, 60]),
            dim,
        );
        draw_line(ctx.canvas, x, y, x + sway, y - len, shade);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{layout, Canvas, DrawCtx};
    use crate::scene::parse;
    use rand::{rngs::StdRng, SeedableRng};

    fn ctx_on<'a, R: Rng>(
        canvas: &'a mut Canvas,
        scene: &'a crate::scene::Scene,
        rng: &'a mut R,
    ) -> DrawCtx<'a, R> {
        let (w, h) = canvas.dimensions();
        DrawCtx {
            anchors: layout(scene, w, h),
            horizon: (h as f32 * 0.55) as u32,
            canvas,
            scene,
            rng,
            detail: 1,
        }
    }

    #[test]
    fn road_paints_the_road_band() {
        let scene = parse("a road");
        let mut canvas = Canvas::new(100, 100);
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = ctx_on(&mut canvas, &scene, &mut rng);
        draw_road(&mut ctx);
        // Band midpoint is asphalt-gray, not the black default.
        let p = canvas.get_pixel(10, 85);
        assert!(p[0] > 30 && p[0].abs_diff(p[2]) < 25);
    }

    #[test]
    fn grass_density_scales_with_detail() {
        let scene = parse("grass");
        let painted = |detail: u32| {
            let mut canvas = Canvas::new(200, 200);
            let mut rng = StdRng::seed_from_u64(3);
            let mut ctx = ctx_on(&mut canvas, &scene, &mut rng);
            ctx.detail = detail;
            draw_grass(&mut ctx);
            canvas.pixels().filter(|p| p.0 != [0, 0, 0]).count()
        };
        assert!(painted(4) > painted(1));
    }
}
