//! Celestial bodies and atmospheric overlay draw routines.

use image::Rgb;
use rand::Rng;

use super::shapes::{draw_line, fill_circle, put};
use super::texture::{darken, pseudo_noise};
use super::DrawCtx;
use crate::scene::{TimeOfDay, Weather};

pub(crate) fn draw_sun<R: Rng>(ctx: &mut DrawCtx<R>) {
    let (cx, cy) = (ctx.fx(0.80), ctx.fy(0.15));
    let r = ctx.unit(0.06);
    // Glow halo first, disc on top.
    fill_circle(ctx.canvas, cx, cy, r + r / 2, Rgb([250, 225, 150]));
    fill_circle(ctx.canvas, cx, cy, r, Rgb([252, 210, 90]));
}

pub(crate) fn draw_moon<R: Rng>(ctx: &mut DrawCtx<R>) {
    let (cx, cy) = (ctx.fx(0.78), ctx.fy(0.14));
    let r = ctx.unit(0.05);
    fill_circle(ctx.canvas, cx, cy, r, Rgb([226, 226, 216]));
    // Craters at fixed offsets so the face is stable across renders.
    for (dx, dy, cr) in [(-2i64, -2i64, 4i64), (3, 2, 3), (-4, 4, 2)] {
        fill_circle(
            ctx.canvas,
            cx + dx * r / 8,
            cy + dy * r / 8,
            (cr * r / 16).max(1),
            Rgb([196, 196, 188]),
        );
    }
}

pub(crate) fn draw_stars<R: Rng>(ctx: &mut DrawCtx<R>) {
    let count = 40 * ctx.detail * (ctx.w() / 200).max(1);
    let limit = (ctx.horizon as i64 * 9 / 10).max(1);
    for _ in 0..count {
        let x = ctx.rng.gen_range(0..ctx.w()) as i64;
        let y = ctx.rng.gen_range(0..limit);
        put(ctx.canvas, x, y, Rgb([240, 240, 228]));
        // Occasional brighter star gets a small cross flare.
        if ctx.rng.gen_range(0..8) == 0 {
            let flare = Rgb([255, 255, 245]);
            put(ctx.canvas, x - 1, y, flare);
            put(ctx.canvas, x + 1, y, flare);
            put(ctx.canvas, x, y - 1, flare);
            put(ctx.canvas, x, y + 1, flare);
        }
    }
}

pub(crate) fn draw_birds<R: Rng>(ctx: &mut DrawCtx<R>) {
    let ink = if ctx.scene.time == TimeOfDay::Night {
        Rgb([180, 180, 190])
    } else {
        Rgb([40, 40, 48])
    };
    for _ in 0..5 {
        let left = ctx.fx(0.1);
        let top = ctx.fy(0.08);
        let x = ctx.rng.gen_range(left..ctx.fx(0.9).max(left + 1));
        let y = ctx.rng.gen_range(top..ctx.fy(0.35).max(top + 1));
        let span = ctx.unit(0.012).max(3);
        draw_line(ctx.canvas, x - span, y, x, y - span / 2, ink);
        draw_line(ctx.canvas, x, y - span / 2, x + span, y, ink);
    }
}

pub(crate) fn draw_airplane<R: Rng>(ctx: &mut DrawCtx<R>) {
    let (cx, cy) = (ctx.fx(0.30), ctx.fy(0.12));
    let len = ctx.unit(0.08);
    let hull = Rgb([210, 214, 220]);
    for dy in -1..=1 {
        draw_line(ctx.canvas, cx - len / 2, cy + dy, cx + len / 2, cy + dy, hull);
    }
    draw_line(ctx.canvas, cx, cy, cx - len / 5, cy + len / 4, hull);
    draw_line(ctx.canvas, cx, cy, cx - len / 5, cy - len / 4, hull);
    // Tail fin and contrail.
    draw_line(ctx.canvas, cx - len / 2, cy, cx - len / 2 - len / 6, cy - len / 5, hull);
    let trail = Rgb([235, 238, 242]);
    draw_line(ctx.canvas, cx - len / 2 - 2, cy, cx - len, cy, trail);
}

pub(crate) fn draw_clouds<R: Rng>(ctx: &mut DrawCtx<R>) {
    let fill = match ctx.scene.weather {
        Weather::Stormy => Rgb([74, 76, 86]),
        Weather::Rainy => Rgb([140, 144, 152]),
        _ => darken(Rgb([236, 238, 242]), super::terrain::time_dim(ctx.scene.time).max(0.6)),
    };
    let banks = 3 + ctx.detail.min(3);
    for _ in 0..banks {
        let cx = ctx.rng.gen_range(0..ctx.w()) as i64;
        let band_top = ctx.fy(0.05);
        let cy = ctx.rng.gen_range(band_top..ctx.fy(0.30).max(band_top + 1));
        let r = ctx.unit(0.035) + ctx.rng.gen_range(0..ctx.unit(0.02).max(1));
        // A bank is a cluster of jittered puffs.
        for _ in 0..5 {
            let dx = ctx.rng.gen_range(-r..=r);
            let dy = ctx.rng.gen_range(-r / 3..=r / 3);
            fill_circle(ctx.canvas, cx + dx, cy + dy, r * 2 / 3, fill);
        }
    }
}

pub(crate) fn draw_rain<R: Rng>(ctx: &mut DrawCtx<R>) {
    let drop = Rgb([160, 184, 210]);
    let count = 60 * ctx.detail * (ctx.w() / 200).max(1);
    let h = ctx.h() as i64;
    for _ in 0..count {
        let x = ctx.rng.gen_range(0..ctx.w()) as i64;
        let y = ctx.rng.gen_range(0..h);
        let len = ctx.rng.gen_range(4..9);
        draw_line(ctx.canvas, x, y, x - len / 3, y + len, drop);
    }
}

pub(crate) fn draw_snow<R: Rng>(ctx: &mut DrawCtx<R>) {
    let count = 80 * ctx.detail * (ctx.w() / 200).max(1);
    let h = ctx.h() as i64;
    for _ in 0..count {
        let x = ctx.rng.gen_range(0..ctx.w()) as i64;
        let y = ctx.rng.gen_range(0..h);
        let flake = darken(
            Rgb([250, 250, 252]),
            1.0 - 0.1 * pseudo_noise(x as f32, y as f32, 5.0).abs(),
        );
        put(ctx.canvas, x, y, flake);
        if ctx.rng.gen_range(0..4) == 0 {
            put(ctx.canvas, x + 1, y, flake);
            put(ctx.canvas, x, y + 1, flake);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{layout, Canvas, DrawCtx};
    use crate::scene::parse;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn star_count_scales_with_detail() {
        let scene = parse("stars at night");
        let painted = |detail: u32| {
            let mut canvas = Canvas::new(200, 200);
            let mut rng = StdRng::seed_from_u64(9);
            let mut ctx = DrawCtx {
                anchors: layout(&scene, 200, 200),
                horizon: 110,
                canvas: &mut canvas,
                scene: &scene,
                rng: &mut rng,
                detail,
            };
            draw_stars(&mut ctx);
            canvas.pixels().filter(|p| p.0 != [0, 0, 0]).count()
        };
        assert!(painted(4) > painted(1));
    }

    #[test]
    fn stars_stay_above_the_horizon() {
        let scene = parse("stars");
        let mut canvas = Canvas::new(100, 100);
        let mut rng = StdRng::seed_from_u64(2);
        let mut ctx = DrawCtx {
            anchors: layout(&scene, 100, 100),
            horizon: 55,
            canvas: &mut canvas,
            scene: &scene,
            rng: &mut rng,
            detail: 2,
        };
        draw_stars(&mut ctx);
        for y in 55..100 {
            for x in 0..100 {
                assert_eq!(canvas.get_pixel(x, y).0, [0, 0, 0]);
            }
        }
    }
}
