//! Vehicle, tree and character draw routines.

use image::Rgb;
use rand::Rng;

use super::shapes::{draw_line, fill_circle, fill_rect, fill_rect_with, fill_triangle_with, put};
use super::terrain::time_dim;
use super::texture::{darken, point_in_polygon, pseudo_noise, wood_texture};
use super::DrawCtx;

pub(crate) fn draw_car<R: Rng>(ctx: &mut DrawCtx<R>) {
    let dim = time_dim(ctx.scene.time);
    let (ax, ay) = ctx.anchors.car;
    let body_w = ctx.unit(0.20);
    let body_h = ctx.unit(0.055);
    let left = ax - body_w / 2;
    let top = ay - body_h;

    let paint = darken(ctx.tint(Rgb([178, 46, 46])), dim);
    fill_rect(ctx.canvas, left, top, body_w, body_h, paint);
    // Cabin with a window strip.
    let cabin_w = body_w * 3 / 5;
    let cabin_h = body_h * 3 / 4;
    let cabin_x = left + body_w / 5;
    fill_rect(ctx.canvas, cabin_x, top - cabin_h, cabin_w, cabin_h, paint);
    fill_rect(
        ctx.canvas,
        cabin_x + 2,
        top - cabin_h + 2,
        cabin_w - 4,
        cabin_h - 4,
        darken(Rgb([168, 206, 226]), dim),
    );
    // Wheels.
    let wheel_r = (body_h / 2).max(2);
    let tire = Rgb([28, 28, 30]);
    fill_circle(ctx.canvas, left + body_w / 5, ay, wheel_r, tire);
    fill_circle(ctx.canvas, left + body_w * 4 / 5, ay, wheel_r, tire);
    fill_circle(ctx.canvas, left + body_w / 5, ay, wheel_r / 2, Rgb([120, 120, 124]));
    fill_circle(ctx.canvas, left + body_w * 4 / 5, ay, wheel_r / 2, Rgb([120, 120, 124]));
}

pub(crate) fn draw_boat<R: Rng>(ctx: &mut DrawCtx<R>) {
    let dim = time_dim(ctx.scene.time);
    let (ax, ay) = ctx.anchors.boat;
    let hull_w = ctx.unit(0.16);
    let hull_h = ctx.unit(0.04).max(3);

    // Hull: a wood-textured quadrilateral tapering toward the keel.
    let hull = [
        ((ax - hull_w / 2) as f32, (ay - hull_h) as f32),
        ((ax + hull_w / 2) as f32, (ay - hull_h) as f32),
        ((ax + hull_w * 3 / 8) as f32, ay as f32),
        ((ax - hull_w * 3 / 8) as f32, ay as f32),
    ];
    let plank = darken(Rgb([122, 82, 48]), dim);
    for py in (ay - hull_h)..=ay {
        for px in (ax - hull_w / 2)..=(ax + hull_w / 2) {
            if point_in_polygon((px as f32 + 0.5, py as f32 + 0.5), &hull) {
                put(ctx.canvas, px, py, wood_texture(px.max(0) as u32, py.max(0) as u32, plank));
            }
        }
    }
    // Mast and sail.
    let mast_h = ctx.unit(0.12);
    let mast_top = ay - hull_h - mast_h;
    draw_line(ctx.canvas, ax, ay - hull_h, ax, mast_top, darken(Rgb([90, 70, 50]), dim));
    let sail = darken(Rgb([238, 234, 222]), dim.max(0.7));
    fill_triangle_with(
        ctx.canvas,
        (ax as f32 + 2.0, mast_top as f32),
        (ax as f32 + 2.0, (ay - hull_h - 2) as f32),
        ((ax + hull_w / 2) as f32, (ay - hull_h - 2) as f32),
        |px, py| darken(sail, 1.0 + 0.06 * pseudo_noise(px as f32, py as f32, 8.0)),
    );
}

pub(crate) fn draw_trees<R: Rng>(ctx: &mut DrawCtx<R>) {
    let dim = time_dim(ctx.scene.time);
    let trunk_base = darken(Rgb([116, 80, 48]), dim);
    let leaf = darken(Rgb([48, 118, 52]), dim);
    for base_x in [0.62, 0.78, 0.90] {
        let jitter = ctx.rng.gen_range(-8..=8);
        let x = ctx.fx(base_x) + jitter;
        let base_y = ctx.fy(0.80);
        let trunk_h = ctx.unit(0.10);
        let trunk_w = ctx.unit(0.015).max(2);
        fill_rect_with(
            ctx.canvas,
            x - trunk_w / 2,
            base_y - trunk_h,
            trunk_w,
            trunk_h,
            |px, py| wood_texture(px, py, trunk_base),
        );
        // Canopy: three overlapping discs.
        let r = ctx.unit(0.045).max(3);
        let crown = base_y - trunk_h;
        fill_circle(ctx.canvas, x, crown - r / 2, r, leaf);
        fill_circle(ctx.canvas, x - r / 2, crown, r * 3 / 4, darken(leaf, 0.9));
        fill_circle(ctx.canvas, x + r / 2, crown, r * 3 / 4, darken(leaf, 1.1));
    }
}

pub(crate) fn draw_person<R: Rng>(ctx: &mut DrawCtx<R>) {
    let dim = time_dim(ctx.scene.time);
    let x = ctx.fx(0.48);
    let base = ctx.fy(0.88);
    let height = ctx.unit(0.10);
    let head_r = (height / 6).max(2);
    let body = darken(Rgb([52, 58, 88]), dim);
    let skin = darken(Rgb([224, 182, 150]), dim);
    let hip = base - height * 2 / 5;
    let neck = base - height + head_r * 2;
    fill_circle(ctx.canvas, x, base - height + head_r, head_r, skin);
    draw_line(ctx.canvas, x, neck, x, hip, body);
    draw_line(ctx.canvas, x, neck + 2, x - head_r * 2, hip - head_r, body);
    draw_line(ctx.canvas, x, neck + 2, x + head_r * 2, hip - head_r, body);
    draw_line(ctx.canvas, x, hip, x - head_r * 2, base, body);
    draw_line(ctx.canvas, x, hip, x + head_r * 2, base, body);
}

pub(crate) fn draw_dog<R: Rng>(ctx: &mut DrawCtx<R>) {
    let dim = time_dim(ctx.scene.time);
    let (ax, ay) = ctx.anchors.dog;
    let len = ctx.unit(0.07);
    let ht = ctx.unit(0.035);
    let coat = darken(Rgb([150, 104, 62]), dim);
    fill_rect(ctx.canvas, ax - len / 2, ay - ht, len, ht * 2 / 3, coat);
    fill_circle(ctx.canvas, ax + len / 2, ay - ht, (ht / 2).max(2), coat);
    // Legs and tail.
    for leg in [-len / 2 + 1, -len / 6, len / 6, len / 2 - 1] {
        draw_line(ctx.canvas, ax + leg, ay - ht / 3, ax + leg, ay, coat);
    }
    draw_line(ctx.canvas, ax - len / 2, ay - ht, ax - len / 2 - 4, ay - ht - 4, coat);
}

pub(crate) fn draw_cat<R: Rng>(ctx: &mut DrawCtx<R>) {
    let dim = time_dim(ctx.scene.time);
    let (ax, ay) = ctx.anchors.cat;
    let len = ctx.unit(0.05);
    let ht = ctx.unit(0.025);
    let coat = darken(Rgb([120, 120, 128]), dim);
    fill_rect(ctx.canvas, ax - len / 2, ay - ht, len, ht * 2 / 3, coat);
    let head_r = (ht / 2).max(2);
    let hx = ax + len / 2;
    let hy = ay - ht;
    fill_circle(ctx.canvas, hx, hy, head_r, coat);
    // Pointy ears.
    fill_triangle_with(
        ctx.canvas,
        ((hx - head_r) as f32, hy as f32),
        ((hx - head_r / 3) as f32, hy as f32),
        ((hx - head_r) as f32, (hy - head_r - 2) as f32),
        |_, _| coat,
    );
    fill_triangle_with(
        ctx.canvas,
        ((hx + head_r / 3) as f32, hy as f32),
        ((hx + head_r) as f32, hy as f32),
        ((hx + head_r) as f32, (hy - head_r - 2) as f32),
        |_, _| coat,
    );
    for leg in [-len / 2 + 1, len / 6] {
        draw_line(ctx.canvas, ax + leg, ay - ht / 3, ax + leg, ay, coat);
    }
    draw_line(ctx.canvas, ax - len / 2, ay - ht / 2, ax - len / 2 - 5, ay - ht - 3, coat);
}

#[cfg(test)]
mod tests {
    use crate::render::render_with_rng;
    use crate::scene::parse;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn car_on_road_paints_over_the_road_band() {
        let scene = parse("a car on the road");
        let mut rng = StdRng::seed_from_u64(11);
        let canvas = render_with_rng(&scene, 400, 300, 1, &mut rng).unwrap();
        // Anchor (0.45w, 0.85h) = (180, 255): body sits just above it.
        let p = canvas.get_pixel(180, 248);
        assert!(p[0] > p[1] && p[0] > p[2], "expected car paint, got {:?}", p);
    }
}
