//! Procedural scene renderer.
//!
//! Consumes a [`Scene`](crate::scene::Scene) and paints a raster canvas by
//! layering background gradients, terrain, structures and decorations in a
//! fixed compositing order. All texture sampling goes through the
//! deterministic primitives in [`texture`]; only decorative jitter (grass
//! sway, star scatter, cloud puffs) draws from the caller-supplied random
//! source.

pub mod reveal;
pub mod texture;

mod atmosphere;
mod figures;
mod shapes;
mod structures;
mod terrain;

use image::{Rgb, RgbImage};
use rand::Rng;

use crate::error::SmartBotError;
use crate::scene::{ObjectTag, Preposition, Scene, TimeOfDay, Weather};

/// Mutable raster buffer produced by one render call. Exclusively owned by
/// that call until handed off for display or encoding.
pub type Canvas = RgbImage;

/// Fraction of the canvas height where sky meets ground.
const HORIZON: f32 = 0.55;

/// Output resolution tiers offered by the UI. Higher tiers share a capped
/// maximum raster size; past the cap only the detail multiplier grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    Sd480,
    #[default]
    Hd720,
    Hd1080,
    Uhd4k,
    Uhd8k,
}

impl Resolution {
    /// Pixel dimensions of this tier.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Resolution::Sd480 => (400, 300),
            Resolution::Hd720 => (800, 600),
            Resolution::Hd1080 => (1200, 900),
            Resolution::Uhd4k | Resolution::Uhd8k => (1600, 1200),
        }
    }

    /// Linear density multiplier for procedural detail (grass blades, stars,
    /// foam specks). Keeps higher tiers proportionally denser instead of
    /// merely larger.
    pub fn detail(&self) -> u32 {
        match self {
            Resolution::Sd480 => 1,
            Resolution::Hd720 => 2,
            Resolution::Hd1080 => 3,
            Resolution::Uhd4k => 4,
            Resolution::Uhd8k => 6,
        }
    }
}

/// Strict compositing order, background to foreground. The renderer walks
/// this list and draws each tag present in the scene; input never reorders
/// it. Later entries may occlude earlier ones.
pub const LAYER_ORDER: &[ObjectTag] = &[
    ObjectTag::Mountain,
    ObjectTag::Water,
    ObjectTag::City,
    ObjectTag::Road,
    ObjectTag::Grass,
    ObjectTag::House,
    ObjectTag::Car,
    ObjectTag::Boat,
    ObjectTag::Tree,
    ObjectTag::Dog,
    ObjectTag::Cat,
    ObjectTag::Person,
    ObjectTag::Flowers,
    ObjectTag::Fence,
    ObjectTag::Sun,
    ObjectTag::Moon,
    ObjectTag::Stars,
    ObjectTag::Birds,
    ObjectTag::Airplane,
    ObjectTag::Cloud,
    ObjectTag::Rain,
    ObjectTag::Snow,
];

/// Draw anchors (bottom-center of each movable shape) after relationship
/// placement has been applied. Absent a relationship, objects use fixed
/// default positions and may visually overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchors {
    pub car: (i64, i64),
    pub boat: (i64, i64),
    pub dog: (i64, i64),
    pub cat: (i64, i64),
}

/// Computes draw anchors for the given scene and canvas size.
///
/// `(Car, On, Road)` aligns the car onto the road band, `(Boat, On, Water)`
/// sits the hull on the waterline, `(Dog|Cat, In, House)` moves the animal
/// beside the house footprint.
pub fn layout(scene: &Scene, width: u32, height: u32) -> Anchors {
    let fx = |f: f32| (f * width as f32) as i64;
    let fy = |f: f32| (f * height as f32) as i64;

    let mut anchors = Anchors {
        car: (fx(0.62), fy(0.62)),
        boat: (fx(0.50), fy(0.50)),
        dog: (fx(0.70), fy(0.86)),
        cat: (fx(0.56), fy(0.88)),
    };
    if scene.has_relationship(ObjectTag::Car, Preposition::On, ObjectTag::Road) {
        anchors.car = (fx(0.45), fy(0.85));
    }
    if scene.has_relationship(ObjectTag::Boat, Preposition::On, ObjectTag::Water) {
        anchors.boat = (fx(0.55), fy(0.62));
    }
    if scene.has_relationship(ObjectTag::Dog, Preposition::In, ObjectTag::House) {
        anchors.dog = (fx(0.34), fy(0.80));
    }
    if scene.has_relationship(ObjectTag::Cat, Preposition::In, ObjectTag::House) {
        anchors.cat = (fx(0.28), fy(0.79));
    }
    anchors
}

/// Shared state handed to every draw routine.
pub(crate) struct DrawCtx<'a, R: Rng> {
    pub canvas: &'a mut Canvas,
    pub scene: &'a Scene,
    pub rng: &'a mut R,
    pub detail: u32,
    pub anchors: Anchors,
    pub horizon: u32,
}

impl<R: Rng> DrawCtx<'_, R> {
    pub fn w(&self) -> u32 {
        self.canvas.width()
    }

    pub fn h(&self) -> u32 {
        self.canvas.height()
    }

    /// Horizontal fraction to pixel coordinate.
    pub fn fx(&self, f: f32) -> i64 {
        (f * self.w() as f32) as i64
    }

    /// Vertical fraction to pixel coordinate.
    pub fn fy(&self, f: f32) -> i64 {
        (f * self.h() as f32) as i64
    }

    /// Shape size unit proportional to the smaller canvas dimension.
    pub fn unit(&self, f: f32) -> i64 {
        (f * self.w().min(self.h()) as f32).max(1.0) as i64
    }

    /// The scene's first recognized color, or `fallback` when none matched.
    pub fn tint(&self, fallback: Rgb<u8>) -> Rgb<u8> {
        self.scene
            .primary_color()
            .map(|c| Rgb(c.rgb))
            .unwrap_or(fallback)
    }
}

/// Renders `scene` into a fresh canvas of exactly `width` x `height` pixels.
///
/// Always succeeds for positive dimensions; a zero dimension is a programmer
/// error reported as [`SmartBotError::InvalidRequest`]. Decorative jitter
/// draws from the process-wide random source; use [`render_with_rng`] to
/// substitute a seeded one.
pub fn render(
    scene: &Scene,
    width: u32,
    height: u32,
    detail: u32,
) -> Result<Canvas, SmartBotError> {
    render_with_rng(scene, width, height, detail, &mut rand::thread_rng())
}

/// [`render`] with an injected random source for the decorative jitter.
/// The texture noise itself is deterministic regardless of `rng`.
pub fn render_with_rng<R: Rng>(
    scene: &Scene,
    width: u32,
    height: u32,
    detail: u32,
    rng: &mut R,
) -> Result<Canvas, SmartBotError> {
    if width == 0 || height == 0 {
        return Err(SmartBotError::InvalidRequest(format!(
            "canvas dimensions must be positive, got {width}x{height}"
        )));
    }
    let detail = detail.max(1);
    let mut canvas = RgbImage::new(width, height);
    let horizon = (height as f32 * HORIZON) as u32;

    paint_sky(&mut canvas, scene, horizon);
    paint_ground(&mut canvas, scene, horizon);

    let anchors = layout(scene, width, height);
    let mut ctx = DrawCtx {
        canvas: &mut canvas,
        scene,
        rng,
        detail,
        anchors,
        horizon,
    };
    for tag in LAYER_ORDER {
        if ctx.scene.contains(*tag) {
            draw_object(&mut ctx, *tag);
        }
    }
    paint_weather_overlays(&mut ctx);

    Ok(canvas)
}

/// Renders at a resolution tier, deriving both dimensions and detail from it.
pub fn render_at(scene: &Scene, resolution: Resolution) -> Result<Canvas, SmartBotError> {
    let (width, height) = resolution.dimensions();
    render(scene, width, height, resolution.detail())
}

/// Dispatches a tag to its draw routine. The match is exhaustive: a new
/// `ObjectTag` variant will not compile until it gets a routine here and a
/// slot in [`LAYER_ORDER`].
fn draw_object<R: Rng>(ctx: &mut DrawCtx<R>, tag: ObjectTag) {
    match tag {
        ObjectTag::Mountain => terrain::draw_mountain(ctx),
        ObjectTag::Water => terrain::draw_water(ctx),
        ObjectTag::City => terrain::draw_city(ctx),
        ObjectTag::Road => terrain::draw_road(ctx),
        ObjectTag::Grass => terrain::draw_grass(ctx),
        ObjectTag::House => structures::draw_house(ctx),
        ObjectTag::Fence => structures::draw_fence(ctx),
        ObjectTag::Flowers => structures::draw_flowers(ctx),
        ObjectTag::Car => figures::draw_car(ctx),
        ObjectTag::Boat => figures::draw_boat(ctx),
        ObjectTag::Tree => figures::draw_trees(ctx),
        ObjectTag::Person => figures::draw_person(ctx),
        ObjectTag::Dog => figures::draw_dog(ctx),
        ObjectTag::Cat => figures::draw_cat(ctx),
        ObjectTag::Sun => atmosphere::draw_sun(ctx),
        ObjectTag::Moon => atmosphere::draw_moon(ctx),
        ObjectTag::Stars => atmosphere::draw_stars(ctx),
        ObjectTag::Birds => atmosphere::draw_birds(ctx),
        ObjectTag::Airplane => atmosphere::draw_airplane(ctx),
        ObjectTag::Cloud => atmosphere::draw_clouds(ctx),
        ObjectTag::Rain => atmosphere::draw_rain(ctx),
        ObjectTag::Snow => atmosphere::draw_snow(ctx),
    }
}

/// Sky gradient stops per time of day, top to horizon.
fn sky_stops(time: TimeOfDay) -> &'static [[u8; 3]] {
    match time {
        TimeOfDay::Day => &[[96, 165, 220], [135, 206, 235], [200, 230, 248]],
        TimeOfDay::Night => &[[8, 8, 32], [18, 22, 56], [38, 44, 82]],
        TimeOfDay::Sunset => &[[60, 50, 110], [190, 95, 85], [245, 170, 95], [255, 208, 128]],
        TimeOfDay::Sunrise => &[[80, 100, 155], [200, 150, 130], [250, 210, 150]],
    }
}

/// Ground gradient stops per time of day, horizon to bottom.
fn ground_stops(time: TimeOfDay) -> &'static [[u8; 3]] {
    match time {
        TimeOfDay::Day => &[[98, 150, 76], [66, 115, 52]],
        TimeOfDay::Night => &[[30, 44, 32], [16, 26, 20]],
        TimeOfDay::Sunset => &[[112, 110, 62], [70, 78, 44]],
        TimeOfDay::Sunrise => &[[100, 130, 70], [62, 100, 50]],
    }
}

/// Overcast and storm conditions dim the background bands.
fn weather_dim(weather: Weather) -> f32 {
    match weather {
        Weather::Clear => 1.0,
        Weather::Cloudy => 0.85,
        Weather::Rainy => 0.72,
        Weather::Snowy => 0.92,
        Weather::Stormy => 0.55,
    }
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
}

/// Samples a multi-stop gradient at `t` in `[0, 1]`.
fn gradient_color(stops: &[[u8; 3]], t: f32) -> Rgb<u8> {
    debug_assert!(stops.len() >= 2);
    let segments = (stops.len() - 1) as f32;
    let pos = t.clamp(0.0, 1.0) * segments;
    let idx = (pos.floor() as usize).min(stops.len() - 2);
    let frac = pos - idx as f32;
    let (a, b) = (stops[idx], stops[idx + 1]);
    Rgb([
        lerp(a[0], b[0], frac),
        lerp(a[1], b[1], frac),
        lerp(a[2], b[2], frac),
    ])
}

fn paint_sky(canvas: &mut Canvas, scene: &Scene, horizon: u32) {
    let stops = sky_stops(scene.time);
    let dim = weather_dim(scene.weather);
    let span = horizon.max(1);
    for y in 0..horizon.min(canvas.height()) {
        let t = y as f32 / span as f32;
        let color = texture::darken(gradient_color(stops, t), dim);
        for x in 0..canvas.width() {
            canvas.put_pixel(x, y, color);
        }
    }
}

fn paint_ground(canvas: &mut Canvas, scene: &Scene, horizon: u32) {
    let stops = ground_stops(scene.time);
    let dim = weather_dim(scene.weather);
    let height = canvas.height();
    let span = height.saturating_sub(horizon).max(1);
    for y in horizon.min(height)..height {
        let t = (y - horizon) as f32 / span as f32;
        let color = texture::darken(gradient_color(stops, t), dim);
        for x in 0..canvas.width() {
            canvas.put_pixel(x, y, color);
        }
    }
}

/// Weather drawn as overlays even when the prompt never named the matching
/// object tag: a rainy scene gets rain, a stormy one gets dark clouds.
fn paint_weather_overlays<R: Rng>(ctx: &mut DrawCtx<R>) {
    match ctx.scene.weather {
        Weather::Rainy => {
            if !ctx.scene.contains(ObjectTag::Rain) {
                atmosphere::draw_rain(ctx);
            }
        }
        Weather::Snowy => {
            if !ctx.scene.contains(ObjectTag::Snow) {
                atmosphere::draw_snow(ctx);
            }
        }
        Weather::Cloudy | Weather::Stormy => {
            if !ctx.scene.contains(ObjectTag::Cloud) {
                atmosphere::draw_clouds(ctx);
            }
        }
        Weather::Clear => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::parse;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn output_dimensions_match_request() {
        let scene = parse("a tree");
        let canvas = render(&scene, 321, 123, 1).unwrap();
        assert_eq!(canvas.dimensions(), (321, 123));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let scene = parse("a tree");
        assert!(matches!(
            render(&scene, 0, 100, 1),
            Err(SmartBotError::InvalidRequest(_))
        ));
        assert!(matches!(
            render(&scene, 100, 0, 1),
            Err(SmartBotError::InvalidRequest(_))
        ));
    }

    #[test]
    fn layer_order_covers_every_tag_once() {
        let unique: HashSet<_> = LAYER_ORDER.iter().collect();
        assert_eq!(unique.len(), LAYER_ORDER.len());
        // A scene naming everything still renders: every tag has a routine.
        let scene = crate::scene::Scene {
            objects: LAYER_ORDER.to_vec(),
            ..Default::default()
        };
        render(&scene, 200, 150, 1).unwrap();
    }

    #[test]
    fn tiny_canvases_render_without_panicking() {
        // Decorative bands collapse to empty ranges on a few-pixel canvas;
        // the draw routines must skip them instead of sampling them.
        let default_scene = parse("xyzzyzz");
        render(&default_scene, 100, 3, 1).unwrap();
        render(&parse("grass"), 50, 4, 1).unwrap();
        render(&parse("birds in a cloudy sky"), 3, 3, 1).unwrap();
        let everything = crate::scene::Scene {
            objects: LAYER_ORDER.to_vec(),
            ..Default::default()
        };
        render(&everything, 2, 2, 1).unwrap();
    }

    #[test]
    fn seeded_renders_are_identical() {
        let scene = parse("a red house in a forest at night with stars");
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        let a = render_with_rng(&scene, 200, 150, 2, &mut rng_a).unwrap();
        let b = render_with_rng(&scene, 200, 150, 2, &mut rng_b).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn gradient_layers_do_not_depend_on_rng() {
        // Different jitter seeds, same sky: the top-left pixel is pure
        // gradient and must match bit for bit.
        let scene = parse("a tree at sunset");
        let a = render_with_rng(&scene, 200, 150, 1, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = render_with_rng(&scene, 200, 150, 1, &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(a.get_pixel(0, 0), b.get_pixel(0, 0));
        assert_eq!(a.get_pixel(10, 0), b.get_pixel(10, 0));
    }

    #[test]
    fn relationship_moves_car_anchor() {
        let with_road = parse("a car on the road");
        let without = parse("a car");
        let a = layout(&with_road, 400, 300);
        let b = layout(&without, 400, 300);
        assert_ne!(a.car, b.car);
    }

    #[test]
    fn night_sky_uses_night_stops() {
        let scene = parse("a house at night");
        let canvas = render(&scene, 100, 100, 1).unwrap();
        let top = canvas.get_pixel(0, 0);
        // Night stop [8, 8, 32]: dark and blue-dominant.
        assert!(top[2] > top[0]);
        assert!(top[0] < 40);
    }

    #[test]
    fn resolution_tiers_cap_dimensions() {
        assert_eq!(Resolution::Sd480.dimensions(), (400, 300));
        assert_eq!(Resolution::Uhd4k.dimensions(), Resolution::Uhd8k.dimensions());
        assert!(Resolution::Uhd8k.detail() > Resolution::Uhd4k.detail());
    }
}
