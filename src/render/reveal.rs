//! Progressive-reveal animation: a cosmetic blur-to-sharp frame sequence.
//!
//! This fakes a "generation in progress" experience for a caller-driven
//! display loop. It has nothing to do with actual diffusion sampling; each
//! frame is just the finished canvas re-blurred at a decreasing radius, with
//! sparse bright speckles on the early frames standing in for denoising
//! artifacts. The caller owns all pacing; this module only produces frames.

use image::{imageops, Rgb};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Canvas;

/// Gaussian sigma added per remaining step; frame `i` of `steps` is blurred
/// at `(steps - i) * BLUR_STEP`.
pub const BLUR_STEP: f32 = 2.0;

/// One speckle per this many pixels on early frames (constant per frame,
/// not scheduled).
const SPECKLE_DIVISOR: u32 = 600;

/// Returns a lazy iterator over `steps + 1` frames converging on `final_frame`.
///
/// The blur radius decreases linearly from `steps * BLUR_STEP` down to zero;
/// the terminal frame is pixel-identical to `final_frame`. Frames in the
/// earlier half additionally carry sparse white speckle noise. `steps == 0`
/// degenerates to a single terminal frame.
pub fn reveal_frames(final_frame: &Canvas, steps: u32) -> RevealFrames {
    RevealFrames::with_rng(final_frame.clone(), steps, StdRng::from_entropy())
}

/// Frame sequence produced by [`reveal_frames`]. Finite and non-restartable;
/// re-invoke [`reveal_frames`] for another pass.
pub struct RevealFrames {
    final_frame: Canvas,
    steps: u32,
    next_index: u32,
    rng: StdRng,
}

impl RevealFrames {
    /// Like [`reveal_frames`] but with a caller-provided speckle rng, so
    /// tests can fix the sequence.
    pub fn with_rng(final_frame: Canvas, steps: u32, rng: StdRng) -> Self {
        Self {
            final_frame,
            steps,
            next_index: 0,
            rng,
        }
    }

    /// The blur sigma applied to frame `i`.
    pub fn sigma_at(&self, i: u32) -> f32 {
        self.steps.saturating_sub(i) as f32 * BLUR_STEP
    }
}

impl Iterator for RevealFrames {
    type Item = Canvas;

    fn next(&mut self) -> Option<Canvas> {
        if self.next_index > self.steps {
            return None;
        }
        let i = self.next_index;
        self.next_index += 1;

        let sigma = self.sigma_at(i);
        let mut frame = if sigma > 0.0 {
            imageops::blur(&self.final_frame, sigma)
        } else {
            self.final_frame.clone()
        };

        if i < self.steps / 2 {
            let (w, h) = frame.dimensions();
            let speckles = (w * h / SPECKLE_DIVISOR).max(1);
            for _ in 0..speckles {
                let x = self.rng.gen_range(0..w);
                let y = self.rng.gen_range(0..h);
                frame.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.steps + 1).saturating_sub(self.next_index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RevealFrames {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_with_rng;
    use crate::scene::parse;

    fn sample_canvas() -> Canvas {
        let scene = parse("a house and a tree");
        let mut rng = StdRng::seed_from_u64(21);
        render_with_rng(&scene, 80, 60, 1, &mut rng).unwrap()
    }

    #[test]
    fn yields_steps_plus_one_frames() {
        let canvas = sample_canvas();
        assert_eq!(reveal_frames(&canvas, 5).count(), 6);
        assert_eq!(reveal_frames(&canvas, 0).count(), 1);
    }

    #[test]
    fn terminal_frame_is_pixel_identical() {
        let canvas = sample_canvas();
        let last = reveal_frames(&canvas, 4).last().unwrap();
        assert_eq!(last.as_raw(), canvas.as_raw());
    }

    #[test]
    fn first_frame_uses_maximum_blur() {
        let canvas = sample_canvas();
        let steps = 4;
        let frames = RevealFrames::with_rng(canvas.clone(), steps, StdRng::seed_from_u64(0));
        assert_eq!(frames.sigma_at(0), steps as f32 * BLUR_STEP);
        assert_eq!(frames.sigma_at(steps), 0.0);
    }

    #[test]
    fn blur_decreases_monotonically() {
        let canvas = sample_canvas();
        let frames = RevealFrames::with_rng(canvas, 6, StdRng::seed_from_u64(0));
        for i in 0..6 {
            assert!(frames.sigma_at(i) > frames.sigma_at(i + 1));
        }
    }

    #[test]
    fn early_frames_carry_speckles() {
        // Disregarding blur, an early frame with fixed rng must contain the
        // injected pure-white pixels; the final frame must not be altered.
        let canvas = sample_canvas();
        let frames: Vec<_> =
            RevealFrames::with_rng(canvas.clone(), 6, StdRng::seed_from_u64(77)).collect();
        let white = frames[0].pixels().filter(|p| p.0 == [255, 255, 255]).count();
        assert!(white > 0);
        assert_eq!(frames[6].as_raw(), canvas.as_raw());
    }

    #[test]
    fn zero_steps_yields_untouched_final() {
        let canvas = sample_canvas();
        let frames: Vec<_> = reveal_frames(&canvas, 0).collect();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].as_raw(), canvas.as_raw());
    }
}
