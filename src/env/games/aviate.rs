//! Aviate, based on the Flappy Bird game
//!
//! The player flaps to steer a bird through fixed-gap pipes scrolling in
//! from the right. Leaving the frame vertically or clipping a pipe ends
//! the episode with -1 reward.

use rand::rngs::StdRng;
use rand::Rng;

use crate::env::engine::{Game, Outcome};
use crate::env::perturb::PerturbKind;
use crate::render::{Frame, Rgb, HEIGHT, WIDTH};

const BIRD_X: i32 = 30;
const GRAVITY: i32 = 1;
const JUMP_SPEED: i32 = -10;

const PIPE_GAP: i32 = 100;
const PIPE_WIDTH: i32 = 20;
const PIPE_SPEED: i32 = 2;
const PIPE_SPAWN_PROB: f64 = 0.03;
/// Minimum horizontal clearance behind the newest pipe before another
/// one may spawn
const PIPE_SPACING: i32 = 80;

const ORIG_BIRD_RADIUS: i32 = 5;

/// A pipe pair: everything outside `gap_y..gap_y + PIPE_GAP` is solid
#[derive(Debug, Clone, Copy)]
pub struct Pipe {
    /// Left edge
    pub x: i32,
    /// Top of the gap
    pub gap_y: i32,
}

/// Colors and mutable geometry; written only by `apply_perturbation`
#[derive(Debug, Clone, PartialEq)]
pub struct AviateStyle {
    /// Background color
    pub bg_color: Rgb,
    /// Bird color
    pub bird_color: Rgb,
    /// Upper pipe color
    pub pipe_color_upper: Rgb,
    /// Lower pipe color
    pub pipe_color_lower: Rgb,
    /// Current bird radius (also the collision half-extent)
    pub bird_radius: i32,
}

impl Default for AviateStyle {
    fn default() -> Self {
        Self {
            bg_color: (50, 50, 100),
            bird_color: (255, 255, 0),
            pipe_color_upper: (30, 255, 0),
            pipe_color_lower: (0, 255, 30),
            bird_radius: ORIG_BIRD_RADIUS,
        }
    }
}

/// Flap-through-the-pipes game state
#[derive(Debug, Clone)]
pub struct Aviate {
    /// Style record read by the resolver and the renderer
    pub style: AviateStyle,
    /// Bird center height
    pub bird_y: i32,
    /// Bird vertical velocity per frame
    pub bird_vel_y: i32,
    /// Live pipes, oldest first
    pub pipes: Vec<Pipe>,
    /// Per-step pipe spawn probability
    pub spawn_probability: f64,
}

impl Aviate {
    /// Create the game
    pub fn new() -> Self {
        Self {
            style: AviateStyle::default(),
            bird_y: 100,
            bird_vel_y: 0,
            pipes: Vec::new(),
            spawn_probability: PIPE_SPAWN_PROB,
        }
    }

    fn random_gap(rng: &mut StdRng) -> i32 {
        rng.gen_range(40..HEIGHT - 40 - PIPE_GAP)
    }
}

impl Default for Aviate {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Aviate {
    const NAME: &'static str = "Aviate";
    const ACTIONS: usize = 2;

    fn reset(&mut self, rng: &mut StdRng) {
        self.bird_y = 160;
        self.bird_vel_y = 0;
        self.pipes.clear();
        self.pipes.push(Pipe { x: WIDTH, gap_y: Self::random_gap(rng) });
    }

    fn update(&mut self, action: i64, rng: &mut StdRng) -> Outcome {
        // a flap only registers while falling
        if action == 1 && self.bird_vel_y > 2 {
            self.bird_vel_y = JUMP_SPEED;
        }
        self.bird_y += self.bird_vel_y;
        self.bird_vel_y += GRAVITY;

        let mut reward = 0.0;
        let mut terminated = false;
        if self.bird_y < 0 || self.bird_y > HEIGHT {
            reward = -1.0;
            terminated = true;
        }

        let clear_behind =
            self.pipes.last().map_or(true, |pipe| pipe.x < WIDTH - PIPE_SPACING);
        if rng.gen::<f64>() < self.spawn_probability && clear_behind {
            self.pipes.push(Pipe { x: WIDTH, gap_y: Self::random_gap(rng) });
        }

        for pipe in &mut self.pipes {
            pipe.x -= PIPE_SPEED;
        }
        self.pipes.retain(|pipe| pipe.x + PIPE_WIDTH > 0);

        let r = self.style.bird_radius;
        for pipe in &self.pipes {
            if BIRD_X + r > pipe.x && BIRD_X - r < pipe.x + PIPE_WIDTH {
                let in_gap = pipe.gap_y < self.bird_y && self.bird_y < pipe.gap_y + PIPE_GAP;
                if !in_gap {
                    reward = -1.0;
                    terminated = true;
                    self.bird_y = HEIGHT + 1;
                    break;
                }
            }
        }

        Outcome { reward, terminated }
    }

    fn apply_perturbation(&mut self, kind: PerturbKind) {
        match kind {
            PerturbKind::Color => {
                self.style.bg_color = (32, 32, 32);
                self.style.bird_color = (255, 64, 128);
                self.style.pipe_color_upper = (255, 200, 0);
                self.style.pipe_color_lower = (0, 255, 255);
            }
            PerturbKind::Shape => {
                self.style.bird_radius = (ORIG_BIRD_RADIUS as f32 * 1.2) as i32;
            }
        }
    }

    fn draw(&self, alt_shapes: bool) -> Frame {
        let mut frame = Frame::filled(self.style.bg_color);

        let r = self.style.bird_radius;
        let (x0, y0) = (BIRD_X - r, self.bird_y - r);
        let (x1, y1) = (BIRD_X + r, self.bird_y + r);
        if alt_shapes {
            frame.fill_rect(x0, y0, x1, y1, self.style.bird_color);
        } else {
            frame.fill_ellipse(x0, y0, x1, y1, self.style.bird_color);
        }

        for pipe in &self.pipes {
            let (x, gap_y) = (pipe.x, pipe.gap_y);
            if alt_shapes {
                frame.fill_triangle(
                    [
                        (x as f32, 0.0),
                        ((x + PIPE_WIDTH / 2) as f32, gap_y as f32),
                        ((x + PIPE_WIDTH) as f32, 0.0),
                    ],
                    self.style.pipe_color_upper,
                );
                frame.fill_triangle(
                    [
                        (x as f32, HEIGHT as f32),
                        ((x + PIPE_WIDTH / 2) as f32, (gap_y + PIPE_GAP) as f32),
                        ((x + PIPE_WIDTH) as f32, HEIGHT as f32),
                    ],
                    self.style.pipe_color_lower,
                );
            } else {
                frame.fill_rect(x, 0, x + PIPE_WIDTH, gap_y, self.style.pipe_color_upper);
                // the lower pipe spans the full frame width, as in the
                // original renderer
                frame.fill_rect(x, gap_y + PIPE_GAP, WIDTH, HEIGHT, self.style.pipe_color_lower);
            }
        }

        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0)
    }

    #[test]
    fn test_reset_spawns_one_pipe() {
        let mut game = Aviate::default();
        let mut rng = rng();
        game.reset(&mut rng);
        assert_eq!(game.bird_y, 160);
        assert_eq!(game.bird_vel_y, 0);
        assert_eq!(game.pipes.len(), 1);
        let pipe = game.pipes[0];
        assert_eq!(pipe.x, WIDTH);
        assert!((40..HEIGHT - 40 - PIPE_GAP).contains(&pipe.gap_y));
    }

    #[test]
    fn test_flap_only_registers_while_falling() {
        let mut game = Aviate::default();
        let mut rng = rng();
        game.reset(&mut rng);
        game.spawn_probability = 0.0;
        game.pipes.clear();

        game.bird_vel_y = 1;
        game.update(1, &mut rng);
        assert_eq!(game.bird_vel_y, 2, "flap ignored while rising or hovering");

        game.bird_vel_y = 5;
        game.update(1, &mut rng);
        assert_eq!(game.bird_vel_y, JUMP_SPEED + GRAVITY, "flap resets vertical velocity");
    }

    #[test]
    fn test_gravity_pulls_bird_down() {
        let mut game = Aviate::default();
        let mut rng = rng();
        game.reset(&mut rng);
        game.spawn_probability = 0.0;
        game.pipes.clear();
        let start = game.bird_y;
        for _ in 0..5 {
            game.update(0, &mut rng);
        }
        assert!(game.bird_y > start, "bird accelerates downward without flapping");
    }

    #[test]
    fn test_out_of_bounds_terminates() {
        let mut game = Aviate::default();
        let mut rng = rng();
        game.reset(&mut rng);
        game.spawn_probability = 0.0;
        game.pipes.clear();
        game.bird_y = 209;
        game.bird_vel_y = 5;
        let outcome = game.update(0, &mut rng);
        assert_eq!(outcome.reward, -1.0);
        assert!(outcome.terminated);
    }

    #[test]
    fn test_pipe_collision_outside_gap() {
        let mut game = Aviate::default();
        let mut rng = rng();
        game.reset(&mut rng);
        game.spawn_probability = 0.0;
        game.pipes.clear();
        game.pipes.push(Pipe { x: 30, gap_y: 100 });
        game.bird_y = 50; // above the gap
        game.bird_vel_y = 0;
        let outcome = game.update(0, &mut rng);
        assert_eq!(outcome.reward, -1.0);
        assert!(outcome.terminated);
        assert_eq!(game.bird_y, HEIGHT + 1, "bird disappears off-screen");
    }

    #[test]
    fn test_pipe_gap_is_safe() {
        let mut game = Aviate::default();
        let mut rng = rng();
        game.reset(&mut rng);
        game.spawn_probability = 0.0;
        game.pipes.clear();
        game.pipes.push(Pipe { x: 30, gap_y: 100 });
        game.bird_y = 150; // inside the gap
        game.bird_vel_y = 0;
        let outcome = game.update(0, &mut rng);
        assert_eq!(outcome.reward, 0.0);
        assert!(!outcome.terminated);
    }

    #[test]
    fn test_pipes_scroll_and_cull() {
        let mut game = Aviate::default();
        let mut rng = rng();
        game.reset(&mut rng);
        game.spawn_probability = 0.0;
        game.pipes.clear();
        game.pipes.push(Pipe { x: -19, gap_y: 100 });
        game.bird_y = 150;
        game.bird_vel_y = 0;
        game.update(0, &mut rng);
        assert!(game.pipes.is_empty(), "fully off-screen pipes are culled");
    }
}
