//! Jump, an endless-runner obstacle game
//!
//! Obstacles scroll in from the right along the ground or floating above
//! it; the runner can only jump. Touching an obstacle scores -1 and ends
//! the episode.

use rand::rngs::StdRng;
use rand::Rng;

use crate::env::engine::{Game, Outcome};
use crate::env::perturb::PerturbKind;
use crate::render::{Frame, Rgb, HEIGHT, WIDTH};

const GROUND_Y: i32 = 180;
const RUNNER_X: i32 = 20;
const GRAVITY: i32 = 3;
const JUMP_SPEED: i32 = -20;

const ORIG_RUNNER_W: i32 = 10;
const ORIG_RUNNER_H: i32 = 20;

const OBSTACLE_W: i32 = 15;
const OBSTACLE_H: i32 = 20;
const OBSTACLE_SPEED: i32 = 3;
const OBSTACLE_SPAWN_PROB: f64 = 0.05;
const FLOATING_PROB: f64 = 0.3;

/// A scrolling obstacle
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

/// Colors and mutable geometry; written only by `apply_perturbation`
#[derive(Debug, Clone, PartialEq)]
pub struct JumpStyle {
    /// Background color
    pub bg_color: Rgb,
    /// Ground color
    pub ground_color: Rgb,
    /// Ceiling color
    pub ceiling_color: Rgb,
    /// Runner color
    pub runner_color: Rgb,
    /// Obstacle color
    pub obstacle_color: Rgb,
    /// Current runner width (also the collision extent)
    pub runner_width: i32,
    /// Current runner height
    pub runner_height: i32,
}

impl Default for JumpStyle {
    fn default() -> Self {
        Self {
            bg_color: (50, 50, 100),
            ground_color: (150, 150, 255),
            ceiling_color: (150, 150, 255),
            runner_color: (255, 255, 0),
            obstacle_color: (255, 0, 0),
            runner_width: ORIG_RUNNER_W,
            runner_height: ORIG_RUNNER_H,
        }
    }
}

/// Endless runner game state
#[derive(Debug, Clone)]
pub struct Jump {
    /// Style record read by the resolver and the renderer
    pub style: JumpStyle,
    /// Runner top edge
    pub runner_y: i32,
    /// Runner vertical velocity per frame
    pub runner_vel_y: i32,
    /// Whether a jump is in flight; a new jump needs ground contact
    pub is_jumping: bool,
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Per-step obstacle spawn probability
    pub spawn_probability: f64,
}

impl Jump {
    /// Create the game
    pub fn new() -> Self {
        Self {
            style: JumpStyle::default(),
            runner_y: GROUND_Y - ORIG_RUNNER_H,
            runner_vel_y: 0,
            is_jumping: false,
            obstacles: Vec::new(),
            spawn_probability: OBSTACLE_SPAWN_PROB,
        }
    }
}

impl Default for Jump {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Jump {
    const NAME: &'static str = "Jump";
    const ACTIONS: usize = 2;

    fn reset(&mut self, _rng: &mut StdRng) {
        self.runner_y = GROUND_Y - self.style.runner_height;
        self.runner_vel_y = 0;
        self.is_jumping = false;
        self.obstacles.clear();
    }

    fn update(&mut self, action: i64, rng: &mut StdRng) -> Outcome {
        if action == 1 && !self.is_jumping {
            self.runner_vel_y = JUMP_SPEED;
            self.is_jumping = true;
        }

        self.runner_y += self.runner_vel_y;
        self.runner_vel_y += GRAVITY;

        if self.runner_y >= GROUND_Y - self.style.runner_height {
            self.runner_y = GROUND_Y - self.style.runner_height;
            self.runner_vel_y = 0;
            self.is_jumping = false;
        }

        let clear_behind =
            self.obstacles.last().map_or(true, |ob| ob.x < WIDTH - 50);
        if rng.gen::<f64>() < self.spawn_probability && clear_behind {
            let floating = rng.gen::<f64>() < FLOATING_PROB;
            let y = if floating {
                GROUND_Y - OBSTACLE_H - rng.gen_range(40..70)
            } else {
                GROUND_Y - OBSTACLE_H
            };
            self.obstacles.push(Obstacle { x: WIDTH, y, width: OBSTACLE_W, height: OBSTACLE_H });
        }

        for ob in &mut self.obstacles {
            ob.x -= OBSTACLE_SPEED;
        }
        self.obstacles.retain(|ob| ob.x + ob.width > 0);

        let mut reward = 0.0;
        let mut terminated = false;
        let (rw, rh) = (self.style.runner_width, self.style.runner_height);
        for ob in &self.obstacles {
            if RUNNER_X < ob.x + ob.width
                && RUNNER_X + rw > ob.x
                && self.runner_y < ob.y + ob.height
                && self.runner_y + rh > ob.y
            {
                reward = -1.0;
                terminated = true;
                self.runner_y = HEIGHT + 1;
                break;
            }
        }

        Outcome { reward, terminated }
    }

    fn apply_perturbation(&mut self, kind: PerturbKind) {
        match kind {
            PerturbKind::Color => {
                self.style.bg_color = (32, 32, 32);
                self.style.ground_color = (64, 64, 64);
                self.style.ceiling_color = (64, 64, 64);
                self.style.runner_color = (0, 128, 255);
                self.style.obstacle_color = (255, 200, 0);
            }
            PerturbKind::Shape => {
                self.style.runner_width = (ORIG_RUNNER_W as f32 * 1.2) as i32;
                self.style.runner_height = (ORIG_RUNNER_H as f32 * 1.2) as i32;
            }
        }
    }

    fn draw(&self, alt_shapes: bool) -> Frame {
        let mut frame = Frame::filled(self.style.bg_color);

        frame.fill_rect(0, GROUND_Y, WIDTH, HEIGHT, self.style.ground_color);
        frame.fill_rect(0, 0, WIDTH, GROUND_Y - 160, self.style.ceiling_color);

        let (rx0, ry0) = (RUNNER_X, self.runner_y);
        let (rx1, ry1) = (rx0 + self.style.runner_width, ry0 + self.style.runner_height);
        if alt_shapes {
            frame.fill_triangle(
                [
                    (rx0 as f32, ry1 as f32),
                    (rx0 as f32 + self.style.runner_width as f32 / 2.0, ry0 as f32),
                    (rx1 as f32, ry1 as f32),
                ],
                self.style.runner_color,
            );
        } else {
            frame.fill_rect(rx0, ry0, rx1, ry1, self.style.runner_color);
        }

        for ob in &self.obstacles {
            let (x0, y0) = (ob.x, ob.y);
            let (x1, y1) = (x0 + ob.width, y0 + ob.height);
            if alt_shapes {
                frame.fill_ellipse(x0, y0, x1, y1, self.style.obstacle_color);
            } else {
                frame.fill_rect(x0, y0, x1, y1, self.style.obstacle_color);
            }
        }

        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn game() -> (Jump, StdRng) {
        let mut game = Jump::default();
        let mut rng = StdRng::seed_from_u64(0);
        game.reset(&mut rng);
        game.spawn_probability = 0.0;
        (game, rng)
    }

    #[test]
    fn test_jump_launches_and_lands() {
        let (mut game, mut rng) = game();
        let ground = GROUND_Y - ORIG_RUNNER_H;
        game.update(1, &mut rng);
        assert_eq!(game.runner_y, ground + JUMP_SPEED);
        assert!(game.is_jumping);
        for _ in 0..30 {
            game.update(0, &mut rng);
        }
        assert_eq!(game.runner_y, ground, "runner settles back on the ground");
        assert!(!game.is_jumping);
        assert_eq!(game.runner_vel_y, 0);
    }

    #[test]
    fn test_no_double_jump() {
        let (mut game, mut rng) = game();
        game.update(1, &mut rng);
        let vel_after_first = game.runner_vel_y;
        game.update(1, &mut rng);
        assert_eq!(game.runner_vel_y, vel_after_first + GRAVITY, "mid-air jump is ignored");
    }

    #[test]
    fn test_collision_terminates() {
        let (mut game, mut rng) = game();
        game.obstacles.push(Obstacle {
            x: RUNNER_X + OBSTACLE_SPEED,
            y: GROUND_Y - OBSTACLE_H,
            width: OBSTACLE_W,
            height: OBSTACLE_H,
        });
        let outcome = game.update(0, &mut rng);
        assert_eq!(outcome.reward, -1.0);
        assert!(outcome.terminated);
        assert_eq!(game.runner_y, HEIGHT + 1, "runner disappears off-screen");
    }

    #[test]
    fn test_jump_clears_ground_obstacle() {
        let (mut game, mut rng) = game();
        game.update(1, &mut rng); // airborne at ground - 20
        game.obstacles.push(Obstacle {
            x: RUNNER_X + OBSTACLE_SPEED,
            y: GROUND_Y - OBSTACLE_H,
            width: OBSTACLE_W,
            height: OBSTACLE_H,
        });
        let outcome = game.update(0, &mut rng);
        assert_eq!(outcome.reward, 0.0, "runner passes above the obstacle");
        assert!(!outcome.terminated);
    }

    #[test]
    fn test_obstacles_scroll_and_cull() {
        let (mut game, mut rng) = game();
        game.obstacles.push(Obstacle { x: -13, y: GROUND_Y - OBSTACLE_H, width: OBSTACLE_W, height: OBSTACLE_H });
        game.update(0, &mut rng);
        assert!(game.obstacles.is_empty());
    }

    #[test]
    fn test_spawn_keeps_spacing() {
        let (mut game, mut rng) = game();
        game.spawn_probability = 1.0;
        game.update(0, &mut rng);
        let count = game.obstacles.len();
        game.update(0, &mut rng);
        assert_eq!(game.obstacles.len(), count, "no spawn while the last obstacle is near the edge");
    }
}
