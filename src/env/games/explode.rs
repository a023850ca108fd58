//! Explode, based on the Atari Kaboom game
//!
//! A bomber paces along the top of the screen dropping bombs that fall
//! with constant acceleration. Catching one in the bucket scores +1,
//! letting one reach the ground scores -1. The episode never terminates.

use rand::rngs::StdRng;
use rand::Rng;

use crate::env::engine::{Game, Outcome};
use crate::env::perturb::PerturbKind;
use crate::render::{Frame, Rgb, HEIGHT, WIDTH};

const PLAYER_SPEED: i32 = 8;
const BOMBER_TURN_PROB: f64 = 0.02;
const BOMB_SPAWN_PROB: f64 = 0.05;
const BOMB_ACCEL: f32 = 0.5;

const ORIG_BUCKET_W: i32 = 30;
const ORIG_BUCKET_H: i32 = 12;
const ORIG_BOMB_SIZE: i32 = 5;
const ORIG_BOMBER_W: i32 = 20;
const ORIG_BOMBER_H: i32 = 10;

/// A falling bomb; vertical position and speed are fractional because
/// the speed grows by half a pixel per frame
#[derive(Debug, Clone, Copy)]
pub struct Bomb {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: f32,
    /// Downward speed per frame
    pub speed: f32,
}

/// Colors and mutable geometry; written only by `apply_perturbation`
#[derive(Debug, Clone, PartialEq)]
pub struct ExplodeStyle {
    /// Background color
    pub bg_color: Rgb,
    /// Bucket color
    pub bucket_color: Rgb,
    /// Bomb color
    pub bomb_color: Rgb,
    /// Bomber color
    pub bomber_color: Rgb,
    /// Current bucket width
    pub bucket_width: i32,
    /// Current bucket height
    pub bucket_height: i32,
    /// Current bomb side
    pub bomb_size: i32,
    /// Current bomber width
    pub bomber_width: i32,
    /// Current bomber height
    pub bomber_height: i32,
}

impl Default for ExplodeStyle {
    fn default() -> Self {
        Self {
            bg_color: (50, 50, 100),
            bucket_color: (255, 255, 0),
            bomb_color: (255, 0, 0),
            bomber_color: (0, 255, 0),
            bucket_width: ORIG_BUCKET_W,
            bucket_height: ORIG_BUCKET_H,
            bomb_size: ORIG_BOMB_SIZE,
            bomber_width: ORIG_BOMBER_W,
            bomber_height: ORIG_BOMBER_H,
        }
    }
}

/// Bomb-catching game state
#[derive(Debug, Clone)]
pub struct Explode {
    /// Style record read by the resolver and the renderer
    pub style: ExplodeStyle,
    /// Bucket left edge
    pub player_x: i32,
    /// Bucket top edge, fixed
    pub player_y: i32,
    /// Bomber center x
    pub bomber_x: i32,
    /// Bomber top edge, fixed
    pub bomber_y: i32,
    /// Bomber horizontal speed, sign flips at the margins
    pub bomber_dx: i32,
    /// At most one live bomb
    pub bombs: Vec<Bomb>,
    /// Per-step bomb spawn probability
    pub spawn_probability: f64,
}

impl Explode {
    /// Create the game with the given fixed heights
    pub fn new(player_y: i32, bomber_y: i32) -> Self {
        Self {
            style: ExplodeStyle::default(),
            player_x: WIDTH / 2 - ORIG_BUCKET_W / 2,
            player_y,
            bomber_x: 10,
            bomber_y,
            bomber_dx: 2,
            bombs: Vec::new(),
            spawn_probability: BOMB_SPAWN_PROB,
        }
    }
}

impl Default for Explode {
    fn default() -> Self {
        Self::new(170, 20)
    }
}

impl Game for Explode {
    const NAME: &'static str = "Explode";
    const ACTIONS: usize = 3;

    fn reset(&mut self, _rng: &mut StdRng) {
        self.player_x = WIDTH / 2 - self.style.bucket_width / 2;
        self.bomber_x = 10;
        self.bombs.clear();
    }

    fn update(&mut self, action: i64, rng: &mut StdRng) -> Outcome {
        if action == 1 {
            self.player_x = (self.player_x - PLAYER_SPEED).max(0);
        } else if action == 2 {
            self.player_x =
                (self.player_x + PLAYER_SPEED).min(WIDTH - self.style.bucket_width);
        }

        self.bomber_x += self.bomber_dx;
        if self.bomber_x <= 10
            || self.bomber_x >= WIDTH - 10
            || rng.gen::<f64>() < BOMBER_TURN_PROB
        {
            self.bomber_dx = -self.bomber_dx;
        }

        if self.bombs.is_empty() && rng.gen::<f64>() < self.spawn_probability {
            self.bombs.push(Bomb { x: self.bomber_x, y: self.bomber_y as f32, speed: 2.0 });
        }

        for bomb in &mut self.bombs {
            bomb.y += bomb.speed;
            bomb.speed += BOMB_ACCEL;
        }

        let mut reward = 0.0;
        let (top, bottom) = (
            (self.player_y - self.style.bomb_size) as f32,
            (self.player_y + self.style.bucket_height) as f32,
        );
        let (left, right) = (self.player_x, self.player_x + self.style.bucket_width);
        self.bombs.retain(|bomb| {
            let caught = top <= bomb.y && bomb.y <= bottom && left <= bomb.x && bomb.x <= right;
            if caught {
                reward += 1.0;
            }
            !caught
        });
        self.bombs.retain(|bomb| {
            let missed = bomb.y >= HEIGHT as f32;
            if missed {
                reward -= 1.0;
            }
            !missed
        });

        Outcome { reward, terminated: false }
    }

    fn apply_perturbation(&mut self, kind: PerturbKind) {
        match kind {
            PerturbKind::Color => {
                self.style.bucket_color = (0, 128, 255);
                self.style.bomb_color = (255, 64, 128);
                self.style.bg_color = (32, 32, 32);
                self.style.bomber_color = (255, 200, 0);
            }
            PerturbKind::Shape => {
                self.style.bucket_width = (ORIG_BUCKET_W as f32 * 1.5) as i32;
                self.style.bucket_height = (ORIG_BUCKET_H as f32 * 1.5) as i32;
                self.style.bomb_size = ORIG_BOMB_SIZE * 2;
                self.style.bomber_width = (ORIG_BOMBER_W as f32 * 1.5) as i32;
                self.style.bomber_height = (ORIG_BOMBER_H as f32 * 1.5) as i32;
            }
        }
    }

    fn draw(&self, alt_shapes: bool) -> Frame {
        let mut frame = Frame::filled(self.style.bg_color);

        let (bx0, by0) = (self.player_x, self.player_y);
        let (bx1, by1) = (bx0 + self.style.bucket_width, by0 + self.style.bucket_height);
        if alt_shapes {
            frame.fill_ellipse(bx0, by0, bx1, by1, self.style.bucket_color);
        } else {
            frame.fill_rect(bx0, by0, bx1, by1, self.style.bucket_color);
        }

        for bomb in &self.bombs {
            let (x0, y0) = (bomb.x, bomb.y as i32);
            let (x1, y1) = (x0 + self.style.bomb_size, y0 + self.style.bomb_size);
            if alt_shapes {
                frame.fill_ellipse(x0, y0, x1, y1, self.style.bomb_color);
            } else {
                frame.fill_rect(x0, y0, x1, y1, self.style.bomb_color);
            }
        }

        let half = self.style.bomber_width / 2;
        let (tx, ty) = (self.bomber_x, self.bomber_y);
        if alt_shapes {
            frame.fill_triangle(
                [
                    (tx as f32, ty as f32),
                    ((tx - half) as f32, (ty + self.style.bomber_height) as f32),
                    ((tx + half) as f32, (ty + self.style.bomber_height) as f32),
                ],
                self.style.bomber_color,
            );
        } else {
            frame.fill_rect(
                tx - half,
                ty,
                tx + half,
                ty + self.style.bomber_height,
                self.style.bomber_color,
            );
        }

        frame
    }
}
