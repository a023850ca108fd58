//! Bounce, based on the Atari Pong game
//!
//! The player moves the right paddle up and down to return the ball past
//! a tracking AI opponent on the left. +1 when the ball exits on the
//! opponent's side, -1 when it exits on the player's side; either score
//! ends the episode.
//!
//! The vertical ball velocity is fractional: a paddle hit re-bases it to
//! 1.5 in the current direction plus an "english" term from whichever
//! paddle action was taken, and integration truncates the position back
//! to whole pixels each frame.

use rand::rngs::StdRng;
use rand::Rng;

use crate::env::engine::{Game, Outcome};
use crate::env::perturb::PerturbKind;
use crate::render::{Frame, Rgb, HEIGHT, WIDTH};

const WALL_WIDTH: i32 = 15;
const PLAYER_SPEED: i32 = 10;
const OPPONENT_SPEED: i32 = 4;

const ORIG_PADDLE_W: i32 = 10;
const ORIG_PADDLE_H: i32 = 40;
const ORIG_BALL_SIZE: i32 = 5;

/// Colors and mutable geometry; written only by `apply_perturbation`
#[derive(Debug, Clone, PartialEq)]
pub struct BounceStyle {
    /// Background color
    pub bg_color: Rgb,
    /// Top/bottom wall color
    pub wall_color: Rgb,
    /// Player paddle color
    pub player_color: Rgb,
    /// Opponent paddle color
    pub opponent_color: Rgb,
    /// Ball color
    pub ball_color: Rgb,
    /// Current paddle width (both paddles)
    pub paddle_width: i32,
    /// Current paddle height (both paddles)
    pub paddle_height: i32,
    /// Current ball edge length
    pub ball_size: i32,
}

impl Default for BounceStyle {
    fn default() -> Self {
        Self {
            bg_color: (50, 50, 100),
            wall_color: (150, 150, 255),
            player_color: (255, 255, 0),
            opponent_color: (0, 255, 0),
            ball_color: (255, 0, 0),
            paddle_width: ORIG_PADDLE_W,
            paddle_height: ORIG_PADDLE_H,
            ball_size: ORIG_BALL_SIZE,
        }
    }
}

/// Paddle-vs-paddle ball game state
#[derive(Debug, Clone)]
pub struct Bounce {
    /// Style record read by the resolver and the renderer
    pub style: BounceStyle,
    /// Player paddle left edge (fixed)
    pub player_x: i32,
    /// Player paddle top edge
    pub player_y: i32,
    /// Opponent paddle left edge (fixed)
    pub opponent_x: i32,
    /// Opponent paddle top edge
    pub opponent_y: i32,
    /// Ball left edge
    pub ball_x: i32,
    /// Ball top edge
    pub ball_y: i32,
    /// Ball horizontal velocity per frame
    pub ball_dx: i32,
    /// Ball vertical velocity per frame (fractional)
    pub ball_dy: f32,
}

impl Bounce {
    /// Create the game with the two paddle columns
    pub fn new(player_x: i32, opponent_x: i32) -> Self {
        let style = BounceStyle::default();
        let paddle_start = HEIGHT / 2 - style.paddle_height / 2;
        Self {
            style,
            player_x,
            player_y: paddle_start,
            opponent_x,
            opponent_y: paddle_start,
            ball_x: WIDTH / 2,
            ball_y: HEIGHT / 2,
            ball_dx: 3,
            ball_dy: 3.0,
        }
    }

    fn reset_ball(&mut self, rng: &mut StdRng) {
        self.ball_x = WIDTH / 2;
        self.ball_y = HEIGHT / 2;
        self.ball_dx = if rng.gen_bool(0.5) { 3 } else { -3 };
        self.ball_dy = if rng.gen_bool(0.5) { 3.0 } else { -3.0 };
    }

    /// Opponent tracks the ball; returns its pseudo-action (0 stay,
    /// 1 down, 2 up) so paddle contact can apply the same english rule
    fn move_opponent(&mut self) -> i64 {
        if self.ball_y > self.opponent_y + self.style.paddle_height - 2 {
            self.opponent_y = (self.opponent_y + OPPONENT_SPEED)
                .min(HEIGHT - self.style.paddle_height);
            1
        } else if self.ball_y < self.opponent_y + 2 {
            self.opponent_y = (self.opponent_y - OPPONENT_SPEED).max(0);
            2
        } else {
            0
        }
    }

    /// Sign with a zero case, so a vertically stationary ball stays
    /// stationary when hit by a stationary paddle
    fn sign(v: f32) -> f32 {
        if v == 0.0 {
            0.0
        } else {
            v.signum()
        }
    }

    fn english(dy: f32, action: i64) -> f32 {
        let base_speed = Self::sign(dy) * 1.5;
        let action_impact = match action {
            1 => 3.0,
            2 => -3.0,
            _ => Self::sign(dy) * 6.0,
        };
        base_speed + action_impact
    }
}

impl Default for Bounce {
    fn default() -> Self {
        Self::new(135, 15)
    }
}

impl Game for Bounce {
    const NAME: &'static str = "Bounce";
    const ACTIONS: usize = 3;

    fn reset(&mut self, rng: &mut StdRng) {
        // the player paddle keeps its position across episodes
        self.reset_ball(rng);
        self.opponent_y = HEIGHT / 2 - self.style.paddle_height / 2;
    }

    fn update(&mut self, action: i64, _rng: &mut StdRng) -> Outcome {
        if action == 1 {
            self.player_y = (self.player_y - PLAYER_SPEED).max(0);
        } else if action == 2 {
            self.player_y = (self.player_y + PLAYER_SPEED).min(HEIGHT - self.style.paddle_height);
        }

        let opponent_action = self.move_opponent();

        self.ball_x += self.ball_dx;
        self.ball_y = (self.ball_y as f32 + self.ball_dy) as i32;

        // walls: reflect and round the speed away from zero
        if self.ball_y < WALL_WIDTH || self.ball_y > HEIGHT - self.style.ball_size - WALL_WIDTH {
            self.ball_dy = -self.ball_dy;
            self.ball_dy = self.ball_dy.signum() * self.ball_dy.abs().ceil();
            self.ball_y = self.ball_y.clamp(WALL_WIDTH, HEIGHT - self.style.ball_size - WALL_WIDTH);
        }

        // paddle contact
        if self.ball_x >= self.player_x - self.style.ball_size
            && self.ball_x <= self.player_x + self.style.paddle_width - self.style.ball_size
            && self.player_y <= self.ball_y
            && self.ball_y <= self.player_y + self.style.paddle_height
        {
            self.ball_dy = Self::english(self.ball_dy, action);
            self.ball_x = self.player_x - self.style.ball_size;
            self.ball_dx = -self.ball_dx;
        } else if self.ball_x <= self.opponent_x + self.style.paddle_width
            && self.ball_x >= self.opponent_x
            && self.opponent_y <= self.ball_y
            && self.ball_y <= self.opponent_y + self.style.paddle_height
        {
            self.ball_dy = Self::english(self.ball_dy, opponent_action);
            self.ball_dx = -self.ball_dx;
            self.ball_x = self.opponent_x + self.style.paddle_width;
        }

        // scoring: the ball disappears off the losing side
        let mut reward = 0.0;
        let mut terminated = false;
        if self.ball_x <= 0 {
            self.ball_x = -1;
            reward = 1.0;
            terminated = true;
        } else if self.ball_x >= WIDTH - self.style.ball_size {
            self.ball_x = -1;
            reward = -1.0;
            terminated = true;
        }

        Outcome { reward, terminated }
    }

    fn apply_perturbation(&mut self, kind: PerturbKind) {
        match kind {
            PerturbKind::Color => {
                self.style.bg_color = (32, 32, 32);
                self.style.player_color = (0, 128, 255);
                self.style.opponent_color = (255, 200, 0);
                self.style.ball_color = (0, 255, 255);
            }
            PerturbKind::Shape => {
                let scale = 1.2;
                self.style.paddle_width = (ORIG_PADDLE_W as f32 * scale) as i32;
                self.style.paddle_height = (ORIG_PADDLE_H as f32 * scale) as i32;
                self.style.ball_size = (ORIG_BALL_SIZE as f32 * scale) as i32;
                self.player_y = self.player_y.min(HEIGHT - self.style.paddle_height);
                self.opponent_y = self.opponent_y.min(HEIGHT - self.style.paddle_height);
            }
        }
    }

    fn draw(&self, alt_shapes: bool) -> Frame {
        let mut frame = Frame::filled(self.style.bg_color);

        frame.fill_rect(0, 0, WIDTH, WALL_WIDTH, self.style.wall_color);
        frame.fill_rect(0, HEIGHT - WALL_WIDTH, WIDTH, HEIGHT, self.style.wall_color);

        let pw = self.style.paddle_width;
        let ph = self.style.paddle_height;
        if alt_shapes {
            let (px, py) = (self.player_x as f32, self.player_y as f32);
            frame.fill_triangle(
                [(px, py), (px, py + ph as f32), (px + pw as f32, py + ph as f32 / 2.0)],
                self.style.player_color,
            );
            let (ox, oy) = ((self.opponent_x + pw) as f32, self.opponent_y as f32);
            frame.fill_triangle(
                [(ox, oy), (ox, oy + ph as f32), (self.opponent_x as f32, oy + ph as f32 / 2.0)],
                self.style.opponent_color,
            );
        } else {
            frame.fill_rect(
                self.player_x,
                self.player_y,
                self.player_x + pw,
                self.player_y + ph,
                self.style.player_color,
            );
            frame.fill_rect(
                self.opponent_x,
                self.opponent_y,
                self.opponent_x + pw,
                self.opponent_y + ph,
                self.style.opponent_color,
            );
        }

        let (bx0, by0) = (self.ball_x, self.ball_y);
        let (bx1, by1) = (bx0 + self.style.ball_size, by0 + self.style.ball_size);
        if alt_shapes {
            frame.fill_ellipse(bx0, by0, bx1, by1, self.style.ball_color);
        } else {
            frame.fill_rect(bx0, by0, bx1, by1, self.style.ball_color);
        }

        frame
    }
}
