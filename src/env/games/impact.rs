//! Impact, based on the Atari Breakout game
//!
//! The player moves a paddle left and right to bounce a ball into a
//! destructible 5x10 brick grid. Each destroyed brick is worth +1; a
//! missed ball costs one of three lives and -1 reward. The episode ends
//! when the grid is cleared or the lives run out.
//!
//! Unusually for this collection, Impact's global step counter is
//! episode-scoped: `reset` clears it.

use rand::rngs::StdRng;
use rand::Rng;

use crate::env::engine::{Game, Outcome};
use crate::env::perturb::PerturbKind;
use crate::render::{Frame, Rgb, HEIGHT, WIDTH};

/// Rows in the brick grid
pub const BRICK_ROWS: usize = 5;

/// Columns in the brick grid
pub const BRICK_COLS: usize = 10;

/// Vertical offset of the brick grid from the top of the frame
const BRICK_TOP: i32 = 20;

const BALL_START_Y: i32 = 100;
const PADDLE_SPEED: i32 = 12;
const BALL_SPEED: i32 = 4;
const START_LIVES: i32 = 3;

const ORIG_PADDLE_W: i32 = 30;
const ORIG_PADDLE_H: i32 = 8;
const ORIG_BALL_SIZE: i32 = 4;
const ORIG_BRICK_H: i32 = 10;

/// Colors and mutable geometry; written only by `apply_perturbation`
///
/// The sizes feed both rendering and collision bounds, so a shape
/// perturbation changes gameplay, not just appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactStyle {
    /// Paddle fill color
    pub paddle_color: Rgb,
    /// Ball fill color
    pub ball_color: Rgb,
    /// Brick fill color
    pub brick_color: Rgb,
    /// Background color
    pub bg_color: Rgb,
    /// Current paddle width
    pub paddle_width: i32,
    /// Current paddle height
    pub paddle_height: i32,
    /// Current ball edge length
    pub ball_size: i32,
    /// Current brick width
    pub brick_width: i32,
    /// Current brick height
    pub brick_height: i32,
}

impl Default for ImpactStyle {
    fn default() -> Self {
        Self {
            paddle_color: (255, 255, 0),
            ball_color: (255, 0, 0),
            brick_color: (0, 255, 0),
            bg_color: (50, 50, 100),
            paddle_width: ORIG_PADDLE_W,
            paddle_height: ORIG_PADDLE_H,
            ball_size: ORIG_BALL_SIZE,
            brick_width: WIDTH / BRICK_COLS as i32,
            brick_height: ORIG_BRICK_H,
        }
    }
}

/// Brick/paddle/ball environment state
#[derive(Debug, Clone)]
pub struct Impact {
    /// Style record read by the resolver and the renderer
    pub style: ImpactStyle,
    /// Fixed vertical position of the paddle
    pub paddle_y: i32,
    /// Paddle left edge
    pub paddle_x: i32,
    /// Ball left edge
    pub ball_x: i32,
    /// Ball top edge
    pub ball_y: i32,
    /// Ball horizontal velocity per frame
    pub ball_dx: i32,
    /// Ball vertical velocity per frame
    pub ball_dy: i32,
    /// Remaining lives; may go negative if stepped past termination
    pub lives: i32,
    /// Alive flags for the destructible grid, row-major
    pub bricks: [[bool; BRICK_COLS]; BRICK_ROWS],
}

impl Impact {
    /// Create the game with a given paddle row
    pub fn new(paddle_y: i32) -> Self {
        let style = ImpactStyle::default();
        let paddle_x = WIDTH / 2 - style.paddle_width / 2;
        Self {
            style,
            paddle_y,
            paddle_x,
            ball_x: WIDTH / 2,
            ball_y: BALL_START_Y,
            ball_dx: BALL_SPEED,
            ball_dy: -BALL_SPEED,
            lives: START_LIVES,
            bricks: [[true; BRICK_COLS]; BRICK_ROWS],
        }
    }

    /// Count of still-alive bricks
    pub fn alive_bricks(&self) -> usize {
        self.bricks.iter().flatten().filter(|&&alive| alive).count()
    }

    fn respawn_ball(&mut self, rng: &mut StdRng) {
        self.ball_x = WIDTH / 2;
        self.ball_y = BALL_START_Y;
        self.ball_dx = if rng.gen_bool(0.5) { BALL_SPEED } else { -BALL_SPEED };
        self.ball_dy = BALL_SPEED;
    }

    fn move_paddle(&mut self, action: i64) {
        if action == 1 {
            self.paddle_x = (self.paddle_x - PADDLE_SPEED).max(0);
        } else if action == 2 {
            self.paddle_x = (self.paddle_x + PADDLE_SPEED).min(WIDTH - self.style.paddle_width);
        }
    }

    fn bounce_walls(&mut self) {
        if self.ball_x <= 0 || self.ball_x + self.style.ball_size >= WIDTH {
            self.ball_dx = -self.ball_dx;
            self.ball_x = self.ball_x.clamp(0, WIDTH - self.style.ball_size);
        }
        if self.ball_y <= 0 {
            self.ball_dy = -self.ball_dy;
            self.ball_y = 0;
        }
    }

    fn bounce_paddle(&mut self) {
        let bottom = self.ball_y + self.style.ball_size;
        // trailing edge inclusive, leading edge exclusive
        if self.paddle_y <= bottom
            && bottom <= self.paddle_y + self.style.paddle_height
            && self.paddle_x - self.style.ball_size < self.ball_x
            && self.ball_x <= self.paddle_x + self.style.paddle_width
        {
            self.ball_dy = -self.ball_dy;
            self.ball_y = self.paddle_y - self.style.ball_size;
        }
    }

    /// Scan the whole grid; a single step may destroy several bricks and
    /// flip the velocity several times when the ball sits on cell edges.
    fn smash_bricks(&mut self) -> f32 {
        let mut reward = 0.0;
        for row in 0..BRICK_ROWS {
            for col in 0..BRICK_COLS {
                if !self.bricks[row][col] {
                    continue;
                }
                let bx = col as i32 * self.style.brick_width;
                let by = row as i32 * self.style.brick_height + BRICK_TOP;
                if bx <= self.ball_x
                    && self.ball_x <= bx + self.style.brick_width
                    && by <= self.ball_y
                    && self.ball_y <= by + self.style.brick_height
                {
                    self.bricks[row][col] = false;
                    let overlap_l = self.ball_x + self.style.ball_size - bx;
                    let overlap_r = bx + self.style.brick_width - self.ball_x;
                    let overlap_t = self.ball_y + self.style.ball_size - by;
                    let overlap_b = by + self.style.brick_height - self.ball_y;
                    if overlap_l.min(overlap_r) < overlap_t.min(overlap_b) {
                        self.ball_dx = -self.ball_dx;
                    } else {
                        self.ball_dy = -self.ball_dy;
                    }
                    reward += 1.0;
                }
            }
        }
        reward
    }
}

impl Default for Impact {
    fn default() -> Self {
        Self::new(190)
    }
}

impl Game for Impact {
    const NAME: &'static str = "Impact";
    const ACTIONS: usize = 3;
    const RESET_CLEARS_COUNTER: bool = true;

    fn reset(&mut self, rng: &mut StdRng) {
        self.lives = START_LIVES;
        self.paddle_x = WIDTH / 2 - self.style.paddle_width / 2;
        self.bricks = [[true; BRICK_COLS]; BRICK_ROWS];
        self.respawn_ball(rng);
    }

    fn update(&mut self, action: i64, rng: &mut StdRng) -> Outcome {
        self.move_paddle(action);

        self.ball_x += self.ball_dx;
        self.ball_y += self.ball_dy;

        self.bounce_walls();
        self.bounce_paddle();
        let mut reward = self.smash_bricks();

        let mut terminated = false;
        if self.ball_y >= HEIGHT {
            self.lives -= 1;
            reward -= 1.0;
            if self.lives > 0 {
                self.respawn_ball(rng);
            } else {
                terminated = true;
            }
        }

        if self.alive_bricks() == 0 {
            terminated = true;
        }

        Outcome { reward, terminated }
    }

    fn apply_perturbation(&mut self, kind: PerturbKind) {
        match kind {
            PerturbKind::Color => {
                self.style.paddle_color = (0, 128, 255);
                self.style.ball_color = (255, 64, 128);
                self.style.brick_color = (255, 200, 0);
                self.style.bg_color = (32, 32, 32);
            }
            PerturbKind::Shape => {
                self.style.paddle_width = (ORIG_PADDLE_W as f32 * 1.5) as i32;
                self.style.paddle_height = (ORIG_PADDLE_H as f32 * 1.5) as i32;
                self.style.ball_size = ORIG_BALL_SIZE * 2;
                self.style.brick_height = (ORIG_BRICK_H as f32 * 1.5) as i32;
                // column count stays fixed, so brick width is unchanged
                self.style.brick_width = WIDTH / BRICK_COLS as i32;
                self.paddle_x = self.paddle_x.min(WIDTH - self.style.paddle_width);
            }
        }
    }

    fn draw(&self, alt_shapes: bool) -> Frame {
        let mut frame = Frame::filled(self.style.bg_color);

        let (px0, py0) = (self.paddle_x, self.paddle_y);
        let (px1, py1) = (px0 + self.style.paddle_width, py0 + self.style.paddle_height);
        if alt_shapes {
            frame.fill_ellipse(px0, py0, px1, py1, self.style.paddle_color);
        } else {
            frame.fill_rect(px0, py0, px1, py1, self.style.paddle_color);
        }

        // the ball stays square after a shape perturbation
        if self.ball_y < HEIGHT {
            frame.fill_rect(
                self.ball_x,
                self.ball_y,
                self.ball_x + self.style.ball_size,
                self.ball_y + self.style.ball_size,
                self.style.ball_color,
            );
        }

        for row in 0..BRICK_ROWS {
            for col in 0..BRICK_COLS {
                if !self.bricks[row][col] {
                    continue;
                }
                let bx = col as i32 * self.style.brick_width;
                let by = row as i32 * self.style.brick_height + BRICK_TOP;
                let (bx1, by1) = (bx + self.style.brick_width, by + self.style.brick_height);
                if alt_shapes {
                    frame.fill_ellipse(bx, by, bx1, by1, self.style.brick_color);
                } else {
                    frame.fill_rect(bx, by, bx1, by1, self.style.brick_color);
                }
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
    fn test_reset_restores_grid_and_lives() {
        let mut game = Impact::default();
        let mut rng = rng();
        game.lives = 1;
        game.bricks[0][0] = false;
        game.reset(&mut rng);
        assert_eq!(game.lives, 3);
        assert_eq!(game.alive_bricks(), BRICK_ROWS * BRICK_COLS);
        assert_eq!(game.ball_y, 100);
        assert_eq!(game.ball_dy, BALL_SPEED, "ball respawns moving down");
    }

    #[test]
    fn test_paddle_clamps_to_world_bounds() {
        let mut game = Impact::default();
        let mut rng = rng();
        game.ball_y = 120; // keep the ball away from everything
        game.ball_dy = 0;
        game.ball_dx = 0;
        for _ in 0..30 {
            game.update(1, &mut rng);
        }
        assert_eq!(game.paddle_x, 0);
        for _ in 0..30 {
            game.update(2, &mut rng);
        }
        assert_eq!(game.paddle_x, WIDTH - game.style.paddle_width);
    }

    #[test]
    fn test_paddle_bounce_flips_once() {
        let mut game = Impact::default();
        let mut rng = rng();
        game.paddle_x = 65;
        game.ball_x = 80;
        game.ball_y = 184;
        game.ball_dx = 4;
        game.ball_dy = 4;

        let outcome = game.update(0, &mut rng);
        assert_eq!(game.ball_dy, -4, "vertical velocity flips on paddle contact");
        assert_eq!(game.ball_y, game.paddle_y - game.style.ball_size, "ball sits above paddle");
        assert_eq!(outcome.reward, 0.0);
        assert!(!outcome.terminated);

        game.update(0, &mut rng);
        assert_eq!(game.ball_dy, -4, "no second flip on the following step");
    }

    #[test]
    fn test_brick_hit_scores_and_kills_cell() {
        let mut game = Impact::default();
        let mut rng = rng();
        // lands at (8, 24): inside row 0, column 0 only
        game.ball_x = 4;
        game.ball_y = 20;
        game.ball_dx = 4;
        game.ball_dy = 4;

        let outcome = game.update(0, &mut rng);
        assert_eq!(outcome.reward, 1.0);
        assert!(!game.bricks[0][0]);
        assert_eq!(game.alive_bricks(), BRICK_ROWS * BRICK_COLS - 1);
    }

    #[test]
    fn test_multi_brick_hit_in_one_step() {
        let mut game = Impact::default();
        let mut rng = rng();
        // lands at (16, 30): on the shared edges of columns 0/1 and rows
        // 0/1, so the scan registers four hits in a single step
        game.ball_x = 12;
        game.ball_y = 26;
        game.ball_dx = 4;
        game.ball_dy = 4;

        let outcome = game.update(0, &mut rng);
        assert_eq!(outcome.reward, 4.0, "one step may destroy several bricks");
        assert!(!game.bricks[0][0] && !game.bricks[0][1]);
        assert!(!game.bricks[1][0] && !game.bricks[1][1]);
        // per-cell axis tie-breaking flipped both axes along the way
        assert_eq!(game.ball_dx, -4);
        assert_eq!(game.ball_dy, -4);
    }

    #[test]
    fn test_miss_costs_life_and_respawns() {
        let mut game = Impact::default();
        let mut rng = rng();
        game.ball_x = 80;
        game.ball_y = 216;
        game.ball_dx = 0;
        game.ball_dy = 4;

        let outcome = game.update(0, &mut rng);
        assert_eq!(outcome.reward, -1.0);
        assert!(!outcome.terminated);
        assert_eq!(game.lives, 2);
        assert_eq!((game.ball_x, game.ball_y), (80, 100), "ball respawns at the start position");
    }

    #[test]
    fn test_last_life_terminates() {
        let mut game = Impact::default();
        let mut rng = rng();
        game.lives = 1;
        game.ball_x = 80;
        game.ball_y = 216;
        game.ball_dx = 0;
        game.ball_dy = 4;

        let outcome = game.update(0, &mut rng);
        assert_eq!(outcome.reward, -1.0);
        assert!(outcome.terminated);
        assert_eq!(game.lives, 0);
    }

    #[test]
    fn test_clearing_grid_terminates() {
        let mut game = Impact::default();
        let mut rng = rng();
        game.bricks = [[false; BRICK_COLS]; BRICK_ROWS];
        game.bricks[0][0] = true;
        // lands at (8, 24): inside the one remaining brick
        game.ball_x = 4;
        game.ball_y = 20;
        game.ball_dx = 4;
        game.ball_dy = 4;

        let outcome = game.update(0, &mut rng);
        assert_eq!(outcome.reward, 1.0);
        assert!(outcome.terminated, "level clear terminates independent of lives");
        assert_eq!(game.lives, 3);
    }

    #[test]
    fn test_alive_bricks_non_increasing() {
        let mut game = Impact::default();
        let mut rng = rng();
        game.reset(&mut rng);
        let mut alive = game.alive_bricks();
        for step in 0..300 {
            let outcome = game.update((step % 3) as i64, &mut rng);
            let now = game.alive_bricks();
            assert!(now <= alive, "alive brick count may never grow within an episode");
            alive = now;
            if outcome.terminated {
                break;
            }
        }
    }

    #[test]
    fn test_shape_perturbation_widens_collision_bounds() {
        let mut game = Impact::default();
        let mut rng = rng();
        game.apply_perturbation(PerturbKind::Shape);
        assert_eq!(game.style.paddle_width, 45);
        assert_eq!(game.style.paddle_height, 12);
        assert_eq!(game.style.ball_size, 8);
        assert_eq!(game.style.brick_height, 15);

        // a ball at paddle_x + 40 is outside the original 30-wide paddle
        // but inside the scaled one
        game.paddle_x = 60;
        game.ball_x = 100 - 4;
        game.ball_y = 186 - 4;
        game.ball_dx = 4;
        game.ball_dy = 4;
        game.update(0, &mut rng);
        assert_eq!(game.ball_dy, -4, "resolver uses the perturbed paddle width");
    }

    #[test]
    fn test_color_perturbation_only_touches_palette() {
        let mut game = Impact::default();
        let before = game.style.clone();
        game.apply_perturbation(PerturbKind::Color);
        assert_eq!(game.style.bg_color, (32, 32, 32));
        assert_eq!(game.style.paddle_width, before.paddle_width);
        assert_eq!(game.style.ball_size, before.ball_size);
        assert_eq!(game.style.brick_height, before.brick_height);
    }

    #[test]
    fn test_wall_reflection_clamps_inside() {
        let mut game = Impact::default();
        let mut rng = rng();
        game.ball_x = 158;
        game.ball_y = 120;
        game.ball_dx = 4;
        game.ball_dy = 0;
        game.update(0, &mut rng);
        assert_eq!(game.ball_dx, -4);
        assert_eq!(game.ball_x, WIDTH - game.style.ball_size);
    }
}
