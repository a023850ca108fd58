//! Gold, a coin collector game
//!
//! Stationary coins and horizontally moving obstacles appear in eight
//! lanes; the player moves freely in four directions. A collected coin
//! scores +1, touching an obstacle scores -1 and ends the episode.

use rand::rngs::StdRng;
use rand::Rng;

use crate::env::engine::{Game, Outcome};
use crate::env::perturb::PerturbKind;
use crate::render::{Frame, Rgb, HEIGHT, WIDTH};

const TOP_MARGIN: i32 = 20;
const BOTTOM_MARGIN: i32 = 20;
const LANE_COUNT: usize = 8;
const LANE_HEIGHT: i32 = (HEIGHT - TOP_MARGIN - BOTTOM_MARGIN) / LANE_COUNT as i32;

const PLAYER_WIDTH: i32 = 20;
const PLAYER_HEIGHT: i32 = LANE_HEIGHT;
const ITEM_SIZE: i32 = LANE_HEIGHT / 2;
const PLAYER_SPEED: i32 = 8;

const SPAWN_PROB: f64 = 0.05;
const OBSTACLE_SPEED: i32 = 3;

/// A coin (dx 0) or obstacle (dx ±3)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Signed horizontal speed
    pub dx: i32,
}

/// Colors; written only by `apply_perturbation`
#[derive(Debug, Clone, PartialEq)]
pub struct GoldStyle {
    /// Background color
    pub bg_color: Rgb,
    /// Player color
    pub player_color: Rgb,
    /// Coin color
    pub coin_color: Rgb,
    /// Obstacle color
    pub obstacle_color: Rgb,
}

impl Default for GoldStyle {
    fn default() -> Self {
        Self {
            bg_color: (50, 50, 100),
            player_color: (255, 255, 0),
            coin_color: (0, 255, 0),
            obstacle_color: (255, 0, 0),
        }
    }
}

/// Coin collecting game state
#[derive(Debug, Clone)]
pub struct Gold {
    /// Style record read by the resolver and the renderer
    pub style: GoldStyle,
    /// Player left edge
    pub player_x: i32,
    /// Player top edge
    pub player_y: i32,
    /// Stationary coins
    pub items: Vec<Entity>,
    /// Moving obstacles
    pub obstacles: Vec<Entity>,
    /// Maximum live coins
    pub max_coins: usize,
    /// Maximum live obstacles
    pub max_obstacles: usize,
    /// Per-step spawn probability for each kind
    pub spawn_probability: f64,
}

impl Gold {
    /// Create the game with the given population caps
    pub fn new(max_coins: usize, max_obstacles: usize) -> Self {
        Self {
            style: GoldStyle::default(),
            player_x: WIDTH / 2 - PLAYER_WIDTH / 2,
            player_y: TOP_MARGIN + (LANE_COUNT as i32 / 2) * LANE_HEIGHT,
            items: Vec::new(),
            obstacles: Vec::new(),
            max_coins,
            max_obstacles,
            spawn_probability: SPAWN_PROB,
        }
    }

    fn overlap_at((px, py): (i32, i32), e: &Entity) -> bool {
        py - ITEM_SIZE <= e.y
            && e.y <= py + PLAYER_HEIGHT
            && px - ITEM_SIZE <= e.x
            && e.x <= px + PLAYER_WIDTH
    }

    fn lane_y(lane: usize) -> i32 {
        TOP_MARGIN + lane as i32 * LANE_HEIGHT + LANE_HEIGHT / 4
    }
}

impl Default for Gold {
    fn default() -> Self {
        Self::new(3, 3)
    }
}

impl Game for Gold {
    const NAME: &'static str = "Gold";
    const ACTIONS: usize = 5;

    fn reset(&mut self, _rng: &mut StdRng) {
        self.player_x = WIDTH / 2 - PLAYER_WIDTH / 2;
        self.player_y = TOP_MARGIN + (LANE_COUNT as i32 / 2) * LANE_HEIGHT;
        self.items.clear();
        self.obstacles.clear();
    }

    fn update(&mut self, action: i64, rng: &mut StdRng) -> Outcome {
        match action {
            1 => self.player_x = (self.player_x - PLAYER_SPEED).max(0),
            2 => self.player_x = (self.player_x + PLAYER_SPEED).min(WIDTH - PLAYER_WIDTH),
            3 => self.player_y = (self.player_y - PLAYER_SPEED).max(TOP_MARGIN),
            4 => {
                self.player_y = (self.player_y + PLAYER_SPEED)
                    .min(HEIGHT - BOTTOM_MARGIN - PLAYER_HEIGHT)
            }
            _ => {}
        }

        for obs in &mut self.obstacles {
            obs.x += obs.dx;
        }

        if self.items.len() < self.max_coins && rng.gen::<f64>() < self.spawn_probability {
            let lane = rng.gen_range(0..LANE_COUNT);
            let x = rng.gen_range(10..WIDTH - 10);
            self.items.push(Entity { x, y: Self::lane_y(lane), dx: 0 });
        }

        if self.obstacles.len() < self.max_obstacles && rng.gen::<f64>() < self.spawn_probability
        {
            let from_left = rng.gen_bool(0.5);
            let lane = rng.gen_range(0..LANE_COUNT);
            let (x, dx) =
                if from_left { (0, OBSTACLE_SPEED) } else { (WIDTH, -OBSTACLE_SPEED) };
            self.obstacles.push(Entity { x, y: Self::lane_y(lane), dx });
        }

        let mut reward = 0.0;
        let mut terminated = false;

        let player = (self.player_x, self.player_y);
        self.items.retain(|coin| {
            if Self::overlap_at(player, coin) {
                reward = 1.0;
                return false;
            }
            true
        });

        let mut hit = false;
        self.obstacles.retain(|obs| {
            let overlap = Self::overlap_at(player, obs);
            if overlap {
                hit = true;
                return false;
            }
            obs.x >= -ITEM_SIZE && obs.x <= WIDTH + ITEM_SIZE
        });
        if hit {
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
                self.style.coin_color = (255, 64, 128);
                self.style.obstacle_color = (255, 200, 0);
            }
            // shape perturbation only swaps drawing primitives here
            PerturbKind::Shape => {}
        }
    }

    fn draw(&self, alt_shapes: bool) -> Frame {
        let mut frame = Frame::filled(self.style.bg_color);

        frame.fill_rect(
            self.player_x,
            self.player_y,
            self.player_x + PLAYER_WIDTH,
            self.player_y + PLAYER_HEIGHT,
            self.style.player_color,
        );

        for coin in &self.items {
            let (x0, y0) = (coin.x, coin.y);
            let (x1, y1) = (x0 + ITEM_SIZE, y0 + ITEM_SIZE);
            if alt_shapes {
                let half = ITEM_SIZE / 2;
                frame.fill_triangle(
                    [
                        ((x0 + half) as f32, y0 as f32),
                        (x0 as f32, y1 as f32),
                        (x1 as f32, y1 as f32),
                    ],
                    self.style.coin_color,
                );
            } else {
                frame.fill_rect(x0, y0, x1, y1, self.style.coin_color);
            }
        }

        for obs in &self.obstacles {
            let (x0, y0) = (obs.x, obs.y);
            let (x1, y1) = (x0 + ITEM_SIZE, y0 + ITEM_SIZE);
            if alt_shapes {
                frame.fill_ellipse(x0, y0, x1, y1, self.style.obstacle_color);
            } else {
                frame.fill_rect(x0, y0, x1, y1, self.style.obstacle_color);
            }
        }

        frame
    }
}
