//! Fruits, a catch-the-falling-objects game
//!
//! Fruit and rocks fall from the top of the screen; the player slides a
//! basket-carrying figure along the ground. A caught fruit scores +1, a
//! caught rock scores -1 and ends the episode.
//!
//! Unusually, action 0 moves left and action 1 is the no-op.

use rand::rngs::StdRng;
use rand::Rng;

use crate::env::engine::{Game, Outcome};
use crate::env::perturb::PerturbKind;
use crate::render::{Frame, Rgb, HEIGHT, WIDTH};

const PLAYER_WIDTH: i32 = 16;
const PLAYER_HEIGHT: i32 = 30;
const BASKET_WIDTH: i32 = 24;
const BASKET_HEIGHT: i32 = 16;
const GROUND_HEIGHT: i32 = 16;
const PLAYER_SPEED: i32 = 8;

const FRUIT_SIZE: i32 = 12;
const ROCK_SIZE: i32 = 10;
const ROCK_PROB: f64 = 0.25;
const MAX_OBJECTS: usize = 6;
const SPAWN_PROB: f64 = 0.05;

const GROUND_COLOR: Rgb = (150, 150, 255);

/// A falling fruit or rock
#[derive(Debug, Clone, Copy)]
pub struct FallingObject {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Rocks end the episode when caught
    pub is_rock: bool,
    /// Index into the fruit palette (ignored for rocks)
    pub color_idx: usize,
    /// Downward speed per frame
    pub speed: i32,
}

/// Colors; written only by `apply_perturbation`
#[derive(Debug, Clone, PartialEq)]
pub struct FruitsStyle {
    /// Background color
    pub bg_color: Rgb,
    /// Player figure color
    pub player_color: Rgb,
    /// Basket color
    pub basket_color: Rgb,
    /// Fruit palette, indexed by each object's `color_idx`
    pub fruit_colors: [Rgb; 3],
    /// Rock color
    pub rock_color: Rgb,
}

impl Default for FruitsStyle {
    fn default() -> Self {
        Self {
            bg_color: (50, 50, 100),
            player_color: (255, 255, 0),
            basket_color: (255, 255, 0),
            fruit_colors: [(255, 0, 0), (128, 0, 128), (0, 255, 0)],
            rock_color: (180, 180, 180),
        }
    }
}

/// Fruit-catching game state
#[derive(Debug, Clone)]
pub struct Fruits {
    /// Style record read by the resolver and the renderer
    pub style: FruitsStyle,
    /// Player left edge
    pub player_x: i32,
    /// Player top edge, fixed
    pub player_y: i32,
    /// Live falling objects
    pub falling_objects: Vec<FallingObject>,
    /// Per-step spawn probability
    pub spawn_probability: f64,
    /// Probability a spawned object is a rock
    pub rock_probability: f64,
}

impl Fruits {
    /// Create the game
    pub fn new() -> Self {
        Self {
            style: FruitsStyle::default(),
            player_x: WIDTH / 2 - PLAYER_WIDTH / 2,
            player_y: HEIGHT - GROUND_HEIGHT - BASKET_HEIGHT,
            falling_objects: Vec::new(),
            spawn_probability: SPAWN_PROB,
            rock_probability: ROCK_PROB,
        }
    }

    /// Basket left edge, centered over the player figure
    pub fn basket_x(&self) -> i32 {
        self.player_x - BASKET_WIDTH / 2 + PLAYER_WIDTH / 2
    }

    fn spawn_object(&mut self, rng: &mut StdRng) {
        let x = rng.gen_range(0..WIDTH - FRUIT_SIZE);
        let is_rock = rng.gen::<f64>() < self.rock_probability;
        let color_idx = rng.gen_range(0..self.style.fruit_colors.len());
        let speed = rng.gen_range(2..6);
        // keep columns distinct so objects never stack
        if self.falling_objects.iter().any(|o| (o.x - x).abs() < FRUIT_SIZE) {
            return;
        }
        self.falling_objects.push(FallingObject { x, y: 0, is_rock, color_idx, speed });
    }
}

impl Default for Fruits {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Fruits {
    const NAME: &'static str = "Fruits";
    const ACTIONS: usize = 3;

    fn reset(&mut self, _rng: &mut StdRng) {
        self.player_x = WIDTH / 2 - PLAYER_WIDTH / 2;
        self.falling_objects.clear();
    }

    fn update(&mut self, action: i64, rng: &mut StdRng) -> Outcome {
        // action 0 is left here, 1 is stay
        if action == 0 {
            self.player_x = (self.player_x - PLAYER_SPEED).max(0);
        } else if action == 2 {
            self.player_x = (self.player_x + PLAYER_SPEED).min(WIDTH - PLAYER_WIDTH);
        }

        if self.falling_objects.len() < MAX_OBJECTS && rng.gen::<f64>() < self.spawn_probability
        {
            self.spawn_object(rng);
        }

        for obj in &mut self.falling_objects {
            obj.y += obj.speed;
        }
        self.falling_objects.retain(|o| o.y < HEIGHT);

        let basket_x = self.basket_x();
        let basket_y = self.player_y - BASKET_HEIGHT;
        let mut reward = 0.0;
        let mut terminated = false;
        self.falling_objects.retain(|o| {
            let size = if o.is_rock { ROCK_SIZE } else { FRUIT_SIZE };
            let in_band = o.y + size >= basket_y && o.y <= basket_y + BASKET_HEIGHT;
            let in_basket = (basket_x <= o.x && o.x <= basket_x + BASKET_WIDTH)
                || (basket_x <= o.x + size && o.x + size <= basket_x + BASKET_WIDTH);
            if in_band && in_basket {
                if o.is_rock {
                    reward = -1.0;
                    terminated = true;
                } else {
                    reward = 1.0;
                }
                return false;
            }
            true
        });

        Outcome { reward, terminated }
    }

    fn apply_perturbation(&mut self, kind: PerturbKind) {
        match kind {
            PerturbKind::Color => {
                self.style.bg_color = (32, 32, 32);
                self.style.player_color = (0, 128, 255);
                self.style.basket_color = (0, 128, 255);
                self.style.fruit_colors = [(255, 64, 128), (255, 200, 0), (0, 255, 255)];
                self.style.rock_color = (255, 200, 0);
            }
            // shape perturbation only swaps drawing primitives here
            PerturbKind::Shape => {}
        }
    }

    fn draw(&self, alt_shapes: bool) -> Frame {
        let mut frame = Frame::filled(self.style.bg_color);

        let (px0, py0) = (self.player_x, self.player_y);
        let (px1, py1) = (px0 + PLAYER_WIDTH, py0 + PLAYER_HEIGHT);
        if alt_shapes {
            frame.fill_triangle(
                [
                    (px0 as f32, py1 as f32),
                    (px0 as f32 + PLAYER_WIDTH as f32 / 2.0, py0 as f32),
                    (px1 as f32, py1 as f32),
                ],
                self.style.player_color,
            );
        } else {
            frame.fill_rect(px0, py0, px1, py1, self.style.player_color);
        }

        let bx0 = self.basket_x();
        let by0 = self.player_y - BASKET_HEIGHT;
        frame.fill_rect(bx0, by0, bx0 + BASKET_WIDTH, self.player_y, self.style.basket_color);

        for obj in &self.falling_objects {
            let size = if obj.is_rock { ROCK_SIZE } else { FRUIT_SIZE };
            let color = if obj.is_rock {
                self.style.rock_color
            } else {
                self.style.fruit_colors[obj.color_idx]
            };
            let (x, y) = (obj.x, obj.y);
            if alt_shapes {
                if obj.is_rock {
                    frame.fill_ellipse(x, y, x + size, y + size, color);
                } else {
                    let half = size as f32 / 2.0;
                    frame.fill_triangle(
                        [
                            (x as f32 + half, y as f32),
                            (x as f32, (y + size) as f32),
                            ((x + size) as f32, (y + size) as f32),
                        ],
                        color,
                    );
                }
            } else {
                frame.fill_rect(x, y, x + size, y + size, color);
            }
        }

        frame.fill_rect(0, HEIGHT - GROUND_HEIGHT, WIDTH, HEIGHT, GROUND_COLOR);

        frame
    }
}
