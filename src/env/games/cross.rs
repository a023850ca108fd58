//! Cross, based on the Atari Freeway game
//!
//! The player climbs across eight lanes of wrapping traffic. Reaching the
//! top scores +1 and snaps the player back to the start; touching a car
//! scores -1 and ends the episode.

use rand::rngs::StdRng;

use crate::env::engine::{Game, Outcome};
use crate::env::perturb::PerturbKind;
use crate::render::{Frame, Rgb, HEIGHT, WIDTH};

const TOP_MARGIN: i32 = 20;
const BOTTOM_MARGIN: i32 = 20;
const LANE_COUNT: usize = 8;
const LANE_HEIGHT: i32 = (HEIGHT - TOP_MARGIN - BOTTOM_MARGIN) / LANE_COUNT as i32;
const DIVIDER_THICKNESS: i32 = 3;

const PLAYER_SPEED: i32 = 6;
const ORIG_PLAYER_SIZE: i32 = 10;
const ORIG_CAR_SIZE: i32 = 14;

/// Per-lane signed speeds; negative lanes drive left
const CAR_SPEEDS: [i32; LANE_COUNT] = [-1, -2, -1, -3, 3, 1, 2, 1];

const CAR_COLORS: [Rgb; LANE_COUNT] = [
    (255, 20, 20),
    (20, 255, 20),
    (20, 20, 255),
    (255, 40, 255),
    (255, 0, 0),
    (0, 255, 0),
    (0, 0, 255),
    (255, 0, 255),
];

const CAR_COLORS_ALT: [Rgb; LANE_COUNT] = [
    (255, 64, 128),
    (255, 200, 0),
    (0, 255, 255),
    (128, 128, 128),
    (0, 255, 128),
    (128, 0, 255),
    (255, 128, 0),
    (0, 128, 128),
];

/// One car, bound to its lane
#[derive(Debug, Clone, Copy)]
pub struct Car {
    /// Left edge
    pub x: i32,
    /// Top edge, fixed per lane
    pub y: i32,
    /// Signed horizontal speed
    pub speed: i32,
    /// Fill color
    pub color: Rgb,
}

/// Colors and mutable geometry; written only by `apply_perturbation`
#[derive(Debug, Clone, PartialEq)]
pub struct CrossStyle {
    /// Background color
    pub bg_color: Rgb,
    /// Lane divider color
    pub lane_color: Rgb,
    /// Player color
    pub player_color: Rgb,
    /// Current player square side
    pub player_size: i32,
    /// Current car square side
    pub car_size: i32,
}

impl Default for CrossStyle {
    fn default() -> Self {
        Self {
            bg_color: (50, 50, 100),
            lane_color: (255, 255, 255),
            player_color: (255, 255, 0),
            player_size: ORIG_PLAYER_SIZE,
            car_size: ORIG_CAR_SIZE,
        }
    }
}

/// Lane-crossing game state
#[derive(Debug, Clone)]
pub struct Cross {
    /// Style record read by the resolver and the renderer
    pub style: CrossStyle,
    /// Player left edge, fixed for the lifetime of the game
    pub player_x: i32,
    /// Player top edge
    pub player_y: i32,
    /// One car per lane
    pub cars: Vec<Car>,
}

impl Cross {
    /// Create the game
    pub fn new() -> Self {
        let player_size = ORIG_PLAYER_SIZE;
        Self {
            style: CrossStyle::default(),
            player_x: WIDTH / 2 - player_size / 2,
            player_y: HEIGHT - BOTTOM_MARGIN - player_size,
            cars: Vec::new(),
        }
    }

    fn start_y(&self) -> i32 {
        HEIGHT - BOTTOM_MARGIN - self.style.player_size
    }
}

impl Default for Cross {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Cross {
    const NAME: &'static str = "Cross";
    const ACTIONS: usize = 3;

    fn reset(&mut self, _rng: &mut StdRng) {
        self.player_y = self.start_y();
        self.cars = (0..LANE_COUNT)
            .map(|i| Car {
                x: if CAR_SPEEDS[i] > 0 { 10 } else { WIDTH - self.style.car_size - 10 },
                y: TOP_MARGIN + i as i32 * LANE_HEIGHT + 5,
                speed: CAR_SPEEDS[i],
                color: CAR_COLORS[i],
            })
            .collect();
    }

    fn update(&mut self, action: i64, _rng: &mut StdRng) -> Outcome {
        if action == 1 {
            self.player_y = (self.player_y - PLAYER_SPEED).max(0);
        } else if action == 2 {
            self.player_y = (self.player_y + PLAYER_SPEED).min(HEIGHT - self.style.player_size);
        }

        for car in &mut self.cars {
            car.x += car.speed;
            if car.speed > 0 && car.x >= WIDTH {
                car.x = 0;
            } else if car.speed < 0 && car.x <= 0 {
                car.x = WIDTH;
            }
        }

        let mut reward = 0.0;
        let mut terminated = false;
        let (ps, cs) = (self.style.player_size, self.style.car_size);
        for car in &self.cars {
            if self.player_y < car.y + cs
                && self.player_y + ps > car.y
                && self.player_x < car.x + cs
                && self.player_x + ps > car.x
            {
                self.player_y = self.start_y();
                reward = -1.0;
                terminated = true;
                break;
            }
        }

        if self.player_y <= 0 {
            reward = 1.0;
            self.player_y = self.start_y();
        }

        Outcome { reward, terminated }
    }

    fn apply_perturbation(&mut self, kind: PerturbKind) {
        match kind {
            PerturbKind::Color => {
                self.style.bg_color = (32, 32, 32);
                self.style.lane_color = (200, 200, 200);
                self.style.player_color = (0, 128, 255);
                for (car, color) in self.cars.iter_mut().zip(CAR_COLORS_ALT) {
                    car.color = color;
                }
            }
            // shape perturbation only swaps drawing primitives here
            PerturbKind::Shape => {}
        }
    }

    fn draw(&self, alt_shapes: bool) -> Frame {
        let mut frame = Frame::filled(self.style.bg_color);

        for i in 0..=LANE_COUNT as i32 {
            let y = TOP_MARGIN + i * LANE_HEIGHT;
            frame.fill_rect(0, y, WIDTH, y + DIVIDER_THICKNESS, self.style.lane_color);
        }

        let (px0, py0) = (self.player_x, self.player_y);
        let (px1, py1) = (px0 + self.style.player_size, py0 + self.style.player_size);
        if alt_shapes {
            frame.fill_ellipse(px0, py0, px1, py1, self.style.player_color);
        } else {
            frame.fill_rect(px0, py0, px1, py1, self.style.player_color);
        }

        for car in &self.cars {
            let (x0, y0) = (car.x, car.y);
            let (x1, y1) = (x0 + self.style.car_size, y0 + self.style.car_size);
            if alt_shapes {
                frame.fill_ellipse(x0, y0, x1, y1, car.color);
            } else {
                frame.fill_rect(x0, y0, x1, y1, car.color);
            }
        }

        frame
    }
}
