//! Drive, a four-lane highway dodging game
//!
//! Opponent cars spawn at the top of a centered road and drive down at
//! lane-dependent speeds, slowing to match a car ahead in the same lane.
//! Touching one scores -1 and ends the episode.

use rand::rngs::StdRng;
use rand::Rng;

use crate::env::engine::{Game, Outcome};
use crate::env::perturb::PerturbKind;
use crate::render::{Frame, Rgb, HEIGHT, WIDTH};

const ROAD_WIDTH: i32 = 100;
const LANE_COUNT: usize = 4;
const MAX_CARS_PER_LANE: usize = 4;
const CAR_WIDTH: i32 = 14;
const CAR_HEIGHT: i32 = 24;
const SPAWN_PROB: f64 = 0.05;
const PLAYER_SPEED: i32 = 2;

const OPPONENT_COLORS: [Rgb; 4] = [(255, 0, 0), (0, 255, 0), (0, 0, 255), (255, 0, 255)];

/// One opponent car
#[derive(Debug, Clone, Copy)]
pub struct Opponent {
    /// Left edge, fixed to the lane center
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Downward speed per frame
    pub speed: i32,
    /// Fill color
    pub color: Rgb,
    /// Lane index
    pub lane: usize,
}

/// Colors; written only by `apply_perturbation`
#[derive(Debug, Clone, PartialEq)]
pub struct DriveStyle {
    /// Grass color outside the road
    pub bg_color: Rgb,
    /// Road surface color
    pub road_color: Rgb,
    /// Player car color
    pub player_color: Rgb,
    /// Generic obstacle color, kept for palette completeness; opponents
    /// keep their spawn colors
    pub obstacle_color: Rgb,
}

impl Default for DriveStyle {
    fn default() -> Self {
        Self {
            bg_color: (150, 150, 255),
            road_color: (50, 50, 100),
            player_color: (255, 255, 0),
            obstacle_color: (255, 0, 0),
        }
    }
}

/// Highway dodging game state
#[derive(Debug, Clone)]
pub struct Drive {
    /// Style record read by the resolver and the renderer
    pub style: DriveStyle,
    /// Player left edge
    pub player_x: i32,
    /// Player top edge, fixed
    pub player_y: i32,
    /// Live opponent cars
    pub opponents: Vec<Opponent>,
    /// Per-step opponent spawn probability
    pub spawn_probability: f64,
}

impl Drive {
    /// Create the game
    pub fn new() -> Self {
        Self {
            style: DriveStyle::default(),
            player_x: WIDTH / 2 - CAR_WIDTH / 2,
            player_y: HEIGHT - 30,
            opponents: Vec::new(),
            spawn_probability: SPAWN_PROB,
        }
    }

    /// Left edge of each lane's car slot
    fn lane_position(lane: usize) -> i32 {
        let center = WIDTH / 2;
        let half_road = ROAD_WIDTH / 2;
        let lane_w = ROAD_WIDTH as f32 / LANE_COUNT as f32;
        (center - half_road) + ((lane as f32 + 0.5) * lane_w - CAR_WIDTH as f32 / 2.0) as i32
    }
}

impl Default for Drive {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Drive {
    const NAME: &'static str = "Drive";
    const ACTIONS: usize = 3;

    fn reset(&mut self, _rng: &mut StdRng) {
        self.player_x = WIDTH / 2 - CAR_WIDTH / 2;
        self.player_y = HEIGHT - 30;
        self.opponents.clear();
    }

    fn update(&mut self, action: i64, rng: &mut StdRng) -> Outcome {
        let left_bound = WIDTH / 2 - ROAD_WIDTH / 2;
        let right_bound = left_bound + ROAD_WIDTH - CAR_WIDTH;
        if action == 1 && self.player_x > left_bound {
            self.player_x -= PLAYER_SPEED;
        } else if action == 2 && self.player_x < right_bound {
            self.player_x += PLAYER_SPEED;
        }

        // spawn: at most three cars on screen, capped per lane, and never
        // overlapping a car already near the top of the same lane
        if rng.gen::<f64>() < self.spawn_probability && self.opponents.len() < 3 {
            let lane = rng.gen_range(0..LANE_COUNT);
            let in_lane = self.opponents.iter().filter(|o| o.lane == lane).count();
            if in_lane < MAX_CARS_PER_LANE {
                let y = -CAR_HEIGHT;
                let speed =
                    if lane >= 2 { rng.gen_range(1..3) } else { rng.gen_range(3..5) };
                let color = OPPONENT_COLORS[rng.gen_range(0..OPPONENT_COLORS.len())];
                let clear = self
                    .opponents
                    .iter()
                    .filter(|o| o.lane == lane)
                    .all(|o| (y - o.y).abs() > CAR_HEIGHT);
                if clear {
                    self.opponents.push(Opponent {
                        x: Self::lane_position(lane),
                        y,
                        speed,
                        color,
                        lane,
                    });
                }
            }
        }

        // a car closing in on the one ahead adopts its speed
        for i in 0..self.opponents.len() {
            let (y, lane, speed) =
                (self.opponents[i].y, self.opponents[i].lane, self.opponents[i].speed);
            for j in 0..self.opponents.len() {
                if j == i || self.opponents[j].lane != lane {
                    continue;
                }
                let gap = self.opponents[j].y - (y + CAR_HEIGHT);
                if 0 < gap && gap < speed + 5 {
                    self.opponents[i].speed = self.opponents[j].speed;
                }
            }
            self.opponents[i].y += self.opponents[i].speed;
        }
        self.opponents.retain(|o| o.y <= HEIGHT);

        let mut reward = 0.0;
        let mut terminated = false;
        for opp in &mut self.opponents {
            if self.player_x < opp.x + CAR_WIDTH
                && self.player_x + CAR_WIDTH > opp.x
                && self.player_y < opp.y + CAR_HEIGHT
                && self.player_y + CAR_HEIGHT > opp.y
            {
                reward = -1.0;
                terminated = true;
                self.player_y = HEIGHT + 1;
                opp.y = HEIGHT + 1;
                break;
            }
        }

        Outcome { reward, terminated }
    }

    fn apply_perturbation(&mut self, kind: PerturbKind) {
        match kind {
            PerturbKind::Color => {
                self.style.bg_color = (32, 32, 32);
                self.style.road_color = (100, 100, 100);
                self.style.player_color = (0, 128, 255);
                self.style.obstacle_color = (255, 200, 0);
            }
            // shape perturbation only swaps drawing primitives here
            PerturbKind::Shape => {}
        }
    }

    fn draw(&self, alt_shapes: bool) -> Frame {
        let mut frame = Frame::filled(self.style.bg_color);

        let left = WIDTH / 2 - ROAD_WIDTH / 2;
        frame.fill_rect(left, 0, left + ROAD_WIDTH, HEIGHT, self.style.road_color);

        let (px, py) = (self.player_x, self.player_y);
        if alt_shapes {
            frame.fill_triangle(
                [
                    (px as f32, (py + CAR_HEIGHT) as f32),
                    ((px as f32 + CAR_WIDTH as f32 / 2.0), py as f32),
                    ((px + CAR_WIDTH) as f32, (py + CAR_HEIGHT) as f32),
                ],
                self.style.player_color,
            );
        } else {
            frame.fill_rect(px, py, px + CAR_WIDTH, py + CAR_HEIGHT, self.style.player_color);
        }

        for opp in &self.opponents {
            let (ox, oy) = (opp.x, opp.y);
            if alt_shapes {
                frame.fill_ellipse(ox, oy, ox + CAR_WIDTH, oy + CAR_HEIGHT, opp.color);
            } else {
                frame.fill_rect(ox, oy, ox + CAR_WIDTH, oy + CAR_HEIGHT, opp.color);
            }
        }

        frame
    }
}
