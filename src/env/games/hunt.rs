//! Hunt, based on the Atari Asterix game
//!
//! Rewards and hazards drift horizontally across eight lanes while the
//! player moves freely between them. Catching a reward scores +1, a
//! hazard -1; the episode never terminates, and several contacts in one
//! step add up.

use rand::rngs::StdRng;
use rand::Rng;

use crate::env::engine::{Game, Outcome};
use crate::env::perturb::PerturbKind;
use crate::render::{Frame, Rgb, HEIGHT, WIDTH};

const TOP_MARGIN: i32 = 20;
const BOTTOM_MARGIN: i32 = 20;
const LANE_COUNT: usize = 8;
const LANE_HEIGHT: i32 = (HEIGHT - TOP_MARGIN - BOTTOM_MARGIN) / LANE_COUNT as i32;

const ORIG_PLAYER_W: i32 = 20;
const ORIG_PLAYER_H: i32 = LANE_HEIGHT;
const ORIG_ITEM_SIZE: i32 = LANE_HEIGHT / 2;
const PLAYER_SPEED: i32 = 8;

const SPAWN_PROB: f64 = 0.05;
const ENTITY_SPEED: i32 = 2;

/// A drifting reward or hazard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    /// Left edge
    pub x: i32,
    /// Top edge, fixed per lane
    pub y: i32,
    /// Signed horizontal speed
    pub dx: i32,
}

/// Colors and mutable geometry; written only by `apply_perturbation`
#[derive(Debug, Clone, PartialEq)]
pub struct HuntStyle {
    /// Background color
    pub bg_color: Rgb,
    /// Lane divider color
    pub lane_color: Rgb,
    /// Player color
    pub player_color: Rgb,
    /// Reward color
    pub item_color: Rgb,
    /// Hazard color
    pub obstacle_color: Rgb,
    /// Current player width
    pub player_width: i32,
    /// Current player height
    pub player_height: i32,
    /// Current entity side
    pub item_size: i32,
}

impl Default for HuntStyle {
    fn default() -> Self {
        Self {
            bg_color: (50, 50, 100),
            lane_color: (255, 255, 255),
            player_color: (255, 255, 0),
            item_color: (0, 255, 0),
            obstacle_color: (255, 0, 0),
            player_width: ORIG_PLAYER_W,
            player_height: ORIG_PLAYER_H,
            item_size: ORIG_ITEM_SIZE,
        }
    }
}

/// Lane hunting game state
#[derive(Debug, Clone)]
pub struct Hunt {
    /// Style record read by the resolver and the renderer
    pub style: HuntStyle,
    /// Player left edge
    pub player_x: i32,
    /// Player top edge
    pub player_y: i32,
    /// Drifting rewards
    pub items: Vec<Entity>,
    /// Drifting hazards
    pub obstacles: Vec<Entity>,
    /// Maximum live entities per container
    pub max_objects: usize,
    /// Per-step spawn probability for each container
    pub spawn_probability: f64,
}

impl Hunt {
    /// Create the game with the given per-container population cap
    pub fn new(max_objects: usize) -> Self {
        Self {
            style: HuntStyle::default(),
            player_x: WIDTH / 2 - ORIG_PLAYER_W / 2,
            player_y: TOP_MARGIN + (LANE_COUNT as i32 / 2) * LANE_HEIGHT,
            items: Vec::new(),
            obstacles: Vec::new(),
            max_objects,
            spawn_probability: SPAWN_PROB,
        }
    }

    /// Pick an unoccupied lane (up to four attempts) and return the
    /// spawned entity, if any
    fn spawn_entity(&self, rng: &mut StdRng) -> Option<Entity> {
        for _ in 0..4 {
            let lane = rng.gen_range(0..LANE_COUNT);
            let y = TOP_MARGIN + lane as i32 * LANE_HEIGHT + LANE_HEIGHT / 4;
            let occupied =
                self.items.iter().chain(&self.obstacles).any(|e| e.y == y);
            if !occupied {
                let from_left = rng.gen_bool(0.5);
                let (x, dx) =
                    if from_left { (0, ENTITY_SPEED) } else { (WIDTH, -ENTITY_SPEED) };
                return Some(Entity { x, y, dx });
            }
        }
        None
    }

    fn overlap(style: &HuntStyle, (px, py): (i32, i32), e: &Entity) -> bool {
        py - style.item_size <= e.y
            && e.y <= py + style.player_height
            && px - style.item_size <= e.x
            && e.x <= px + style.player_width
    }
}

impl Default for Hunt {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Game for Hunt {
    const NAME: &'static str = "Hunt";
    const ACTIONS: usize = 5;

    fn reset(&mut self, _rng: &mut StdRng) {
        self.player_x = WIDTH / 2 - self.style.player_width / 2;
        self.player_y = TOP_MARGIN + (LANE_COUNT as i32 / 2) * LANE_HEIGHT;
        self.items.clear();
        self.obstacles.clear();
    }

    fn update(&mut self, action: i64, rng: &mut StdRng) -> Outcome {
        match action {
            1 => self.player_x = (self.player_x - PLAYER_SPEED).max(0),
            2 => {
                self.player_x =
                    (self.player_x + PLAYER_SPEED).min(WIDTH - self.style.player_width)
            }
            3 => self.player_y = (self.player_y - PLAYER_SPEED).max(TOP_MARGIN),
            4 => {
                self.player_y = (self.player_y + PLAYER_SPEED)
                    .min(HEIGHT - BOTTOM_MARGIN - self.style.player_height)
            }
            _ => {}
        }

        if self.items.len() < self.max_objects && rng.gen::<f64>() < self.spawn_probability {
            if let Some(e) = self.spawn_entity(rng) {
                self.items.push(e);
            }
        }
        if self.obstacles.len() < self.max_objects && rng.gen::<f64>() < self.spawn_probability
        {
            if let Some(e) = self.spawn_entity(rng) {
                self.obstacles.push(e);
            }
        }

        for e in self.items.iter_mut().chain(&mut self.obstacles) {
            e.x += e.dx;
        }

        let mut reward = 0.0;
        let style = self.style.clone();
        let player = (self.player_x, self.player_y);
        let item_size = style.item_size;
        self.items.retain(|e| {
            if Self::overlap(&style, player, e) {
                reward += 1.0;
                return false;
            }
            e.x >= -item_size && e.x <= WIDTH + item_size
        });
        self.obstacles.retain(|e| {
            if Self::overlap(&style, player, e) {
                reward -= 1.0;
                return false;
            }
            e.x >= -item_size && e.x <= WIDTH + item_size
        });

        Outcome { reward, terminated: false }
    }

    fn apply_perturbation(&mut self, kind: PerturbKind) {
        match kind {
            PerturbKind::Color => {
                self.style.bg_color = (32, 32, 32);
                self.style.lane_color = (200, 200, 200);
                self.style.player_color = (0, 128, 255);
                self.style.item_color = (255, 64, 128);
                self.style.obstacle_color = (255, 200, 0);
            }
            PerturbKind::Shape => {
                self.style.player_width = (ORIG_PLAYER_W as f32 * 1.5) as i32;
                self.style.player_height = (ORIG_PLAYER_H as f32 * 1.5) as i32;
                self.style.item_size = ORIG_ITEM_SIZE * 2;
                self.player_x = self.player_x.min(WIDTH - self.style.player_width);
                self.player_y =
                    self.player_y.min(HEIGHT - BOTTOM_MARGIN - self.style.player_height);
            }
        }
    }

    fn draw(&self, alt_shapes: bool) -> Frame {
        let mut frame = Frame::filled(self.style.bg_color);

        for i in 0..=LANE_COUNT as i32 {
            let y = TOP_MARGIN + i * LANE_HEIGHT - 1;
            frame.fill_rect(0, y, WIDTH, y + 2, self.style.lane_color);
        }

        let (px0, py0) = (self.player_x, self.player_y);
        let (px1, py1) = (px0 + self.style.player_width, py0 + self.style.player_height);
        if alt_shapes {
            frame.fill_ellipse(px0, py0, px1, py1, self.style.player_color);
        } else {
            frame.fill_rect(px0, py0, px1, py1, self.style.player_color);
        }

        for (entities, color) in
            [(&self.items, self.style.item_color), (&self.obstacles, self.style.obstacle_color)]
        {
            for e in entities {
                let (x0, y0) = (e.x, e.y);
                let (x1, y1) = (x0 + self.style.item_size, y0 + self.style.item_size);
                if alt_shapes {
                    frame.fill_ellipse(x0, y0, x1, y1, color);
                } else {
                    frame.fill_rect(x0, y0, x1, y1, color);
                }
            }
        }

        frame
    }
}
