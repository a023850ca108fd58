//! The ten gameworld games
//!
//! Each module holds one ruleset implementing [`crate::env::engine::Game`]:
//! - Aviate: flap through fixed-gap pipes
//! - Bounce: paddle-vs-AI-paddle ball game
//! - Cross: cross eight lanes of wrapping traffic
//! - Drive: dodge cars on a four-lane highway
//! - Explode: catch accelerating bombs in a bucket
//! - Fruits: catch falling fruit, avoid rocks
//! - Gold: collect coins, avoid moving obstacles
//! - Hunt: catch lane-bound rewards, avoid hazards
//! - Impact: brick/paddle/ball with lives and a destructible grid
//! - Jump: jump over scrolling ground and floating obstacles

pub mod aviate;
pub mod bounce;
pub mod cross;
pub mod drive;
pub mod explode;
pub mod fruits;
pub mod gold;
pub mod hunt;
pub mod impact;
pub mod jump;

pub use aviate::Aviate;
pub use bounce::Bounce;
pub use cross::Cross;
pub use drive::Drive;
pub use explode::Explode;
pub use fruits::Fruits;
pub use gold::Gold;
pub use hunt::Hunt;
pub use impact::Impact;
pub use jump::Jump;
