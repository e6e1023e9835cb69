//! Flap game simulation
//!
//! Everything that moves or scores lives under here. A run is a pure function
//! of its config, its seed and the `(TickInput, dt)` stream: no wall clock, no
//! I/O, entities kept in spawn order. `FrameClock` is the one piece that
//! touches real time, and it only decides how many fixed ticks to run.

pub mod actor;
pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod modifiers;
pub mod obstacle;
pub mod pickup;
pub mod spawn;
pub mod state;
pub mod tick;

pub use actor::Actor;
pub use autopilot::autopilot_input;
pub use clock::FrameClock;
pub use collision::{Aabb, actor_hits_obstacle, actor_out_of_bounds, actor_reaches_pickup};
pub use modifiers::Modifiers;
pub use obstacle::{Obstacle, ObstacleField};
pub use pickup::{Pickup, PickupField, PickupKind};
pub use spawn::{SpawnScheduler, SpawnTimer};
pub use state::{ActorPose, GameEvent, GamePhase, GameState, ObstacleView, PickupView, Snapshot};
pub use tick::{TickInput, tick};
