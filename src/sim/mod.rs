//! Deterministic fixed-tick simulation core
//!
//! All gameplay state lives in [`GameState`] and advances through
//! [`tick`]. Given the same seed and input sequence the simulation is
//! bit-for-bit reproducible; rendering and audio sit outside and observe.

pub mod asteroid;
pub mod collision;
pub mod combat;
pub mod kinematics;
pub mod particles;
pub mod state;
pub mod tick;

pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{tick, TickInput};
