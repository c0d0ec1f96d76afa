//! Impact marks
//!
//! Bullet holes, scorch marks and blood splatter projected onto world
//! geometry. Marks live in a fixed-capacity pool, fade out at the end of a
//! bounded lifetime, and under capacity pressure the oldest batch of marks is
//! evicted to make room.
//!
//! # Frame flow
//!
//! ```text
//! gameplay hit ──► MarkSystem::impact_mark ──► MarkFragmenter (world clip)
//!                        │                          │
//!                        │ temporary                ▼ fragments
//!                        ▼                    MarkPool::allocate
//!                   PolySink (transient)            │
//!                                                   ▼
//! every frame ───► MarkSystem::add_marks ──► expire / fade ──► PolySink (scene)
//! ```

pub mod data_structures;
pub mod pool;
pub mod system;
pub mod impact;
pub mod fade;

#[cfg(test)]
mod tests;

pub use data_structures::*;
pub use pool::{ActiveMarks, Allocation, MarkPool};
pub use system::MarkSystem;
pub use impact::MARK_PROJECTION_DEPTH;
pub use fade::{energy_fade, time_fade, ENERGY_FADE_TIME};
