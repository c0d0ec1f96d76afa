//! # Impact Marks
//!
//! Client-side wall marks for a first-person shooter: bullet holes, scorch
//! marks and blood splatter that stick to world geometry, fade out and get
//! recycled.
//!
//! ## Features
//!
//! - **Bounded pool**: fixed capacity, allocation never fails, the oldest
//!   batch of marks is evicted under pressure
//! - **Surface projection**: marks are clipped onto world surfaces through a
//!   pluggable fragmenter
//! - **Time-based decay**: energy dimming and end-of-life fading driven by the
//!   frame clock
//! - **Configurable**: lifetime, fade window and capacity from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use impact_marks::prelude::*;
//!
//! struct FlatWall;
//!
//! impl MarkFragmenter for FlatWall {
//!     fn mark_fragments(
//!         &self,
//!         polygon: &[Vec3],
//!         _projection: &Vec3,
//!         _max_points: usize,
//!         _max_fragments: usize,
//!         out: &mut FragmentBuffer,
//!     ) {
//!         out.push_fragment(polygon);
//!     }
//! }
//!
//! let mut marks = MarkSystem::new(MarkSettings::default()).unwrap();
//! let mut sink = RecordingSink::new();
//!
//! let hit = ImpactParams::new(ShaderHandle(1), Vec3::zeros(), Vec3::x(), 8.0);
//! marks.impact_mark(&hit, &FlatWall, &mut sink, 1000).unwrap();
//! marks.add_marks(&mut sink, 1016).unwrap();
//! assert_eq!(sink.count(PolyPass::Scene), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod render;

/// Common imports for users of the mark system
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, MarkSettings},
        foundation::{
            math::Vec3,
            time::{FrameClock, Millis},
        },
        render::{
            FragmentBuffer, MarkFragmenter, PolyPass, PolySink, PolyVert, RecordingSink,
            ShaderHandle,
            marks::{FadeReport, ImpactFlags, ImpactParams, ImpactReport, MarkError, MarkStats, MarkSystem},
        },
    };
}
