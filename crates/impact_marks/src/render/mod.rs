//! # Rendering Seams
//!
//! Types shared with the scene renderer and the collision model, plus the
//! mark system built on top of them. Neither the renderer nor the world
//! clipper lives in this crate; both are reached through traits.

pub mod poly;
pub mod fragments;
pub mod marks;

pub use poly::{PolyPass, PolySink, PolyVert, RecordingSink, ShaderHandle, SubmittedPoly, MAX_VERTS_ON_POLY};
pub use fragments::{FragmentBuffer, MarkFragment, MarkFragmenter, MAX_MARK_FRAGMENTS, MAX_MARK_POINTS};
