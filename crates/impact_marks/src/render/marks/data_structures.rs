//! Mark data structures
//!
//! Records, handles, parameters and errors shared by the pool, the impact
//! processor and the fade updater.

use crate::foundation::math::Vec3;
use crate::foundation::time::Millis;
use crate::render::poly::{PolyVert, ShaderHandle, MAX_VERTS_ON_POLY};
use thiserror::Error;

/// Errors raised by the mark system
///
/// Both variants are internal-consistency violations: a corrupted pool or a
/// caller breaking its contract. The operation that hit them is abandoned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MarkError {
    /// Tried to free a mark that is not on the active list
    #[error("free_mark: mark {index} is not active")]
    NotActive {
        /// Slot index of the mark
        index: usize,
    },
    /// Impact requested with a radius that is zero, negative or NaN
    #[error("impact_mark called with <= 0 radius ({radius})")]
    NonPositiveRadius {
        /// The offending radius
        radius: f32,
    },
}

/// Index of a slot in the mark pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub(crate) usize);

impl MarkId {
    /// Slot index inside the pool
    pub fn index(self) -> usize {
        self.0
    }
}

/// A persistent mark polygon
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkPoly {
    /// Frame time the mark was created
    pub time: Millis,
    /// Fade by alpha instead of by color
    pub alpha_fade: bool,
    /// Energy burst mark with its own fast dimming curve
    pub energy: bool,
    /// Shader the mark draws with
    pub shader: ShaderHandle,
    /// Undecayed RGBA color in [0, 1]
    pub color: [f32; 4],
    verts: [PolyVert; MAX_VERTS_ON_POLY],
    num_verts: usize,
}

impl MarkPoly {
    /// Vertices in use
    pub fn verts(&self) -> &[PolyVert] {
        &self.verts[..self.num_verts]
    }

    /// Mutable access to the vertices in use
    pub fn verts_mut(&mut self) -> &mut [PolyVert] {
        &mut self.verts[..self.num_verts]
    }

    /// Copy in the polygon, keeping at most [`MAX_VERTS_ON_POLY`] vertices
    pub fn set_verts(&mut self, verts: &[PolyVert]) {
        let count = verts.len().min(MAX_VERTS_ON_POLY);
        self.verts[..count].copy_from_slice(&verts[..count]);
        self.num_verts = count;
    }

    /// Milliseconds since the mark was created
    pub fn age(&self, now: Millis) -> Millis {
        now - self.time
    }
}

bitflags::bitflags! {
    /// Behaviour switches for an impact
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ImpactFlags: u8 {
        /// Fade the mark out through alpha only, keeping its color
        const ALPHA_FADE = 1 << 0;
        /// Draw this frame only and never store it (shadows)
        const TEMPORARY = 1 << 1;
        /// Apply the energy burst dimming curve
        const ENERGY = 1 << 2;
        /// Remember the impact origin for debugging
        const DEBUG = 1 << 3;
    }
}

/// Parameters for a surface impact
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactParams {
    /// Shader for the mark
    pub shader: ShaderHandle,
    /// Point within a unit of the struck surface
    pub origin: Vec3,
    /// Surface normal at the impact
    pub dir: Vec3,
    /// Roll of the mark around the normal, in radians
    pub orientation: f32,
    /// RGBA color in [0, 1]
    pub color: [f32; 4],
    /// Half the side length of the mark quad, must be positive
    pub radius: f32,
    /// Behaviour switches
    pub flags: ImpactFlags,
}

impl ImpactParams {
    /// Opaque white mark with no roll and no flags
    pub fn new(shader: ShaderHandle, origin: Vec3, dir: Vec3, radius: f32) -> Self {
        Self {
            shader,
            origin,
            dir,
            orientation: 0.0,
            color: [1.0; 4],
            radius,
            flags: ImpactFlags::empty(),
        }
    }

    /// Set the roll around the normal in radians
    pub fn with_orientation(mut self, orientation: f32) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the mark color
    pub fn with_color(mut self, red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        self.color = [red, green, blue, alpha];
        self
    }

    /// Add behaviour flags
    pub fn with_flags(mut self, flags: ImpactFlags) -> Self {
        self.flags |= flags;
        self
    }
}

/// Counters kept by the mark system across a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkStats {
    /// Marks stored in the pool
    pub total_created: u64,
    /// Marks retired because their lifetime ran out
    pub total_expired: u64,
    /// Marks retired early to make room
    pub total_evicted: u64,
    /// Allocations that had to evict
    pub eviction_batches: u64,
    /// Temporary polygons handed straight to the renderer
    pub temporary_submitted: u64,
}

/// Outcome of a single impact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImpactReport {
    /// Fragments the clipper produced (after capping)
    pub fragments: usize,
    /// Marks added to the pool
    pub marks_stored: usize,
    /// Polygons drawn immediately
    pub temporary_submitted: usize,
    /// Old marks evicted to make room
    pub marks_evicted: usize,
}

/// Outcome of a single fade pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FadeReport {
    /// Marks submitted to the scene
    pub rendered: usize,
    /// Marks freed because they expired
    pub expired: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_verts_truncates() {
        let mut mark = MarkPoly::default();
        mark.set_verts(&[PolyVert::default(); MAX_VERTS_ON_POLY + 5]);
        assert_eq!(mark.verts().len(), MAX_VERTS_ON_POLY);
    }

    #[test]
    fn test_impact_params_builder() {
        let params = ImpactParams::new(ShaderHandle(3), Vec3::zeros(), Vec3::z(), 8.0)
            .with_color(0.5, 0.25, 0.0, 1.0)
            .with_flags(ImpactFlags::ENERGY)
            .with_flags(ImpactFlags::DEBUG);

        assert_eq!(params.color, [0.5, 0.25, 0.0, 1.0]);
        assert!(params.flags.contains(ImpactFlags::ENERGY | ImpactFlags::DEBUG));
        assert!(!params.flags.contains(ImpactFlags::TEMPORARY));
    }
}
