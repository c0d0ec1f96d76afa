//! Polygon submission types
//!
//! The vertex layout and the seam to the scene renderer. The renderer itself
//! lives outside this crate; marks only hand it polygons.

use crate::foundation::math::{Vec2, Vec3};

/// Maximum vertices stored for a single persistent mark polygon
pub const MAX_VERTS_ON_POLY: usize = 10;

/// Opaque reference to a renderer-side shader
///
/// The renderer owns the shader; marks only carry the handle back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShaderHandle(pub u32);

/// A single polygon vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolyVert {
    /// World-space position
    pub xyz: Vec3,
    /// Texture coordinate
    pub st: Vec2,
    /// RGBA modulate color in byte range
    pub modulate: [u8; 4],
}

impl Default for PolyVert {
    fn default() -> Self {
        Self {
            xyz: Vec3::zeros(),
            st: Vec2::zeros(),
            modulate: [0; 4],
        }
    }
}

/// How long a submitted polygon stays with the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolyPass {
    /// Drawn once, nothing is retained on the caller's side
    Transient,
    /// Registered for the current frame's scene pass
    Scene,
}

/// Scene renderer entry point for loose polygons
pub trait PolySink {
    /// Add a polygon to the frame
    fn add_poly(&mut self, shader: ShaderHandle, verts: &[PolyVert], pass: PolyPass);
}

/// One polygon handed to a [`RecordingSink`]
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedPoly {
    /// Shader the polygon was drawn with
    pub shader: ShaderHandle,
    /// Vertex data at submission time
    pub verts: Vec<PolyVert>,
    /// Pass it was submitted to
    pub pass: PolyPass,
}

/// Sink that keeps every submission, for tools and tests
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Submissions in arrival order
    pub polys: Vec<SubmittedPoly>,
}

impl RecordingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all recorded submissions
    pub fn clear(&mut self) {
        self.polys.clear();
    }

    /// Number of submissions made to `pass`
    pub fn count(&self, pass: PolyPass) -> usize {
        self.polys.iter().filter(|poly| poly.pass == pass).count()
    }
}

impl PolySink for RecordingSink {
    fn add_poly(&mut self, shader: ShaderHandle, verts: &[PolyVert], pass: PolyPass) {
        self.polys.push(SubmittedPoly {
            shader,
            verts: verts.to_vec(),
            pass,
        });
    }
}
