//! Mark fragmentation seam
//!
//! Clipping a mark quad against world geometry is the collision model's job.
//! The clipper writes every fragment's points into one shared point buffer and
//! describes each fragment as a run within it.

use crate::foundation::math::Vec3;

/// Maximum fragments requested per impact
pub const MAX_MARK_FRAGMENTS: usize = 128;

/// Maximum points requested per impact, across all fragments
pub const MAX_MARK_POINTS: usize = 384;

/// A contiguous run of points in a [`FragmentBuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkFragment {
    /// Index of the fragment's first point
    pub first_point: usize,
    /// Number of points in the fragment
    pub num_points: usize,
}

/// Output of a fragmentation request
#[derive(Debug, Clone, Default)]
pub struct FragmentBuffer {
    /// Shared point storage
    pub points: Vec<Vec3>,
    /// Fragments, each indexing into `points`
    pub fragments: Vec<MarkFragment>,
}

impl FragmentBuffer {
    /// Create a buffer sized for a full request
    pub fn with_limits(max_points: usize, max_fragments: usize) -> Self {
        Self {
            points: Vec::with_capacity(max_points),
            fragments: Vec::with_capacity(max_fragments),
        }
    }

    /// Forget previous results, keeping the allocations
    pub fn clear(&mut self) {
        self.points.clear();
        self.fragments.clear();
    }

    /// Append a fragment made of `points`
    pub fn push_fragment(&mut self, points: &[Vec3]) {
        self.fragments.push(MarkFragment {
            first_point: self.points.len(),
            num_points: points.len(),
        });
        self.points.extend_from_slice(points);
    }

    /// Points of `fragment`, clamped to what the buffer actually holds
    pub fn fragment_points(&self, fragment: &MarkFragment) -> &[Vec3] {
        let start = fragment.first_point.min(self.points.len());
        let end = fragment.first_point.saturating_add(fragment.num_points).min(self.points.len());
        &self.points[start..end]
    }
}

/// Clips a convex polygon onto the world surfaces behind it
pub trait MarkFragmenter {
    /// Project `polygon` along `projection` and write the surface-bound
    /// fragments into `out` (which arrives cleared).
    ///
    /// Implementations should stay within `max_points` and `max_fragments`;
    /// callers truncate anything beyond them.
    fn mark_fragments(
        &self,
        polygon: &[Vec3],
        projection: &Vec3,
        max_points: usize,
        max_fragments: usize,
        out: &mut FragmentBuffer,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_fragment_tracks_runs() {
        let mut buffer = FragmentBuffer::default();
        buffer.push_fragment(&[Vec3::x(), Vec3::y(), Vec3::z()]);
        buffer.push_fragment(&[Vec3::zeros(); 4]);

        assert_eq!(buffer.fragments[1], MarkFragment { first_point: 3, num_points: 4 });
        assert_eq!(buffer.fragment_points(&buffer.fragments[0])[1], Vec3::y());
    }

    #[test]
    fn test_out_of_range_fragment_is_truncated() {
        let mut buffer = FragmentBuffer::default();
        buffer.push_fragment(&[Vec3::x(), Vec3::y()]);

        let overlong = MarkFragment { first_point: 1, num_points: 50 };
        assert_eq!(buffer.fragment_points(&overlong).len(), 1);

        let past_end = MarkFragment { first_point: 10, num_points: 3 };
        assert!(buffer.fragment_points(&past_end).is_empty());
    }
}
