//! Impact processing
//!
//! Turns a surface hit into mark polygons: a square quad is laid on the
//! impact plane, projected into the world by the fragmenter, and every
//! resulting fragment is either drawn once (temporary marks such as shadows)
//! or stored in the pool.

use super::data_structures::{ImpactFlags, ImpactParams, ImpactReport, MarkError};
use super::system::MarkSystem;
use crate::foundation::math::{ImpactBasis, Vec2, Vec3};
use crate::foundation::time::Millis;
use crate::render::fragments::{MarkFragmenter, MAX_MARK_FRAGMENTS, MAX_MARK_POINTS};
use crate::render::poly::{PolyPass, PolySink, PolyVert, MAX_VERTS_ON_POLY};

/// Distance the mark quad is pushed into the surface when fragmenting
pub const MARK_PROJECTION_DEPTH: f32 = 20.0;

/// Scale a [0, 1] color channel to byte range
pub(crate) fn color_byte(channel: f32) -> u8 {
    (channel * 255.0).clamp(0.0, 255.0) as u8
}

/// Corners of the mark quad, wound around the normal
fn mark_quad(origin: &Vec3, basis: &ImpactBasis, radius: f32) -> [Vec3; 4] {
    let s = basis.tangent * radius;
    let t = basis.bitangent * radius;
    [
        origin - s - t,
        origin + s - t,
        origin + s + t,
        origin - s + t,
    ]
}

impl MarkSystem {
    /// Place a mark where something struck a surface
    ///
    /// `params.origin` should lie within a unit of the surface and
    /// `params.dir` should be the surface normal. Temporary marks are handed
    /// straight to `sink`; all others are stored and drawn by
    /// [`MarkSystem::add_marks`] until they expire or are evicted.
    ///
    /// A non-positive radius is a caller bug and aborts the impact.
    pub fn impact_mark(
        &mut self,
        params: &ImpactParams,
        fragmenter: &dyn MarkFragmenter,
        sink: &mut dyn PolySink,
        now: Millis,
    ) -> Result<ImpactReport, MarkError> {
        let origin = params.origin;

        if params.flags.contains(ImpactFlags::DEBUG) {
            self.last_impact_origin = Some(origin);
            if self.settings.debug_impact_origin {
                log::info!("mark origin: {} {} {}", origin.x, origin.y, origin.z);
            }
        }

        let mut report = ImpactReport::default();
        if !self.settings.enabled {
            return Ok(report);
        }

        if params.radius.is_nan() || params.radius <= 0.0 {
            log::error!("impact_mark called with <= 0 radius ({})", params.radius);
            return Err(MarkError::NonPositiveRadius {
                radius: params.radius,
            });
        }

        let Some(basis) = ImpactBasis::new(&params.dir, params.orientation) else {
            log::warn!("impact_mark ignored: zero-length direction at {:?}", origin);
            return Ok(report);
        };

        let tex_coord_scale = 0.5 / params.radius;
        let quad = mark_quad(&origin, &basis, params.radius);
        let projection = params.dir * -MARK_PROJECTION_DEPTH;

        self.fragments.clear();
        fragmenter.mark_fragments(
            &quad,
            &projection,
            MAX_MARK_POINTS,
            MAX_MARK_FRAGMENTS,
            &mut self.fragments,
        );
        self.fragments.points.truncate(MAX_MARK_POINTS);
        self.fragments.fragments.truncate(MAX_MARK_FRAGMENTS);

        let colors = params.color.map(color_byte);
        let temporary = params.flags.contains(ImpactFlags::TEMPORARY);
        let mut verts = [PolyVert::default(); MAX_VERTS_ON_POLY];

        report.fragments = self.fragments.fragments.len();
        for fragment in &self.fragments.fragments {
            let points = self.fragments.fragment_points(fragment);
            if points.is_empty() {
                continue;
            }
            // only so much complexity is stored per mark
            let points = &points[..points.len().min(MAX_VERTS_ON_POLY)];

            for (vert, point) in verts.iter_mut().zip(points) {
                let delta = point - origin;
                vert.xyz = *point;
                vert.st = Vec2::new(
                    0.5 + delta.dot(&basis.tangent) * tex_coord_scale,
                    0.5 + delta.dot(&basis.bitangent) * tex_coord_scale,
                );
                vert.modulate = colors;
            }
            let verts = &verts[..points.len()];

            if temporary {
                sink.add_poly(params.shader, verts, PolyPass::Transient);
                report.temporary_submitted += 1;
                continue;
            }

            let allocation = self.pool.allocate()?;
            if allocation.evicted > 0 {
                self.stats.eviction_batches += 1;
                self.stats.total_evicted += allocation.evicted as u64;
                report.marks_evicted += allocation.evicted;
            }

            let mark = self.pool.get_mut(allocation.id);
            mark.time = now;
            mark.alpha_fade = params.flags.contains(ImpactFlags::ALPHA_FADE);
            mark.energy = params.flags.contains(ImpactFlags::ENERGY);
            mark.shader = params.shader;
            mark.color = params.color;
            mark.set_verts(verts);

            report.marks_stored += 1;
            log::trace!("Stored mark {:?} at time {}", allocation.id, now);
        }

        self.stats.total_created += report.marks_stored as u64;
        self.stats.temporary_submitted += report.temporary_submitted as u64;
        Ok(report)
    }
}
