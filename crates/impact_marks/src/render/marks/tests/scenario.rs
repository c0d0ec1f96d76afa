//! Mark lifecycle scenarios
//!
//! Impacts, frame ticks and restarts interleaved through the public
//! `MarkSystem` API with stub world geometry.

use crate::config::MarkSettings;
use crate::foundation::math::Vec3;
use crate::foundation::time::FrameClock;
use crate::render::fragments::{FragmentBuffer, MarkFragmenter};
use crate::render::marks::{ImpactFlags, ImpactParams, MarkSystem};
use crate::render::poly::{PolyPass, RecordingSink, ShaderHandle};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Splits the quad into `pieces` copies, like a hit across a corner
    struct StubWorld {
        pieces: usize,
    }

    impl MarkFragmenter for StubWorld {
        fn mark_fragments(
            &self,
            polygon: &[Vec3],
            _projection: &Vec3,
            _max_points: usize,
            max_fragments: usize,
            out: &mut FragmentBuffer,
        ) {
            for _ in 0..self.pieces.min(max_fragments) {
                out.push_fragment(polygon);
            }
        }
    }

    fn session(capacity: usize) -> MarkSystem {
        MarkSystem::new(MarkSettings::default().with_max_mark_polys(capacity))
            .expect("valid settings")
    }

    fn bullet() -> ImpactParams {
        ImpactParams::new(ShaderHandle(1), Vec3::new(0.0, 0.0, 32.0), Vec3::z(), 4.0)
            .with_color(1.0, 1.0, 1.0, 1.0)
    }

    #[test]
    fn test_single_mark_lifecycle() {
        let mut marks = session(8);
        let world = StubWorld { pieces: 1 };
        let mut sink = RecordingSink::new();
        let total = marks.settings().mark_time;

        let report = marks
            .impact_mark(&bullet(), &world, &mut sink, 1000)
            .expect("impact succeeds");
        assert_eq!(report.marks_stored, 1);
        assert_eq!(marks.active_count(), 1);

        marks.add_marks(&mut sink, 1000 + total - 1).expect("fade pass succeeds");
        assert_eq!(sink.count(PolyPass::Scene), 1);
        let faded = &sink.polys[0].verts;
        assert_eq!(faded.len(), 4);
        assert!(faded.iter().all(|v| v.modulate[0] < 255 && v.modulate[3] == 255));

        sink.clear();
        marks.add_marks(&mut sink, 1000 + total + 1).expect("fade pass succeeds");
        assert!(sink.polys.is_empty());
        assert_eq!(marks.active_count(), 0);
        assert_eq!(marks.pool().free_count(), 8);
    }

    #[test]
    fn test_one_more_than_capacity_evicts() {
        let mut marks = session(8);
        let world = StubWorld { pieces: 1 };
        let mut sink = RecordingSink::new();

        for time in 0..8 {
            let report = marks
                .impact_mark(&bullet(), &world, &mut sink, time)
                .expect("impact succeeds");
            assert_eq!(report.marks_evicted, 0);
        }
        let report = marks
            .impact_mark(&bullet(), &world, &mut sink, 8)
            .expect("impact succeeds");

        assert_eq!(report.marks_evicted, 1);
        assert_eq!(marks.active_count(), 8);
        let oldest = marks.pool().tail().expect("pool not empty");
        assert_eq!(marks.pool().get(oldest).time, 1);
    }

    #[test]
    fn test_shotgun_blast_evicted_as_a_unit() {
        let mut marks = session(8);
        let mut sink = RecordingSink::new();

        // five pellets land in the same frame
        let pellets = StubWorld { pieces: 5 };
        marks.impact_mark(&bullet(), &pellets, &mut sink, 100).expect("impact succeeds");
        let single = StubWorld { pieces: 1 };
        for time in [200, 300, 400] {
            marks.impact_mark(&bullet(), &single, &mut sink, time).expect("impact succeeds");
        }
        assert_eq!(marks.pool().free_count(), 0);

        let report = marks
            .impact_mark(&bullet(), &single, &mut sink, 500)
            .expect("impact succeeds");
        assert_eq!(report.marks_evicted, 5);
        assert_eq!(marks.active_count(), 4);
        assert!(marks.pool().iter_active().all(|(_, mark)| mark.time >= 200));
    }

    #[test]
    fn test_temporary_shadows_leave_pool_untouched() {
        let mut marks = session(8);
        let world = StubWorld { pieces: 3 };
        let mut sink = RecordingSink::new();
        marks.impact_mark(&bullet(), &world, &mut sink, 0).expect("impact succeeds");
        let before = marks.active_count();

        let shadow = bullet().with_flags(ImpactFlags::TEMPORARY | ImpactFlags::ALPHA_FADE);
        for frame in 1..=10 {
            sink.clear();
            marks.impact_mark(&shadow, &world, &mut sink, frame * 16).expect("impact succeeds");
            assert_eq!(sink.count(PolyPass::Transient), 3);
            assert_eq!(marks.active_count(), before);
        }
        assert_eq!(marks.stats().temporary_submitted, 30);
    }

    #[test]
    fn test_restart_clears_previous_session() {
        let mut marks = session(8);
        let mut clock = FrameClock::new();
        let world = StubWorld { pieces: 4 };
        let mut sink = RecordingSink::new();
        let debug_hit = bullet().with_flags(ImpactFlags::DEBUG | ImpactFlags::ENERGY);
        let now = clock.advance(5_000);
        marks.impact_mark(&debug_hit, &world, &mut sink, now).expect("impact succeeds");
        assert!(marks.last_impact_origin().is_some());

        // new level: pool and clock both start over
        marks.init_mark_polys();
        marks.init_mark_polys();
        clock.reset();

        assert_eq!(marks.active_count(), 0);
        assert_eq!(marks.pool().free_count(), 8);
        assert_eq!(marks.stats().total_created, 0);
        assert_eq!(marks.last_impact_origin(), None);

        let now = clock.advance(10);
        assert_eq!(now, 10);
        marks.add_marks(&mut sink, now).expect("fade pass succeeds");
        assert_eq!(sink.count(PolyPass::Scene), 0);

        marks.impact_mark(&bullet(), &StubWorld { pieces: 1 }, &mut sink, now).expect("impact succeeds");
        sink.clear();
        let report = marks.add_marks(&mut sink, clock.advance(16)).expect("fade pass succeeds");
        assert_eq!(report.rendered, 1);
        assert_eq!(report.expired, 0);
    }

    #[test]
    fn test_long_session_keeps_pool_consistent() {
        let mut marks = MarkSystem::new(
            MarkSettings::default()
                .with_max_mark_polys(32)
                .with_times(2_000, 500),
        )
        .expect("valid settings");
        let mut clock = FrameClock::new();
        let mut sink = RecordingSink::new();
        let mut rng = StdRng::seed_from_u64(0x9e37_79b9);

        for _ in 0..600 {
            let now = clock.advance(16);

            let pieces = rng.gen_range(0..4);
            if pieces > 0 {
                let world = StubWorld { pieces };
                marks.impact_mark(&bullet(), &world, &mut sink, now).expect("impact succeeds");
            }

            sink.clear();
            let report = marks.add_marks(&mut sink, now).expect("fade pass succeeds");

            let pool = marks.pool();
            assert_eq!(pool.active_count() + pool.free_count(), pool.capacity());
            assert_eq!(report.rendered, pool.active_count());
            let times: Vec<i64> = pool.iter_active().map(|(_, mark)| mark.time).collect();
            assert!(times.windows(2).all(|pair| pair[0] >= pair[1]));
            assert!(times.iter().all(|&time| now - time <= 2_000));
        }
    }
}
