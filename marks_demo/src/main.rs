//! Impact marks demo
//!
//! Runs a headless firefight over a tiled floor: steady rifle fire, periodic
//! shotgun blasts, plasma bursts and a per-frame shadow. Prints pool
//! statistics once per simulated second.
//!
//! Usage: `marks_demo [settings.toml|settings.ron]`

mod floor;

use floor::TiledFloor;
use impact_marks::foundation::logging;
use impact_marks::foundation::math::utils::deg_to_rad;
use impact_marks::prelude::*;
use rand::prelude::*;

const FRAME_MS: Millis = 16;
const RUN_MS: Millis = 15_000;

/// Sink that only tallies what the renderer would have drawn
#[derive(Default)]
struct CountingSink {
    scene_polys: usize,
    transient_polys: usize,
    vertices: usize,
}

impl PolySink for CountingSink {
    fn add_poly(&mut self, _shader: ShaderHandle, verts: &[PolyVert], pass: PolyPass) {
        match pass {
            PolyPass::Scene => self.scene_polys += 1,
            PolyPass::Transient => self.transient_polys += 1,
        }
        self.vertices += verts.len();
    }
}

/// Fixed seed so runs are repeatable
const RNG_SEED: u64 = 0x1234_5678;

fn random_floor_point(rng: &mut StdRng, height: f32) -> Vec3 {
    Vec3::new(rng.gen_range(0.0..128.0), rng.gen_range(0.0..128.0), height)
}

fn load_settings() -> Result<MarkSettings, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading mark settings from {}", path);
            MarkSettings::load_from_file(&path)
        }
        None => Ok(MarkSettings::default().with_max_mark_polys(256)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("info");
    log::info!("Starting impact marks demo");

    let settings = load_settings()?;
    let mut marks = MarkSystem::new(settings)?;
    marks.init_mark_polys();

    let floor = TiledFloor::new(16.0);
    let mut clock = FrameClock::new();
    let mut rng = StdRng::seed_from_u64(RNG_SEED);

    let bullet_shader = ShaderHandle(1);
    let burn_shader = ShaderHandle(2);
    let shadow_shader = ShaderHandle(3);

    while clock.now() < RUN_MS {
        let now = clock.advance(FRAME_MS);
        let mut sink = CountingSink::default();

        // one rifle round every 250 ms
        if now % 250 < FRAME_MS {
            let origin = random_floor_point(&mut rng, 0.5);
            let hit = ImpactParams::new(bullet_shader, origin, Vec3::z(), 4.0)
                .with_orientation(deg_to_rad(rng.gen_range(0.0..360.0)))
                .with_flags(ImpactFlags::DEBUG);
            marks.impact_mark(&hit, &floor, &mut sink, now)?;
        }

        // shotgun blast every 2 s, all pellets share one timestamp
        if now % 2_000 < FRAME_MS {
            let center = random_floor_point(&mut rng, 0.5);
            for _ in 0..8 {
                let offset = Vec3::new(rng.gen_range(-6.0..6.0), rng.gen_range(-6.0..6.0), 0.0);
                let pellet = ImpactParams::new(bullet_shader, center + offset, Vec3::z(), 3.0)
                    .with_orientation(deg_to_rad(rng.gen_range(0.0..360.0)));
                marks.impact_mark(&pellet, &floor, &mut sink, now)?;
            }
        }

        // plasma burn every 3 s
        if now % 3_000 < FRAME_MS {
            let origin = random_floor_point(&mut rng, 0.5);
            let burn = ImpactParams::new(burn_shader, origin, Vec3::z(), 16.0)
                .with_color(0.6, 0.8, 1.0, 1.0)
                .with_flags(ImpactFlags::ENERGY);
            marks.impact_mark(&burn, &floor, &mut sink, now)?;
        }

        // player shadow, redrawn every frame and never stored
        let shadow = ImpactParams::new(shadow_shader, Vec3::new(64.0, 64.0, 1.0), Vec3::z(), 24.0)
            .with_color(1.0, 1.0, 1.0, 0.5)
            .with_flags(ImpactFlags::TEMPORARY | ImpactFlags::ALPHA_FADE);
        marks.impact_mark(&shadow, &floor, &mut sink, now)?;

        let fade = marks.add_marks(&mut sink, now)?;

        if now % 1_000 < FRAME_MS {
            let stats = marks.stats();
            log::info!(
                "t={:>5}ms active={:>4} drawn={:>4} (+{} transient, {} verts) expired={} created={} evicted={} in {} batches",
                now,
                marks.active_count(),
                sink.scene_polys,
                sink.transient_polys,
                sink.vertices,
                fade.expired,
                stats.total_created,
                stats.total_evicted,
                stats.eviction_batches
            );
        }
    }

    if let Some(origin) = marks.last_impact_origin() {
        log::info!("Last debug impact at {:.1} {:.1} {:.1}", origin.x, origin.y, origin.z);
    }
    log::info!("Demo finished after {} frames", clock.frame_count());
    Ok(())
}
