//! Mark fading
//!
//! Once per frame every stored mark is aged: expired marks are freed, energy
//! marks dim along their own fixed curve, every mark fades out over the last
//! `mark_fade_time` milliseconds of its life, and the survivors are submitted
//! to the scene.
//!
//! The energy curve and the general fade compound for energy marks that fade
//! by color, so energy marks go dark noticeably faster near the end.

use super::data_structures::{FadeReport, MarkError, MarkPoly};
use super::system::MarkSystem;
use crate::foundation::time::Millis;
use crate::render::poly::{PolyPass, PolySink};

/// Milliseconds over which the energy curve falls from its peak to zero
pub const ENERGY_FADE_TIME: f64 = 3000.0;

/// Starting value of the energy curve; it only shows once below 255
const ENERGY_FADE_PEAK: f64 = 450.0;

/// Energy curve intensity for a mark of the given age
///
/// `None` while the curve is still above full brightness.
pub fn energy_fade(age: Millis) -> Option<u8> {
    let fade = (ENERGY_FADE_PEAK - ENERGY_FADE_PEAK * (age as f64 / ENERGY_FADE_TIME)) as i64;
    (fade < 255).then(|| fade.max(0) as u8)
}

/// End-of-life fade for a mark with `remaining` milliseconds left
///
/// `None` until the mark enters the fade window, then a linear ramp from 255
/// down to 0 at expiry.
pub fn time_fade(remaining: Millis, fade_time: Millis) -> Option<u8> {
    if fade_time <= 0 || remaining >= fade_time {
        return None;
    }
    let fade = 255 * i128::from(remaining) / i128::from(fade_time);
    Some(fade.clamp(0, 255) as u8)
}

fn scaled_channel(channel: f32, fade: u8) -> u8 {
    (channel * f32::from(fade)).clamp(0.0, 255.0) as u8
}

fn apply_energy_fade(mark: &mut MarkPoly, now: Millis) {
    let Some(fade) = energy_fade(mark.age(now)) else {
        return;
    };
    // red at zero means the curve already bottomed out
    if mark.verts().first().map_or(true, |vert| vert.modulate[0] == 0) {
        return;
    }

    let color = mark.color;
    for vert in mark.verts_mut() {
        for channel in 0..3 {
            vert.modulate[channel] = scaled_channel(color[channel], fade);
        }
    }
}

fn apply_time_fade(mark: &mut MarkPoly, now: Millis, mark_time: Millis, fade_time: Millis) {
    let remaining = mark.time.saturating_add(mark_time) - now;
    let Some(fade) = time_fade(remaining, fade_time) else {
        return;
    };

    let color = mark.color;
    let (alpha_fade, energy) = (mark.alpha_fade, mark.energy);
    for vert in mark.verts_mut() {
        if alpha_fade {
            vert.modulate[3] = fade;
        } else if energy {
            for channel in &mut vert.modulate[..3] {
                *channel = (u16::from(*channel) * u16::from(fade) / 255) as u8;
            }
        } else {
            for channel in 0..3 {
                vert.modulate[channel] = scaled_channel(color[channel], fade);
            }
        }
    }
}

impl MarkSystem {
    /// Age, fade and draw every stored mark
    ///
    /// Call once per rendered frame with the frame's time. Marks past their
    /// lifetime are freed before they are drawn, so an expired mark is never
    /// submitted.
    pub fn add_marks(&mut self, sink: &mut dyn PolySink, now: Millis) -> Result<FadeReport, MarkError> {
        let mut report = FadeReport::default();
        if !self.settings.enabled {
            return Ok(report);
        }

        let mark_time = self.settings.mark_time;
        let fade_time = self.settings.mark_fade_time;

        let mut cursor = self.pool.head();
        while let Some(id) = cursor {
            // grab next now, the mark may be freed below
            cursor = self.pool.next_of(id);

            if now > self.pool.get(id).time.saturating_add(mark_time) {
                self.pool.free(id)?;
                report.expired += 1;
                continue;
            }

            let mark = self.pool.get_mut(id);
            if mark.energy {
                apply_energy_fade(mark, now);
            }
            apply_time_fade(mark, now, mark_time, fade_time);

            sink.add_poly(mark.shader, mark.verts(), PolyPass::Scene);
            report.rendered += 1;
        }

        if report.expired > 0 {
            log::trace!("Expired {} marks at time {}", report.expired, now);
        }
        self.stats.total_expired += report.expired as u64;
        Ok(report)
    }
}
