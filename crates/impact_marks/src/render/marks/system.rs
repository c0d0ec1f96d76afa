//! Mark System
//!
//! Per-session context tying the pool to its settings. Gameplay code calls
//! [`MarkSystem::impact_mark`] when something hits a surface and the frame loop
//! calls [`MarkSystem::add_marks`] once per rendered frame.

use super::data_structures::MarkStats;
use super::pool::MarkPool;
use crate::config::{ConfigError, MarkSettings};
use crate::foundation::math::Vec3;
use crate::render::fragments::{FragmentBuffer, MAX_MARK_FRAGMENTS, MAX_MARK_POINTS};

/// Owner of all persistent marks for one session
#[derive(Debug)]
pub struct MarkSystem {
    pub(super) pool: MarkPool,
    pub(super) settings: MarkSettings,
    pub(super) stats: MarkStats,
    pub(super) last_impact_origin: Option<Vec3>,
    /// Scratch space reused by every impact
    pub(super) fragments: FragmentBuffer,
}

impl MarkSystem {
    /// Create a mark system with an empty pool sized from `settings`
    pub fn new(settings: MarkSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        log::info!(
            "Creating MarkSystem: {} marks, {} ms lifetime, {} ms fade",
            settings.max_mark_polys,
            settings.mark_time,
            settings.mark_fade_time
        );

        Ok(Self {
            pool: MarkPool::new(settings.max_mark_polys),
            settings,
            stats: MarkStats::default(),
            last_impact_origin: None,
            fragments: FragmentBuffer::with_limits(MAX_MARK_POINTS, MAX_MARK_FRAGMENTS),
        })
    }

    /// Drop every mark and start a fresh session
    ///
    /// Called at startup and on level or match restarts.
    pub fn init_mark_polys(&mut self) {
        self.pool.init();
        self.stats = MarkStats::default();
        self.last_impact_origin = None;
    }

    /// Replace the settings
    ///
    /// Lifetime, fade and enable changes apply from the next call. A new pool
    /// capacity rebuilds the pool, dropping every mark.
    pub fn apply_settings(&mut self, settings: MarkSettings) -> Result<(), ConfigError> {
        settings.validate()?;
        if settings.max_mark_polys != self.pool.capacity() {
            log::info!(
                "Mark pool capacity changed {} -> {}, rebuilding",
                self.pool.capacity(),
                settings.max_mark_polys
            );
            self.pool = MarkPool::new(settings.max_mark_polys);
        }
        self.settings = settings;
        Ok(())
    }

    /// Current settings
    pub fn settings(&self) -> &MarkSettings {
        &self.settings
    }

    /// The underlying pool
    pub fn pool(&self) -> &MarkPool {
        &self.pool
    }

    /// Session counters
    pub fn stats(&self) -> &MarkStats {
        &self.stats
    }

    /// Origin of the most recent debug-flagged impact
    pub fn last_impact_origin(&self) -> Option<Vec3> {
        self.last_impact_origin
    }

    /// Number of marks currently stored
    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }
}
