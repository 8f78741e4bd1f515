// g_config.rs -- monster tuning read from console variables
//
// Copyright (C) 1997-2001 Id Software, Inc.
// Licensed under the GNU General Public License v2 or later.

use thiserror::Error;

use crate::game_import::GameImport;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("cvar {name} has non-numeric value \"{value}\"")]
    Invalid { name: &'static str, value: String },
    #[error("cvar {name} = {value} is outside {min}..={max}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

/// Tuning for the step physics, steering and range arbitration.
///
/// The defaults are the classic values; most were found by playtesting,
/// so maps and mods may calibrate them.
#[derive(Debug, Clone, PartialEq)]
pub struct MonsterConfig {
    pub skill: i32,

    /// Highest ledge a walking monster climbs without jumping.
    pub stepsize: f32,
    /// Minimum plane normal z for a surface to count as floor.
    pub walkable_normal_z: f32,
    /// Facing test for upward jumps: dot(wall normal, forward) must be below this.
    pub jump_face_dot: f32,
    pub jump_face_trace: f32,
    /// How far ahead the jump-down shortcut probes.
    pub jump_probe_distance: f32,
    /// A landing must be at least this far below the walking height.
    pub jump_land_margin: f32,

    pub grenade_radius: f32,
    pub laser_length: f32,
    pub laser_sample_step: f32,

    pub flyer_altitude_step: f32,
    pub flyer_high_band: f32,
    pub flyer_low_band: f32,

    pub range_pause_min_cooldown: f32,
    pub range_pause_inner_cooldown: f32,
    pub range_pause_band_cooldown: f32,
    pub range_reeval_delay: f32,

    pub follow_run_range: f32,
    pub follow_stand_range: f32,

    pub corpse_fade: bool,
    pub corpse_fadetime: f32,
    /// Lets monsters with a jump animation use it.
    pub monsterjump: bool,
}

impl Default for MonsterConfig {
    fn default() -> Self {
        Self {
            skill: 1,
            stepsize: 18.0,
            walkable_normal_z: 0.9,
            jump_face_dot: -0.95,
            jump_face_trace: 1024.0,
            jump_probe_distance: 48.0,
            jump_land_margin: 16.0,
            grenade_radius: 128.0,
            laser_length: 2048.0,
            laser_sample_step: 16.0,
            flyer_altitude_step: 8.0,
            flyer_high_band: 40.0,
            flyer_low_band: 30.0,
            range_pause_min_cooldown: 0.5,
            range_pause_inner_cooldown: 1.0,
            range_pause_band_cooldown: 0.2,
            range_reeval_delay: 0.5,
            follow_run_range: 256.0,
            follow_stand_range: 128.0,
            corpse_fade: false,
            corpse_fadetime: 20.0,
            monsterjump: true,
        }
    }
}

fn cvar_value(gi: &dyn GameImport, name: &'static str) -> Result<Option<f32>, ConfigError> {
    match gi.cvar(name) {
        None => Ok(None),
        Some(s) => match s.trim().parse::<f32>() {
            // nan and inf parse, but no tuning value can use them
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(ConfigError::Invalid { name, value: s }),
        },
    }
}

fn cvar_ranged(
    gi: &dyn GameImport,
    name: &'static str,
    min: f32,
    max: f32,
) -> Result<Option<f32>, ConfigError> {
    match cvar_value(gi, name)? {
        Some(v) if v < min || v > max => Err(ConfigError::OutOfRange { name, value: v, min, max }),
        other => Ok(other),
    }
}

impl MonsterConfig {
    /// Reads `skill`, `corpse_fade`, `corpse_fadetime`, `monsterjump`,
    /// `m_stepsize` and `m_grenade_radius`. Missing cvars keep their default.
    pub fn from_cvars(gi: &dyn GameImport) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(v) = cvar_value(gi, "skill")? {
            // the engine clamps skill the same way
            cfg.skill = (v.floor() as i32).clamp(0, 3);
        }
        if let Some(v) = cvar_value(gi, "corpse_fade")? {
            cfg.corpse_fade = v != 0.0;
        }
        if let Some(v) = cvar_ranged(gi, "corpse_fadetime", 0.0, 3600.0)? {
            cfg.corpse_fadetime = v;
        }
        if let Some(v) = cvar_value(gi, "monsterjump")? {
            cfg.monsterjump = v != 0.0;
        }
        if let Some(v) = cvar_ranged(gi, "m_stepsize", 1.0, 64.0)? {
            cfg.stepsize = v;
        }
        if let Some(v) = cvar_ranged(gi, "m_grenade_radius", 0.0, 1024.0)? {
            cfg.grenade_radius = v;
        }

        Ok(cfg)
    }

    /// `from_cvars`, falling back to the defaults when a value is bad.
    pub fn load(gi: &dyn GameImport) -> Self {
        match Self::from_cvars(gi) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("monster config: {e}, using defaults");
                gi.dprintf(&format!("{e}\n"));
                Self::default()
            }
        }
    }
}
