// game.rs -- Game state shared with the host scheduler
// Converted from: myq2-original/game/game.h + g_local.h (level_locals_t)
//
// Copyright (C) 1997-2001 Id Software, Inc.
// Licensed under the GNU General Public License v2 or later.

use std::collections::HashMap;

use myq2_common::common::{crand_from, frand_from, rand_i32_from};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::g_combat::Combat;
use crate::g_config::MonsterConfig;
use crate::g_local::{EntRef, Edict};
use crate::game_import::GameImport;

// edict->svflags
pub const SVF_NOCLIENT: i32 = 0x00000001;
pub const SVF_DEADMONSTER: i32 = 0x00000002;
pub const SVF_MONSTER: i32 = 0x00000004;

// edict->solid values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum Solid {
    #[default]
    Not = 0,
    Trigger,
    Bbox,
    Bsp,
}

// gi.box_edicts() can return a list of either solid or trigger entities
pub const AREA_SOLID: i32 = 1;
pub const AREA_TRIGGERS: i32 = 2;

/// Level state (cleared on each map change).
#[derive(Debug, Clone, Default)]
pub struct LevelLocals {
    pub framenum: i32,
    pub time: f32,

    /// the one client monsters look for this frame
    pub sight_client: EntRef,
}

// ============================================================
// Sound registry
// ============================================================

/// Sound indexes resolved once at precache time.
///
/// Monster modules look their sounds up by path; a path that was never
/// precached resolves to 0, which the host treats as silence.
#[derive(Debug, Clone, Default)]
pub struct SoundRegistry {
    indexes: HashMap<&'static str, i32>,
}

impl SoundRegistry {
    pub fn precache(&mut self, gi: &dyn GameImport, names: &[&'static str]) {
        for &name in names {
            if !self.indexes.contains_key(name) {
                let index = gi.soundindex(name);
                self.indexes.insert(name, index);
            }
        }
    }

    pub fn index(&self, name: &str) -> i32 {
        self.indexes.get(name).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}

// ============================================================
// Game context
// ============================================================

/// Everything a think function can reach: the entity arena, the level
/// clock, tuning, precached sounds and the host services.
pub struct GameContext<'a> {
    pub gi: &'a dyn GameImport,
    pub combat: &'a dyn Combat,
    pub edicts: Vec<Edict>,
    pub maxclients: usize,
    pub level: LevelLocals,
    pub config: MonsterConfig,
    pub sounds: SoundRegistry,
    pub rng: StdRng,

    // M_CheckBottom statistics
    pub c_yes: u32,
    pub c_no: u32,
}

impl<'a> GameContext<'a> {
    /// Creates a level with the world in slot 0 and `maxclients` empty
    /// client slots after it.
    pub fn new(
        gi: &'a dyn GameImport,
        combat: &'a dyn Combat,
        maxclients: usize,
        config: MonsterConfig,
        seed: u64,
    ) -> Self {
        let mut edicts = vec![Edict::default(); maxclients + 1];
        for (i, e) in edicts.iter_mut().enumerate() {
            e.s.number = i as i32;
        }
        let world = &mut edicts[0];
        world.inuse = true;
        world.classname = "worldspawn".to_string();
        world.solid = Solid::Bsp;

        Self {
            gi,
            combat,
            edicts,
            maxclients,
            level: LevelLocals::default(),
            config,
            sounds: SoundRegistry::default(),
            rng: StdRng::seed_from_u64(seed),
            c_yes: 0,
            c_no: 0,
        }
    }

    pub fn skill(&self) -> i32 {
        self.config.skill
    }

    /// random() -- float in [0, 1]
    pub fn random(&mut self) -> f32 {
        frand_from(&mut self.rng)
    }

    /// crandom() -- float in [-1, 1]
    pub fn crandom(&mut self) -> f32 {
        crand_from(&mut self.rng)
    }

    /// rand() -- integer in [0, 32767]
    pub fn rand(&mut self) -> i32 {
        rand_i32_from(&mut self.rng)
    }

    // ============================================================
    // Entity arena
    // ============================================================

    pub fn entref(&self, idx: usize) -> EntRef {
        match self.edicts.get(idx) {
            Some(e) => EntRef { index: idx as i32, generation: e.generation },
            None => EntRef::NONE,
        }
    }

    /// Resolves a handle to a live entity index.
    pub fn resolve(&self, r: EntRef) -> Option<usize> {
        if r.index < 0 {
            return None;
        }
        let idx = r.index as usize;
        match self.edicts.get(idx) {
            Some(e) if e.inuse && e.generation == r.generation => Some(idx),
            _ => None,
        }
    }

    pub fn enemy_of(&self, idx: usize) -> Option<usize> {
        self.resolve(self.edicts[idx].enemy)
    }

    pub fn goal_of(&self, idx: usize) -> Option<usize> {
        self.resolve(self.edicts[idx].goalentity)
    }

    /// G_Spawn -- first free slot after the clients, or a new one at the end.
    pub fn spawn(&mut self) -> usize {
        let first = self.maxclients + 1;
        let idx = match (first..self.edicts.len()).find(|&i| !self.edicts[i].inuse) {
            Some(i) => i,
            None => {
                self.edicts.push(Edict::default());
                self.edicts.len() - 1
            }
        };
        let generation = self.edicts[idx].generation;
        self.edicts[idx] = Edict {
            inuse: true,
            generation,
            ..Default::default()
        };
        self.edicts[idx].s.number = idx as i32;
        idx
    }

    /// G_FreeEdict -- releases the slot and invalidates every handle to it.
    pub fn free_edict(&mut self, idx: usize) {
        if idx <= self.maxclients || idx >= self.edicts.len() {
            return;
        }
        self.gi.unlinkentity(idx);
        let generation = self.edicts[idx].generation.wrapping_add(1);
        self.edicts[idx] = Edict {
            generation,
            ..Default::default()
        };
        self.edicts[idx].s.number = idx as i32;
    }
}
