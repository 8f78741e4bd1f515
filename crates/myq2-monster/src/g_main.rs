// g_main.rs -- spawn dispatch and the per-frame think loop
// Converted from: myq2-original/game/g_main.c + g_spawn.c + g_phys.c (SV_RunThink)
//
// Copyright (C) 1997-2001 Id Software, Inc.
// Licensed under the GNU General Public License v2 or later.

use crate::g_ai::ai_set_sight_client;
use crate::g_local::*;
use crate::g_monster::m_check_ground;
use crate::m_flyer::sp_monster_flyer;
use crate::m_infantry::sp_monster_infantry;
use crate::m_tank::sp_monster_tank;

// ============================================================
// Spawn table
// ============================================================

pub type SpawnFn = fn(&mut GameContext<'_>, usize);

#[derive(Clone, Copy)]
pub struct SpawnEntry {
    pub name: &'static str,
    pub spawn: SpawnFn,
}

pub static SPAWNS: &[SpawnEntry] = &[
    SpawnEntry { name: "monster_tank", spawn: sp_monster_tank },
    SpawnEntry { name: "monster_tank_commander", spawn: sp_monster_tank },
    SpawnEntry { name: "monster_infantry", spawn: sp_monster_infantry },
    SpawnEntry { name: "monster_flyer", spawn: sp_monster_flyer },
    SpawnEntry { name: "monster_kamikaze", spawn: sp_monster_flyer },
];

/// ED_CallSpawn -- runs the spawn function for the entity's classname.
/// Returns false if there isn't one.
pub fn ed_call_spawn(ctx: &mut GameContext, ent_idx: usize) -> bool {
    let classname = ctx.edicts[ent_idx].classname.clone();

    if classname.is_empty() {
        ctx.gi.dprintf("ED_CallSpawn: NULL classname\n");
        return false;
    }

    match SPAWNS.iter().find(|s| s.name == classname) {
        Some(entry) => {
            (entry.spawn)(ctx, ent_idx);
            true
        }
        None => {
            ctx.gi.dprintf(&format!("{} doesn't have a spawn function\n", classname));
            false
        }
    }
}

/// Spawns a monster of `classname` at `origin` facing `yaw`.
pub fn spawn_monster(ctx: &mut GameContext, classname: &str, origin: Vec3, yaw: f32) -> Option<usize> {
    let idx = ctx.spawn();
    {
        let ent = &mut ctx.edicts[idx];
        ent.classname = classname.to_string();
        ent.s.origin = origin;
        ent.s.angles[YAW] = yaw;
    }
    if ed_call_spawn(ctx, idx) {
        Some(idx)
    } else {
        ctx.free_edict(idx);
        None
    }
}

// ============================================================
// Frame loop
// ============================================================

/// SV_RunThink -- runs the entity's think if it is due. Returns false if
/// the think freed it.
pub fn g_run_think(ctx: &mut GameContext, ent_idx: usize) -> bool {
    let ent = &mut ctx.edicts[ent_idx];
    let thinktime = ent.nextthink;
    if thinktime <= 0.0 {
        return true;
    }
    if thinktime > ctx.level.time + 0.001 {
        return true;
    }

    ent.nextthink = 0.0;
    let Some(think) = ent.think else {
        let msg = format!("NULL ent->think for {}\n", ent.classname);
        ctx.gi.dprintf(&msg);
        return true;
    };
    think(ctx, ent_idx);
    ctx.edicts[ent_idx].inuse
}

/// G_RunFrame -- advances the level clock one tick and lets every entity
/// think. Entities spawned during the frame wait for the next one.
pub fn g_run_frame(ctx: &mut GameContext) {
    ctx.level.framenum += 1;
    ctx.level.time = ctx.level.framenum as f32 * FRAMETIME;

    // choose a client for monsters to target this frame
    ai_set_sight_client(ctx);

    let num_edicts = ctx.edicts.len();
    for i in 0..num_edicts {
        if !ctx.edicts[i].inuse {
            continue;
        }

        ctx.edicts[i].s.old_origin = ctx.edicts[i].s.origin;

        // if the ground entity moved, make sure we are still on it
        if let Some(ground) = ctx.resolve(ctx.edicts[i].groundentity) {
            let ent = &ctx.edicts[i];
            if ctx.edicts[ground].linkcount != ent.groundentity_linkcount {
                let walker = !ent.flags.intersects(FL_SWIM | FL_FLY);
                ctx.edicts[i].groundentity = EntRef::NONE;
                if walker && ctx.edicts[i].svflags & SVF_MONSTER != 0 {
                    m_check_ground(ctx, i);
                }
            }
        }

        // clients are driven by their own commands
        if i > 0 && i <= ctx.maxclients {
            continue;
        }

        g_run_think(ctx, i);
    }
}
