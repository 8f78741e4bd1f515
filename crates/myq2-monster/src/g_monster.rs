// g_monster.rs -- Monster utility functions, weapons and the frame executor
// Converted from: myq2-original/game/g_monster.c
//
// Copyright (C) 1997-2001 Id Software, Inc.
// Licensed under the GNU General Public License v2 or later.

use crate::g_ai::{ai_charge, ai_move, ai_run, ai_stand, ai_turn, ai_walk, monster_stand, monster_walk};
use crate::g_local::*;
use crate::g_utils::{g_project_source, link_entity, normal_to_world, position_to_world};
use crate::m_flash::monster_flash_offset;
use crate::m_move::m_walkmove;

// ============================================================
// Monster weapons
// ============================================================

/// World-space muzzle position for one of the monster's flash numbers.
pub fn monster_flash_origin(ctx: &GameContext, self_idx: usize, flash_number: i32) -> Vec3 {
    let ent = &ctx.edicts[self_idx];
    let (forward, right, _) = angle_vectors_tuple(&ent.s.angles);
    g_project_source(&ent.s.origin, &monster_flash_offset(flash_number), &forward, &right)
}

#[allow(clippy::too_many_arguments)]
pub fn monster_fire_bullet(
    ctx: &mut GameContext,
    self_idx: usize,
    start: &Vec3,
    dir: &Vec3,
    damage: i32,
    kick: i32,
    hspread: i32,
    vspread: i32,
    flashtype: i32,
) {
    ctx.combat.fire_bullet(self_idx, start, dir, damage, kick, hspread, vspread);
    ctx.gi.muzzleflash2(self_idx, flashtype, start);
}

#[allow(clippy::too_many_arguments)]
pub fn monster_fire_blaster(
    ctx: &mut GameContext,
    self_idx: usize,
    start: &Vec3,
    dir: &Vec3,
    damage: i32,
    speed: i32,
    flashtype: i32,
    effect: u32,
) {
    ctx.combat.fire_blaster(self_idx, start, dir, damage, speed, effect);
    ctx.gi.muzzleflash2(self_idx, flashtype, start);
}

pub fn monster_fire_grenade(
    ctx: &mut GameContext,
    self_idx: usize,
    start: &Vec3,
    aimdir: &Vec3,
    damage: i32,
    speed: i32,
    flashtype: i32,
) {
    ctx.combat.fire_grenade(self_idx, start, aimdir, damage, speed, 2.5, (damage + 40) as f32);
    ctx.gi.muzzleflash2(self_idx, flashtype, start);
}

pub fn monster_fire_rocket(
    ctx: &mut GameContext,
    self_idx: usize,
    start: &Vec3,
    dir: &Vec3,
    damage: i32,
    speed: i32,
    flashtype: i32,
) {
    ctx.combat.fire_rocket(self_idx, start, dir, damage, speed, (damage + 20) as f32, damage);
    ctx.gi.muzzleflash2(self_idx, flashtype, start);
}

/// fire_hit -- a melee swing at the enemy. `aim` is (reach, right offset,
/// up offset) in the attacker's frame. Returns true if something living
/// was struck.
pub fn fire_hit(ctx: &mut GameContext, self_idx: usize, aim: &Vec3, damage: i32, kick: i32) -> bool {
    let enemy = match ctx.enemy_of(self_idx) {
        Some(e) => e,
        None => return false,
    };

    // see if enemy is in range
    let dir = vector_subtract(&ctx.edicts[enemy].s.origin, &ctx.edicts[self_idx].s.origin);
    let mut range = vector_length(&dir);
    if range > aim[0] {
        return false;
    }

    let mut aim = *aim;
    {
        let me = &ctx.edicts[self_idx];
        let them = &ctx.edicts[enemy];
        if aim[1] > me.mins[0] && aim[1] < me.maxs[0] {
            // straight on hit - back the range up to the edge of their bbox
            range -= them.maxs[0];
        } else if aim[1] < 0.0 {
            // side hit - adjust the "right" value out to the edge of their bbox
            aim[1] = them.mins[0];
        } else {
            aim[1] = them.maxs[0];
        }
    }

    let origin = ctx.edicts[self_idx].s.origin;
    let point = vector_ma(&origin, range, &dir);
    let tr = ctx.gi.trace(&origin, &VEC3_ORIGIN, &VEC3_ORIGIN, &point, self_idx as i32, MASK_SHOT);

    let mut victim = tr.ent().unwrap_or(0);
    if tr.fraction < 1.0 {
        let hit = &ctx.edicts[victim];
        if hit.takedamage == DAMAGE_NO {
            return false;
        }
        // if it will hit any client/monster then hit the one we wanted to hit
        if hit.is_monster() || hit.is_client() {
            victim = enemy;
        }
    }

    let (forward, right, up) = angle_vectors_tuple(&ctx.edicts[self_idx].s.angles);
    let mut point = vector_ma(&origin, range, &forward);
    point = vector_ma(&point, aim[1], &right);
    point = vector_ma(&point, aim[2], &up);
    let dir = vector_subtract(&point, &ctx.edicts[enemy].s.origin);

    // do the damage
    ctx.combat.damage(victim, self_idx, &dir, &point, damage, kick / 2);

    let hit = &ctx.edicts[victim];
    if !hit.is_monster() && !hit.is_client() {
        return false;
    }

    // do our special form of knockback here
    let them = &mut ctx.edicts[enemy];
    let mut v = vector_ma(&them.absmin, 0.5, &them.size);
    v = vector_subtract(&v, &point);
    vector_normalize(&mut v);
    them.velocity = vector_ma(&them.velocity, kick as f32, &v);
    if them.velocity[2] > 0.0 {
        them.groundentity = EntRef::NONE;
    }
    true
}

/// Temp entity placed relative to the monster's own frame (x forward,
/// y left, z up).
pub fn m_spawn_effect(ctx: &mut GameContext, self_idx: usize, te_type: i32, local_pos: &Vec3, local_normal: &Vec3) {
    let pos = position_to_world(ctx, self_idx, local_pos);
    let dir = normal_to_world(ctx, self_idx, local_normal);
    ctx.gi.temp_entity(te_type, &pos, Some(&dir), Multicast::Pvs);
}

// ============================================================
// Ground and water
// ============================================================

pub fn m_check_ground(ctx: &mut GameContext, ent_idx: usize) {
    let ent = &ctx.edicts[ent_idx];

    if ent.flags.intersects(FL_SWIM | FL_FLY) {
        return;
    }

    if ent.velocity[2] > 100.0 {
        ctx.edicts[ent_idx].groundentity = EntRef::NONE;
        return;
    }

    // if the hull point one-quarter unit down is solid the entity is on ground
    let point = [ent.s.origin[0], ent.s.origin[1], ent.s.origin[2] - 0.25];
    let tr = ctx.gi.trace(&ent.s.origin, &ent.mins, &ent.maxs, &point, ent_idx as i32, MASK_MONSTERSOLID);

    // check steepness
    if tr.plane.normal[2] < 0.7 && !tr.startsolid {
        ctx.edicts[ent_idx].groundentity = EntRef::NONE;
        return;
    }

    if !tr.startsolid && !tr.allsolid {
        let (ground, linkcount) = match tr.ent() {
            Some(g) => (ctx.entref(g), ctx.edicts[g].linkcount),
            None => (EntRef::NONE, 0),
        };
        let ent = &mut ctx.edicts[ent_idx];
        ent.s.origin = tr.endpos;
        ent.groundentity = ground;
        ent.groundentity_linkcount = linkcount;
        ent.velocity[2] = 0.0;
    }
}

pub fn m_categorize_position(ctx: &mut GameContext, ent_idx: usize) {
    let ent = &ctx.edicts[ent_idx];

    // get waterlevel
    let mut point = ent.s.origin;
    point[2] += ent.mins[2] + 1.0;
    let cont = ctx.gi.pointcontents(&point);

    if cont & MASK_WATER == 0 {
        let ent = &mut ctx.edicts[ent_idx];
        ent.waterlevel = 0;
        ent.watertype = 0;
        return;
    }

    let mut level = 1;
    point[2] += 26.0;
    if ctx.gi.pointcontents(&point) & MASK_WATER != 0 {
        level = 2;
        point[2] += 22.0;
        if ctx.gi.pointcontents(&point) & MASK_WATER != 0 {
            level = 3;
        }
    }

    let ent = &mut ctx.edicts[ent_idx];
    ent.watertype = cont;
    ent.waterlevel = level;
}

pub fn m_drop_to_floor(ctx: &mut GameContext, ent_idx: usize) {
    let ent = &mut ctx.edicts[ent_idx];
    ent.s.origin[2] += 1.0;
    let mut end = ent.s.origin;
    end[2] -= 256.0;

    let ent = &ctx.edicts[ent_idx];
    let tr = ctx.gi.trace(&ent.s.origin, &ent.mins, &ent.maxs, &end, ent_idx as i32, MASK_MONSTERSOLID);
    if tr.fraction == 1.0 || tr.allsolid {
        return;
    }

    ctx.edicts[ent_idx].s.origin = tr.endpos;
    link_entity(ctx, ent_idx);
    m_check_ground(ctx, ent_idx);
    m_categorize_position(ctx, ent_idx);
}

// ============================================================
// Frame executor
// ============================================================

fn run_ai(ctx: &mut GameContext, self_idx: usize, ai: Ai, dist: f32) {
    match ai {
        Ai::Stand => ai_stand(ctx, self_idx, dist),
        Ai::Walk => ai_walk(ctx, self_idx, dist),
        Ai::Run => ai_run(ctx, self_idx, dist),
        Ai::Charge => ai_charge(ctx, self_idx, dist),
        Ai::Move => ai_move(ctx, self_idx, dist),
        Ai::Turn => ai_turn(ctx, self_idx, dist),
    }
}

/// Put the frame cursor on the frame this think should play.
/// Returns false if the monster died during its move's end function.
fn advance_frame(ctx: &mut GameContext, self_idx: usize, mut mv: &'static MMove) -> bool {
    let nextframe = ctx.edicts[self_idx].monsterinfo.nextframe;
    if nextframe != 0 && mv.contains(nextframe) {
        let ent = &mut ctx.edicts[self_idx];
        ent.s.frame = nextframe;
        ent.monsterinfo.nextframe = 0;
        ent.monsterinfo.active_move = ent.monsterinfo.currentmove;
        return true;
    }

    if ctx.edicts[self_idx].s.frame == mv.lastframe {
        if let Some(endfunc) = mv.endfunc {
            endfunc(ctx, self_idx);

            // regrab move, endfunc is very likely to change it
            mv = match ctx.edicts[self_idx].monsterinfo.current_move() {
                Some(m) => m,
                None => return false,
            };

            // check for death
            if ctx.edicts[self_idx].svflags & SVF_DEADMONSTER != 0 {
                return false;
            }
        }
    }

    let ent = &mut ctx.edicts[self_idx];
    let info = &mut ent.monsterinfo;
    if info.active_move != info.currentmove || !mv.contains(ent.s.frame) {
        info.aiflags.remove(AI_HOLD_FRAME);
        info.active_move = info.currentmove;
        ent.s.frame = mv.firstframe;
    } else if !info.aiflags.contains(AI_HOLD_FRAME) {
        ent.s.frame += 1;
        if ent.s.frame > mv.lastframe {
            ent.s.frame = mv.firstframe;
        }
    }
    true
}

/// M_MoveFrame -- play one frame of the current move: position the cursor,
/// run the frame's locomotion tag, then its think callback.
pub fn m_move_frame(ctx: &mut GameContext, self_idx: usize) {
    let mv = match ctx.edicts[self_idx].monsterinfo.current_move() {
        Some(m) => m,
        None => return,
    };
    ctx.edicts[self_idx].nextthink = ctx.level.time + FRAMETIME;

    if !advance_frame(ctx, self_idx, mv) {
        return;
    }

    let ent = &ctx.edicts[self_idx];
    let mv = match ent.monsterinfo.current_move() {
        Some(m) => m,
        None => return,
    };
    let frame = match mv.frames.get((ent.s.frame - mv.firstframe) as usize) {
        Some(f) => *f,
        None => return,
    };

    if let Some(ai) = frame.ai {
        let dist = if ent.monsterinfo.aiflags.contains(AI_HOLD_FRAME) {
            0.0
        } else {
            let scale = if ent.monsterinfo.scale != 0.0 { ent.monsterinfo.scale } else { 1.0 };
            frame.dist * scale
        };
        run_ai(ctx, self_idx, ai, dist);
    }

    if let Some(think) = frame.think {
        think(ctx, self_idx);
    }
}

pub fn monster_think(ctx: &mut GameContext, self_idx: usize) {
    m_move_frame(ctx, self_idx);

    if !ctx.edicts[self_idx].inuse {
        return;
    }

    let ent = &mut ctx.edicts[self_idx];
    if ent.linkcount != ent.monsterinfo.linkcount {
        ent.monsterinfo.linkcount = ent.linkcount;
        m_check_ground(ctx, self_idx);
    }

    m_categorize_position(ctx, self_idx);
}

// ============================================================
// Death helpers
// ============================================================

fn free_think(ctx: &mut GameContext, self_idx: usize) {
    ctx.free_edict(self_idx);
}

/// The monster was blown apart and what is left is a flying head. The
/// frame table stops here.
pub fn monster_become_head(ctx: &mut GameContext, self_idx: usize) {
    let delay = 10.0 + ctx.random() * 10.0;
    let now = ctx.level.time;
    let ent = &mut ctx.edicts[self_idx];
    ent.monsterinfo.currentmove = None;
    ent.monsterinfo.active_move = None;
    ent.svflags &= !SVF_MONSTER;
    ent.svflags |= SVF_DEADMONSTER;
    ent.takedamage = DAMAGE_NO;
    ent.solid = Solid::Not;
    ent.deadflag = DEAD_DEAD;
    ent.touch = None;
    ent.think = Some(free_think);
    ent.nextthink = now + delay;
    link_entity(ctx, self_idx);
}

/// Corpse fade-out: sink into the floor a unit per frame, then go away.
pub fn monster_fade(ctx: &mut GameContext, self_idx: usize) {
    let now = ctx.level.time;
    let ent = &mut ctx.edicts[self_idx];
    ent.takedamage = DAMAGE_NO;
    ent.count += 1;
    ent.s.origin[2] -= 1.0;

    if ent.count >= 10 {
        ctx.free_edict(self_idx);
        return;
    }

    ent.nextthink = now + FRAMETIME;
    link_entity(ctx, self_idx);
}

/// Settles a finished death animation into a corpse: a flattened box that
/// the world can still push around.
pub fn monster_corpse(ctx: &mut GameContext, self_idx: usize, mins: Vec3, maxs: Vec3) {
    let now = ctx.level.time;
    let fade = ctx.config.corpse_fade;
    let fadetime = ctx.config.corpse_fadetime;

    let ent = &mut ctx.edicts[self_idx];
    ent.mins = mins;
    ent.maxs = maxs;
    ent.movetype = MoveType::Toss;
    ent.svflags |= SVF_DEADMONSTER;
    ent.nextthink = 0.0;
    if fade {
        ent.count = 0;
        ent.think = Some(monster_fade);
        ent.nextthink = now + fadetime;
    }
    link_entity(ctx, self_idx);
}

// ============================================================
// Monster start functions
// ============================================================

pub fn monster_start(ctx: &mut GameContext, self_idx: usize) -> bool {
    let now = ctx.level.time;
    let ent = &mut ctx.edicts[self_idx];

    if ent.spawnflags & SF_MONSTER_SIGHT != 0 && !ent.monsterinfo.aiflags.contains(AI_GOOD_GUY) {
        ent.spawnflags &= !SF_MONSTER_SIGHT;
        ent.spawnflags |= SF_MONSTER_AMBUSH;
    }

    ent.nextthink = now + FRAMETIME;
    ent.svflags |= SVF_MONSTER;
    ent.svflags &= !SVF_DEADMONSTER;
    ent.takedamage = DAMAGE_AIM;
    ent.max_health = ent.health;
    ent.clipmask = MASK_MONSTERSOLID;
    ent.deadflag = DEAD_NO;
    ent.s.old_origin = ent.s.origin;

    if ent.monsterinfo.chase_swap_mask == 0 {
        ent.monsterinfo.chase_swap_mask = 1;
    }

    // randomize what frame they start on
    if let Some(mv) = ent.monsterinfo.current_move() {
        let span = mv.lastframe - mv.firstframe + 1;
        let first = mv.firstframe;
        let r = ctx.rand();
        let ent = &mut ctx.edicts[self_idx];
        ent.s.frame = first + r % span;
        ent.monsterinfo.active_move = ent.monsterinfo.currentmove;
    }

    true
}

pub fn monster_start_go(ctx: &mut GameContext, self_idx: usize) {
    if ctx.edicts[self_idx].health <= 0 {
        return;
    }

    let movetarget = ctx.edicts[self_idx].movetarget;
    match ctx.resolve(movetarget) {
        Some(path) => {
            let v = vector_subtract(&ctx.edicts[path].s.origin, &ctx.edicts[self_idx].s.origin);
            let yaw = vectoyaw(&v);
            let ent = &mut ctx.edicts[self_idx];
            ent.goalentity = movetarget;
            ent.ideal_yaw = yaw;
            ent.s.angles[YAW] = yaw;
            monster_walk(ctx, self_idx);
        }
        None => {
            let ent = &mut ctx.edicts[self_idx];
            ent.movetarget = EntRef::NONE;
            ent.monsterinfo.pausetime = 100_000_000.0;
            monster_stand(ctx, self_idx);
        }
    }

    let now = ctx.level.time;
    let ent = &mut ctx.edicts[self_idx];
    ent.think = Some(monster_think);
    ent.nextthink = now + FRAMETIME;
}

fn report_in_solid(ctx: &GameContext, self_idx: usize) {
    let ent = &ctx.edicts[self_idx];
    let o = ent.s.origin;
    ctx.gi.dprintf(&format!(
        "{} in solid at ({} {} {})\n",
        ent.classname, o[0] as i32, o[1] as i32, o[2] as i32
    ));
}

pub fn walkmonster_start_go(ctx: &mut GameContext, self_idx: usize) {
    let ent = &ctx.edicts[self_idx];
    if ent.spawnflags & SF_MONSTER_TRIGGER_SPAWN == 0 && ctx.level.time < 1.0 {
        m_drop_to_floor(ctx, self_idx);

        if ctx.resolve(ctx.edicts[self_idx].groundentity).is_some() && !m_walkmove(ctx, self_idx, 0.0, 0.0) {
            report_in_solid(ctx, self_idx);
        }
    } else if ctx.resolve(ent.groundentity).is_some() && !m_walkmove(ctx, self_idx, 0.0, 0.0) {
        report_in_solid(ctx, self_idx);
    }

    let ent = &mut ctx.edicts[self_idx];
    if ent.yaw_speed == 0.0 {
        ent.yaw_speed = 20.0;
    }
    ent.viewheight = 25;

    monster_start_go(ctx, self_idx);
}

pub fn walkmonster_start(ctx: &mut GameContext, self_idx: usize) {
    ctx.edicts[self_idx].think = Some(walkmonster_start_go);
    monster_start(ctx, self_idx);
}

pub fn flymonster_start_go(ctx: &mut GameContext, self_idx: usize) {
    if !m_walkmove(ctx, self_idx, 0.0, 0.0) {
        report_in_solid(ctx, self_idx);
    }

    let ent = &mut ctx.edicts[self_idx];
    if ent.yaw_speed == 0.0 {
        ent.yaw_speed = 10.0;
    }
    ent.viewheight = 25;

    monster_start_go(ctx, self_idx);
}

pub fn flymonster_start(ctx: &mut GameContext, self_idx: usize) {
    let ent = &mut ctx.edicts[self_idx];
    ent.flags.insert(FL_FLY);
    ent.think = Some(flymonster_start_go);
    monster_start(ctx, self_idx);
}

// ============================================================
// Unit tests
// ============================================================
