// g_ai.rs -- monster locomotion tags, enemy sensing and attack selection
// Converted from: myq2-original/game/g_ai.c
//
// Copyright (C) 1997-2001 Id Software, Inc.
// Licensed under the GNU General Public License v2 or later.

use crate::g_local::*;
use crate::m_move::{m_change_yaw, m_move_to_goal, m_walkmove};

/// What an actor worked out about its enemy while deciding whether to
/// attack. Only valid for the frame it was computed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySense {
    pub visible: bool,
    pub infront: bool,
    pub range: i32,
    pub yaw: f32,
}

impl Default for EnemySense {
    fn default() -> Self {
        Self {
            visible: false,
            infront: false,
            range: RANGE_FAR,
            yaw: 0.0,
        }
    }
}

fn call_hook(ctx: &mut GameContext, self_idx: usize, pick: fn(&MonsterInfo) -> Option<MonsterFn>) {
    if let Some(hook) = pick(&ctx.edicts[self_idx].monsterinfo) {
        hook(ctx, self_idx);
    }
}

pub fn monster_stand(ctx: &mut GameContext, self_idx: usize) {
    call_hook(ctx, self_idx, |m| m.stand);
}

pub fn monster_walk(ctx: &mut GameContext, self_idx: usize) {
    call_hook(ctx, self_idx, |m| m.walk);
}

pub fn monster_run(ctx: &mut GameContext, self_idx: usize) {
    call_hook(ctx, self_idx, |m| m.run);
}

fn yaw_to(ctx: &GameContext, from: usize, to: usize) -> f32 {
    let v = vector_subtract(&ctx.edicts[to].s.origin, &ctx.edicts[from].s.origin);
    vectoyaw(&v)
}

// ============================================================
// Sight client
// ============================================================

/// AI_SetSightClient -- pick the next live, targetable client for monsters
/// to look for this frame. Cycles through the client slots one per frame.
pub fn ai_set_sight_client(ctx: &mut GameContext) {
    let maxclients = ctx.maxclients;
    if maxclients == 0 {
        ctx.level.sight_client = EntRef::NONE;
        return;
    }

    let start = ctx.resolve(ctx.level.sight_client).unwrap_or(1);
    let mut check = start;
    loop {
        check += 1;
        if check > maxclients {
            check = 1;
        }
        let ent = &ctx.edicts[check];
        if ent.inuse && ent.health > 0 && !ent.flags.contains(FL_NOTARGET) {
            ctx.level.sight_client = ctx.entref(check);
            return;
        }
        if check == start {
            ctx.level.sight_client = EntRef::NONE;
            return;
        }
    }
}

// ============================================================
// Locomotion tags
// ============================================================

/// ai_move -- move the specified distance at current facing.
pub fn ai_move(ctx: &mut GameContext, self_idx: usize, dist: f32) {
    let yaw = ctx.edicts[self_idx].s.angles[YAW];
    m_walkmove(ctx, self_idx, yaw, dist);
}

/// ai_stand -- standing around and looking for players. Distance is for
/// slight position adjustments needed by the animations.
pub fn ai_stand(ctx: &mut GameContext, self_idx: usize, dist: f32) {
    if dist != 0.0 {
        let yaw = ctx.edicts[self_idx].s.angles[YAW];
        m_walkmove(ctx, self_idx, yaw, dist);
    }

    let now = ctx.level.time;
    if ctx.edicts[self_idx].monsterinfo.aiflags.contains(AI_STAND_GROUND) {
        match ctx.enemy_of(self_idx) {
            Some(enemy) => {
                let ideal = yaw_to(ctx, self_idx, enemy);
                let ent = &mut ctx.edicts[self_idx];
                ent.ideal_yaw = ideal;
                let info = &mut ent.monsterinfo;

                if info.aiflags.contains(AI_RANGE_PAUSE) && now > info.rangetime {
                    info.aiflags.remove(AI_STAND_GROUND | AI_RANGE_PAUSE);
                    monster_run(ctx, self_idx);
                } else if ent.s.angles[YAW] != ideal && info.aiflags.contains(AI_TEMP_STAND_GROUND) {
                    info.aiflags.remove(AI_STAND_GROUND | AI_TEMP_STAND_GROUND);
                    monster_run(ctx, self_idx);
                }
                m_change_yaw(&mut ctx.edicts[self_idx]);
                ai_checkattack(ctx, self_idx);
            }
            None => {
                find_target(ctx, self_idx);
            }
        }
        return;
    }

    if find_target(ctx, self_idx) {
        return;
    }

    let info = &ctx.edicts[self_idx].monsterinfo;
    if now > info.pausetime {
        monster_walk(ctx, self_idx);
        return;
    }

    if let Some(idle) = info.idle {
        if now > info.idle_time {
            let had_idled = info.idle_time != 0.0;
            if had_idled {
                idle(ctx, self_idx);
            }
            let delay = if had_idled { 15.0 } else { 0.0 } + ctx.random() * 15.0;
            ctx.edicts[self_idx].monsterinfo.idle_time = now + delay;
        }
    }
}

/// ai_walk -- the monster is walking its beat.
pub fn ai_walk(ctx: &mut GameContext, self_idx: usize, dist: f32) {
    m_move_to_goal(ctx, self_idx, dist);

    // check for noticing a player
    if find_target(ctx, self_idx) {
        return;
    }

    let now = ctx.level.time;
    let info = &ctx.edicts[self_idx].monsterinfo;
    if let Some(search) = info.search {
        if now > info.idle_time {
            let had_searched = info.idle_time != 0.0;
            if had_searched {
                search(ctx, self_idx);
            }
            let delay = if had_searched { 15.0 } else { 0.0 } + ctx.random() * 15.0;
            ctx.edicts[self_idx].monsterinfo.idle_time = now + delay;
        }
    }
}

/// ai_charge -- turns towards the enemy and advances. A distance of 0 just
/// faces it.
pub fn ai_charge(ctx: &mut GameContext, self_idx: usize, dist: f32) {
    if let Some(enemy) = ctx.enemy_of(self_idx) {
        ctx.edicts[self_idx].ideal_yaw = yaw_to(ctx, self_idx, enemy);
    }
    m_change_yaw(&mut ctx.edicts[self_idx]);

    if dist != 0.0 {
        let yaw = ctx.edicts[self_idx].s.angles[YAW];
        m_walkmove(ctx, self_idx, yaw, dist);
    }
}

/// ai_turn -- don't move, but turn towards ideal_yaw.
pub fn ai_turn(ctx: &mut GameContext, self_idx: usize, dist: f32) {
    if dist != 0.0 {
        let yaw = ctx.edicts[self_idx].s.angles[YAW];
        m_walkmove(ctx, self_idx, yaw, dist);
    }

    if find_target(ctx, self_idx) {
        return;
    }

    m_change_yaw(&mut ctx.edicts[self_idx]);
}

// ============================================================
// Range and visibility
// ============================================================

/// Range categorization of `other` relative to `self_ent`.
pub fn range(self_ent: &Edict, other: &Edict) -> i32 {
    let v = vector_subtract(&self_ent.s.origin, &other.s.origin);
    let len = vector_length(&v);

    if len < MELEE_DISTANCE {
        RANGE_MELEE
    } else if len < 500.0 {
        RANGE_NEAR
    } else if len < 1000.0 {
        RANGE_MID
    } else {
        RANGE_FAR
    }
}

/// Eye-to-eye line of sight, even if `other` is not in front.
pub fn visible(ctx: &GameContext, self_idx: usize, other_idx: usize) -> bool {
    let me = &ctx.edicts[self_idx];
    let other = &ctx.edicts[other_idx];

    let mut spot1 = me.s.origin;
    spot1[2] += me.viewheight as f32;
    let mut spot2 = other.s.origin;
    spot2[2] += other.viewheight as f32;

    let tr = ctx.gi.trace(&spot1, &VEC3_ORIGIN, &VEC3_ORIGIN, &spot2, self_idx as i32, MASK_OPAQUE);
    tr.fraction == 1.0
}

/// `other` is within the forward cone of `self_ent`.
pub fn infront(self_ent: &Edict, other: &Edict) -> bool {
    let mut forward = [0.0; 3];
    angle_vectors(&self_ent.s.angles, Some(&mut forward), None, None);
    let mut vec = vector_subtract(&other.s.origin, &self_ent.s.origin);
    vector_normalize(&mut vec);
    dot_product(&vec, &forward) > 0.3
}

pub fn facing_ideal(self_ent: &Edict) -> bool {
    let delta = anglemod(self_ent.s.angles[YAW] - self_ent.ideal_yaw);
    !(delta > 45.0 && delta < 315.0)
}

// ============================================================
// Target acquisition
// ============================================================

/// HuntTarget -- turn the enemy into the goal and start running at it.
pub fn hunt_target(ctx: &mut GameContext, self_idx: usize) {
    let enemy = match ctx.enemy_of(self_idx) {
        Some(e) => e,
        None => return,
    };

    let enemy_ref = ctx.edicts[self_idx].enemy;
    ctx.edicts[self_idx].goalentity = enemy_ref;
    let stand_ground = ctx.edicts[self_idx].monsterinfo.aiflags.contains(AI_STAND_GROUND);
    if stand_ground {
        monster_stand(ctx, self_idx);
    } else {
        monster_run(ctx, self_idx);
    }

    ctx.edicts[self_idx].ideal_yaw = yaw_to(ctx, self_idx, enemy);

    // wait a while before first attack
    if !stand_ground {
        ctx.edicts[self_idx].monsterinfo.attack_finished = ctx.level.time + 1.0;
    }
}

pub fn found_target(ctx: &mut GameContext, self_idx: usize) {
    if let Some(enemy) = ctx.enemy_of(self_idx) {
        ctx.edicts[self_idx].monsterinfo.last_sighting = ctx.edicts[enemy].s.origin;
    }
    hunt_target(ctx, self_idx);
}

/// FindTarget -- the actor is not attacking anything, so look at this
/// frame's sight client. Returns true if an enemy was sighted.
pub fn find_target(ctx: &mut GameContext, self_idx: usize) -> bool {
    let aiflags = ctx.edicts[self_idx].monsterinfo.aiflags;
    if aiflags.intersects(AI_GOOD_GUY | AI_COMBAT_POINT) {
        return false;
    }

    let client = match ctx.resolve(ctx.level.sight_client) {
        Some(c) => c,
        None => return false,
    };

    // if client is our current enemy, we already know about it
    if ctx.enemy_of(self_idx) == Some(client) {
        return true;
    }

    {
        let me = &ctx.edicts[self_idx];
        let c = &ctx.edicts[client];
        if !c.is_client() || c.flags.contains(FL_NOTARGET) {
            return false;
        }

        let r = range(me, c);
        if r == RANGE_FAR {
            return false;
        }
        if (r == RANGE_NEAR || r == RANGE_MID) && !infront(me, c) {
            return false;
        }
    }
    if !visible(ctx, self_idx, client) {
        return false;
    }

    ctx.edicts[self_idx].enemy = ctx.entref(client);
    ctx.edicts[self_idx].monsterinfo.aiflags.remove(AI_SOUND_TARGET);

    // got one
    found_target(ctx, self_idx);

    if let Some(sight) = ctx.edicts[self_idx].monsterinfo.sight {
        sight(ctx, self_idx, client);
    }
    true
}

// ============================================================
// Attack selection
// ============================================================

/// M_CheckAttack -- default check for whether to melee or fire.
pub fn m_check_attack(ctx: &mut GameContext, self_idx: usize, sense: &EnemySense) -> bool {
    let enemy = match ctx.enemy_of(self_idx) {
        Some(e) => e,
        None => return false,
    };

    if ctx.edicts[enemy].health > 0 {
        // see if any entities are in the way of the shot
        let me = &ctx.edicts[self_idx];
        let them = &ctx.edicts[enemy];
        let mut spot1 = me.s.origin;
        spot1[2] += me.viewheight as f32;
        let mut spot2 = them.s.origin;
        spot2[2] += them.viewheight as f32;

        let tr = ctx.gi.trace(
            &spot1,
            &VEC3_ORIGIN,
            &VEC3_ORIGIN,
            &spot2,
            self_idx as i32,
            CONTENTS_SOLID | CONTENTS_MONSTER | CONTENTS_SLIME | CONTENTS_LAVA | CONTENTS_WINDOW,
        );

        // do we have a clear shot?
        if tr.ent() != Some(enemy) {
            return false;
        }
    }

    // melee attack
    if sense.range == RANGE_MELEE {
        // don't always melee in easy mode
        if ctx.skill() == 0 && ctx.rand() & 3 != 0 {
            return false;
        }
        let info = &mut ctx.edicts[self_idx].monsterinfo;
        info.attack_state = if info.melee.is_some() { AS_MELEE } else { AS_MISSILE };
        return true;
    }

    // missile attack
    let now = ctx.level.time;
    let info = &ctx.edicts[self_idx].monsterinfo;
    if info.attack.is_none() || now < info.attack_finished || sense.range == RANGE_FAR {
        return false;
    }

    let mut chance = if info.aiflags.contains(AI_STAND_GROUND) {
        0.4
    } else {
        match sense.range {
            RANGE_NEAR => 0.1,
            RANGE_MID => 0.02,
            _ => return false,
        }
    };

    match ctx.skill() {
        0 => chance *= 0.5,
        s if s >= 2 => chance *= 2.0,
        _ => {}
    }

    if ctx.random() < chance {
        let finished = now + 2.0 * ctx.random();
        let info = &mut ctx.edicts[self_idx].monsterinfo;
        info.attack_state = AS_MISSILE;
        info.attack_finished = finished;
        return true;
    }

    if ctx.edicts[self_idx].flags.contains(FL_FLY) {
        let state = if ctx.random() < 0.3 { AS_SLIDING } else { AS_STRAIGHT };
        ctx.edicts[self_idx].monsterinfo.attack_state = state;
    }

    false
}

/// Turn toward the enemy and, once facing it, run `hook`.
fn ai_run_attack(ctx: &mut GameContext, self_idx: usize, sense: &EnemySense, hook: Option<MonsterFn>) {
    let ent = &mut ctx.edicts[self_idx];
    ent.ideal_yaw = sense.yaw;
    m_change_yaw(ent);

    if facing_ideal(ent) {
        if let Some(hook) = hook {
            hook(ctx, self_idx);
        }
        ctx.edicts[self_idx].monsterinfo.attack_state = AS_STRAIGHT;
    }
}

/// Turn and close until within an angle to launch a melee attack.
pub fn ai_run_melee(ctx: &mut GameContext, self_idx: usize, sense: &EnemySense) {
    let hook = ctx.edicts[self_idx].monsterinfo.melee;
    ai_run_attack(ctx, self_idx, sense, hook);
}

/// Turn in place until within an angle to launch a missile attack.
pub fn ai_run_missile(ctx: &mut GameContext, self_idx: usize, sense: &EnemySense) {
    let hook = ctx.edicts[self_idx].monsterinfo.attack;
    ai_run_attack(ctx, self_idx, sense, hook);
}

/// Strafe sideways, but stay at approximately the same range.
pub fn ai_run_slide(ctx: &mut GameContext, self_idx: usize, dist: f32, sense: &EnemySense) {
    let ent = &mut ctx.edicts[self_idx];
    ent.ideal_yaw = sense.yaw;
    m_change_yaw(ent);

    let ideal_yaw = ent.ideal_yaw;
    let ofs = if ent.monsterinfo.lefty != 0 { 90.0 } else { -90.0 };

    if m_walkmove(ctx, self_idx, ideal_yaw + ofs, dist) {
        return;
    }

    let info = &mut ctx.edicts[self_idx].monsterinfo;
    info.lefty = 1 - info.lefty;
    m_walkmove(ctx, self_idx, ideal_yaw - ofs, dist);
}

/// Points the actor at something new once its enemy is dead or gone.
/// Returns false when it fell back on its old enemy and should carry on.
fn forget_enemy(ctx: &mut GameContext, self_idx: usize) -> bool {
    ctx.edicts[self_idx].enemy = EntRef::NONE;

    let oldenemy = ctx.edicts[self_idx].oldenemy;
    ctx.edicts[self_idx].oldenemy = EntRef::NONE;
    if let Some(old) = ctx.resolve(oldenemy) {
        if ctx.edicts[old].health > 0 {
            ctx.edicts[self_idx].enemy = oldenemy;
            hunt_target(ctx, self_idx);
            return false;
        }
    }

    let movetarget = ctx.edicts[self_idx].movetarget;
    if ctx.resolve(movetarget).is_some() {
        ctx.edicts[self_idx].goalentity = movetarget;
        monster_walk(ctx, self_idx);
    } else {
        // we need the pausetime otherwise the stand code
        // will just revert to walking with no target and
        // the monsters will wonder around aimlessly trying
        // to hunt the world entity
        ctx.edicts[self_idx].monsterinfo.pausetime = ctx.level.time + 100_000_000.0;
        monster_stand(ctx, self_idx);
    }
    true
}

/// ai_checkattack -- decide whether to attack or keep moving. Returns true
/// when the frame was spent on something other than pursuit.
pub fn ai_checkattack(ctx: &mut GameContext, self_idx: usize) -> (bool, EnemySense) {
    let mut sense = EnemySense::default();

    // this causes monsters to run blindly to the combat point w/o firing
    if ctx.goal_of(self_idx).is_some()
        && ctx.edicts[self_idx].monsterinfo.aiflags.contains(AI_COMBAT_POINT)
    {
        return (false, sense);
    }

    // see if the enemy is dead
    let brutal = ctx.edicts[self_idx].monsterinfo.aiflags.contains(AI_BRUTAL);
    let dead = match ctx.enemy_of(self_idx) {
        Some(e) => {
            let health = ctx.edicts[e].health;
            if brutal {
                health <= -80
            } else {
                health <= 0
            }
        }
        None => true,
    };
    if dead && forget_enemy(ctx, self_idx) {
        return (true, sense);
    }

    let enemy = match ctx.enemy_of(self_idx) {
        Some(e) => e,
        None => return (true, sense),
    };

    // check knowledge of enemy
    sense.visible = visible(ctx, self_idx, enemy);
    if sense.visible {
        let origin = ctx.edicts[enemy].s.origin;
        let info = &mut ctx.edicts[self_idx].monsterinfo;
        info.search_time = ctx.level.time + 5.0;
        info.last_sighting = origin;
    }

    sense.infront = infront(&ctx.edicts[self_idx], &ctx.edicts[enemy]);
    sense.range = range(&ctx.edicts[self_idx], &ctx.edicts[enemy]);
    sense.yaw = yaw_to(ctx, self_idx, enemy);

    match ctx.edicts[self_idx].monsterinfo.attack_state {
        AS_MISSILE => {
            ai_run_missile(ctx, self_idx, &sense);
            return (true, sense);
        }
        AS_MELEE => {
            ai_run_melee(ctx, self_idx, &sense);
            return (true, sense);
        }
        _ => {}
    }

    // if enemy is not currently visible, we will never attack
    if !sense.visible {
        return (false, sense);
    }

    (m_check_attack(ctx, self_idx, &sense), sense)
}

/// Walk toward the last place the enemy was seen, through a throwaway goal
/// entity parked there for the length of the move.
fn pursue_last_sighting(ctx: &mut GameContext, self_idx: usize, dist: f32) {
    let saved_goal = ctx.edicts[self_idx].goalentity;
    let last_sighting = ctx.edicts[self_idx].monsterinfo.last_sighting;

    let tempgoal = ctx.spawn();
    ctx.edicts[tempgoal].classname = "tempgoal".to_string();
    ctx.edicts[tempgoal].s.origin = last_sighting;
    ctx.edicts[tempgoal].absmin = last_sighting;
    ctx.edicts[tempgoal].absmax = last_sighting;
    ctx.edicts[self_idx].goalentity = ctx.entref(tempgoal);

    let info = &mut ctx.edicts[self_idx].monsterinfo;
    if !info.aiflags.contains(AI_LOST_SIGHT) {
        // just lost sight of the player, head for where it was
        info.aiflags |= AI_LOST_SIGHT;
        let v = vector_subtract(&last_sighting, &ctx.edicts[self_idx].s.origin);
        ctx.edicts[self_idx].ideal_yaw = vectoyaw(&v);
    }

    let v = vector_subtract(&ctx.edicts[self_idx].s.origin, &last_sighting);
    let d = vector_length(&v);
    let dist = if d <= dist { d } else { dist };

    m_move_to_goal(ctx, self_idx, dist);

    ctx.free_edict(tempgoal);
    ctx.edicts[self_idx].goalentity = saved_goal;
}

/// ai_run -- the monster has an enemy it is trying to kill.
pub fn ai_run(ctx: &mut GameContext, self_idx: usize, dist: f32) {
    // if we're going to a combat point, just proceed
    if ctx.edicts[self_idx].monsterinfo.aiflags.contains(AI_COMBAT_POINT) {
        m_move_to_goal(ctx, self_idx, dist);
        return;
    }

    let (handled, sense) = ai_checkattack(ctx, self_idx);
    if handled {
        return;
    }

    if ctx.edicts[self_idx].monsterinfo.attack_state == AS_SLIDING {
        ai_run_slide(ctx, self_idx, dist, &sense);
        return;
    }

    if sense.visible {
        m_move_to_goal(ctx, self_idx, dist);
        if let Some(enemy) = ctx.enemy_of(self_idx) {
            let origin = ctx.edicts[enemy].s.origin;
            let info = &mut ctx.edicts[self_idx].monsterinfo;
            info.aiflags.remove(AI_LOST_SIGHT);
            info.last_sighting = origin;
        }
        return;
    }

    let now = ctx.level.time;
    let search_time = ctx.edicts[self_idx].monsterinfo.search_time;
    if search_time != 0.0 && now > search_time + 20.0 {
        m_move_to_goal(ctx, self_idx, dist);
        ctx.edicts[self_idx].monsterinfo.search_time = 0.0;
        return;
    }

    pursue_last_sighting(ctx, self_idx, dist);
}
