// m_move.rs -- monster movement
// Converted from: myq2-original/game/m_move.c
//
// Copyright (C) 1997-2001 Id Software, Inc.
// Licensed under the GNU General Public License v2 or later.

use crate::g_local::*;
use crate::g_utils::{find_radius, g_touch_triggers, link_entity, realrange};

const DI_NODIR: f32 = -1.0;

// a jump-down that would drop further than this snaps the actor back up
// and lets gravity carry it the rest of the way
const JUMP_DOWN_SNAP: f32 = 48.0;

fn relink(ctx: &mut GameContext, ent_idx: usize) {
    link_entity(ctx, ent_idx);
    g_touch_triggers(ctx, ent_idx);
}

/// The trace stopped on a player or a live monster.
fn hit_actor(ctx: &GameContext, tr: &Trace) -> bool {
    match tr.ent() {
        Some(i) => {
            let e = &ctx.edicts[i];
            e.is_client() || e.svflags & SVF_MONSTER != 0
        }
        None => false,
    }
}

/// Nothing alive or dead is standing on the surface the trace stopped on.
fn unoccupied(ctx: &GameContext, tr: &Trace) -> bool {
    match tr.ent() {
        Some(i) => {
            let e = &ctx.edicts[i];
            !e.is_client() && e.svflags & (SVF_MONSTER | SVF_DEADMONSTER) == 0
        }
        None => true,
    }
}

/// A landing spot for a jump-down: walkable, solid, far enough below
/// `from_z`, and unoccupied.
fn good_landing(ctx: &GameContext, tr: &Trace, from_z: f32) -> bool {
    tr.fraction < 1.0
        && tr.plane.normal[2] > ctx.config.walkable_normal_z
        && tr.contents & MASK_SOLID != 0
        && from_z - ctx.config.jump_land_margin > tr.endpos[2]
        && unoccupied(ctx, tr)
}

// ============================================================
// M_CheckBottom
//
// Returns false if any part of the bottom of the entity is off
// an edge that is not a staircase.
// ============================================================

pub fn m_check_bottom(ctx: &mut GameContext, ent_idx: usize) -> bool {
    let stepsize = ctx.config.stepsize;
    let ent = &ctx.edicts[ent_idx];
    let mins = vector_add(&ent.s.origin, &ent.mins);
    let maxs = vector_add(&ent.s.origin, &ent.maxs);

    // if all of the points under the corners are solid world, don't bother
    // with the tougher checks
    let mut start = [0.0, 0.0, mins[2] - 1.0];
    let mut all_solid = true;
    'corners: for x in 0..2 {
        for y in 0..2 {
            start[0] = if x != 0 { maxs[0] } else { mins[0] };
            start[1] = if y != 0 { maxs[1] } else { mins[1] };
            if ctx.gi.pointcontents(&start) != CONTENTS_SOLID {
                all_solid = false;
                break 'corners;
            }
        }
    }

    if all_solid {
        ctx.c_yes += 1;
        return true; // we got out easy
    }

    ctx.c_no += 1;

    // check it for real: the midpoint must have floor within two steps
    start[0] = (mins[0] + maxs[0]) * 0.5;
    start[1] = (mins[1] + maxs[1]) * 0.5;
    start[2] = mins[2];
    let mut stop = [start[0], start[1], start[2] - 2.0 * stepsize];

    let tr = ctx.gi.trace(&start, &VEC3_ORIGIN, &VEC3_ORIGIN, &stop, ent_idx as i32, MASK_MONSTERSOLID);
    if tr.fraction == 1.0 {
        return false;
    }
    let mid = tr.endpos[2];

    // and every corner must be no more than a step below it
    for x in 0..2 {
        for y in 0..2 {
            start[0] = if x != 0 { maxs[0] } else { mins[0] };
            start[1] = if y != 0 { maxs[1] } else { mins[1] };
            stop[0] = start[0];
            stop[1] = start[1];

            let tr = ctx.gi.trace(&start, &VEC3_ORIGIN, &VEC3_ORIGIN, &stop, ent_idx as i32, MASK_MONSTERSOLID);
            if tr.fraction == 1.0 || mid - tr.endpos[2] > stepsize {
                return false;
            }
        }
    }

    true
}

// ============================================================
// SV_movestep
//
// Called by monster program code.
// The move will be adjusted for slopes and stairs, but if the move isn't
// possible, no move is done, false is returned, and
// ctx.edicts[ent].s.origin is left unchanged.
// ============================================================

pub fn sv_movestep(ctx: &mut GameContext, ent_idx: usize, mv: &Vec3, relink_ent: bool) -> bool {
    // the enemy takes precedence; otherwise head for the movetarget
    let target = match ctx.enemy_of(ent_idx) {
        Some(e) => Some(e),
        None => ctx.resolve(ctx.edicts[ent_idx].movetarget),
    };

    if ctx.edicts[ent_idx].flags.intersects(FL_SWIM | FL_FLY) {
        sv_flystep(ctx, ent_idx, mv, relink_ent)
    } else {
        sv_groundstep(ctx, ent_idx, mv, relink_ent, target)
    }
}

/// Vertical correction a flyer or swimmer applies toward its goal.
fn altitude_correction(ctx: &GameContext, ent_idx: usize, goal: usize) -> f32 {
    let cfg = &ctx.config;
    let ent = &ctx.edicts[ent_idx];
    let g = &ctx.edicts[goal];
    let dz = ent.s.origin[2] - g.s.origin[2];
    let step = cfg.flyer_altitude_step;

    if g.is_client() {
        // hover above players, inside a band
        let surface_bound = ent.flags.contains(FL_SWIM) && ent.waterlevel < 2;
        if dz > cfg.flyer_high_band {
            -step
        } else if dz < cfg.flyer_low_band && !surface_bound {
            step
        } else {
            0.0
        }
    } else {
        // everything else is met at its own height
        -dz.clamp(-step, step)
    }
}

fn sv_flystep(ctx: &mut GameContext, ent_idx: usize, mv: &Vec3, relink_ent: bool) -> bool {
    let oldorg = ctx.edicts[ent_idx].s.origin;

    // try one move with vertical motion, then one without
    for i in 0..2 {
        let mut neworg = vector_add(&oldorg, mv);
        let enemy = ctx.enemy_of(ent_idx);

        if i == 0 && enemy.is_some() {
            if ctx.goal_of(ent_idx).is_none() {
                ctx.edicts[ent_idx].goalentity = ctx.edicts[ent_idx].enemy;
            }
            if let Some(goal) = ctx.goal_of(ent_idx) {
                neworg[2] += altitude_correction(ctx, ent_idx, goal);
            }
        }

        let ent = &ctx.edicts[ent_idx];
        let tr = ctx.gi.trace(&oldorg, &ent.mins, &ent.maxs, &neworg, ent_idx as i32, MASK_MONSTERSOLID);
        let feet = [tr.endpos[0], tr.endpos[1], tr.endpos[2] + ent.mins[2] + 1.0];

        // fly monsters don't enter water voluntarily
        if ent.flags.contains(FL_FLY) && ent.waterlevel == 0 && ctx.gi.pointcontents(&feet) & MASK_WATER != 0 {
            return false;
        }

        // swim monsters don't exit water voluntarily
        if ent.flags.contains(FL_SWIM) && ent.waterlevel < 2 && ctx.gi.pointcontents(&feet) & MASK_WATER == 0 {
            return false;
        }

        if tr.fraction == 1.0 {
            ctx.edicts[ent_idx].s.origin = tr.endpos;
            if relink_ent {
                relink(ctx, ent_idx);
            }
            return true;
        }

        if enemy.is_none() {
            break;
        }
    }

    false
}

/// Liquid the actor would step into. Actors may wade but not swim, and
/// never touch lava or slime.
fn steps_into_liquid(ctx: &GameContext, ent_idx: usize, endpos: &Vec3) -> bool {
    let ent = &ctx.edicts[ent_idx];
    let feet = [endpos[0], endpos[1], endpos[2] + ent.mins[2] + 1.0];

    if ent.monsterinfo.aiflags.contains(AI_ACTOR) {
        if ent.waterlevel == 0 && ctx.gi.pointcontents(&feet) & (CONTENTS_LAVA | CONTENTS_SLIME) != 0 {
            return true;
        }
        let eyes = [endpos[0], endpos[1], endpos[2] + ent.viewheight as f32 - 1.0];
        return ctx.gi.pointcontents(&eyes) & MASK_WATER != 0;
    }

    ent.waterlevel == 0 && ctx.gi.pointcontents(&feet) & MASK_WATER != 0
}

/// A grenade lies close to the new position and the step brings the actor
/// nearer to it.
fn steps_toward_grenade(ctx: &GameContext, oldorg: &Vec3, neworg: &Vec3) -> bool {
    find_radius(ctx, neworg, ctx.config.grenade_radius)
        .into_iter()
        .filter(|&i| {
            let c = &ctx.edicts[i].classname;
            c.eq_ignore_ascii_case("grenade") || c.eq_ignore_ascii_case("hgrenade")
        })
        .any(|i| {
            let g = &ctx.edicts[i].s.origin;
            distance_squared(g, neworg) < distance_squared(g, oldorg)
        })
}

/// An active laser beam crosses the path from `oldorg` to `endpos`.
fn steps_into_laser(ctx: &GameContext, ent_idx: usize, oldorg: &Vec3, endpos: &Vec3, mv: &Vec3) -> bool {
    let dist = vector_length(mv);
    if dist <= 0.0 {
        return false;
    }
    let mut dir = *mv;
    vector_normalize(&mut dir);

    let ent = &ctx.edicts[ent_idx];
    let sample = ctx.config.laser_sample_step;
    let mut monster_mins = [0.0; 3];
    let mut monster_maxs = [0.0; 3];
    for i in 0..3 {
        monster_mins[i] = oldorg[i].min(endpos[i]) + ent.mins[i];
        monster_maxs[i] = oldorg[i].max(endpos[i]) + ent.maxs[i];
    }

    for (i, e) in ctx.edicts.iter().enumerate().skip(ctx.maxclients + 1) {
        if !e.inuse || !e.classname.eq_ignore_ascii_case("target_laser") {
            continue;
        }
        // styles 2 and 3 are switched off
        if e.svflags & SVF_NOCLIENT != 0 || e.style == 2 || e.style == 3 {
            continue;
        }
        if !ctx.gi.in_pvs(&ent.s.origin, &e.s.origin) {
            continue;
        }

        let laser_end = vector_ma(&e.s.origin, ctx.config.laser_length, &e.movedir);
        let laser_trace = ctx.gi.trace(
            &e.s.origin,
            &VEC3_ORIGIN,
            &VEC3_ORIGIN,
            &laser_end,
            -1,
            CONTENTS_SOLID | CONTENTS_MONSTER,
        );
        // already standing in it
        if laser_trace.ent() == Some(ent_idx) {
            continue;
        }

        let laser_end = laser_trace.endpos;
        let overlaps = (0..3).all(|k| {
            let lo = e.s.origin[k].min(laser_end[k]);
            let hi = e.s.origin[k].max(laser_end[k]);
            monster_maxs[k] >= lo && monster_mins[k] <= hi
        });
        if !overlaps {
            continue;
        }

        // axial beams crossing the box are a sure hit
        if e.movedir.iter().any(|&c| c == 1.0) {
            log::trace!("entity {i} blocks the step of {ent_idx}");
            return true;
        }

        // otherwise slide the beam back along the step and see if it finds us
        let mut delta = sample.min(dist);
        while delta < dist + sample - 0.125 {
            delta = delta.min(dist);
            let start = vector_ma(&e.s.origin, -delta, &dir);
            let end = vector_ma(&e.s.old_origin, -delta, &dir);
            let tr = ctx.gi.trace(&start, &VEC3_ORIGIN, &VEC3_ORIGIN, &end, 0, CONTENTS_SOLID | CONTENTS_MONSTER);
            if tr.ent() == Some(ent_idx) {
                log::trace!("entity {i} blocks the step of {ent_idx}");
                return true;
            }
            delta += sample;
        }
    }

    false
}

/// The upward jump only counts when the actor squarely faces the obstacle.
fn faces_obstacle(ctx: &GameContext, ent_idx: usize, forward: &Vec3) -> bool {
    let ent = &ctx.edicts[ent_idx];
    let p2 = vector_ma(&ent.s.origin, ctx.config.jump_face_trace, forward);
    let tr = ctx.gi.trace(&ent.s.origin, &ent.mins, &ent.maxs, &p2, ent_idx as i32, MASK_MONSTERSOLID);
    dot_product(&tr.plane.normal, forward) < ctx.config.jump_face_dot
}

fn sv_groundstep(ctx: &mut GameContext, ent_idx: usize, mv: &Vec3, relink_ent: bool, target: Option<usize>) -> bool {
    let walkable = ctx.config.walkable_normal_z;
    let (oldorg, mins, maxs, forward, aiflags, can_jump_at_all, jumpup, jumpdn) = {
        let ent = &ctx.edicts[ent_idx];
        let (forward, _, _) = angle_vectors_tuple(&ent.s.angles);
        (
            ent.s.origin,
            ent.mins,
            ent.maxs,
            forward,
            ent.monsterinfo.aiflags,
            ent.monsterinfo.jump.is_some(),
            ent.monsterinfo.jumpup,
            ent.monsterinfo.jumpdn,
        )
    };
    let passent = ent_idx as i32;

    // push down from a step height above the wished position
    let stepsize = if aiflags.contains(AI_NOSTEP) { 1.0 } else { ctx.config.stepsize };

    let mut neworg = vector_add(&oldorg, mv);
    neworg[2] += stepsize;
    let mut end = neworg;
    end[2] -= stepsize * 2.0;

    let mut trace = ctx.gi.trace(&neworg, &mins, &maxs, &end, passent, MASK_MONSTERSOLID);

    // jumping is only worth it if it brings us closer to the target
    let mut canjump = false;
    let mut d1 = 0.0;
    if can_jump_at_all && !aiflags.contains(AI_DUCKED) && !hit_actor(ctx, &trace) {
        if let Some(t) = target {
            let torg = ctx.edicts[t].s.origin;
            d1 = distance_squared(&torg, &oldorg);
            canjump = distance_squared(&torg, &trace.endpos) < d1;
        }
    }

    let mut jump = 0;
    let mut jumpheight = 0.0;

    if trace.allsolid {
        if !(canjump && jumpup > 0.0) {
            return false;
        }

        neworg[2] += jumpup - stepsize;
        trace = ctx.gi.trace(&neworg, &mins, &maxs, &end, passent, MASK_MONSTERSOLID);
        if trace.allsolid
            || trace.startsolid
            || trace.fraction <= 0.0
            || trace.plane.normal[2] <= walkable
            || !unoccupied(ctx, &trace)
            || !faces_obstacle(ctx, ent_idx, &forward)
        {
            return false;
        }
        jump = 1;
        jumpheight = trace.endpos[2] - oldorg[2];
    }

    if trace.startsolid {
        neworg[2] -= stepsize;
        trace = ctx.gi.trace(&neworg, &mins, &maxs, &end, passent, MASK_MONSTERSOLID);
        if trace.allsolid || trace.startsolid {
            return false;
        }
    }

    // don't go in to water
    if steps_into_liquid(ctx, ent_idx, &trace.endpos) {
        return false;
    }

    // don't step toward live grenades unless chasing something on purpose
    if !aiflags.contains(AI_CHASE_THING) && steps_toward_grenade(ctx, &oldorg, &neworg) {
        return false;
    }

    if steps_into_laser(ctx, ent_idx, &oldorg, &trace.endpos, mv) {
        return false;
    }

    if trace.fraction == 1.0 && jump == 0 && canjump && jumpdn > 0.0 {
        let mut down = end;
        down[2] = oldorg[2] + mv[2] - jumpdn;
        let tr = ctx.gi.trace(&neworg, &mins, &maxs, &down, passent, MASK_MONSTERSOLID | MASK_WATER);
        if good_landing(ctx, &tr, neworg[2]) {
            trace = tr;
            jump = -1;
        }
    }

    if trace.fraction == 1.0 && jump == 0 {
        // if monster had the ground pulled out, go ahead and fall
        if ctx.edicts[ent_idx].flags.contains(FL_PARTIALGROUND) {
            let ent = &mut ctx.edicts[ent_idx];
            ent.s.origin = vector_add(&ent.s.origin, mv);
            if relink_ent {
                relink(ctx, ent_idx);
            }
            ctx.edicts[ent_idx].groundentity = EntRef::NONE;
            return true;
        }

        return false; // walked off an edge
    }

    // check point traces down for dangling corners
    ctx.edicts[ent_idx].s.origin = trace.endpos;

    if jump == 0 {
        // a ledge just ahead that would make a good jump-down spot lets the
        // actor hang over the edge for a moment
        let mut skip = false;
        if let Some(t) = target {
            let torg = ctx.edicts[t].s.origin;
            if canjump && torg[2] < trace.endpos[2] && jumpdn > 0.0 {
                let p1 = vector_ma(&oldorg, ctx.config.jump_probe_distance, &forward);
                let ahead = ctx.gi.trace(&trace.endpos, &mins, &maxs, &p1, passent, MASK_MONSTERSOLID);
                if ahead.fraction == 1.0 {
                    let p2 = [p1[0], p1[1], p1[2] - jumpdn];
                    let tr = ctx.gi.trace(&p1, &mins, &maxs, &p2, passent, MASK_MONSTERSOLID | MASK_WATER);
                    if good_landing(ctx, &tr, p1[2]) && distance_squared(&torg, &tr.endpos) < d1 {
                        skip = true;
                    }
                }
            }
        }

        if !skip && !m_check_bottom(ctx, ent_idx) {
            if ctx.edicts[ent_idx].flags.contains(FL_PARTIALGROUND) {
                // entity had floor mostly pulled out from underneath it
                // and is trying to correct
                if relink_ent {
                    relink(ctx, ent_idx);
                }
                return true;
            }
            ctx.edicts[ent_idx].s.origin = oldorg;
            return false;
        }
    }

    let ground = trace.ent();
    let ground_ref = match ground {
        Some(g) => ctx.entref(g),
        None => EntRef::NONE,
    };
    let ground_linkcount = ground.map(|g| ctx.edicts[g].linkcount);

    {
        let ent = &mut ctx.edicts[ent_idx];
        ent.flags.remove(FL_PARTIALGROUND);
        ent.groundentity = ground_ref;
        if let Some(lc) = ground_linkcount {
            ent.groundentity_linkcount = lc;
        }
    }

    // the move is ok
    if jump != 0 {
        ctx.edicts[ent_idx].velocity = vector_scale(mv, 10.0);
        if jump > 0 {
            if let Some(jump_fn) = ctx.edicts[ent_idx].monsterinfo.jump {
                jump_fn(ctx, ent_idx);
            }
            ctx.edicts[ent_idx].velocity[2] = 2.5 * jumpheight + 80.0;
        } else {
            let ent = &mut ctx.edicts[ent_idx];
            ent.velocity[2] = ent.velocity[2].max(100.0);
            if oldorg[2] - ent.s.origin[2] > JUMP_DOWN_SNAP {
                ent.s.origin[2] = oldorg[2] + ent.velocity[2] * FRAMETIME;
            }
        }
        log::trace!("entity {ent_idx} jumps {}", if jump > 0 { "up" } else { "down" });
    }

    if relink_ent {
        relink(ctx, ent_idx);
    }

    true
}

// ============================================================================

/// M_ChangeYaw -- turn toward ideal_yaw by at most yaw_speed.
pub fn m_change_yaw(ent: &mut Edict) {
    let current = anglemod(ent.s.angles[YAW]);
    let ideal = ent.ideal_yaw;

    if current == ideal {
        return;
    }

    let mut mv = ideal - current;
    let speed = ent.yaw_speed;

    if ideal > current {
        if mv >= 180.0 {
            mv -= 360.0;
        }
    } else if mv <= -180.0 {
        mv += 360.0;
    }

    if mv > 0.0 {
        mv = mv.min(speed);
    } else {
        mv = mv.max(-speed);
    }

    ent.s.angles[YAW] = anglemod(current + mv);
}

/// Walk `dist` along `yaw` after turning toward it. The step is undone if
/// the turn left the actor more than 45 degrees off. A failed step is
/// retried at half length.
pub fn sv_step_direction(ctx: &mut GameContext, ent_idx: usize, yaw: f32, dist: f32) -> bool {
    ctx.edicts[ent_idx].ideal_yaw = yaw;
    m_change_yaw(&mut ctx.edicts[ent_idx]);

    let rad = yaw * DEG_TO_RAD;
    let oldorigin = ctx.edicts[ent_idx].s.origin;

    for d in [dist, dist / 2.0] {
        let mv = [rad.cos() * d, rad.sin() * d, 0.0];
        if sv_movestep(ctx, ent_idx, &mv, false) {
            let ent = &mut ctx.edicts[ent_idx];
            let delta = anglemod(ent.s.angles[YAW] - ent.ideal_yaw);
            // not turned far enough, so don't take the step
            if delta > 45.0 && delta < 315.0 {
                ent.s.origin = oldorigin;
            }
            relink(ctx, ent_idx);
            return true;
        }
    }

    relink(ctx, ent_idx);
    false
}

/// SV_FixCheckBottom
pub fn sv_fix_check_bottom(ent: &mut Edict) {
    ent.flags |= FL_PARTIALGROUND;
}

/// Tries each heading in order until one of them steps.
fn try_headings(ctx: &mut GameContext, actor: usize, headings: &[f32], dist: f32) -> bool {
    headings
        .iter()
        .any(|&yaw| sv_step_direction(ctx, actor, yaw, dist))
}

fn give_up_chase(ctx: &mut GameContext, actor: usize, olddir: f32) {
    log::trace!("entity {actor} can't move, holding heading {olddir}");
    ctx.edicts[actor].ideal_yaw = olddir;

    // if a bridge was pulled out from underneath a monster, it may not have
    // a valid standing position at all
    if !m_check_bottom(ctx, actor) {
        sv_fix_check_bottom(&mut ctx.edicts[actor]);
    }
}

/// SV_NewChaseDir -- pick a new heading toward `enemy` when the current one
/// is blocked.
///
/// Candidates are tried in order: the diagonal straight at the enemy, the
/// two axis headings (larger delta first), the blocked hook, the old
/// heading, a full 15-degree sweep, and finally turning around. Robots
/// only ever try the direct route.
pub fn sv_new_chase_dir(ctx: &mut GameContext, actor: usize, enemy: Option<usize>, dist: f32) {
    let enemy = match enemy {
        Some(e) => e,
        None => return,
    };

    let robot = ctx.edicts[actor].flags.contains(FL_ROBOT);
    let ideal_yaw = ctx.edicts[actor].ideal_yaw;
    let olddir = if robot {
        anglemod((ideal_yaw + 0.5) as i32 as f32)
    } else {
        anglemod(((ideal_yaw / 45.0) as i32 * 45) as f32)
    };
    let turnaround = anglemod(olddir - 180.0);

    let deltax = ctx.edicts[enemy].s.origin[0] - ctx.edicts[actor].s.origin[0];
    let deltay = ctx.edicts[enemy].s.origin[1] - ctx.edicts[actor].s.origin[1];

    let (mut d1, mut d2) = if robot {
        (olddir, olddir)
    } else {
        let d1 = if deltax > 10.0 {
            0.0
        } else if deltax < -10.0 {
            180.0
        } else {
            DI_NODIR
        };
        let d2 = if deltay < -10.0 {
            270.0
        } else if deltay > 10.0 {
            90.0
        } else {
            DI_NODIR
        };
        (d1, d2)
    };

    // try direct route
    let mut headings = Vec::with_capacity(28);
    if d1 != DI_NODIR && d2 != DI_NODIR {
        let tdir = if robot {
            d1
        } else {
            let diagonal = match (d1 == 0.0, d2 == 90.0) {
                (true, true) => 45.0,
                (true, false) => 315.0,
                (false, true) => 135.0,
                (false, false) => 215.0,
            };
            if ctx.rand() & 3 == 1 {
                diagonal + 15.0
            } else if ctx.rand() & 3 == 1 {
                diagonal - 15.0
            } else {
                diagonal
            }
        };
        if tdir != turnaround {
            headings.push(tdir);
        }
    }

    if robot {
        // robots give up if the direct path doesn't work
        if !try_headings(ctx, actor, &headings, dist) {
            give_up_chase(ctx, actor, olddir);
        }
        return;
    }

    // try other directions
    let swap_mask = ctx.edicts[actor].monsterinfo.chase_swap_mask;
    if ctx.rand() & swap_mask == 1 || (deltay as i32).abs() > (deltax as i32).abs() {
        std::mem::swap(&mut d1, &mut d2);
    }
    for d in [d1, d2] {
        if d != DI_NODIR && d != turnaround {
            headings.push(d);
        }
    }

    if try_headings(ctx, actor, &headings, dist) {
        return;
    }

    let blocked = {
        let ent = &ctx.edicts[actor];
        if ent.inuse && ent.health > 0 {
            ent.monsterinfo.blocked
        } else {
            None
        }
    };
    if let Some(blocked) = blocked {
        if blocked(ctx, actor, dist) {
            return;
        }
    }

    // there is no direct path to the player, so pick another direction
    headings.clear();
    headings.push(olddir);

    // randomly determine direction of search
    let sweep: Vec<f32> = if ctx.rand() & 1 != 0 {
        (0..24).map(|i| (i * 15) as f32).collect()
    } else {
        (0..24).rev().map(|i| (i * 15) as f32).collect()
    };
    headings.extend(sweep.into_iter().filter(|&t| t != turnaround));
    headings.push(turnaround);

    if try_headings(ctx, actor, &headings, dist) {
        return;
    }

    give_up_chase(ctx, actor, olddir);
}

/// SV_CloseEnough -- the boxes are within `dist` of each other on every axis.
pub fn sv_close_enough(ctx: &GameContext, ent_idx: usize, goal: usize, dist: f32) -> bool {
    let ent = &ctx.edicts[ent_idx];
    let goal = &ctx.edicts[goal];
    (0..3).all(|i| goal.absmin[i] <= ent.absmax[i] + dist && goal.absmax[i] >= ent.absmin[i] - dist)
}

/// Drops an enemy handle whose entity was freed. Returns true when the
/// actor has nothing left to pursue and has stood down.
fn drop_stale_enemy(ctx: &mut GameContext, ent_idx: usize) -> bool {
    let stale = ctx.edicts[ent_idx].enemy;
    if stale.is_none() || ctx.resolve(stale).is_some() {
        return false;
    }

    log::debug!(
        "{} {}: enemy {} is gone, standing down",
        ctx.edicts[ent_idx].classname,
        ent_idx,
        stale.index
    );
    let ent = &mut ctx.edicts[ent_idx];
    ent.enemy = EntRef::NONE;
    if ent.goalentity == stale {
        ent.goalentity = EntRef::NONE;
    }
    if ctx.goal_of(ent_idx).is_some() {
        return false;
    }

    // hold still until something new is sighted; stand ground would
    // outlive the enemy and keep the actor from ever chasing again
    ctx.edicts[ent_idx].monsterinfo.pausetime = ctx.level.time + 100_000_000.0;
    if let Some(stand) = ctx.edicts[ent_idx].monsterinfo.stand {
        stand(ctx, ent_idx);
    }
    true
}

/// Pauses an actor that is too close to, or comfortably within range of,
/// its enemy. Returns true when it paused.
fn range_pause(ctx: &mut GameContext, ent_idx: usize, enemy: usize) -> bool {
    let now = ctx.level.time;
    let (min_range, ideal_range, rangetime) = {
        let info = &ctx.edicts[ent_idx].monsterinfo;
        (info.min_range, info.ideal_range, info.rangetime)
    };
    let dst = realrange(ctx, ent_idx, enemy);

    let cooldown = if min_range > 0.0 && dst < min_range {
        Some(ctx.config.range_pause_min_cooldown)
    } else if now > rangetime + ctx.config.range_reeval_delay {
        if dst < ideal_range[0] && ctx.rand() & 3 != 0 {
            Some(ctx.config.range_pause_inner_cooldown)
        } else if dst < ideal_range[1] && dst > ideal_range[0] && ctx.rand() & 1 != 0 {
            Some(ctx.config.range_pause_band_cooldown)
        } else {
            None
        }
    } else {
        None
    };

    match cooldown {
        Some(cooldown) => {
            let info = &mut ctx.edicts[ent_idx].monsterinfo;
            info.aiflags |= AI_STAND_GROUND | AI_RANGE_PAUSE;
            info.rangetime = now + cooldown;
            if let Some(stand) = info.stand {
                stand(ctx, ent_idx);
            }
            true
        }
        None => false,
    }
}

/// Picks the stand/walk/run move for an actor trailing its leader.
/// Returns true when the actor stopped next to a player leader.
fn follow_leader(ctx: &mut GameContext, ent_idx: usize) -> bool {
    let moves = match ctx.edicts[ent_idx].monsterinfo.follow_moves {
        Some(m) => m,
        None => return false,
    };
    let leader = match ctx.resolve(ctx.edicts[ent_idx].movetarget) {
        Some(l) if ctx.edicts[l].health > 0 => l,
        _ => return false,
    };

    let next = if ctx.enemy_of(ent_idx).is_some() {
        moves.run
    } else {
        let dst = realrange(ctx, ent_idx, leader);
        if dst > ctx.config.follow_run_range {
            moves.run
        } else if dst < ctx.config.follow_stand_range && ctx.edicts[leader].is_client() {
            let now = ctx.level.time;
            let info = &mut ctx.edicts[ent_idx].monsterinfo;
            info.pausetime = now + 0.5;
            info.currentmove = Some(moves.stand);
            return true;
        } else {
            moves.walk
        }
    };

    ctx.edicts[ent_idx].monsterinfo.currentmove = Some(next);
    false
}

/// M_MoveToGoal -- walk `dist` toward the goal entity, steering around
/// whatever gets in the way.
pub fn m_move_to_goal(ctx: &mut GameContext, ent_idx: usize, dist: f32) {
    {
        let ent = &ctx.edicts[ent_idx];
        if ctx.resolve(ent.groundentity).is_none() && !ent.flags.intersects(FL_FLY | FL_SWIM) {
            return;
        }
    }

    if drop_stale_enemy(ctx, ent_idx) {
        return;
    }
    if ctx.edicts[ent_idx].goalentity.is_some() && ctx.goal_of(ent_idx).is_none() {
        ctx.edicts[ent_idx].goalentity = EntRef::NONE;
    }

    let goal = ctx.goal_of(ent_idx);
    let enemy = ctx.enemy_of(ent_idx);
    let aiflags = ctx.edicts[ent_idx].monsterinfo.aiflags;

    // range checks
    if let Some(enemy) = enemy {
        if !aiflags.intersects(AI_CHASE_THING | AI_CHICKEN)
            && (goal.is_none() || goal == Some(enemy))
            && range_pause(ctx, ent_idx, enemy)
        {
            return;
        }
    }

    if aiflags.contains(AI_FOLLOW_LEADER) && follow_leader(ctx, ent_idx) {
        return;
    }

    // if the next step hits the enemy, return immediately; things being
    // chased on purpose have to actually be touched
    if let Some(enemy) = enemy {
        if !aiflags.contains(AI_CHASE_THING) && sv_close_enough(ctx, ent_idx, enemy, dist) {
            return;
        }
    }

    // bump around...
    if ctx.edicts[ent_idx].inuse {
        let ideal_yaw = ctx.edicts[ent_idx].ideal_yaw;
        if ctx.rand() & 3 == 1 || !sv_step_direction(ctx, ent_idx, ideal_yaw, dist) {
            sv_new_chase_dir(ctx, ent_idx, goal, dist);
        }
    }
}

/// M_walkmove -- step `dist` along `yaw` without turning.
pub fn m_walkmove(ctx: &mut GameContext, ent_idx: usize, yaw: f32, dist: f32) -> bool {
    {
        let ent = &ctx.edicts[ent_idx];
        if ctx.resolve(ent.groundentity).is_none() && !ent.flags.intersects(FL_FLY | FL_SWIM) {
            return false;
        }
    }

    let rad = yaw * DEG_TO_RAD;
    let mv = [rad.cos() * dist, rad.sin() * dist, 0.0];
    sv_movestep(ctx, ent_idx, &mv, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_world::{spawn_test_client, spawn_test_monster, TestWorld};

    fn mark_jump(ctx: &mut GameContext, idx: usize) {
        ctx.edicts[idx].monsterinfo.idle_time = -1.0;
    }

    fn mark_stand(ctx: &mut GameContext, idx: usize) {
        ctx.edicts[idx].monsterinfo.search_time = -1.0;
    }

    fn mark_blocked(ctx: &mut GameContext, idx: usize, _dist: f32) -> bool {
        ctx.edicts[idx].monsterinfo.attack_finished = -1.0;
        true
    }

    /// An enemy that isn't linked into the world.
    fn spawn_marker(ctx: &mut GameContext, origin: Vec3) -> usize {
        let idx = ctx.spawn();
        ctx.edicts[idx].s.origin = origin;
        ctx.edicts[idx].absmin = origin;
        ctx.edicts[idx].absmax = origin;
        ctx.edicts[idx].health = 100;
        idx
    }

    fn set_enemy(ctx: &mut GameContext, idx: usize, enemy: usize) {
        let r = ctx.entref(enemy);
        ctx.edicts[idx].enemy = r;
    }

    /// Four walls two units off each side of a 32-wide box at the origin.
    fn box_in(world: &TestWorld) {
        world.add_brush([18.0, -60.0, 0.0], [60.0, 60.0, 200.0], CONTENTS_SOLID);
        world.add_brush([-60.0, -60.0, 0.0], [-18.0, 60.0, 200.0], CONTENTS_SOLID);
        world.add_brush([-60.0, 18.0, 0.0], [60.0, 60.0, 200.0], CONTENTS_SOLID);
        world.add_brush([-60.0, -60.0, 0.0], [60.0, -18.0, 200.0], CONTENTS_SOLID);
    }

    // ============================================================
    // M_CheckBottom
    // ============================================================

    #[test]
    fn test_check_bottom_flat_floor_fast_path() {
        let world = TestWorld::with_floor();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        assert!(m_check_bottom(&mut ctx, m));
        assert_eq!(ctx.c_yes, 1);
        assert_eq!(ctx.c_no, 0);
    }

    #[test]
    fn test_check_bottom_over_chasm_fails() {
        let world = TestWorld::new();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        assert!(!m_check_bottom(&mut ctx, m));
    }

    #[test]
    fn test_check_bottom_half_on_stair_is_fine() {
        let world = TestWorld::with_floor();
        world.add_brush([8.0, -100.0, 0.0], [200.0, 100.0, 16.0], CONTENTS_SOLID);
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 40.0]);
        assert!(m_check_bottom(&mut ctx, m));
        assert_eq!(ctx.c_no, 1);
    }

    #[test]
    fn test_check_bottom_corner_over_drop_fails() {
        let world = TestWorld::new();
        // ledge ends under the middle of the box, the floor below is far down
        world.add_brush([-200.0, -100.0, -64.0], [4.0, 100.0, 0.0], CONTENTS_SOLID);
        world.add_brush([-200.0, -100.0, -200.0], [200.0, 100.0, -100.0], CONTENTS_SOLID);
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        assert!(!m_check_bottom(&mut ctx, m));
    }

    // ============================================================
    // SV_movestep -- ground
    // ============================================================

    #[test]
    fn test_step_direction_flat_floor() {
        let world = TestWorld::with_floor();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);

        assert!(sv_step_direction(&mut ctx, m, 0.0, 10.0));
        let e = &ctx.edicts[m];
        assert!((e.s.origin[0] - 10.0).abs() < 0.01);
        assert!(e.s.origin[1].abs() < 0.01);
        assert!((e.s.origin[2] - 24.0).abs() < 0.1);
        assert_eq!(ctx.resolve(e.groundentity), Some(0));
    }

    #[test]
    fn test_step_climbs_stair() {
        let world = TestWorld::with_floor();
        world.add_brush([20.0, -200.0, 0.0], [200.0, 200.0, 16.0], CONTENTS_SOLID);
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        ctx.edicts[m].monsterinfo.jump = Some(mark_jump);
        ctx.edicts[m].monsterinfo.jumpup = 48.0;
        let enemy = spawn_marker(&mut ctx, [300.0, 0.0, 40.0]);
        set_enemy(&mut ctx, m, enemy);

        assert!(sv_movestep(&mut ctx, m, &[10.0, 0.0, 0.0], true));
        let e = &ctx.edicts[m];
        assert!((e.s.origin[2] - 40.0).abs() < 0.1);
        // a stair is walked, never jumped
        assert_eq!(e.velocity, [0.0; 3]);
        assert_eq!(e.monsterinfo.idle_time, 0.0);
    }

    #[test]
    fn test_step_into_wall_leaves_actor_untouched() {
        let world = TestWorld::with_floor();
        world.add_brush([20.0, -200.0, 0.0], [200.0, 200.0, 100.0], CONTENTS_SOLID);
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        let before = ctx.edicts[m].s.origin;
        let ground = ctx.edicts[m].groundentity;

        assert!(!sv_movestep(&mut ctx, m, &[10.0, 0.0, 0.0], true));
        assert_eq!(ctx.edicts[m].s.origin, before);
        assert_eq!(ctx.edicts[m].groundentity, ground);
    }

    #[test]
    fn test_jump_up_onto_ledge() {
        let world = TestWorld::with_floor();
        world.add_brush([20.0, -200.0, 0.0], [200.0, 200.0, 40.0], CONTENTS_SOLID);
        let mut ctx = world.context(1);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        ctx.edicts[m].monsterinfo.jump = Some(mark_jump);
        ctx.edicts[m].monsterinfo.jumpup = 48.0;
        let player = spawn_test_client(&mut ctx, 1, [300.0, 0.0, 88.0]);
        set_enemy(&mut ctx, m, player);

        assert!(sv_movestep(&mut ctx, m, &[10.0, 0.0, 0.0], true));
        let e = &ctx.edicts[m];
        let jumpheight = e.s.origin[2] - 24.0;
        assert!(jumpheight > 40.0 && jumpheight < 48.0);
        assert!((e.velocity[2] - (2.5 * jumpheight + 80.0)).abs() < 1e-3);
        assert_eq!(e.velocity[0], 100.0);
        assert_eq!(e.monsterinfo.idle_time, -1.0);
    }

    #[test]
    fn test_no_jump_when_not_facing_the_wall() {
        let world = TestWorld::with_floor();
        world.add_brush([20.0, -200.0, 0.0], [200.0, 200.0, 40.0], CONTENTS_SOLID);
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        ctx.edicts[m].s.angles[YAW] = 90.0;
        ctx.edicts[m].monsterinfo.jump = Some(mark_jump);
        ctx.edicts[m].monsterinfo.jumpup = 48.0;
        let enemy = spawn_marker(&mut ctx, [300.0, 0.0, 88.0]);
        set_enemy(&mut ctx, m, enemy);

        assert!(!sv_movestep(&mut ctx, m, &[10.0, 0.0, 0.0], true));
        assert_eq!(ctx.edicts[m].s.origin, [0.0, 0.0, 24.0]);
        assert_eq!(ctx.edicts[m].velocity, [0.0; 3]);
    }

    #[test]
    fn test_no_jump_without_jump_ability() {
        let world = TestWorld::with_floor();
        world.add_brush([20.0, -200.0, 0.0], [200.0, 200.0, 40.0], CONTENTS_SOLID);
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        ctx.edicts[m].monsterinfo.jumpup = 48.0;
        let enemy = spawn_marker(&mut ctx, [300.0, 0.0, 88.0]);
        set_enemy(&mut ctx, m, enemy);

        assert!(!sv_movestep(&mut ctx, m, &[10.0, 0.0, 0.0], true));
        assert_eq!(ctx.edicts[m].velocity, [0.0; 3]);
    }

    /// A platform ending at x = 32 with a floor 100 units below it.
    fn ledge_world() -> TestWorld {
        let world = TestWorld::new();
        world.add_brush([-200.0, -200.0, -64.0], [32.0, 200.0, 0.0], CONTENTS_SOLID);
        world.add_brush([-200.0, -200.0, -200.0], [600.0, 200.0, -100.0], CONTENTS_SOLID);
        world
    }

    #[test]
    fn test_jump_down_from_ledge() {
        let world = ledge_world();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        ctx.edicts[m].monsterinfo.jump = Some(mark_jump);
        ctx.edicts[m].monsterinfo.jumpdn = 160.0;
        let enemy = spawn_marker(&mut ctx, [300.0, 0.0, -76.0]);
        set_enemy(&mut ctx, m, enemy);

        assert!(sv_movestep(&mut ctx, m, &[50.0, 0.0, 0.0], true));
        let e = &ctx.edicts[m];
        assert_eq!(e.velocity, [500.0, 0.0, 100.0]);
        // dropped more than the snap height, so it is held up and left to fall
        assert!((e.s.origin[2] - 34.0).abs() < 1e-3);
        assert_eq!(e.s.origin[0], 50.0);
        // the up-jump hook is not used going down
        assert_eq!(e.monsterinfo.idle_time, 0.0);
    }

    #[test]
    fn test_walking_off_edge_fails_without_jump() {
        let world = ledge_world();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        let enemy = spawn_marker(&mut ctx, [300.0, 0.0, -76.0]);
        set_enemy(&mut ctx, m, enemy);

        assert!(!sv_movestep(&mut ctx, m, &[50.0, 0.0, 0.0], true));
        assert_eq!(ctx.edicts[m].s.origin, [0.0, 0.0, 24.0]);
        assert_eq!(ctx.edicts[m].velocity, [0.0; 3]);
    }

    #[test]
    fn test_dangling_over_edge_is_undone() {
        let world = ledge_world();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);

        // box still catches the ledge, but most of it hangs in the air
        assert!(!sv_movestep(&mut ctx, m, &[40.0, 0.0, 0.0], true));
        assert_eq!(ctx.edicts[m].s.origin, [0.0, 0.0, 24.0]);
    }

    #[test]
    fn test_partial_ground_lets_actor_fall() {
        let world = ledge_world();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        ctx.edicts[m].flags |= FL_PARTIALGROUND;

        assert!(sv_movestep(&mut ctx, m, &[40.0, 0.0, 0.0], true));
        assert_eq!(ctx.edicts[m].s.origin[0], 40.0);
        assert!(ctx.edicts[m].flags.contains(FL_PARTIALGROUND));

        assert!(sv_movestep(&mut ctx, m, &[50.0, 0.0, 0.0], true));
        assert_eq!(ctx.edicts[m].s.origin[0], 90.0);
        assert!((ctx.edicts[m].s.origin[2] - 24.0).abs() < 0.1);
        assert!(ctx.edicts[m].groundentity.is_none());
    }

    #[test]
    fn test_avoids_stepping_into_water() {
        let world = TestWorld::with_floor();
        world.add_brush([5.0, -200.0, 0.0], [200.0, 200.0, 10.0], CONTENTS_WATER);
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        assert!(!sv_movestep(&mut ctx, m, &[10.0, 0.0, 0.0], true));

        // already wet: carry on
        ctx.edicts[m].waterlevel = 1;
        assert!(sv_movestep(&mut ctx, m, &[10.0, 0.0, 0.0], true));
    }

    #[test]
    fn test_actor_wades_but_avoids_lava() {
        let world = TestWorld::with_floor();
        world.add_brush([5.0, -200.0, 0.0], [200.0, 200.0, 10.0], CONTENTS_WATER);
        world.add_brush([-200.0, -200.0, 0.0], [-5.0, 200.0, 10.0], CONTENTS_LAVA);
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        ctx.edicts[m].monsterinfo.aiflags |= AI_ACTOR;

        assert!(!sv_movestep(&mut ctx, m, &[-10.0, 0.0, 0.0], true));
        assert!(sv_movestep(&mut ctx, m, &[10.0, 0.0, 0.0], true));
    }

    #[test]
    fn test_grenade_avoidance() {
        let world = TestWorld::with_floor();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        let g = ctx.spawn();
        ctx.edicts[g].classname = "grenade".to_string();
        ctx.edicts[g].solid = Solid::Bbox;

        // 64 units behind, stepping away from it
        ctx.edicts[g].s.origin = [-64.0, 0.0, 24.0];
        assert!(sv_movestep(&mut ctx, m, &[136.0, 0.0, 0.0], true));

        // 200 units ahead, stepping to within 64 of it
        ctx.edicts[m].s.origin = [0.0, 0.0, 24.0];
        ctx.edicts[g].s.origin = [200.0, 0.0, 24.0];
        assert!(!sv_movestep(&mut ctx, m, &[136.0, 0.0, 0.0], true));
        assert_eq!(ctx.edicts[m].s.origin, [0.0, 0.0, 24.0]);

        // unless that is exactly what it is after
        ctx.edicts[m].monsterinfo.aiflags |= AI_CHASE_THING;
        assert!(sv_movestep(&mut ctx, m, &[136.0, 0.0, 0.0], true));
    }

    #[test]
    fn test_grenade_classname_any_case() {
        let world = TestWorld::with_floor();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        let g = ctx.spawn();
        ctx.edicts[g].classname = "HGrenade".to_string();
        ctx.edicts[g].solid = Solid::Bbox;
        ctx.edicts[g].s.origin = [200.0, 0.0, 24.0];

        assert!(!sv_movestep(&mut ctx, m, &[136.0, 0.0, 0.0], true));
        assert_eq!(ctx.edicts[m].s.origin, [0.0, 0.0, 24.0]);

        ctx.edicts[g].classname = "Grenade".to_string();
        assert!(!sv_movestep(&mut ctx, m, &[136.0, 0.0, 0.0], true));
    }

    fn spawn_laser(ctx: &mut GameContext, origin: Vec3, movedir: Vec3) -> usize {
        let l = ctx.spawn();
        ctx.edicts[l].classname = "target_laser".to_string();
        ctx.edicts[l].s.origin = origin;
        ctx.edicts[l].movedir = movedir;
        ctx.edicts[l].s.old_origin = vector_ma(&origin, 2048.0, &movedir);
        l
    }

    #[test]
    fn test_laser_blocks_step() {
        let world = TestWorld::with_floor();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        let l = spawn_laser(&mut ctx, [20.0, -200.0, 30.0], [0.0, 1.0, 0.0]);

        assert!(!sv_movestep(&mut ctx, m, &[10.0, 0.0, 0.0], true));

        // switched off
        ctx.edicts[l].style = 2;
        assert!(sv_movestep(&mut ctx, m, &[10.0, 0.0, 0.0], true));
    }

    #[test]
    fn test_laser_out_of_the_way_or_already_crossing() {
        let world = TestWorld::with_floor();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        let far = spawn_laser(&mut ctx, [60.0, -200.0, 30.0], [0.0, 1.0, 0.0]);
        assert!(sv_movestep(&mut ctx, m, &[10.0, 0.0, 0.0], true));

        ctx.free_edict(far);
        // a beam through the actor itself doesn't stop it moving
        let origin = ctx.edicts[m].s.origin;
        spawn_laser(&mut ctx, [origin[0], -200.0, 30.0], [0.0, 1.0, 0.0]);
        assert!(sv_movestep(&mut ctx, m, &[10.0, 0.0, 0.0], true));
    }

    // ============================================================
    // SV_movestep -- fly / swim
    // ============================================================

    fn spawn_flyer(ctx: &mut GameContext, origin: Vec3) -> usize {
        let m = spawn_test_monster(ctx, origin);
        ctx.edicts[m].flags |= FL_FLY;
        ctx.edicts[m].groundentity = EntRef::NONE;
        m
    }

    #[test]
    fn test_flyer_descends_toward_player() {
        let world = TestWorld::new();
        let mut ctx = world.context(1);
        let m = spawn_flyer(&mut ctx, [0.0, 0.0, 200.0]);
        let player = spawn_test_client(&mut ctx, 1, [100.0, 0.0, 100.0]);
        set_enemy(&mut ctx, m, player);

        assert!(sv_movestep(&mut ctx, m, &[10.0, 0.0, 0.0], true));
        assert_eq!(ctx.edicts[m].s.origin, [10.0, 0.0, 192.0]);
        assert_eq!(ctx.goal_of(m), Some(player));
    }

    #[test]
    fn test_flyer_holds_band_above_player() {
        let world = TestWorld::new();
        let mut ctx = world.context(1);
        let m = spawn_flyer(&mut ctx, [0.0, 0.0, 135.0]);
        let player = spawn_test_client(&mut ctx, 1, [100.0, 0.0, 100.0]);
        set_enemy(&mut ctx, m, player);

        assert!(sv_movestep(&mut ctx, m, &[10.0, 0.0, 0.0], true));
        assert_eq!(ctx.edicts[m].s.origin[2], 135.0);
    }

    #[test]
    fn test_flyer_matches_height_of_non_player() {
        let world = TestWorld::new();
        let mut ctx = world.context(0);
        let m = spawn_flyer(&mut ctx, [0.0, 0.0, 103.0]);
        let enemy = spawn_marker(&mut ctx, [100.0, 0.0, 100.0]);
        set_enemy(&mut ctx, m, enemy);

        assert!(sv_movestep(&mut ctx, m, &[10.0, 0.0, 0.0], true));
        assert_eq!(ctx.edicts[m].s.origin[2], 100.0);
    }

    #[test]
    fn test_flyer_falls_back_to_level_move() {
        let world = TestWorld::new();
        // ceiling right below: the descent is blocked, the level move isn't
        world.add_brush([-200.0, -200.0, 100.0], [200.0, 200.0, 175.0], CONTENTS_SOLID);
        let mut ctx = world.context(1);
        let m = spawn_flyer(&mut ctx, [0.0, 0.0, 200.0]);
        let player = spawn_test_client(&mut ctx, 1, [100.0, 0.0, 0.0]);
        set_enemy(&mut ctx, m, player);

        assert!(sv_movestep(&mut ctx, m, &[10.0, 0.0, 0.0], true));
        assert_eq!(ctx.edicts[m].s.origin, [10.0, 0.0, 200.0]);
    }

    #[test]
    fn test_flyer_refuses_water() {
        let world = TestWorld::new();
        world.add_brush([-200.0, -200.0, -100.0], [200.0, 200.0, 30.0], CONTENTS_WATER);
        let mut ctx = world.context(0);
        let m = spawn_flyer(&mut ctx, [0.0, 0.0, 50.0]);
        assert!(!sv_movestep(&mut ctx, m, &[10.0, 0.0, 0.0], true));
        assert_eq!(ctx.edicts[m].s.origin, [0.0, 0.0, 50.0]);
    }

    #[test]
    fn test_swimmer_stays_in_water() {
        let world = TestWorld::new();
        world.add_brush([-200.0, -200.0, -100.0], [200.0, 200.0, 30.0], CONTENTS_WATER);
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 0.0]);
        ctx.edicts[m].flags |= FL_SWIM;
        ctx.edicts[m].waterlevel = 3;
        assert!(sv_movestep(&mut ctx, m, &[10.0, 0.0, 0.0], true));

        // half out of the water, it won't climb further out
        ctx.edicts[m].waterlevel = 1;
        assert!(!sv_movestep(&mut ctx, m, &[0.0, 0.0, 60.0], true));
    }

    // ============================================================
    // Turning and chasing
    // ============================================================

    #[test]
    fn test_change_yaw_takes_short_way_round() {
        let mut e = Edict::default();
        e.yaw_speed = 20.0;
        e.s.angles[YAW] = 350.0;
        e.ideal_yaw = 10.0;
        m_change_yaw(&mut e);
        assert!((e.s.angles[YAW] - 10.0).abs() < 0.01);

        e.s.angles[YAW] = 10.0;
        e.ideal_yaw = 300.0;
        m_change_yaw(&mut e);
        assert!((e.s.angles[YAW] - 350.0).abs() < 0.01);
    }

    #[test]
    fn test_change_yaw_converges() {
        let mut e = Edict::default();
        e.yaw_speed = 20.0;
        e.ideal_yaw = 180.0;
        let turns = (180.0f32 / e.yaw_speed).ceil() as usize;
        for _ in 0..turns {
            m_change_yaw(&mut e);
        }
        assert!((e.s.angles[YAW] - 180.0).abs() < 0.01);
    }

    #[test]
    fn test_step_direction_undone_until_facing() {
        let world = TestWorld::with_floor();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);

        // a 90 degree turn at 20 per frame: the step is legal but not taken
        assert!(sv_step_direction(&mut ctx, m, 90.0, 10.0));
        assert_eq!(ctx.edicts[m].s.origin, [0.0, 0.0, 24.0]);
        assert!((ctx.edicts[m].s.angles[YAW] - 20.0).abs() < 0.01);

        for _ in 0..3 {
            sv_step_direction(&mut ctx, m, 90.0, 10.0);
        }
        assert!(ctx.edicts[m].s.origin[1] > 5.0);
    }

    #[test]
    fn test_step_direction_retries_half_distance() {
        let world = TestWorld::with_floor();
        world.add_brush([24.0, -200.0, 0.0], [200.0, 200.0, 100.0], CONTENTS_SOLID);
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);

        assert!(sv_step_direction(&mut ctx, m, 0.0, 10.0));
        assert!((ctx.edicts[m].s.origin[0] - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_new_chase_dir_boxed_in_terminates() {
        let world = TestWorld::with_floor();
        box_in(&world);
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        let enemy = spawn_marker(&mut ctx, [300.0, 200.0, 24.0]);
        ctx.edicts[m].ideal_yaw = 100.0;

        sv_new_chase_dir(&mut ctx, m, Some(enemy), 10.0);
        let e = &ctx.edicts[m];
        assert_eq!(e.s.origin, [0.0, 0.0, 24.0]);
        // settles back on the old 45-degree heading
        assert_eq!(e.ideal_yaw, 90.0);
        assert!(!e.flags.contains(FL_PARTIALGROUND));
    }

    #[test]
    fn test_new_chase_dir_consults_blocked_hook() {
        let world = TestWorld::with_floor();
        box_in(&world);
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        ctx.edicts[m].monsterinfo.blocked = Some(mark_blocked);
        let enemy = spawn_marker(&mut ctx, [300.0, 0.0, 24.0]);

        let traces = world.trace_count();
        sv_new_chase_dir(&mut ctx, m, Some(enemy), 10.0);
        assert_eq!(ctx.edicts[m].monsterinfo.attack_finished, -1.0);
        // the hook handled it, so no sweep was run
        assert!(world.trace_count() - traces < 10);
    }

    #[test]
    fn test_new_chase_dir_finds_gap() {
        let world = TestWorld::with_floor();
        world.add_brush([18.0, -60.0, 0.0], [60.0, 60.0, 200.0], CONTENTS_SOLID);
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        ctx.edicts[m].yaw_speed = 360.0;
        let enemy = spawn_marker(&mut ctx, [300.0, 0.0, 24.0]);

        sv_new_chase_dir(&mut ctx, m, Some(enemy), 10.0);
        let e = &ctx.edicts[m];
        assert_ne!(e.s.origin, [0.0, 0.0, 24.0]);
        assert_ne!(e.ideal_yaw, 0.0);
    }

    #[test]
    fn test_robot_gives_up_after_direct_route() {
        let world = TestWorld::with_floor();
        world.add_brush([18.0, -60.0, 0.0], [60.0, 60.0, 200.0], CONTENTS_SOLID);
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        ctx.edicts[m].flags |= FL_ROBOT;
        ctx.edicts[m].yaw_speed = 360.0;
        let enemy = spawn_marker(&mut ctx, [300.0, 200.0, 24.0]);

        sv_new_chase_dir(&mut ctx, m, Some(enemy), 10.0);
        assert_eq!(ctx.edicts[m].s.origin, [0.0, 0.0, 24.0]);
        assert_eq!(ctx.edicts[m].ideal_yaw, 0.0);
    }

    #[test]
    fn test_new_chase_dir_without_enemy_does_nothing() {
        let world = TestWorld::with_floor();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        let traces = world.trace_count();
        sv_new_chase_dir(&mut ctx, m, None, 10.0);
        assert_eq!(world.trace_count(), traces);
    }

    #[test]
    fn test_close_enough() {
        let world = TestWorld::with_floor();
        let mut ctx = world.context(0);
        let a = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        let b = spawn_test_monster(&mut ctx, [50.0, 0.0, 24.0]);
        // boxes are 18 apart, 16 once padded for linking
        assert!(!sv_close_enough(&ctx, a, b, 10.0));
        assert!(sv_close_enough(&ctx, a, b, 16.0));
    }

    // ============================================================
    // M_MoveToGoal / M_walkmove
    // ============================================================

    #[test]
    fn test_move_to_goal_needs_ground() {
        let world = TestWorld::with_floor();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        let enemy = spawn_marker(&mut ctx, [300.0, 0.0, 24.0]);
        set_enemy(&mut ctx, m, enemy);
        ctx.edicts[m].goalentity = ctx.edicts[m].enemy;
        ctx.edicts[m].groundentity = EntRef::NONE;

        let traces = world.trace_count();
        m_move_to_goal(&mut ctx, m, 10.0);
        assert_eq!(world.trace_count(), traces);
        assert_eq!(ctx.edicts[m].s.origin, [0.0, 0.0, 24.0]);
    }

    #[test]
    fn test_move_to_goal_heads_for_enemy() {
        let world = TestWorld::with_floor();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        let enemy = spawn_marker(&mut ctx, [300.0, 0.0, 24.0]);
        set_enemy(&mut ctx, m, enemy);
        ctx.edicts[m].goalentity = ctx.edicts[m].enemy;

        for _ in 0..10 {
            m_move_to_goal(&mut ctx, m, 10.0);
        }
        assert!(ctx.edicts[m].s.origin[0] > 20.0);
    }

    #[test]
    fn test_move_to_goal_stale_enemy_stands_down() {
        let world = TestWorld::with_floor();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        ctx.edicts[m].monsterinfo.stand = Some(mark_stand);
        let enemy = spawn_marker(&mut ctx, [300.0, 0.0, 24.0]);
        set_enemy(&mut ctx, m, enemy);
        ctx.edicts[m].goalentity = ctx.edicts[m].enemy;

        ctx.free_edict(enemy);
        // the slot is reused by something else entirely
        let other = spawn_marker(&mut ctx, [-300.0, 0.0, 24.0]);
        assert_eq!(other, enemy);

        let traces = world.trace_count();
        m_move_to_goal(&mut ctx, m, 10.0);
        let e = &ctx.edicts[m];
        assert!(e.enemy.is_none());
        assert!(e.goalentity.is_none());
        assert!(!e.monsterinfo.aiflags.contains(AI_STAND_GROUND));
        assert!(e.monsterinfo.pausetime > 1000.0);
        assert_eq!(e.monsterinfo.search_time, -1.0);
        assert_eq!(e.s.origin, [0.0, 0.0, 24.0]);
        assert_eq!(world.trace_count(), traces);
    }

    #[test]
    fn test_move_to_goal_pauses_inside_min_range() {
        let world = TestWorld::with_floor();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        ctx.edicts[m].monsterinfo.stand = Some(mark_stand);
        ctx.edicts[m].monsterinfo.min_range = 200.0;
        let enemy = spawn_marker(&mut ctx, [150.0, 0.0, 24.0]);
        set_enemy(&mut ctx, m, enemy);
        ctx.level.time = 10.0;

        m_move_to_goal(&mut ctx, m, 10.0);
        let info = &ctx.edicts[m].monsterinfo;
        assert!(info.aiflags.contains(AI_STAND_GROUND | AI_RANGE_PAUSE));
        assert_eq!(info.rangetime, 10.5);
        assert_eq!(info.search_time, -1.0);
        assert_eq!(ctx.edicts[m].s.origin, [0.0, 0.0, 24.0]);
    }

    #[test]
    fn test_range_pause_skipped_when_chasing_thing() {
        let world = TestWorld::with_floor();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        ctx.edicts[m].monsterinfo.stand = Some(mark_stand);
        ctx.edicts[m].monsterinfo.min_range = 200.0;
        ctx.edicts[m].monsterinfo.aiflags |= AI_CHASE_THING;
        let enemy = spawn_marker(&mut ctx, [150.0, 0.0, 24.0]);
        set_enemy(&mut ctx, m, enemy);

        m_move_to_goal(&mut ctx, m, 10.0);
        assert!(!ctx.edicts[m].monsterinfo.aiflags.contains(AI_RANGE_PAUSE));
    }

    #[test]
    fn test_cowering_actor_never_range_pauses() {
        let world = TestWorld::with_floor();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        ctx.edicts[m].monsterinfo.stand = Some(mark_stand);
        ctx.edicts[m].monsterinfo.min_range = 200.0;
        ctx.edicts[m].monsterinfo.aiflags |= AI_CHICKEN;
        let enemy = spawn_marker(&mut ctx, [150.0, 0.0, 24.0]);
        set_enemy(&mut ctx, m, enemy);
        ctx.level.time = 10.0;

        m_move_to_goal(&mut ctx, m, 10.0);
        let info = &ctx.edicts[m].monsterinfo;
        assert!(!info.aiflags.intersects(AI_STAND_GROUND | AI_RANGE_PAUSE));
        assert_ne!(info.search_time, -1.0);
    }

    static FOLLOW_FRAMES: [MFrame; 1] = [MFrame::new(Ai::Stand, 0.0, None)];
    static FOLLOW_MOVES: [MMove; 3] = [
        MMove { firstframe: 0, lastframe: 0, frames: &FOLLOW_FRAMES, endfunc: None },
        MMove { firstframe: 1, lastframe: 1, frames: &FOLLOW_FRAMES, endfunc: None },
        MMove { firstframe: 2, lastframe: 2, frames: &FOLLOW_FRAMES, endfunc: None },
    ];

    #[test]
    fn test_follow_leader_picks_move_by_distance() {
        let world = TestWorld::with_floor();
        let mut ctx = world.context(1);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        {
            let info = &mut ctx.edicts[m].monsterinfo;
            info.moves = &FOLLOW_MOVES;
            info.aiflags |= AI_FOLLOW_LEADER;
            info.follow_moves = Some(FollowMoves { stand: 0, walk: 1, run: 2 });
        }
        let leader = spawn_test_client(&mut ctx, 1, [100.0, 0.0, 24.0]);
        let r = ctx.entref(leader);
        ctx.edicts[m].movetarget = r;
        ctx.edicts[m].goalentity = r;
        ctx.level.time = 3.0;

        m_move_to_goal(&mut ctx, m, 10.0);
        assert_eq!(ctx.edicts[m].monsterinfo.currentmove, Some(0));
        assert_eq!(ctx.edicts[m].monsterinfo.pausetime, 3.5);

        ctx.edicts[leader].s.origin = [200.0, 0.0, 24.0];
        m_move_to_goal(&mut ctx, m, 10.0);
        assert_eq!(ctx.edicts[m].monsterinfo.currentmove, Some(1));

        ctx.edicts[leader].s.origin = [600.0, 0.0, 24.0];
        m_move_to_goal(&mut ctx, m, 10.0);
        assert_eq!(ctx.edicts[m].monsterinfo.currentmove, Some(2));
    }

    #[test]
    fn test_walkmove() {
        let world = TestWorld::with_floor();
        let mut ctx = world.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        let links = world.link_count();

        assert!(m_walkmove(&mut ctx, m, 90.0, 8.0));
        assert!((ctx.edicts[m].s.origin[1] - 8.0).abs() < 0.01);
        assert!(world.link_count() > links);

        ctx.edicts[m].groundentity = EntRef::NONE;
        assert!(!m_walkmove(&mut ctx, m, 90.0, 8.0));
    }
}
