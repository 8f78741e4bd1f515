// m_aim.rs -- lead and ballistic aim for monster projectiles
// Converted from: myq2-original/game/m_actor_weap.c (grenade arc) + m_tank.c (rocket lead)
//
// Copyright (C) 1997-2001 Id Software, Inc.
// Licensed under the GNU General Public License v2 or later.

use crate::g_local::*;

/// Launch speed of a hand grenade, sqrt(400000).
pub const GRENADE_VELOCITY: f32 = 632.455_5;

/// Default sv_gravity.
pub const DEFAULT_GRAVITY: f32 = 800.0;

const MAX_REFINEMENTS: usize = 10;
const ACCEPTABLE_ERROR: f32 = 4.0;

/// Where `target` will be when a projectile fired from `start` at `speed`
/// arrives, assuming it keeps moving at `target_velocity`.
pub fn predict_position(start: &Vec3, target: &Vec3, target_velocity: &Vec3, speed: f32) -> Vec3 {
    if speed <= 0.0 {
        return *target;
    }
    let dist = vector_length(&vector_subtract(target, start));
    let time = dist / speed;
    vector_ma(target, time, target_velocity)
}

/// Point to fire at: `target`, or with probability `chance` the spot it
/// will have moved to by the time the projectile gets there.
pub fn lead_target(
    ctx: &mut GameContext,
    start: &Vec3,
    target: &Vec3,
    target_velocity: &Vec3,
    speed: f32,
    chance: f32,
) -> Vec3 {
    if chance > 0.0 && ctx.random() < chance {
        predict_position(start, target, target_velocity, speed)
    } else {
        *target
    }
}

// ============================================================
// Grenade arc
// ============================================================

// height of the arc at horizontal distance `x` when launched along `dir`
fn arc_height(dir: &Vec3, x: f32, gravity: f32) -> Option<f32> {
    let cosa = (dir[0] * dir[0] + dir[1] * dir[1]).sqrt();
    if cosa <= 0.0 {
        return None;
    }
    let t = x / (GRENADE_VELOCITY * cosa);
    Some(GRENADE_VELOCITY * dir[2] * t - 0.5 * gravity * t * (t + FRAMETIME))
}

/// Direction to throw a grenade from `start` so that it drops onto
/// `target`.
///
/// The aim point is raised by the remaining vertical miss each pass. It
/// stops after a few passes, once the miss is within a few units, or as
/// soon as a pass misses by more than the one before it (the target is out
/// of range); the best pass wins. The grenade inherits the thrower's
/// velocity, so that drift is taken off the target first.
pub fn aim_grenade(start: &Vec3, target: &Vec3, shooter_velocity: &Vec3, gravity: f32) -> Vec3 {
    let mut delta = vector_subtract(target, start);
    let flight = vector_length(&delta) / GRENADE_VELOCITY;
    delta = vector_ma(&delta, -flight, shooter_velocity);

    let x = (delta[0] * delta[0] + delta[1] * delta[1]).sqrt();
    if x < 1.0 {
        vector_normalize(&mut delta);
        return delta;
    }

    let mut aim_z = delta[2];
    let mut best_z = aim_z;
    let mut last_error = f32::INFINITY;

    for _ in 0..MAX_REFINEMENTS {
        let mut dir = [delta[0], delta[1], aim_z];
        vector_normalize(&mut dir);
        let Some(y) = arc_height(&dir, x, gravity) else {
            break;
        };

        let error = delta[2] - y;
        if error.abs() >= last_error {
            break;
        }
        best_z = aim_z;
        last_error = error.abs();
        if last_error <= ACCEPTABLE_ERROR {
            break;
        }
        aim_z += error;
    }

    let mut dir = [delta[0], delta[1], best_z];
    vector_normalize(&mut dir);
    dir
}
