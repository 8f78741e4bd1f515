// g_utils.rs -- misc utility functions for game module
// Converted from: myq2-original/game/g_utils.c
//
// Copyright (C) 1997-2001 Id Software, Inc.
// Licensed under the GNU General Public License v2 or later.

use crate::g_local::*;

/// Offsets a muzzle position from `point` along the given basis.
pub fn g_project_source(point: &Vec3, distance: &Vec3, forward: &Vec3, right: &Vec3) -> Vec3 {
    [
        point[0] + forward[0] * distance[0] + right[0] * distance[1],
        point[1] + forward[1] * distance[0] + right[1] * distance[1],
        point[2] + forward[2] * distance[0] + right[2] * distance[1] + distance[2],
    ]
}

/// gi.linkentity -- refresh the absolute bounds and hand the entity to the
/// engine's spatial index.
pub fn link_entity(ctx: &mut GameContext, ent_idx: usize) {
    {
        let ent = &mut ctx.edicts[ent_idx];
        ent.size = vector_subtract(&ent.maxs, &ent.mins);
        ent.absmin = vector_add(&ent.s.origin, &ent.mins);
        ent.absmax = vector_add(&ent.s.origin, &ent.maxs);

        // because movement is clipped an epsilon away from an actual edge,
        // we must fully check even when bounding boxes don't quite touch
        for i in 0..3 {
            ent.absmin[i] -= 1.0;
            ent.absmax[i] += 1.0;
        }
        ent.linkcount += 1;
    }
    ctx.gi.linkentity(ent_idx, &ctx.edicts[ent_idx]);
}

/// G_TouchTriggers -- call the touch function of every trigger the entity
/// now overlaps.
pub fn g_touch_triggers(ctx: &mut GameContext, ent_idx: usize) {
    let ent = &ctx.edicts[ent_idx];

    // dead things don't activate triggers
    if (ent.is_client() || ent.is_monster()) && ent.health <= 0 {
        return;
    }

    let touch = ctx.gi.box_edicts(&ent.absmin, &ent.absmax, AREA_TRIGGERS);

    for hit_idx in touch {
        let touch_fn = match ctx.edicts.get(hit_idx) {
            Some(hit) if hit.inuse => hit.touch,
            _ => continue,
        };
        if let Some(touch_fn) = touch_fn {
            touch_fn(ctx, hit_idx, ent_idx);
        }
    }
}

/// findradius -- every in-use, solid entity whose box center lies within
/// `rad` of `org`.
pub fn find_radius(ctx: &GameContext, org: &Vec3, rad: f32) -> Vec<usize> {
    ctx.edicts
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, e)| e.inuse && e.solid != Solid::Not)
        .filter(|(_, e)| {
            let mut eorg = [0.0f32; 3];
            for j in 0..3 {
                eorg[j] = org[j] - (e.s.origin[j] + (e.mins[j] + e.maxs[j]) * 0.5);
            }
            vector_length(&eorg) <= rad
        })
        .map(|(i, _)| i)
        .collect()
}

/// Distance between the origins of two entities.
pub fn realrange(ctx: &GameContext, a: usize, b: usize) -> f32 {
    let dir = vector_subtract(&ctx.edicts[a].s.origin, &ctx.edicts[b].s.origin);
    vector_length(&dir)
}

/// Entity-local position (x forward, y left, z up) to world space.
pub fn position_to_world(ctx: &GameContext, ent_idx: usize, local: &Vec3) -> Vec3 {
    let ent = &ctx.edicts[ent_idx];
    let (forward, right, up) = angle_vectors_tuple(&ent.s.angles);
    let mut out = ent.s.origin;
    out = vector_ma(&out, local[0], &forward);
    out = vector_ma(&out, -local[1], &right);
    vector_ma(&out, local[2], &up)
}

/// Rotate an entity-local direction into world space.
pub fn normal_to_world(ctx: &GameContext, ent_idx: usize, local: &Vec3) -> Vec3 {
    let (forward, right, up) = angle_vectors_tuple(&ctx.edicts[ent_idx].s.angles);
    let mut out = vector_scale(&forward, local[0]);
    out = vector_ma(&out, -local[1], &right);
    vector_ma(&out, local[2], &up)
}
