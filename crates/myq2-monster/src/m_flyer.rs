// m_flyer.rs -- Flyer and kamikaze flyer
// Converted from: myq2-original/game/m_flyer.c + m_flyer.h
//
// Copyright (C) 1997-2001 Id Software, Inc.
// Licensed under the GNU General Public License v2 or later.

use crate::g_ai::range;
use crate::g_local::*;
use crate::g_monster::{fire_hit, flymonster_start, monster_fire_blaster, monster_flash_origin, m_spawn_effect};
use crate::g_utils::{link_entity, realrange};
use crate::m_flash::*;

// ============================================================
// Frame definitions (from m_flyer.h)
// ============================================================

pub const FRAME_STAND01: i32 = 13;
pub const FRAME_STAND45: i32 = 57;
pub const FRAME_ATTAK101: i32 = 58;
pub const FRAME_ATTAK106: i32 = 63;
pub const FRAME_ATTAK107: i32 = 64;
pub const FRAME_ATTAK118: i32 = 75;
pub const FRAME_ATTAK119: i32 = 76;
pub const FRAME_ATTAK121: i32 = 78;
pub const FRAME_ATTAK201: i32 = 79;
pub const FRAME_ATTAK204: i32 = 82;
pub const FRAME_ATTAK207: i32 = 85;
pub const FRAME_ATTAK210: i32 = 88;
pub const FRAME_ATTAK217: i32 = 95;
pub const FRAME_ROLLR02: i32 = 120;
pub const FRAME_ROLLR06: i32 = 124;
pub const FRAME_DEFENS01: i32 = 128;
pub const FRAME_DEFENS06: i32 = 133;
pub const FRAME_PAIN101: i32 = 134;
pub const FRAME_PAIN109: i32 = 142;
pub const FRAME_PAIN201: i32 = 143;
pub const FRAME_PAIN204: i32 = 146;
pub const FRAME_PAIN301: i32 = 147;
pub const FRAME_PAIN304: i32 = 150;

pub const MODEL_SCALE: f32 = 1.0;

pub const KAMIKAZE_CLASSNAME: &str = "monster_kamikaze";

// closer than this to the enemy and the kamikaze goes off
const KAMIKAZE_TRIGGER_RANGE: f32 = 90.0;
// inside this range it beeps every frame instead of every other
const KAMIKAZE_BEEP_RANGE: f32 = 128.0;

// ============================================================
// Move table indices
// ============================================================

pub const FLYER_MOVE_STAND: usize = 0;
pub const FLYER_MOVE_WALK: usize = 1;
/// First of four run moves, one per skill level.
pub const FLYER_MOVE_RUN: usize = 2;
pub const FLYER_MOVE_PAIN1: usize = 6;
pub const FLYER_MOVE_PAIN2: usize = 7;
pub const FLYER_MOVE_PAIN3: usize = 8;
pub const FLYER_MOVE_ATTACK2: usize = 9;
pub const FLYER_MOVE_ATTACK3: usize = 10;
pub const FLYER_MOVE_START_MELEE: usize = 11;
pub const FLYER_MOVE_LOOP_MELEE: usize = 12;
pub const FLYER_MOVE_END_MELEE: usize = 13;
pub const FLYER_MOVE_KAMIKAZE_START: usize = 14;
pub const FLYER_MOVE_KAMIKAZE: usize = 15;

// ============================================================
// Sounds
// ============================================================

const SOUND_SIGHT: &str = "flyer/flysght1.wav";
const SOUND_IDLE: &str = "flyer/flysrch1.wav";
const SOUND_PAIN1: &str = "flyer/flypain1.wav";
const SOUND_PAIN2: &str = "flyer/flypain2.wav";
const SOUND_SLASH: &str = "flyer/flyatck2.wav";
const SOUND_SPROING: &str = "flyer/flyatck1.wav";
const SOUND_DIE: &str = "flyer/flydeth1.wav";
const SOUND_SUICIDE_INIT: &str = "flyer/suicide_init.wav";
const SOUND_SUICIDE_BEEP: &str = "flyer/suicide_beep.wav";
const SOUND_ENGINE: &str = "flyer/flyidle1.wav";

static FLYER_SOUNDS: [&str; 11] = [
    SOUND_SIGHT,
    SOUND_IDLE,
    SOUND_PAIN1,
    SOUND_PAIN2,
    SOUND_SLASH,
    SOUND_SPROING,
    SOUND_DIE,
    SOUND_SUICIDE_INIT,
    SOUND_SUICIDE_BEEP,
    SOUND_ENGINE,
    "flyer/flyatck3.wav",
];

fn flyer_sound(ctx: &GameContext, self_idx: usize, channel: i32, name: &str, attenuation: f32) {
    ctx.gi.sound(self_idx, channel, ctx.sounds.index(name), 1.0, attenuation, 0.0);
}

fn is_kamikaze(ent: &Edict) -> bool {
    ent.classname == KAMIKAZE_CLASSNAME
}

pub fn flyer_sight(ctx: &mut GameContext, self_idx: usize, _other: usize) {
    flyer_sound(ctx, self_idx, CHAN_VOICE, SOUND_SIGHT, ATTN_NORM);
}

pub fn flyer_idle(ctx: &mut GameContext, self_idx: usize) {
    if ctx.edicts[self_idx].spawnflags & SF_MONSTER_AMBUSH == 0 {
        flyer_sound(ctx, self_idx, CHAN_VOICE, SOUND_IDLE, ATTN_IDLE);
    }
}

pub fn flyer_pop_blades(ctx: &mut GameContext, self_idx: usize) {
    flyer_sound(ctx, self_idx, CHAN_VOICE, SOUND_SPROING, ATTN_NORM);
}

// ============================================================
// Animation frame tables
// ============================================================

pub static FLYER_FRAMES_STAND: [MFrame; 45] = [MFrame::new(Ai::Stand, 0.0, None); 45];

pub static FLYER_FRAMES_WALK: [MFrame; 45] = [MFrame::new(Ai::Walk, 5.0, None); 45];

// faster on higher skills
pub static FLYER_FRAMES_RUN: [[MFrame; 45]; 4] = [
    [MFrame::new(Ai::Run, 10.0, None); 45],
    [MFrame::new(Ai::Run, 15.0, None); 45],
    [MFrame::new(Ai::Run, 20.0, None); 45],
    [MFrame::new(Ai::Run, 25.0, None); 45],
];

pub static FLYER_FRAMES_PAIN1: [MFrame; 9] = [MFrame::new(Ai::Move, 0.0, None); 9];

pub static FLYER_FRAMES_PAIN2: [MFrame; 4] = [MFrame::new(Ai::Move, 0.0, None); 4];

pub static FLYER_FRAMES_PAIN3: [MFrame; 4] = [MFrame::new(Ai::Move, 0.0, None); 4];

const STRAFE_AIM: MFrame = MFrame::new(Ai::Charge, 0.0, None);
const STRAFE_LEFT: MFrame = MFrame::new(Ai::Charge, -10.0, Some(flyer_fireleft));
const STRAFE_RIGHT: MFrame = MFrame::new(Ai::Charge, -10.0, Some(flyer_fireright));

pub static FLYER_FRAMES_ATTACK2: [MFrame; 17] = [
    STRAFE_AIM, STRAFE_AIM, STRAFE_AIM,
    STRAFE_LEFT, STRAFE_RIGHT, STRAFE_LEFT, STRAFE_RIGHT,
    STRAFE_LEFT, STRAFE_RIGHT, STRAFE_LEFT, STRAFE_RIGHT,
    STRAFE_AIM, STRAFE_AIM, STRAFE_AIM, STRAFE_AIM, STRAFE_AIM, STRAFE_AIM,
];

const CIRCLE_AIM: MFrame = MFrame::new(Ai::Charge, 10.0, None);
const CIRCLE_LEFT: MFrame = MFrame::new(Ai::Charge, 10.0, Some(flyer_fireleft));
const CIRCLE_RIGHT: MFrame = MFrame::new(Ai::Charge, 10.0, Some(flyer_fireright));

pub static FLYER_FRAMES_ATTACK3: [MFrame; 17] = [
    CIRCLE_AIM, CIRCLE_AIM, CIRCLE_AIM,
    CIRCLE_LEFT, CIRCLE_RIGHT, CIRCLE_LEFT, CIRCLE_RIGHT,
    CIRCLE_LEFT, CIRCLE_RIGHT, CIRCLE_LEFT, CIRCLE_RIGHT,
    CIRCLE_AIM, CIRCLE_AIM, CIRCLE_AIM, CIRCLE_AIM, CIRCLE_AIM, CIRCLE_AIM,
];

pub static FLYER_FRAMES_START_MELEE: [MFrame; 6] = [
    MFrame::new(Ai::Charge, 0.0, Some(flyer_pop_blades)),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
];

pub static FLYER_FRAMES_LOOP_MELEE: [MFrame; 12] = [
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, Some(flyer_slash_left)), // left wing strike
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, Some(flyer_slash_right)), // right wing strike
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
];

pub static FLYER_FRAMES_END_MELEE: [MFrame; 3] = [MFrame::new(Ai::Charge, 0.0, None); 3];

pub static FLYER_FRAMES_KAMIKAZE_START: [MFrame; 6] = [
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, Some(flyer_kamikaze_effect)),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
];

pub static FLYER_FRAMES_KAMIKAZE: [MFrame; 5] = [MFrame::new(Ai::Charge, 40.0, Some(flyer_kamikaze_check)); 5];

// ============================================================
// Move definitions
// ============================================================

pub static FLYER_MOVE_TABLE: &[MMove] = &[
    // 0: FLYER_MOVE_STAND
    MMove { firstframe: FRAME_STAND01, lastframe: FRAME_STAND45, frames: &FLYER_FRAMES_STAND, endfunc: None },
    // 1: FLYER_MOVE_WALK
    MMove { firstframe: FRAME_STAND01, lastframe: FRAME_STAND45, frames: &FLYER_FRAMES_WALK, endfunc: None },
    // 2..=5: FLYER_MOVE_RUN, easy through nightmare
    MMove { firstframe: FRAME_STAND01, lastframe: FRAME_STAND45, frames: &FLYER_FRAMES_RUN[0], endfunc: None },
    MMove { firstframe: FRAME_STAND01, lastframe: FRAME_STAND45, frames: &FLYER_FRAMES_RUN[1], endfunc: None },
    MMove { firstframe: FRAME_STAND01, lastframe: FRAME_STAND45, frames: &FLYER_FRAMES_RUN[2], endfunc: None },
    MMove { firstframe: FRAME_STAND01, lastframe: FRAME_STAND45, frames: &FLYER_FRAMES_RUN[3], endfunc: None },
    // 6: FLYER_MOVE_PAIN1
    MMove { firstframe: FRAME_PAIN101, lastframe: FRAME_PAIN109, frames: &FLYER_FRAMES_PAIN1, endfunc: Some(flyer_run) },
    // 7: FLYER_MOVE_PAIN2
    MMove { firstframe: FRAME_PAIN201, lastframe: FRAME_PAIN204, frames: &FLYER_FRAMES_PAIN2, endfunc: Some(flyer_run) },
    // 8: FLYER_MOVE_PAIN3
    MMove { firstframe: FRAME_PAIN301, lastframe: FRAME_PAIN304, frames: &FLYER_FRAMES_PAIN3, endfunc: Some(flyer_run) },
    // 9: FLYER_MOVE_ATTACK2
    MMove {
        firstframe: FRAME_ATTAK201,
        lastframe: FRAME_ATTAK217,
        frames: &FLYER_FRAMES_ATTACK2,
        endfunc: Some(flyer_run),
    },
    // 10: FLYER_MOVE_ATTACK3
    MMove {
        firstframe: FRAME_ATTAK201,
        lastframe: FRAME_ATTAK217,
        frames: &FLYER_FRAMES_ATTACK3,
        endfunc: Some(flyer_run),
    },
    // 11: FLYER_MOVE_START_MELEE
    MMove {
        firstframe: FRAME_ATTAK101,
        lastframe: FRAME_ATTAK106,
        frames: &FLYER_FRAMES_START_MELEE,
        endfunc: Some(flyer_loop_melee),
    },
    // 12: FLYER_MOVE_LOOP_MELEE
    MMove {
        firstframe: FRAME_ATTAK107,
        lastframe: FRAME_ATTAK118,
        frames: &FLYER_FRAMES_LOOP_MELEE,
        endfunc: Some(flyer_check_melee),
    },
    // 13: FLYER_MOVE_END_MELEE
    MMove {
        firstframe: FRAME_ATTAK119,
        lastframe: FRAME_ATTAK121,
        frames: &FLYER_FRAMES_END_MELEE,
        endfunc: Some(flyer_run),
    },
    // 14: FLYER_MOVE_KAMIKAZE_START
    MMove {
        firstframe: FRAME_DEFENS01,
        lastframe: FRAME_DEFENS06,
        frames: &FLYER_FRAMES_KAMIKAZE_START,
        endfunc: Some(flyer_kamikaze),
    },
    // 15: FLYER_MOVE_KAMIKAZE
    MMove {
        firstframe: FRAME_ROLLR02,
        lastframe: FRAME_ROLLR06,
        frames: &FLYER_FRAMES_KAMIKAZE,
        endfunc: Some(flyer_kamikaze),
    },
];

fn set_move(ctx: &mut GameContext, self_idx: usize, mv: usize) {
    ctx.edicts[self_idx].monsterinfo.currentmove = Some(mv);
}

/// The run move for the current skill level.
pub fn flyer_run_move(skill: i32) -> usize {
    FLYER_MOVE_RUN + skill.clamp(0, 3) as usize
}

// ============================================================
// Behavior functions
// ============================================================

pub fn flyer_run(ctx: &mut GameContext, self_idx: usize) {
    let ent = &ctx.edicts[self_idx];
    let mv = if is_kamikaze(ent) {
        FLYER_MOVE_KAMIKAZE
    } else if ent.monsterinfo.aiflags.contains(AI_STAND_GROUND) {
        FLYER_MOVE_STAND
    } else {
        flyer_run_move(ctx.skill())
    };
    set_move(ctx, self_idx, mv);
}

pub fn flyer_walk(ctx: &mut GameContext, self_idx: usize) {
    if is_kamikaze(&ctx.edicts[self_idx]) {
        flyer_run(ctx, self_idx);
    } else {
        set_move(ctx, self_idx, FLYER_MOVE_WALK);
    }
}

pub fn flyer_stand(ctx: &mut GameContext, self_idx: usize) {
    if is_kamikaze(&ctx.edicts[self_idx]) {
        flyer_run(ctx, self_idx);
    } else {
        set_move(ctx, self_idx, FLYER_MOVE_STAND);
    }
}

pub fn flyer_pain(ctx: &mut GameContext, self_idx: usize, _other: Option<usize>, _kick: f32, _damage: i32) {
    {
        let ent = &mut ctx.edicts[self_idx];
        // kamikazes don't feel pain
        if is_kamikaze(ent) {
            return;
        }
        if ent.health < ent.max_health / 2 {
            ent.s.skinnum |= 1;
        }
    }

    if ctx.level.time < ctx.edicts[self_idx].pain_debounce_time {
        return;
    }
    ctx.edicts[self_idx].pain_debounce_time = ctx.level.time + 3.0;

    if ctx.skill() == 3 {
        return; // no pain anims in nightmare
    }

    let (mv, sound) = match ctx.rand() % 3 {
        0 => (FLYER_MOVE_PAIN1, SOUND_PAIN1),
        1 => (FLYER_MOVE_PAIN2, SOUND_PAIN2),
        _ => (FLYER_MOVE_PAIN3, SOUND_PAIN1),
    };
    flyer_sound(ctx, self_idx, CHAN_VOICE, sound, ATTN_NORM);
    set_move(ctx, self_idx, mv);
}

// ============================================================
// Attacks
// ============================================================

fn flyer_fire(ctx: &mut GameContext, self_idx: usize, flash_number: i32) {
    let Some(enemy) = ctx.enemy_of(self_idx) else {
        return;
    };

    let effect = match ctx.edicts[self_idx].s.frame {
        FRAME_ATTAK204 | FRAME_ATTAK207 | FRAME_ATTAK210 => EF_HYPERBLASTER,
        _ => 0,
    };

    let start = monster_flash_origin(ctx, self_idx, flash_number);
    let them = &ctx.edicts[enemy];
    let mut end = them.s.origin;
    end[2] += them.viewheight as f32;

    let mut dir = vector_subtract(&end, &start);
    vector_normalize(&mut dir);
    monster_fire_blaster(ctx, self_idx, &start, &dir, 1, 1000, flash_number, effect);
}

pub fn flyer_fireleft(ctx: &mut GameContext, self_idx: usize) {
    flyer_fire(ctx, self_idx, MZ2_FLYER_BLASTER_1);
}

pub fn flyer_fireright(ctx: &mut GameContext, self_idx: usize) {
    flyer_fire(ctx, self_idx, MZ2_FLYER_BLASTER_2);
}

pub fn flyer_slash_left(ctx: &mut GameContext, self_idx: usize) {
    let aim = [MELEE_DISTANCE, ctx.edicts[self_idx].mins[0], 0.0];
    fire_hit(ctx, self_idx, &aim, 5, 0);
    flyer_sound(ctx, self_idx, CHAN_WEAPON, SOUND_SLASH, ATTN_NORM);
}

pub fn flyer_slash_right(ctx: &mut GameContext, self_idx: usize) {
    let aim = [MELEE_DISTANCE, ctx.edicts[self_idx].maxs[0], 0.0];
    fire_hit(ctx, self_idx, &aim, 5, 0);
    flyer_sound(ctx, self_idx, CHAN_WEAPON, SOUND_SLASH, ATTN_NORM);
}

pub fn flyer_loop_melee(ctx: &mut GameContext, self_idx: usize) {
    set_move(ctx, self_idx, FLYER_MOVE_LOOP_MELEE);
}

pub fn flyer_check_melee(ctx: &mut GameContext, self_idx: usize) {
    let in_reach = match ctx.enemy_of(self_idx) {
        Some(enemy) => range(&ctx.edicts[self_idx], &ctx.edicts[enemy]) == RANGE_MELEE,
        None => false,
    };
    let mv = if in_reach && ctx.random() <= 0.8 {
        FLYER_MOVE_LOOP_MELEE
    } else {
        FLYER_MOVE_END_MELEE
    };
    set_move(ctx, self_idx, mv);
}

pub fn flyer_melee(ctx: &mut GameContext, self_idx: usize) {
    if is_kamikaze(&ctx.edicts[self_idx]) {
        flyer_run(ctx, self_idx);
    } else {
        set_move(ctx, self_idx, FLYER_MOVE_START_MELEE);
    }
}

/// Straight strafing run, or on higher skills more often a circle strafe
/// that keeps sliding around the enemy afterwards.
pub fn flyer_attack(ctx: &mut GameContext, self_idx: usize) {
    if is_kamikaze(&ctx.edicts[self_idx]) {
        flyer_run(ctx, self_idx);
        return;
    }

    let skill = ctx.skill();
    let chance = if skill == 0 { 0.0 } else { 1.0 - 0.5 / skill as f32 };

    if ctx.random() > chance {
        let info = &mut ctx.edicts[self_idx].monsterinfo;
        info.attack_state = AS_STRAIGHT;
        info.currentmove = Some(FLYER_MOVE_ATTACK2);
    } else {
        // switch directions now and then
        let flip = ctx.random() <= 0.5;
        let info = &mut ctx.edicts[self_idx].monsterinfo;
        if flip {
            info.lefty = 1 - info.lefty;
        }
        info.attack_state = AS_SLIDING;
        info.currentmove = Some(FLYER_MOVE_ATTACK3);
    }
}

// ============================================================
// Kamikaze
// ============================================================

/// Turns a flyer into a suicide bomber: fragile, single-minded, and never
/// strafing.
pub fn flyer_become_kamikaze(ctx: &mut GameContext, self_idx: usize) {
    let max_health = 5 + 5 * ctx.skill();
    let ent = &mut ctx.edicts[self_idx];
    ent.health = ent.health.min(max_health);
    ent.mass = 100;
    ent.classname = KAMIKAZE_CLASSNAME.to_string();
    ent.monsterinfo.attack_state = AS_STRAIGHT;
    ent.monsterinfo.currentmove = Some(FLYER_MOVE_KAMIKAZE_START);
}

pub fn flyer_kamikaze(ctx: &mut GameContext, self_idx: usize) {
    set_move(ctx, self_idx, FLYER_MOVE_KAMIKAZE);
}

pub fn flyer_kamikaze_effect(ctx: &mut GameContext, self_idx: usize) {
    flyer_sound(ctx, self_idx, CHAN_BODY, SOUND_SUICIDE_INIT, ATTN_NORM);
    let dir = [ctx.crandom(), ctx.crandom(), ctx.crandom()];
    m_spawn_effect(ctx, self_idx, TE_BLASTER, &VEC3_ORIGIN, &dir);
}

fn flyer_kamikaze_explode(ctx: &mut GameContext, self_idx: usize) {
    if ctx.enemy_of(self_idx).is_some() {
        // no direct hit, it can go off when stuck too
        let skill = ctx.skill() as f32;
        ctx.combat.radius_damage(self_idx, 45.0 + 5.0 * skill, 128.0 + 16.0 * skill);
    }
    let origin = ctx.edicts[self_idx].s.origin;
    flyer_die(ctx, self_idx, None, None, 0, &origin);
}

/// Homes in on the enemy, beeping faster as it closes. Goes off when it
/// gets close, loses its target or stops making progress.
pub fn flyer_kamikaze_check(ctx: &mut GameContext, self_idx: usize) {
    // the blocked hook may have removed us already
    if !ctx.edicts[self_idx].inuse {
        return;
    }

    let stuck = {
        let ent = &ctx.edicts[self_idx];
        vector_compare(&ent.s.old_origin, &ent.s.origin)
    };
    let enemy = match ctx.enemy_of(self_idx) {
        Some(enemy) if !stuck => enemy,
        _ => {
            flyer_kamikaze_explode(ctx, self_idx);
            return;
        }
    };

    {
        let enemy_ref = ctx.edicts[self_idx].enemy;
        let ent = &mut ctx.edicts[self_idx];
        ent.goalentity = enemy_ref;
        ent.s.effects |= EF_ROCKET;
        ent.s.old_origin = ent.s.origin;
    }

    // a small box is less likely to wedge
    if ctx.edicts[self_idx].maxs[0] != 8.0 {
        let ent = &mut ctx.edicts[self_idx];
        ent.mins = [-8.0, -8.0, -8.0];
        ent.maxs = [8.0, 8.0, 8.0];
        link_entity(ctx, self_idx);
    }

    let dist = realrange(ctx, self_idx, enemy);
    if dist < KAMIKAZE_TRIGGER_RANGE {
        flyer_kamikaze_explode(ctx, self_idx);
    } else if dist < KAMIKAZE_BEEP_RANGE || ctx.level.framenum % 2 == 0 {
        flyer_sound(ctx, self_idx, CHAN_VOICE, SOUND_SUICIDE_BEEP, ATTN_NORM);
    }
}

/// Kamikazes blow up against whatever stops them. A normal flyer chasing a
/// player usually gives up on the search for this frame.
pub fn flyer_blocked(ctx: &mut GameContext, self_idx: usize, _dist: f32) -> bool {
    if is_kamikaze(&ctx.edicts[self_idx]) {
        flyer_kamikaze_check(ctx, self_idx);

        // still here, so it was something other than the enemy
        if ctx.edicts[self_idx].inuse {
            let ent = &ctx.edicts[self_idx];
            let origin = vector_ma(&ent.s.origin, -0.02, &ent.velocity);
            ctx.gi.temp_entity(TE_ROCKET_EXPLOSION, &origin, None, Multicast::Phs);
            ctx.free_edict(self_idx);
        }
        return true;
    }

    let chasing_player = ctx.enemy_of(self_idx).is_some_and(|e| ctx.edicts[e].is_client());
    if !chasing_player {
        return false;
    }
    let skill = ctx.skill() as f32;
    ctx.random() >= 0.25 + 0.05 * skill
}

// ============================================================
// Death
// ============================================================

const GIB_SM_METAL: &str = "models/objects/gibs/sm_metal/tris.md2";
const GIB_SM_MEAT: &str = "models/objects/gibs/sm_meat/tris.md2";
const GIB_SKULL: &str = "models/objects/gibs/skull/tris.md2";

/// Flyers always come apart; there is no corpse.
pub fn flyer_die(
    ctx: &mut GameContext,
    self_idx: usize,
    _inflictor: Option<usize>,
    _attacker: Option<usize>,
    damage: i32,
    _point: &Vec3,
) {
    let combat = ctx.combat;
    for _ in 0..6 {
        combat.throw_gib(self_idx, GIB_SM_METAL, damage, GIB_METALLIC);
    }
    for _ in 0..4 {
        combat.throw_gib(self_idx, GIB_SM_MEAT, damage, GIB_ORGANIC);
    }
    combat.throw_gib(self_idx, GIB_SKULL, damage, GIB_ORGANIC);
    flyer_sound(ctx, self_idx, CHAN_VOICE, SOUND_DIE, ATTN_NORM);

    let origin = ctx.edicts[self_idx].s.origin;
    ctx.gi.temp_entity(TE_EXPLOSION1, &origin, None, Multicast::Pvs);
    ctx.free_edict(self_idx);
}

// ============================================================
// Spawn
// ============================================================

/// QUAKED monster_flyer (1 .5 0) (-16 -16 -24) (16 16 32) Ambush Trigger_Spawn Sight
/// QUAKED monster_kamikaze (1 .5 0) (-16 -16 -24) (16 16 32) Ambush Trigger_Spawn Sight
pub fn sp_monster_flyer(ctx: &mut GameContext, self_idx: usize) {
    let gi = ctx.gi;
    ctx.sounds.precache(gi, &FLYER_SOUNDS);
    let engine = ctx.sounds.index(SOUND_ENGINE);

    let ent = &mut ctx.edicts[self_idx];
    let kamikaze = is_kamikaze(ent);
    if ent.style != 0 {
        ent.s.skinnum = ent.style * 2;
    }

    ent.mins = [-16.0, -16.0, -24.0];
    ent.maxs = [16.0, 16.0, 16.0];
    ent.movetype = MoveType::Step;
    ent.solid = Solid::Bbox;
    ent.s.sound = engine;

    if ent.health == 0 {
        ent.health = 50;
    }
    if ent.mass == 0 {
        ent.mass = 50;
    }

    ent.pain = Some(flyer_pain);
    ent.die = Some(flyer_die);

    let info = &mut ent.monsterinfo;
    info.moves = FLYER_MOVE_TABLE;
    info.stand = Some(flyer_stand);
    info.walk = Some(flyer_walk);
    info.run = Some(flyer_run);
    info.attack = Some(flyer_attack);
    info.melee = Some(flyer_melee);
    info.sight = Some(flyer_sight);
    info.idle = Some(flyer_idle);
    info.blocked = Some(flyer_blocked);
    info.currentmove = Some(FLYER_MOVE_STAND);
    info.scale = MODEL_SCALE;

    if kamikaze {
        flyer_become_kamikaze(ctx, self_idx);
    }

    link_entity(ctx, self_idx);
    flymonster_start(ctx, self_idx);
}
