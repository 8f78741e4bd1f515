// m_infantry.rs -- Infantry (enforcer) monster
// Converted from: myq2-original/game/m_infantry.c + m_infantry.h
//
// Copyright (C) 1997-2001 Id Software, Inc.
// Licensed under the GNU General Public License v2 or later.

use crate::g_ai::range;
use crate::g_local::*;
use crate::g_monster::{
    fire_hit, monster_become_head, monster_corpse, monster_fire_bullet, monster_flash_origin, m_spawn_effect,
    walkmonster_start,
};
use crate::g_utils::link_entity;
use crate::m_flash::*;

// ============================================================
// Frame definitions (from m_infantry.h)
// ============================================================

pub const FRAME_STAND01: i32 = 1;
pub const FRAME_STAND49: i32 = 49;
pub const FRAME_STAND50: i32 = 50;
pub const FRAME_STAND71: i32 = 71;
pub const FRAME_WALK03: i32 = 74;
pub const FRAME_WALK14: i32 = 85;
pub const FRAME_RUN01: i32 = 92;
pub const FRAME_RUN08: i32 = 99;
pub const FRAME_PAIN101: i32 = 100;
pub const FRAME_PAIN110: i32 = 109;
pub const FRAME_PAIN201: i32 = 110;
pub const FRAME_PAIN210: i32 = 119;
pub const FRAME_DUCK01: i32 = 120;
pub const FRAME_DUCK05: i32 = 124;
pub const FRAME_DEATH101: i32 = 125;
pub const FRAME_DEATH120: i32 = 144;
pub const FRAME_DEATH201: i32 = 145;
pub const FRAME_DEATH211: i32 = 155;
pub const FRAME_DEATH225: i32 = 169;
pub const FRAME_DEATH301: i32 = 170;
pub const FRAME_DEATH309: i32 = 178;
pub const FRAME_ATTAK101: i32 = 184;
pub const FRAME_ATTAK111: i32 = 194;
pub const FRAME_ATTAK115: i32 = 198;
pub const FRAME_ATTAK201: i32 = 199;
pub const FRAME_ATTAK208: i32 = 206;

pub const MODEL_SCALE: f32 = 1.0;

// how far the hull shrinks while ducked
const DUCK_HEIGHT: f32 = 20.0;

// ============================================================
// Move table indices
// ============================================================

pub const INFANTRY_MOVE_STAND: usize = 0;
pub const INFANTRY_MOVE_FIDGET: usize = 1;
pub const INFANTRY_MOVE_WALK: usize = 2;
pub const INFANTRY_MOVE_RUN: usize = 3;
pub const INFANTRY_MOVE_PAIN1: usize = 4;
pub const INFANTRY_MOVE_PAIN2: usize = 5;
pub const INFANTRY_MOVE_DEATH1: usize = 6;
pub const INFANTRY_MOVE_DEATH2: usize = 7;
pub const INFANTRY_MOVE_DEATH3: usize = 8;
pub const INFANTRY_MOVE_DUCK: usize = 9;
pub const INFANTRY_MOVE_ATTACK1: usize = 10;
pub const INFANTRY_MOVE_ATTACK2: usize = 11;
pub const INFANTRY_MOVE_JUMP: usize = 12;

// ============================================================
// Sounds
// ============================================================

const SOUND_PAIN1: &str = "infantry/infpain1.wav";
const SOUND_PAIN2: &str = "infantry/infpain2.wav";
const SOUND_DIE1: &str = "infantry/infdeth1.wav";
const SOUND_DIE2: &str = "infantry/infdeth2.wav";
const SOUND_GUNSHOT: &str = "infantry/infatck1.wav";
const SOUND_WEAPON_COCK: &str = "infantry/infatck3.wav";
const SOUND_PUNCH_SWING: &str = "infantry/infatck2.wav";
const SOUND_PUNCH_HIT: &str = "infantry/melee2.wav";
const SOUND_SIGHT: &str = "infantry/infsght1.wav";
const SOUND_SEARCH: &str = "infantry/infsrch1.wav";
const SOUND_IDLE: &str = "infantry/infidle1.wav";
const SOUND_UDEATH: &str = "misc/udeath.wav";
const SOUND_KICK: &str = "weapons/kick.wav";

static INFANTRY_SOUNDS: [&str; 13] = [
    SOUND_PAIN1,
    SOUND_PAIN2,
    SOUND_DIE1,
    SOUND_DIE2,
    SOUND_GUNSHOT,
    SOUND_WEAPON_COCK,
    SOUND_PUNCH_SWING,
    SOUND_PUNCH_HIT,
    SOUND_SIGHT,
    SOUND_SEARCH,
    SOUND_IDLE,
    SOUND_UDEATH,
    SOUND_KICK,
];

fn infantry_sound(ctx: &GameContext, self_idx: usize, channel: i32, name: &str, attenuation: f32) {
    ctx.gi.sound(self_idx, channel, ctx.sounds.index(name), 1.0, attenuation, 0.0);
}

// ============================================================
// Blood
// ============================================================

// one spot per death frame, 125 through 178
static INFANTRY_BLEED_POSITIONS: [(Vec3, Vec3); 54] = [
    ([-4.722, 0.083, 23.434], [-0.208, 0.368, 0.906]),
    ([-4.913, -1.692, 23.322], [-0.253, 0.334, 0.908]),
    ([-5.188, -3.52, 23.049], [-0.14, 0.086, 0.986]),
    ([-6.274, 0.656, 22.046], [-0.218, 0.387, 0.896]),
    ([-5.094, 4.887, 20.514], [0.145, 0.285, 0.947]),
    ([-5.205, 4.745, 20.984], [0.14, 0.274, 0.951]),
    ([-5.87, 4.172, 21.038], [-0.299, 0.278, 0.913]),
    ([-6.267, 3.602, 21.166], [-0.183, 0.533, 0.826]),
    ([-5.983, 2.93, 21.291], [-0.024, 0.513, 0.858]),
    ([-3.787, 3.072, 22.175], [0.195, 0.194, 0.961]),
    ([0.203, 2.497, 20.875], [0.614, 0.327, 0.718]),
    ([3.265, 1.72, 17.998], [0.899, 0.368, 0.24]),
    ([7.761, 1.572, 13.992], [0.894, 0.437, 0.1]),
    ([8.185, 0.733, 14.951], [0.69, 0.55, 0.47]),
    ([8.625, 1.1, 16.022], [0.52, 0.518, 0.679]),
    ([1.449, 6.383, 9.446], [-0.156, 0.09, 0.984]),
    ([13.601, 1.04, -1.854], [0.85, 0.145, 0.506]),
    ([15.255, 5.221, -19.717], [0.974, 0.006, 0.226]),
    ([17.518, 5.759, -20.409], [0.979, 0.189, -0.079]),
    ([20.485, 6.008, -20.05], [0.953, 0.283, -0.108]),
    ([-9.446, 0.029, 21.451], [0.0, 1.0, 0.0]),
    ([-5.265, 1.806, 19.379], [-0.057, 0.359, 0.932]),
    ([-0.467, 3.214, 16.207], [0.717, 0.342, 0.608]),
    ([3.926, 3.268, 11.674], [0.909, 0.389, 0.146]),
    ([5.667, 1.71, 9.608], [0.909, 0.414, 0.041]),
    ([7.333, -0.761, 7.69], [0.918, 0.393, -0.052]),
    ([7.628, -3.145, 8.68], [0.893, 0.45, 0.017]),
    ([2.914, -6.246, 12.103], [0.779, 0.627, 0.0]),
    ([-3.354, -8.956, 15.062], [0.0, 1.0, 0.0]),
    ([-4.606, -8.184, 15.43], [0.816, 0.408, 0.408]),
    ([-4.15, -7.312, 15.623], [0.0, 0.0, 0.0]),
    ([-3.478, -6.4, 15.839], [0.0, 1.0, 0.0]),
    ([-2.367, -5.596, 16.07], [0.0, 0.0, 0.0]),
    ([-3.162, -4.647, 16.36], [0.0, 1.0, 0.0]),
    ([-3.082, -3.797, 16.352], [0.0, 1.0, 0.0]),
    ([-1.484, -2.545, 16.325], [0.0, 0.0, 0.0]),
    ([-1.702, -1.324, 16.188], [1.0, 0.0, 0.0]),
    ([-1.972, -2.4, 15.842], [0.74, 0.244, 0.627]),
    ([-3.623, -3.048, 15.4], [0.0, 0.0, 1.0]),
    ([-6.679, -2.962, 15.39], [0.0, 0.0, 0.0]),
    ([-12.206, -2.921, 11.42], [-1.0, 0.0, 0.0]),
    ([-17.999, -3.464, -0.368], [0.0, 0.0, 0.0]),
    ([-15.849, -3.857, -12.581], [0.0, 0.0, 0.0]),
    ([-19.962, -3.142, -12.381], [0.0, 0.0, 0.0]),
    ([-20.71, -2.108, -12.249], [0.0, 0.0, 0.0]),
    ([0.612, 0.702, 25.392], [0.363, 0.352, 0.863]),
    ([-8.682, 1.569, 19.231], [-0.253, 0.308, 0.917]),
    ([-8.089, 2.514, -7.319], [-0.766, 0.275, 0.581]),
    ([-8.429, 2.702, -15.403], [-0.95, 0.291, -0.11]),
    ([-3.807, 2.269, -23.078], [-0.621, 0.3, -0.724]),
    ([-3.807, 2.269, -23.078], [-0.621, 0.3, -0.724]),
    ([21.655, 3.993, -13.767], [0.843, 0.239, 0.482]),
    ([22.671, 3.691, -19.448], [0.952, 0.216, 0.216]),
    ([22.783, 3.691, -19.453], [0.951, 0.218, 0.219]),
];

pub fn infantry_bleed(ctx: &mut GameContext, self_idx: usize) {
    if ctx.random() > 0.7 {
        return;
    }
    let i = ctx.edicts[self_idx].s.frame - FRAME_DEATH101;
    let Some(&(pos, normal)) = usize::try_from(i).ok().and_then(|i| INFANTRY_BLEED_POSITIONS.get(i)) else {
        return;
    };
    let te = if ctx.random() > 0.8 { TE_MOREBLOOD } else { TE_BLOOD };
    m_spawn_effect(ctx, self_idx, te, &pos, &normal);
}

// ============================================================
// Animation frame tables
// ============================================================

pub static INFANTRY_FRAMES_STAND: [MFrame; 22] = [MFrame::new(Ai::Stand, 0.0, None); 22];

pub static INFANTRY_FRAMES_FIDGET: [MFrame; 49] = [
    MFrame::new(Ai::Stand, 1.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 1.0, None),
    MFrame::new(Ai::Stand, 3.0, None),
    MFrame::new(Ai::Stand, 6.0, None),
    MFrame::new(Ai::Stand, 3.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 1.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 1.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, -1.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 1.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, -2.0, None),
    MFrame::new(Ai::Stand, 1.0, None),
    MFrame::new(Ai::Stand, 1.0, None),
    MFrame::new(Ai::Stand, 1.0, None),
    MFrame::new(Ai::Stand, -1.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, -1.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, -1.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 1.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, -1.0, None),
    MFrame::new(Ai::Stand, -1.0, None),
    MFrame::new(Ai::Stand, 0.0, None),
    MFrame::new(Ai::Stand, -3.0, None),
    MFrame::new(Ai::Stand, -2.0, None),
    MFrame::new(Ai::Stand, -3.0, None),
    MFrame::new(Ai::Stand, -3.0, None),
    MFrame::new(Ai::Stand, -2.0, None),
];

pub static INFANTRY_FRAMES_WALK: [MFrame; 12] = [
    MFrame::new(Ai::Walk, 5.0, None),
    MFrame::new(Ai::Walk, 4.0, None),
    MFrame::new(Ai::Walk, 4.0, None),
    MFrame::new(Ai::Walk, 5.0, None),
    MFrame::new(Ai::Walk, 4.0, None),
    MFrame::new(Ai::Walk, 5.0, None),
    MFrame::new(Ai::Walk, 6.0, None),
    MFrame::new(Ai::Walk, 4.0, None),
    MFrame::new(Ai::Walk, 4.0, None),
    MFrame::new(Ai::Walk, 4.0, None),
    MFrame::new(Ai::Walk, 4.0, None),
    MFrame::new(Ai::Walk, 5.0, None),
];

pub static INFANTRY_FRAMES_RUN: [MFrame; 8] = [
    MFrame::new(Ai::Run, 10.0, None),
    MFrame::new(Ai::Run, 20.0, None),
    MFrame::new(Ai::Run, 5.0, None),
    MFrame::new(Ai::Run, 7.0, None),
    MFrame::new(Ai::Run, 30.0, None),
    MFrame::new(Ai::Run, 35.0, None),
    MFrame::new(Ai::Run, 2.0, None),
    MFrame::new(Ai::Run, 6.0, None),
];

pub static INFANTRY_FRAMES_PAIN1: [MFrame; 10] = [
    MFrame::new(Ai::Move, -3.0, None),
    MFrame::new(Ai::Move, -2.0, None),
    MFrame::new(Ai::Move, -1.0, None),
    MFrame::new(Ai::Move, -2.0, None),
    MFrame::new(Ai::Move, -1.0, None),
    MFrame::new(Ai::Move, 1.0, None),
    MFrame::new(Ai::Move, -1.0, None),
    MFrame::new(Ai::Move, 1.0, None),
    MFrame::new(Ai::Move, 6.0, None),
    MFrame::new(Ai::Move, 2.0, None),
];

pub static INFANTRY_FRAMES_PAIN2: [MFrame; 10] = [
    MFrame::new(Ai::Move, -3.0, None),
    MFrame::new(Ai::Move, -3.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, -1.0, None),
    MFrame::new(Ai::Move, -2.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 2.0, None),
    MFrame::new(Ai::Move, 5.0, None),
    MFrame::new(Ai::Move, 2.0, None),
];

pub static INFANTRY_FRAMES_DEATH1: [MFrame; 20] = [
    MFrame::new(Ai::Move, -4.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, -1.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, -4.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, -1.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 3.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 1.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 1.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, -2.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 2.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 2.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 9.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 9.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 5.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, -3.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, -3.0, Some(infantry_bleed)),
];

pub static INFANTRY_FRAMES_DEATH2: [MFrame; 25] = [
    MFrame::new(Ai::Move, 0.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 1.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 5.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, -1.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 1.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 1.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 4.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 3.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, -2.0, Some(infantry_machine_gun)),
    MFrame::new(Ai::Move, -2.0, Some(infantry_machine_gun)),
    MFrame::new(Ai::Move, -3.0, Some(infantry_machine_gun)),
    MFrame::new(Ai::Move, -1.0, Some(infantry_machine_gun)),
    MFrame::new(Ai::Move, -2.0, Some(infantry_machine_gun)),
    MFrame::new(Ai::Move, 0.0, Some(infantry_machine_gun)),
    MFrame::new(Ai::Move, 2.0, Some(infantry_machine_gun)),
    MFrame::new(Ai::Move, 2.0, Some(infantry_machine_gun)),
    MFrame::new(Ai::Move, 3.0, Some(infantry_machine_gun)),
    MFrame::new(Ai::Move, -10.0, Some(infantry_machine_gun)),
    MFrame::new(Ai::Move, -7.0, Some(infantry_machine_gun)),
    MFrame::new(Ai::Move, -8.0, Some(infantry_machine_gun)),
    MFrame::new(Ai::Move, -6.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 4.0, Some(infantry_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(infantry_bleed)),
];

pub static INFANTRY_FRAMES_DEATH3: [MFrame; 9] = [
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, -6.0, None),
    MFrame::new(Ai::Move, -11.0, None),
    MFrame::new(Ai::Move, -3.0, None),
    MFrame::new(Ai::Move, -11.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
];

pub static INFANTRY_FRAMES_DUCK: [MFrame; 5] = [
    MFrame::new(Ai::Move, -2.0, Some(infantry_duck_down)),
    MFrame::new(Ai::Move, -5.0, Some(infantry_duck_hold)),
    MFrame::new(Ai::Move, 3.0, None),
    MFrame::new(Ai::Move, 4.0, Some(infantry_duck_up)),
    MFrame::new(Ai::Move, 0.0, None),
];

pub static INFANTRY_FRAMES_ATTACK1: [MFrame; 15] = [
    MFrame::new(Ai::Charge, 4.0, None),
    MFrame::new(Ai::Charge, -1.0, None),
    MFrame::new(Ai::Charge, -1.0, None),
    MFrame::new(Ai::Charge, 0.0, Some(infantry_cock_gun)),
    MFrame::new(Ai::Charge, -1.0, None),
    MFrame::new(Ai::Charge, 1.0, None),
    MFrame::new(Ai::Charge, 1.0, None),
    MFrame::new(Ai::Charge, 2.0, None),
    MFrame::new(Ai::Charge, -2.0, None),
    MFrame::new(Ai::Charge, -3.0, None),
    MFrame::new(Ai::Charge, 1.0, Some(infantry_fire)),
    MFrame::new(Ai::Charge, 5.0, None),
    MFrame::new(Ai::Charge, -1.0, None),
    MFrame::new(Ai::Charge, -2.0, None),
    MFrame::new(Ai::Charge, -3.0, None),
];

pub static INFANTRY_FRAMES_ATTACK2: [MFrame; 8] = [
    MFrame::new(Ai::Charge, 3.0, None),
    MFrame::new(Ai::Charge, 6.0, None),
    MFrame::new(Ai::Charge, 0.0, Some(infantry_swing)),
    MFrame::new(Ai::Charge, 8.0, None),
    MFrame::new(Ai::Charge, 5.0, None),
    MFrame::new(Ai::Charge, 8.0, Some(infantry_smack)),
    MFrame::new(Ai::Charge, 6.0, None),
    MFrame::new(Ai::Charge, 3.0, None),
];
pub static INFANTRY_FRAMES_JUMP: [MFrame; 8] = [MFrame::new(Ai::Move, 0.0, None); 8];

// ============================================================
// Move definitions
// ============================================================

pub static INFANTRY_MOVE_TABLE: &[MMove] = &[
    // 0: INFANTRY_MOVE_STAND
    MMove { firstframe: FRAME_STAND50, lastframe: FRAME_STAND71, frames: &INFANTRY_FRAMES_STAND, endfunc: None },
    // 1: INFANTRY_MOVE_FIDGET
    MMove {
        firstframe: FRAME_STAND01,
        lastframe: FRAME_STAND49,
        frames: &INFANTRY_FRAMES_FIDGET,
        endfunc: Some(infantry_stand),
    },
    // 2: INFANTRY_MOVE_WALK
    MMove { firstframe: FRAME_WALK03, lastframe: FRAME_WALK14, frames: &INFANTRY_FRAMES_WALK, endfunc: None },
    // 3: INFANTRY_MOVE_RUN
    MMove { firstframe: FRAME_RUN01, lastframe: FRAME_RUN08, frames: &INFANTRY_FRAMES_RUN, endfunc: None },
    // 4: INFANTRY_MOVE_PAIN1
    MMove {
        firstframe: FRAME_PAIN101,
        lastframe: FRAME_PAIN110,
        frames: &INFANTRY_FRAMES_PAIN1,
        endfunc: Some(infantry_run),
    },
    // 5: INFANTRY_MOVE_PAIN2
    MMove {
        firstframe: FRAME_PAIN201,
        lastframe: FRAME_PAIN210,
        frames: &INFANTRY_FRAMES_PAIN2,
        endfunc: Some(infantry_run),
    },
    // 6: INFANTRY_MOVE_DEATH1
    MMove {
        firstframe: FRAME_DEATH101,
        lastframe: FRAME_DEATH120,
        frames: &INFANTRY_FRAMES_DEATH1,
        endfunc: Some(infantry_dead),
    },
    // 7: INFANTRY_MOVE_DEATH2
    MMove {
        firstframe: FRAME_DEATH201,
        lastframe: FRAME_DEATH225,
        frames: &INFANTRY_FRAMES_DEATH2,
        endfunc: Some(infantry_dead),
    },
    // 8: INFANTRY_MOVE_DEATH3
    MMove {
        firstframe: FRAME_DEATH301,
        lastframe: FRAME_DEATH309,
        frames: &INFANTRY_FRAMES_DEATH3,
        endfunc: Some(infantry_dead),
    },
    // 9: INFANTRY_MOVE_DUCK
    MMove { firstframe: FRAME_DUCK01, lastframe: FRAME_DUCK05, frames: &INFANTRY_FRAMES_DUCK, endfunc: Some(infantry_run) },
    // 10: INFANTRY_MOVE_ATTACK1
    MMove {
        firstframe: FRAME_ATTAK101,
        lastframe: FRAME_ATTAK115,
        frames: &INFANTRY_FRAMES_ATTACK1,
        endfunc: Some(infantry_run),
    },
    // 11: INFANTRY_MOVE_ATTACK2
    MMove {
        firstframe: FRAME_ATTAK201,
        lastframe: FRAME_ATTAK208,
        frames: &INFANTRY_FRAMES_ATTACK2,
        endfunc: Some(infantry_run),
    },
    // 12: INFANTRY_MOVE_JUMP
    MMove { firstframe: FRAME_RUN01, lastframe: FRAME_RUN08, frames: &INFANTRY_FRAMES_JUMP, endfunc: Some(infantry_run) },
];

fn set_move(ctx: &mut GameContext, self_idx: usize, mv: usize) {
    ctx.edicts[self_idx].monsterinfo.currentmove = Some(mv);
}

// ============================================================
// Behavior functions
// ============================================================

pub fn infantry_stand(ctx: &mut GameContext, self_idx: usize) {
    set_move(ctx, self_idx, INFANTRY_MOVE_STAND);
}

pub fn infantry_fidget(ctx: &mut GameContext, self_idx: usize) {
    set_move(ctx, self_idx, INFANTRY_MOVE_FIDGET);
    if ctx.edicts[self_idx].spawnflags & SF_MONSTER_AMBUSH == 0 {
        infantry_sound(ctx, self_idx, CHAN_VOICE, SOUND_IDLE, ATTN_IDLE);
    }
}

pub fn infantry_walk(ctx: &mut GameContext, self_idx: usize) {
    set_move(ctx, self_idx, INFANTRY_MOVE_WALK);
}

pub fn infantry_run(ctx: &mut GameContext, self_idx: usize) {
    let mv = if ctx.edicts[self_idx].monsterinfo.aiflags.contains(AI_STAND_GROUND) {
        INFANTRY_MOVE_STAND
    } else {
        INFANTRY_MOVE_RUN
    };
    set_move(ctx, self_idx, mv);
}

pub fn infantry_jump(ctx: &mut GameContext, self_idx: usize) {
    set_move(ctx, self_idx, INFANTRY_MOVE_JUMP);
}

pub fn infantry_sight(ctx: &mut GameContext, self_idx: usize, _other: usize) {
    infantry_sound(ctx, self_idx, CHAN_BODY, SOUND_SIGHT, ATTN_NORM);
}

pub fn infantry_pain(ctx: &mut GameContext, self_idx: usize, _other: Option<usize>, _kick: f32, _damage: i32) {
    {
        let ent = &mut ctx.edicts[self_idx];
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

    if ctx.rand() % 2 == 0 {
        set_move(ctx, self_idx, INFANTRY_MOVE_PAIN1);
        infantry_sound(ctx, self_idx, CHAN_VOICE, SOUND_PAIN1, ATTN_NORM);
    } else {
        set_move(ctx, self_idx, INFANTRY_MOVE_PAIN2);
        infantry_sound(ctx, self_idx, CHAN_VOICE, SOUND_PAIN2, ATTN_NORM);
    }
}

// ============================================================
// Machine gun
// ============================================================

// how far off facing each shot of the dying spray goes, (pitch, yaw)
static DEATH_SPRAY_ANGLES: [(f32, f32); 12] = [
    (0.0, 5.0),
    (10.0, 15.0),
    (20.0, 25.0),
    (25.0, 35.0),
    (30.0, 40.0),
    (30.0, 45.0),
    (25.0, 50.0),
    (20.0, 40.0),
    (15.0, 35.0),
    (40.0, 35.0),
    (70.0, 35.0),
    (90.0, 35.0),
];

/// One burst from the machine gun. Aimed at the enemy on the attack frame;
/// during the second death animation it sprays wildly and bleeds.
pub fn infantry_machine_gun(ctx: &mut GameContext, self_idx: usize) {
    let frame = ctx.edicts[self_idx].s.frame;
    let angles = ctx.edicts[self_idx].s.angles;

    let (flash_number, start, forward) = if frame == FRAME_ATTAK111 {
        let flash_number = MZ2_INFANTRY_MACHINEGUN_1;
        let start = monster_flash_origin(ctx, self_idx, flash_number);

        let forward = match ctx.enemy_of(self_idx) {
            Some(enemy) => {
                // lag behind a moving target a little
                let them = &ctx.edicts[enemy];
                let mut target = vector_ma(&them.s.origin, -0.2, &them.velocity);
                target[2] += them.viewheight as f32;
                let mut dir = vector_subtract(&target, &start);
                vector_normalize(&mut dir);
                dir
            }
            None => angle_vectors_tuple(&angles).0,
        };
        (flash_number, start, forward)
    } else {
        let shot = frame - FRAME_DEATH211;
        let Some(&(pitch, yaw)) = usize::try_from(shot).ok().and_then(|i| DEATH_SPRAY_ANGLES.get(i)) else {
            return;
        };
        let flash_number = MZ2_INFANTRY_MACHINEGUN_2 + shot;
        let start = monster_flash_origin(ctx, self_idx, flash_number);

        let aim = [angles[PITCH] - pitch, angles[YAW] - yaw, angles[ROLL]];
        let (forward, _, _) = angle_vectors_tuple(&aim);

        infantry_bleed(ctx, self_idx);
        (flash_number, start, forward)
    };

    monster_fire_bullet(
        ctx,
        self_idx,
        &start,
        &forward,
        3,
        4,
        DEFAULT_BULLET_HSPREAD,
        DEFAULT_BULLET_VSPREAD,
        flash_number,
    );
}

// ============================================================
// Death
// ============================================================

pub fn infantry_dead(ctx: &mut GameContext, self_idx: usize) {
    monster_corpse(ctx, self_idx, [-16.0, -16.0, -24.0], [16.0, 16.0, -8.0]);
}

/// Bumping into a dying infantry skips the slow part of its death.
pub fn infantry_touch(ctx: &mut GameContext, self_idx: usize, other: usize) {
    {
        let o = &ctx.edicts[other];
        if !(o.is_client() || o.flags.contains(FL_ROBOT) || o.is_monster()) || o.health <= 0 {
            return;
        }
    }

    let frame = ctx.edicts[self_idx].s.frame;
    let nextframe = if (FRAME_DEATH101..FRAME_DEATH120 - 5).contains(&frame) {
        // stand a bit, then fall
        FRAME_DEATH120 - 5
    } else if (FRAME_DEATH201..FRAME_DEATH225 - 6).contains(&frame) {
        // last stand firing
        FRAME_DEATH225 - 4
    } else {
        return;
    };

    ctx.edicts[self_idx].monsterinfo.nextframe = nextframe;
    infantry_sound(ctx, self_idx, CHAN_BODY, SOUND_KICK, ATTN_NORM);

    if ctx.edicts[other].is_client() {
        let kick = 7.0 + ctx.random() * 5.0;
        let mut dir = vector_subtract(&ctx.edicts[other].s.origin, &ctx.edicts[self_idx].s.origin);
        vector_normalize(&mut dir);

        let o = &mut ctx.edicts[other];
        o.velocity = vector_ma(&o.velocity, 340.0, &dir);
        if let Some(client) = o.client.as_mut() {
            client.kick_angles[PITCH] -= kick;
        }
    }
}

// the first two death animations have already thrown the head
fn is_headless(frame: i32) -> bool {
    (FRAME_DEATH101..=FRAME_DEATH120).contains(&frame) || (FRAME_DEATH201..=FRAME_DEATH225).contains(&frame)
}

const GIB_BONE: &str = "models/objects/gibs/bone/tris.md2";
const GIB_SM_MEAT: &str = "models/objects/gibs/sm_meat/tris.md2";
const GIB_HEAD2: &str = "models/objects/gibs/head2/tris.md2";

pub fn infantry_die(
    ctx: &mut GameContext,
    self_idx: usize,
    _inflictor: Option<usize>,
    _attacker: Option<usize>,
    damage: i32,
    _point: &Vec3,
) {
    ctx.edicts[self_idx].s.skinnum |= 1;

    // check for gib
    let ent = &ctx.edicts[self_idx];
    if ent.health <= ent.gib_health && ent.spawnflags & SF_MONSTER_NOGIB == 0 {
        let headless = is_headless(ent.s.frame);
        infantry_sound(ctx, self_idx, CHAN_VOICE, SOUND_UDEATH, ATTN_NORM);
        let combat = ctx.combat;
        for _ in 0..4 {
            combat.throw_gib(self_idx, GIB_BONE, damage, GIB_ORGANIC);
        }
        for _ in 0..6 {
            combat.throw_gib(self_idx, GIB_SM_MEAT, damage, GIB_ORGANIC);
        }
        if !headless {
            combat.throw_head(self_idx, GIB_HEAD2, damage, GIB_ORGANIC);
        }
        monster_become_head(ctx, self_idx);
        return;
    }

    if ent.deadflag == DEAD_DEAD {
        return;
    }

    // regular death
    {
        let ent = &mut ctx.edicts[self_idx];
        ent.deadflag = DEAD_DEAD;
        ent.takedamage = DAMAGE_YES;
    }

    // easy never gets the last stand
    let n = if ctx.skill() < 1 {
        if ctx.rand() % 2 != 0 {
            2
        } else {
            0
        }
    } else {
        ctx.rand() % 3
    };

    match n {
        0 => {
            ctx.edicts[self_idx].touch = Some(infantry_touch);
            set_move(ctx, self_idx, INFANTRY_MOVE_DEATH1);
            infantry_sound(ctx, self_idx, CHAN_VOICE, SOUND_DIE2, ATTN_NORM);
            ctx.combat.throw_gib(self_idx, GIB_HEAD2, damage, GIB_ORGANIC);
        }
        1 => {
            ctx.edicts[self_idx].touch = Some(infantry_touch);
            set_move(ctx, self_idx, INFANTRY_MOVE_DEATH2);
            infantry_sound(ctx, self_idx, CHAN_VOICE, SOUND_DIE1, ATTN_NORM);
            ctx.combat.throw_gib(self_idx, GIB_HEAD2, damage, GIB_ORGANIC);
        }
        _ => {
            set_move(ctx, self_idx, INFANTRY_MOVE_DEATH3);
            infantry_sound(ctx, self_idx, CHAN_VOICE, SOUND_DIE2, ATTN_NORM);
        }
    }
}

// ============================================================
// Duck
// ============================================================

pub fn infantry_duck_down(ctx: &mut GameContext, self_idx: usize) {
    let now = ctx.level.time;
    {
        let ent = &mut ctx.edicts[self_idx];
        if ent.monsterinfo.aiflags.contains(AI_DUCKED) {
            return;
        }
        ent.monsterinfo.aiflags.insert(AI_DUCKED);
        ent.maxs[2] -= DUCK_HEIGHT;
        ent.takedamage = DAMAGE_YES;
        ent.monsterinfo.pausetime = now + 1.0;
    }
    link_entity(ctx, self_idx);
}

// stay on this frame until pausetime
fn hold_until_pausetime(ctx: &mut GameContext, self_idx: usize) {
    let now = ctx.level.time;
    let info = &mut ctx.edicts[self_idx].monsterinfo;
    let hold = now < info.pausetime;
    info.aiflags.set(AI_HOLD_FRAME, hold);
}

pub fn infantry_duck_hold(ctx: &mut GameContext, self_idx: usize) {
    hold_until_pausetime(ctx, self_idx);
}

pub fn infantry_duck_up(ctx: &mut GameContext, self_idx: usize) {
    {
        let ent = &mut ctx.edicts[self_idx];
        ent.monsterinfo.aiflags.remove(AI_DUCKED);
        ent.maxs[2] += DUCK_HEIGHT;
        ent.takedamage = DAMAGE_AIM;
    }
    link_entity(ctx, self_idx);
}

pub fn infantry_dodge(ctx: &mut GameContext, self_idx: usize, attacker: usize, _eta: f32) {
    if ctx.random() > 0.25 {
        return;
    }
    if ctx.enemy_of(self_idx).is_none() {
        let r = ctx.entref(attacker);
        ctx.edicts[self_idx].enemy = r;
    }
    set_move(ctx, self_idx, INFANTRY_MOVE_DUCK);
}

// ============================================================
// Attacks
// ============================================================

pub fn infantry_cock_gun(ctx: &mut GameContext, self_idx: usize) {
    infantry_sound(ctx, self_idx, CHAN_WEAPON, SOUND_WEAPON_COCK, ATTN_NORM);
    let n = (ctx.rand() & 15) + 10;
    ctx.edicts[self_idx].monsterinfo.pausetime = ctx.level.time + n as f32 * FRAMETIME;
}

pub fn infantry_fire(ctx: &mut GameContext, self_idx: usize) {
    infantry_machine_gun(ctx, self_idx);
    hold_until_pausetime(ctx, self_idx);
}

pub fn infantry_swing(ctx: &mut GameContext, self_idx: usize) {
    infantry_sound(ctx, self_idx, CHAN_WEAPON, SOUND_PUNCH_SWING, ATTN_NORM);
}

pub fn infantry_smack(ctx: &mut GameContext, self_idx: usize) {
    let aim = [MELEE_DISTANCE, 0.0, 0.0];
    let damage = 5 + ctx.rand() % 5;
    if fire_hit(ctx, self_idx, &aim, damage, 50) {
        infantry_sound(ctx, self_idx, CHAN_WEAPON, SOUND_PUNCH_HIT, ATTN_NORM);
    }
}

pub fn infantry_attack(ctx: &mut GameContext, self_idx: usize) {
    let Some(enemy) = ctx.enemy_of(self_idx) else {
        return;
    };
    let mv = if range(&ctx.edicts[self_idx], &ctx.edicts[enemy]) == RANGE_MELEE {
        INFANTRY_MOVE_ATTACK2
    } else {
        INFANTRY_MOVE_ATTACK1
    };
    set_move(ctx, self_idx, mv);
}

// ============================================================
// Spawn
// ============================================================

/// QUAKED monster_infantry (1 .5 0) (-16 -16 -24) (16 16 32) Ambush Trigger_Spawn Sight
pub fn sp_monster_infantry(ctx: &mut GameContext, self_idx: usize) {
    let gi = ctx.gi;
    ctx.sounds.precache(gi, &INFANTRY_SOUNDS);
    let monsterjump = ctx.config.monsterjump;

    let ent = &mut ctx.edicts[self_idx];
    if ent.style != 0 {
        ent.s.skinnum = ent.style * 2;
    }

    ent.movetype = MoveType::Step;
    ent.solid = Solid::Bbox;
    ent.mins = [-16.0, -16.0, -24.0];
    ent.maxs = [16.0, 16.0, 32.0];

    if ent.health == 0 {
        ent.health = 100;
    }
    if ent.gib_health == 0 {
        ent.gib_health = -40;
    }
    if ent.mass == 0 {
        ent.mass = 200;
    }

    ent.pain = Some(infantry_pain);
    ent.die = Some(infantry_die);

    let info = &mut ent.monsterinfo;
    info.moves = INFANTRY_MOVE_TABLE;
    info.stand = Some(infantry_stand);
    info.walk = Some(infantry_walk);
    info.run = Some(infantry_run);
    info.dodge = Some(infantry_dodge);
    info.attack = Some(infantry_attack);
    info.melee = None;
    info.sight = Some(infantry_sight);
    info.idle = Some(infantry_fidget);
    if monsterjump {
        info.jump = Some(infantry_jump);
        info.jumpup = 48.0;
        info.jumpdn = 160.0;
    }
    info.follow_moves = Some(FollowMoves {
        stand: INFANTRY_MOVE_STAND,
        walk: INFANTRY_MOVE_WALK,
        run: INFANTRY_MOVE_RUN,
    });
    info.currentmove = Some(INFANTRY_MOVE_STAND);
    info.scale = MODEL_SCALE;

    link_entity(ctx, self_idx);
    walkmonster_start(ctx, self_idx);
}
