// m_tank.rs -- Tank monster
// Converted from: myq2-original/game/m_tank.c + m_tank.h
//
// Copyright (C) 1997-2001 Id Software, Inc.
// Licensed under the GNU General Public License v2 or later.

use crate::g_ai::visible;
use crate::g_local::*;
use crate::g_monster::{
    monster_become_head, monster_corpse, monster_fire_blaster, monster_fire_bullet, monster_fire_rocket,
    monster_flash_origin, m_spawn_effect, walkmonster_start,
};
use crate::g_utils::{link_entity, position_to_world};
use crate::m_aim::lead_target;
use crate::m_flash::*;

// ============================================================
// Frame definitions (from m_tank.h)
// ============================================================

pub const FRAME_STAND01: i32 = 0;
pub const FRAME_STAND30: i32 = 29;
pub const FRAME_WALK01: i32 = 30;
pub const FRAME_WALK04: i32 = 33;
pub const FRAME_WALK05: i32 = 34;
pub const FRAME_WALK20: i32 = 49;
pub const FRAME_WALK21: i32 = 50;
pub const FRAME_WALK25: i32 = 54;
pub const FRAME_ATTAK101: i32 = 55;
pub const FRAME_ATTAK110: i32 = 64;
pub const FRAME_ATTAK111: i32 = 65;
pub const FRAME_ATTAK113: i32 = 67;
pub const FRAME_ATTAK116: i32 = 70;
pub const FRAME_ATTAK117: i32 = 71;
pub const FRAME_ATTAK122: i32 = 76;
pub const FRAME_ATTAK201: i32 = 77;
pub const FRAME_ATTAK238: i32 = 114;
pub const FRAME_ATTAK301: i32 = 115;
pub const FRAME_ATTAK321: i32 = 135;
pub const FRAME_ATTAK322: i32 = 136;
pub const FRAME_ATTAK324: i32 = 138;
pub const FRAME_ATTAK327: i32 = 141;
pub const FRAME_ATTAK330: i32 = 144;
pub const FRAME_ATTAK331: i32 = 145;
pub const FRAME_ATTAK353: i32 = 167;
pub const FRAME_ATTAK401: i32 = 168;
pub const FRAME_ATTAK406: i32 = 173;
pub const FRAME_ATTAK411: i32 = 178;
pub const FRAME_ATTAK415: i32 = 182;
pub const FRAME_ATTAK419: i32 = 186;
pub const FRAME_ATTAK429: i32 = 196;
pub const FRAME_PAIN101: i32 = 197;
pub const FRAME_PAIN104: i32 = 200;
pub const FRAME_PAIN201: i32 = 201;
pub const FRAME_PAIN205: i32 = 205;
pub const FRAME_PAIN301: i32 = 206;
pub const FRAME_PAIN316: i32 = 221;
pub const FRAME_DEATH101: i32 = 222;
pub const FRAME_DEATH132: i32 = 253;

pub const MODEL_SCALE: f32 = 1.0;

// death frames a toucher can skip ahead to
const DEATH_SKIP_TO: i32 = FRAME_DEATH132 - 7;

// ============================================================
// Move table indices (used for MonsterInfo.currentmove)
// ============================================================

pub const TANK_MOVE_STAND: usize = 0;
pub const TANK_MOVE_START_WALK: usize = 1;
pub const TANK_MOVE_WALK: usize = 2;
pub const TANK_MOVE_STOP_WALK: usize = 3;
pub const TANK_MOVE_START_RUN: usize = 4;
pub const TANK_MOVE_RUN: usize = 5;
pub const TANK_MOVE_STOP_RUN: usize = 6;
pub const TANK_MOVE_PAIN1: usize = 7;
pub const TANK_MOVE_PAIN2: usize = 8;
pub const TANK_MOVE_PAIN3: usize = 9;
pub const TANK_MOVE_ATTACK_BLAST: usize = 10;
pub const TANK_MOVE_REATTACK_BLAST: usize = 11;
pub const TANK_MOVE_ATTACK_POST_BLAST: usize = 12;
pub const TANK_MOVE_ATTACK_STRIKE: usize = 13;
pub const TANK_MOVE_ATTACK_PRE_ROCKET: usize = 14;
pub const TANK_MOVE_ATTACK_FIRE_ROCKET: usize = 15;
pub const TANK_MOVE_ATTACK_POST_ROCKET: usize = 16;
pub const TANK_MOVE_ATTACK_CHAIN: usize = 17;
pub const TANK_MOVE_DEATH: usize = 18;

// ============================================================
// Sounds
// ============================================================

const SOUND_THUD: &str = "tank/tnkdeth2.wav";
const SOUND_PAIN: &str = "tank/tnkpain2.wav";
const SOUND_IDLE: &str = "tank/tnkidle1.wav";
const SOUND_DIE: &str = "tank/death.wav";
const SOUND_STEP: &str = "tank/step.wav";
const SOUND_SIGHT: &str = "tank/sight1.wav";
const SOUND_WINDUP: &str = "tank/tnkatck4.wav";
const SOUND_STRIKE: &str = "tank/tnkatck5.wav";
const SOUND_UDEATH: &str = "misc/udeath.wav";
const SOUND_KICK: &str = "weapons/kick.wav";

static TANK_SOUNDS: [&str; 17] = [
    SOUND_PAIN,
    SOUND_THUD,
    SOUND_IDLE,
    SOUND_DIE,
    SOUND_STEP,
    SOUND_WINDUP,
    SOUND_STRIKE,
    SOUND_SIGHT,
    SOUND_UDEATH,
    SOUND_KICK,
    "tank/tnkatck1.wav",
    "tank/tnkatk2a.wav",
    "tank/tnkatk2b.wav",
    "tank/tnkatk2c.wav",
    "tank/tnkatk2d.wav",
    "tank/tnkatk2e.wav",
    "tank/tnkatck3.wav",
];

fn tank_sound(ctx: &GameContext, self_idx: usize, channel: i32, name: &str, attenuation: f32) {
    ctx.gi.sound(self_idx, channel, ctx.sounds.index(name), 1.0, attenuation, 0.0);
}

// ============================================================
// Misc
// ============================================================

// blood spots over the death animation, one per death frame (x, y, z), (nx, ny, nz)
static TANK_BLEED_POSITIONS: [(Vec3, Vec3); 32] = [
    ([-13.737, 7.487, 48.963], [-0.449, 0.639, 0.624]),
    ([-15.639, 15.196, 45.571], [-0.584, 0.386, 0.714]),
    ([-13.459, 12.627, 45.747], [-0.518, 0.533, 0.668]),
    ([-10.057, 2.937, 47.546], [-0.164, 0.872, 0.461]),
    ([2.708, -5.499, 44.988], [0.428, 0.903, 0.038]),
    ([13.522, -1.689, 35.976], [0.747, 0.519, -0.417]),
    ([17.731, 7.344, 26.636], [0.71, 0.146, -0.689]),
    ([17.232, 9.804, 22.892], [0.622, 0.033, -0.782]),
    ([17.313, 6.365, 22.869], [0.635, 0.033, -0.772]),
    ([18.881, 1.307, 23.725], [0.645, 0.117, -0.755]),
    ([19.305, -4.529, 25.098], [0.66, 0.222, -0.718]),
    ([18.449, -9.627, 27.366], [0.687, 0.313, -0.655]),
    ([17.306, -12.755, 29.438], [0.712, 0.383, -0.589]),
    ([18.267, -12.446, 32.967], [0.781, 0.393, -0.486]),
    ([17.266, -10.264, 36.858], [0.871, 0.386, -0.305]),
    ([15.903, -6.849, 40.285], [0.939, 0.327, -0.103]),
    ([17.235, -3.527, 41.589], [0.958, 0.284, 0.047]),
    ([16.594, -1.348, 41.833], [0.956, 0.268, 0.119]),
    ([16.768, -2.128, 40.479], [0.944, 0.311, 0.113]),
    ([15.904, -4.529, 38.288], [0.914, 0.398, 0.082]),
    ([14.544, -7.942, 36.242], [0.846, 0.533, 0.013]),
    ([11.965, -10.223, 34.781], [0.76, 0.65, -0.018]),
    ([8.244, -8.428, 36.305], [0.607, 0.792, -0.062]),
    ([5.821, -6.051, 39.136], [0.494, 0.868, -0.056]),
    ([1.121, -7.033, 41.131], [0.491, 0.867, 0.085]),
    ([-5.768, -8.668, 39.862], [0.43, 0.857, 0.284]),
    ([-12.451, -10.375, 33.847], [0.247, 0.863, 0.44]),
    ([-20.484, -10.657, 0.734], [0.102, 0.923, 0.37]),
    ([-19.72, -10.455, 0.579], [0.099, 0.921, 0.376]),
    ([-19.438, -10.401, 0.579], [0.105, 0.923, 0.371]),
    ([-19.662, -10.46, 0.579], [0.107, 0.924, 0.368]),
    ([-19.702, -10.369, -2.158], [0.097, 0.922, 0.376]),
];

// where the hull hits the floor at the end of the death animation
static TANK_IMPACT_POSITIONS: [Vec3; 8] = [
    [-23.9, -11.75, -15.0],
    [-11.6, -10.66, -15.0],
    [-22.19, 27.43, -15.0],
    [-35.87, 1.38, -15.0],
    [-48.17, 19.33, -15.0],
    [-2.71, 34.87, -15.0],
    [2.07, 18.02, -15.0],
    [0.02, -10.0, -15.0],
];

pub fn tank_bleed(ctx: &mut GameContext, self_idx: usize) {
    if ctx.random() >= 0.7 {
        return;
    }
    let i = ctx.edicts[self_idx].s.frame - FRAME_DEATH101;
    let Some(&(pos, normal)) = usize::try_from(i).ok().and_then(|i| TANK_BLEED_POSITIONS.get(i)) else {
        return;
    };
    let te = if ctx.random() > 0.7 { TE_MOREBLOOD } else { TE_BLOOD };
    m_spawn_effect(ctx, self_idx, te, &pos, &normal);
}

pub fn tank_sight(ctx: &mut GameContext, self_idx: usize, _other: usize) {
    tank_sound(ctx, self_idx, CHAN_VOICE, SOUND_SIGHT, ATTN_NORM);
}

pub fn tank_footstep(ctx: &mut GameContext, self_idx: usize) {
    tank_sound(ctx, self_idx, CHAN_BODY, SOUND_STEP, ATTN_NORM);
}

pub fn tank_impact(ctx: &mut GameContext, self_idx: usize) {
    let up = [0.0, 0.0, 1.0];
    for pos in TANK_IMPACT_POSITIONS.iter() {
        m_spawn_effect(ctx, self_idx, TE_CHAINFIST_SMOKE, pos, &up);
    }
    tank_bleed(ctx, self_idx);
}

pub fn tank_thud(ctx: &mut GameContext, self_idx: usize) {
    tank_sound(ctx, self_idx, CHAN_BODY, SOUND_THUD, ATTN_NORM);
    tank_bleed(ctx, self_idx);
}

pub fn tank_windup(ctx: &mut GameContext, self_idx: usize) {
    tank_sound(ctx, self_idx, CHAN_WEAPON, SOUND_WINDUP, ATTN_NORM);
}

pub fn tank_idle(ctx: &mut GameContext, self_idx: usize) {
    if ctx.edicts[self_idx].spawnflags & SF_MONSTER_AMBUSH == 0 {
        tank_sound(ctx, self_idx, CHAN_VOICE, SOUND_IDLE, ATTN_IDLE);
    }
}

// ============================================================
// Animation frame tables
// ============================================================

pub static TANK_FRAMES_STAND: [MFrame; 30] = [MFrame::new(Ai::Stand, 0.0, None); 30];

pub static TANK_FRAMES_START_WALK: [MFrame; 4] = [
    MFrame::new(Ai::Walk, 0.0, None),
    MFrame::new(Ai::Walk, 6.0, None),
    MFrame::new(Ai::Walk, 6.0, None),
    MFrame::new(Ai::Walk, 11.0, Some(tank_footstep)),
];

pub static TANK_FRAMES_WALK: [MFrame; 16] = [
    MFrame::new(Ai::Walk, 4.0, None),
    MFrame::new(Ai::Walk, 5.0, None),
    MFrame::new(Ai::Walk, 3.0, None),
    MFrame::new(Ai::Walk, 2.0, None),
    MFrame::new(Ai::Walk, 5.0, None),
    MFrame::new(Ai::Walk, 5.0, None),
    MFrame::new(Ai::Walk, 4.0, None),
    MFrame::new(Ai::Walk, 4.0, Some(tank_footstep)),
    MFrame::new(Ai::Walk, 3.0, None),
    MFrame::new(Ai::Walk, 5.0, None),
    MFrame::new(Ai::Walk, 4.0, None),
    MFrame::new(Ai::Walk, 5.0, None),
    MFrame::new(Ai::Walk, 7.0, None),
    MFrame::new(Ai::Walk, 7.0, None),
    MFrame::new(Ai::Walk, 6.0, None),
    MFrame::new(Ai::Walk, 6.0, Some(tank_footstep)),
];

pub static TANK_FRAMES_STOP_WALK: [MFrame; 5] = [
    MFrame::new(Ai::Walk, 3.0, None),
    MFrame::new(Ai::Walk, 3.0, None),
    MFrame::new(Ai::Walk, 2.0, None),
    MFrame::new(Ai::Walk, 2.0, None),
    MFrame::new(Ai::Walk, 4.0, Some(tank_footstep)),
];

pub static TANK_FRAMES_START_RUN: [MFrame; 4] = [
    MFrame::new(Ai::Run, 0.0, None),
    MFrame::new(Ai::Run, 6.0, None),
    MFrame::new(Ai::Run, 6.0, None),
    MFrame::new(Ai::Run, 11.0, Some(tank_footstep)),
];

pub static TANK_FRAMES_RUN: [MFrame; 16] = [
    MFrame::new(Ai::Run, 4.0, None),
    MFrame::new(Ai::Run, 5.0, None),
    MFrame::new(Ai::Run, 3.0, None),
    MFrame::new(Ai::Run, 2.0, None),
    MFrame::new(Ai::Run, 5.0, None),
    MFrame::new(Ai::Run, 5.0, None),
    MFrame::new(Ai::Run, 4.0, None),
    MFrame::new(Ai::Run, 4.0, Some(tank_footstep)),
    MFrame::new(Ai::Run, 3.0, None),
    MFrame::new(Ai::Run, 5.0, None),
    MFrame::new(Ai::Run, 4.0, None),
    MFrame::new(Ai::Run, 5.0, None),
    MFrame::new(Ai::Run, 7.0, None),
    MFrame::new(Ai::Run, 7.0, None),
    MFrame::new(Ai::Run, 6.0, None),
    MFrame::new(Ai::Run, 6.0, Some(tank_footstep)),
];

pub static TANK_FRAMES_STOP_RUN: [MFrame; 5] = [
    MFrame::new(Ai::Run, 3.0, None),
    MFrame::new(Ai::Run, 3.0, None),
    MFrame::new(Ai::Run, 2.0, None),
    MFrame::new(Ai::Run, 2.0, None),
    MFrame::new(Ai::Run, 4.0, Some(tank_footstep)),
];

pub static TANK_FRAMES_PAIN1: [MFrame; 4] = [MFrame::new(Ai::Move, 0.0, None); 4];

pub static TANK_FRAMES_PAIN2: [MFrame; 5] = [MFrame::new(Ai::Move, 0.0, None); 5];

pub static TANK_FRAMES_PAIN3: [MFrame; 16] = [
    MFrame::new(Ai::Move, -7.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 2.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 3.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 2.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, Some(tank_footstep)),
];

pub static TANK_FRAMES_ATTACK_BLAST: [MFrame; 16] = [
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, -1.0, None),
    MFrame::new(Ai::Charge, -2.0, None),
    MFrame::new(Ai::Charge, -1.0, None),
    MFrame::new(Ai::Charge, -1.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, Some(tank_blaster)), // 10
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, Some(tank_blaster)),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, Some(tank_blaster)), // 16
];

pub static TANK_FRAMES_REATTACK_BLAST: [MFrame; 6] = [
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, Some(tank_blaster)),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, Some(tank_blaster)),
];

pub static TANK_FRAMES_ATTACK_POST_BLAST: [MFrame; 6] = [
    MFrame::new(Ai::Move, 0.0, None), // 17
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 2.0, None),
    MFrame::new(Ai::Move, 3.0, None),
    MFrame::new(Ai::Move, 2.0, None),
    MFrame::new(Ai::Move, -2.0, Some(tank_footstep)), // 22
];

pub static TANK_FRAMES_ATTACK_STRIKE: [MFrame; 38] = [
    MFrame::new(Ai::Move, 3.0, None),
    MFrame::new(Ai::Move, 2.0, None),
    MFrame::new(Ai::Move, 2.0, None),
    MFrame::new(Ai::Move, 1.0, None),
    MFrame::new(Ai::Move, 6.0, None),
    MFrame::new(Ai::Move, 7.0, None),
    MFrame::new(Ai::Move, 9.0, Some(tank_footstep)),
    MFrame::new(Ai::Move, 2.0, None),
    MFrame::new(Ai::Move, 1.0, None),
    MFrame::new(Ai::Move, 2.0, None),
    MFrame::new(Ai::Move, 2.0, Some(tank_footstep)),
    MFrame::new(Ai::Move, 2.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, -2.0, None),
    MFrame::new(Ai::Move, -2.0, None),
    MFrame::new(Ai::Move, 0.0, Some(tank_windup)),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, 0.0, Some(tank_strike)),
    MFrame::new(Ai::Move, 0.0, None),
    MFrame::new(Ai::Move, -1.0, None),
    MFrame::new(Ai::Move, -1.0, None),
    MFrame::new(Ai::Move, -1.0, None),
    MFrame::new(Ai::Move, -1.0, None),
    MFrame::new(Ai::Move, -1.0, None),
    MFrame::new(Ai::Move, -3.0, None),
    MFrame::new(Ai::Move, -10.0, None),
    MFrame::new(Ai::Move, -10.0, None),
    MFrame::new(Ai::Move, -2.0, None),
    MFrame::new(Ai::Move, -3.0, None),
    MFrame::new(Ai::Move, -2.0, Some(tank_footstep)),
];

pub static TANK_FRAMES_ATTACK_PRE_ROCKET: [MFrame; 21] = [
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None), // 10
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 1.0, None),
    MFrame::new(Ai::Charge, 2.0, None),
    MFrame::new(Ai::Charge, 7.0, None),
    MFrame::new(Ai::Charge, 7.0, None),
    MFrame::new(Ai::Charge, 7.0, Some(tank_footstep)),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None), // 20
    MFrame::new(Ai::Charge, -3.0, None),
];

pub static TANK_FRAMES_ATTACK_FIRE_ROCKET: [MFrame; 9] = [
    MFrame::new(Ai::Charge, -3.0, None), // loop start 22
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, Some(tank_rocket)), // 24
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, Some(tank_rocket)),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, -1.0, Some(tank_rocket)), // 30 loop end
];

pub static TANK_FRAMES_ATTACK_POST_ROCKET: [MFrame; 23] = [
    MFrame::new(Ai::Charge, 0.0, None), // 31
    MFrame::new(Ai::Charge, -1.0, None),
    MFrame::new(Ai::Charge, -1.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 2.0, None),
    MFrame::new(Ai::Charge, 3.0, None),
    MFrame::new(Ai::Charge, 4.0, None),
    MFrame::new(Ai::Charge, 2.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None), // 40
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, -9.0, None),
    MFrame::new(Ai::Charge, -8.0, None),
    MFrame::new(Ai::Charge, -7.0, None),
    MFrame::new(Ai::Charge, -1.0, None),
    MFrame::new(Ai::Charge, -1.0, Some(tank_footstep)),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None), // 50
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
    MFrame::new(Ai::Charge, 0.0, None),
];

const CHAIN_WINDUP: MFrame = MFrame::new(Ai::Charge, 0.0, None);
const CHAIN_FIRE: MFrame = MFrame::bare(Some(tank_machine_gun));

pub static TANK_FRAMES_ATTACK_CHAIN: [MFrame; 29] = [
    CHAIN_WINDUP, CHAIN_WINDUP, CHAIN_WINDUP, CHAIN_WINDUP, CHAIN_WINDUP,
    CHAIN_FIRE, CHAIN_FIRE, CHAIN_FIRE, CHAIN_FIRE, CHAIN_FIRE,
    CHAIN_FIRE, CHAIN_FIRE, CHAIN_FIRE, CHAIN_FIRE, CHAIN_FIRE,
    CHAIN_FIRE, CHAIN_FIRE, CHAIN_FIRE, CHAIN_FIRE, CHAIN_FIRE,
    CHAIN_FIRE, CHAIN_FIRE, CHAIN_FIRE, CHAIN_FIRE,
    CHAIN_WINDUP, CHAIN_WINDUP, CHAIN_WINDUP, CHAIN_WINDUP, CHAIN_WINDUP,
];

pub static TANK_FRAMES_DEATH: [MFrame; 32] = [
    MFrame::new(Ai::Move, -7.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, -2.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, -2.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 1.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 3.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 6.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 1.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 1.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 2.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, -2.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, -3.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, -4.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, -6.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, -4.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, -5.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, -7.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, -15.0, Some(tank_thud)),
    MFrame::new(Ai::Move, -5.0, Some(tank_impact)),
    MFrame::new(Ai::Move, 0.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(tank_bleed)),
    MFrame::new(Ai::Move, 0.0, Some(tank_bleed)),
];

// ============================================================
// Move definitions
// ============================================================

pub static TANK_MOVE_TABLE: &[MMove] = &[
    // 0: TANK_MOVE_STAND
    MMove { firstframe: FRAME_STAND01, lastframe: FRAME_STAND30, frames: &TANK_FRAMES_STAND, endfunc: None },
    // 1: TANK_MOVE_START_WALK
    MMove {
        firstframe: FRAME_WALK01,
        lastframe: FRAME_WALK04,
        frames: &TANK_FRAMES_START_WALK,
        endfunc: Some(tank_walk),
    },
    // 2: TANK_MOVE_WALK
    MMove { firstframe: FRAME_WALK05, lastframe: FRAME_WALK20, frames: &TANK_FRAMES_WALK, endfunc: None },
    // 3: TANK_MOVE_STOP_WALK
    MMove {
        firstframe: FRAME_WALK21,
        lastframe: FRAME_WALK25,
        frames: &TANK_FRAMES_STOP_WALK,
        endfunc: Some(tank_stand),
    },
    // 4: TANK_MOVE_START_RUN
    MMove {
        firstframe: FRAME_WALK01,
        lastframe: FRAME_WALK04,
        frames: &TANK_FRAMES_START_RUN,
        endfunc: Some(tank_run),
    },
    // 5: TANK_MOVE_RUN
    MMove { firstframe: FRAME_WALK05, lastframe: FRAME_WALK20, frames: &TANK_FRAMES_RUN, endfunc: None },
    // 6: TANK_MOVE_STOP_RUN
    MMove {
        firstframe: FRAME_WALK21,
        lastframe: FRAME_WALK25,
        frames: &TANK_FRAMES_STOP_RUN,
        endfunc: Some(tank_walk),
    },
    // 7: TANK_MOVE_PAIN1
    MMove { firstframe: FRAME_PAIN101, lastframe: FRAME_PAIN104, frames: &TANK_FRAMES_PAIN1, endfunc: Some(tank_run) },
    // 8: TANK_MOVE_PAIN2
    MMove { firstframe: FRAME_PAIN201, lastframe: FRAME_PAIN205, frames: &TANK_FRAMES_PAIN2, endfunc: Some(tank_run) },
    // 9: TANK_MOVE_PAIN3
    MMove { firstframe: FRAME_PAIN301, lastframe: FRAME_PAIN316, frames: &TANK_FRAMES_PAIN3, endfunc: Some(tank_run) },
    // 10: TANK_MOVE_ATTACK_BLAST
    MMove {
        firstframe: FRAME_ATTAK101,
        lastframe: FRAME_ATTAK116,
        frames: &TANK_FRAMES_ATTACK_BLAST,
        endfunc: Some(tank_reattack_blaster),
    },
    // 11: TANK_MOVE_REATTACK_BLAST
    MMove {
        firstframe: FRAME_ATTAK111,
        lastframe: FRAME_ATTAK116,
        frames: &TANK_FRAMES_REATTACK_BLAST,
        endfunc: Some(tank_reattack_blaster),
    },
    // 12: TANK_MOVE_ATTACK_POST_BLAST
    MMove {
        firstframe: FRAME_ATTAK117,
        lastframe: FRAME_ATTAK122,
        frames: &TANK_FRAMES_ATTACK_POST_BLAST,
        endfunc: Some(tank_run),
    },
    // 13: TANK_MOVE_ATTACK_STRIKE
    MMove {
        firstframe: FRAME_ATTAK201,
        lastframe: FRAME_ATTAK238,
        frames: &TANK_FRAMES_ATTACK_STRIKE,
        endfunc: Some(tank_poststrike),
    },
    // 14: TANK_MOVE_ATTACK_PRE_ROCKET
    MMove {
        firstframe: FRAME_ATTAK301,
        lastframe: FRAME_ATTAK321,
        frames: &TANK_FRAMES_ATTACK_PRE_ROCKET,
        endfunc: Some(tank_doattack_rocket),
    },
    // 15: TANK_MOVE_ATTACK_FIRE_ROCKET
    MMove {
        firstframe: FRAME_ATTAK322,
        lastframe: FRAME_ATTAK330,
        frames: &TANK_FRAMES_ATTACK_FIRE_ROCKET,
        endfunc: Some(tank_refire_rocket),
    },
    // 16: TANK_MOVE_ATTACK_POST_ROCKET
    MMove {
        firstframe: FRAME_ATTAK331,
        lastframe: FRAME_ATTAK353,
        frames: &TANK_FRAMES_ATTACK_POST_ROCKET,
        endfunc: Some(tank_run),
    },
    // 17: TANK_MOVE_ATTACK_CHAIN
    MMove {
        firstframe: FRAME_ATTAK401,
        lastframe: FRAME_ATTAK429,
        frames: &TANK_FRAMES_ATTACK_CHAIN,
        endfunc: Some(tank_run),
    },
    // 18: TANK_MOVE_DEATH
    MMove {
        firstframe: FRAME_DEATH101,
        lastframe: FRAME_DEATH132,
        frames: &TANK_FRAMES_DEATH,
        endfunc: Some(tank_dead),
    },
];

fn set_move(ctx: &mut GameContext, self_idx: usize, mv: usize) {
    ctx.edicts[self_idx].monsterinfo.currentmove = Some(mv);
}

// ============================================================
// Behavior functions
// ============================================================

pub fn tank_stand(ctx: &mut GameContext, self_idx: usize) {
    set_move(ctx, self_idx, TANK_MOVE_STAND);
}

pub fn tank_walk(ctx: &mut GameContext, self_idx: usize) {
    set_move(ctx, self_idx, TANK_MOVE_WALK);
}

pub fn tank_run(ctx: &mut GameContext, self_idx: usize) {
    let enemy_is_client = ctx.enemy_of(self_idx).is_some_and(|e| ctx.edicts[e].is_client());
    let info = &mut ctx.edicts[self_idx].monsterinfo;
    info.aiflags.set(AI_BRUTAL, enemy_is_client);

    if info.aiflags.contains(AI_STAND_GROUND) {
        info.currentmove = Some(TANK_MOVE_STAND);
        return;
    }

    info.currentmove = match info.currentmove {
        Some(TANK_MOVE_WALK) | Some(TANK_MOVE_START_RUN) => Some(TANK_MOVE_RUN),
        _ => Some(TANK_MOVE_START_RUN),
    };
}

pub fn tank_pain(ctx: &mut GameContext, self_idx: usize, _other: Option<usize>, _kick: f32, damage: i32) {
    {
        let ent = &mut ctx.edicts[self_idx];
        if ent.health < ent.max_health / 2 {
            ent.s.skinnum |= 1;
        }
    }

    if damage <= 10 {
        return;
    }
    if ctx.level.time < ctx.edicts[self_idx].pain_debounce_time {
        return;
    }
    if damage <= 30 && ctx.random() > 0.2 {
        return;
    }

    // if hard or nightmare, don't go into pain while attacking
    let frame = ctx.edicts[self_idx].s.frame;
    if ctx.skill() >= 2
        && ((FRAME_ATTAK301..=FRAME_ATTAK330).contains(&frame) || (FRAME_ATTAK101..=FRAME_ATTAK116).contains(&frame))
    {
        return;
    }

    ctx.edicts[self_idx].pain_debounce_time = ctx.level.time + 3.0;
    tank_sound(ctx, self_idx, CHAN_VOICE, SOUND_PAIN, ATTN_NORM);

    if ctx.skill() == 3 {
        return; // no pain anims in nightmare
    }

    let mv = if damage <= 30 {
        TANK_MOVE_PAIN1
    } else if damage <= 60 {
        TANK_MOVE_PAIN2
    } else {
        TANK_MOVE_PAIN3
    };
    set_move(ctx, self_idx, mv);
}

// ============================================================
// Attacks
// ============================================================

pub fn tank_blaster(ctx: &mut GameContext, self_idx: usize) {
    let Some(enemy) = ctx.enemy_of(self_idx) else {
        return;
    };

    let flash_number = match ctx.edicts[self_idx].s.frame {
        FRAME_ATTAK110 => MZ2_TANK_BLASTER_1,
        FRAME_ATTAK113 => MZ2_TANK_BLASTER_2,
        _ => MZ2_TANK_BLASTER_3,
    };

    let start = monster_flash_origin(ctx, self_idx, flash_number);
    let them = &ctx.edicts[enemy];
    let mut end = them.s.origin;
    end[2] += them.viewheight as f32;

    let mut dir = vector_subtract(&end, &start);
    vector_normalize(&mut dir);
    monster_fire_blaster(ctx, self_idx, &start, &dir, 30, 800, flash_number, EF_BLASTER);
}

pub fn tank_strike(ctx: &mut GameContext, self_idx: usize) {
    tank_sound(ctx, self_idx, CHAN_WEAPON, SOUND_STRIKE, ATTN_NORM);
}

pub fn tank_rocket(ctx: &mut GameContext, self_idx: usize) {
    // check if enemy went away
    let Some(enemy) = ctx.enemy_of(self_idx) else {
        return;
    };

    let flash_number = match ctx.edicts[self_idx].s.frame {
        FRAME_ATTAK324 => MZ2_TANK_ROCKET_1,
        FRAME_ATTAK327 => MZ2_TANK_ROCKET_2,
        _ => MZ2_TANK_ROCKET_3,
    };
    let start = monster_flash_origin(ctx, self_idx, flash_number);

    // slow rockets for the special variant, faster with skill otherwise
    let special = ctx.edicts[self_idx].spawnflags & SF_MONSTER_SPECIAL != 0;
    let rocket_speed = if special { 400 } else { 500 + 100 * ctx.skill() };

    // aim for the eyes, or sometimes the feet
    let (mut target, absmin_z, viewheight, velocity) = {
        let them = &ctx.edicts[enemy];
        (them.s.origin, them.absmin[2], them.viewheight as f32, them.velocity)
    };
    if ctx.random() < 0.66 || start[2] < absmin_z {
        target[2] += viewheight;
    } else {
        target[2] = absmin_z;
    }

    // 20, 35, 50, 65 chance of leading
    let chance = if special { 0.0 } else { 0.2 + ctx.skill() as f32 * 0.15 };
    let target = lead_target(ctx, &start, &target, &velocity, rocket_speed as f32, chance);

    let mut dir = vector_subtract(&target, &start);
    vector_normalize(&mut dir);

    // make sure we're not shooting a target right next to us
    let tr = ctx.gi.trace(&start, &VEC3_ORIGIN, &VEC3_ORIGIN, &target, self_idx as i32, MASK_SHOT);
    let hit = tr.ent().unwrap_or(0);
    if hit == enemy || hit == 0 {
        if tr.fraction > 0.5 || ctx.edicts[hit].is_client() {
            monster_fire_rocket(ctx, self_idx, &start, &dir, 50, rocket_speed, flash_number);
        }
    }
}

pub fn tank_machine_gun(ctx: &mut GameContext, self_idx: usize) {
    // check if enemy went away
    let Some(enemy) = ctx.enemy_of(self_idx) else {
        return;
    };

    let frame = ctx.edicts[self_idx].s.frame;
    let flash_number = MZ2_TANK_MACHINEGUN_1 + (frame - FRAME_ATTAK406);
    let start = monster_flash_origin(ctx, self_idx, flash_number);

    let them = &ctx.edicts[enemy];
    let mut vec = them.s.origin;
    vec[2] += them.viewheight as f32;
    let vec = vector_subtract(&vec, &start);

    // sweep across the target, then back
    let yaw = ctx.edicts[self_idx].s.angles[YAW];
    let mut dir = [vectoangles(&vec)[PITCH], 0.0, 0.0];
    dir[YAW] = if frame <= FRAME_ATTAK415 {
        yaw - 8.0 * (frame - FRAME_ATTAK411) as f32
    } else {
        yaw + 8.0 * (frame - FRAME_ATTAK419) as f32
    };

    let (forward, _, _) = angle_vectors_tuple(&dir);
    monster_fire_bullet(
        ctx,
        self_idx,
        &start,
        &forward,
        20,
        4,
        DEFAULT_BULLET_HSPREAD,
        DEFAULT_BULLET_VSPREAD,
        flash_number,
    );
}

// a second volley on hard and nightmare, if the enemy is still there
fn enemy_worth_another_round(ctx: &mut GameContext, self_idx: usize, chance: f32) -> bool {
    if ctx.skill() < 2 || ctx.random() > chance {
        return false;
    }
    match ctx.enemy_of(self_idx) {
        Some(enemy) => ctx.edicts[enemy].health > 0 && visible(ctx, self_idx, enemy),
        None => false,
    }
}

pub fn tank_reattack_blaster(ctx: &mut GameContext, self_idx: usize) {
    let mv = if enemy_worth_another_round(ctx, self_idx, 0.6) {
        TANK_MOVE_REATTACK_BLAST
    } else {
        TANK_MOVE_ATTACK_POST_BLAST
    };
    set_move(ctx, self_idx, mv);
}

pub fn tank_poststrike(ctx: &mut GameContext, self_idx: usize) {
    ctx.edicts[self_idx].enemy = EntRef::NONE;
    tank_run(ctx, self_idx);
}

pub fn tank_refire_rocket(ctx: &mut GameContext, self_idx: usize) {
    let mv = if enemy_worth_another_round(ctx, self_idx, 0.4) {
        TANK_MOVE_ATTACK_FIRE_ROCKET
    } else {
        TANK_MOVE_ATTACK_POST_ROCKET
    };
    set_move(ctx, self_idx, mv);
}

pub fn tank_doattack_rocket(ctx: &mut GameContext, self_idx: usize) {
    set_move(ctx, self_idx, TANK_MOVE_ATTACK_FIRE_ROCKET);
}

pub fn tank_attack(ctx: &mut GameContext, self_idx: usize) {
    let Some(enemy) = ctx.enemy_of(self_idx) else {
        return;
    };

    if ctx.edicts[enemy].health < 0 {
        let info = &mut ctx.edicts[self_idx].monsterinfo;
        info.currentmove = Some(TANK_MOVE_ATTACK_STRIKE);
        info.aiflags.remove(AI_BRUTAL);
        return;
    }

    let range = vector_length(&vector_subtract(&ctx.edicts[enemy].s.origin, &ctx.edicts[self_idx].s.origin));
    let r = ctx.random();

    let mv = if range <= 125.0 {
        if r < 0.4 {
            TANK_MOVE_ATTACK_CHAIN
        } else {
            TANK_MOVE_ATTACK_BLAST
        }
    } else if range <= 250.0 {
        if r < 0.5 {
            TANK_MOVE_ATTACK_CHAIN
        } else {
            TANK_MOVE_ATTACK_BLAST
        }
    } else if r < 0.33 {
        TANK_MOVE_ATTACK_CHAIN
    } else if r < 0.66 {
        // no pain for a while
        ctx.edicts[self_idx].pain_debounce_time = ctx.level.time + 5.0;
        TANK_MOVE_ATTACK_PRE_ROCKET
    } else {
        TANK_MOVE_ATTACK_BLAST
    };
    set_move(ctx, self_idx, mv);
}

// ============================================================
// Death
// ============================================================

pub fn tank_dead(ctx: &mut GameContext, self_idx: usize) {
    monster_corpse(ctx, self_idx, [-16.0, -16.0, -16.0], [16.0, 16.0, 0.0]);
}

/// Someone walking into the wreck cuts the death animation short and gets
/// shoved back.
pub fn tank_touch(ctx: &mut GameContext, self_idx: usize, other: usize) {
    {
        let o = &ctx.edicts[other];
        if !(o.is_client() || o.flags.contains(FL_ROBOT) || o.is_monster()) || o.health <= 0 {
            return;
        }
    }

    let frame = ctx.edicts[self_idx].s.frame;
    if !(FRAME_DEATH101..DEATH_SKIP_TO).contains(&frame) {
        return;
    }

    ctx.edicts[self_idx].monsterinfo.nextframe = DEATH_SKIP_TO;
    tank_sound(ctx, self_idx, CHAN_BODY, SOUND_KICK, ATTN_NORM);

    if ctx.edicts[other].is_client() {
        let kick = 8.0 + ctx.random() * 6.0;
        let mut dir = vector_subtract(&ctx.edicts[other].s.origin, &ctx.edicts[self_idx].s.origin);
        vector_normalize(&mut dir);

        let o = &mut ctx.edicts[other];
        o.velocity = vector_ma(&o.velocity, 380.0, &dir);
        // also push the view up a bit
        if let Some(client) = o.client.as_mut() {
            client.kick_angles[PITCH] -= kick;
        }
    }
}

const GIB_SM_MEAT: &str = "models/objects/gibs/sm_meat/tris.md2";
const GIB_SM_METAL: &str = "models/objects/gibs/sm_metal/tris.md2";
const GIB_GEAR: &str = "models/objects/gibs/gear/tris.md2";
const GIB_CHEST: &str = "models/objects/gibs/chest/tris.md2";

fn tank_gib(ctx: &mut GameContext, self_idx: usize, damage: i32) {
    tank_sound(ctx, self_idx, CHAN_VOICE, SOUND_UDEATH, ATTN_NORM);

    let combat = ctx.combat;
    for _ in 0..8 {
        combat.throw_gib(self_idx, GIB_SM_MEAT, damage, GIB_ORGANIC);
    }
    for _ in 0..12 {
        combat.throw_gib(self_idx, GIB_SM_METAL, damage, GIB_METALLIC);
    }
    for _ in 0..6 {
        combat.throw_gib(self_idx, GIB_GEAR, damage, GIB_METALLIC);
    }
    combat.throw_gib(self_idx, GIB_CHEST, damage, GIB_ORGANIC);
    combat.throw_gib(self_idx, "models/objects/gibs/tank/arm_right.md2", damage, GIB_METALLIC);
    combat.throw_gib(self_idx, "models/objects/gibs/tank/rl_mount.md2", damage, GIB_METALLIC);
    combat.throw_gib(self_idx, "models/objects/gibs/tank/leg_left.md2", damage, GIB_METALLIC);
    combat.throw_gib(self_idx, "models/objects/gibs/tank/leg_right.md2", damage, GIB_METALLIC);
    combat.throw_head(self_idx, "models/objects/gibs/tank/head.md2", damage, GIB_ORGANIC);

    monster_become_head(ctx, self_idx);
}

pub fn tank_die(
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
        tank_gib(ctx, self_idx, damage);
        return;
    }

    if ent.deadflag == DEAD_DEAD {
        return;
    }

    // regular death
    tank_sound(ctx, self_idx, CHAN_VOICE, SOUND_DIE, ATTN_NORM);
    {
        let ent = &mut ctx.edicts[self_idx];
        ent.deadflag = DEAD_DEAD;
        ent.takedamage = DAMAGE_YES;
        ent.touch = Some(tank_touch);
        ent.monsterinfo.currentmove = Some(TANK_MOVE_DEATH);
    }

    // eject the arm with a small explosion
    let (local_pos, _) = TANK_BLEED_POSITIONS[0];
    let pos = position_to_world(ctx, self_idx, &local_pos);
    ctx.combat.throw_gib(self_idx, "models/objects/gibs/tank/arm_left.md2", damage, GIB_METALLIC);
    ctx.gi.temp_entity(TE_EXPLOSION1, &pos, None, Multicast::Pvs);
}

// ============================================================
// Spawn
// ============================================================

/// QUAKED monster_tank (1 .5 0) (-32 -32 -16) (32 32 72) Ambush Trigger_Spawn Sight
/// QUAKED monster_tank_commander (1 .5 0) (-32 -32 -16) (32 32 72) Ambush Trigger_Spawn Sight
pub fn sp_monster_tank(ctx: &mut GameContext, self_idx: usize) {
    let gi = ctx.gi;
    ctx.sounds.precache(gi, &TANK_SOUNDS);

    let ent = &mut ctx.edicts[self_idx];
    let commander = ent.classname == "monster_tank_commander";
    if commander {
        ent.s.skinnum = 2;
    }
    ent.s.skinnum += ent.style * 4;

    ent.mins = [-32.0, -32.0, -16.0];
    ent.maxs = [32.0, 32.0, 72.0];
    ent.movetype = MoveType::Step;
    ent.solid = Solid::Bbox;

    // mapper-configurable health
    let (health, gib_health) = if commander { (1000, -225) } else { (750, -200) };
    if ent.health == 0 {
        ent.health = health;
    }
    if ent.gib_health == 0 {
        ent.gib_health = gib_health;
    }
    if ent.mass == 0 {
        ent.mass = 500;
    }

    ent.pain = Some(tank_pain);
    ent.die = Some(tank_die);

    let info = &mut ent.monsterinfo;
    info.moves = TANK_MOVE_TABLE;
    info.stand = Some(tank_stand);
    info.walk = Some(tank_walk);
    info.run = Some(tank_run);
    info.dodge = None;
    info.attack = Some(tank_attack);
    info.melee = None;
    info.sight = Some(tank_sight);
    info.idle = Some(tank_idle);
    info.currentmove = Some(TANK_MOVE_STAND);
    info.scale = MODEL_SCALE;

    link_entity(ctx, self_idx);
    walkmonster_start(ctx, self_idx);
}
