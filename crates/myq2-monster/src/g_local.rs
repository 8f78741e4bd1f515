// g_local.rs -- Local definitions for the monster module
// Converted from: myq2-original/game/g_local.h
//
// Copyright (C) 1997-2001 Id Software, Inc.
// Licensed under the GNU General Public License v2 or later.

// Re-export all q_shared items so monster files can access them via `use crate::g_local::*`
pub use myq2_common::q_shared::*;
pub use crate::game::*;

pub const FRAMETIME: f32 = SERVER_FRAMETIME_SEC;

pub const MELEE_DISTANCE: f32 = 80.0;

pub const DEFAULT_BULLET_HSPREAD: i32 = 300;
pub const DEFAULT_BULLET_VSPREAD: i32 = 500;

// edict->spawnflags for monsters
pub const SF_MONSTER_AMBUSH: i32 = 0x00000001;
pub const SF_MONSTER_TRIGGER_SPAWN: i32 = 0x00000002;
pub const SF_MONSTER_SIGHT: i32 = 0x00000004;
pub const SF_MONSTER_GOODGUY: i32 = 0x00000008;
pub const SF_MONSTER_NOGIB: i32 = 0x00000010;
pub const SF_MONSTER_SPECIAL: i32 = 0x00000020;

// edict->flags
bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct EntityFlags: i32 {
        const FLY            = 0x00000001;
        const SWIM           = 0x00000002;
        const IMMUNE_LASER   = 0x00000004;
        const INWATER        = 0x00000008;
        const GODMODE        = 0x00000010;
        const NOTARGET       = 0x00000020;
        const IMMUNE_SLIME   = 0x00000040;
        const IMMUNE_LAVA    = 0x00000080;
        const PARTIALGROUND  = 0x00000100;
        const WATERJUMP      = 0x00000200;
        const ROBOT          = 0x00002000;
    }
}
pub const FL_FLY: EntityFlags = EntityFlags::FLY;
pub const FL_SWIM: EntityFlags = EntityFlags::SWIM;
pub const FL_IMMUNE_LASER: EntityFlags = EntityFlags::IMMUNE_LASER;
pub const FL_INWATER: EntityFlags = EntityFlags::INWATER;
pub const FL_NOTARGET: EntityFlags = EntityFlags::NOTARGET;
pub const FL_PARTIALGROUND: EntityFlags = EntityFlags::PARTIALGROUND;
pub const FL_ROBOT: EntityFlags = EntityFlags::ROBOT;

// ============================================================
// Enums
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum MoveType {
    #[default]
    None = 0,
    Noclip,
    Push,
    Stop,
    Walk,
    Step,
    Fly,
    Toss,
    FlyMissile,
    Bounce,
}

pub const DAMAGE_NO: i32 = 0;
pub const DAMAGE_YES: i32 = 1;
pub const DAMAGE_AIM: i32 = 2;

// deadflag
pub const DEAD_NO: i32 = 0;
pub const DEAD_DYING: i32 = 1;
pub const DEAD_DEAD: i32 = 2;

// range
pub const RANGE_MELEE: i32 = 0;
pub const RANGE_NEAR: i32 = 1;
pub const RANGE_MID: i32 = 2;
pub const RANGE_FAR: i32 = 3;

// gib types
pub const GIB_ORGANIC: i32 = 0;
pub const GIB_METALLIC: i32 = 1;

// Monster AI flags
bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct AiFlags: i32 {
        const STAND_GROUND      = 0x00000001;
        const TEMP_STAND_GROUND = 0x00000002;
        const SOUND_TARGET      = 0x00000004;
        const LOST_SIGHT        = 0x00000008;
        const HOLD_FRAME        = 0x00000080;
        const GOOD_GUY          = 0x00000100;
        const BRUTAL            = 0x00000200;
        const NOSTEP            = 0x00000400;
        const DUCKED            = 0x00000800;
        const COMBAT_POINT      = 0x00001000;
        const CHASE_THING       = 0x00008000;
        const CHICKEN           = 0x00010000;
        const FOLLOW_LEADER     = 0x00020000;
        const ACTOR             = 0x00040000;
        const RANGE_PAUSE       = 0x00080000;
    }
}
pub const AI_STAND_GROUND: AiFlags = AiFlags::STAND_GROUND;
pub const AI_TEMP_STAND_GROUND: AiFlags = AiFlags::TEMP_STAND_GROUND;
pub const AI_SOUND_TARGET: AiFlags = AiFlags::SOUND_TARGET;
pub const AI_LOST_SIGHT: AiFlags = AiFlags::LOST_SIGHT;
pub const AI_HOLD_FRAME: AiFlags = AiFlags::HOLD_FRAME;
pub const AI_GOOD_GUY: AiFlags = AiFlags::GOOD_GUY;
pub const AI_BRUTAL: AiFlags = AiFlags::BRUTAL;
pub const AI_NOSTEP: AiFlags = AiFlags::NOSTEP;
pub const AI_DUCKED: AiFlags = AiFlags::DUCKED;
// set by the host: heading for a point_combat
pub const AI_COMBAT_POINT: AiFlags = AiFlags::COMBAT_POINT;
pub const AI_CHASE_THING: AiFlags = AiFlags::CHASE_THING;
// set by the host: cowering, so no range pause
pub const AI_CHICKEN: AiFlags = AiFlags::CHICKEN;
pub const AI_FOLLOW_LEADER: AiFlags = AiFlags::FOLLOW_LEADER;
pub const AI_ACTOR: AiFlags = AiFlags::ACTOR;
pub const AI_RANGE_PAUSE: AiFlags = AiFlags::RANGE_PAUSE;

// Monster attack state
pub const AS_STRAIGHT: i32 = 1;
pub const AS_SLIDING: i32 = 2;
pub const AS_MELEE: i32 = 3;
pub const AS_MISSILE: i32 = 4;

// sound channels
pub const CHAN_AUTO: i32 = 0;
pub const CHAN_WEAPON: i32 = 1;
pub const CHAN_VOICE: i32 = 2;
pub const CHAN_ITEM: i32 = 3;
pub const CHAN_BODY: i32 = 4;

// sound attenuation values
pub const ATTN_NONE: f32 = 0.0;
pub const ATTN_NORM: f32 = 1.0;
pub const ATTN_IDLE: f32 = 2.0;
pub const ATTN_STATIC: f32 = 3.0;

// temp entity events used by monsters
pub const TE_BLOOD: i32 = 1;
pub const TE_BLASTER: i32 = 2;
pub const TE_EXPLOSION1: i32 = 5;
pub const TE_ROCKET_EXPLOSION: i32 = 7;
pub const TE_MOREBLOOD: i32 = 42;
pub const TE_CHAINFIST_SMOKE: i32 = 74;

// entity effects
pub const EF_ROCKET: u32 = 0x00000004;
pub const EF_BLASTER: u32 = 0x00000008;
pub const EF_HYPERBLASTER: u32 = 0x00001000;

// ============================================================
// Entity references
// ============================================================

/// Non-owning handle to another entity.
///
/// The generation is bumped every time a slot is freed, so a handle taken
/// before the target died no longer resolves (see `GameContext::resolve`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntRef {
    pub index: i32,
    pub generation: u32,
}

impl EntRef {
    pub const NONE: EntRef = EntRef { index: -1, generation: 0 };

    pub fn is_none(&self) -> bool {
        self.index < 0
    }

    pub fn is_some(&self) -> bool {
        self.index >= 0
    }
}

impl Default for EntRef {
    fn default() -> Self {
        EntRef::NONE
    }
}

// ============================================================
// Callback signatures
// ============================================================

/// stand/walk/run/attack/melee/idle/search, frame thinks, move end functions,
/// entity think and the jump hook.
pub type MonsterFn = fn(&mut GameContext<'_>, usize);
/// sight(self, other)
pub type SightFn = fn(&mut GameContext<'_>, usize, usize);
/// dodge(self, attacker, eta)
pub type DodgeFn = fn(&mut GameContext<'_>, usize, usize, f32);
/// blocked(self, dist) -- returns true when the obstruction was handled
pub type BlockedFn = fn(&mut GameContext<'_>, usize, f32) -> bool;
/// pain(self, other, kick, damage)
pub type PainFn = fn(&mut GameContext<'_>, usize, Option<usize>, f32, i32);
/// die(self, inflictor, attacker, damage, point)
pub type DieFn = fn(&mut GameContext<'_>, usize, Option<usize>, Option<usize>, i32, &Vec3);
/// touch(self, other)
pub type TouchFn = fn(&mut GameContext<'_>, usize, usize);

// ============================================================
// Frame tables
// ============================================================

/// Locomotion applied on a frame before its think callback runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ai {
    Stand,
    Walk,
    Run,
    Charge,
    Move,
    Turn,
}

/// One animation frame of a monster move.
#[derive(Clone, Copy)]
pub struct MFrame {
    pub ai: Option<Ai>,
    pub dist: f32,
    pub think: Option<MonsterFn>,
}

impl MFrame {
    pub const fn new(ai: Ai, dist: f32, think: Option<MonsterFn>) -> Self {
        Self { ai: Some(ai), dist, think }
    }

    /// A frame that only runs its callback.
    pub const fn bare(think: Option<MonsterFn>) -> Self {
        Self { ai: None, dist: 0.0, think }
    }
}

/// A monster move sequence (a set of animation frames).
#[derive(Clone, Copy)]
pub struct MMove {
    pub firstframe: i32,
    pub lastframe: i32,
    pub frames: &'static [MFrame],
    pub endfunc: Option<MonsterFn>,
}

impl MMove {
    pub fn contains(&self, frame: i32) -> bool {
        frame >= self.firstframe && frame <= self.lastframe
    }
}

// ============================================================
// Structures
// ============================================================

/// Client data the monster code touches.
#[derive(Debug, Clone, Default)]
pub struct GClient {
    pub kick_angles: Vec3,
}

/// Moves a monster switches between while following a leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowMoves {
    pub stand: usize,
    pub walk: usize,
    pub run: usize,
}

/// Monster AI info.
#[derive(Clone, Default)]
pub struct MonsterInfo {
    /// The monster's move table; `currentmove` indexes into it.
    pub moves: &'static [MMove],
    pub currentmove: Option<usize>,
    /// the move the frame cursor was last positioned in
    pub active_move: Option<usize>,
    pub aiflags: AiFlags,
    pub nextframe: i32,
    pub scale: f32,

    pub stand: Option<MonsterFn>,
    pub idle: Option<MonsterFn>,
    pub search: Option<MonsterFn>,
    pub walk: Option<MonsterFn>,
    pub run: Option<MonsterFn>,
    pub dodge: Option<DodgeFn>,
    pub attack: Option<MonsterFn>,
    pub melee: Option<MonsterFn>,
    pub sight: Option<SightFn>,
    pub blocked: Option<BlockedFn>,
    pub jump: Option<MonsterFn>,

    pub pausetime: f32,
    pub attack_finished: f32,
    pub rangetime: f32,

    pub saved_goal: Vec3,
    pub search_time: f32,
    pub last_sighting: Vec3,
    pub attack_state: i32,
    pub lefty: i32,
    pub idle_time: f32,
    pub linkcount: i32,

    /// chase-direction axis swap mask (rand & mask == 1)
    pub chase_swap_mask: i32,
    pub min_range: f32,
    pub ideal_range: [f32; 2],
    pub jumpup: f32,
    pub jumpdn: f32,
    /// set for monsters that can tag along behind a movetarget
    pub follow_moves: Option<FollowMoves>,
}

impl MonsterInfo {
    /// The active move, if the cursor points at a valid table entry.
    pub fn current_move(&self) -> Option<&'static MMove> {
        let moves = self.moves;
        self.currentmove.and_then(|i| moves.get(i))
    }
}

/// Full edict structure.
#[derive(Clone, Default)]
pub struct Edict {
    pub s: EntityState,
    pub client: Option<GClient>,
    pub inuse: bool,
    /// bumped whenever the slot is freed
    pub generation: u32,
    pub linkcount: i32,

    pub svflags: i32,
    pub mins: Vec3,
    pub maxs: Vec3,
    pub absmin: Vec3,
    pub absmax: Vec3,
    pub size: Vec3,
    pub solid: Solid,
    pub clipmask: i32,
    pub owner: EntRef,

    pub movetype: MoveType,
    pub flags: EntityFlags,
    pub classname: String,
    pub spawnflags: i32,
    pub style: i32,
    pub movedir: Vec3,

    pub velocity: Vec3,
    pub avelocity: Vec3,
    pub mass: i32,

    pub goalentity: EntRef,
    pub movetarget: EntRef,
    pub yaw_speed: f32,
    pub ideal_yaw: f32,

    pub nextthink: f32,
    pub think: Option<MonsterFn>,
    pub touch: Option<TouchFn>,
    pub pain: Option<PainFn>,
    pub die: Option<DieFn>,

    pub pain_debounce_time: f32,
    pub count: i32,

    pub health: i32,
    pub max_health: i32,
    pub gib_health: i32,
    pub deadflag: i32,

    pub viewheight: i32,
    pub takedamage: i32,

    pub enemy: EntRef,
    pub oldenemy: EntRef,
    pub groundentity: EntRef,
    pub groundentity_linkcount: i32,

    pub watertype: i32,
    pub waterlevel: i32,

    pub monsterinfo: MonsterInfo,
}

impl Edict {
    pub fn is_monster(&self) -> bool {
        self.svflags & SVF_MONSTER != 0
    }

    pub fn is_client(&self) -> bool {
        self.client.is_some()
    }
}
