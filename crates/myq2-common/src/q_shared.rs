// q_shared.rs -- foundational types and functions shared by all modules
// Converted from: myq2-original/game/q_shared.h + q_shared.c
//
// Copyright (C) 1997-2001 Id Software, Inc.
// Licensed under the GNU General Public License v2 or later.

// ============================================================
// Basic types
// ============================================================

pub type Vec3 = [f32; 3];

pub const VEC3_ORIGIN: Vec3 = [0.0, 0.0, 0.0];

// angle indexes
pub const PITCH: usize = 0; // up / down
pub const YAW: usize = 1; // left / right
pub const ROLL: usize = 2; // fall over

pub const DEG_TO_RAD: f32 = std::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / std::f32::consts::PI;

// ============================================================
// Server Timing Constants
// ============================================================

/// Server frame time in seconds (0.1s = 10Hz tick rate).
pub const SERVER_FRAMETIME_SEC: f32 = 0.1;

// ============================================================
// Multicast
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Multicast {
    All = 0,
    Phs = 1,
    Pvs = 2,
}

// ============================================================
// Content flags
// ============================================================

pub const CONTENTS_SOLID: i32 = 1;
pub const CONTENTS_WINDOW: i32 = 2;
pub const CONTENTS_LAVA: i32 = 8;
pub const CONTENTS_SLIME: i32 = 16;
pub const CONTENTS_WATER: i32 = 32;

pub const CONTENTS_MONSTERCLIP: i32 = 0x20000;

pub const CONTENTS_MONSTER: i32 = 0x2000000;
pub const CONTENTS_DEADMONSTER: i32 = 0x4000000;

// ============================================================
// Content masks
// ============================================================

pub const MASK_SOLID: i32 = CONTENTS_SOLID | CONTENTS_WINDOW;
pub const MASK_MONSTERSOLID: i32 =
    CONTENTS_SOLID | CONTENTS_MONSTERCLIP | CONTENTS_WINDOW | CONTENTS_MONSTER;
pub const MASK_WATER: i32 = CONTENTS_WATER | CONTENTS_LAVA | CONTENTS_SLIME;
pub const MASK_OPAQUE: i32 = CONTENTS_SOLID | CONTENTS_SLIME | CONTENTS_LAVA;
pub const MASK_SHOT: i32 =
    CONTENTS_SOLID | CONTENTS_MONSTER | CONTENTS_WINDOW | CONTENTS_DEADMONSTER;

// ============================================================
// Plane / surface / trace
// ============================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct CPlane {
    pub normal: Vec3,
    pub dist: f32,
}

#[derive(Debug, Clone, Default)]
pub struct CSurface {
    pub name: String,
    pub flags: i32,
    pub value: i32,
}

/// Result of a box sweep through the world.
#[derive(Debug, Clone)]
pub struct Trace {
    /// if true, plane is not valid
    pub allsolid: bool,
    /// if true, the initial point was in a solid area
    pub startsolid: bool,
    /// time completed, 1.0 = didn't hit anything
    pub fraction: f32,
    /// final position
    pub endpos: Vec3,
    /// surface normal at impact
    pub plane: CPlane,
    pub surface: Option<CSurface>,
    /// contents on other side of surface hit
    pub contents: i32,
    /// entity the surface is on, -1 when nothing was hit
    pub ent_index: i32,
}

impl Default for Trace {
    fn default() -> Self {
        Self {
            allsolid: false,
            startsolid: false,
            fraction: 1.0,
            endpos: [0.0; 3],
            plane: CPlane::default(),
            surface: None,
            contents: 0,
            ent_index: -1,
        }
    }
}

impl Trace {
    /// The entity hit, if any.
    pub fn ent(&self) -> Option<usize> {
        if self.ent_index >= 0 {
            Some(self.ent_index as usize)
        } else {
            None
        }
    }
}

// ============================================================
// Entity state
// ============================================================

/// The part of an entity that is communicated to clients.
#[derive(Debug, Clone, Default)]
pub struct EntityState {
    pub number: i32,
    pub origin: Vec3,
    pub angles: Vec3,
    pub old_origin: Vec3,
    pub modelindex: i32,
    pub frame: i32,
    pub skinnum: i32,
    pub effects: u32,
    pub renderfx: i32,
    pub sound: i32,
}

// ============================================================
// MATHLIB -- Vector operations
// ============================================================

#[inline]
pub fn dot_product(a: &Vec3, b: &Vec3) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn vector_subtract(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn vector_add(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// veca + scale * vecb
#[inline]
pub fn vector_ma(veca: &Vec3, scale: f32, vecb: &Vec3) -> Vec3 {
    [
        veca[0] + scale * vecb[0],
        veca[1] + scale * vecb[1],
        veca[2] + scale * vecb[2],
    ]
}

#[inline]
pub fn vector_scale(v: &Vec3, scale: f32) -> Vec3 {
    [v[0] * scale, v[1] * scale, v[2] * scale]
}

pub fn vector_compare(v1: &Vec3, v2: &Vec3) -> bool {
    v1[0] == v2[0] && v1[1] == v2[1] && v1[2] == v2[2]
}

/// Normalize in place, returns original length.
pub fn vector_normalize(v: &mut Vec3) -> f32 {
    let length = vector_length(v);
    if length != 0.0 {
        let ilength = 1.0 / length;
        v[0] *= ilength;
        v[1] *= ilength;
        v[2] *= ilength;
    }
    length
}

pub fn vector_length(v: &Vec3) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Squared length of `a - b`. Cheaper than a distance when only ordering matters.
pub fn distance_squared(a: &Vec3, b: &Vec3) -> f32 {
    let d = vector_subtract(a, b);
    dot_product(&d, &d)
}

// ============================================================
// Angle functions
// ============================================================

pub fn angle_vectors(
    angles: &Vec3,
    forward: Option<&mut Vec3>,
    right: Option<&mut Vec3>,
    up: Option<&mut Vec3>,
) {
    let (sy, cy) = (angles[YAW] * DEG_TO_RAD).sin_cos();
    let (sp, cp) = (angles[PITCH] * DEG_TO_RAD).sin_cos();
    let (sr, cr) = (angles[ROLL] * DEG_TO_RAD).sin_cos();

    if let Some(fwd) = forward {
        *fwd = [cp * cy, cp * sy, -sp];
    }
    if let Some(r) = right {
        *r = [
            -sr * sp * cy + -cr * -sy,
            -sr * sp * sy + -cr * cy,
            -sr * cp,
        ];
    }
    if let Some(u) = up {
        *u = [
            cr * sp * cy + -sr * -sy,
            cr * sp * sy + -sr * cy,
            cr * cp,
        ];
    }
}

/// Convenience version of angle_vectors that returns (forward, right, up).
pub fn angle_vectors_tuple(angles: &Vec3) -> (Vec3, Vec3, Vec3) {
    let mut forward = [0.0f32; 3];
    let mut right = [0.0f32; 3];
    let mut up = [0.0f32; 3];
    angle_vectors(angles, Some(&mut forward), Some(&mut right), Some(&mut up));
    (forward, right, up)
}

/// vectoyaw -- Convert a direction vector to a yaw angle.
/// Truncates to whole degrees.
pub fn vectoyaw(vec: &Vec3) -> f32 {
    if vec[PITCH] == 0.0 {
        if vec[YAW] > 0.0 {
            90.0
        } else if vec[YAW] < 0.0 {
            270.0
        } else {
            0.0
        }
    } else {
        let mut yaw = (vec[YAW].atan2(vec[PITCH]) * RAD_TO_DEG) as i32 as f32;
        if yaw < 0.0 {
            yaw += 360.0;
        }
        yaw
    }
}

/// vectoangles -- Convert a direction vector to Euler angles (pitch, yaw, 0).
pub fn vectoangles(value1: &Vec3) -> Vec3 {
    let yaw;
    let mut pitch;

    if value1[1] == 0.0 && value1[0] == 0.0 {
        yaw = 0.0;
        pitch = if value1[2] > 0.0 { 90.0 } else { 270.0 };
    } else {
        yaw = if value1[0] != 0.0 {
            (value1[1].atan2(value1[0]) * RAD_TO_DEG) as i32 as f32
        } else if value1[1] > 0.0 {
            90.0
        } else {
            270.0
        };

        let forward = (value1[0] * value1[0] + value1[1] * value1[1]).sqrt();
        pitch = (value1[2].atan2(forward) * RAD_TO_DEG) as i32 as f32;
        if pitch < 0.0 {
            pitch += 360.0;
        }
    }

    [-pitch, if yaw < 0.0 { yaw + 360.0 } else { yaw }, 0.0]
}

/// Wrap an angle into [0, 360) on a 16-bit grid.
pub fn anglemod(a: f32) -> f32 {
    (360.0 / 65536.0) * (((a * (65536.0 / 360.0)) as i32) & 65535) as f32
}
