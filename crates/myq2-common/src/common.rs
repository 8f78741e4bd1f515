// common.rs -- misc functions shared by the game modules
// Converted from: myq2-original/qcommon/common.c
//
// Copyright (C) 1997-2001 Id Software, Inc.
// Licensed under the GNU General Public License v2 or later.

use rand::Rng;

// ============================================================
// Random numbers
// ============================================================
//
// The game code draws from a 15-bit generator. The `_from` variants take
// an explicit generator so a simulation can own a seeded one.

/// Random float in [0, 1].
pub fn frand() -> f32 {
    frand_from(&mut rand::thread_rng())
}

/// Random float in [-1, 1].
pub fn crand() -> f32 {
    crand_from(&mut rand::thread_rng())
}

/// Random integer in [0, 32767], the C `rand() & 0x7fff` range.
pub fn rand_i32() -> i32 {
    rand_i32_from(&mut rand::thread_rng())
}

pub fn frand_from<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    (rng.gen::<u32>() & 32767) as f32 * (1.0 / 32767.0)
}

pub fn crand_from<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    (rng.gen::<u32>() & 32767) as f32 * (2.0 / 32767.0) - 1.0
}

pub fn rand_i32_from<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    (rng.gen::<u32>() & 0x7fff) as i32
}
