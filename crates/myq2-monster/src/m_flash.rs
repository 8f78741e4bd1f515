// m_flash.rs -- muzzle flash numbers and offsets for the monsters in this crate
// Converted from: myq2-original/game/m_flash.c + q_shared.h (MZ2_*)
//
// Copyright (C) 1997-2001 Id Software, Inc.
// Licensed under the GNU General Public License v2 or later.
//
// Offsets are in model space: x forward, y right, z up. The flash number is
// also what the client keys its muzzle flash effect on, so the numbering
// must match the engine's.

use myq2_common::q_shared::Vec3;

pub const MZ2_TANK_BLASTER_1: i32 = 1;
pub const MZ2_TANK_BLASTER_2: i32 = 2;
pub const MZ2_TANK_BLASTER_3: i32 = 3;
pub const MZ2_TANK_MACHINEGUN_1: i32 = 4;
pub const MZ2_TANK_MACHINEGUN_19: i32 = 22;
pub const MZ2_TANK_ROCKET_1: i32 = 23;
pub const MZ2_TANK_ROCKET_2: i32 = 24;
pub const MZ2_TANK_ROCKET_3: i32 = 25;

pub const MZ2_INFANTRY_MACHINEGUN_1: i32 = 26;
pub const MZ2_INFANTRY_MACHINEGUN_2: i32 = 27;
pub const MZ2_INFANTRY_MACHINEGUN_13: i32 = 38;

pub const MZ2_FLYER_BLASTER_1: i32 = 58;
pub const MZ2_FLYER_BLASTER_2: i32 = 59;

#[rustfmt::skip]
static TANK_FLASH: [Vec3; 25] = [
    [20.7, -18.5, 28.7],    // blaster 1
    [16.6, -21.5, 30.1],
    [11.8, -23.9, 32.1],
    [22.9, -0.7, 25.3],     // machinegun 1
    [22.2, 6.2, 22.3],
    [19.4, 13.1, 18.6],
    [19.4, 18.8, 18.6],
    [17.9, 25.0, 18.6],
    [14.1, 30.5, 20.6],
    [9.3, 35.3, 22.1],
    [4.7, 38.4, 22.1],
    [-1.1, 40.4, 24.1],
    [-6.5, 41.2, 24.1],     // machinegun 10
    [3.2, 40.1, 24.7],
    [11.7, 36.7, 26.0],
    [18.9, 31.3, 26.0],
    [24.4, 24.4, 26.4],
    [27.1, 17.1, 27.2],
    [28.5, 9.1, 28.0],
    [27.1, 2.2, 28.0],
    [24.9, -2.8, 28.0],
    [21.6, -7.0, 26.4],     // machinegun 19
    [6.2, 29.1, 49.1],      // rocket 1
    [6.9, 23.8, 49.1],
    [8.3, 17.8, 49.5],
];

#[rustfmt::skip]
static INFANTRY_FLASH: [Vec3; 13] = [
    [26.6, 7.1, 13.1],
    [18.2, 7.5, 15.4],
    [17.2, 10.3, 17.9],
    [17.0, 12.8, 20.1],
    [15.1, 14.1, 21.8],
    [11.8, 17.2, 23.1],
    [11.4, 20.2, 21.0],
    [9.0, 23.0, 18.9],
    [13.9, 18.6, 17.7],
    [15.4, 15.6, 15.8],
    [10.2, 15.2, 25.1],
    [-1.9, 15.1, 28.2],
    [-12.4, 13.0, 20.2],
];

#[rustfmt::skip]
static FLYER_FLASH: [Vec3; 2] = [
    [12.1, 13.4, -14.5],
    [12.1, -7.4, -14.5],
];

/// Model-space muzzle offset for a flash number. Numbers that belong to
/// monsters outside this crate come back as the origin.
pub fn monster_flash_offset(flash_number: i32) -> Vec3 {
    let lookup = |table: &[Vec3], first: i32| table[(flash_number - first) as usize];
    match flash_number {
        MZ2_TANK_BLASTER_1..=MZ2_TANK_ROCKET_3 => lookup(&TANK_FLASH, MZ2_TANK_BLASTER_1),
        MZ2_INFANTRY_MACHINEGUN_1..=MZ2_INFANTRY_MACHINEGUN_13 => {
            lookup(&INFANTRY_FLASH, MZ2_INFANTRY_MACHINEGUN_1)
        }
        MZ2_FLYER_BLASTER_1..=MZ2_FLYER_BLASTER_2 => lookup(&FLYER_FLASH, MZ2_FLYER_BLASTER_1),
        _ => [0.0; 3],
    }
}
