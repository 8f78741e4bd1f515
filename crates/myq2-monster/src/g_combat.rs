// g_combat.rs -- weapon and damage primitives used by monster attacks
// Converted from: myq2-original/game/g_weapon.c + g_misc.c (gibs, explosions)
//
// Copyright (C) 1997-2001 Id Software, Inc.
// Licensed under the GNU General Public License v2 or later.
//
// Projectiles, damage and gibs belong to the rest of the game. The monster
// code only decides when and where to fire, so it sees them as a trait.

use myq2_common::q_shared::Vec3;

pub trait Combat {
    fn fire_bullet(
        &self,
        owner: usize,
        start: &Vec3,
        aimdir: &Vec3,
        damage: i32,
        kick: i32,
        hspread: i32,
        vspread: i32,
    );

    fn fire_blaster(&self, owner: usize, start: &Vec3, dir: &Vec3, damage: i32, speed: i32, effect: u32);

    fn fire_rocket(
        &self,
        owner: usize,
        start: &Vec3,
        dir: &Vec3,
        damage: i32,
        speed: i32,
        damage_radius: f32,
        radius_damage: i32,
    );

    fn fire_grenade(&self, owner: usize, start: &Vec3, aimdir: &Vec3, damage: i32, speed: i32, timer: f32, damage_radius: f32);

    /// T_Damage with knockback `kick` along `dir`.
    fn damage(&self, target: usize, attacker: usize, dir: &Vec3, point: &Vec3, damage: i32, kick: i32);

    fn radius_damage(&self, inflictor: usize, damage: f32, radius: f32);

    /// Throws a detached gib entity away from `owner`.
    fn throw_gib(&self, owner: usize, model: &str, damage: i32, gib_type: i32);

    /// Visual half of ThrowHead; the game turns `owner` itself into the head.
    fn throw_head(&self, owner: usize, model: &str, damage: i32, gib_type: i32);
}

/// Fires into the void.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubCombat;

impl Combat for StubCombat {
    fn fire_bullet(&self, _owner: usize, _start: &Vec3, _aimdir: &Vec3, _damage: i32, _kick: i32, _hspread: i32, _vspread: i32) {}
    fn fire_blaster(&self, _owner: usize, _start: &Vec3, _dir: &Vec3, _damage: i32, _speed: i32, _effect: u32) {}
    fn fire_rocket(&self, _owner: usize, _start: &Vec3, _dir: &Vec3, _damage: i32, _speed: i32, _damage_radius: f32, _radius_damage: i32) {}
    fn fire_grenade(&self, _owner: usize, _start: &Vec3, _aimdir: &Vec3, _damage: i32, _speed: i32, _timer: f32, _damage_radius: f32) {}
    fn damage(&self, _target: usize, _attacker: usize, _dir: &Vec3, _point: &Vec3, _damage: i32, _kick: i32) {}
    fn radius_damage(&self, _inflictor: usize, _damage: f32, _radius: f32) {}
    fn throw_gib(&self, _owner: usize, _model: &str, _damage: i32, _gib_type: i32) {}
    fn throw_head(&self, _owner: usize, _model: &str, _damage: i32, _gib_type: i32) {}
}
