//! Game import interface -- functions provided by the engine to the monster code.
//! This mirrors the parts of the C `game_import_t` table the movement and
//! behavior code relies on: collision queries, the spatial index, sounds,
//! temp entities and cvars.
//!
//! The engine implementation is handed to `GameContext` by reference, so a
//! level can be simulated against any world (the unit tests use a brush world).

use myq2_common::q_shared::{Multicast, Trace, Vec3};

use crate::g_local::Edict;

pub trait GameImport {
    /// Developer console output.
    fn dprintf(&self, msg: &str);

    /// Sweep a box from `start` to `end`, ignoring `passent` (-1 for none).
    fn trace(
        &self,
        start: &Vec3,
        mins: &Vec3,
        maxs: &Vec3,
        end: &Vec3,
        passent: i32,
        contentmask: i32,
    ) -> Trace;

    fn pointcontents(&self, point: &Vec3) -> i32;

    fn in_pvs(&self, p1: &Vec3, p2: &Vec3) -> bool;

    /// Re-index an entity after its bounds moved. The game has already
    /// refreshed absmin/absmax/size and bumped the linkcount.
    fn linkentity(&self, ent_idx: usize, ent: &Edict);

    fn unlinkentity(&self, ent_idx: usize);

    /// Entities whose bounds overlap the box, solid or trigger area.
    fn box_edicts(&self, mins: &Vec3, maxs: &Vec3, areatype: i32) -> Vec<usize>;

    fn soundindex(&self, name: &str) -> i32;

    fn sound(
        &self,
        ent_idx: usize,
        channel: i32,
        soundindex: i32,
        volume: f32,
        attenuation: f32,
        timeofs: f32,
    );

    /// svc_temp_entity with a position and optional direction.
    fn temp_entity(&self, te_type: i32, origin: &Vec3, dir: Option<&Vec3>, to: Multicast);

    /// svc_muzzleflash2 for a monster weapon.
    fn muzzleflash2(&self, ent_idx: usize, flash_number: i32, origin: &Vec3);

    /// Current string value of a console variable, if it exists.
    fn cvar(&self, name: &str) -> Option<String>;
}

/// A world with nothing in it. Every trace runs its full length and every
/// other call is ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubGameImport;

impl GameImport for StubGameImport {
    fn dprintf(&self, _msg: &str) {}
    fn trace(
        &self,
        _start: &Vec3,
        _mins: &Vec3,
        _maxs: &Vec3,
        end: &Vec3,
        _passent: i32,
        _contentmask: i32,
    ) -> Trace {
        Trace {
            endpos: *end,
            ..Default::default()
        }
    }
    fn pointcontents(&self, _point: &Vec3) -> i32 {
        0
    }
    fn in_pvs(&self, _p1: &Vec3, _p2: &Vec3) -> bool {
        true
    }
    fn linkentity(&self, _ent_idx: usize, _ent: &Edict) {}
    fn unlinkentity(&self, _ent_idx: usize) {}
    fn box_edicts(&self, _mins: &Vec3, _maxs: &Vec3, _areatype: i32) -> Vec<usize> {
        Vec::new()
    }
    fn soundindex(&self, _name: &str) -> i32 {
        0
    }
    fn sound(&self, _ent_idx: usize, _channel: i32, _soundindex: i32, _volume: f32, _attenuation: f32, _timeofs: f32) {}
    fn temp_entity(&self, _te_type: i32, _origin: &Vec3, _dir: Option<&Vec3>, _to: Multicast) {}
    fn muzzleflash2(&self, _ent_idx: usize, _flash_number: i32, _origin: &Vec3) {}
    fn cvar(&self, _name: &str) -> Option<String> {
        None
    }
}
