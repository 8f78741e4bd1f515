// test_world.rs -- axis-aligned brush world for unit tests
//
// Implements the engine side of the game interfaces: box sweeps against
// brushes and linked entity boxes, point contents, box queries, and a log
// of every sound, temp entity and weapon shot so tests can assert on them.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::g_combat::Combat;
use crate::g_config::MonsterConfig;
use crate::g_local::*;
use crate::g_utils::link_entity;
use crate::game_import::GameImport;

// trace back-off from the hit plane, same as the collision code
const DIST_EPSILON: f32 = 0.03125;

#[derive(Debug, Clone, Copy)]
pub struct Brush {
    pub mins: Vec3,
    pub maxs: Vec3,
    pub contents: i32,
}

#[derive(Debug, Clone, Copy)]
struct LinkedEnt {
    // exact world-space box, used for collision
    mins: Vec3,
    maxs: Vec3,
    absmin: Vec3,
    absmax: Vec3,
    contents: i32,
    solid: Solid,
    owner: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fired {
    Bullet { owner: usize, start: Vec3, dir: Vec3, damage: i32, kick: i32 },
    Blaster { owner: usize, start: Vec3, dir: Vec3, damage: i32, speed: i32 },
    Rocket { owner: usize, start: Vec3, dir: Vec3, damage: i32, speed: i32 },
    Grenade { owner: usize, start: Vec3, dir: Vec3, damage: i32, speed: i32 },
    Damage { target: usize, attacker: usize, damage: i32, kick: i32 },
    Radius { inflictor: usize, damage: f32, radius: f32 },
    Gib { owner: usize, model: String },
    Head { owner: usize, model: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SoundCall {
    pub ent: usize,
    pub channel: i32,
    pub index: i32,
}

#[derive(Default)]
pub struct TestWorld {
    brushes: Mutex<Vec<Brush>>,
    ents: Mutex<HashMap<usize, LinkedEnt>>,
    cvars: Mutex<HashMap<String, String>>,
    console: Mutex<Vec<String>>,
    sound_names: Mutex<Vec<String>>,
    sounds: Mutex<Vec<SoundCall>>,
    temp_entities: Mutex<Vec<i32>>,
    flashes: Mutex<Vec<i32>>,
    fired: Mutex<Vec<Fired>>,
    traces: Mutex<u32>,
    links: Mutex<u32>,
}

impl TestWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// A solid floor slab whose top is at z = 0.
    pub fn with_floor() -> Self {
        let w = Self::new();
        w.add_brush([-4096.0, -4096.0, -64.0], [4096.0, 4096.0, 0.0], CONTENTS_SOLID);
        w
    }

    pub fn add_brush(&self, mins: Vec3, maxs: Vec3, contents: i32) {
        self.brushes.lock().push(Brush { mins, maxs, contents });
    }

    pub fn set_cvar(&self, name: &str, value: &str) {
        self.cvars.lock().insert(name.to_string(), value.to_string());
    }

    pub fn context(&self, maxclients: usize) -> GameContext<'_> {
        self.context_with(maxclients, MonsterConfig::default(), 1)
    }

    pub fn context_with(&self, maxclients: usize, config: MonsterConfig, seed: u64) -> GameContext<'_> {
        GameContext::new(self, self, maxclients, config, seed)
    }

    pub fn console(&self) -> Vec<String> {
        self.console.lock().clone()
    }

    pub fn sounds(&self) -> Vec<SoundCall> {
        self.sounds.lock().clone()
    }

    pub fn sound_named(&self, name: &str) -> Option<i32> {
        self.sound_names
            .lock()
            .iter()
            .position(|n| n == name)
            .map(|i| i as i32 + 1)
    }

    pub fn played(&self, name: &str) -> bool {
        match self.sound_named(name) {
            Some(index) => self.sounds.lock().iter().any(|s| s.index == index),
            None => false,
        }
    }

    pub fn temp_entities(&self) -> Vec<i32> {
        self.temp_entities.lock().clone()
    }

    pub fn flashes(&self) -> Vec<i32> {
        self.flashes.lock().clone()
    }

    pub fn fired(&self) -> Vec<Fired> {
        self.fired.lock().clone()
    }

    pub fn clear_log(&self) {
        self.sounds.lock().clear();
        self.temp_entities.lock().clear();
        self.flashes.lock().clear();
        self.fired.lock().clear();
    }

    pub fn trace_count(&self) -> u32 {
        *self.traces.lock()
    }

    pub fn link_count(&self) -> u32 {
        *self.links.lock()
    }

    /// Candidate obstacles for a trace as (mins, maxs, contents, ent index).
    fn obstacles(&self, passent: i32, contentmask: i32) -> Vec<(Vec3, Vec3, i32, i32)> {
        let mut out = Vec::new();
        for b in self.brushes.lock().iter() {
            if b.contents & contentmask != 0 {
                out.push((b.mins, b.maxs, b.contents, 0));
            }
        }
        for (&idx, e) in self.ents.lock().iter() {
            let idx = idx as i32;
            if idx == passent || (passent >= 0 && e.owner == passent) {
                continue;
            }
            if matches!(e.solid, Solid::Not | Solid::Trigger) {
                continue;
            }
            if e.contents & contentmask != 0 {
                out.push((e.mins, e.maxs, e.contents, idx));
            }
        }
        out
    }
}

fn strictly_inside(p: &Vec3, mins: &Vec3, maxs: &Vec3) -> bool {
    (0..3).all(|i| p[i] > mins[i] && p[i] < maxs[i])
}

/// Entry fraction and axis of a segment into a box, if it enters.
fn segment_entry(start: &Vec3, end: &Vec3, mins: &Vec3, maxs: &Vec3) -> Option<(f32, usize, f32)> {
    let d = vector_subtract(end, start);
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut axis = 0;

    for i in 0..3 {
        if d[i] == 0.0 {
            if start[i] <= mins[i] || start[i] >= maxs[i] {
                return None;
            }
            continue;
        }
        let mut t0 = (mins[i] - start[i]) / d[i];
        let mut t1 = (maxs[i] - start[i]) / d[i];
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_enter {
            t_enter = t0;
            axis = i;
        }
        if t1 < t_exit {
            t_exit = t1;
        }
    }

    if t_enter < t_exit && (0.0..=1.0).contains(&t_enter) {
        Some((t_enter, axis, d[axis]))
    } else {
        None
    }
}

impl GameImport for TestWorld {
    fn dprintf(&self, msg: &str) {
        self.console.lock().push(msg.to_string());
    }

    fn trace(
        &self,
        start: &Vec3,
        mins: &Vec3,
        maxs: &Vec3,
        end: &Vec3,
        passent: i32,
        contentmask: i32,
    ) -> Trace {
        *self.traces.lock() += 1;
        let mut tr = Trace {
            endpos: *end,
            ..Default::default()
        };

        for (bmin, bmax, contents, ent) in self.obstacles(passent, contentmask) {
            // Minkowski-expand the obstacle by the moving box
            let emin = vector_subtract(&bmin, maxs);
            let emax = vector_subtract(&bmax, mins);

            if strictly_inside(start, &emin, &emax) {
                tr.startsolid = true;
                tr.ent_index = ent;
                tr.contents = contents;
                if strictly_inside(end, &emin, &emax) {
                    tr.allsolid = true;
                    tr.fraction = 0.0;
                }
                continue;
            }

            if let Some((t, axis, dist)) = segment_entry(start, end, &emin, &emax) {
                let frac = (t - DIST_EPSILON / dist.abs()).max(0.0);
                if frac < tr.fraction {
                    tr.fraction = frac;
                    tr.contents = contents;
                    tr.ent_index = ent;
                    let mut normal = [0.0; 3];
                    normal[axis] = if dist > 0.0 { -1.0 } else { 1.0 };
                    tr.plane = CPlane {
                        normal,
                        dist: if dist > 0.0 { -emin[axis] } else { emax[axis] },
                    };
                }
            }
        }

        if tr.allsolid {
            tr.endpos = *start;
        } else if tr.fraction < 1.0 {
            let d = vector_subtract(end, start);
            tr.endpos = vector_ma(start, tr.fraction, &d);
        }
        tr
    }

    fn pointcontents(&self, point: &Vec3) -> i32 {
        let inside = |mins: &Vec3, maxs: &Vec3| (0..3).all(|i| point[i] >= mins[i] && point[i] <= maxs[i]);
        let mut contents = 0;
        for b in self.brushes.lock().iter() {
            if inside(&b.mins, &b.maxs) {
                contents |= b.contents;
            }
        }
        for e in self.ents.lock().values() {
            if !matches!(e.solid, Solid::Not | Solid::Trigger) && inside(&e.mins, &e.maxs) {
                contents |= e.contents;
            }
        }
        contents
    }

    fn in_pvs(&self, _p1: &Vec3, _p2: &Vec3) -> bool {
        true
    }

    fn linkentity(&self, ent_idx: usize, ent: &Edict) {
        *self.links.lock() += 1;
        let contents = if ent.solid == Solid::Bsp {
            CONTENTS_SOLID
        } else if ent.svflags & SVF_DEADMONSTER != 0 {
            CONTENTS_DEADMONSTER
        } else {
            CONTENTS_MONSTER
        };
        self.ents.lock().insert(
            ent_idx,
            LinkedEnt {
                mins: vector_add(&ent.s.origin, &ent.mins),
                maxs: vector_add(&ent.s.origin, &ent.maxs),
                absmin: ent.absmin,
                absmax: ent.absmax,
                contents,
                solid: ent.solid,
                owner: ent.owner.index,
            },
        );
    }

    fn unlinkentity(&self, ent_idx: usize) {
        self.ents.lock().remove(&ent_idx);
    }

    fn box_edicts(&self, mins: &Vec3, maxs: &Vec3, areatype: i32) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .ents
            .lock()
            .iter()
            .filter(|(_, e)| {
                let wanted = match areatype {
                    AREA_TRIGGERS => e.solid == Solid::Trigger,
                    _ => !matches!(e.solid, Solid::Not | Solid::Trigger),
                };
                wanted && (0..3).all(|i| e.absmin[i] <= maxs[i] && e.absmax[i] >= mins[i])
            })
            .map(|(&i, _)| i)
            .collect();
        out.sort_unstable();
        out
    }

    fn soundindex(&self, name: &str) -> i32 {
        let mut names = self.sound_names.lock();
        if let Some(i) = names.iter().position(|n| n == name) {
            return i as i32 + 1;
        }
        names.push(name.to_string());
        names.len() as i32
    }

    fn sound(&self, ent_idx: usize, channel: i32, soundindex: i32, _volume: f32, _attenuation: f32, _timeofs: f32) {
        self.sounds.lock().push(SoundCall { ent: ent_idx, channel, index: soundindex });
    }

    fn temp_entity(&self, te_type: i32, _origin: &Vec3, _dir: Option<&Vec3>, _to: Multicast) {
        self.temp_entities.lock().push(te_type);
    }

    fn muzzleflash2(&self, _ent_idx: usize, flash_number: i32, _origin: &Vec3) {
        self.flashes.lock().push(flash_number);
    }

    fn cvar(&self, name: &str) -> Option<String> {
        self.cvars.lock().get(name).cloned()
    }
}

impl Combat for TestWorld {
    fn fire_bullet(&self, owner: usize, start: &Vec3, aimdir: &Vec3, damage: i32, kick: i32, _hspread: i32, _vspread: i32) {
        self.fired.lock().push(Fired::Bullet { owner, start: *start, dir: *aimdir, damage, kick });
    }

    fn fire_blaster(&self, owner: usize, start: &Vec3, dir: &Vec3, damage: i32, speed: i32, _effect: u32) {
        self.fired.lock().push(Fired::Blaster { owner, start: *start, dir: *dir, damage, speed });
    }

    fn fire_rocket(&self, owner: usize, start: &Vec3, dir: &Vec3, damage: i32, speed: i32, _damage_radius: f32, _radius_damage: i32) {
        self.fired.lock().push(Fired::Rocket { owner, start: *start, dir: *dir, damage, speed });
    }

    fn fire_grenade(&self, owner: usize, start: &Vec3, aimdir: &Vec3, damage: i32, speed: i32, _timer: f32, _damage_radius: f32) {
        self.fired.lock().push(Fired::Grenade { owner, start: *start, dir: *aimdir, damage, speed });
    }

    fn damage(&self, target: usize, attacker: usize, _dir: &Vec3, _point: &Vec3, damage: i32, kick: i32) {
        self.fired.lock().push(Fired::Damage { target, attacker, damage, kick });
    }

    fn radius_damage(&self, inflictor: usize, damage: f32, radius: f32) {
        self.fired.lock().push(Fired::Radius { inflictor, damage, radius });
    }

    fn throw_gib(&self, owner: usize, model: &str, _damage: i32, _gib_type: i32) {
        self.fired.lock().push(Fired::Gib { owner, model: model.to_string() });
    }

    fn throw_head(&self, owner: usize, model: &str, _damage: i32, _gib_type: i32) {
        self.fired.lock().push(Fired::Head { owner, model: model.to_string() });
    }
}

// ============================================================
// Entity builders
// ============================================================

/// A linked, grounded walking monster with a 32x32x56 box.
pub fn spawn_test_monster(ctx: &mut GameContext, origin: Vec3) -> usize {
    let idx = ctx.spawn();
    {
        let ent = &mut ctx.edicts[idx];
        ent.classname = "monster_test".to_string();
        ent.s.origin = origin;
        ent.s.old_origin = origin;
        ent.mins = [-16.0, -16.0, -24.0];
        ent.maxs = [16.0, 16.0, 32.0];
        ent.svflags |= SVF_MONSTER;
        ent.solid = Solid::Bbox;
        ent.movetype = MoveType::Step;
        ent.clipmask = MASK_MONSTERSOLID;
        ent.health = 100;
        ent.max_health = 100;
        ent.takedamage = DAMAGE_AIM;
        ent.yaw_speed = 20.0;
        ent.viewheight = 25;
        ent.monsterinfo.chase_swap_mask = 1;
    }
    let world = ctx.entref(0);
    ctx.edicts[idx].groundentity = world;
    link_entity(ctx, idx);
    idx
}

/// Puts a live player in client slot `slot`.
pub fn spawn_test_client(ctx: &mut GameContext, slot: usize, origin: Vec3) -> usize {
    {
        let ent = &mut ctx.edicts[slot];
        ent.inuse = true;
        ent.classname = "player".to_string();
        ent.client = Some(GClient::default());
        ent.s.origin = origin;
        ent.mins = [-16.0, -16.0, -24.0];
        ent.maxs = [16.0, 16.0, 32.0];
        ent.solid = Solid::Bbox;
        ent.health = 100;
        ent.takedamage = DAMAGE_AIM;
        ent.viewheight = 22;
    }
    link_entity(ctx, slot);
    slot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_down_onto_floor() {
        let w = TestWorld::with_floor();
        let tr = w.trace(&[0.0, 0.0, 50.0], &[-16.0, -16.0, -24.0], &[16.0, 16.0, 32.0], &[0.0, 0.0, 0.0], -1, MASK_SOLID);
        assert!(!tr.startsolid);
        assert!(tr.fraction < 1.0);
        assert!((tr.endpos[2] - 24.0).abs() < 0.1);
        assert_eq!(tr.plane.normal, [0.0, 0.0, 1.0]);
        assert_eq!(tr.ent(), Some(0));
    }

    #[test]
    fn test_trace_glides_along_floor() {
        let w = TestWorld::with_floor();
        let tr = w.trace(&[0.0, 0.0, 24.0], &[-16.0, -16.0, -24.0], &[16.0, 16.0, 32.0], &[100.0, 0.0, 24.0], -1, MASK_SOLID);
        assert_eq!(tr.fraction, 1.0);
        assert!(!tr.startsolid);
    }

    #[test]
    fn test_trace_allsolid_inside_wall() {
        let w = TestWorld::new();
        w.add_brush([0.0, -100.0, 0.0], [100.0, 100.0, 100.0], CONTENTS_SOLID);
        let tr = w.trace(&[50.0, 0.0, 50.0], &[0.0; 3], &[0.0; 3], &[60.0, 0.0, 50.0], -1, MASK_SOLID);
        assert!(tr.startsolid);
        assert!(tr.allsolid);
        assert_eq!(tr.fraction, 0.0);
    }

    #[test]
    fn test_trace_respects_mask_and_passent() {
        let w = TestWorld::new();
        w.add_brush([0.0, -100.0, 0.0], [10.0, 100.0, 100.0], CONTENTS_WATER);
        let tr = w.trace(&[-50.0, 0.0, 50.0], &[0.0; 3], &[0.0; 3], &[50.0, 0.0, 50.0], -1, MASK_SOLID);
        assert_eq!(tr.fraction, 1.0);
        let tr = w.trace(&[-50.0, 0.0, 50.0], &[0.0; 3], &[0.0; 3], &[50.0, 0.0, 50.0], -1, MASK_WATER);
        assert!(tr.fraction < 1.0);
    }

    #[test]
    fn test_pointcontents_and_box_edicts() {
        let w = TestWorld::with_floor();
        assert_eq!(w.pointcontents(&[0.0, 0.0, -1.0]), CONTENTS_SOLID);
        assert_eq!(w.pointcontents(&[0.0, 0.0, 1.0]), 0);

        let mut ctx = w.context(0);
        let m = spawn_test_monster(&mut ctx, [0.0, 0.0, 24.0]);
        assert_eq!(w.box_edicts(&[-1.0; 3], &[1.0, 1.0, 30.0], AREA_SOLID), vec![m]);
        assert!(w.box_edicts(&[-1.0; 3], &[1.0; 3], AREA_TRIGGERS).is_empty());
        assert_eq!(w.pointcontents(&[0.0, 0.0, 10.0]), CONTENTS_MONSTER);
    }

    #[test]
    fn test_sound_indexes_are_stable() {
        let w = TestWorld::new();
        let a = w.soundindex("a.wav");
        let b = w.soundindex("b.wav");
        assert_ne!(a, b);
        assert_eq!(w.soundindex("a.wav"), a);
        assert_eq!(w.sound_named("b.wav"), Some(b));
    }
}
