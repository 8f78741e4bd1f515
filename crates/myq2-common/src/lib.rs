#![allow(dead_code)]
#![allow(clippy::needless_return, clippy::float_cmp, clippy::manual_range_contains)]
// Shared foundation -- converted from myq2-original/game/q_shared.c and qcommon/

pub mod q_shared;
pub mod common;
