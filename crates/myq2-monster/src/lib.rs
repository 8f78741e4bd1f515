#![allow(dead_code, unused_variables, unused_mut)]
#![allow(clippy::needless_return, clippy::too_many_arguments, clippy::collapsible_if,
         clippy::collapsible_else_if, clippy::field_reassign_with_default,
         clippy::manual_range_contains, clippy::comparison_chain, clippy::float_cmp,
         clippy::needless_range_loop, clippy::if_same_then_else, clippy::type_complexity)]
// Monster locomotion, steering and behavior -- converted from myq2-original/game/

pub mod game_import;
pub mod game;
pub mod g_local;
pub mod g_config;
pub mod g_utils;
pub mod g_combat;
pub mod m_move;
pub mod g_ai;
pub mod g_monster;
pub mod m_flash;
pub mod m_aim;
pub mod m_tank;
pub mod m_infantry;
pub mod m_flyer;
pub mod g_main;

#[cfg(test)]
mod test_world;
