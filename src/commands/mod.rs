//! CLI commands for kpoint

pub mod categories;
pub mod compare;
pub mod dedup;
pub mod dispatch;
pub mod input;
pub mod recommend;
