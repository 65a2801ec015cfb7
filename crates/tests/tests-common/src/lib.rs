//! Test infrastructure shared by the crates of this workspace.

pub mod database;
pub mod selection;
