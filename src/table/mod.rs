//! Table definition and construction
//!
//! `layout` is the declarative geometry table (pure data); `assembly`
//! instantiates every entity against the physics world and registers each
//! scoring collider with the collision dispatcher.

pub mod assembly;
pub mod layout;

pub use assembly::{Table, build_table};
pub use layout::{TableLayout, TrapZone};
