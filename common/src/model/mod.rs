pub mod placeholder;
pub mod roster;
pub mod schedule;
