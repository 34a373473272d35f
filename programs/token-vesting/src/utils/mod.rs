pub mod custody;
pub mod schedule;
