pub mod batch;
pub mod schedule;
