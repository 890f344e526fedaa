pub mod pricing;
pub mod schedule;
pub mod time;
