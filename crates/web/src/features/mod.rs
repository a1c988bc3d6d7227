pub mod categories;
pub mod contests;
pub mod photos;
pub mod ranking;
pub mod ratings;
