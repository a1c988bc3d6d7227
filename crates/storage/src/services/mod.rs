pub mod export;
pub mod ranking;

pub use ranking::{CategoryFilter, RankedPhoto, compute_ranking};
