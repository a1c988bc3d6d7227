pub mod category;
pub mod common;
pub mod contest;
pub mod photo;
pub mod ranking;
pub mod rating;
