pub mod category;
pub mod contest;
pub mod photo;
pub mod rating;
