pub mod common;
pub mod gateway;
pub mod ingredient;
pub mod recipe;
pub mod review;
pub mod session;
