pub mod app;
pub mod books;
pub mod catalog;
pub mod core;
pub mod health;
pub mod utils;
