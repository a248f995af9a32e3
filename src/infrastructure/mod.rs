pub mod cache;
pub mod database;
pub mod ids;
pub mod repositories;
pub mod security;
pub mod time;
