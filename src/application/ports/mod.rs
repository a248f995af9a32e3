// src/application/ports/mod.rs
pub mod cache;
pub mod ids;
pub mod security;
pub mod time;
