// src/application/ports/mod.rs
pub mod category;
pub mod time;
pub mod util;
