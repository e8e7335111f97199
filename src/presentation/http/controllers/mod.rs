// src/presentation/http/controllers/mod.rs
pub mod admin_posts;
pub mod posts;
