// src/models/mod.rs

pub mod profile;
pub mod submission;
pub mod user;
