// src/handlers/mod.rs

pub mod auth;
pub mod curriculum;
pub mod grading;
pub mod practice;
pub mod profile;
pub mod submissions;
