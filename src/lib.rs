// src/lib.rs

pub mod client;
pub mod config;
pub mod curriculum;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod workflow;

// Re-export specific items for convenience if needed
pub use routes::create_router;
pub use workflow::PracticeController;
