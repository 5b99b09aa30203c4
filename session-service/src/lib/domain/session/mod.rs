pub mod errors;
pub mod models;
pub mod ports;
pub mod refresh_tokens;
pub mod service;
