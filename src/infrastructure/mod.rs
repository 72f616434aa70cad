//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Configuration loading (config)
//! - HTTP client for the booking backend (api_client)
//! - Demo backend state, seed data and server (state, seed, server)

pub mod api_client;
pub mod config;
pub mod seed;
pub mod server;
pub mod state;

pub use api_client::HttpBookingRepository;
pub use state::AppState;
