pub mod admin;
pub mod app;
pub mod auth;
pub mod config;
pub mod directory;
pub mod error;
pub mod profile;
pub mod ratings;
pub mod state;
pub mod storage;
pub mod store;
pub mod swaps;
