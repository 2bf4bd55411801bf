mod assets;
mod auth;
pub mod client;
pub mod operations;
mod scans;
pub mod types;

pub use client::*;
pub use types::*;
