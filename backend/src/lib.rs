pub mod catchers;
pub mod channel;
pub mod config;
pub mod cors;
pub mod error;
pub mod routes;
pub mod store;

pub use shared::{models::*, ClientInfo, ErrorResponse};

#[cfg(test)]
mod tests;
