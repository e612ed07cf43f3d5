pub mod client_info;
pub mod error;
pub mod models;

pub use client_info::ClientInfo;
pub use error::ErrorResponse;
pub use models::*;

#[cfg(test)]
mod tests;
