//! HTTP inbound adapter: browser forms, the notebook JSON listing and probes.

pub mod auth;
pub mod error;
pub mod health;
pub mod notebook;
pub mod register;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
mod views;

pub use error::ApiResult;
