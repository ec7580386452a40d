//! HTTP inbound adapter exposing the social graph REST endpoints.

pub mod error;
pub mod health;
pub mod people;
pub mod posts;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
