//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod patients;
pub mod prescriptions;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;

/// JSON extractor settings shared by every handler.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(error::json_error_handler)
}
