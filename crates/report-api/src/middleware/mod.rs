//! HTTP 미들웨어.

pub mod auth;

pub use auth::{require_secret_token, SECRET_TOKEN_HEADER};
