//! HTTP middleware module.
//!
//! - Cross-origin headers and pre-flight handling
//! - Security headers
//!
//! ```ignore
//! use axum_helpers::http::{permissive_cors, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(axum::middleware::from_fn(permissive_cors));
//! ```

pub mod cors;
pub mod security;

pub use cors::permissive_cors;
pub use security::security_headers;
