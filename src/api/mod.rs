//! # API Module
//!
//! HTTP endpoints served by the short-lived local server that receives the
//! Google OAuth redirect.
//!
//! ## Endpoints
//!
//! - [`callback`] - Completes the PKCE flow by exchanging the authorization
//!   code for an access token and storing it in the shared state.
//! - [`health`] - Reports that the callback server is up, with the crate
//!   version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use vkbackup::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
