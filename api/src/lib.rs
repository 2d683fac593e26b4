//! # API crate — typed REST client for the portfolio backend
//!
//! Every network call the frontends make goes through [`ApiClient`]: it owns
//! the persisted bearer token, attaches the `Authorization` header, and
//! normalizes backend error shapes into a single [`ApiError`].
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`] and the typed operations (auth, profile, portfolio) |
//! | [`error`] | [`ApiError`] taxonomy with user-facing messages |
//! | [`models`] | Wire models (`CurrentUser`, `PortfolioItem`, request payloads) |
//! | [`token`] | [`TokenStore`] trait plus the browser and in-memory stores |
//!
//! The client never navigates: a 401 clears the stored token and surfaces
//! [`ApiError::Unauthorized`], and the view layer decides whether to show the
//! message inline (auth pages) or redirect to the login page.

pub mod client;
pub mod error;
pub mod models;
pub mod token;

pub use client::{origin_of, ApiClient, DEFAULT_API_BASE};
pub use error::{ApiError, ApiResult};
pub use models::{CurrentUser, ItemPayload, PortfolioItem, ProfileUpdate};
pub use token::{MemoryStore, TokenStore, TOKEN_KEY};
