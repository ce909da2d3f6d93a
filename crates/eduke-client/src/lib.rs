//! # Eduke Client
//!
//! Access to the school API.
//!
//! [`SchoolApi`] is the seam the client views depend on; [`HttpApiClient`]
//! implements it over HTTPS with a bearer token. Every failure is reported as
//! an [`eduke_core::ClientError`].

pub mod api;
pub mod http;

pub use api::SchoolApi;
pub use http::HttpApiClient;
