//! Rust client for the [Braze](https://www.braze.com) REST API.
//!
//! Covers the user data endpoints (track, delete, merge, export), message
//! sending (direct sends, API-triggered campaigns, transactional messages)
//! and preference center link generation.
//!
//! Requests run on a [`tokio`] runtime. Every endpoint method takes a
//! [`CancellationToken`](tokio_util::sync::CancellationToken); cancelling
//! it abandons the request without waiting for the server.
//!
//! ```no_run
//! use braze::{BrazeClient, ClientConfig, CustomAttribute, UserAttributes, UsersTrackRequest};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> braze::Result<()> {
//! let client = BrazeClient::new(ClientConfig::with_api_key("rest-api-key"))?;
//!
//! let attributes = UserAttributes {
//!     external_id: Some("user-123".to_string()),
//!     first_name: Some("Ada".to_string()),
//!     ..Default::default()
//! };
//! attributes.add_attributes([CustomAttribute::boolean("beta_tester", true)]);
//!
//! let request = UsersTrackRequest {
//!     attributes: vec![attributes],
//!     ..Default::default()
//! };
//! let response = client.track_users(&CancellationToken::new(), &request).await?;
//! println!("tracked: {:?}", response.message);
//! # Ok(())
//! # }
//! ```
//!
//! Failures reported by the API surface as [`Error::Api`] carrying the
//! HTTP status and, for documented error statuses, the decoded error
//! envelope.

mod attributes;
mod client;
mod config;
mod error;
mod types;

pub use attributes::{AttributeAction, AttributeValue, CustomAttribute, CustomAttributes};
pub use client::BrazeClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use error::{ApiError, Error, Result};
pub use types::*;
