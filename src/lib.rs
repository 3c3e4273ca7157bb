//! Stratus cloud SDK
//!
//! Typed client for the Stratus REST APIs: compute, monitoring, and alarm
//! management. Request structs are marshalled to JSON, issued against the
//! versioned resource URLs of a [`client::ServiceClient`], and responses are
//! unwrapped from their envelope keys into typed values by [`extract`].
//!
//! # Module Structure
//!
//! - [`auth`] - Bearer-token providers and cached credentials
//! - [`client`] - Service client bound to one endpoint and project
//! - [`http`] - HTTP layer with expected-status handling
//! - [`extract`] - Envelope unwrapping into structs and vectors
//! - [`config`] - Endpoint/project/token resolution
//! - [`monitoring`] - Cloud Eye alarms and metrics
//! - [`compute`] - Cloud servers
//!
//! # Example
//!
//! ```no_run
//! use stratus_sdk::auth::Credentials;
//! use stratus_sdk::client::ServiceClient;
//! use stratus_sdk::monitoring::alarms::{self, ModifyAlarmActionRequest};
//!
//! async fn disable_alarm(alarm_id: &str) -> stratus_sdk::Result<()> {
//!     let client = ServiceClient::new(
//!         "https://ces.eu-west-0.stratuscloud.example/V1.0",
//!         "0a1b2c3d4e5f0a1b2c3d4e5f0a1b2c3d",
//!         Credentials::from_static(std::env::var("STRATUS_TOKEN").unwrap()),
//!     )?;
//!
//!     let request = ModifyAlarmActionRequest { alarm_enabled: false };
//!     alarms::update_alarm_action(&client, alarm_id, &request).await
//! }
//! ```

pub mod auth;
pub mod client;
pub mod compute;
pub mod config;
pub mod error;
pub mod extract;
pub mod http;
pub mod monitoring;

pub use client::ServiceClient;
pub use config::Config;
pub use error::{Result, SdkError};
pub use http::RequestOpts;
