//! Cloud servers
//!
//! A [`Server`] as returned by the detail endpoints extends the
//! [`ServerSummary`] base that list-style responses and other services
//! reference.

use crate::client::ServiceClient;
use crate::error::Result;
use crate::extract;
use crate::http::RequestOpts;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Identity and state shared by every server-shaped response
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSummary {
    pub id: String,
    pub name: String,
    /// e.g. "ACTIVE", "SHUTOFF", "BUILD"
    pub status: String,
}

/// Flavor reference on a server
#[derive(Debug, Clone, Deserialize)]
pub struct FlavorRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Image reference on a server
#[derive(Debug, Clone, Deserialize)]
pub struct ImageRef {
    pub id: String,
}

/// A server as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    #[serde(flatten)]
    pub summary: ServerSummary,
    pub flavor: FlavorRef,
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub availability_zone: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Lifecycle action on a server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerAction {
    Start,
    Stop { hard: bool },
    Reboot { hard: bool },
}

impl ServerAction {
    /// The provider's action envelope: one verb key wrapping the options.
    fn to_body(self) -> Value {
        fn stop_type(hard: bool) -> &'static str {
            if hard {
                "HARD"
            } else {
                "SOFT"
            }
        }

        match self {
            ServerAction::Start => json!({"os-start": {}}),
            ServerAction::Stop { hard } => json!({"os-stop": {"type": stop_type(hard)}}),
            ServerAction::Reboot { hard } => json!({"reboot": {"type": stop_type(hard)}}),
        }
    }
}

/// List servers of the project.
///
/// GET `{project_id}/cloudservers`
pub async fn list_servers(client: &ServiceClient) -> Result<Vec<Server>> {
    let url = client.service_url(&["cloudservers"]);
    let body = client.get(&url, &RequestOpts::default()).await?;
    extract::into_slice(body, "servers")
}

/// Fetch one server by id.
///
/// GET `{project_id}/cloudservers/{server_id}`
pub async fn show_server(client: &ServiceClient, id: &str) -> Result<Server> {
    let url = client.service_url(&["cloudservers", id]);
    let body = client.get(&url, &RequestOpts::default()).await?;
    extract::into_struct(body, "server")
}

/// Run a lifecycle action against a server. The service accepts the action
/// asynchronously with 202 and an empty body.
///
/// POST `{project_id}/cloudservers/{server_id}/action`
pub async fn server_action(
    client: &ServiceClient,
    id: &str,
    action: ServerAction,
) -> Result<()> {
    let url = client.service_url(&["cloudservers", id, "action"]);
    let body = action.to_body();

    client
        .post(&url, Some(&body), &RequestOpts::expect_status(202))
        .await?;
    Ok(())
}
