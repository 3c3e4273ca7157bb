//! Metric catalog and datapoint queries

use crate::client::ServiceClient;
use crate::error::Result;
use crate::extract;
use crate::http::RequestOpts;
use serde::{Deserialize, Serialize};
use url::Url;

pub use super::alarms::Dimension;

/// A metric known to the monitoring service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    pub namespace: String,
    pub metric_name: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
}

/// Query for aggregated datapoints of one metric
#[derive(Debug, Clone)]
pub struct MetricDataRequest {
    pub namespace: String,
    pub metric_name: String,
    pub dimensions: Vec<Dimension>,
    /// Start of the range, epoch milliseconds
    pub from: i64,
    /// End of the range, epoch milliseconds
    pub to: i64,
    /// Aggregation granularity in seconds (1 means raw data)
    pub period: u32,
    /// Aggregation function, e.g. "average"
    pub filter: String,
}

/// One aggregated datapoint. Only the field matching the requested
/// aggregation function is set.
#[derive(Debug, Clone, Deserialize)]
pub struct Datapoint {
    /// Epoch milliseconds
    pub timestamp: i64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub average: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub sum: Option<f64>,
    #[serde(default)]
    pub variance: Option<f64>,
}

/// Datapoints of one metric over a queried range
#[derive(Debug)]
pub struct MetricData {
    pub metric_name: Option<String>,
    pub datapoints: Vec<Datapoint>,
}

/// List metrics of the project.
///
/// GET `{project_id}/metrics`
pub async fn list_metrics(client: &ServiceClient) -> Result<Vec<Metric>> {
    let url = client.service_url(&["metrics"]);
    let body = client.get(&url, &RequestOpts::default()).await?;
    extract::into_slice(body, "metrics")
}

/// Query aggregated datapoints for one metric.
///
/// GET `{project_id}/metric-data` with the metric identity, range, period,
/// and aggregation function as query parameters. Dimensions are passed as
/// `dim.N=name,value` pairs.
pub async fn show_metric_data(
    client: &ServiceClient,
    request: &MetricDataRequest,
) -> Result<MetricData> {
    let url = metric_data_url(client, request)?;
    let mut body = client.get(&url, &RequestOpts::default()).await?;

    let metric_name = body
        .get_mut("metric_name")
        .map(serde_json::Value::take)
        .and_then(|v| v.as_str().map(str::to_string));
    let datapoints = extract::into_slice(body, "datapoints")?;

    Ok(MetricData {
        metric_name,
        datapoints,
    })
}

fn metric_data_url(client: &ServiceClient, request: &MetricDataRequest) -> Result<String> {
    let mut url = Url::parse(&client.service_url(&["metric-data"]))?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("namespace", &request.namespace);
        query.append_pair("metric_name", &request.metric_name);
        for (i, dimension) in request.dimensions.iter().enumerate() {
            query.append_pair(
                &format!("dim.{i}"),
                &format!("{},{}", dimension.name, dimension.value),
            );
        }
        query.append_pair("from", &request.from.to_string());
        query.append_pair("to", &request.to.to_string());
        query.append_pair("period", &request.period.to_string());
        query.append_pair("filter", &request.filter);
    }

    Ok(url.into())
}
