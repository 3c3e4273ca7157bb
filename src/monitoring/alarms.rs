//! Alarm rules
//!
//! Alarm endpoints of the monitoring service. An [`Alarm`] as returned by
//! the API extends the writable [`AlarmBase`] (the shape used to create a
//! rule) with the server-assigned id, state, and update time.

use crate::client::ServiceClient;
use crate::error::{Result, SdkError};
use crate::extract;
use crate::http::RequestOpts;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Severity of an alarm rule, carried on the wire as an integer 1-4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmLevel {
    Critical,
    Major,
    Minor,
    Informational,
}

impl AlarmLevel {
    fn as_wire(self) -> u8 {
        match self {
            AlarmLevel::Critical => 1,
            AlarmLevel::Major => 2,
            AlarmLevel::Minor => 3,
            AlarmLevel::Informational => 4,
        }
    }
}

impl Serialize for AlarmLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for AlarmLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            1 => Ok(AlarmLevel::Critical),
            2 => Ok(AlarmLevel::Major),
            3 => Ok(AlarmLevel::Minor),
            4 => Ok(AlarmLevel::Informational),
            other => Err(de::Error::custom(format!(
                "alarm_level must be 1-4, got {other}"
            ))),
        }
    }
}

/// One dimension of a monitored metric, e.g. `instance_id=...`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

/// Identity of a monitored metric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricId {
    pub namespace: String,
    pub metric_name: String,
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
}

/// Threshold condition of an alarm rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmCondition {
    /// Aggregation period in seconds
    pub period: u32,
    /// Aggregation function, e.g. "average"
    pub filter: String,
    /// Comparison operator, e.g. ">=", "<"
    pub comparison_operator: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Number of consecutive periods before the alarm fires
    pub count: u32,
}

/// Action taken when the alarm fires or recovers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmAction {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub notification_list: Vec<String>,
}

/// The writable part of an alarm rule, shared by create requests and
/// alarm responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmBase {
    pub alarm_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_description: Option<String>,
    pub metric: MetricId,
    pub condition: AlarmCondition,
    #[serde(default = "default_true")]
    pub alarm_enabled: bool,
    #[serde(default)]
    pub alarm_action_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_level: Option<AlarmLevel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alarm_actions: Vec<AlarmAction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ok_actions: Vec<AlarmAction>,
}

fn default_true() -> bool {
    true
}

/// An alarm rule as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct Alarm {
    #[serde(flatten)]
    pub base: AlarmBase,
    pub alarm_id: String,
    /// Last update, epoch milliseconds
    #[serde(default)]
    pub update_time: Option<i64>,
    /// "ok", "alarm", or "insufficient_data"
    #[serde(default)]
    pub alarm_state: Option<String>,
}

/// Paging metadata attached to list responses
#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    pub count: u32,
    #[serde(default)]
    pub marker: Option<String>,
    #[serde(default)]
    pub total: Option<u32>,
}

/// One page of alarm rules
#[derive(Debug)]
pub struct AlarmPage {
    pub alarms: Vec<Alarm>,
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModifyAlarmActionRequest {
    /// Whether the alarm rule is enabled.
    pub alarm_enabled: bool,
}

#[derive(Debug, Deserialize)]
struct CreateAlarmResponse {
    alarm_id: String,
}

/// List alarm rules of the project.
///
/// GET `{project_id}/alarms`
pub async fn list_alarms(client: &ServiceClient) -> Result<AlarmPage> {
    let url = client.service_url(&["alarms"]);
    let mut body = client.get(&url, &RequestOpts::default()).await?;

    let meta = match body.get_mut("meta_data").map(serde_json::Value::take) {
        Some(value) if !value.is_null() => Some(extract::into(value)?),
        _ => None,
    };
    let alarms = extract::into_slice(body, "metric_alarms")?;

    Ok(AlarmPage { alarms, meta })
}

/// Fetch a single alarm rule by id.
///
/// GET `{project_id}/alarms/{alarm_id}` — the service answers with a
/// single-element `metric_alarms` array.
pub async fn show_alarm(client: &ServiceClient, id: &str) -> Result<Alarm> {
    let url = client.service_url(&["alarms", id]);
    let body = client.get(&url, &RequestOpts::default()).await?;

    let mut alarms: Vec<Alarm> = extract::into_slice(body, "metric_alarms")?;
    if alarms.is_empty() {
        return Err(SdkError::EmptyEnvelope {
            key: "metric_alarms".to_string(),
        });
    }
    Ok(alarms.swap_remove(0))
}

/// Create an alarm rule, returning the assigned alarm id.
///
/// POST `{project_id}/alarms`
pub async fn create_alarm(client: &ServiceClient, request: &AlarmBase) -> Result<String> {
    let url = client.service_url(&["alarms"]);
    let body = serde_json::to_value(request)?;

    let response = client
        .post(&url, Some(&body), &RequestOpts::expect_status(201))
        .await?;

    let created: CreateAlarmResponse = extract::into(response)?;
    Ok(created.alarm_id)
}

/// Delete an alarm rule.
///
/// DELETE `{project_id}/alarms/{alarm_id}`
pub async fn delete_alarm(client: &ServiceClient, id: &str) -> Result<()> {
    let url = client.service_url(&["alarms", id]);
    client.delete(&url, &RequestOpts::expect_status(204)).await?;
    Ok(())
}

/// Enable or disable an alarm rule.
///
/// PUT `{project_id}/alarms/{alarm_id}/action`
pub async fn update_alarm_action(
    client: &ServiceClient,
    id: &str,
    request: &ModifyAlarmActionRequest,
) -> Result<()> {
    let url = client.service_url(&["alarms", id, "action"]);
    let body = serde_json::to_value(request)?;

    client
        .put(&url, Some(&body), &RequestOpts::expect_status(204))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn alarm_fixture() -> serde_json::Value {
        json!({
            "alarm_name": "cpu-high",
            "alarm_description": "CPU above threshold",
            "metric": {
                "namespace": "SYS.ECS",
                "metric_name": "cpu_util",
                "dimensions": [{"name": "instance_id", "value": "srv-1"}]
            },
            "condition": {
                "period": 300,
                "filter": "average",
                "comparison_operator": ">=",
                "value": 90.0,
                "unit": "%",
                "count": 3
            },
            "alarm_enabled": true,
            "alarm_action_enabled": false,
            "alarm_level": 2,
            "alarm_id": "al-0001",
            "update_time": 1694000000000i64,
            "alarm_state": "ok"
        })
    }

    #[test]
    fn alarm_decodes_with_flattened_base() {
        let alarm: Alarm = serde_json::from_value(alarm_fixture()).unwrap();
        assert_eq!(alarm.alarm_id, "al-0001");
        assert_eq!(alarm.base.alarm_name, "cpu-high");
        assert_eq!(alarm.base.metric.namespace, "SYS.ECS");
        assert_eq!(alarm.base.alarm_level, Some(AlarmLevel::Major));
        assert_eq!(alarm.base.condition.period, 300);
        assert_eq!(alarm.alarm_state.as_deref(), Some("ok"));
    }

    #[test]
    fn alarm_level_wire_values_roundtrip() {
        for (level, wire) in [
            (AlarmLevel::Critical, 1),
            (AlarmLevel::Major, 2),
            (AlarmLevel::Minor, 3),
            (AlarmLevel::Informational, 4),
        ] {
            let encoded = serde_json::to_value(level).unwrap();
            assert_eq!(encoded, json!(wire));
            let decoded: AlarmLevel = serde_json::from_value(encoded).unwrap();
            assert_eq!(decoded, level);
        }
    }

    #[test]
    fn out_of_range_alarm_level_is_rejected() {
        let err = serde_json::from_value::<AlarmLevel>(json!(7)).unwrap_err();
        assert!(err.to_string().contains("alarm_level must be 1-4"));
    }

    #[test]
    fn modify_request_serializes_to_the_wire_shape() {
        let request = ModifyAlarmActionRequest {
            alarm_enabled: false,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"alarm_enabled": false})
        );
    }

    #[test]
    fn create_request_omits_unset_optionals() {
        let request = AlarmBase {
            alarm_name: "mem-low".to_string(),
            alarm_description: None,
            metric: MetricId {
                namespace: "SYS.ECS".to_string(),
                metric_name: "mem_util".to_string(),
                dimensions: vec![],
            },
            condition: AlarmCondition {
                period: 300,
                filter: "average".to_string(),
                comparison_operator: "<".to_string(),
                value: 10.0,
                unit: None,
                count: 1,
            },
            alarm_enabled: true,
            alarm_action_enabled: false,
            alarm_level: None,
            alarm_actions: vec![],
            ok_actions: vec![],
        };

        let body = serde_json::to_value(&request).unwrap();
        let object = body.as_object().unwrap();
        assert!(!object.contains_key("alarm_description"));
        assert!(!object.contains_key("alarm_level"));
        assert!(!object.contains_key("alarm_actions"));
        assert!(!object["condition"].as_object().unwrap().contains_key("unit"));
    }
}
