//! Cloud Eye monitoring service (v1)
//!
//! Alarm rules and metric queries. All responses arrive wrapped in the
//! service's envelope keys (`metric_alarms`, `metrics`, `datapoints`) and go
//! through [`crate::extract`] on the way to typed values.
//!
//! # Module Structure
//!
//! - [`alarms`] - Alarm rule CRUD and the alarm-action switch
//! - [`metrics`] - Metric catalog and datapoint queries

pub mod alarms;
pub mod metrics;
