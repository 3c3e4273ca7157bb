//! Elastic compute service (v1)
//!
//! Server listing and lifecycle actions.

pub mod servers;
