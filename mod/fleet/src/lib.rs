//! Fleet module — medical-equipment fleet management.
//!
//! Device inventory, installation tracking, service visits, AMC/CMC
//! maintenance contracts, alerts, facilities, and engineers over an in-memory
//! store. One repository per collection; cross-entity joins happen in the
//! read-model methods on [`FleetService`], by foreign key, with explicit
//! fallbacks for dangling references.

pub mod badge;
pub mod lifecycle;
pub mod model;
pub mod seed;
pub mod service;

pub use service::{DeviceDetail, FleetOverview, FleetService};
