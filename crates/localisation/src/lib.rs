//! Server-side calculations for the localisation household survey.
//!
//! The survey host calls [`server_update::results_field_updates`] when a respondent
//! navigates to the results section. Housing costs are computed locally; transit
//! accessibility maps and multi-modal travel estimates come from the routing
//! service behind [`routing::RoutingService`].

pub mod calculations;
pub mod config;
pub mod error;
pub mod interview;
pub mod routing;
pub mod server_update;
pub mod telemetry;
