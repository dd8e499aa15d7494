//! Waypost: Causally Ordered Analytics Coalescing
//!
//! Sits between analytics producers and a sink. Provisional navigations are
//! held until a real event arrives, then emitted first with the best context
//! available, so the sink observes events in causal order.

pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
