//! Autoship demand - forward-looking subscription demand projection
//!
//! Projects autoship (subscription) fulfillments over a horizon, decays each
//! one by how far out its order-drop-date is, and joins the per-product
//! demand onto warehouse report metrics.

pub mod config;
pub mod model;
pub mod projection;
pub mod services;
pub mod storage;
pub mod utils;
