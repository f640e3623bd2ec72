//! Record types read from the warehouse and produced by a projection run.
//!
//! Every record declares its fields explicitly; nothing is read by wildcard.

mod demand;
mod pull_forward;
mod report;
mod subscription;

pub use demand::{ProductDemand, ProjectedOccurrence};
pub use pull_forward::PullForwardSetting;
pub use report::{ProductMetrics, ReportRow};
pub use subscription::{FrequencyUnit, SubscriptionLine, SubscriptionStatus};
