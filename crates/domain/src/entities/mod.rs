//! Domain entities - Records produced by a collection cycle

mod collection_report;
mod route_result;

pub use collection_report::{CollectionReport, SERVICE_NAME};
pub use route_result::{RouteResult, ceil_minutes};
