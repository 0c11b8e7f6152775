mod error;
pub mod reporting;
mod service;

pub use error::*;
pub use reporting::ChartData;
pub use service::*;
