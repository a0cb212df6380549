//! Dashboard and report endpoints (`/reports`) plus the progress-bar math
//! used to render goals against them.

pub mod model;
pub mod progress;
pub mod service;

pub use model::{DailySales, DashboardKpis, SalesSummary, TopProduct};
pub use progress::{MAX_EXCESS_WIDTH, Progress, compute_progress};
pub use service::{ReportPeriod, ReportService};
