//! Point-of-sale records (`/sales`).
//!
//! Sales are created once and can only be cancelled afterwards; there is no
//! update endpoint.

pub mod sale;
pub mod service;
pub mod stats;

pub use sale::{NewSale, NewSaleItem, PaymentMethod, Sale, SaleItem, SaleStatus};
pub use service::{SaleFilter, SaleService};
pub use stats::{SalesStats, compute_sales_stats};
