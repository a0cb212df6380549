//! `varejo-core`: building blocks shared by every backend resource module.
//!
//! This crate contains **pure** primitives (no HTTP, no storage): the
//! pagination contract of the backend, the query-string builder used by the
//! list endpoints, typed identifiers and the domain error model.

pub mod error;
pub mod id;
pub mod page;
pub mod query;

pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, CustomerId, EmployeeId, ProductId, PromotionId, SaleId, SupplierId, UserId};
pub use page::{DEFAULT_PAGE_SIZE, Page, PageRequest};
pub use query::QueryParams;
