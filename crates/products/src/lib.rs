//! Product catalog: products, categories, price history.
//!
//! Backend DTOs (flat, snake_case Portuguese names) are converted into the
//! view models used by callers, and back again before any write.

pub mod audit;
pub mod category;
pub mod product;
pub mod service;
pub mod stats;

pub use audit::{AuditLogEntry, AuditOperation};
pub use category::{
    Category, CategoryDto, CategoryFilter, CategoryInput, CategoryPayload, CategoryService,
};
pub use product::{
    Product, ProductCategory, ProductDto, ProductInput, ProductPayload, ProductStatus,
    UNCATEGORIZED_LABEL, fill_category_names,
};
pub use service::{PriceAdjustment, ProductFilter, ProductService};
pub use stats::{ProductStats, compute_product_stats, products_to_csv};
