//! Promotions (`/promotions`): discount rules with a validity window.

pub mod promotion;
pub mod service;
pub mod stats;

pub use promotion::{DiscountType, Promotion, PromotionInput, PromotionStatus};
pub use service::{PromotionFilter, PromotionService};
pub use stats::{ENDING_SOON_DAYS, PromotionStats, compute_promotion_stats};
