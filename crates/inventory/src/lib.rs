//! Stock movements and stock levels (`/stock`).
//!
//! Movements are append-only: the backend applies them to the product's
//! `estoque` and keeps the log. There is no update or delete.

pub mod level;
pub mod movement;
pub mod service;

pub use level::StockLevel;
pub use movement::{MovementType, StockMovement, StockMovementInput};
pub use service::{StockFilter, StockService};
