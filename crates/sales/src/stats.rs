use rust_decimal::Decimal;
use serde::Serialize;

use crate::sale::{Sale, SaleStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SalesStats {
    pub total_sales: usize,
    pub completed: usize,
    pub pending: usize,
    pub cancelled: usize,
    /// Σ `valor_total` of every sale that is not cancelled.
    pub revenue: Decimal,
    /// `revenue / (total_sales - cancelled)`, zero when nothing counts.
    pub average_ticket: Decimal,
    pub items_sold: i64,
}

pub fn compute_sales_stats(sales: &[Sale]) -> SalesStats {
    let mut stats = SalesStats {
        total_sales: sales.len(),
        ..SalesStats::default()
    };

    for sale in sales {
        match sale.status {
            SaleStatus::Concluida => stats.completed += 1,
            SaleStatus::Pendente => stats.pending += 1,
            SaleStatus::Cancelada => {
                stats.cancelled += 1;
                continue;
            }
        }
        stats.revenue += sale.valor_total;
        stats.items_sold += sale.item_count();
    }

    let counted = stats.total_sales - stats.cancelled;
    if counted > 0 {
        stats.average_ticket = (stats.revenue / Decimal::from(counted)).round_dp(2);
    }
    stats
}
