use chrono::NaiveDate;
use serde::Serialize;

use crate::promotion::{Promotion, PromotionStatus};

/// Days before the end date at which a running promotion counts as ending.
pub const ENDING_SOON_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PromotionStats {
    pub total: usize,
    pub active: usize,
    pub scheduled: usize,
    pub inactive: usize,
    pub ending_soon: usize,
}

/// Counts by status as the backend reports it; `ending_soon` uses the dates.
pub fn compute_promotion_stats(promotions: &[Promotion], today: NaiveDate) -> PromotionStats {
    let mut stats = PromotionStats {
        total: promotions.len(),
        ..PromotionStats::default()
    };

    for promotion in promotions {
        match promotion.status {
            PromotionStatus::Ativa => stats.active += 1,
            PromotionStatus::Agendada => stats.scheduled += 1,
            PromotionStatus::Inativa => stats.inactive += 1,
        }
        let running = promotion.effective_status(today) == PromotionStatus::Ativa;
        if running
            && promotion
                .days_remaining(today)
                .is_some_and(|days| days <= ENDING_SOON_DAYS)
        {
            stats.ending_soon += 1;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn promotion(json: &str) -> Promotion {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn empty() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        assert_eq!(compute_promotion_stats(&[], today), PromotionStats::default());
    }

    #[test]
    fn counts_by_status() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let promotions = vec![
            promotion(r#"{"id_promocao":1,"nome":"A","valor_desconto":10,"data_inicio":"2024-06-01","data_fim":"2024-06-15","status":"ATIVA"}"#),
            promotion(r#"{"id_promocao":2,"nome":"B","valor_desconto":10,"data_inicio":"2024-06-01","data_fim":"2024-08-01","status":"ATIVA"}"#),
            promotion(r#"{"id_promocao":3,"nome":"C","valor_desconto":10,"data_inicio":"2024-07-01","data_fim":"2024-07-02","status":"AGENDADA"}"#),
            promotion(r#"{"id_promocao":4,"nome":"D","valor_desconto":10,"data_inicio":"2024-06-01","data_fim":"2024-06-13","status":"INATIVA"}"#),
        ];

        let stats = compute_promotion_stats(&promotions, today);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.scheduled, 1);
        assert_eq!(stats.inactive, 1);
        assert_eq!(stats.ending_soon, 1);
    }
}
