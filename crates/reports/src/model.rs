use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use varejo_core::ProductId;

use crate::progress::{Progress, compute_progress};

/// Snapshot behind the dashboard cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardKpis {
    pub vendas_hoje: Decimal,
    pub quantidade_vendas_hoje: i64,
    pub vendas_mes: Decimal,
    pub meta_mensal: Decimal,
    pub ticket_medio: Decimal,
    pub total_clientes: i64,
    pub novos_clientes_mes: i64,
    pub produtos_baixo_estoque: i64,
    pub promocoes_ativas: i64,
}

impl DashboardKpis {
    /// Month-to-date sales against the monthly goal.
    pub fn monthly_progress(&self) -> Progress {
        compute_progress(
            self.vendas_mes.to_f64().unwrap_or_default(),
            self.meta_mensal.to_f64().unwrap_or_default(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    pub data: NaiveDate,
    pub quantidade: i64,
    pub valor: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    #[serde(default)]
    pub total_vendas: i64,
    #[serde(default)]
    pub faturamento: Decimal,
    #[serde(default)]
    pub ticket_medio: Decimal,
    #[serde(default)]
    pub vendas_por_dia: Vec<DailySales>,
}

impl SalesSummary {
    /// Day with the highest revenue; the earliest one wins a tie.
    pub fn best_day(&self) -> Option<&DailySales> {
        self.vendas_por_dia
            .iter()
            .fold(None, |best: Option<&DailySales>, day| match best {
                Some(b) if b.valor >= day.valor => Some(b),
                _ => Some(day),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    #[serde(alias = "id_produto")]
    pub id_produto: ProductId,
    pub nome: String,
    pub quantidade_vendida: i64,
    #[serde(default)]
    pub faturamento: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kpis_tolerate_missing_fields() {
        let kpis: DashboardKpis =
            serde_json::from_str(r#"{"vendasMes": 7500, "metaMensal": 10000}"#).unwrap();
        assert_eq!(kpis.total_clientes, 0);

        let progress = kpis.monthly_progress();
        assert_eq!(progress.base_width, 75.0);
        assert_eq!(progress.percentage, "75.0");
    }

    #[test]
    fn kpis_without_goal_show_empty_bar() {
        let progress = DashboardKpis::default().monthly_progress();
        assert_eq!(progress.percentage, "0.0");
        assert!(!progress.has_excess);
    }

    #[test]
    fn best_day_prefers_earliest_on_tie() {
        let summary: SalesSummary = serde_json::from_str(
            r#"{"dataInicio":"2024-06-01","dataFim":"2024-06-03","vendasPorDia":[
                {"data":"2024-06-01","quantidade":3,"valor":90},
                {"data":"2024-06-02","quantidade":5,"valor":120},
                {"data":"2024-06-03","quantidade":4,"valor":120}]}"#,
        )
        .unwrap();

        let best = summary.best_day().unwrap();
        assert_eq!(best.data, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_eq!(summary.total_vendas, 0);
    }
}
