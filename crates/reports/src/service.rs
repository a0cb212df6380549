use chrono::NaiveDate;

use varejo_core::{DomainError, DomainResult, QueryParams};
use varejo_gateway::{ClientResult, Gateway};

use crate::model::{DashboardKpis, SalesSummary, TopProduct};

/// Inclusive date range of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
}

impl ReportPeriod {
    pub fn new(data_inicio: NaiveDate, data_fim: NaiveDate) -> DomainResult<Self> {
        if data_fim < data_inicio {
            return Err(DomainError::validation(
                "report period must not end before it starts",
            ));
        }
        Ok(Self {
            data_inicio,
            data_fim,
        })
    }

    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push("dataInicio", self.data_inicio)
            .push("dataFim", self.data_fim)
    }
}

#[derive(Clone)]
pub struct ReportService {
    gateway: Gateway,
}

impl ReportService {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn dashboard_kpis(&self) -> ClientResult<DashboardKpis> {
        self.gateway.get("/reports/dashboard-kpis").await
    }

    pub async fn sales_summary(&self, period: &ReportPeriod) -> ClientResult<SalesSummary> {
        self.gateway
            .get(&period.to_query().append_to("/reports/sales-summary"))
            .await
    }

    /// Best sellers, most sold first. `limit` of zero is sent as is.
    pub async fn top_products(&self, limit: u32) -> ClientResult<Vec<TopProduct>> {
        let query = QueryParams::new().push("limit", limit);
        self.gateway
            .get(&query.append_to("/reports/top-products"))
            .await
    }

    /// Sales of the period as CSV, exactly as produced by the backend.
    pub async fn export_sales(&self, period: &ReportPeriod) -> ClientResult<String> {
        let csv = self
            .gateway
            .get_text(&period.to_query().append_to("/reports/export/sales"))
            .await?;
        tracing::info!(
            from = %period.data_inicio,
            to = %period.data_fim,
            bytes = csv.len(),
            "sales exported"
        );
        Ok(csv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn period_query() {
        let period = ReportPeriod::new(date(1), date(30)).unwrap();
        assert_eq!(period.to_query().to_string(), "dataInicio=2024-06-01&dataFim=2024-06-30");
    }

    #[test]
    fn single_day_period_is_valid() {
        assert!(ReportPeriod::new(date(5), date(5)).is_ok());
    }

    #[test]
    fn inverted_period_is_rejected() {
        let err = ReportPeriod::new(date(30), date(1)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
