use chrono::NaiveDate;
use serde_json::json;

use varejo_core::{CustomerId, Page, PageRequest, QueryParams, SaleId};
use varejo_gateway::{ClientResult, Gateway};

use crate::sale::{NewSale, Sale, SaleStatus};

/// Filters of `GET /sales`; dates are inclusive and sent as `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleFilter {
    pub page: PageRequest,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
    pub status: Option<SaleStatus>,
    pub cliente_id: Option<CustomerId>,
}

impl SaleFilter {
    pub fn to_query(&self) -> QueryParams {
        QueryParams::paged(self.page)
            .push_opt("dataInicio", self.data_inicio)
            .push_opt("dataFim", self.data_fim)
            .push_opt("status", self.status)
            .push_opt("clienteId", self.cliente_id)
    }
}

#[derive(Clone)]
pub struct SaleService {
    gateway: Gateway,
}

impl SaleService {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, filter: &SaleFilter) -> ClientResult<Page<Sale>> {
        self.gateway
            .get_page(&filter.to_query().append_to("/sales"))
            .await
    }

    pub async fn get(&self, id: SaleId) -> ClientResult<Sale> {
        self.gateway.get(&format!("/sales/{id}")).await
    }

    /// Register a sale. The backend prices nothing on our behalf; the body
    /// carries the unit prices and discounts as entered.
    pub async fn create(&self, sale: &NewSale) -> ClientResult<Sale> {
        sale.validate()?;
        let created: Sale = self.gateway.post("/sales", sale).await?;
        tracing::info!(
            sale_id = %created.id_venda,
            items = sale.itens.len(),
            total = %created.valor_total,
            "sale registered"
        );
        Ok(created)
    }

    pub async fn cancel(&self, id: SaleId, motivo: &str) -> ClientResult<Sale> {
        let sale = self
            .gateway
            .patch(&format!("/sales/{id}/cancel"), &json!({ "motivo": motivo.trim() }))
            .await?;
        tracing::info!(sale_id = %id, "sale cancelled");
        Ok(sale)
    }
}
