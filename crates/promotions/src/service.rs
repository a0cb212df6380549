use serde_json::json;

use varejo_core::{Page, PageRequest, PromotionId, QueryParams};
use varejo_gateway::{ClientResult, Gateway};

use crate::promotion::{Promotion, PromotionInput, PromotionStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionFilter {
    pub page: PageRequest,
    pub search: Option<String>,
    pub status: Option<PromotionStatus>,
}

impl PromotionFilter {
    pub fn to_query(&self) -> QueryParams {
        QueryParams::paged(self.page)
            .push_text("search", self.search.as_deref())
            .push_opt("status", self.status)
    }
}

#[derive(Clone)]
pub struct PromotionService {
    gateway: Gateway,
}

impl PromotionService {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, filter: &PromotionFilter) -> ClientResult<Page<Promotion>> {
        self.gateway
            .get_page(&filter.to_query().append_to("/promotions"))
            .await
    }

    pub async fn get(&self, id: PromotionId) -> ClientResult<Promotion> {
        self.gateway.get(&format!("/promotions/{id}")).await
    }

    pub async fn create(&self, input: &PromotionInput) -> ClientResult<Promotion> {
        input.validate()?;
        let promotion: Promotion = self.gateway.post("/promotions", input).await?;
        tracing::info!(promotion_id = %promotion.id_promocao, "promotion created");
        Ok(promotion)
    }

    pub async fn update(&self, id: PromotionId, input: &PromotionInput) -> ClientResult<Promotion> {
        input.validate()?;
        let promotion = self.gateway.put(&format!("/promotions/{id}"), input).await?;
        tracing::info!(promotion_id = %id, "promotion updated");
        Ok(promotion)
    }

    pub async fn remove(&self, id: PromotionId) -> ClientResult<()> {
        self.gateway.delete(&format!("/promotions/{id}")).await?;
        tracing::info!(promotion_id = %id, "promotion removed");
        Ok(())
    }

    /// Switch a promotion on (`ATIVA`) or off (`INATIVA`).
    pub async fn toggle_status(&self, id: PromotionId, active: bool) -> ClientResult<Promotion> {
        let status = if active {
            PromotionStatus::Ativa
        } else {
            PromotionStatus::Inativa
        };
        let promotion = self
            .gateway
            .patch(&format!("/promotions/{id}/status"), &json!({ "status": status }))
            .await?;
        tracing::info!(promotion_id = %id, %status, "promotion status changed");
        Ok(promotion)
    }
}
