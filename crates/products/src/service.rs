//! Product endpoints (`/products`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use varejo_core::{CategoryId, DomainError, Page, PageRequest, ProductId, QueryParams};
use varejo_gateway::{ClientResult, Gateway, Method, RequestOptions};

use crate::audit::AuditLogEntry;
use crate::product::{Product, ProductDto, ProductInput, ProductStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub page: PageRequest,
    pub search: Option<String>,
    pub categoria_id: Option<CategoryId>,
    pub status: Option<ProductStatus>,
}

impl ProductFilter {
    pub fn to_query(&self) -> QueryParams {
        QueryParams::paged(self.page)
            .push_text("search", self.search.as_deref())
            .push_opt("categoriaId", self.categoria_id)
            .push_opt("status", self.status)
    }
}

/// Body of `POST /products/reajustar-precos`.
///
/// `percentual` is signed (`-10` lowers prices by 10%). Without a category
/// the adjustment applies to every product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAdjustment {
    pub categoria_id: Option<CategoryId>,
    pub percentual: Decimal,
    pub aplicar_custo: bool,
}

impl PriceAdjustment {
    /// A cut of 100% or more would zero or negate prices.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.percentual.is_zero() {
            return Err(DomainError::validation("adjustment percentage must not be zero"));
        }
        if self.percentual <= -Decimal::ONE_HUNDRED {
            return Err(DomainError::validation(
                "adjustment percentage must be greater than -100",
            ));
        }
        Ok(())
    }

    /// Price after applying the adjustment, rounded to cents.
    pub fn apply_to(&self, price: Decimal) -> Decimal {
        (price * (Decimal::ONE + self.percentual / Decimal::ONE_HUNDRED)).round_dp(2)
    }
}

#[derive(Clone)]
pub struct ProductService {
    gateway: Gateway,
}

impl ProductService {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, filter: &ProductFilter) -> ClientResult<Page<Product>> {
        let page: Page<ProductDto> = self
            .gateway
            .get_page(&filter.to_query().append_to("/products"))
            .await?;
        Ok(page.map(Product::from))
    }

    pub async fn get(&self, id: ProductId) -> ClientResult<Product> {
        let dto: ProductDto = self.gateway.get(&format!("/products/{id}")).await?;
        Ok(dto.into())
    }

    pub async fn create(&self, input: &ProductInput) -> ClientResult<Product> {
        let payload = input.to_backend()?;
        let dto: ProductDto = self.gateway.post("/products", &payload).await?;
        tracing::info!(product_id = %dto.id_produto, "product created");
        Ok(dto.into())
    }

    pub async fn update(&self, id: ProductId, input: &ProductInput) -> ClientResult<Product> {
        let payload = input.to_backend()?;
        let dto: ProductDto = self.gateway.put(&format!("/products/{id}"), &payload).await?;
        tracing::info!(product_id = %id, "product updated");
        Ok(dto.into())
    }

    pub async fn remove(&self, id: ProductId) -> ClientResult<()> {
        self.gateway.delete(&format!("/products/{id}")).await?;
        tracing::info!(product_id = %id, "product removed");
        Ok(())
    }

    pub async fn toggle_status(&self, id: ProductId, active: bool) -> ClientResult<Product> {
        let status = ProductStatus::from_active(active);
        let dto: ProductDto = self
            .gateway
            .patch(&format!("/products/{id}/status"), &json!({ "status": status }))
            .await?;
        tracing::info!(product_id = %id, %status, "product status changed");
        Ok(dto.into())
    }

    /// Audit trail of the product, oldest first as sent by the backend.
    pub async fn history(&self, id: ProductId) -> ClientResult<Vec<AuditLogEntry>> {
        self.gateway.get(&format!("/products/{id}/historico")).await
    }

    /// Bulk price adjustment. Callers refetch to see the new prices.
    pub async fn adjust_prices(&self, adjustment: &PriceAdjustment) -> ClientResult<()> {
        adjustment.validate()?;
        self.gateway
            .execute(
                "/products/reajustar-precos",
                RequestOptions::new(Method::POST).json(adjustment)?,
            )
            .await?;
        tracing::info!(
            categoria_id = ?adjustment.categoria_id,
            percentual = %adjustment.percentual,
            aplicar_custo = adjustment.aplicar_custo,
            "prices adjusted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_query_keeps_order_and_skips_absent_fields() {
        let filter = ProductFilter {
            page: PageRequest::new(0, 10),
            search: Some("arroz".into()),
            categoria_id: None,
            status: Some(ProductStatus::Ativo),
        };
        assert_eq!(
            filter.to_query().append_to("/products"),
            "/products?page=0&size=10&search=arroz&status=ATIVO"
        );
    }

    #[test]
    fn adjustment_serializes_camel_case() {
        let adjustment = PriceAdjustment {
            categoria_id: Some(CategoryId::new(2)),
            percentual: Decimal::from(10),
            aplicar_custo: false,
        };
        assert_eq!(
            serde_json::to_value(&adjustment).unwrap(),
            json!({ "categoriaId": 2, "percentual": 10.0, "aplicarCusto": false })
        );
    }

    #[test]
    fn adjustment_math_and_validation() {
        let raise = PriceAdjustment {
            categoria_id: None,
            percentual: Decimal::from(10),
            aplicar_custo: true,
        };
        assert_eq!(raise.apply_to(Decimal::new(1999, 2)), Decimal::new(2199, 2));
        assert!(raise.validate().is_ok());

        let wipe = PriceAdjustment {
            percentual: Decimal::from(-100),
            ..raise.clone()
        };
        assert!(wipe.validate().is_err());

        let noop = PriceAdjustment {
            percentual: Decimal::ZERO,
            ..raise
        };
        assert!(noop.validate().is_err());
    }
}
