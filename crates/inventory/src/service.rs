use varejo_core::{Page, PageRequest, ProductId, QueryParams};
use varejo_gateway::{ClientResult, Gateway};
use varejo_products::{Product, ProductDto};

use crate::movement::{MovementType, StockMovement, StockMovementInput};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockFilter {
    pub page: PageRequest,
    pub produto_id: Option<ProductId>,
    pub tipo: Option<MovementType>,
}

impl StockFilter {
    pub fn to_query(&self) -> QueryParams {
        QueryParams::paged(self.page)
            .push_opt("produtoId", self.produto_id)
            .push_opt("tipo", self.tipo)
    }
}

#[derive(Clone)]
pub struct StockService {
    gateway: Gateway,
}

impl StockService {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn movements(&self, filter: &StockFilter) -> ClientResult<Page<StockMovement>> {
        self.gateway
            .get_page(&filter.to_query().append_to("/stock/movements"))
            .await
    }

    pub async fn register(&self, input: &StockMovementInput) -> ClientResult<StockMovement> {
        input.validate()?;
        let movement: StockMovement = self.gateway.post("/stock/movements", input).await?;
        tracing::info!(
            product_id = %input.id_produto,
            tipo = %input.tipo,
            delta = input.delta(),
            "stock movement registered"
        );
        Ok(movement)
    }

    /// Products at or below their minimum stock.
    pub async fn low_stock(&self) -> ClientResult<Vec<Product>> {
        let products: Vec<ProductDto> = self.gateway.get("/stock/low-stock").await?;
        Ok(products.into_iter().map(Product::from).collect())
    }
}
