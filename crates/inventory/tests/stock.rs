use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::RawQuery;
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::{Value, json};

use varejo_core::ProductId;
use varejo_gateway::{ApiConfig, ClientError, Gateway, StaticToken};
use varejo_inventory::{MovementType, StockFilter, StockLevel, StockMovementInput, StockService};

struct MockBackend {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl MockBackend {
    async fn spawn(router: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn router() -> Router {
    Router::new()
        .route(
            "/api/stock/movements",
            get(|RawQuery(query): RawQuery| async move {
                Json(json!({
                    "content": [{
                        "id_movimentacao": 1, "id_produto": 3, "tipo": "SAIDA",
                        "quantidade": 4, "estoque_anterior": 10, "estoque_atual": 6,
                        "motivo": query, "data_movimentacao": "2024-06-12T08:00:00"
                    }],
                    "totalElements": 1, "totalPages": 1, "size": 10,
                    "number": 0, "first": true, "last": true
                }))
            })
            .post(|Json(body): Json<Value>| async move {
                if body["quantidade"] == json!(999) {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "message": "Estoque insuficiente" })),
                    );
                }
                let mut created = body;
                created["id_movimentacao"] = json!(2);
                created["data_movimentacao"] = json!("2024-06-12T09:00:00");
                (StatusCode::CREATED, Json(created))
            }),
        )
        .route(
            "/api/stock/low-stock",
            get(|| async {
                Json(json!([
                    {
                        "id_produto": 3, "nome": "Feijão 1kg", "preco_custo": 5,
                        "preco_venda": 8.5, "estoque": 0, "estoque_minimo": 10,
                        "status": "ATIVO", "categoria_id": 2
                    },
                    {
                        "id_produto": 4, "nome": "Açúcar 1kg", "preco_custo": 3,
                        "preco_venda": 4.99, "estoque": 4, "estoque_minimo": 5,
                        "status": "ATIVO"
                    }
                ]))
            }),
        )
}

fn service(base_url: &str) -> StockService {
    StockService::new(Gateway::new(ApiConfig::new(base_url), Arc::new(StaticToken::new("t"))).unwrap())
}

#[tokio::test]
async fn lists_movements_of_a_product() {
    let srv = MockBackend::spawn(router()).await;
    let stock = service(&srv.base_url);

    let filter = StockFilter {
        produto_id: Some(ProductId::new(3)),
        tipo: Some(MovementType::Saida),
        ..StockFilter::default()
    };
    let page = stock.movements(&filter).await.unwrap();
    let movement = &page.content[0];

    assert_eq!(movement.motivo, "page=0&size=10&produtoId=3&tipo=SAIDA");
    assert_eq!(movement.delta(), -4);
    assert_eq!(movement.estoque_atual, Some(6));
}

#[tokio::test]
async fn registers_movement_and_surfaces_backend_refusal() {
    let srv = MockBackend::spawn(router()).await;
    let stock = service(&srv.base_url);

    let mut input = StockMovementInput {
        id_produto: ProductId::new(3),
        tipo: MovementType::Entrada,
        quantidade: 12,
        motivo: "Recebimento".into(),
    };
    let movement = stock.register(&input).await.unwrap();
    assert_eq!(movement.id_movimentacao, 2);
    assert_eq!(movement.tipo, MovementType::Entrada);

    input.tipo = MovementType::Saida;
    input.quantidade = 999;
    let err = stock.register(&input).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Estoque insuficiente");

    input.quantidade = 0;
    assert!(matches!(stock.register(&input).await, Err(ClientError::Domain(_))));
}

#[tokio::test]
async fn low_stock_products_are_classified() {
    let srv = MockBackend::spawn(router()).await;
    let stock = service(&srv.base_url);

    let products = stock.low_stock().await.unwrap();
    let levels: Vec<StockLevel> = products.iter().map(StockLevel::of).collect();

    assert_eq!(levels, vec![StockLevel::Esgotado, StockLevel::Baixo]);
    assert!(products.iter().all(|p| p.is_low_stock()));
    assert_eq!(products[1].category.label(), "N/A");
}
