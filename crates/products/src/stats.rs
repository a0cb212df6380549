//! Summary cards and CSV export over an already loaded list of products.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::product::Product;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductStats {
    pub total_products: usize,
    pub active_products: usize,
    pub low_stock_products: usize,
    /// Σ `estoque * preco_custo`.
    pub total_stock_value: Decimal,
}

/// Empty input yields all zeros.
pub fn compute_product_stats(products: &[Product]) -> ProductStats {
    products.iter().fold(ProductStats::default(), |mut stats, product| {
        stats.total_products += 1;
        if product.is_active() {
            stats.active_products += 1;
        }
        if product.is_low_stock() {
            stats.low_stock_products += 1;
        }
        stats.total_stock_value = stats.total_stock_value.saturating_add(product.stock_value());
        stats
    })
}

const CSV_HEADER: [&str; 10] = [
    "ID",
    "Nome",
    "Marca",
    "Categoria",
    "Preço de Custo",
    "Preço de Venda",
    "Estoque",
    "Estoque Mínimo",
    "Status",
    "Código de Barras",
];

/// Render products as CSV (comma separated, header row, CRLF line ends).
pub fn products_to_csv(products: &[Product]) -> String {
    let mut out = String::new();
    push_row(&mut out, CSV_HEADER.iter().map(|h| h.to_string()));

    for p in products {
        push_row(
            &mut out,
            [
                p.id_produto.to_string(),
                p.nome.clone(),
                p.marca.clone(),
                p.category.label().to_string(),
                p.preco_custo.round_dp(2).to_string(),
                p.preco_venda.round_dp(2).to_string(),
                p.estoque.to_string(),
                p.estoque_minimo.to_string(),
                p.status.to_string(),
                p.codigo_barras.clone().unwrap_or_default(),
            ]
            .into_iter(),
        );
    }
    out
}

fn push_row(out: &mut String, fields: impl Iterator<Item = String>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(&field));
    }
    out.push_str("\r\n");
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductDto;
    use serde_json::json;

    fn product(value: serde_json::Value) -> Product {
        serde_json::from_value::<ProductDto>(value).unwrap().into()
    }

    #[test]
    fn empty_input_yields_zeroed_stats() {
        let stats = compute_product_stats(&[]);
        assert_eq!(stats, ProductStats::default());
        assert_eq!(stats.total_stock_value, Decimal::ZERO);
    }

    #[test]
    fn counts_and_sums() {
        let products = vec![
            product(json!({
                "id_produto": 1, "nome": "Arroz", "preco_custo": 20, "preco_venda": 25,
                "estoque": 10, "estoque_minimo": 5
            })),
            product(json!({
                "id_produto": 2, "nome": "Feijão", "preco_custo": 7, "preco_venda": 9,
                "estoque": 5, "estoque_minimo": 5, "status": "INATIVO"
            })),
            product(json!({
                "id_produto": 3, "nome": "Sal", "preco_custo": 1, "preco_venda": 2,
                "estoque": 0, "estoque_minimo": 2
            })),
        ];

        let stats = compute_product_stats(&products);
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.active_products, 2);
        // `estoque == estoque_minimo` counts as low.
        assert_eq!(stats.low_stock_products, 2);
        assert_eq!(stats.total_stock_value, Decimal::from(235));
    }

    #[test]
    fn stock_value_saturates_instead_of_overflowing() {
        let mut huge = product(json!({
            "id_produto": 9, "nome": "Granel", "preco_custo": 1, "preco_venda": 2
        }));
        huge.estoque = i64::MAX;
        huge.preco_custo = Decimal::MAX;
        assert_eq!(huge.stock_value(), Decimal::MAX);

        let stats = compute_product_stats(&[huge.clone(), huge]);
        assert_eq!(stats.total_stock_value, Decimal::MAX);
    }

    #[test]
    fn csv_quotes_only_when_needed() {
        let products = vec![product(json!({
            "id_produto": 7, "nome": "Biscoito \"Maria\", 200g", "marca": "Vitarella",
            "preco_custo": 2.5, "preco_venda": 3.99, "estoque": 12, "estoque_minimo": 3
        }))];

        let csv = products_to_csv(&products);
        let mut lines = csv.split("\r\n");
        assert_eq!(
            lines.next().unwrap(),
            "ID,Nome,Marca,Categoria,Preço de Custo,Preço de Venda,Estoque,Estoque Mínimo,Status,Código de Barras"
        );
        assert_eq!(
            lines.next().unwrap(),
            "7,\"Biscoito \"\"Maria\"\", 200g\",Vitarella,N/A,2.5,3.99,12,3,ATIVO,"
        );
    }

    #[test]
    fn csv_of_nothing_is_just_the_header() {
        assert_eq!(products_to_csv(&[]).lines().count(), 1);
    }
}
