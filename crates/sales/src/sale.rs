use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use varejo_core::{CustomerId, DomainError, DomainResult, EmployeeId, ProductId, SaleId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SaleStatus {
    Pendente,
    Concluida,
    Cancelada,
}

impl core::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Pendente => "PENDENTE",
            Self::Concluida => "CONCLUIDA",
            Self::Cancelada => "CANCELADA",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Dinheiro,
    CartaoCredito,
    CartaoDebito,
    Pix,
}

/// Sale line: product, quantity, unit price and line discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItem {
    pub id_produto: ProductId,
    #[serde(default)]
    pub nome_produto: String,
    pub quantidade: i64,
    pub preco_unitario: Decimal,
    #[serde(default)]
    pub desconto: Decimal,
}

impl SaleItem {
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantidade) * self.preco_unitario - self.desconto
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id_venda: SaleId,
    pub data_venda: NaiveDateTime,
    #[serde(default)]
    pub cliente_id: Option<CustomerId>,
    #[serde(default)]
    pub cliente_nome: Option<String>,
    #[serde(default)]
    pub funcionario_id: Option<EmployeeId>,
    #[serde(default)]
    pub itens: Vec<SaleItem>,
    #[serde(default)]
    pub desconto: Decimal,
    pub valor_total: Decimal,
    #[serde(default)]
    pub forma_pagamento: PaymentMethod,
    pub status: SaleStatus,
}

impl Sale {
    pub fn is_cancelled(&self) -> bool {
        self.status == SaleStatus::Cancelada
    }

    pub fn is_cancellable(&self) -> bool {
        !self.is_cancelled()
    }

    pub fn item_count(&self) -> i64 {
        self.itens.iter().map(|i| i.quantidade).sum()
    }

    /// Σ line subtotals minus the sale discount.
    ///
    /// Matches `valor_total` for sales recorded by this client; the backend
    /// value stays authoritative.
    pub fn computed_total(&self) -> Decimal {
        self.itens.iter().map(SaleItem::subtotal).sum::<Decimal>() - self.desconto
    }

    pub fn customer_label(&self) -> &str {
        self.cliente_nome
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Consumidor final")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSaleItem {
    pub id_produto: ProductId,
    pub quantidade: i64,
    pub preco_unitario: Decimal,
    #[serde(default)]
    pub desconto: Decimal,
}

impl NewSaleItem {
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantidade) * self.preco_unitario - self.desconto
    }
}

/// Body of `POST /sales`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<CustomerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funcionario_id: Option<EmployeeId>,
    pub itens: Vec<NewSaleItem>,
    pub desconto: Decimal,
    pub forma_pagamento: PaymentMethod,
}

impl NewSale {
    pub fn total(&self) -> Decimal {
        self.itens.iter().map(NewSaleItem::subtotal).sum::<Decimal>() - self.desconto
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.itens.is_empty() {
            return Err(DomainError::validation("sale must have at least one item"));
        }

        for (line, item) in self.itens.iter().enumerate() {
            if item.quantidade <= 0 {
                return Err(DomainError::validation(format!(
                    "item {}: quantity must be positive",
                    line + 1
                )));
            }
            if item.preco_unitario <= Decimal::ZERO {
                return Err(DomainError::validation(format!(
                    "item {}: unit price must be positive",
                    line + 1
                )));
            }
            if item.desconto.is_sign_negative() || item.subtotal().is_sign_negative() {
                return Err(DomainError::validation(format!(
                    "item {}: discount must be between zero and the line value",
                    line + 1
                )));
            }
        }

        if self.desconto.is_sign_negative() || self.total().is_sign_negative() {
            return Err(DomainError::validation(
                "sale discount must be between zero and the sale value",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product: i64, quantidade: i64, cents: i64) -> NewSaleItem {
        NewSaleItem {
            id_produto: ProductId::new(product),
            quantidade,
            preco_unitario: Decimal::new(cents, 2),
            desconto: Decimal::ZERO,
        }
    }

    fn sale(itens: Vec<NewSaleItem>) -> NewSale {
        NewSale {
            cliente_id: None,
            funcionario_id: Some(EmployeeId::new(2)),
            itens,
            desconto: Decimal::ZERO,
            forma_pagamento: PaymentMethod::Pix,
        }
    }

    #[test]
    fn total_sums_lines_minus_discount() {
        let mut new_sale = sale(vec![item(1, 2, 2590), item(2, 3, 899)]);
        assert_eq!(new_sale.total(), Decimal::new(7877, 2));

        new_sale.desconto = Decimal::new(377, 2);
        assert_eq!(new_sale.total(), Decimal::from(75));
        assert!(new_sale.validate().is_ok());
    }

    #[test]
    fn rejects_empty_and_invalid_lines() {
        assert!(sale(vec![]).validate().is_err());
        assert!(sale(vec![item(1, 0, 100)]).validate().is_err());
        assert!(sale(vec![item(1, 1, 0)]).validate().is_err());

        let mut over_discount = item(1, 1, 100);
        over_discount.desconto = Decimal::from(2);
        assert!(sale(vec![over_discount]).validate().is_err());

        let mut whole_sale = sale(vec![item(1, 1, 100)]);
        whole_sale.desconto = Decimal::from(5);
        assert!(whole_sale.validate().is_err());
    }

    #[test]
    fn serializes_payment_method_in_backend_format() {
        let body = serde_json::to_value(sale(vec![item(1, 1, 100)])).unwrap();
        assert_eq!(body["forma_pagamento"], "PIX");
        assert!(body.get("cliente_id").is_none());

        let card: PaymentMethod = serde_json::from_str("\"CARTAO_CREDITO\"").unwrap();
        assert_eq!(card, PaymentMethod::CartaoCredito);
    }

    #[test]
    fn recorded_sale_helpers() {
        let recorded: Sale = serde_json::from_str(
            r#"{"id_venda":10,"data_venda":"2024-06-12T14:30:00","valor_total":51.8,
                "status":"CONCLUIDA",
                "itens":[{"id_produto":1,"quantidade":2,"preco_unitario":25.9}]}"#,
        )
        .unwrap();

        assert_eq!(recorded.item_count(), 2);
        assert_eq!(recorded.computed_total(), recorded.valor_total);
        assert_eq!(recorded.customer_label(), "Consumidor final");
        assert!(recorded.is_cancellable());
    }
}
