use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use varejo_core::{DomainError, DomainResult, ProductId, PromotionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PromotionStatus {
    Ativa,
    Agendada,
    Inativa,
}

impl core::fmt::Display for PromotionStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Ativa => "ATIVA",
            Self::Agendada => "AGENDADA",
            Self::Inativa => "INATIVA",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// `valor` is a percentage of the price.
    #[default]
    Percentual,
    /// `valor` is subtracted from the price.
    ValorFixo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    pub id_promocao: PromotionId,
    pub nome: String,
    #[serde(default)]
    pub descricao: String,
    #[serde(default)]
    pub tipo_desconto: DiscountType,
    pub valor_desconto: Decimal,
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    pub status: PromotionStatus,
    #[serde(default)]
    pub produtos: Vec<ProductId>,
}

impl Promotion {
    /// Price after the discount, rounded to cents and never below zero.
    pub fn discounted_price(&self, price: Decimal) -> Decimal {
        discount(self.tipo_desconto, self.valor_desconto, price)
    }

    /// Status implied by the validity window at `today`.
    ///
    /// A promotion switched off stays `INATIVA` whatever its dates.
    pub fn effective_status(&self, today: NaiveDate) -> PromotionStatus {
        if self.status == PromotionStatus::Inativa || today > self.data_fim {
            PromotionStatus::Inativa
        } else if today < self.data_inicio {
            PromotionStatus::Agendada
        } else {
            PromotionStatus::Ativa
        }
    }

    /// Days left until the end date (inclusive of today); `None` once over.
    pub fn days_remaining(&self, today: NaiveDate) -> Option<i64> {
        let days = (self.data_fim - today).num_days();
        (days >= 0).then_some(days + 1)
    }

    pub fn applies_to(&self, product: ProductId) -> bool {
        self.produtos.is_empty() || self.produtos.contains(&product)
    }

    pub fn to_input(&self) -> PromotionInput {
        PromotionInput {
            nome: self.nome.clone(),
            descricao: self.descricao.clone(),
            tipo_desconto: self.tipo_desconto,
            valor_desconto: self.valor_desconto,
            data_inicio: self.data_inicio,
            data_fim: self.data_fim,
            produtos: self.produtos.clone(),
        }
    }
}

fn discount(kind: DiscountType, value: Decimal, price: Decimal) -> Decimal {
    let discounted = match kind {
        DiscountType::Percentual => price * (Decimal::ONE - value / Decimal::ONE_HUNDRED),
        DiscountType::ValorFixo => price - value,
    };
    discounted.max(Decimal::ZERO).round_dp(2)
}

/// Body of `POST /promotions` and `PUT /promotions/{id}`.
///
/// The backend derives `status` from the dates on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionInput {
    pub nome: String,
    pub descricao: String,
    pub tipo_desconto: DiscountType,
    pub valor_desconto: Decimal,
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    pub produtos: Vec<ProductId>,
}

impl PromotionInput {
    pub fn validate(&self) -> DomainResult<()> {
        if self.nome.trim().is_empty() {
            return Err(DomainError::validation("promotion name must not be empty"));
        }
        if self.data_fim < self.data_inicio {
            return Err(DomainError::validation("promotion ends before it starts"));
        }
        if self.valor_desconto <= Decimal::ZERO {
            return Err(DomainError::validation("discount must be positive"));
        }
        if self.tipo_desconto == DiscountType::Percentual && self.valor_desconto > Decimal::ONE_HUNDRED {
            return Err(DomainError::validation("percentage discount must not exceed 100"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn promotion(kind: DiscountType, value: Decimal) -> Promotion {
        Promotion {
            id_promocao: PromotionId::new(1),
            nome: "Semana do Arroz".into(),
            descricao: String::new(),
            tipo_desconto: kind,
            valor_desconto: value,
            data_inicio: date(2024, 6, 10),
            data_fim: date(2024, 6, 16),
            status: PromotionStatus::Ativa,
            produtos: vec![],
        }
    }

    #[test]
    fn percentage_and_fixed_discounts() {
        let pct = promotion(DiscountType::Percentual, Decimal::from(15));
        assert_eq!(pct.discounted_price(Decimal::new(2590, 2)), Decimal::new(2202, 2));

        let fixed = promotion(DiscountType::ValorFixo, Decimal::from(5));
        assert_eq!(fixed.discounted_price(Decimal::new(2590, 2)), Decimal::new(2090, 2));
        assert_eq!(fixed.discounted_price(Decimal::from(3)), Decimal::ZERO);
    }

    #[test]
    fn effective_status_follows_dates() {
        let p = promotion(DiscountType::Percentual, Decimal::TEN);
        assert_eq!(p.effective_status(date(2024, 6, 9)), PromotionStatus::Agendada);
        assert_eq!(p.effective_status(date(2024, 6, 10)), PromotionStatus::Ativa);
        assert_eq!(p.effective_status(date(2024, 6, 16)), PromotionStatus::Ativa);
        assert_eq!(p.effective_status(date(2024, 6, 17)), PromotionStatus::Inativa);

        let off = Promotion { status: PromotionStatus::Inativa, ..p };
        assert_eq!(off.effective_status(date(2024, 6, 12)), PromotionStatus::Inativa);
    }

    #[test]
    fn days_remaining_counts_today() {
        let p = promotion(DiscountType::Percentual, Decimal::TEN);
        assert_eq!(p.days_remaining(date(2024, 6, 16)), Some(1));
        assert_eq!(p.days_remaining(date(2024, 6, 10)), Some(7));
        assert_eq!(p.days_remaining(date(2024, 6, 17)), None);
    }

    #[test]
    fn empty_product_list_means_every_product() {
        let mut p = promotion(DiscountType::Percentual, Decimal::TEN);
        assert!(p.applies_to(ProductId::new(9)));
        p.produtos = vec![ProductId::new(1)];
        assert!(!p.applies_to(ProductId::new(9)));
    }

    #[test]
    fn input_validation() {
        let p = promotion(DiscountType::Percentual, Decimal::from(120));
        assert!(p.to_input().validate().is_err());

        let mut input = promotion(DiscountType::ValorFixo, Decimal::from(120)).to_input();
        assert!(input.validate().is_ok());

        input.data_fim = date(2024, 6, 1);
        assert!(input.validate().is_err());
    }

    proptest! {
        /// Property: a discount never raises the price nor makes it negative.
        #[test]
        fn discount_stays_within_bounds(
            cents in 0i64..1_000_000,
            value in 0i64..20_000,
            fixed in any::<bool>(),
        ) {
            let price = Decimal::new(cents, 2);
            let kind = if fixed { DiscountType::ValorFixo } else { DiscountType::Percentual };
            let value = if fixed { Decimal::new(value, 2) } else { Decimal::new(value % 10_001, 2) };

            let result = promotion(kind, value).discounted_price(price);
            prop_assert!(result >= Decimal::ZERO);
            prop_assert!(result <= price);
        }
    }
}
