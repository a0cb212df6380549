use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use varejo_core::{DomainError, DomainResult, ProductId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementType {
    Entrada,
    Saida,
    /// Inventory count correction; the quantity is a signed delta.
    Ajuste,
}

impl core::fmt::Display for MovementType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Entrada => "ENTRADA",
            Self::Saida => "SAIDA",
            Self::Ajuste => "AJUSTE",
        })
    }
}

/// Signed stock change of a movement of `tipo` with `quantidade`.
fn signed_delta(tipo: MovementType, quantidade: i64) -> i64 {
    match tipo {
        MovementType::Entrada | MovementType::Ajuste => quantidade,
        MovementType::Saida => -quantidade,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id_movimentacao: i64,
    pub id_produto: ProductId,
    #[serde(default)]
    pub produto_nome: Option<String>,
    pub tipo: MovementType,
    pub quantidade: i64,
    #[serde(default)]
    pub estoque_anterior: Option<i64>,
    #[serde(default)]
    pub estoque_atual: Option<i64>,
    #[serde(default)]
    pub motivo: String,
    pub data_movimentacao: NaiveDateTime,
    #[serde(default)]
    pub usuario: Option<String>,
}

impl StockMovement {
    pub fn delta(&self) -> i64 {
        signed_delta(self.tipo, self.quantidade)
    }
}

/// Body of `POST /stock/movements`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovementInput {
    pub id_produto: ProductId,
    pub tipo: MovementType,
    pub quantidade: i64,
    pub motivo: String,
}

impl StockMovementInput {
    pub fn delta(&self) -> i64 {
        signed_delta(self.tipo, self.quantidade)
    }

    pub fn validate(&self) -> DomainResult<()> {
        match self.tipo {
            MovementType::Ajuste if self.quantidade == 0 => {
                return Err(DomainError::validation("delta cannot be zero"));
            }
            MovementType::Entrada | MovementType::Saida if self.quantidade <= 0 => {
                return Err(DomainError::validation("quantity must be positive"));
            }
            _ => {}
        }
        if self.motivo.trim().is_empty() {
            return Err(DomainError::validation("reason cannot be empty"));
        }
        Ok(())
    }

    /// Stock after applying this movement to `current`.
    pub fn apply_to(&self, current: i64) -> DomainResult<i64> {
        self.validate()?;
        let next = current
            .checked_add(self.delta())
            .ok_or_else(|| DomainError::invariant("stock overflow"))?;
        if next < 0 {
            return Err(DomainError::invariant("stock cannot go negative"));
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(tipo: MovementType, quantidade: i64) -> StockMovementInput {
        StockMovementInput {
            id_produto: ProductId::new(1),
            tipo,
            quantidade,
            motivo: "Recebimento NF 123".into(),
        }
    }

    #[test]
    fn entries_and_exits_move_stock() {
        assert_eq!(input(MovementType::Entrada, 10).apply_to(5).unwrap(), 15);
        assert_eq!(input(MovementType::Saida, 5).apply_to(5).unwrap(), 0);
        assert_eq!(input(MovementType::Ajuste, -3).apply_to(5).unwrap(), 2);
    }

    #[test]
    fn rejects_invalid_movements() {
        assert!(input(MovementType::Entrada, 0).validate().is_err());
        assert!(input(MovementType::Saida, -1).validate().is_err());
        assert!(input(MovementType::Ajuste, 0).validate().is_err());

        let mut no_reason = input(MovementType::Entrada, 1);
        no_reason.motivo = "   ".into();
        assert!(no_reason.validate().is_err());
    }

    #[test]
    fn exit_cannot_overdraw() {
        let err = input(MovementType::Saida, 6).apply_to(5).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn movement_type_wire_format() {
        let body = serde_json::to_value(input(MovementType::Saida, 2)).unwrap();
        assert_eq!(body["tipo"], "SAIDA");
        assert_eq!(body["id_produto"], 1);
    }
}
