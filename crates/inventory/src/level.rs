use serde::{Deserialize, Serialize};

use varejo_products::Product;

/// Stock situation of a product, as shown next to its quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockLevel {
    Esgotado,
    Baixo,
    Normal,
}

impl StockLevel {
    /// `Esgotado` at zero (or below), `Baixo` up to the minimum, else `Normal`.
    pub fn classify(estoque: i64, estoque_minimo: i64) -> Self {
        if estoque <= 0 {
            Self::Esgotado
        } else if estoque <= estoque_minimo {
            Self::Baixo
        } else {
            Self::Normal
        }
    }

    pub fn of(product: &Product) -> Self {
        Self::classify(product.estoque, product.estoque_minimo)
    }

    pub fn needs_restock(&self) -> bool {
        !matches!(self, Self::Normal)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Esgotado => "Esgotado",
            Self::Baixo => "Baixo",
            Self::Normal => "Normal",
        }
    }
}

impl core::fmt::Display for StockLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
