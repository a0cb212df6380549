//! Product DTO and view model.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use varejo_core::{CategoryId, DomainError, DomainResult, ProductId};

use crate::category::{Category, CategoryDto};

/// Label shown for a product without a category.
pub const UNCATEGORIZED_LABEL: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductStatus {
    #[default]
    Ativo,
    Inativo,
}

impl ProductStatus {
    pub fn from_active(active: bool) -> Self {
        if active { Self::Ativo } else { Self::Inativo }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ativo => "ATIVO",
            Self::Inativo => "INATIVO",
        }
    }
}

impl core::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product as sent by `/products`.
///
/// The category arrives either nested (`categoria`) or flat
/// (`categoria_id` and, sometimes, `categoria_nome`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    pub id_produto: ProductId,
    pub nome: String,
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub preco_custo: Decimal,
    pub preco_venda: Decimal,
    #[serde(default)]
    pub estoque: i64,
    #[serde(default)]
    pub estoque_minimo: i64,
    #[serde(default)]
    pub estoque_maximo: Option<i64>,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub categoria: Option<CategoryDto>,
    #[serde(default)]
    pub categoria_id: Option<i64>,
    #[serde(default)]
    pub categoria_nome: Option<String>,
    #[serde(default)]
    pub codigo_barras: Option<String>,
    #[serde(default)]
    pub unidade: Option<String>,
    #[serde(default)]
    pub peso: Option<Decimal>,
    #[serde(default)]
    pub data_criacao: Option<NaiveDateTime>,
    #[serde(default)]
    pub data_atualizacao: Option<NaiveDateTime>,
}

/// Category reference nested in a product. Both fields are empty when the
/// product has no category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: String,
    pub nome: String,
}

impl ProductCategory {
    pub fn is_assigned(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// Display name, or [`UNCATEGORIZED_LABEL`].
    pub fn label(&self) -> &str {
        if self.nome.trim().is_empty() {
            UNCATEGORIZED_LABEL
        } else {
            &self.nome
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id_produto: ProductId,
    pub nome: String,
    pub marca: String,
    pub descricao: String,
    pub preco_custo: Decimal,
    pub preco_venda: Decimal,
    pub estoque: i64,
    pub estoque_minimo: i64,
    pub estoque_maximo: Option<i64>,
    pub status: ProductStatus,
    pub category: ProductCategory,
    pub codigo_barras: Option<String>,
    pub unidade: Option<String>,
    pub peso: Option<Decimal>,
    pub data_criacao: Option<NaiveDateTime>,
    pub data_atualizacao: Option<NaiveDateTime>,
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        let category = match dto.categoria {
            Some(nested) => ProductCategory {
                id: nested.id_categoria.to_string(),
                nome: nested.nome,
            },
            None => ProductCategory {
                id: dto.categoria_id.map(|id| id.to_string()).unwrap_or_default(),
                nome: dto.categoria_nome.unwrap_or_default(),
            },
        };

        Self {
            id_produto: dto.id_produto,
            nome: dto.nome,
            marca: dto.marca.unwrap_or_default(),
            descricao: dto.descricao.unwrap_or_default(),
            preco_custo: dto.preco_custo,
            preco_venda: dto.preco_venda,
            estoque: dto.estoque,
            estoque_minimo: dto.estoque_minimo,
            estoque_maximo: dto.estoque_maximo,
            status: dto.status,
            category,
            codigo_barras: dto.codigo_barras,
            unidade: dto.unidade,
            peso: dto.peso,
            data_criacao: dto.data_criacao,
            data_atualizacao: dto.data_atualizacao,
        }
    }
}

impl Product {
    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Ativo
    }

    pub fn is_low_stock(&self) -> bool {
        self.estoque <= self.estoque_minimo
    }

    /// `estoque * preco_custo`, saturating at the `Decimal` bounds.
    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.estoque).saturating_mul(self.preco_custo)
    }

    /// Sale price over cost, in percent. `None` without a cost.
    pub fn margin_percent(&self) -> Option<Decimal> {
        if self.preco_custo.is_zero() {
            return None;
        }
        Some(((self.preco_venda - self.preco_custo) / self.preco_custo * Decimal::ONE_HUNDRED).round_dp(2))
    }

    pub fn to_input(&self) -> ProductInput {
        ProductInput {
            nome: self.nome.clone(),
            marca: Some(self.marca.clone()).filter(|m| !m.is_empty()),
            descricao: Some(self.descricao.clone()).filter(|d| !d.is_empty()),
            preco_custo: self.preco_custo,
            preco_venda: self.preco_venda,
            estoque: self.estoque,
            estoque_minimo: self.estoque_minimo,
            estoque_maximo: self.estoque_maximo,
            status: self.status,
            category_id: Some(self.category.id.clone()).filter(|id| !id.trim().is_empty()),
            codigo_barras: self.codigo_barras.clone(),
            unidade: self.unidade.clone(),
            peso: self.peso,
        }
    }
}

/// Fill missing category names from an already loaded category list.
///
/// Products whose category id is unknown keep an empty name (and render as
/// [`UNCATEGORIZED_LABEL`]).
pub fn fill_category_names(products: &mut [Product], categories: &[Category]) {
    for product in products.iter_mut() {
        if !product.category.is_assigned() || !product.category.nome.trim().is_empty() {
            continue;
        }
        if let Some(found) = categories.iter().find(|c| c.id == product.category.id.trim()) {
            product.category.nome = found.nome.clone();
        }
    }
}

/// Create/update form of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub nome: String,
    pub marca: Option<String>,
    pub descricao: Option<String>,
    pub preco_custo: Decimal,
    pub preco_venda: Decimal,
    pub estoque: i64,
    pub estoque_minimo: i64,
    pub estoque_maximo: Option<i64>,
    pub status: ProductStatus,
    /// String id of the selected category, as held by the view model.
    pub category_id: Option<String>,
    pub codigo_barras: Option<String>,
    pub unidade: Option<String>,
    pub peso: Option<Decimal>,
}

/// Request body of `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marca: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub preco_custo: Decimal,
    pub preco_venda: Decimal,
    pub estoque: i64,
    pub estoque_minimo: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estoque_maximo: Option<i64>,
    pub status: ProductStatus,
    pub categoria_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo_barras: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peso: Option<Decimal>,
}

impl ProductInput {
    /// Validate the form and flatten the category id to an integer.
    pub fn to_backend(&self) -> DomainResult<ProductPayload> {
        let nome = self.nome.trim();
        if nome.is_empty() {
            return Err(DomainError::validation("product name must not be empty"));
        }
        if self.preco_custo.is_sign_negative() || self.preco_venda.is_sign_negative() {
            return Err(DomainError::validation("prices must not be negative"));
        }
        if self.estoque_minimo < 0 {
            return Err(DomainError::validation("minimum stock must not be negative"));
        }
        if let Some(max) = self.estoque_maximo {
            if max < self.estoque_minimo {
                return Err(DomainError::validation(
                    "maximum stock must not be below minimum stock",
                ));
            }
        }

        let categoria_id = self
            .category_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::parse::<CategoryId>)
            .transpose()?;

        Ok(ProductPayload {
            nome: nome.to_string(),
            marca: self.marca.clone(),
            descricao: self.descricao.clone(),
            preco_custo: self.preco_custo,
            preco_venda: self.preco_venda,
            estoque: self.estoque,
            estoque_minimo: self.estoque_minimo,
            estoque_maximo: self.estoque_maximo,
            status: self.status,
            categoria_id,
            codigo_barras: self.codigo_barras.clone(),
            unidade: self.unidade.clone(),
            peso: self.peso,
        })
    }
}
