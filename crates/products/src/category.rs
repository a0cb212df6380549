//! Categories (`/categorias`).
//!
//! The backend keys categories with an integer `id_categoria`; the view model
//! carries the id as a string. `/categorias` has no server-side pagination or
//! filtering, so both happen here over the full list.

use serde::{Deserialize, Serialize};

use varejo_core::{CategoryId, DomainResult, Page, PageRequest};
use varejo_gateway::{ClientResult, Gateway};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id_categoria: i64,
    pub nome: String,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub ativo: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub nome: String,
    pub descricao: String,
    pub ativo: bool,
}

impl From<CategoryDto> for Category {
    fn from(dto: CategoryDto) -> Self {
        Self {
            id: dto.id_categoria.to_string(),
            nome: dto.nome,
            descricao: dto.descricao.unwrap_or_default(),
            ativo: dto.ativo.unwrap_or(true),
        }
    }
}

impl Category {
    /// Parse the string id back into the backend key.
    pub fn backend_id(&self) -> DomainResult<CategoryId> {
        self.id.parse()
    }

    fn matches(&self, needle: &str) -> bool {
        self.nome.to_lowercase().contains(needle) || self.descricao.to_lowercase().contains(needle)
    }
}

/// Create/update form of a category. `id` is absent on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub id: Option<String>,
    pub nome: String,
    pub descricao: Option<String>,
    pub ativo: Option<bool>,
}

/// Request body of `POST /categorias` and `PUT /categorias/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_categoria: Option<CategoryId>,
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ativo: Option<bool>,
}

impl CategoryInput {
    /// Fails with `InvalidId` when `id` is not an integer.
    pub fn to_backend(&self) -> DomainResult<CategoryPayload> {
        let id_categoria = self
            .id
            .as_deref()
            .map(str::parse::<CategoryId>)
            .transpose()?;

        Ok(CategoryPayload {
            id_categoria,
            nome: self.nome.trim().to_string(),
            descricao: self.descricao.clone(),
            ativo: self.ativo,
        })
    }
}

impl From<&Category> for CategoryInput {
    fn from(category: &Category) -> Self {
        Self {
            id: Some(category.id.clone()),
            nome: category.nome.clone(),
            descricao: Some(category.descricao.clone()).filter(|d| !d.is_empty()),
            ativo: Some(category.ativo),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    pub page: PageRequest,
    pub search: Option<String>,
}

impl CategoryFilter {
    /// Case-insensitive substring search on name and description, then a
    /// local page cut.
    pub fn apply(&self, categories: Vec<Category>) -> Page<Category> {
        let needle = self
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let matching = match needle {
            Some(needle) => categories.into_iter().filter(|c| c.matches(&needle)).collect(),
            None => categories,
        };

        Page::paginate(matching, self.page)
    }
}

#[derive(Clone)]
pub struct CategoryService {
    gateway: Gateway,
}

impl CategoryService {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Every category, unpaginated.
    pub async fn all(&self) -> ClientResult<Vec<Category>> {
        let dtos: Vec<CategoryDto> = self.gateway.get("/categorias").await?;
        Ok(dtos.into_iter().map(Category::from).collect())
    }

    pub async fn list(&self, filter: &CategoryFilter) -> ClientResult<Page<Category>> {
        let all = self.all().await?;
        tracing::debug!(total = all.len(), "paginating categories locally");
        Ok(filter.apply(all))
    }

    pub async fn get(&self, id: CategoryId) -> ClientResult<Category> {
        let dto: CategoryDto = self.gateway.get(&format!("/categorias/{id}")).await?;
        Ok(dto.into())
    }

    pub async fn create(&self, input: &CategoryInput) -> ClientResult<Category> {
        let payload = input.to_backend()?;
        let dto: CategoryDto = self.gateway.post("/categorias", &payload).await?;
        tracing::info!(category_id = dto.id_categoria, "category created");
        Ok(dto.into())
    }

    pub async fn update(&self, id: CategoryId, input: &CategoryInput) -> ClientResult<Category> {
        let payload = input.to_backend()?;
        let dto: CategoryDto = self
            .gateway
            .put(&format!("/categorias/{id}"), &payload)
            .await?;
        tracing::info!(category_id = %id, "category updated");
        Ok(dto.into())
    }

    pub async fn remove(&self, id: CategoryId) -> ClientResult<()> {
        self.gateway.delete(&format!("/categorias/{id}")).await?;
        tracing::info!(category_id = %id, "category removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use varejo_core::DomainError;

    fn category(id: i64, nome: &str) -> Category {
        CategoryDto {
            id_categoria: id,
            nome: nome.to_string(),
            descricao: None,
            ativo: None,
        }
        .into()
    }

    #[test]
    fn dto_id_is_stringified() {
        let c = category(42, "Bebidas");
        assert_eq!(c.id, "42");
        assert_eq!(c.descricao, "");
        assert!(c.ativo);
    }

    #[test]
    fn non_numeric_id_is_rejected_on_the_way_out() {
        let input = CategoryInput {
            id: Some("bebidas".into()),
            nome: "Bebidas".into(),
            ..CategoryInput::default()
        };
        assert!(matches!(input.to_backend(), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn payload_omits_absent_id() {
        let input = CategoryInput {
            nome: " Limpeza ".into(),
            ..CategoryInput::default()
        };
        let value = serde_json::to_value(input.to_backend().unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({ "nome": "Limpeza" }));
    }

    #[test]
    fn local_search_is_case_insensitive() {
        let all = vec![
            category(1, "Bebidas"),
            category(2, "Hortifruti"),
            category(3, "Bebidas Alcoólicas"),
        ];
        let filter = CategoryFilter {
            page: PageRequest::new(0, 10),
            search: Some("BEBIDAS".into()),
        };
        let page = filter.apply(all);
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.content[1].id, "3");
        page.check_invariants().unwrap();
    }

    #[test]
    fn blank_search_keeps_everything() {
        let all: Vec<Category> = (1..=25).map(|i| category(i, "x")).collect();
        let filter = CategoryFilter {
            page: PageRequest::new(2, 10),
            search: Some("  ".into()),
        };
        let page = filter.apply(all);
        assert_eq!(page.total_elements, 25);
        assert_eq!(page.content.len(), 5);
        assert!(page.last);
    }

    proptest! {
        /// Property: backend id -> view model id -> backend id is the identity.
        #[test]
        fn category_id_round_trip(n in any::<i64>()) {
            let category = category(n, "any");
            prop_assert_eq!(category.id.clone(), n.to_string());
            prop_assert_eq!(category.backend_id().unwrap().value(), n);

            let payload = CategoryInput::from(&category).to_backend().unwrap();
            prop_assert_eq!(payload.id_categoria, Some(CategoryId::new(n)));
        }
    }
}
