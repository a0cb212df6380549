//! System users (`/users`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;

use varejo_core::{Page, PageRequest, QueryParams, UserId};
use varejo_gateway::{ClientResult, Gateway};

use crate::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub nome: String,
    pub email: String,
    pub perfil: Role,
    #[serde(default = "default_true")]
    pub ativo: bool,
    #[serde(default)]
    pub data_criacao: Option<NaiveDateTime>,
    #[serde(default)]
    pub ultimo_acesso: Option<NaiveDateTime>,
}

fn default_true() -> bool {
    true
}

/// Body of `POST /users` and `PUT /users/{id}`.
///
/// `senha` is only sent when set; an update without it keeps the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub nome: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senha: Option<String>,
    pub perfil: Role,
    pub ativo: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub page: PageRequest,
    pub search: Option<String>,
    pub perfil: Option<Role>,
    pub ativo: Option<bool>,
}

impl UserFilter {
    pub fn to_query(&self) -> QueryParams {
        QueryParams::paged(self.page)
            .push_text("search", self.search.as_deref())
            .push_opt("perfil", self.perfil.as_ref())
            .push_opt("ativo", self.ativo)
    }
}

#[derive(Clone)]
pub struct UserService {
    gateway: Gateway,
}

impl UserService {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, filter: &UserFilter) -> ClientResult<Page<User>> {
        self.gateway
            .get_page(&filter.to_query().append_to("/users"))
            .await
    }

    pub async fn get(&self, id: UserId) -> ClientResult<User> {
        self.gateway.get(&format!("/users/{id}")).await
    }

    pub async fn create(&self, input: &UserInput) -> ClientResult<User> {
        let user: User = self.gateway.post("/users", input).await?;
        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub async fn update(&self, id: UserId, input: &UserInput) -> ClientResult<User> {
        let user = self.gateway.put(&format!("/users/{id}"), input).await?;
        tracing::info!(user_id = %id, "user updated");
        Ok(user)
    }

    pub async fn remove(&self, id: UserId) -> ClientResult<()> {
        self.gateway.delete(&format!("/users/{id}")).await?;
        tracing::info!(user_id = %id, "user removed");
        Ok(())
    }

    pub async fn toggle_status(&self, id: UserId, ativo: bool) -> ClientResult<User> {
        let user = self
            .gateway
            .patch(&format!("/users/{id}/status"), &json!({ "ativo": ativo }))
            .await?;
        tracing::info!(user_id = %id, ativo, "user status changed");
        Ok(user)
    }
}
