//! Suppliers (`/suppliers`).
//!
//! Unlike customers, the supplier form mirrors the backend record field for
//! field, so there is no separate view model.

use serde::{Deserialize, Serialize};

use varejo_core::SupplierId;

use crate::address::Address;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: SupplierId,
    pub razao_social: String,
    #[serde(default)]
    pub nome_fantasia: Option<String>,
    #[serde(default)]
    pub cnpj: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub contato: Option<String>,
    #[serde(default)]
    pub rua: Option<String>,
    #[serde(default)]
    pub numero: Option<String>,
    #[serde(default)]
    pub bairro: Option<String>,
    #[serde(default)]
    pub cidade: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub cep: Option<String>,
    #[serde(default = "default_true")]
    pub ativo: bool,
}

fn default_true() -> bool {
    true
}

impl Supplier {
    /// Trade name when set, else the legal name.
    pub fn display_name(&self) -> &str {
        self.nome_fantasia
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.razao_social)
    }

    pub fn address(&self) -> Address {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        Address {
            street: field(&self.rua),
            number: field(&self.numero),
            complement: String::new(),
            neighborhood: field(&self.bairro),
            city: field(&self.cidade),
            state: field(&self.estado),
            zip_code: field(&self.cep),
        }
    }

    pub fn to_input(&self) -> SupplierInput {
        SupplierInput {
            razao_social: self.razao_social.clone(),
            nome_fantasia: self.nome_fantasia.clone(),
            cnpj: self.cnpj.clone(),
            email: self.email.clone(),
            telefone: self.telefone.clone(),
            contato: self.contato.clone(),
            rua: self.rua.clone(),
            numero: self.numero.clone(),
            bairro: self.bairro.clone(),
            cidade: self.cidade.clone(),
            estado: self.estado.clone(),
            cep: self.cep.clone(),
            ativo: self.ativo,
        }
    }
}

/// Body of `POST /suppliers` and `PUT /suppliers/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInput {
    pub razao_social: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome_fantasia: Option<String>,
    pub cnpj: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contato: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rua: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bairro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
    pub ativo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_minimal_supplier() {
        let supplier: Supplier =
            serde_json::from_str(r#"{"id":5,"razaoSocial":"Distribuidora Sol Ltda"}"#).unwrap();
        assert!(supplier.ativo);
        assert_eq!(supplier.display_name(), "Distribuidora Sol Ltda");
        assert!(supplier.address().is_blank());
    }

    #[test]
    fn display_name_prefers_trade_name() {
        let supplier: Supplier = serde_json::from_str(
            r#"{"id":5,"razaoSocial":"Distribuidora Sol Ltda","nomeFantasia":"Sol","cidade":"Natal"}"#,
        )
        .unwrap();
        assert_eq!(supplier.display_name(), "Sol");
        assert_eq!(supplier.address().single_line(), "Natal");

        let body = serde_json::to_value(supplier.to_input()).unwrap();
        assert_eq!(body["nomeFantasia"], "Sol");
        assert!(body.get("rua").is_none());
    }
}
