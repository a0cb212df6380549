//! Customer DTO <-> view model.
//!
//! The backend stores customers flat (`rua`, `bairro`, ...) with a
//! `tipoCliente` code (`PF` individual, `PJ` business) and exactly one of
//! `cpf`/`cnpj`. The view model nests the address and derives the display
//! name, document and company data from the code.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use varejo_core::CustomerId;

use crate::address::Address;

/// View-model fields that have no backend column yet.
///
/// [`CustomerInput::to_backend`] drops exactly these.
pub const BACKEND_UNSUPPORTED_FIELDS: &[&str] = &["registrationDate", "lastPurchase"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TipoCliente {
    #[default]
    PF,
    PJ,
}

impl core::fmt::Display for TipoCliente {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::PF => "PF",
            Self::PJ => "PJ",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    #[default]
    Individual,
    Business,
}

impl From<TipoCliente> for CustomerType {
    fn from(code: TipoCliente) -> Self {
        match code {
            TipoCliente::PF => Self::Individual,
            TipoCliente::PJ => Self::Business,
        }
    }
}

impl From<CustomerType> for TipoCliente {
    fn from(kind: CustomerType) -> Self {
        match kind {
            CustomerType::Individual => Self::PF,
            CustomerType::Business => Self::PJ,
        }
    }
}

/// Customer as sent by `/customers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: CustomerId,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub tipo_cliente: TipoCliente,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub cnpj: Option<String>,
    #[serde(default)]
    pub razao_social: Option<String>,
    #[serde(default)]
    pub inscricao_estadual: Option<String>,
    #[serde(default)]
    pub rua: Option<String>,
    #[serde(default)]
    pub numero: Option<String>,
    #[serde(default)]
    pub complemento: Option<String>,
    #[serde(default)]
    pub bairro: Option<String>,
    #[serde(default)]
    pub cidade: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub cep: Option<String>,
    #[serde(default)]
    pub ativo: Option<bool>,
    #[serde(default)]
    pub data_cadastro: Option<NaiveDate>,
    #[serde(default)]
    pub ultima_compra: Option<NaiveDate>,
}

/// Company data; only present for business customers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub legal_name: String,
    pub trade_name: String,
    pub state_registration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
    /// CPF for individuals, CNPJ for businesses.
    pub document: String,
    pub address: Address,
    pub company_info: Option<CompanyInfo>,
    pub active: bool,
    pub registration_date: Option<NaiveDate>,
    pub last_purchase: Option<NaiveDate>,
}

impl From<CustomerDto> for Customer {
    fn from(dto: CustomerDto) -> Self {
        let customer_type = CustomerType::from(dto.tipo_cliente);
        let nome = dto.nome.unwrap_or_default();

        let (name, document, company_info) = match customer_type {
            CustomerType::Business => {
                let legal_name = dto
                    .razao_social
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or_else(|| nome.clone());
                let company = CompanyInfo {
                    legal_name: legal_name.clone(),
                    trade_name: nome,
                    state_registration: dto.inscricao_estadual.unwrap_or_default(),
                };
                (legal_name, dto.cnpj.unwrap_or_default(), Some(company))
            }
            CustomerType::Individual => (nome, dto.cpf.unwrap_or_default(), None),
        };

        Self {
            id: dto.id,
            name,
            email: dto.email.unwrap_or_default(),
            phone: dto.telefone.unwrap_or_default(),
            customer_type,
            document,
            address: Address {
                street: dto.rua.unwrap_or_default(),
                number: dto.numero.unwrap_or_default(),
                complement: dto.complemento.unwrap_or_default(),
                neighborhood: dto.bairro.unwrap_or_default(),
                city: dto.cidade.unwrap_or_default(),
                state: dto.estado.unwrap_or_default(),
                zip_code: dto.cep.unwrap_or_default(),
            },
            company_info,
            active: dto.ativo.unwrap_or(true),
            registration_date: dto.data_cadastro,
            last_purchase: dto.ultima_compra,
        }
    }
}

impl Customer {
    pub fn is_business(&self) -> bool {
        self.customer_type == CustomerType::Business
    }

    pub fn to_input(&self) -> CustomerInput {
        CustomerInput {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            customer_type: self.customer_type,
            document: self.document.clone(),
            address: self.address.clone(),
            company_info: self.company_info.clone(),
            active: self.active,
            registration_date: self.registration_date,
            last_purchase: self.last_purchase,
        }
    }
}

/// Create/update form of a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
    pub document: String,
    pub address: Address,
    pub company_info: Option<CompanyInfo>,
    pub active: bool,
    pub registration_date: Option<NaiveDate>,
    pub last_purchase: Option<NaiveDate>,
}

/// Request body of `POST /customers` and `PUT /customers/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub tipo_cliente: TipoCliente,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razao_social: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inscricao_estadual: Option<String>,
    pub rua: String,
    pub numero: String,
    pub complemento: String,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
    pub cep: String,
    pub ativo: bool,
}

impl CustomerInput {
    /// Flatten into the backend shape.
    ///
    /// Individuals carry only `cpf`, businesses only `cnpj`. The fields listed
    /// in [`BACKEND_UNSUPPORTED_FIELDS`] are dropped.
    pub fn to_backend(&self) -> CustomerPayload {
        let dropped = self.unsupported_fields_set();
        if !dropped.is_empty() {
            tracing::debug!(?dropped, "dropping customer fields the backend does not store");
        }

        let tipo_cliente = TipoCliente::from(self.customer_type);
        let (nome, cpf, cnpj, razao_social, inscricao_estadual) = match tipo_cliente {
            TipoCliente::PF => (self.name.clone(), Some(self.document.clone()), None, None, None),
            TipoCliente::PJ => {
                let company = self.company_info.clone().unwrap_or_default();
                let trade_name = non_empty(company.trade_name).unwrap_or_else(|| self.name.clone());
                let legal_name = non_empty(company.legal_name).unwrap_or_else(|| self.name.clone());
                (
                    trade_name,
                    None,
                    Some(self.document.clone()),
                    Some(legal_name),
                    non_empty(company.state_registration),
                )
            }
        };

        CustomerPayload {
            nome,
            email: self.email.clone(),
            telefone: self.phone.clone(),
            tipo_cliente,
            cpf,
            cnpj,
            razao_social,
            inscricao_estadual,
            rua: self.address.street.clone(),
            numero: self.address.number.clone(),
            complemento: self.address.complement.clone(),
            bairro: self.address.neighborhood.clone(),
            cidade: self.address.city.clone(),
            estado: self.address.state.clone(),
            cep: self.address.zip_code.clone(),
            ativo: self.active,
        }
    }

    /// Names of the unsupported fields that carry a value in this input.
    pub fn unsupported_fields_set(&self) -> Vec<&'static str> {
        let set = [self.registration_date.is_some(), self.last_purchase.is_some()];
        BACKEND_UNSUPPORTED_FIELDS
            .iter()
            .zip(set)
            .filter_map(|(name, is_set)| is_set.then_some(*name))
            .collect()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    /// View-model field -> backend field(s) it feeds.
    const FIELD_MAP: &[(&str, &[&str])] = &[
        ("name", &["nome", "razaoSocial"]),
        ("email", &["email"]),
        ("phone", &["telefone"]),
        ("type", &["tipoCliente"]),
        ("document", &["cpf", "cnpj"]),
        ("address", &["rua", "numero", "complemento", "bairro", "cidade", "estado", "cep"]),
        ("companyInfo", &["nome", "razaoSocial", "inscricaoEstadual"]),
        ("active", &["ativo"]),
    ];

    fn dto(value: Value) -> CustomerDto {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn individual_round_trip() {
        let customer = Customer::from(dto(json!({
            "id": 1, "tipoCliente": "PF", "nome": "Ana", "cpf": "123"
        })));

        assert_eq!(customer.name, "Ana");
        assert_eq!(customer.document, "123");
        assert_eq!(customer.customer_type, CustomerType::Individual);
        assert_eq!(customer.company_info, None);

        let payload = customer.to_input().to_backend();
        assert_eq!(payload.tipo_cliente, TipoCliente::PF);
        assert_eq!(payload.cpf.as_deref(), Some("123"));
        assert_eq!(payload.cnpj, None);
    }

    #[test]
    fn business_uses_legal_name_and_cnpj() {
        let customer = Customer::from(dto(json!({
            "id": 2, "tipoCliente": "PJ", "nome": "Loja X",
            "razaoSocial": "Loja X Ltda", "cnpj": "99", "cpf": "should-be-ignored"
        })));

        assert_eq!(customer.name, "Loja X Ltda");
        assert_eq!(customer.document, "99");
        let company = customer.company_info.clone().unwrap();
        assert_eq!(company.trade_name, "Loja X");
        assert_eq!(company.legal_name, "Loja X Ltda");

        let payload = customer.to_input().to_backend();
        assert_eq!(payload.nome, "Loja X");
        assert_eq!(payload.razao_social.as_deref(), Some("Loja X Ltda"));
        assert_eq!(payload.cnpj.as_deref(), Some("99"));
        assert_eq!(payload.cpf, None);
    }

    #[test]
    fn business_without_legal_name_falls_back_to_nome() {
        let customer = Customer::from(dto(json!({ "id": 3, "tipoCliente": "PJ", "nome": "Padaria" })));
        assert_eq!(customer.name, "Padaria");
        assert_eq!(customer.document, "");
        assert!(customer.is_business());
    }

    #[test]
    fn address_is_always_present() {
        let customer = Customer::from(dto(json!({ "id": 4 })));
        assert_eq!(customer.address, Address::default());
        assert_eq!(customer.name, "");
        assert!(customer.active);
    }

    #[test]
    fn never_emits_both_documents() {
        for kind in [CustomerType::Individual, CustomerType::Business] {
            let input = CustomerInput {
                customer_type: kind,
                document: "1".into(),
                ..CustomerInput::default()
            };
            let body = serde_json::to_value(input.to_backend()).unwrap();
            let has_cpf = body.get("cpf").is_some();
            let has_cnpj = body.get("cnpj").is_some();
            assert!(has_cpf ^ has_cnpj, "{kind:?} emitted {body}");
        }
    }

    #[test]
    fn only_the_documented_fields_are_dropped() {
        let input = CustomerInput {
            name: "Ana".into(),
            registration_date: NaiveDate::from_ymd_opt(2024, 1, 10),
            last_purchase: NaiveDate::from_ymd_opt(2024, 5, 2),
            company_info: Some(CompanyInfo::default()),
            ..CustomerInput::default()
        };

        let view = serde_json::to_value(&input).unwrap();
        let body = serde_json::to_value(input.to_backend()).unwrap();

        for key in view.as_object().unwrap().keys() {
            let mapped = FIELD_MAP.iter().find(|(field, _)| *field == key.as_str());
            match mapped {
                Some((_, targets)) => assert!(
                    targets.iter().any(|t| body.get(*t).is_some()),
                    "{key} has no backend counterpart in {body}"
                ),
                None => assert!(
                    BACKEND_UNSUPPORTED_FIELDS.contains(&key.as_str()),
                    "{key} is silently dropped"
                ),
            }
        }
        assert_eq!(input.unsupported_fields_set(), BACKEND_UNSUPPORTED_FIELDS.to_vec());
        assert!(body.get("registrationDate").is_none());
        assert!(body.get("dataCadastro").is_none());
    }
}
