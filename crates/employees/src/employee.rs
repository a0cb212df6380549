use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use varejo_core::{DomainError, DomainResult, EmployeeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EmployeeStatus {
    #[default]
    Ativo,
    Inativo,
    Ferias,
    Afastado,
}

impl EmployeeStatus {
    pub fn from_active(active: bool) -> Self {
        if active { Self::Ativo } else { Self::Inativo }
    }

    /// Still on the payroll (on leave or on vacation included).
    pub fn is_employed(&self) -> bool {
        !matches!(self, Self::Inativo)
    }

    pub fn is_on_leave(&self) -> bool {
        matches!(self, Self::Ferias | Self::Afastado)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ativo => "ATIVO",
            Self::Inativo => "INATIVO",
            Self::Ferias => "FERIAS",
            Self::Afastado => "AFASTADO",
        }
    }
}

impl core::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id_funcionario: EmployeeId,
    pub nome: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub cargo: String,
    #[serde(default)]
    pub departamento: String,
    #[serde(default)]
    pub salario: Decimal,
    #[serde(default)]
    pub data_admissao: Option<NaiveDate>,
    #[serde(default)]
    pub status: EmployeeStatus,
}

impl Employee {
    /// Whole years of service at `today`; `None` without an admission date.
    pub fn years_of_service(&self, today: NaiveDate) -> Option<u32> {
        let admitted = self.data_admissao?;
        today.years_since(admitted)
    }

    pub fn to_input(&self) -> EmployeeInput {
        EmployeeInput {
            nome: self.nome.clone(),
            cpf: self.cpf.clone(),
            email: self.email.clone(),
            telefone: self.telefone.clone(),
            cargo: self.cargo.clone(),
            departamento: self.departamento.clone(),
            salario: self.salario,
            data_admissao: self.data_admissao,
            status: self.status,
        }
    }
}

/// Body of `POST /employees` and `PUT /employees/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInput {
    pub nome: String,
    pub cpf: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    pub cargo: String,
    pub departamento: String,
    pub salario: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_admissao: Option<NaiveDate>,
    pub status: EmployeeStatus,
}

impl EmployeeInput {
    pub fn validate(&self) -> DomainResult<()> {
        if self.nome.trim().is_empty() {
            return Err(DomainError::validation("employee name must not be empty"));
        }
        if self.salario.is_sign_negative() {
            return Err(DomainError::validation("salary must not be negative"));
        }
        Ok(())
    }
}
