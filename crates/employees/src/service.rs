use serde_json::json;

use varejo_core::{EmployeeId, Page, PageRequest, QueryParams};
use varejo_gateway::{ClientResult, Gateway};

use crate::employee::{Employee, EmployeeInput, EmployeeStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub page: PageRequest,
    pub search: Option<String>,
    pub cargo: Option<String>,
    pub departamento: Option<String>,
    pub status: Option<EmployeeStatus>,
}

impl EmployeeFilter {
    pub fn to_query(&self) -> QueryParams {
        QueryParams::paged(self.page)
            .push_text("search", self.search.as_deref())
            .push_text("cargo", self.cargo.as_deref())
            .push_text("departamento", self.departamento.as_deref())
            .push_opt("status", self.status)
    }
}

#[derive(Clone)]
pub struct EmployeeService {
    gateway: Gateway,
}

impl EmployeeService {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, filter: &EmployeeFilter) -> ClientResult<Page<Employee>> {
        self.gateway
            .get_page(&filter.to_query().append_to("/employees"))
            .await
    }

    pub async fn get(&self, id: EmployeeId) -> ClientResult<Employee> {
        self.gateway.get(&format!("/employees/{id}")).await
    }

    pub async fn create(&self, input: &EmployeeInput) -> ClientResult<Employee> {
        input.validate()?;
        let employee: Employee = self.gateway.post("/employees", input).await?;
        tracing::info!(employee_id = %employee.id_funcionario, "employee created");
        Ok(employee)
    }

    pub async fn update(&self, id: EmployeeId, input: &EmployeeInput) -> ClientResult<Employee> {
        input.validate()?;
        let employee = self.gateway.put(&format!("/employees/{id}"), input).await?;
        tracing::info!(employee_id = %id, "employee updated");
        Ok(employee)
    }

    pub async fn remove(&self, id: EmployeeId) -> ClientResult<()> {
        self.gateway.delete(&format!("/employees/{id}")).await?;
        tracing::info!(employee_id = %id, "employee removed");
        Ok(())
    }

    /// Activate or deactivate. Leave states are set through [`update`](Self::update).
    pub async fn toggle_status(&self, id: EmployeeId, active: bool) -> ClientResult<Employee> {
        let status = EmployeeStatus::from_active(active);
        let employee = self
            .gateway
            .patch(&format!("/employees/{id}/status"), &json!({ "status": status }))
            .await?;
        tracing::info!(employee_id = %id, %status, "employee status changed");
        Ok(employee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_keeps_caller_order() {
        let filter = EmployeeFilter {
            page: PageRequest::new(0, 10),
            search: None,
            cargo: Some("Caixa".into()),
            departamento: Some("Frente de Loja".into()),
            status: Some(EmployeeStatus::Afastado),
        };
        assert_eq!(
            filter.to_query().to_string(),
            "page=0&size=10&cargo=Caixa&departamento=Frente%20de%20Loja&status=AFASTADO"
        );
    }
}
