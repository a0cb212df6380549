//! Customer and supplier endpoints.

use serde_json::json;

use varejo_core::{CustomerId, Page, PageRequest, QueryParams, SupplierId};
use varejo_gateway::{ClientResult, Gateway};

use crate::customer::{Customer, CustomerDto, CustomerInput, CustomerType, TipoCliente};
use crate::supplier::{Supplier, SupplierInput};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    pub page: PageRequest,
    pub search: Option<String>,
    pub customer_type: Option<CustomerType>,
    pub active: Option<bool>,
}

impl CustomerFilter {
    /// `customerType` is sent as the backend code (`PF`/`PJ`).
    pub fn to_query(&self) -> QueryParams {
        QueryParams::paged(self.page)
            .push_text("search", self.search.as_deref())
            .push_opt("customerType", self.customer_type.map(TipoCliente::from))
            .push_opt("active", self.active)
    }
}

#[derive(Clone)]
pub struct CustomerService {
    gateway: Gateway,
}

impl CustomerService {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, filter: &CustomerFilter) -> ClientResult<Page<Customer>> {
        let page: Page<CustomerDto> = self
            .gateway
            .get_page(&filter.to_query().append_to("/customers"))
            .await?;
        Ok(page.map(Customer::from))
    }

    pub async fn get(&self, id: CustomerId) -> ClientResult<Customer> {
        let dto: CustomerDto = self.gateway.get(&format!("/customers/{id}")).await?;
        Ok(dto.into())
    }

    pub async fn create(&self, input: &CustomerInput) -> ClientResult<Customer> {
        let dto: CustomerDto = self.gateway.post("/customers", &input.to_backend()).await?;
        tracing::info!(customer_id = %dto.id, "customer created");
        Ok(dto.into())
    }

    pub async fn update(&self, id: CustomerId, input: &CustomerInput) -> ClientResult<Customer> {
        let dto: CustomerDto = self
            .gateway
            .put(&format!("/customers/{id}"), &input.to_backend())
            .await?;
        tracing::info!(customer_id = %id, "customer updated");
        Ok(dto.into())
    }

    pub async fn remove(&self, id: CustomerId) -> ClientResult<()> {
        self.gateway.delete(&format!("/customers/{id}")).await?;
        tracing::info!(customer_id = %id, "customer removed");
        Ok(())
    }

    pub async fn toggle_status(&self, id: CustomerId, active: bool) -> ClientResult<Customer> {
        let dto: CustomerDto = self
            .gateway
            .patch(&format!("/customers/{id}/status"), &json!({ "active": active }))
            .await?;
        tracing::info!(customer_id = %id, active, "customer status changed");
        Ok(dto.into())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierFilter {
    pub page: PageRequest,
    pub search: Option<String>,
    pub active: Option<bool>,
}

impl SupplierFilter {
    pub fn to_query(&self) -> QueryParams {
        QueryParams::paged(self.page)
            .push_text("search", self.search.as_deref())
            .push_opt("active", self.active)
    }
}

#[derive(Clone)]
pub struct SupplierService {
    gateway: Gateway,
}

impl SupplierService {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, filter: &SupplierFilter) -> ClientResult<Page<Supplier>> {
        self.gateway
            .get_page(&filter.to_query().append_to("/suppliers"))
            .await
    }

    pub async fn get(&self, id: SupplierId) -> ClientResult<Supplier> {
        self.gateway.get(&format!("/suppliers/{id}")).await
    }

    pub async fn create(&self, input: &SupplierInput) -> ClientResult<Supplier> {
        let supplier: Supplier = self.gateway.post("/suppliers", input).await?;
        tracing::info!(supplier_id = %supplier.id, "supplier created");
        Ok(supplier)
    }

    pub async fn update(&self, id: SupplierId, input: &SupplierInput) -> ClientResult<Supplier> {
        let supplier = self.gateway.put(&format!("/suppliers/{id}"), input).await?;
        tracing::info!(supplier_id = %id, "supplier updated");
        Ok(supplier)
    }

    pub async fn remove(&self, id: SupplierId) -> ClientResult<()> {
        self.gateway.delete(&format!("/suppliers/{id}")).await?;
        tracing::info!(supplier_id = %id, "supplier removed");
        Ok(())
    }

    pub async fn toggle_status(&self, id: SupplierId, active: bool) -> ClientResult<Supplier> {
        let supplier = self
            .gateway
            .patch(&format!("/suppliers/{id}/status"), &json!({ "active": active }))
            .await?;
        tracing::info!(supplier_id = %id, active, "supplier status changed");
        Ok(supplier)
    }
}
