//! Parties: customers and suppliers.
//!
//! Customers are the one resource whose backend shape (flat, Portuguese,
//! PF/PJ codes) differs structurally from the view model (nested address,
//! derived document and company data); see [`customer`].

pub mod address;
pub mod customer;
pub mod service;
pub mod stats;
pub mod supplier;

pub use address::Address;
pub use customer::{
    BACKEND_UNSUPPORTED_FIELDS, CompanyInfo, Customer, CustomerDto, CustomerInput,
    CustomerPayload, CustomerType, TipoCliente,
};
pub use service::{CustomerFilter, CustomerService, SupplierFilter, SupplierService};
pub use stats::{CustomerStats, compute_customer_stats};
pub use supplier::{Supplier, SupplierInput};
