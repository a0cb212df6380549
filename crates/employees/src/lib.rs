//! Human resources: employee records (`/employees`).

pub mod employee;
pub mod service;
pub mod stats;

pub use employee::{Employee, EmployeeInput, EmployeeStatus};
pub use service::{EmployeeFilter, EmployeeService};
pub use stats::{EmployeeStats, compute_employee_stats};
