//! Headcount and payroll cards.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::employee::Employee;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmployeeStats {
    pub headcount: usize,
    pub active: usize,
    pub on_leave: usize,
    /// Monthly salaries of everyone still employed.
    pub payroll: Decimal,
    /// `payroll / employed`, zero when nobody is employed.
    pub average_salary: Decimal,
    /// Employed people per department; blank departments are grouped as "-".
    pub by_department: BTreeMap<String, usize>,
}

pub fn compute_employee_stats(employees: &[Employee]) -> EmployeeStats {
    let mut stats = EmployeeStats {
        headcount: employees.len(),
        ..EmployeeStats::default()
    };
    let mut employed = 0usize;

    for employee in employees.iter().filter(|e| e.status.is_employed()) {
        employed += 1;
        if employee.status.is_on_leave() {
            stats.on_leave += 1;
        } else {
            stats.active += 1;
        }
        stats.payroll += employee.salario;

        let department = employee.departamento.trim();
        let key = if department.is_empty() { "-" } else { department };
        *stats.by_department.entry(key.to_string()).or_default() += 1;
    }

    if employed > 0 {
        stats.average_salary = (stats.payroll / Decimal::from(employed)).round_dp(2);
    }
    stats
}
