//! Customer summary cards.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::customer::{Customer, CustomerType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CustomerStats {
    pub total_customers: usize,
    pub active_customers: usize,
    pub individual_customers: usize,
    pub business_customers: usize,
    /// Registered in the same calendar month as `today`.
    pub new_this_month: usize,
}

pub fn compute_customer_stats(customers: &[Customer], today: NaiveDate) -> CustomerStats {
    let mut stats = CustomerStats::default();
    for customer in customers {
        stats.total_customers += 1;
        if customer.active {
            stats.active_customers += 1;
        }
        match customer.customer_type {
            CustomerType::Individual => stats.individual_customers += 1,
            CustomerType::Business => stats.business_customers += 1,
        }
        if customer
            .registration_date
            .is_some_and(|d| d.year() == today.year() && d.month() == today.month())
        {
            stats.new_this_month += 1;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::CustomerDto;
    use serde_json::json;

    #[test]
    fn empty_list() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(compute_customer_stats(&[], today), CustomerStats::default());
    }

    #[test]
    fn counts_by_type_and_month() {
        let customers: Vec<Customer> = [
            json!({ "id": 1, "tipoCliente": "PF", "dataCadastro": "2024-06-01" }),
            json!({ "id": 2, "tipoCliente": "PJ", "ativo": false, "dataCadastro": "2023-06-20" }),
            json!({ "id": 3, "tipoCliente": "PF" }),
        ]
        .into_iter()
        .map(|v| serde_json::from_value::<CustomerDto>(v).unwrap().into())
        .collect();

        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let stats = compute_customer_stats(&customers, today);
        assert_eq!(stats.total_customers, 3);
        assert_eq!(stats.active_customers, 2);
        assert_eq!(stats.individual_customers, 2);
        assert_eq!(stats.business_customers, 1);
        assert_eq!(stats.new_this_month, 1);
    }
}
