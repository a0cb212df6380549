use serde::{Deserialize, Serialize};

/// Postal address as shown in forms. Every field is present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl Address {
    pub fn is_blank(&self) -> bool {
        [
            &self.street,
            &self.number,
            &self.complement,
            &self.neighborhood,
            &self.city,
            &self.state,
            &self.zip_code,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }

    /// One-line rendering, skipping empty parts: `Rua A, 10 - Centro - Recife/PE`.
    pub fn single_line(&self) -> String {
        let street = join_non_empty(&[&self.street, &self.number], ", ");
        let city = join_non_empty(&[&self.city, &self.state], "/");
        join_non_empty(&[&street, &self.neighborhood, &city], " - ")
    }
}

fn join_non_empty(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_skips_missing_parts() {
        let address = Address {
            street: "Rua A".into(),
            number: "10".into(),
            neighborhood: "Centro".into(),
            city: "Recife".into(),
            state: "PE".into(),
            ..Address::default()
        };
        assert_eq!(address.single_line(), "Rua A, 10 - Centro - Recife/PE");

        let partial = Address {
            city: "Olinda".into(),
            ..Address::default()
        };
        assert_eq!(partial.single_line(), "Olinda");
        assert!(Address::default().is_blank());
    }
}
