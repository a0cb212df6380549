use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Access profile (`perfil`) of a user.
///
/// Kept as an opaque string so profiles added on the backend still decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: Role = Role(Cow::Borrowed("ADMIN"));
    pub const GERENTE: Role = Role(Cow::Borrowed("GERENTE"));
    pub const VENDEDOR: Role = Role(Cow::Borrowed("VENDEDOR"));
    pub const ESTOQUISTA: Role = Role(Cow::Borrowed("ESTOQUISTA"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_admin(&self) -> bool {
        self.0.eq_ignore_ascii_case("ADMIN")
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_string() {
        assert_eq!(serde_json::to_string(&Role::GERENTE).unwrap(), "\"GERENTE\"");
        let role: Role = serde_json::from_str("\"CAIXA\"").unwrap();
        assert_eq!(role.as_str(), "CAIXA");
    }

    #[test]
    fn admin_check_ignores_case() {
        assert!(Role::new("admin").is_admin());
        assert!(!Role::VENDEDOR.is_admin());
    }
}
