//! Change history of a record (`GET /products/{id}/historico`).

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditOperation {
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id_log: i64,
    pub tabela: String,
    pub operacao: AuditOperation,
    pub registro_id: i64,
    #[serde(default)]
    pub dados_antigos: Option<Value>,
    #[serde(default)]
    pub dados_novos: Option<Value>,
    pub data_hora: NaiveDateTime,
    #[serde(default)]
    pub descricao: String,
}

impl AuditLogEntry {
    /// Top-level fields whose value differs between the old and new snapshot.
    ///
    /// Inserts list every new field, deletes every old one.
    pub fn changed_fields(&self) -> Vec<String> {
        let old = self.dados_antigos.as_ref().and_then(Value::as_object);
        let new = self.dados_novos.as_ref().and_then(Value::as_object);

        let keys: BTreeSet<&String> = old
            .into_iter()
            .flat_map(|m| m.keys())
            .chain(new.into_iter().flat_map(|m| m.keys()))
            .collect();

        keys.into_iter()
            .filter(|key| {
                old.and_then(|m| m.get(key.as_str())) != new.and_then(|m| m.get(key.as_str()))
            })
            .cloned()
            .collect()
    }
}
