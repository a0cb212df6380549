//! Query-string builder for the list endpoints.
//!
//! Parameters keep the order in which they were pushed. Absent (`None`)
//! filters never reach the query string, so the backend never sees an empty
//! value or a literal `null`.

use crate::page::PageRequest;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a query with the zero-based `page` and explicit `size`.
    pub fn paged(request: PageRequest) -> Self {
        Self::new().push("page", request.page).push("size", request.size)
    }

    pub fn push(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Push `key` only when `value` is present.
    pub fn push_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    /// Push a free-text filter only when it has non-whitespace content.
    pub fn push_text(self, key: &str, value: Option<&str>) -> Self {
        self.push_opt(key, value.map(str::trim).filter(|v| !v.is_empty()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Render as `?k=v&k2=v2` (empty string when there are no parameters).
    pub fn to_query_string(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        format!("?{}", self)
    }

    /// Append the rendered query to a path.
    pub fn append_to(&self, path: &str) -> String {
        format!("{}{}", path, self.to_query_string())
    }
}

impl core::fmt::Display for QueryParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(
                f,
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}
