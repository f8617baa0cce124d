//! Job list filters and their query encoding

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Optional filters accepted by `GET /jobs`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFilters {
    pub company: Option<String>,
    pub title: Option<String>,
    pub source: Option<String>,
}

impl JobFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// True when no filter would reach the query string
    pub fn is_empty(&self) -> bool {
        self.pairs().next().is_none()
    }

    /// Non-empty filters in the fixed company, title, source order
    fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("company", self.company.as_deref()),
            ("title", self.title.as_deref()),
            ("source", self.source.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| match value {
            Some(value) if !value.is_empty() => Some((key, value)),
            _ => None,
        })
    }

    /// Form-encoded query string, empty when no filter is set
    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.pairs() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Endpoint for the jobs listing with these filters applied
    pub fn endpoint(&self) -> String {
        let query = self.query_string();
        if query.is_empty() {
            "/jobs".to_string()
        } else {
            format!("/jobs?{}", query)
        }
    }
}
