use serde::Deserialize;
use url::Url;

/// Page selection for list endpoints. Defaults to page 1 with 20 items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Pagination {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 20;

    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    pub(crate) fn apply(&self, url: &mut Url) {
        url.query_pairs_mut()
            .append_pair("page", &self.page.to_string())
            .append_pair("limit", &self.limit.to_string());
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_LIMIT)
    }
}

/// List responses wrap their items in `data`; a missing or null field reads as empty.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    data: Option<Vec<T>>,
}

impl<T> DataEnvelope<T> {
    pub(crate) fn into_items(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_appends_page_and_limit() {
        let mut url = Url::parse("http://localhost/v1/datasets").unwrap();
        Pagination::new(3, 50).apply(&mut url);
        assert_eq!(url.query(), Some("page=3&limit=50"));
    }

    #[test]
    fn envelope_without_data_is_empty() {
        let envelope: DataEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"has_more": false}"#).unwrap();
        assert!(envelope.into_items().is_empty());

        let envelope: DataEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(envelope.into_items().is_empty());
    }
}
