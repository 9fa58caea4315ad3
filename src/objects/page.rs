use serde::{Deserialize, Serialize};

/// A page of results from a list endpoint.
///
/// List endpoints paginate with opaque cursors (`endingBefore` /
/// `startingAfter`); this type carries one page plus the paging hints the
/// API returns alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerates_missing_paging_hints() {
        let page: PaginatedResponse<String> =
            serde_json::from_str(r#"{"data":["a","b"]}"#).unwrap();
        assert_eq!(page.data, ["a", "b"]);
        assert_eq!(page.has_more, None);
    }

    #[test]
    fn defaults_to_an_empty_page() {
        let page: PaginatedResponse<String> = serde_json::from_str("{}").unwrap();
        assert!(page.data.is_empty());
    }
}
