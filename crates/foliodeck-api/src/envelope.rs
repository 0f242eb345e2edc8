// Wire envelopes the backend wraps payloads in
use serde::Deserialize;

/// Paginated list envelope: `{count, next, previous, results}`.
///
/// The backend's custom paginator also emits `total_pages`, `current_page`
/// and `page_size`; those are accepted when present but nothing downstream
/// depends on them. `next`/`previous` are opaque URLs or null.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

/// Single-object detail envelope.
///
/// The backend answers detail routes in two shapes: `{status, data, message}`
/// or the bare object. Both are accepted here so the inconsistency never
/// leaks past the client boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Detail<T> {
    Wrapped {
        status: String,
        data: T,
        #[serde(default)]
        message: Option<String>,
    },
    Bare(T),
}

impl<T> Detail<T> {
    pub fn into_inner(self) -> T {
        match self {
            Detail::Wrapped { data, .. } => data,
            Detail::Bare(value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_with_minimal_fields() {
        let page: Page<u32> = serde_json::from_str(
            r#"{"count": 3, "next": "http://x/?page=2", "previous": null, "results": [1, 2]}"#,
        )
        .unwrap();
        assert_eq!(page.count, 3);
        assert!(page.has_more());
        assert_eq!(page.results, vec![1, 2]);
        assert!(page.total_pages.is_none());
    }

    #[test]
    fn page_with_extended_fields() {
        let page: Page<u32> = serde_json::from_str(
            r#"{"count": 24, "total_pages": 2, "current_page": 2, "page_size": 12,
                "next": null, "previous": "http://x/", "results": []}"#,
        )
        .unwrap();
        assert!(!page.has_more());
        assert_eq!(page.total_pages, Some(2));
        assert_eq!(page.current_page, Some(2));
    }

    #[test]
    fn detail_accepts_wrapped_shape() {
        let detail: Detail<u32> =
            serde_json::from_str(r#"{"status": "success", "data": 7, "message": "ok"}"#).unwrap();
        assert_eq!(detail.into_inner(), 7);
    }

    #[test]
    fn detail_accepts_bare_shape() {
        let detail: Detail<u32> = serde_json::from_str("7").unwrap();
        assert_eq!(detail.into_inner(), 7);
    }
}
