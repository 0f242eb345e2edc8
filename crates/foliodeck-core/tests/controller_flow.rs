// End-to-end controller sessions against a scripted page source
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use foliodeck_api::{Page, Post};
use foliodeck_core::providers::{drive, PageSource};
use foliodeck_core::{Error, FetchState, Filter, ListController, LoadTrigger, PagedCollection};

fn post(id: u64, tag: &str) -> Post {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": format!("Post {}", id),
        "slug": format!("post-{}", id),
        "content": "a few words of content",
        "category": {"name": "Engineering", "slug": "engineering"},
        "tags": [{"name": tag, "slug": tag}],
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    }))
    .expect("post fixture should deserialize")
}

fn page_of(posts: Vec<Post>, count: u64, next: Option<&str>) -> PagedCollection<Post> {
    Page {
        count,
        total_pages: None,
        current_page: None,
        page_size: None,
        next: next.map(String::from),
        previous: None,
        results: posts,
    }
    .into()
}

/// A backend with 24 unfiltered posts (two pages of 12), of which 5 carry
/// the "react" tag. Fails the first `failures` calls.
struct ScriptedSource {
    failures: AtomicU32,
    calls: AtomicU32,
}

impl ScriptedSource {
    fn new() -> Self {
        Self::failing(0)
    }

    fn failing(failures: u32) -> Self {
        Self {
            failures: AtomicU32::new(failures),
            calls: AtomicU32::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource<Post> for ScriptedSource {
    async fn fetch_page(
        &self,
        filter: &Filter,
        page: u32,
        page_size: Option<u32>,
    ) -> foliodeck_core::Result<PagedCollection<Post>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failures.load(Ordering::SeqCst) > 0 {
            self.failures.fetch_sub(1, Ordering::SeqCst);
            return Err(Error::ApiError("backend unavailable".to_string()));
        }

        let size = page_size.unwrap_or(12) as u64;
        match filter {
            Filter::Technology { slug } if slug == "react" => {
                // all matches fit on one page
                let posts = (0..5).map(|i| post(100 + i, "react")).collect();
                Ok(page_of(posts, 5, None))
            }
            Filter::Search { .. } => {
                let posts = (0..3).map(|i| post(200 + i, "misc")).collect();
                Ok(page_of(posts, 3, None))
            }
            _ => {
                let start = (u64::from(page) - 1) * size;
                let posts = (start..start + size).map(|i| post(i, "misc")).collect();
                let next = if page == 1 { Some("?page=2") } else { None };
                Ok(page_of(posts, 24, next))
            }
        }
    }
}

async fn seeded(source: &ScriptedSource) -> ListController<Post> {
    let first = source
        .fetch_page(&Filter::None, 1, Some(12))
        .await
        .expect("seed page should fetch");
    ListController::new(first)
}

#[tokio::test]
async fn proximity_session_loads_until_exhausted() {
    let source = ScriptedSource::new();
    let trigger = LoadTrigger::Proximity { lead: 3 };
    let mut controller = seeded(&source).await;

    // cursor wanders toward the end of the first page
    let mut cursor = 0;
    while cursor < 12 {
        if trigger.should_load(&controller, cursor) {
            let request = controller.load_more().expect("trigger checked state");
            drive(&mut controller, &source, request, Some(12)).await;
        }
        cursor += 1;
    }

    assert_eq!(*controller.state(), FetchState::Exhausted);
    assert_eq!(controller.items().len(), 24);
    // seed + exactly one follow-up fetch, no duplicate page requests
    assert_eq!(source.calls(), 2);
    assert!(controller.load_more().is_none());
}

#[tokio::test]
async fn filter_session_resets_to_matching_first_page() {
    let source = ScriptedSource::new();
    let mut controller = seeded(&source).await;

    // scroll the full unfiltered set in first
    let request = controller.load_more().unwrap();
    drive(&mut controller, &source, request, Some(12)).await;
    assert_eq!(controller.items().len(), 24);

    let request = controller
        .apply_filter(Filter::technology("react"))
        .expect("controller is idle");
    assert_eq!(request.page, 1);
    drive(&mut controller, &source, request, Some(12)).await;

    assert_eq!(*controller.state(), FetchState::Exhausted);
    assert_eq!(controller.items().len(), 5);
    assert!(!controller.has_more());
    assert!(controller
        .items()
        .iter()
        .all(|p| p.tags.iter().any(|t| t.slug == "react")));
    // the local view agrees with the server-side filter
    assert_eq!(controller.visible_items().len(), 5);
}

#[tokio::test]
async fn failed_load_recovers_through_retry() {
    let source = ScriptedSource::failing(0);
    let mut controller = seeded(&source).await;

    let flaky = ScriptedSource::failing(1);
    let request = controller.load_more().unwrap();
    drive(&mut controller, &flaky, request, Some(12)).await;

    assert!(matches!(controller.state(), FetchState::Failed(_)));
    assert_eq!(
        controller.error_message(),
        Some("API request failed: backend unavailable")
    );
    assert_eq!(controller.items().len(), 12);
    assert_eq!(controller.page(), 1);

    // only retry is accepted from Failed
    assert!(controller.load_more().is_none());

    let retried = controller.retry().expect("failed state allows retry");
    assert_eq!(retried.page, 2);
    drive(&mut controller, &flaky, retried, Some(12)).await;

    assert_eq!(*controller.state(), FetchState::Exhausted);
    assert_eq!(controller.items().len(), 24);
    assert_eq!(controller.page(), 2);
}

#[tokio::test]
async fn search_session_replaces_items() {
    let source = ScriptedSource::new();
    let mut controller = seeded(&source).await;

    let request = controller.apply_filter(Filter::search("rust")).unwrap();
    drive(&mut controller, &source, request, Some(12)).await;

    assert_eq!(controller.items().len(), 3);
    assert_eq!(*controller.filter(), Filter::search("rust"));
    // search results render unnarrowed
    assert_eq!(controller.visible_items().len(), 3);
}
