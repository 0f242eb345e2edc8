// Page sources bridging the API clients to the list controller
pub mod blog;
pub mod portfolio;

pub use blog::PostSource;
pub use portfolio::ProjectSource;

use crate::collection::{CollectionItem, PagedCollection};
use crate::controller::{ListController, PageRequest};
use crate::filter::Filter;
use crate::Result;

/// Trait for page sources - makes testing easier and keeps things flexible
///
/// The controller only ever hands out [`PageRequest`]s; a page source is
/// the thing that turns one into an HTTP call. Surfaces can swap in fakes
/// without touching the state machine.
#[async_trait::async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch_page(
        &self,
        filter: &Filter,
        page: u32,
        page_size: Option<u32>,
    ) -> Result<PagedCollection<T>>;
}

/// Execute one controller request against a source and feed the result back.
///
/// Failures are not propagated: the controller maps them into its Failed
/// state and the surface renders from there.
pub async fn drive<T: CollectionItem + Send>(
    controller: &mut ListController<T>,
    source: &dyn PageSource<T>,
    request: PageRequest,
    page_size: Option<u32>,
) {
    let result = source
        .fetch_page(&request.filter, request.page, page_size)
        .await;
    controller.complete(request.seq, result);
}
