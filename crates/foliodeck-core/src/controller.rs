use tracing::{debug, warn};

use crate::collection::{CollectionItem, PagedCollection};
use crate::filter::Filter;

/// Controller state. One outstanding fetch at most: `Fetching` is the
/// backpressure mechanism - transition requests issued while fetching are
/// dropped, not queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Ready,
    Fetching,
    Exhausted,
    Failed(String),
}

/// A fetch the controller wants performed.
///
/// `seq` is the staleness token: responses are handed back through
/// [`ListController::complete`] together with the seq they belong to, and
/// anything but the outstanding seq is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub seq: u64,
    pub filter: Filter,
    pub page: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    /// First page under a (possibly new) filter; replaces held items.
    Replace,
    /// Next page under the current filter; appended to held items.
    Append,
}

#[derive(Debug, Clone)]
struct InFlight {
    request: PageRequest,
    kind: FetchKind,
}

/// Owns the paging and filter state of one list surface.
///
/// The controller never performs IO. Transitions hand back a [`PageRequest`]
/// for the caller to execute (see `providers::drive`); the response comes
/// back through [`complete`](Self::complete). All transitions happen on
/// discrete callbacks, so there is no interior locking.
pub struct ListController<T> {
    collection: PagedCollection<T>,
    filter: Filter,
    page: u32,
    state: FetchState,
    in_flight: Option<InFlight>,
    seq: u64,
}

impl<T: CollectionItem> ListController<T> {
    /// Seed with a server-provided first page (page 1, no filter).
    pub fn new(initial: PagedCollection<T>) -> Self {
        let state = if initial.has_more() {
            FetchState::Ready
        } else {
            FetchState::Exhausted
        };
        Self {
            collection: initial,
            filter: Filter::None,
            page: 1,
            state,
            in_flight: None,
            seq: 0,
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn is_fetching(&self) -> bool {
        self.state == FetchState::Fetching
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// All held items in arrival order.
    pub fn items(&self) -> &[T] {
        self.collection.items()
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.collection.has_more()
    }

    pub fn total_count(&self) -> u64 {
        self.collection.total_count()
    }

    pub fn can_load_more(&self) -> bool {
        self.state == FetchState::Ready && self.collection.has_more()
    }

    /// Switch the active filter and request page 1 under it.
    ///
    /// Held items are discarded immediately; the surface shows its loading
    /// state until the response lands. Dropped (returns None) while a fetch
    /// is outstanding.
    pub fn apply_filter(&mut self, filter: Filter) -> Option<PageRequest> {
        if self.state == FetchState::Fetching {
            debug!(%filter, "filter change dropped while fetching");
            return None;
        }
        self.collection = PagedCollection::empty();
        self.page = 1;
        Some(self.issue(filter, 1, FetchKind::Replace))
    }

    /// Request the next page under the current filter.
    ///
    /// Valid only when Ready with more pages available; anything else is a
    /// no-op, which is what swallows duplicate requests from rapid scroll
    /// events.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if !self.can_load_more() {
            debug!(state = ?self.state, "load_more ignored");
            return None;
        }
        let filter = self.filter.clone();
        let page = self.page + 1;
        Some(self.issue(filter, page, FetchKind::Append))
    }

    /// Re-issue the request that failed. Valid only from Failed.
    pub fn retry(&mut self) -> Option<PageRequest> {
        if !matches!(self.state, FetchState::Failed(_)) {
            return None;
        }
        let failed = self.in_flight.take()?;
        Some(self.issue(failed.request.filter, failed.request.page, failed.kind))
    }

    fn issue(&mut self, filter: Filter, page: u32, kind: FetchKind) -> PageRequest {
        self.seq += 1;
        let request = PageRequest {
            seq: self.seq,
            filter,
            page,
        };
        self.in_flight = Some(InFlight {
            request: request.clone(),
            kind,
        });
        self.state = FetchState::Fetching;
        request
    }

    /// Feed a fetch result back into the machine.
    ///
    /// Responses that do not carry the outstanding seq are stale (they
    /// belong to an abandoned request) and are discarded without touching
    /// state.
    pub fn complete(&mut self, seq: u64, result: crate::Result<PagedCollection<T>>) {
        if self.state != FetchState::Fetching {
            debug!(seq, "response ignored: no fetch outstanding");
            return;
        }
        let Some(in_flight) = self.in_flight.take() else {
            return;
        };
        if in_flight.request.seq != seq {
            debug!(
                seq,
                outstanding = in_flight.request.seq,
                "stale response discarded"
            );
            self.in_flight = Some(in_flight);
            return;
        }

        match result {
            Ok(fetched) => {
                let exhausted = !fetched.has_more();
                match in_flight.kind {
                    FetchKind::Replace => {
                        self.filter = in_flight.request.filter;
                        self.collection = fetched;
                        self.page = 1;
                    }
                    FetchKind::Append => {
                        self.collection.append(fetched);
                        self.page = in_flight.request.page;
                    }
                }
                self.state = if exhausted {
                    FetchState::Exhausted
                } else {
                    FetchState::Ready
                };
            }
            Err(err) => {
                warn!(page = in_flight.request.page, %err, "page fetch failed");
                self.state = FetchState::Failed(err.to_string());
                // kept so retry() can re-issue the same request
                self.in_flight = Some(in_flight);
            }
        }
    }

    /// Items the surface should render under the active filter.
    ///
    /// When the collection was fetched server-side-filtered this is a
    /// no-op pass-through; it only narrows when the controller holds an
    /// unfiltered superset (legacy local-filter mode). Search filters are
    /// never narrowed locally - the server matches fields (content bodies)
    /// the client cannot see into.
    pub fn visible_items(&self) -> Vec<&T> {
        match &self.filter {
            Filter::Technology { slug } => self
                .collection
                .items()
                .iter()
                .filter(|item| item.matches_slug(slug))
                .collect(),
            Filter::None | Filter::Search { .. } => self.collection.items().iter().collect(),
        }
    }
}
