use crate::collection::CollectionItem;
use crate::controller::ListController;

/// Policy deciding when a surface asks its controller for the next page.
///
/// `Manual` is the explicit load-more affordance; `Proximity` is the
/// scrolled-near-the-end sentinel (the terminal analog of an intersection
/// observer watching a loader element below the grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTrigger {
    Manual,
    Proximity { lead: usize },
}

impl LoadTrigger {
    /// Whether the manual load-more affordance is currently actionable.
    pub fn manual_enabled<T: CollectionItem>(&self, controller: &ListController<T>) -> bool {
        matches!(self, LoadTrigger::Manual) && controller.can_load_more()
    }

    /// Called after every cursor move with the index of the focused row.
    ///
    /// Fires when the cursor comes within `lead` rows of the end of the
    /// loaded items. The guard is the controller state itself, not a
    /// one-shot flag: while a fetch is outstanding `can_load_more` is
    /// false, and once it completes with the cursor still in the sentinel
    /// region the next call fires again.
    pub fn should_load<T: CollectionItem>(
        &self,
        controller: &ListController<T>,
        cursor: usize,
    ) -> bool {
        match self {
            LoadTrigger::Manual => false,
            LoadTrigger::Proximity { lead } => {
                if !controller.can_load_more() {
                    return false;
                }
                let len = controller.items().len();
                len > 0 && cursor + lead + 1 >= len
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::PagedCollection;

    #[derive(Debug, Clone)]
    struct Entry(u64);

    impl CollectionItem for Entry {
        fn id(&self) -> u64 {
            self.0
        }

        fn matches_slug(&self, _slug: &str) -> bool {
            false
        }
    }

    fn controller(len: u64, next: Option<&str>) -> ListController<Entry> {
        let page: PagedCollection<Entry> = foliodeck_api::Page {
            count: len,
            total_pages: None,
            current_page: None,
            page_size: None,
            next: next.map(String::from),
            previous: None,
            results: (0..len).map(Entry).collect(),
        }
        .into();
        ListController::new(page)
    }

    #[test]
    fn proximity_fires_near_the_end() {
        let trigger = LoadTrigger::Proximity { lead: 3 };
        let controller = controller(12, Some("p2"));

        assert!(!trigger.should_load(&controller, 0));
        assert!(!trigger.should_load(&controller, 7));
        assert!(trigger.should_load(&controller, 8));
        assert!(trigger.should_load(&controller, 11));
    }

    #[test]
    fn proximity_respects_controller_state() {
        let trigger = LoadTrigger::Proximity { lead: 3 };

        // exhausted: nothing left to fetch
        let exhausted = controller(12, None);
        assert!(!trigger.should_load(&exhausted, 11));

        // fetching: guard is the state check, so no re-trigger while the
        // sentinel region is still in view
        let mut fetching = controller(12, Some("p2"));
        let _request = fetching.load_more().unwrap();
        assert!(!trigger.should_load(&fetching, 11));
    }

    #[test]
    fn proximity_rearms_after_fetch_completes() {
        let trigger = LoadTrigger::Proximity { lead: 3 };
        let mut c = controller(12, Some("p2"));

        let request = c.load_more().unwrap();
        assert!(!trigger.should_load(&c, 11));

        let next_page: PagedCollection<Entry> = foliodeck_api::Page {
            count: 24,
            total_pages: None,
            current_page: None,
            page_size: None,
            next: Some("p3".to_string()),
            previous: None,
            results: (12..24).map(Entry).collect(),
        }
        .into();
        c.complete(request.seq, Ok(next_page));

        // cursor still near the old end: no fire (plenty of new rows below)
        assert!(!trigger.should_load(&c, 11));
        // but deep into the appended rows it fires again
        assert!(trigger.should_load(&c, 21));
    }

    #[test]
    fn manual_never_autofires() {
        let trigger = LoadTrigger::Manual;
        let c = controller(12, Some("p2"));
        assert!(!trigger.should_load(&c, 11));
        assert!(trigger.manual_enabled(&c));
    }

    #[test]
    fn manual_disabled_when_exhausted_or_fetching() {
        let trigger = LoadTrigger::Manual;

        let exhausted = controller(12, None);
        assert!(!trigger.manual_enabled(&exhausted));

        let mut fetching = controller(12, Some("p2"));
        let _request = fetching.load_more().unwrap();
        assert!(!trigger.manual_enabled(&fetching));
    }

    #[test]
    fn empty_list_never_triggers() {
        let trigger = LoadTrigger::Proximity { lead: 3 };
        let empty = controller(0, Some("p2"));
        assert!(!trigger.should_load(&empty, 0));
    }
}
