use std::collections::HashSet;

use foliodeck_api::{Page, Post, Project};

/// What a list surface needs to know about its items.
///
/// `matches_slug` answers whether the item carries a given technology/tag
/// slug; it backs both the derived local-filter view and nothing else.
pub trait CollectionItem {
    fn id(&self) -> u64;
    fn matches_slug(&self, slug: &str) -> bool;
}

impl CollectionItem for Post {
    fn id(&self) -> u64 {
        self.id
    }

    fn matches_slug(&self, slug: &str) -> bool {
        self.category.slug == slug || self.tags.iter().any(|tag| tag.slug == slug)
    }
}

impl CollectionItem for Project {
    fn id(&self) -> u64 {
        self.id
    }

    fn matches_slug(&self, slug: &str) -> bool {
        self.technologies.iter().any(|tech| tech.slug == slug)
    }
}

/// Items accumulated from one or more pages of a listing.
///
/// Items keep arrival order. `has_more` is derived from the cursor, so
/// `has_more == (next_cursor != None)` holds by construction. The cursor is
/// the backend's opaque `next` URL; nothing here parses it.
#[derive(Debug, Clone)]
pub struct PagedCollection<T> {
    items: Vec<T>,
    total_count: u64,
    next_cursor: Option<String>,
}

impl<T> PagedCollection<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            next_cursor: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

impl<T: CollectionItem> PagedCollection<T> {
    /// Merge a follow-up page onto this collection.
    ///
    /// Order is preserved. Items whose id is already present are dropped:
    /// concurrent writes can shift page offsets and make the backend repeat
    /// rows across pages. Cursor and total count come from the newer page.
    pub fn append(&mut self, newer: PagedCollection<T>) {
        let mut seen: HashSet<u64> = self.items.iter().map(|item| item.id()).collect();
        for item in newer.items {
            if seen.insert(item.id()) {
                self.items.push(item);
            }
        }
        self.total_count = newer.total_count;
        self.next_cursor = newer.next_cursor;
    }
}

impl<T> From<Page<T>> for PagedCollection<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            items: page.results,
            total_count: page.count,
            next_cursor: page.next,
        }
    }
}
