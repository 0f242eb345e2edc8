use std::fmt;

/// Active filter for a list surface.
///
/// A closed set instead of loose optional fields: a surface is either
/// unfiltered, narrowed to one technology/tag slug, or narrowed to a
/// free-text search. There is no multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    None,
    Technology {
        slug: String,
    },
    Search {
        query: String,
    },
}

impl Filter {
    pub fn technology(slug: impl Into<String>) -> Self {
        Filter::Technology { slug: slug.into() }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Filter::Search {
            query: query.into(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Filter::None)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::None => write!(f, "all"),
            Filter::Technology { slug } => write!(f, "technology: {}", slug),
            Filter::Search { query } => write!(f, "search: {}", query),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unfiltered() {
        assert!(Filter::default().is_none());
    }

    #[test]
    fn display_names_the_variant() {
        assert_eq!(Filter::technology("react").to_string(), "technology: react");
        assert_eq!(Filter::search("cli tools").to_string(), "search: cli tools");
        assert_eq!(Filter::None.to_string(), "all");
    }
}
