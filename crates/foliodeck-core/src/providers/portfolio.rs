// Portfolio provider - bridges PortfolioClient with the PageSource trait
use async_trait::async_trait;
use foliodeck_api::{PortfolioClient, Project, ProjectQuery};

use crate::{collection::PagedCollection, filter::Filter, providers::PageSource, Result};

/// Wrapper around PortfolioClient that implements PageSource for projects
pub struct ProjectSource {
    client: PortfolioClient,
}

impl ProjectSource {
    pub fn new(client: PortfolioClient) -> Self {
        Self { client }
    }
}

fn query_for(filter: &Filter, page: u32, page_size: Option<u32>) -> ProjectQuery {
    let mut query = ProjectQuery {
        page: Some(page),
        page_size,
        ..ProjectQuery::default()
    };
    match filter {
        Filter::None => {}
        Filter::Technology { slug } => query.technology = Some(slug.clone()),
        Filter::Search { query: text } => query.search = Some(text.clone()),
    }
    query
}

#[async_trait]
impl PageSource<Project> for ProjectSource {
    async fn fetch_page(
        &self,
        filter: &Filter,
        page: u32,
        page_size: Option<u32>,
    ) -> Result<PagedCollection<Project>> {
        let query = query_for(filter, page, page_size);
        let fetched = self.client.list_projects(&query).await?;
        Ok(fetched.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn technology_filter_maps_to_canonical_key() {
        let query = query_for(&Filter::technology("django"), 1, Some(12));
        assert_eq!(
            query.to_pairs(),
            vec![
                ("technologies__slug", "django".to_string()),
                ("page", "1".to_string()),
                ("page_size", "12".to_string()),
            ]
        );
    }

    #[test]
    fn search_filter_maps_to_search_key() {
        let query = query_for(&Filter::search("planner"), 3, None);
        assert_eq!(query.search.as_deref(), Some("planner"));
        assert_eq!(query.page, Some(3));
        assert!(query.technology.is_none());
    }
}
