// Blog provider - bridges BlogClient with the PageSource trait
use async_trait::async_trait;
use foliodeck_api::{BlogClient, Post, PostQuery};

use crate::{collection::PagedCollection, filter::Filter, providers::PageSource, Result};

/// Wrapper around BlogClient that implements PageSource for posts
pub struct PostSource {
    client: BlogClient,
}

impl PostSource {
    pub fn new(client: BlogClient) -> Self {
        Self { client }
    }
}

/// Map the surface filter onto post query keys.
///
/// A technology filter maps onto the tag slug: the blog side of the
/// backend exposes technologies as tags.
fn query_for(filter: &Filter, page: u32, page_size: Option<u32>) -> PostQuery {
    let mut query = PostQuery {
        page: Some(page),
        page_size,
        ..PostQuery::default()
    };
    match filter {
        Filter::None => {}
        Filter::Technology { slug } => query.tag = Some(slug.clone()),
        Filter::Search { query: text } => query.search = Some(text.clone()),
    }
    query
}

#[async_trait]
impl PageSource<Post> for PostSource {
    async fn fetch_page(
        &self,
        filter: &Filter,
        page: u32,
        page_size: Option<u32>,
    ) -> Result<PagedCollection<Post>> {
        let query = query_for(filter, page, page_size);
        let fetched = self.client.list_posts(&query).await?;
        Ok(fetched.into())
    }
}
