use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::envelope::{Detail, Page};
use crate::http::{build_client, read_json, Result, DEFAULT_API_BASE};

/// Words-per-minute used for the derived reading time.
const WORDS_PER_MINUTE: u32 = 200;

#[derive(Clone)]
pub struct BlogClient {
    client: reqwest::Client,
    base_url: String,
}

impl BlogClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE.to_string())
    }

    /// For deployments that serve the API somewhere else
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: build_client(),
            base_url,
        }
    }

    /// List posts, optionally filtered: `GET /blog/posts/?<query>`
    ///
    /// Every returned post carries its derived reading time and word count.
    pub async fn list_posts(&self, query: &PostQuery) -> Result<Page<Post>> {
        let url = format!("{}/blog/posts/", self.base_url);
        debug!(%url, "listing posts");

        let response = self.client.get(&url).query(&query.to_pairs()).send().await?;
        let mut page: Page<Post> = read_json(response, "posts").await?;

        for post in &mut page.results {
            post.enhance();
        }
        Ok(page)
    }

    /// Fetch a single post by slug: `GET /blog/posts/{slug}/`
    ///
    /// The backend answers this route in two envelope shapes; both are
    /// handled by [`Detail`]. A missing slug maps to `ApiError::NotFound`.
    pub async fn get_post(&self, slug: &str) -> Result<Post> {
        let url = format!(
            "{}/blog/posts/{}/",
            self.base_url,
            urlencoding::encode(slug)
        );
        debug!(%url, "fetching post");

        let response = self.client.get(&url).send().await?;
        let detail: Detail<Post> = read_json(response, &format!("post '{}'", slug)).await?;

        let mut post = detail.into_inner();
        post.enhance();
        Ok(post)
    }

    /// Submit a comment on a post: `POST /blog/posts/{slug}/comments/`
    pub async fn create_comment(&self, slug: &str, comment: &NewComment) -> Result<Comment> {
        let url = format!(
            "{}/blog/posts/{}/comments/",
            self.base_url,
            urlencoding::encode(slug)
        );
        debug!(%url, "submitting comment");

        let response = self.client.post(&url).json(comment).send().await?;
        read_json(response, &format!("post '{}'", slug)).await
    }

    /// Featured posts, newest first
    pub async fn featured_posts(&self) -> Result<Vec<Post>> {
        let query = PostQuery {
            is_featured: Some(true),
            ordering: Some("-published_date".to_string()),
            ..PostQuery::default()
        };
        Ok(self.list_posts(&query).await?.results)
    }

    /// Most recent posts, capped at `limit`
    pub async fn recent_posts(&self, limit: u32) -> Result<Vec<Post>> {
        let query = PostQuery {
            page_size: Some(limit),
            ordering: Some("-published_date".to_string()),
            ..PostQuery::default()
        };
        Ok(self.list_posts(&query).await?.results)
    }

    /// All blog categories: `GET /blog/categories/`
    pub async fn categories(&self) -> Result<Vec<Category>> {
        let url = format!("{}/blog/categories/", self.base_url);
        let response = self.client.get(&url).send().await?;
        let page: Page<Category> = read_json(response, "categories").await?;
        Ok(page.results)
    }

    /// All blog tags: `GET /blog/tags/`
    pub async fn tags(&self) -> Result<Vec<Tag>> {
        let url = format!("{}/blog/tags/", self.base_url);
        let response = self.client.get(&url).send().await?;
        let page: Page<Tag> = read_json(response, "tags").await?;
        Ok(page.results)
    }
}

impl Default for BlogClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Filters for post listings.
///
/// A key appears in the query string only when its value is set; omission,
/// not null, is how "no filter" is encoded.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    /// Category slug (`category__slug`)
    pub category: Option<String>,
    /// Tag slug (`tags__slug`)
    pub tag: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub is_featured: Option<bool>,
    pub ordering: Option<String>,
}

impl PostQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category__slug", category.clone()));
        }
        if let Some(tag) = &self.tag {
            pairs.push(("tags__slug", tag.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("page_size", page_size.to_string()));
        }
        if let Some(is_featured) = self.is_featured {
            pairs.push(("is_featured", is_featured.to_string()));
        }
        if let Some(ordering) = &self.ordering {
            pairs.push(("ordering", ordering.clone()));
        }
        pairs
    }
}

/// Embedded category/tag reference on a post: `{name, slug}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TermRef {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    pub category: TermRef,
    #[serde(default)]
    pub tags: Vec<TermRef>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub published_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Derived locally at fetch time, never sent by the server
    #[serde(default)]
    pub reading_time: Option<u32>,
    #[serde(default)]
    pub word_count: Option<u32>,
}

impl Post {
    /// Attach the derived reading stats. Called once per fetch; the values
    /// stay with the post for its in-memory lifetime.
    pub fn enhance(&mut self) {
        let words = self.content.split_whitespace().count() as u32;
        self.word_count = Some(words);
        self.reading_time = Some((words + WORDS_PER_MINUTE - 1) / WORDS_PER_MINUTE);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_approved: bool,
    pub post: u64,
}

/// Body for `POST /blog/posts/{slug}/comments/`
#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub name: String,
    pub email: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_POST: &str = r#"{
        "id": 1,
        "title": "Shipping a Side Project",
        "slug": "shipping-a-side-project",
        "content": "one two three four",
        "excerpt": "Lessons learned.",
        "featured_image": null,
        "category": {"name": "Engineering", "slug": "engineering"},
        "tags": [{"name": "React", "slug": "react"}],
        "status": "published",
        "published_date": "2024-03-01T09:00:00Z",
        "created_at": "2024-02-20T10:00:00Z",
        "updated_at": "2024-03-01T09:00:00Z",
        "meta_description": "",
        "is_featured": true,
        "comments": []
    }"#;

    #[test]
    fn query_omits_unset_keys() {
        let query = PostQuery {
            tag: Some("react".to_string()),
            page: Some(2),
            ..PostQuery::default()
        };
        let pairs = query.to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("tags__slug", "react".to_string()),
                ("page", "2".to_string()),
            ]
        );
    }

    #[test]
    fn empty_query_has_no_pairs() {
        assert!(PostQuery::default().to_pairs().is_empty());
    }

    #[test]
    fn query_includes_featured_and_ordering() {
        let query = PostQuery {
            is_featured: Some(false),
            ordering: Some("-published_date".to_string()),
            ..PostQuery::default()
        };
        let pairs = query.to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("is_featured", "false".to_string()),
                ("ordering", "-published_date".to_string()),
            ]
        );
    }

    #[test]
    fn post_deserializes_from_backend_shape() {
        let post: Post = serde_json::from_str(SAMPLE_POST).unwrap();
        assert_eq!(post.slug, "shipping-a-side-project");
        assert_eq!(post.category.slug, "engineering");
        assert_eq!(post.tags[0].slug, "react");
        assert!(post.is_featured);
        assert!(post.reading_time.is_none());
    }

    #[test]
    fn post_deserializes_from_wrapped_detail() {
        let wrapped = format!(
            r#"{{"status": "success", "data": {}, "message": "found"}}"#,
            SAMPLE_POST
        );
        let detail: Detail<Post> = serde_json::from_str(&wrapped).unwrap();
        assert_eq!(detail.into_inner().id, 1);

        let bare: Detail<Post> = serde_json::from_str(SAMPLE_POST).unwrap();
        assert_eq!(bare.into_inner().id, 1);
    }

    #[test]
    fn enhance_computes_reading_stats() {
        let mut post: Post = serde_json::from_str(SAMPLE_POST).unwrap();
        post.enhance();
        assert_eq!(post.word_count, Some(4));
        // 4 words at 200 wpm still rounds up to one minute
        assert_eq!(post.reading_time, Some(1));
    }

    #[test]
    fn enhance_handles_empty_content() {
        let mut post: Post = serde_json::from_str(SAMPLE_POST).unwrap();
        post.content = String::new();
        post.enhance();
        assert_eq!(post.word_count, Some(0));
        assert_eq!(post.reading_time, Some(0));
    }

    #[test]
    fn enhance_rounds_up() {
        let mut post: Post = serde_json::from_str(SAMPLE_POST).unwrap();
        post.content = vec!["word"; 201].join(" ");
        post.enhance();
        assert_eq!(post.reading_time, Some(2));
    }
}
