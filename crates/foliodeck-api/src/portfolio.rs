use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::envelope::{Detail, Page};
use crate::http::{build_client, read_json, Result, DEFAULT_API_BASE};

#[derive(Clone)]
pub struct PortfolioClient {
    client: reqwest::Client,
    base_url: String,
}

impl PortfolioClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: build_client(),
            base_url,
        }
    }

    /// List projects, optionally filtered: `GET /portfolio/projects/?<query>`
    pub async fn list_projects(&self, query: &ProjectQuery) -> Result<Page<Project>> {
        let url = format!("{}/portfolio/projects/", self.base_url);
        debug!(%url, "listing projects");

        let response = self.client.get(&url).query(&query.to_pairs()).send().await?;
        read_json(response, "projects").await
    }

    /// Fetch a single project by slug: `GET /portfolio/projects/{slug}/`
    pub async fn get_project(&self, slug: &str) -> Result<Project> {
        let url = format!(
            "{}/portfolio/projects/{}/",
            self.base_url,
            urlencoding::encode(slug)
        );
        debug!(%url, "fetching project");

        let response = self.client.get(&url).send().await?;
        let detail: Detail<Project> = read_json(response, &format!("project '{}'", slug)).await?;
        Ok(detail.into_inner())
    }

    /// All technologies: `GET /portfolio/technologies/`
    pub async fn technologies(&self) -> Result<Vec<Technology>> {
        let url = format!("{}/portfolio/technologies/", self.base_url);
        let response = self.client.get(&url).send().await?;
        let page: Page<Technology> = read_json(response, "technologies").await?;
        Ok(page.results)
    }

    /// Featured projects in display order
    pub async fn featured_projects(&self) -> Result<Vec<Project>> {
        let query = ProjectQuery {
            is_featured: Some(true),
            ordering: Some("order".to_string()),
            ..ProjectQuery::default()
        };
        Ok(self.list_projects(&query).await?.results)
    }
}

impl Default for PortfolioClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Filters for project listings.
///
/// The backend has been seen accepting both `technologies__slug` and
/// `technology__slug`; this client emits only the former.
#[derive(Debug, Clone, Default)]
pub struct ProjectQuery {
    /// Technology slug (`technologies__slug`)
    pub technology: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub is_featured: Option<bool>,
    pub ordering: Option<String>,
}

impl ProjectQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(technology) = &self.technology {
            pairs.push(("technologies__slug", technology.clone()));
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

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Technology {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectImage {
    pub id: u64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub technologies: Vec<Technology>,
    #[serde(default)]
    pub project_url: String,
    #[serde(default)]
    pub github_url: String,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub images: Vec<ProjectImage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PROJECT: &str = r#"{
        "id": 9,
        "title": "Route Planner",
        "slug": "route-planner",
        "description": "Full writeup.",
        "short_description": "Maps and such.",
        "featured_image": "/media/projects/planner.png",
        "technologies": [
            {"id": 1, "name": "React", "slug": "react", "icon": "react"},
            {"id": 2, "name": "Django", "slug": "django", "icon": "django"}
        ],
        "project_url": "https://example.com/planner",
        "github_url": "",
        "is_featured": false,
        "order": 3,
        "created_at": "2024-01-05T08:00:00Z",
        "updated_at": "2024-01-06T08:00:00Z",
        "images": [{"id": 1, "image": "/media/projects/a.png", "caption": "Home", "order": 0}]
    }"#;

    #[test]
    fn query_uses_canonical_technology_key() {
        let query = ProjectQuery {
            technology: Some("react".to_string()),
            ..ProjectQuery::default()
        };
        let pairs = query.to_pairs();
        assert_eq!(pairs, vec![("technologies__slug", "react".to_string())]);
    }

    #[test]
    fn query_omits_unset_keys() {
        let query = ProjectQuery {
            search: Some("cli".to_string()),
            page: Some(3),
            is_featured: Some(true),
            ..ProjectQuery::default()
        };
        let keys: Vec<&str> = query.to_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["search", "page", "is_featured"]);
    }

    #[test]
    fn project_deserializes_from_backend_shape() {
        let project: Project = serde_json::from_str(SAMPLE_PROJECT).unwrap();
        assert_eq!(project.slug, "route-planner");
        assert_eq!(project.technologies.len(), 2);
        assert_eq!(project.technologies[1].slug, "django");
        assert_eq!(project.images[0].caption, "Home");
    }

    #[test]
    fn project_page_deserializes() {
        let body = format!(
            r#"{{"count": 1, "next": null, "previous": null, "results": [{}]}}"#,
            SAMPLE_PROJECT
        );
        let page: Page<Project> = serde_json::from_str(&body).unwrap();
        assert_eq!(page.count, 1);
        assert!(!page.has_more());
    }
}
