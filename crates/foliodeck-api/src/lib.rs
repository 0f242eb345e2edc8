// HTTP clients for the blog/portfolio REST backend
pub mod blog;
pub mod envelope;
pub mod http;
pub mod portfolio;

// Re-export common types
pub use blog::{BlogClient, Comment, NewComment, Post, PostQuery};
pub use envelope::{Detail, Page};
pub use http::{ApiError, DEFAULT_API_BASE};
pub use portfolio::{PortfolioClient, Project, ProjectQuery, Technology};
