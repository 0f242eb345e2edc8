use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use foliodeck_api::{BlogClient, NewComment, PortfolioClient, PostQuery, ProjectQuery};
use foliodeck_core::{Config, ListController};

#[derive(Parser)]
#[command(name = "foliodeck")]
#[command(version, about = "Terminal browser for a blog and portfolio backend", long_about = None)]
struct Cli {
    /// Override the API base URL from the config file
    #[arg(long)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List blog posts
    Posts {
        /// Filter by category slug
        #[arg(long)]
        category: Option<String>,
        /// Filter by tag slug
        #[arg(long)]
        tag: Option<String>,
        /// Full-text search query
        #[arg(long)]
        search: Option<String>,
        /// Only featured posts
        #[arg(long)]
        featured: bool,
        /// Page to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Items per page
        #[arg(long)]
        page_size: Option<u32>,
        /// Sort order, e.g. -published_date
        #[arg(long)]
        ordering: Option<String>,
        /// Emit raw JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },
    /// List portfolio projects
    Projects {
        /// Filter by technology slug
        #[arg(long)]
        technology: Option<String>,
        /// Full-text search query
        #[arg(long)]
        search: Option<String>,
        /// Only featured projects
        #[arg(long)]
        featured: bool,
        /// Page to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Emit raw JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },
    /// Show a single post or project by slug
    Show {
        /// The slug to look up
        slug: String,
        /// Look in the portfolio instead of the blog
        #[arg(long)]
        project: bool,
        /// Emit raw JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },
    /// List technologies used across projects
    Technologies,
    /// List blog categories and tags
    Taxonomy,
    /// Featured projects and recent posts, like the site front page
    Overview,
    /// Submit a comment on a post
    Comment {
        /// Slug of the post to comment on
        slug: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("FOLIODECK_LOG")
                .unwrap_or_else(|_| "foliodeck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    let base_url = cli
        .api_base
        .unwrap_or_else(|| config.api.base_url.clone());
    let page_size = config.api.page_size;

    let blog = BlogClient::with_base_url(base_url.clone());
    let portfolio = PortfolioClient::with_base_url(base_url);

    match cli.command {
        Some(Commands::Posts {
            category,
            tag,
            search,
            featured,
            page,
            page_size: size_override,
            ordering,
            json,
        }) => {
            let query = PostQuery {
                category,
                tag,
                search,
                is_featured: featured.then_some(true),
                page: Some(page),
                page_size: Some(size_override.unwrap_or(page_size)),
                ordering,
            };
            let result = blog.list_posts(&query).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result.results)?);
            } else {
                println!(
                    "{} posts ({} total, page {})",
                    result.results.len(),
                    result.count,
                    page
                );
                for post in &result.results {
                    let date = post
                        .published_date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "draft".to_string());
                    println!("  {}  {}  [{}]", date, post.title, post.slug);
                }
            }
        }
        Some(Commands::Projects {
            technology,
            search,
            featured,
            page,
            json,
        }) => {
            let query = ProjectQuery {
                technology,
                search,
                is_featured: featured.then_some(true),
                page: Some(page),
                page_size: Some(page_size),
                ..Default::default()
            };
            let result = portfolio.list_projects(&query).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result.results)?);
            } else {
                println!(
                    "{} projects ({} total, page {})",
                    result.results.len(),
                    result.count,
                    page
                );
                for project in &result.results {
                    let techs: Vec<&str> = project
                        .technologies
                        .iter()
                        .map(|t| t.name.as_str())
                        .collect();
                    println!("  {}  [{}]  {}", project.title, project.slug, techs.join(", "));
                }
            }
        }
        Some(Commands::Show {
            slug,
            project,
            json,
        }) => {
            if project {
                let item = portfolio.get_project(&slug).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&item)?);
                } else {
                    println!("{}\n", item.title);
                    println!("{}", item.description);
                    if !item.project_url.is_empty() {
                        println!("\nLive: {}", item.project_url);
                    }
                    if !item.github_url.is_empty() {
                        println!("Source: {}", item.github_url);
                    }
                }
            } else {
                let item = blog.get_post(&slug).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&item)?);
                } else {
                    println!("{}\n", item.title);
                    if let Some(minutes) = item.reading_time {
                        println!("{} min read\n", minutes);
                    }
                    println!("{}", item.content);
                }
            }
        }
        Some(Commands::Technologies) => {
            let techs = portfolio.technologies().await?;
            for tech in &techs {
                println!("  {}  [{}]", tech.name, tech.slug);
            }
        }
        Some(Commands::Taxonomy) => {
            let categories = blog.categories().await?;
            println!("Categories:");
            for category in &categories {
                println!("  {}  [{}]", category.name, category.slug);
            }
            let tags = blog.tags().await?;
            println!("Tags:");
            for tag in &tags {
                println!("  {}  [{}]", tag.name, tag.slug);
            }
        }
        Some(Commands::Overview) => {
            let featured = portfolio.featured_projects().await?;
            println!("Featured projects:");
            for project in &featured {
                println!("  {}  [{}]", project.title, project.slug);
            }
            let recent = blog.recent_posts(5).await?;
            println!("Recent posts:");
            for post in &recent {
                println!("  {}  [{}]", post.title, post.slug);
            }
            let spotlight = blog.featured_posts().await?;
            if !spotlight.is_empty() {
                println!("Featured posts:");
                for post in &spotlight {
                    println!("  {}  [{}]", post.title, post.slug);
                }
            }
        }
        Some(Commands::Comment {
            slug,
            name,
            email,
            message,
        }) => {
            let comment = NewComment {
                name,
                email,
                content: message,
            };
            let created = blog.create_comment(&slug, &comment).await?;
            println!(
                "Comment {} submitted ({})",
                created.id,
                if created.is_approved {
                    "approved"
                } else {
                    "awaiting moderation"
                }
            );
        }
        None => {
            // No subcommand launches the interactive browser
            let query = PostQuery {
                page: Some(1),
                page_size: Some(page_size),
                ..Default::default()
            };
            let first_posts = blog.list_posts(&query).await?;

            let query = ProjectQuery {
                page: Some(1),
                page_size: Some(page_size),
                ..Default::default()
            };
            let first_projects = portfolio.list_projects(&query).await?;

            // Badge bar data; an empty list just means no tech filter to offer
            let technologies = portfolio.technologies().await.unwrap_or_default();

            let app = foliodeck_tui::App::new(
                ListController::new(first_posts.into()),
                ListController::new(first_projects.into()),
                technologies,
                config.load_trigger(),
            );
            foliodeck_tui::run_tui(app, blog, portfolio, page_size, config.ui.mouse_enabled)
                .await?;
        }
    }

    Ok(())
}
