// TUI application state and event handling
use foliodeck_api::{ApiError, Post, Project, Technology};
use foliodeck_core::{Filter, ListController, LoadTrigger};
use ratatui::widgets::ListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Posts,
    Projects,
}

impl Surface {
    pub fn title(&self) -> &'static str {
        match self {
            Surface::Posts => "Posts",
            Surface::Projects => "Projects",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,      // Navigating lists and detail views
    Searching,   // Typing in the search box
    TechFilter,  // Moving along the technology filter bar
    CommentForm, // Filling in the comment form
}

/// What the detail pane shows. NotFound is terminal: it renders a dedicated
/// view with no retry affordance.
pub enum DetailView {
    Post(Box<Post>),
    Project(Box<Project>),
    NotFound(String),
}

impl DetailView {
    /// Fold a post detail fetch into a view. 404 becomes the terminal
    /// not-found view; any other failure bubbles to the caller for the
    /// status bar.
    pub fn from_post_fetch(
        slug: &str,
        result: Result<Post, ApiError>,
    ) -> Result<DetailView, ApiError> {
        match result {
            Ok(post) => Ok(DetailView::Post(Box::new(post))),
            Err(ApiError::NotFound(_)) => Ok(DetailView::NotFound(slug.to_string())),
            Err(e) => Err(e),
        }
    }

    pub fn from_project_fetch(
        slug: &str,
        result: Result<Project, ApiError>,
    ) -> Result<DetailView, ApiError> {
        match result {
            Ok(project) => Ok(DetailView::Project(Box::new(project))),
            Err(ApiError::NotFound(_)) => Ok(DetailView::NotFound(slug.to_string())),
            Err(e) => Err(e),
        }
    }
}

/// State of the comment form over a post detail
pub struct CommentForm {
    pub slug: String,
    pub name: String,
    pub email: String,
    pub content: String,
    pub field: usize, // 0 name, 1 email, 2 content
    pub notice: Option<String>,
}

impl CommentForm {
    pub fn new(slug: String) -> Self {
        Self {
            slug,
            name: String::new(),
            email: String::new(),
            content: String::new(),
            field: 0,
            notice: None,
        }
    }

    pub fn field_value_mut(&mut self) -> &mut String {
        match self.field {
            0 => &mut self.name,
            1 => &mut self.email,
            _ => &mut self.content,
        }
    }

    pub fn next_field(&mut self) {
        self.field = (self.field + 1).min(2);
    }

    pub fn previous_field(&mut self) {
        self.field = self.field.saturating_sub(1);
    }

    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.content.is_empty()
    }
}

pub struct App {
    pub should_quit: bool,
    pub surface: Surface,
    pub input_mode: InputMode,
    pub search_input: String,
    pub posts: ListController<Post>,
    pub projects: ListController<Project>,
    pub post_cursor: usize,
    pub project_cursor: usize,
    pub post_list: ListState,
    pub project_list: ListState,
    pub technologies: Vec<Technology>,
    pub tech_cursor: usize, // 0 means "All"
    pub trigger: LoadTrigger,
    pub detail: Option<DetailView>,
    pub detail_scroll: u16,
    pub comment_form: Option<CommentForm>,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(
        posts: ListController<Post>,
        projects: ListController<Project>,
        technologies: Vec<Technology>,
        trigger: LoadTrigger,
    ) -> Self {
        let mut post_list = ListState::default();
        post_list.select(Some(0));
        let mut project_list = ListState::default();
        project_list.select(Some(0));

        Self {
            should_quit: false,
            surface: Surface::Posts,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            posts,
            projects,
            post_cursor: 0,
            project_cursor: 0,
            post_list,
            project_list,
            technologies,
            tech_cursor: 0,
            trigger,
            detail: None,
            detail_scroll: 0,
            comment_form: None,
            status_message: None,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn toggle_surface(&mut self) {
        self.surface = match self.surface {
            Surface::Posts => Surface::Projects,
            Surface::Projects => Surface::Posts,
        };
    }

    /// Number of rows the active surface renders
    pub fn visible_len(&self) -> usize {
        match self.surface {
            Surface::Posts => self.posts.visible_items().len(),
            Surface::Projects => self.projects.visible_items().len(),
        }
    }

    pub fn cursor(&self) -> usize {
        match self.surface {
            Surface::Posts => self.post_cursor,
            Surface::Projects => self.project_cursor,
        }
    }

    pub fn next_item(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        match self.surface {
            Surface::Posts => {
                self.post_cursor = (self.post_cursor + 1).min(len - 1);
                self.post_list.select(Some(self.post_cursor));
            }
            Surface::Projects => {
                self.project_cursor = (self.project_cursor + 1).min(len - 1);
                self.project_list.select(Some(self.project_cursor));
            }
        }
    }

    pub fn previous_item(&mut self) {
        match self.surface {
            Surface::Posts => {
                self.post_cursor = self.post_cursor.saturating_sub(1);
                self.post_list.select(Some(self.post_cursor));
            }
            Surface::Projects => {
                self.project_cursor = self.project_cursor.saturating_sub(1);
                self.project_list.select(Some(self.project_cursor));
            }
        }
    }

    /// Clamp cursors after the underlying list changed (filter, new page)
    pub fn sync_selection(&mut self) {
        let post_len = self.posts.visible_items().len();
        self.post_cursor = self.post_cursor.min(post_len.saturating_sub(1));
        self.post_list.select(Some(self.post_cursor));

        let project_len = self.projects.visible_items().len();
        self.project_cursor = self.project_cursor.min(project_len.saturating_sub(1));
        self.project_list.select(Some(self.project_cursor));
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.posts.visible_items().into_iter().nth(self.post_cursor)
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.projects
            .visible_items()
            .into_iter()
            .nth(self.project_cursor)
    }

    /// Filter encoded by the technology bar position
    pub fn tech_filter(&self) -> Filter {
        if self.tech_cursor == 0 {
            Filter::None
        } else {
            match self.technologies.get(self.tech_cursor - 1) {
                Some(tech) => Filter::technology(tech.slug.clone()),
                None => Filter::None,
            }
        }
    }

    pub fn next_technology(&mut self) {
        self.tech_cursor = (self.tech_cursor + 1).min(self.technologies.len());
    }

    pub fn previous_technology(&mut self) {
        self.tech_cursor = self.tech_cursor.saturating_sub(1);
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.detail_scroll = 0;
        self.comment_form = None;
    }

    pub fn scroll_detail_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_detail_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    /// Open the comment form when a post detail is showing
    pub fn open_comment_form(&mut self) {
        if let Some(DetailView::Post(post)) = &self.detail {
            self.comment_form = Some(CommentForm::new(post.slug.clone()));
            self.input_mode = InputMode::CommentForm;
        }
    }

    pub fn cancel_comment_form(&mut self) {
        self.comment_form = None;
        self.input_mode = InputMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foliodeck_api::Page;
    use foliodeck_core::PagedCollection;

    fn post(id: u64) -> Post {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Post {}", id),
            "slug": format!("post-{}", id),
            "content": "words",
            "category": {"name": "Misc", "slug": "misc"},
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap()
    }

    fn posts(n: u64) -> ListController<Post> {
        let page: PagedCollection<Post> = Page {
            count: n,
            total_pages: None,
            current_page: None,
            page_size: None,
            next: None,
            previous: None,
            results: (0..n).map(post).collect(),
        }
        .into();
        ListController::new(page)
    }

    fn projects() -> ListController<Project> {
        let page: PagedCollection<Project> = Page {
            count: 0,
            total_pages: None,
            current_page: None,
            page_size: None,
            next: None,
            previous: None,
            results: Vec::new(),
        }
        .into();
        ListController::new(page)
    }

    fn app() -> App {
        App::new(posts(3), projects(), Vec::new(), LoadTrigger::Manual)
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut app = app();
        app.previous_item();
        assert_eq!(app.cursor(), 0);

        app.next_item();
        app.next_item();
        app.next_item();
        app.next_item();
        assert_eq!(app.cursor(), 2);
    }

    #[test]
    fn selected_post_follows_cursor() {
        let mut app = app();
        app.next_item();
        assert_eq!(app.selected_post().map(|p| p.id), Some(1));
    }

    #[test]
    fn tech_cursor_zero_means_unfiltered() {
        let mut app = app();
        assert_eq!(app.tech_filter(), Filter::None);
        // no technologies loaded: cursor cannot leave "All"
        app.next_technology();
        assert_eq!(app.tech_filter(), Filter::None);
    }

    #[test]
    fn comment_form_requires_post_detail() {
        let mut app = app();
        app.open_comment_form();
        assert!(app.comment_form.is_none());

        app.detail = Some(DetailView::Post(Box::new(post(1))));
        app.open_comment_form();
        assert!(app.comment_form.is_some());
        assert_eq!(app.input_mode, InputMode::CommentForm);
        assert_eq!(app.comment_form.as_ref().unwrap().slug, "post-1");
    }

    #[test]
    fn missing_slug_renders_terminal_not_found_view() {
        let fetched = DetailView::from_post_fetch(
            "gone",
            Err(ApiError::NotFound("post 'gone'".to_string())),
        );
        assert!(matches!(fetched, Ok(DetailView::NotFound(slug)) if slug == "gone"));

        // other failures are not folded; they go to the status bar
        let fetched = DetailView::from_post_fetch(
            "up",
            Err(ApiError::RequestFailed {
                status: 500,
                body: "boom".to_string(),
            }),
        );
        assert!(fetched.is_err());

        let fetched = DetailView::from_post_fetch("ok", Ok(post(1)));
        assert!(matches!(fetched, Ok(DetailView::Post(_))));
    }

    #[test]
    fn comment_form_field_navigation() {
        let mut form = CommentForm::new("post-1".to_string());
        assert!(!form.is_complete());

        form.field_value_mut().push_str("Ada");
        form.next_field();
        form.field_value_mut().push_str("ada@example.com");
        form.next_field();
        form.field_value_mut().push_str("Nice write-up.");
        form.next_field(); // clamps at the last field
        assert_eq!(form.field, 2);
        assert!(form.is_complete());

        form.previous_field();
        assert_eq!(form.field, 1);
    }
}
