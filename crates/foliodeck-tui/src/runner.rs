// TUI event loop and terminal management
use crate::{App, DetailView, InputMode, Surface};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use foliodeck_api::{BlogClient, NewComment, PortfolioClient};
use foliodeck_core::providers::{drive, PostSource, ProjectSource};
use foliodeck_core::Filter;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::debug;

pub async fn run_tui(
    mut app: App,
    blog: BlogClient,
    portfolio: PortfolioClient,
    page_size: u32,
    mouse_enabled: bool,
) -> anyhow::Result<()> {
    let post_source = PostSource::new(blog.clone());
    let project_source = ProjectSource::new(portfolio.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse_enabled {
        execute!(io::stdout(), EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    loop {
        terminal.draw(|f| crate::ui::render(f, &mut app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match app.input_mode {
                    InputMode::Searching => match key.code {
                        KeyCode::Enter => {
                            let filter = if app.search_input.is_empty() {
                                Filter::None
                            } else {
                                Filter::search(app.search_input.clone())
                            };
                            app.input_mode = InputMode::Normal;
                            apply_filter_active(
                                &mut app,
                                &post_source,
                                &project_source,
                                page_size,
                                filter,
                            )
                            .await;
                        }
                        KeyCode::Char(c) => {
                            app.search_input.push(c);
                        }
                        KeyCode::Backspace => {
                            app.search_input.pop();
                        }
                        KeyCode::Esc => {
                            app.input_mode = InputMode::Normal;
                        }
                        _ => {}
                    },
                    InputMode::TechFilter => match key.code {
                        KeyCode::Esc => {
                            app.input_mode = InputMode::Normal;
                        }
                        KeyCode::Left | KeyCode::Char('h') => {
                            app.previous_technology();
                        }
                        KeyCode::Right | KeyCode::Char('l') => {
                            app.next_technology();
                        }
                        KeyCode::Enter => {
                            let filter = app.tech_filter();
                            app.input_mode = InputMode::Normal;
                            apply_filter_active(
                                &mut app,
                                &post_source,
                                &project_source,
                                page_size,
                                filter,
                            )
                            .await;
                        }
                        _ => {}
                    },
                    InputMode::CommentForm => match key.code {
                        KeyCode::Esc => {
                            app.cancel_comment_form();
                        }
                        KeyCode::Tab | KeyCode::Down => {
                            if let Some(form) = app.comment_form.as_mut() {
                                form.next_field();
                            }
                        }
                        KeyCode::BackTab | KeyCode::Up => {
                            if let Some(form) = app.comment_form.as_mut() {
                                form.previous_field();
                            }
                        }
                        KeyCode::Enter => {
                            submit_comment(&mut app, &blog).await;
                        }
                        KeyCode::Char(c) => {
                            if let Some(form) = app.comment_form.as_mut() {
                                form.field_value_mut().push(c);
                            }
                        }
                        KeyCode::Backspace => {
                            if let Some(form) = app.comment_form.as_mut() {
                                form.field_value_mut().pop();
                            }
                        }
                        _ => {}
                    },
                    InputMode::Normal => match key.code {
                        KeyCode::Char('q') => {
                            break;
                        }
                        KeyCode::Esc => {
                            if app.detail.is_some() {
                                app.close_detail();
                            } else {
                                app.status_message = None;
                            }
                        }
                        KeyCode::Tab => {
                            if app.detail.is_none() {
                                app.toggle_surface();
                            }
                        }
                        KeyCode::Char('/') => {
                            if app.detail.is_none() {
                                app.search_input.clear();
                                app.input_mode = InputMode::Searching;
                            }
                        }
                        KeyCode::Char('f') => {
                            // technology badges only make sense over projects
                            if app.detail.is_none() && app.surface == Surface::Projects {
                                app.input_mode = InputMode::TechFilter;
                            }
                        }
                        KeyCode::Char('j') | KeyCode::Down => {
                            if app.detail.is_some() {
                                app.scroll_detail_down();
                            } else {
                                app.next_item();
                                maybe_auto_load(&mut app, &post_source, &project_source, page_size)
                                    .await;
                            }
                        }
                        KeyCode::Char('k') | KeyCode::Up => {
                            if app.detail.is_some() {
                                app.scroll_detail_up();
                            } else {
                                app.previous_item();
                            }
                        }
                        KeyCode::Char('m') => {
                            // manual load-more affordance
                            if app.detail.is_none() {
                                manual_load(&mut app, &post_source, &project_source, page_size)
                                    .await;
                            }
                        }
                        KeyCode::Char('r') => {
                            if app.detail.is_none() {
                                retry_active(&mut app, &post_source, &project_source, page_size)
                                    .await;
                            }
                        }
                        KeyCode::Char('c') => {
                            app.open_comment_form();
                        }
                        KeyCode::Char('o') => {
                            open_selected_link(&mut app);
                        }
                        KeyCode::Enter => {
                            if app.detail.is_none() {
                                open_detail(&mut app, &blog, &portfolio).await;
                            }
                        }
                        _ => {}
                    },
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    if mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Fire the proximity trigger after a cursor move, if it wants to
async fn maybe_auto_load(
    app: &mut App,
    post_source: &PostSource,
    project_source: &ProjectSource,
    page_size: u32,
) {
    let trigger = app.trigger;
    match app.surface {
        Surface::Posts => {
            if trigger.should_load(&app.posts, app.post_cursor) {
                if let Some(request) = app.posts.load_more() {
                    drive(&mut app.posts, post_source, request, Some(page_size)).await;
                }
            }
        }
        Surface::Projects => {
            if trigger.should_load(&app.projects, app.project_cursor) {
                if let Some(request) = app.projects.load_more() {
                    drive(&mut app.projects, project_source, request, Some(page_size)).await;
                }
            }
        }
    }
    app.sync_selection();
}

async fn manual_load(
    app: &mut App,
    post_source: &PostSource,
    project_source: &ProjectSource,
    page_size: u32,
) {
    match app.surface {
        Surface::Posts => {
            if !app.trigger.manual_enabled(&app.posts) {
                return;
            }
            if let Some(request) = app.posts.load_more() {
                drive(&mut app.posts, post_source, request, Some(page_size)).await;
            }
        }
        Surface::Projects => {
            if !app.trigger.manual_enabled(&app.projects) {
                return;
            }
            if let Some(request) = app.projects.load_more() {
                drive(&mut app.projects, project_source, request, Some(page_size)).await;
            }
        }
    }
    app.sync_selection();
}

async fn apply_filter_active(
    app: &mut App,
    post_source: &PostSource,
    project_source: &ProjectSource,
    page_size: u32,
    filter: Filter,
) {
    debug!(%filter, surface = ?app.surface, "applying filter");
    match app.surface {
        Surface::Posts => {
            if let Some(request) = app.posts.apply_filter(filter) {
                drive(&mut app.posts, post_source, request, Some(page_size)).await;
            }
        }
        Surface::Projects => {
            if let Some(request) = app.projects.apply_filter(filter) {
                drive(&mut app.projects, project_source, request, Some(page_size)).await;
            }
        }
    }
    app.sync_selection();
}

async fn retry_active(
    app: &mut App,
    post_source: &PostSource,
    project_source: &ProjectSource,
    page_size: u32,
) {
    match app.surface {
        Surface::Posts => {
            if let Some(request) = app.posts.retry() {
                drive(&mut app.posts, post_source, request, Some(page_size)).await;
            }
        }
        Surface::Projects => {
            if let Some(request) = app.projects.retry() {
                drive(&mut app.projects, project_source, request, Some(page_size)).await;
            }
        }
    }
    app.sync_selection();
}

/// Fetch the selected item's detail; a missing slug becomes the terminal
/// not-found view rather than an error state.
async fn open_detail(app: &mut App, blog: &BlogClient, portfolio: &PortfolioClient) {
    match app.surface {
        Surface::Posts => {
            let Some(slug) = app.selected_post().map(|p| p.slug.clone()) else {
                return;
            };
            match DetailView::from_post_fetch(&slug, blog.get_post(&slug).await) {
                Ok(view) => app.detail = Some(view),
                Err(e) => app.status_message = Some(format!("Failed to load post: {}", e)),
            }
        }
        Surface::Projects => {
            let Some(slug) = app.selected_project().map(|p| p.slug.clone()) else {
                return;
            };
            match DetailView::from_project_fetch(&slug, portfolio.get_project(&slug).await) {
                Ok(view) => app.detail = Some(view),
                Err(e) => app.status_message = Some(format!("Failed to load project: {}", e)),
            }
        }
    }
    app.detail_scroll = 0;
}

async fn submit_comment(app: &mut App, blog: &BlogClient) {
    let Some(form) = app.comment_form.as_mut() else {
        return;
    };
    if form.field < 2 {
        form.next_field();
        return;
    }
    if !form.is_complete() {
        form.notice = Some("All fields are required".to_string());
        return;
    }

    let body = NewComment {
        name: form.name.clone(),
        email: form.email.clone(),
        content: form.content.clone(),
    };
    match blog.create_comment(&form.slug, &body).await {
        Ok(_) => {
            form.notice = Some("Comment submitted for review".to_string());
        }
        Err(e) => {
            form.notice = Some(format!("Failed to submit: {}", e));
        }
    }
}

fn open_selected_link(app: &mut App) {
    let url = match &app.detail {
        Some(DetailView::Project(project)) => {
            if !project.project_url.is_empty() {
                Some(project.project_url.clone())
            } else if !project.github_url.is_empty() {
                Some(project.github_url.clone())
            } else {
                None
            }
        }
        _ => match app.surface {
            Surface::Projects => app.selected_project().and_then(|p| {
                if !p.project_url.is_empty() {
                    Some(p.project_url.clone())
                } else if !p.github_url.is_empty() {
                    Some(p.github_url.clone())
                } else {
                    None
                }
            }),
            Surface::Posts => None,
        },
    };

    if let Some(url) = url {
        if let Err(e) = open::that(&url) {
            app.status_message = Some(format!("Failed to open browser: {}", e));
        }
    }
}
