// UI rendering logic
use crate::{App, CommentForm, DetailView, InputMode, Surface};
use foliodeck_api::{Post, Project};
use foliodeck_core::{FetchState, Filter, LoadTrigger};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, app: &mut App) {
    let show_search = app.input_mode == InputMode::Searching;
    let show_tech_bar = app.input_mode == InputMode::TechFilter;

    let mut constraints = vec![Constraint::Length(3)]; // Header
    if show_search {
        constraints.push(Constraint::Length(3)); // Search input
    }
    if show_tech_bar {
        constraints.push(Constraint::Length(3)); // Technology badges
    }
    constraints.push(Constraint::Min(5)); // Main content
    constraints.push(Constraint::Length(1)); // Status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let mut next = 0;
    render_header(frame, app, chunks[next]);
    next += 1;

    if show_search {
        render_search_input(frame, app, chunks[next]);
        next += 1;
    }
    if show_tech_bar {
        render_tech_bar(frame, app, chunks[next]);
        next += 1;
    }

    let content_area = chunks[next];
    let status_area = chunks[next + 1];

    if let Some(detail) = &app.detail {
        render_detail(frame, detail, app.detail_scroll, content_area);
    } else {
        match app.surface {
            Surface::Posts => render_post_list(frame, app, content_area),
            Surface::Projects => render_project_list(frame, app, content_area),
        }
    }

    render_status_bar(frame, app, status_area);

    if app.input_mode == InputMode::CommentForm {
        if let Some(form) = &app.comment_form {
            render_comment_form(frame, form, frame.area());
        }
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Left: surface tabs
    let tab_style = |surface: Surface| {
        if app.surface == surface {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let tabs = Line::from(vec![
        Span::styled(" Posts ", tab_style(Surface::Posts)),
        Span::raw(" "),
        Span::styled(" Projects ", tab_style(Surface::Projects)),
    ]);
    let tabs_widget = Paragraph::new(tabs)
        .block(Block::default().borders(Borders::ALL).title(" foliodeck "));
    frame.render_widget(tabs_widget, header_chunks[0]);

    // Right: active filter and counts for the current surface
    let (filter, shown, total) = match app.surface {
        Surface::Posts => (
            app.posts.filter().clone(),
            app.posts.visible_items().len(),
            app.posts.total_count(),
        ),
        Surface::Projects => (
            app.projects.filter().clone(),
            app.projects.visible_items().len(),
            app.projects.total_count(),
        ),
    };

    let filter_span = match &filter {
        Filter::None => Span::styled("all", Style::default().fg(Color::DarkGray)),
        other => Span::styled(
            other.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    };

    let summary = Line::from(vec![
        filter_span,
        Span::raw("  "),
        Span::styled(
            format!("{}/{}", shown, total),
            Style::default().fg(Color::Green),
        ),
    ]);
    let summary_widget = Paragraph::new(summary)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Right);
    frame.render_widget(summary_widget, header_chunks[1]);
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let input = Paragraph::new(app.search_input.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search (ENTER to apply, ESC to cancel) "),
        );
    frame.render_widget(input, area);
}

fn render_tech_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    let badge = |label: &str, selected: bool| {
        if selected {
            Span::styled(
                format!(" {} ", label),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {} ", label), Style::default().fg(Color::Magenta))
        }
    };

    spans.push(badge("All", app.tech_cursor == 0));
    for (i, tech) in app.technologies.iter().enumerate() {
        spans.push(Span::raw(" "));
        spans.push(badge(&tech.name, app.tech_cursor == i + 1));
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Technology (h/l to move, ENTER to apply) "),
    );
    frame.render_widget(bar, area);
}

fn render_post_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let selected = app.post_cursor;
    let items: Vec<ListItem> = app
        .posts
        .visible_items()
        .iter()
        .enumerate()
        .map(|(i, post)| post_list_item(post, i == selected))
        .collect();

    let title = list_title("Posts", app.posts.state(), app.posts.total_count());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)));
    frame.render_stateful_widget(list, area, &mut app.post_list);
}

fn render_project_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let selected = app.project_cursor;
    let items: Vec<ListItem> = app
        .projects
        .visible_items()
        .iter()
        .enumerate()
        .map(|(i, project)| project_list_item(project, i == selected))
        .collect();

    let title = list_title("Projects", app.projects.state(), app.projects.total_count());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)));
    frame.render_stateful_widget(list, area, &mut app.project_list);
}

fn list_title(name: &str, state: &FetchState, total: u64) -> String {
    match state {
        FetchState::Fetching => format!(" {} (loading...) ", name),
        FetchState::Failed(_) => format!(" {} (failed) ", name),
        _ => format!(" {} ({}) ", name, total),
    }
}

fn post_list_item(post: &Post, is_selected: bool) -> ListItem<'static> {
    let title_style = if is_selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };

    let line1 = Line::from(vec![
        Span::styled(
            if post.is_featured { "★ " } else { "  " },
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(post.title.clone(), title_style),
    ]);

    let date = post
        .published_date
        .map(|d| d.format("%b %e, %Y").to_string())
        .unwrap_or_else(|| "unpublished".to_string());
    let reading = post
        .reading_time
        .map(|m| format!("{} min read", m))
        .unwrap_or_default();

    let line2 = Line::from(vec![
        Span::raw("  "),
        Span::styled(
            post.category.name.clone(),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw("  "),
        Span::styled(date, Style::default().fg(Color::Rgb(128, 128, 128))),
        Span::raw("  "),
        Span::styled(reading, Style::default().fg(Color::Rgb(128, 128, 128))),
    ]);

    let line3 = Line::from(vec![
        Span::raw("  "),
        Span::styled(
            post.excerpt.clone(),
            Style::default().fg(Color::Rgb(170, 170, 170)),
        ),
    ]);

    ListItem::new(vec![line1, line2, line3, Line::from("")])
}

fn project_list_item(project: &Project, is_selected: bool) -> ListItem<'static> {
    let title_style = if is_selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };

    let line1 = Line::from(vec![
        Span::styled(
            if project.is_featured { "★ " } else { "  " },
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(project.title.clone(), title_style),
    ]);

    let mut tech_spans = vec![Span::raw("  ")];
    for (i, tech) in project.technologies.iter().enumerate() {
        if i > 0 {
            tech_spans.push(Span::raw(" "));
        }
        tech_spans.push(Span::styled(
            format!(" {} ", tech.name),
            Style::default().fg(Color::Black).bg(Color::Rgb(100, 149, 237)),
        ));
    }
    let line2 = Line::from(tech_spans);

    let line3 = Line::from(vec![
        Span::raw("  "),
        Span::styled(
            project.short_description.clone(),
            Style::default().fg(Color::Rgb(170, 170, 170)),
        ),
    ]);

    ListItem::new(vec![line1, line2, line3, Line::from("")])
}

fn render_detail(frame: &mut Frame, detail: &DetailView, scroll: u16, area: Rect) {
    let (title, lines) = match detail {
        DetailView::Post(post) => (format!(" {} ", post.title), post_detail_lines(post)),
        DetailView::Project(project) => {
            (format!(" {} ", project.title), project_detail_lines(project))
        }
        DetailView::NotFound(slug) => (
            " Not Found ".to_string(),
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("Nothing lives at '{}'.", slug),
                    Style::default().fg(Color::Red),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "It may have been unpublished or the link is stale.",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        ),
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn post_detail_lines(post: &Post) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let date = post
        .published_date
        .map(|d| d.format("%B %e, %Y").to_string())
        .unwrap_or_else(|| "unpublished".to_string());

    let mut meta = vec![
        Span::styled(post.category.name.clone(), Style::default().fg(Color::Magenta)),
        Span::raw("  "),
        Span::styled(date, Style::default().fg(Color::DarkGray)),
    ];
    if let Some(minutes) = post.reading_time {
        meta.push(Span::raw("  "));
        meta.push(Span::styled(
            format!("{} min read", minutes),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(meta));

    if !post.tags.is_empty() {
        let mut tag_spans = Vec::new();
        for (i, tag) in post.tags.iter().enumerate() {
            if i > 0 {
                tag_spans.push(Span::raw(" "));
            }
            tag_spans.push(Span::styled(
                format!("#{}", tag.slug),
                Style::default().fg(Color::Blue),
            ));
        }
        lines.push(Line::from(tag_spans));
    }

    lines.push(Line::from(""));
    for text_line in post.content.lines() {
        lines.push(Line::from(text_line.to_string()));
    }

    if !post.comments.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("── Comments ({}) ──", post.comments.len()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for comment in &post.comments {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(
                    comment.name.clone(),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    comment.created_at.format("%b %e, %Y").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            for text_line in comment.content.lines() {
                lines.push(Line::from(text_line.to_string()));
            }
        }
    }

    lines
}

fn project_detail_lines(project: &Project) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let mut tech_spans = Vec::new();
    for (i, tech) in project.technologies.iter().enumerate() {
        if i > 0 {
            tech_spans.push(Span::raw(" "));
        }
        tech_spans.push(Span::styled(
            format!(" {} ", tech.name),
            Style::default().fg(Color::Black).bg(Color::Rgb(100, 149, 237)),
        ));
    }
    lines.push(Line::from(tech_spans));
    lines.push(Line::from(""));

    if !project.project_url.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Live: ", Style::default().fg(Color::DarkGray)),
            Span::styled(project.project_url.clone(), Style::default().fg(Color::Blue)),
        ]));
    }
    if !project.github_url.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Source: ", Style::default().fg(Color::DarkGray)),
            Span::styled(project.github_url.clone(), Style::default().fg(Color::Blue)),
        ]));
    }
    if !project.project_url.is_empty() || !project.github_url.is_empty() {
        lines.push(Line::from(""));
    }

    for text_line in project.description.lines() {
        lines.push(Line::from(text_line.to_string()));
    }

    lines
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(message) = &app.status_message {
        Span::styled(message.clone(), Style::default().fg(Color::Red))
    } else {
        match app.input_mode {
            InputMode::Searching => Span::styled(
                "SEARCH | Type query | ENTER: apply | ESC: cancel",
                Style::default().fg(Color::Yellow),
            ),
            InputMode::TechFilter => Span::styled(
                "TECH FILTER | h/l: move | ENTER: apply | ESC: close",
                Style::default().fg(Color::Magenta),
            ),
            InputMode::CommentForm => Span::styled(
                "COMMENT | TAB: next field | ENTER: submit | ESC: cancel",
                Style::default().fg(Color::Green),
            ),
            InputMode::Normal => {
                if app.detail.is_some() {
                    Span::raw("j/k: scroll | o: open link | ESC: back | q: quit")
                } else {
                    let state = match app.surface {
                        Surface::Posts => app.posts.state(),
                        Surface::Projects => app.projects.state(),
                    };
                    match state {
                        FetchState::Fetching => {
                            Span::styled("Loading...", Style::default().fg(Color::Yellow))
                        }
                        FetchState::Failed(err) => Span::styled(
                            format!("Load failed: {} | r: retry", err),
                            Style::default().fg(Color::Red),
                        ),
                        FetchState::Exhausted => {
                            let shown = match app.surface {
                                Surface::Posts => app.posts.visible_items().len(),
                                Surface::Projects => app.projects.visible_items().len(),
                            };
                            if shown == 0 {
                                let filter = match app.surface {
                                    Surface::Posts => app.posts.filter(),
                                    Surface::Projects => app.projects.filter(),
                                };
                                Span::styled(
                                    empty_list_message(filter),
                                    Style::default().fg(Color::DarkGray),
                                )
                            } else {
                                Span::styled(
                                    hint_line(app, "end of list"),
                                    Style::default().fg(Color::DarkGray),
                                )
                            }
                        }
                        FetchState::Ready => match app.trigger {
                            LoadTrigger::Manual => Span::raw(hint_line(app, "m: load more")),
                            LoadTrigger::Proximity { .. } => {
                                Span::raw(hint_line(app, "scroll down to load more"))
                            }
                        },
                    }
                }
            }
        }
    };

    let paragraph = Paragraph::new(Line::from(status));
    frame.render_widget(paragraph, area);
}

/// Status text for a surface that finished loading with nothing to show.
/// "end of list" only makes sense over a nonempty list.
fn empty_list_message(filter: &Filter) -> String {
    match filter {
        Filter::None => "Nothing published yet".to_string(),
        other => format!("No results for {} | /: search again", other),
    }
}

fn hint_line(app: &App, more: &str) -> String {
    let extra = match app.surface {
        Surface::Posts => "c: comment",
        Surface::Projects => "f: tech filter | o: open",
    };
    format!(
        "j/k: navigate | /: search | {} | TAB: switch | ENTER: detail | {} | q: quit",
        extra, more
    )
}

fn render_comment_form(frame: &mut Frame, form: &CommentForm, area: Rect) {
    let popup = centered_rect(60, 50, area);
    frame.render_widget(Clear, popup);

    let field_line = |label: &str, value: &str, active: bool| {
        let label_style = if active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Line::from(vec![
            Span::styled(format!("{:>9}: ", label), label_style),
            Span::raw(value.to_string()),
            if active {
                Span::styled("█", Style::default().fg(Color::Yellow))
            } else {
                Span::raw("")
            },
        ])
    };

    let mut lines = vec![
        Line::from(""),
        field_line("Name", &form.name, form.field == 0),
        Line::from(""),
        field_line("Email", &form.email, form.field == 1),
        Line::from(""),
        field_line("Comment", &form.content, form.field == 2),
    ];
    if let Some(notice) = &form.notice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Cyan),
        )));
    }

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Comment on '{}' ", form.slug)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, popup);
}

/// Helper to create a centered rect using a percentage of the available area
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_exhausted_list_names_the_filter() {
        assert_eq!(empty_list_message(&Filter::None), "Nothing published yet");
        assert_eq!(
            empty_list_message(&Filter::technology("cobol")),
            "No results for technology: cobol | /: search again"
        );
        assert_eq!(
            empty_list_message(&Filter::search("zzzz")),
            "No results for search: zzzz | /: search again"
        );
    }
}
