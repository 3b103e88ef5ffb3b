use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, LineGauge, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::feed::format_time;
use crate::profile::{EditField, VideoSection};
use crate::search::clean_snippet;
use crate::tui::app::{EditFocus, InputMode, LoadState, Screen, TuiApp};

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(8),    // Screen body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0], colors);
    match app.screen {
        Screen::Home => render_home(frame, app, chunks[1], colors),
        Screen::Explore => render_explore(frame, app, chunks[1], colors),
        Screen::Create => render_create(frame, app, chunks[1], colors),
        Screen::Duet => render_duet(frame, app, chunks[1], colors),
        Screen::Profile => render_profile(frame, app, chunks[1], colors),
    }
    render_status_bar(frame, app, chunks[2], colors);

    if app.composer.visible {
        render_comment_modal(frame, app, colors);
    }
    if app.profile.is_editing() {
        render_edit_modal(frame, app, colors);
    }
}

fn bordered(title: String, colors: &ColorConfig, active: bool) -> Block<'static> {
    let border = if active {
        colors.active_border
    } else {
        colors.inactive_border
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn render_tabs(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let titles: Vec<&str> = Screen::ALL.iter().map(|s| s.title()).collect();
    let selected = Screen::ALL
        .iter()
        .position(|s| *s == app.screen)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(bordered(" shortreel ".to_string(), colors, false))
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(colors.active_tab)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_home(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let message = match &app.load_state {
        LoadState::Loading => Some(Span::raw("Loading videos...")),
        LoadState::Failed(msg) => Some(Span::styled(msg.clone(), Style::default().fg(colors.error))),
        LoadState::Ready if app.videos.is_empty() => Some(Span::raw("No videos")),
        LoadState::Ready => None,
    };
    if let Some(message) = message {
        let paragraph = Paragraph::new(Line::from(message))
            .block(bordered(" Feed ".to_string(), colors, true))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(columns[0]);

    render_active_video(frame, app, rows[0], colors);
    render_progress(frame, app, rows[1], colors);
    render_up_next(frame, app, columns[1], colors);
}

fn render_active_video(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let Some(index) = app.feed.active_index() else {
        return;
    };
    let Some(video) = app.videos.get(index) else {
        return;
    };
    let presentation = app.feed.entry(index);
    let status = app.feed.status();

    let state = if status.is_playing {
        "▶ Playing"
    } else if presentation.should_play {
        "… Starting"
    } else {
        "❚❚ Paused"
    };
    let heart = if video.is_liked { "♥ Liked" } else { "♡" };

    let mut lines = vec![
        Line::from(Span::styled(
            video.display_title().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(state),
        Line::from(Span::styled(heart, Style::default().fg(colors.liked))),
        Line::from(format!(
            "{}x{}  {} comments",
            video.width,
            video.height,
            video.comments.len()
        )),
        Line::from(Span::styled(
            video.url.clone(),
            Style::default().fg(colors.link),
        )),
    ];
    if !presentation.attached {
        lines.push(Line::from("(not attached)"));
    }

    let title = format!(" Feed [{}/{}] ", index + 1, app.feed.len());
    let paragraph = Paragraph::new(Text::from(lines))
        .block(bordered(title, colors, true))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_progress(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let position = app.feed.position_ms();
    let (ratio, total) = match app.feed.duration_ms() {
        Some(duration) if duration > 0 => (
            (position as f64 / duration as f64).clamp(0.0, 1.0),
            format_time(duration),
        ),
        _ => (0.0, "-:--".to_string()),
    };

    let gauge = LineGauge::default()
        .block(bordered(" Progress ".to_string(), colors, false))
        .filled_style(Style::default().fg(colors.progress))
        .label(format!("{} / {}", format_time(position), total))
        .ratio(ratio);

    frame.render_widget(gauge, area);
}

fn render_up_next(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let items: Vec<ListItem> = app
        .videos
        .iter()
        .enumerate()
        .map(|(i, video)| {
            let entry = app.feed.entry(i);
            let marker = if entry.attached { "▶" } else { " " };
            let muted = if entry.muted { " (muted)" } else { "" };
            let style = if entry.attached {
                Style::default()
                    .bg(colors.selection_bg)
                    .fg(colors.selection_fg)
            } else {
                Style::default()
            };
            ListItem::new(format!("{} {}{}", marker, video.display_title(), muted)).style(style)
        })
        .collect();

    let list = List::new(items).block(bordered(" Up next ".to_string(), colors, false));
    frame.render_widget(list, area);
}

fn render_comment_modal(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let comments: Vec<ListItem> = app
        .comment_video()
        .map(|video| {
            video
                .comments
                .iter()
                .map(|c| ListItem::new(format!("{}  {}", c.created_at.format("%H:%M"), c.text)))
                .collect()
        })
        .unwrap_or_default();
    let count = comments.len();
    let list = if comments.is_empty() {
        List::new(vec![ListItem::new("No comments yet")])
    } else {
        List::new(comments)
    };
    frame.render_widget(
        list.block(bordered(format!(" Comments ({}) ", count), colors, true)),
        chunks[0],
    );

    let input = Paragraph::new(format!("{}_", app.composer.input))
        .block(bordered(" Add a comment (Enter: post, Esc: close) ".to_string(), colors, true));
    frame.render_widget(input, chunks[1]);
}

fn render_explore(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let typing = app.input_mode == InputMode::Search;
    let cursor = if typing { "_" } else { "" };
    let input = Paragraph::new(format!("{}{}", app.search_input, cursor))
        .block(bordered(" Search ".to_string(), colors, typing));
    frame.render_widget(input, chunks[0]);

    let state = app.search_state();
    let block = bordered(format!(" Results ({}) ", state.results.len()), colors, !typing);

    if state.is_loading {
        frame.render_widget(Paragraph::new("Loading...").block(block), chunks[1]);
        return;
    }
    if state.results.is_empty() {
        let text = if state.query.trim().is_empty() {
            "Type / to search"
        } else {
            "No results found"
        };
        frame.render_widget(Paragraph::new(text).block(block), chunks[1]);
        return;
    }

    let items: Vec<ListItem> = state
        .results
        .iter()
        .map(|result| {
            let mut lines = vec![Line::from(vec![
                Span::styled(
                    result.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  [{}]", result.provider),
                    Style::default().fg(colors.source_label),
                ),
            ])];
            if let Some(snippet) = &result.snippet {
                lines.push(Line::from(format!("  {}", clean_snippet(snippet))));
            }
            if let Some(link) = &result.link {
                lines.push(Line::from(Span::styled(
                    format!("  {}", link),
                    Style::default().fg(colors.link),
                )));
            }
            ListItem::new(Text::from(lines))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[1], &mut app.search_list_state);
}

fn render_create(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let intro = Paragraph::new(Text::from(vec![
        Line::from(Span::styled(
            "Create Your Video",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press Enter, type the path of a video file and press Enter again."),
    ]))
    .block(bordered(" Create ".to_string(), colors, true))
    .wrap(Wrap { trim: true });
    frame.render_widget(intro, chunks[0]);

    let typing = app.input_mode == InputMode::UploadPath;
    let text = if typing {
        format!("{}_", app.upload_input)
    } else {
        "Upload Video".to_string()
    };
    let input = Paragraph::new(text).block(bordered(" Path ".to_string(), colors, typing));
    frame.render_widget(input, chunks[1]);
}

fn render_duet(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let mut lines = vec![Line::from(Span::styled(
        "Duet Screen",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(video) = &app.duet_partner {
        lines.push(Line::from(""));
        lines.push(Line::from(format!("With: {}", video.display_title())));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(bordered(" Duet ".to_string(), colors, true));
    frame.render_widget(paragraph, area);
}

fn render_profile(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(4)])
        .split(area);

    let profile = app.profile.profile();
    let header = Paragraph::new(Text::from(vec![
        Line::from(Span::styled(
            format!("@{}", profile.username),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(profile.name.clone()),
        Line::from(profile.bio.clone()),
        Line::from(""),
        Line::from(format!(
            "{} Followers   {} Following   {} Posts",
            profile.followers, profile.following, profile.posts
        )),
        Line::from(format!("Skills: {}", profile.skills.join(", "))),
    ]))
    .block(bordered(" Profile ".to_string(), colors, true))
    .wrap(Wrap { trim: true });
    frame.render_widget(header, chunks[0]);

    let sections = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_section(frame, &app.profile.uploaded, "u", sections[0], colors);
    render_section(frame, &app.profile.liked, "v", sections[1], colors);
}

fn render_section(frame: &mut Frame, section: &VideoSection, key: &str, area: Rect, colors: &ColorConfig) {
    let arrow = if section.expanded { "▼" } else { "▶" };
    let title = format!(
        " {} {} ({}) [{}] ",
        arrow,
        section.title,
        section.videos.len(),
        key
    );
    let items: Vec<ListItem> = section
        .rows()
        .iter()
        .map(|v| ListItem::new(v.title.clone()))
        .collect();

    let list = List::new(items).block(bordered(title, colors, section.expanded));
    frame.render_widget(list, area);
}

fn render_edit_modal(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig) {
    let Some(draft) = app.profile.draft() else {
        return;
    };
    let focus = match app.input_mode {
        InputMode::EditProfile(focus) => Some(focus),
        _ => None,
    };
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let field_line = |label: &str, value: &str, field: EditField| {
        let focused = focus == Some(EditFocus::Field(field));
        let cursor = if focused { "_" } else { "" };
        let style = if focused {
            Style::default().fg(colors.active_tab)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{:<9}", label), style),
            Span::raw(format!("{}{}", value, cursor)),
        ])
    };

    let mut lines = vec![
        field_line("Name", &draft.name, EditField::Name),
        field_line("Username", &draft.username, EditField::Username),
        field_line("Bio", &draft.bio, EditField::Bio),
        Line::from(""),
    ];

    let skill_focused = focus == Some(EditFocus::NewSkill);
    lines.push(Line::from(vec![
        Span::styled(
            format!("{:<9}", "New skill"),
            if skill_focused {
                Style::default().fg(colors.active_tab)
            } else {
                Style::default()
            },
        ),
        Span::raw(format!(
            "{}{}",
            app.skill_input,
            if skill_focused { "_" } else { "" }
        )),
    ]));
    lines.push(Line::from(""));

    let skills_focused = focus == Some(EditFocus::Skills);
    for (i, skill) in draft.skills.iter().enumerate() {
        let style = if skills_focused && i == app.skill_index {
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("  • {}", skill), style)));
    }

    let block = bordered(
        " Edit profile (Tab: next, Enter: save, Esc: cancel) ".to_string(),
        colors,
        true,
    );
    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = if let Some(ref msg) = app.status_message {
        msg.clone()
    } else {
        match app.input_mode {
            InputMode::Comment => "Enter:Post  Esc:Close".to_string(),
            InputMode::Search => "Type to search  Enter/Esc:Done".to_string(),
            InputMode::UploadPath => "Enter:Upload  Esc:Cancel".to_string(),
            InputMode::EditProfile(EditFocus::Skills) => {
                "j/k:Select  Del:Remove skill  Tab:Next  Enter:Save  Esc:Cancel".to_string()
            }
            InputMode::EditProfile(_) => "Tab:Next  Enter:Save  Esc:Cancel".to_string(),
            InputMode::Normal => match app.screen {
                Screen::Home => {
                    "j/k:Scroll  Space:Play  h/l:Seek  f:Like  c:Comment  d:Duet  o:Open  R:Refresh  q:Quit"
                        .to_string()
                }
                Screen::Explore => "/:Search  j/k:Nav  Enter:Open  Tab:Screen  q:Quit".to_string(),
                Screen::Create => "Enter:Upload  Tab:Screen  q:Quit".to_string(),
                Screen::Duet => "Tab:Screen  q:Quit".to_string(),
                Screen::Profile => {
                    "e:Edit  u:Uploaded  v:Liked  Tab:Screen  q:Quit".to_string()
                }
            },
        }
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
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
        .split(vertical[1])[1]
}
