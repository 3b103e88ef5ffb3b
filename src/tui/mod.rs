pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, AppError, Result};
use crate::catalog::LOAD_FAILED_MESSAGE;
use crate::config::Config;
use crate::feed::page_tokens;
use crate::profile::{EditField, ProfileView};
use crate::store::Store;
use crate::upload::{upload_video, FsPicker};

use self::app::{EditFocus, InputMode, LoadState, Screen, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

const SEEK_STEP_MS: i64 = 5_000;

pub async fn run(ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, config).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut tui_app = TuiApp::new(
        ctx.search_session(),
        ProfileView::new(config.profile.clone()),
    );
    let event_handler = EventHandler::new(Duration::from_millis(100));

    terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;
    load_feed(&mut tui_app, &ctx).await?;

    loop {
        if let Err(e) = tui_app.feed.poll_status() {
            tracing::warn!("Playback status error: {}", e);
        }
        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                if tui_app.input_mode != InputMode::Normal {
                    if let Err(e) = handle_input(&mut tui_app, &ctx, key).await {
                        tracing::warn!("Input handling failed: {}", e);
                        tui_app.set_status(e.to_string());
                    }
                    continue;
                }

                let action = config.keybindings.get_action(&key);
                if action != Action::None {
                    tui_app.clear_status();
                }
                if action == Action::Refresh && tui_app.screen == Screen::Home {
                    tui_app.load_state = LoadState::Loading;
                    terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;
                }
                if let Err(e) = handle_action(&mut tui_app, &ctx, action).await {
                    tracing::warn!("{:?} failed: {}", action, e);
                    tui_app.set_status(e.to_string());
                }
            }
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    tui_app.feed.set_entries(Vec::new())?;
    Ok(())
}

async fn handle_action(tui_app: &mut TuiApp, ctx: &AppContext, action: Action) -> Result<()> {
    match action {
        Action::Quit => {
            tui_app.should_quit = true;
        }
        Action::NextScreen => {
            let screen = tui_app.screen.next();
            switch_screen(tui_app, screen)?;
        }
        Action::PrevScreen => {
            let screen = tui_app.screen.prev();
            switch_screen(tui_app, screen)?;
        }
        Action::MoveUp => match tui_app.screen {
            Screen::Home => move_feed(tui_app, -1)?,
            Screen::Explore => tui_app.move_result_selection(-1),
            _ => {}
        },
        Action::MoveDown => match tui_app.screen {
            Screen::Home => move_feed(tui_app, 1)?,
            Screen::Explore => tui_app.move_result_selection(1),
            _ => {}
        },
        Action::Select => match tui_app.screen {
            Screen::Home => tui_app.feed.toggle_play_pause()?,
            Screen::Explore => {
                if let Some(result) = tui_app.selected_result() {
                    match result.link {
                        Some(link) => open_external(tui_app, &link),
                        None => tui_app.set_status(format!("\"{}\" has no link", result.title)),
                    }
                }
            }
            Screen::Create => {
                tui_app.upload_input.clear();
                tui_app.input_mode = InputMode::UploadPath;
            }
            Screen::Duet | Screen::Profile => {}
        },
        Action::TogglePlay => {
            if tui_app.screen == Screen::Home {
                tui_app.feed.toggle_play_pause()?;
            }
        }
        Action::SeekForward => {
            if tui_app.screen == Screen::Home {
                tui_app.feed.seek_by(SEEK_STEP_MS)?;
            }
        }
        Action::SeekBackward => {
            if tui_app.screen == Screen::Home {
                tui_app.feed.seek_by(-SEEK_STEP_MS)?;
            }
        }
        Action::ToggleLike => {
            if tui_app.screen == Screen::Home {
                if let Some(id) = tui_app.active_video().map(|v| v.id.clone()) {
                    let liked = ctx.store.toggle_like(&id)?;
                    sync_videos(tui_app, ctx)?;
                    tui_app.profile.set_liked(&ctx.store.liked_videos()?);
                    tui_app.set_status(if liked { "Liked" } else { "Unliked" }.to_string());
                }
            }
        }
        Action::Comment => {
            if tui_app.screen == Screen::Home {
                if let Some(id) = tui_app.active_video().map(|v| v.id.clone()) {
                    tui_app.composer.open(id);
                    tui_app.input_mode = InputMode::Comment;
                }
            }
        }
        Action::Duet => {
            if tui_app.screen == Screen::Home {
                tui_app.duet_partner = tui_app.active_video().cloned();
                switch_screen(tui_app, Screen::Duet)?;
            }
        }
        Action::Swap => {
            if let Some(video) = tui_app.active_video() {
                tracing::info!("Swap requested for {}", video.id);
            }
            tui_app.set_status("Swap requested".to_string());
        }
        Action::SpendToken => {
            if let Some(video) = tui_app.active_video() {
                tracing::info!("Token spent on {}", video.id);
            }
            tui_app.set_status("Token spent".to_string());
        }
        Action::Search => {
            switch_screen(tui_app, Screen::Explore)?;
            tui_app.input_mode = InputMode::Search;
        }
        Action::EditProfile => {
            if tui_app.screen == Screen::Profile {
                tui_app.profile.begin_edit();
                tui_app.skill_input.clear();
                tui_app.skill_index = 0;
                tui_app.input_mode = InputMode::EditProfile(EditFocus::Field(EditField::Name));
            }
        }
        Action::ToggleUploaded => {
            if tui_app.screen == Screen::Profile {
                tui_app.profile.uploaded.toggle();
            }
        }
        Action::ToggleLiked => {
            if tui_app.screen == Screen::Profile {
                tui_app.profile.liked.toggle();
            }
        }
        Action::OpenExternal => {
            if tui_app.screen == Screen::Home {
                if let Some(url) = tui_app.active_video().map(|v| v.url.clone()) {
                    open_external(tui_app, &url);
                }
            }
        }
        Action::Refresh => {
            if tui_app.screen == Screen::Home {
                load_feed(tui_app, ctx).await?;
            }
        }
        Action::None => {}
    }
    Ok(())
}

/// Text entry for whichever modal is open.
async fn handle_input(tui_app: &mut TuiApp, ctx: &AppContext, key: KeyEvent) -> Result<()> {
    match tui_app.input_mode {
        InputMode::Normal => {}
        InputMode::Comment => match key.code {
            KeyCode::Esc => {
                tui_app.composer.close();
                tui_app.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                if tui_app.composer.submit(ctx.store.as_ref())?.is_some() {
                    sync_videos(tui_app, ctx)?;
                }
            }
            KeyCode::Backspace => tui_app.composer.backspace(),
            KeyCode::Char(c) => tui_app.composer.push_char(c),
            _ => {}
        },
        InputMode::Search => match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                tui_app.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                tui_app.search_input.pop();
                update_query(tui_app);
            }
            KeyCode::Char(c) => {
                tui_app.search_input.push(c);
                update_query(tui_app);
            }
            _ => {}
        },
        InputMode::UploadPath => match key.code {
            KeyCode::Esc => {
                tui_app.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                tui_app.input_mode = InputMode::Normal;
                let path = tui_app.upload_input.trim().to_string();
                let picker = FsPicker::new((!path.is_empty()).then(|| PathBuf::from(path)));
                run_upload(tui_app, ctx, &picker).await?;
            }
            KeyCode::Backspace => {
                tui_app.upload_input.pop();
            }
            KeyCode::Char(c) => tui_app.upload_input.push(c),
            _ => {}
        },
        InputMode::EditProfile(focus) => handle_profile_input(tui_app, focus, key),
    }
    Ok(())
}

fn handle_profile_input(tui_app: &mut TuiApp, focus: EditFocus, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            tui_app.profile.cancel();
            tui_app.input_mode = InputMode::Normal;
            tui_app.set_status("Edit cancelled".to_string());
        }
        KeyCode::Tab => {
            tui_app.input_mode = InputMode::EditProfile(focus.next());
        }
        KeyCode::Enter => match focus {
            EditFocus::NewSkill => {
                let skill = std::mem::take(&mut tui_app.skill_input);
                tui_app.profile.add_skill(&skill);
            }
            EditFocus::Field(_) | EditFocus::Skills => {
                tui_app.profile.save();
                tui_app.input_mode = InputMode::Normal;
                tui_app.set_status("Profile saved".to_string());
            }
        },
        KeyCode::Up if focus == EditFocus::Skills => tui_app.move_skill_selection(-1),
        KeyCode::Down if focus == EditFocus::Skills => tui_app.move_skill_selection(1),
        KeyCode::Backspace | KeyCode::Delete if focus == EditFocus::Skills => {
            let selected = tui_app
                .profile
                .draft()
                .and_then(|d| d.skills.get(tui_app.skill_index).cloned());
            if let Some(skill) = selected {
                tui_app.profile.remove_skill(&skill);
                tui_app.move_skill_selection(0);
            }
        }
        KeyCode::Backspace => match focus {
            EditFocus::Field(field) => {
                if let Some(text) = tui_app.profile.draft_field_mut(field) {
                    text.pop();
                }
            }
            EditFocus::NewSkill => {
                tui_app.skill_input.pop();
            }
            EditFocus::Skills => {}
        },
        KeyCode::Char(c) => match focus {
            EditFocus::Field(field) => {
                if let Some(text) = tui_app.profile.draft_field_mut(field) {
                    text.push(c);
                }
            }
            EditFocus::NewSkill => tui_app.skill_input.push(c),
            EditFocus::Skills => {}
        },
        _ => {}
    }
}

async fn run_upload(tui_app: &mut TuiApp, ctx: &AppContext, picker: &FsPicker) -> Result<()> {
    match upload_video(picker).await {
        Ok(Some(video)) => {
            ctx.store.prepend_video(video.clone())?;
            tui_app.profile.record_upload(&video);
            sync_videos(tui_app, ctx)?;
            switch_screen(tui_app, Screen::Profile)?;
            tui_app.set_status(format!("Uploaded {}", video.url));
        }
        Ok(None) => {
            tui_app.set_status("Upload cancelled".to_string());
        }
        Err(AppError::PermissionDenied(message)) => {
            tracing::warn!("Upload refused: {}", message);
            tui_app.set_status(format!("Permission denied: {}", message));
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

fn update_query(tui_app: &mut TuiApp) {
    tui_app.search.set_query(tui_app.search_input.clone());
    tui_app.search_index = 0;
    tui_app.search_list_state.select(Some(0));
}

/// Playback runs only while Home is on screen.
fn switch_screen(tui_app: &mut TuiApp, screen: Screen) -> Result<()> {
    tui_app.screen = screen;
    tui_app.feed.set_focused(screen == Screen::Home)
}

/// Page the feed by one entry and report the resulting visibility change.
fn move_feed(tui_app: &mut TuiApp, delta: isize) -> Result<()> {
    let Some(from) = tui_app.feed.active_index() else {
        return Ok(());
    };
    let to = from
        .saturating_add_signed(delta)
        .min(tui_app.feed.len().saturating_sub(1));
    tui_app.feed.on_viewable_items_changed(&page_tokens(from, to))?;
    Ok(())
}

fn open_external(tui_app: &mut TuiApp, target: &str) {
    if let Err(e) = open::that(target) {
        tui_app.set_status(format!("Failed to open: {}", e));
    } else {
        tui_app.set_status(format!("Opened {}", target));
    }
}

/// Refresh the video snapshot from the store and rebind the feed.
fn sync_videos(tui_app: &mut TuiApp, ctx: &AppContext) -> Result<()> {
    tui_app.videos = ctx.store.videos()?;
    let sources = tui_app.media_sources();
    tui_app.feed.set_entries(sources)
}

/// Load or refresh the feed. A failed refresh keeps the videos already on
/// screen; with nothing loaded the player is released behind the error.
async fn load_feed(tui_app: &mut TuiApp, ctx: &AppContext) -> Result<()> {
    tui_app.load_state = LoadState::Loading;
    match ctx.load_feed().await {
        Ok(count) => {
            tracing::info!("Loaded {} videos", count);
            tui_app.load_state = LoadState::Ready;
            sync_videos(tui_app, ctx)?;
            tui_app.profile.set_liked(&ctx.store.liked_videos()?);
        }
        Err(e) => {
            tracing::error!("Feed load failed: {}", e);
            if tui_app.videos.is_empty() {
                tui_app.feed.set_entries(Vec::new())?;
                tui_app.load_state = LoadState::Failed(LOAD_FAILED_MESSAGE.to_string());
            } else {
                tui_app.load_state = LoadState::Ready;
                tui_app.set_status(LOAD_FAILED_MESSAGE.to_string());
            }
        }
    }
    Ok(())
}
