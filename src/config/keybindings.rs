//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

/// Configuration for all keybindings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub next_screen: Vec<String>,
    pub prev_screen: Vec<String>,
    pub select: Vec<String>,
    pub toggle_play: Vec<String>,
    pub seek_forward: Vec<String>,
    pub seek_backward: Vec<String>,
    pub toggle_like: Vec<String>,
    pub comment: Vec<String>,
    pub duet: Vec<String>,
    pub swap: Vec<String>,
    pub spend_token: Vec<String>,
    pub search: Vec<String>,
    pub edit_profile: Vec<String>,
    pub toggle_uploaded: Vec<String>,
    pub toggle_liked: Vec<String>,
    pub open_external: Vec<String>,
    pub refresh: Vec<String>,
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            move_up: keys(&["k", "Up"]),
            move_down: keys(&["j", "Down"]),
            next_screen: keys(&["Tab"]),
            prev_screen: keys(&["BackTab", "Shift+Tab"]),
            select: keys(&["Enter"]),
            toggle_play: keys(&["Space"]),
            seek_forward: keys(&["l", "Right"]),
            seek_backward: keys(&["h", "Left"]),
            toggle_like: keys(&["f"]),
            comment: keys(&["c"]),
            duet: keys(&["d"]),
            swap: keys(&["w"]),
            spend_token: keys(&["t"]),
            search: keys(&["/"]),
            edit_profile: keys(&["e"]),
            toggle_uploaded: keys(&["u"]),
            toggle_liked: keys(&["v"]),
            open_external: keys(&["o"]),
            refresh: keys(&["R"]),
        }
    }
}

impl KeybindingConfig {
    /// Get the action for a key event. The first matching binding wins.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let table: [(&[String], Action); 20] = [
            (&self.quit, Action::Quit),
            (&self.move_up, Action::MoveUp),
            (&self.move_down, Action::MoveDown),
            (&self.next_screen, Action::NextScreen),
            (&self.prev_screen, Action::PrevScreen),
            (&self.select, Action::Select),
            (&self.toggle_play, Action::TogglePlay),
            (&self.seek_forward, Action::SeekForward),
            (&self.seek_backward, Action::SeekBackward),
            (&self.toggle_like, Action::ToggleLike),
            (&self.comment, Action::Comment),
            (&self.duet, Action::Duet),
            (&self.swap, Action::Swap),
            (&self.spend_token, Action::SpendToken),
            (&self.search, Action::Search),
            (&self.edit_profile, Action::EditProfile),
            (&self.toggle_uploaded, Action::ToggleUploaded),
            (&self.toggle_liked, Action::ToggleLiked),
            (&self.open_external, Action::OpenExternal),
            (&self.refresh, Action::Refresh),
        ];

        table
            .iter()
            .find(|(bindings, _)| matches_key(key, bindings))
            .map(|(_, action)| *action)
            .unwrap_or(Action::None)
    }
}

fn matches_key(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings
        .iter()
        .filter_map(|binding| parse_key_string(binding).ok())
        .any(|parsed| parsed.matches(key))
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Shift is ignored on the event side so "R" matches Shift+r.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse "j", "PageDown", "Ctrl+c", "Shift+Tab", "Ctrl+Shift+a" and friends.
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    // "+" alone is a key, not a separator.
    let (modifier_parts, key_part) = match s.rsplit_once('+') {
        Some((mods, key)) if !key.is_empty() && !mods.is_empty() => (Some(mods), key),
        _ => (None, s),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in modifier_parts.into_iter().flat_map(|m| m.split('+')) {
        modifiers |= match part.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "shift" => KeyModifiers::SHIFT,
            "alt" => KeyModifiers::ALT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        };
    }

    Ok(KeyBinding {
        code: parse_key_code(key_part)?,
        modifiers,
    })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = s.to_lowercase();
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Ok(KeyCode::F(n));
        }
    }

    match lower.as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" | "bs" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        _ => Err(format!("Unknown key: {}", s)),
    }
}
