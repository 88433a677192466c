use std::sync::{Arc, Mutex};

use iocraft::prelude::*;

use crate::color::ColorDepth;
use crate::components::confirm_dialog::{
    ConfirmDialog, ConfirmDialogBuildConfig, DialogButton, RenderedConfirmDialog, gate_buttons,
};
use crate::components::footer::{Footer, FooterBuildConfig, RenderedFooter};
use crate::components::tab_bar::{RenderedTabBar, Tab, TabBar, TabBarColors};
use crate::components::table::PagedTable;
use crate::components::text_input::{RenderedTextInput, TextInput};
use crate::config::types::AppConfig;
use crate::engine::{EngineHandle, Event};
use crate::navigation::{Navigator, SectionId};
use crate::settings::{DialogKind, SettingsController};
use crate::theme::ResolvedTheme;
use crate::util::{format_minutes, format_synced};
use crate::views;

// ---------------------------------------------------------------------------
// Input mode
// ---------------------------------------------------------------------------

/// What the keyboard is currently driving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    GlobalLimit,
    /// Editing the limit of the named application.
    AppLimit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

// ---------------------------------------------------------------------------
// Key handling
// ---------------------------------------------------------------------------

/// Apply one key press to the settings model.
///
/// An open alert or confirmation dialog captures every key until it is
/// answered.
pub fn handle_key(
    settings: &mut SettingsController,
    mode: &mut InputMode,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> KeyOutcome {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return KeyOutcome::Quit;
    }
    if settings.alert().is_some() {
        if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            settings.dismiss_alert();
        }
        return KeyOutcome::Continue;
    }
    if settings.dialog().is_some() {
        handle_dialog_key(settings, code);
        return KeyOutcome::Continue;
    }
    match mode.clone() {
        InputMode::Normal => return handle_normal_key(settings, mode, code),
        InputMode::Search => match code {
            KeyCode::Enter => *mode = InputMode::Normal,
            KeyCode::Esc => {
                settings.set_search("");
                *mode = InputMode::Normal;
            }
            _ => {
                if let Some(text) = edit_buffer(settings.search_query(), code, modifiers, false) {
                    settings.set_search(&text);
                }
            }
        },
        InputMode::GlobalLimit => match code {
            KeyCode::Enter => {
                settings.submit_global_limit();
                *mode = InputMode::Normal;
            }
            KeyCode::Esc => *mode = InputMode::Normal,
            _ => {
                if let Some(text) = edit_buffer(settings.global_input(), code, modifiers, true) {
                    settings.set_global_input(&text);
                }
            }
        },
        InputMode::AppLimit(name) => match code {
            KeyCode::Enter => {
                settings.submit_app_limit(&name);
                *mode = InputMode::Normal;
            }
            KeyCode::Esc => *mode = InputMode::Normal,
            _ => {
                if let Some(text) = edit_buffer(settings.limit_input(&name), code, modifiers, true)
                {
                    settings.set_limit_input(&name, &text);
                }
            }
        },
    }
    KeyOutcome::Continue
}

fn handle_dialog_key(settings: &mut SettingsController, code: KeyCode) {
    match code {
        KeyCode::Char('y' | 'Y') => settings.confirm_dialog(),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => settings.cancel_dialog(),
        KeyCode::Left | KeyCode::Char('h') => settings.focus_left(),
        KeyCode::Right | KeyCode::Char('l') => settings.focus_right(),
        KeyCode::Enter | KeyCode::Char(' ') => settings.activate_focused(),
        _ => {}
    }
}

fn handle_normal_key(
    settings: &mut SettingsController,
    mode: &mut InputMode,
    code: KeyCode,
) -> KeyOutcome {
    match code {
        KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Tab => settings.next_section(),
        KeyCode::BackTab => settings.prev_section(),
        KeyCode::Char('1') => settings.show_section(SectionId::Classifications),
        KeyCode::Char('2') => settings.show_section(SectionId::TimeLimits),
        KeyCode::Down | KeyCode::Char('j') => settings.move_cursor(1),
        KeyCode::Up | KeyCode::Char('k') => settings.move_cursor(-1),
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char(']' | 'l') => {
            settings.next_page();
        }
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('[' | 'h') => {
            settings.prev_page();
        }
        KeyCode::Char('/') => *mode = InputMode::Search,
        KeyCode::Char('R') => settings.request_snapshot(),
        _ => match settings.active_section() {
            SectionId::Classifications => {
                if matches!(code, KeyCode::Enter | KeyCode::Char(' ' | 't')) {
                    settings.toggle_selected_game();
                }
            }
            SectionId::TimeLimits => match code {
                KeyCode::Enter | KeyCode::Char('e') => {
                    if let Some(name) = settings.selected_limit().map(|l| l.exe_name.clone()) {
                        *mode = InputMode::AppLimit(name);
                    }
                }
                KeyCode::Char('g') => *mode = InputMode::GlobalLimit,
                KeyCode::Char('r') => settings.refresh_time_limits(),
                _ => {}
            },
        },
    }
    KeyOutcome::Continue
}

/// Apply an editing key to `current`, returning the new text when it changed.
///
/// In numeric fields a lone `0` is replaced by the first typed digit.
fn edit_buffer(
    current: &str,
    code: KeyCode,
    modifiers: KeyModifiers,
    numeric: bool,
) -> Option<String> {
    match code {
        KeyCode::Backspace => {
            let mut buf = current.to_owned();
            buf.pop()?;
            Some(buf)
        }
        KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
            if numeric && current == "0" && ch.is_ascii_digit() {
                return Some(ch.to_string());
            }
            let mut buf = current.to_owned();
            buf.push(ch);
            Some(buf)
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Root App component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct AppProps<'a> {
    pub config: Option<&'a AppConfig>,
    pub engine: Option<&'a EngineHandle>,
    pub theme: Option<&'a ResolvedTheme>,
    pub color_depth: ColorDepth,
    /// Settings location to restore the section from (e.g. an `open <URL>` argument).
    pub initial_location: Option<String>,
}

#[component]
#[allow(clippy::too_many_lines)]
pub fn App<'a>(props: &AppProps<'a>, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();
    let mut should_exit = hooks.use_state(|| false);

    let theme = props.theme.cloned().unwrap_or_else(views::default_theme);
    let depth = props.color_depth;

    let event_channel = hooks.use_state(|| {
        let (tx, rx) = std::sync::mpsc::channel::<Event>();
        (tx, Arc::new(Mutex::new(rx)))
    });
    let (event_tx, event_rx_arc) = event_channel.read().clone();

    let engine = props
        .engine
        .cloned()
        .unwrap_or_else(EngineHandle::disconnected);
    let location = props.initial_location.clone().unwrap_or_else(|| {
        props
            .config
            .map_or_else(|| "/settings".to_owned(), |c| c.defaults.settings_path.clone())
    });
    let fallback_section = props.config.and_then(|c| c.defaults.section.clone());
    let mut settings = hooks.use_state(move || {
        let navigator = Navigator::restore(&location, fallback_section.as_deref());
        SettingsController::new(engine, event_tx, navigator)
    });
    let mut input_mode = hooks.use_state(|| InputMode::Normal);

    // Initial snapshot.
    let mut requested = hooks.use_state(|| false);
    if !requested.get() {
        requested.set(true);
        settings.write().request_snapshot();
    }

    // Timer tick so the "Synced" text keeps moving.
    let mut tick = hooks.use_state(|| 0u64);
    hooks.use_future(async move {
        loop {
            smol::Timer::after(std::time::Duration::from_secs(10)).await;
            tick.set(tick.get() + 1);
        }
    });

    // Poll engine events.
    {
        let rx_for_poll = event_rx_arc.clone();
        hooks.use_future(async move {
            loop {
                smol::Timer::after(std::time::Duration::from_millis(100)).await;
                let events: Vec<Event> = match rx_for_poll.lock() {
                    Ok(rx) => std::iter::from_fn(|| rx.try_recv().ok()).collect(),
                    Err(_) => break,
                };
                if events.is_empty() {
                    continue;
                }
                let mut ctl = settings.write();
                for evt in events {
                    ctl.apply_event(evt);
                }
            }
        });
    }

    hooks.use_terminal_events({
        move |event| match event {
            TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) if kind != KeyEventKind::Release => {
                let mut mode = input_mode.read().clone();
                let outcome = handle_key(&mut settings.write(), &mut mode, code, modifiers);
                input_mode.set(mode);
                if outcome == KeyOutcome::Quit {
                    should_exit.set(true);
                }
            }
            _ => {}
        }
    });

    // Exit handling.
    if should_exit.get() {
        system.exit();
    }

    let ctl = settings.read();
    let mode = input_mode.read().clone();

    // Tab bar: one tab per section.
    let tabs: Vec<Tab> = SectionId::ALL
        .iter()
        .map(|s| Tab {
            title: s.label().to_owned(),
            count: Some(match s {
                SectionId::Classifications => ctl.apps().rows().len(),
                SectionId::TimeLimits => ctl.limits().rows().len(),
            }),
        })
        .collect();
    let rendered_tab_bar = RenderedTabBar::build(
        &tabs,
        ctl.active_section().position(),
        ctl.is_loading().then_some("loading\u{2026}"),
        depth,
        &TabBarColors {
            active: Some(theme.accent),
            inactive: Some(theme.text_faint),
            border: Some(theme.border),
        },
    );

    let section = views::build_section(&ctl, &theme, depth, width);

    let rendered_text_input = match &mode {
        InputMode::Normal => None,
        InputMode::Search => Some(RenderedTextInput::build(
            "Search:",
            ctl.search_query(),
            depth,
            Some(theme.text_primary),
            Some(theme.accent),
            Some(theme.border),
        )),
        InputMode::GlobalLimit => {
            let prompt = format!(
                "New global limit (now {}):",
                format_minutes(ctl.global_limit())
            );
            let input = RenderedTextInput::build(
                &prompt,
                ctl.global_input(),
                depth,
                Some(theme.text_primary),
                Some(theme.accent),
                Some(theme.border),
            );
            Some(match ctl.global_message() {
                Some(notice) if ctl.global_submit_enabled() && !notice.is_error => {
                    input.with_hint(&notice.text, theme.text_warning, depth)
                }
                Some(notice) => input.with_hint(&notice.text, theme.text_error, depth),
                None => input,
            })
        }
        InputMode::AppLimit(name) => {
            let prompt = format!("Limit for {name} (mins):");
            let input = RenderedTextInput::build(
                &prompt,
                ctl.limit_input(name),
                depth,
                Some(theme.text_primary),
                Some(theme.accent),
                Some(theme.border),
            );
            Some(match ctl.limit_message(name) {
                Some(notice) if notice.is_error => {
                    input.with_hint(&notice.text, theme.text_error, depth)
                }
                _ => input,
            })
        }
    };

    let help_hint = match mode {
        InputMode::Normal => format!("{}  tab section  q quit", section.key_hint),
        InputMode::Search => "enter keep  esc clear".to_owned(),
        InputMode::GlobalLimit | InputMode::AppLimit(_) => "enter save  esc back".to_owned(),
    };
    let rendered_footer = RenderedFooter::build(FooterBuildConfig {
        page_text: ctl.page_indicator(),
        status: ctl.status().map(|n| (n.text.clone(), n.is_error)),
        location_text: ctl.navigator().location().to_owned(),
        synced_text: format_synced(ctl.last_synced()),
        help_hint,
        depth,
        text_color: Some(theme.text_faint),
        error_color: Some(theme.text_error),
        border_color: Some(theme.border),
    });

    let rendered_dialog = build_dialog(&ctl, &theme, depth);
    drop(ctl);

    let header_lines = section.header;

    element! {
        View(width: u32::from(width), height: u32::from(height), flex_direction: FlexDirection::Column) {
            TabBar(tab_bar: rendered_tab_bar)
            View(flex_direction: FlexDirection::Column, padding_left: 1) {
                #(header_lines.into_iter().enumerate().map(|(i, line)| {
                    element! {
                        Text(
                            key: i,
                            content: line.text,
                            color: line.fg,
                            weight: if line.bold { Weight::Bold } else { Weight::Normal },
                            wrap: TextWrap::NoWrap,
                        )
                    }
                }))
            }
            View(flex_grow: 1.0, flex_direction: FlexDirection::Column, padding_left: 1) {
                PagedTable(table: section.table)
            }
            TextInput(input: rendered_text_input)
            Footer(footer: rendered_footer)
            ConfirmDialog(dialog: rendered_dialog, width: width, height: height)
        }
    }
}

fn build_dialog(
    ctl: &SettingsController,
    theme: &ResolvedTheme,
    depth: ColorDepth,
) -> Option<RenderedConfirmDialog> {
    let base = |title: String, message: String, buttons: Vec<DialogButton>, hint: &str| {
        ConfirmDialogBuildConfig {
            title,
            message,
            progress: None,
            buttons,
            hint: hint.to_owned(),
            depth,
            title_color: Some(theme.text_primary),
            message_color: Some(theme.text_secondary),
            focus_color: Some(theme.text_primary),
            selected_bg: Some(theme.bg_selected),
            border_color: Some(theme.accent),
            hint_color: Some(theme.text_faint),
        }
    };

    if let Some(alert) = ctl.alert() {
        let ok = vec![DialogButton {
            label: "OK".to_owned(),
            is_focused: true,
        }];
        return Some(RenderedConfirmDialog::build(base(
            "Refresh failed".to_owned(),
            alert.to_owned(),
            ok,
            "enter dismiss",
        )));
    }

    let dialog = ctl.dialog()?;
    let prompt = ctl.dialog_prompt()?;
    let title = prompt.title.clone().unwrap_or_else(|| match dialog.kind {
        DialogKind::GameToggle => "Not a game?".to_owned(),
        DialogKind::LimitIncrease => "More screen time?".to_owned(),
    });
    let mut cfg = base(
        title,
        prompt.message.clone(),
        gate_buttons(dialog.order, dialog.focus),
        "y confirm  n/esc cancel  \u{2190}/\u{2192} move  enter select",
    );
    cfg.progress = ctl.dialog_progress();
    Some(RenderedConfirmDialog::build(cfg))
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use tokio::sync::mpsc::UnboundedReceiver;

    use super::*;
    use crate::engine::Request;
    use crate::types::{AppEntry, SettingsSnapshot, TimeLimitEntry};

    fn setup() -> (SettingsController, UnboundedReceiver<Request>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let (reply_tx, _reply_rx) = mpsc::channel();
        let mut ctl = SettingsController::new(
            EngineHandle::new(tx),
            reply_tx,
            Navigator::restore("/settings", None),
        );
        ctl.apply_snapshot(SettingsSnapshot {
            apps: vec![
                AppEntry {
                    name: "steam.exe".to_owned(),
                    is_game: true,
                    user_marked: false,
                },
                AppEntry {
                    name: "notepad.exe".to_owned(),
                    is_game: false,
                    user_marked: false,
                },
            ],
            time_limit_settings: vec![TimeLimitEntry {
                exe_name: "steam.exe".to_owned(),
                max_time: 60,
                notify_limit: None,
            }],
            global_timing_limit: 60,
        });
        (ctl, rx)
    }

    fn press(ctl: &mut SettingsController, mode: &mut InputMode, code: KeyCode) -> KeyOutcome {
        handle_key(ctl, mode, code, KeyModifiers::NONE)
    }

    fn type_text(ctl: &mut SettingsController, mode: &mut InputMode, text: &str) {
        for ch in text.chars() {
            press(ctl, mode, KeyCode::Char(ch));
        }
    }

    #[test]
    fn quit_keys() {
        let (mut ctl, _rx) = setup();
        let mut mode = InputMode::Normal;
        assert_eq!(press(&mut ctl, &mut mode, KeyCode::Char('q')), KeyOutcome::Quit);
        assert_eq!(
            handle_key(
                &mut ctl,
                &mut mode,
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ),
            KeyOutcome::Quit
        );
    }

    #[test]
    fn search_mode_filters_live_and_esc_clears() {
        let (mut ctl, _rx) = setup();
        let mut mode = InputMode::Normal;
        press(&mut ctl, &mut mode, KeyCode::Char('/'));
        assert_eq!(mode, InputMode::Search);
        type_text(&mut ctl, &mut mode, "pad");
        assert_eq!(ctl.search_query(), "pad");
        assert_eq!(ctl.apps().filtered_count(), 1);
        // 'q' is text while searching.
        assert_eq!(
            press(&mut ctl, &mut mode, KeyCode::Char('q')),
            KeyOutcome::Continue
        );
        press(&mut ctl, &mut mode, KeyCode::Backspace);
        press(&mut ctl, &mut mode, KeyCode::Esc);
        assert_eq!(mode, InputMode::Normal);
        assert_eq!(ctl.search_query(), "");
        assert_eq!(ctl.apps().filtered_count(), 2);
    }

    #[test]
    fn dialog_captures_keys_until_answered() {
        let (mut ctl, mut rx) = setup();
        let mut mode = InputMode::Normal;
        // Cursor starts on steam.exe, a game: unmarking opens the gate.
        press(&mut ctl, &mut mode, KeyCode::Char(' '));
        assert!(ctl.dialog().is_some());
        assert_eq!(
            press(&mut ctl, &mut mode, KeyCode::Char('q')),
            KeyOutcome::Continue
        );
        assert_eq!(ctl.active_section(), SectionId::Classifications);
        press(&mut ctl, &mut mode, KeyCode::Tab);
        assert_eq!(ctl.active_section(), SectionId::Classifications);

        for _ in 0..3 {
            press(&mut ctl, &mut mode, KeyCode::Char('y'));
        }
        assert!(ctl.dialog().is_none());
        assert!(!ctl.is_game("steam.exe"));
        assert!(matches!(
            rx.try_recv(),
            Ok(Request::UpdateClassification { is_game: false, .. })
        ));
    }

    #[test]
    fn esc_cancels_dialog() {
        let (mut ctl, mut rx) = setup();
        let mut mode = InputMode::Normal;
        press(&mut ctl, &mut mode, KeyCode::Enter);
        press(&mut ctl, &mut mode, KeyCode::Char('y'));
        press(&mut ctl, &mut mode, KeyCode::Esc);
        assert!(ctl.dialog().is_none());
        assert!(ctl.is_game("steam.exe"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn editing_app_limit_replaces_leading_zero() {
        let (mut ctl, mut rx) = setup();
        let mut mode = InputMode::Normal;
        press(&mut ctl, &mut mode, KeyCode::Tab);
        press(&mut ctl, &mut mode, KeyCode::Char('e'));
        assert_eq!(mode, InputMode::AppLimit("steam.exe".to_owned()));
        type_text(&mut ctl, &mut mode, "45");
        assert_eq!(ctl.limit_input("steam.exe"), "45");
        press(&mut ctl, &mut mode, KeyCode::Enter);
        assert_eq!(mode, InputMode::Normal);
        assert_eq!(ctl.limit_input("steam.exe"), "0");
        assert!(matches!(
            rx.try_recv(),
            Ok(Request::UpdateAppLimit { max_time: 45, .. })
        ));
    }

    #[test]
    fn global_limit_typing_updates_hint() {
        let (mut ctl, _rx) = setup();
        let mut mode = InputMode::Normal;
        press(&mut ctl, &mut mode, KeyCode::Char('2'));
        press(&mut ctl, &mut mode, KeyCode::Char('g'));
        assert_eq!(mode, InputMode::GlobalLimit);
        type_text(&mut ctl, &mut mode, "200");
        assert!(!ctl.global_submit_enabled());
        press(&mut ctl, &mut mode, KeyCode::Backspace);
        assert_eq!(ctl.global_input(), "20");
        assert!(ctl.global_submit_enabled());
    }

    #[test]
    fn alert_is_dismissed_before_anything_else() {
        let (mut ctl, _rx) = setup();
        let mut mode = InputMode::Normal;
        ctl.apply_event(Event::TimeLimitsRefreshed {
            outcome: crate::engine::Outcome::Failed("timeout".to_owned()),
        });
        assert!(ctl.alert().is_some());
        assert_eq!(
            press(&mut ctl, &mut mode, KeyCode::Char('q')),
            KeyOutcome::Continue
        );
        press(&mut ctl, &mut mode, KeyCode::Enter);
        assert!(ctl.alert().is_none());
    }

    #[test]
    fn edit_buffer_rules() {
        let none = KeyModifiers::NONE;
        assert_eq!(
            edit_buffer("0", KeyCode::Char('7'), none, true).as_deref(),
            Some("7")
        );
        assert_eq!(
            edit_buffer("0", KeyCode::Char('7'), none, false).as_deref(),
            Some("07")
        );
        assert_eq!(edit_buffer("", KeyCode::Backspace, none, true), None);
        assert_eq!(
            edit_buffer("ab", KeyCode::Char('x'), KeyModifiers::CONTROL, false),
            None
        );
    }
}
