use std::collections::HashMap;
use std::sync::mpsc::Sender;

use chrono::{DateTime, Utc};

use crate::engine::{EngineHandle, Event, Outcome, Request};
use crate::gate::{ButtonOrder, ConfirmationGate, GateButton, GateStep, Prompt};
use crate::limits::{self, GlobalLimitDecision};
use crate::navigation::{Navigator, SectionId};
use crate::pager::TableController;
use crate::types::{AppEntry, SettingsSnapshot, TimeLimitEntry};

const GAME_TOGGLE_PROMPTS: [&str; 3] = [
    "This feels suspiciously fun to *not* be a game. Care to explain?",
    "Seriously? You’re trying to sneak this past the algorithm?",
    "Alright. If your soul is clean, hit confirm. But I’m watching.",
];

const LIMIT_INCREASE_PROMPTS: [(&str, &str); 3] = [
    (
        "Level 1: Just Checking",
        "You sure you want *more* screen time? Self-control is free, you know.",
    ),
    (
        "Level 2: Rethink Mode",
        "Okay, but like... you *do* have goals outside of gaming, right?",
    ),
    (
        "Final Level: Grass Alert 🌱",
        "Last chance. More time means less sunlight, more regrets. Proceed?",
    ),
];

const UPDATE_FAILED_MESSAGE: &str = "❌ Error updating limit. Check the log for details.";
const REFRESH_FAILED_ALERT: &str = "An error occurred while refreshing the time limit list.";

fn game_toggle_gate() -> ConfirmationGate<String> {
    ConfirmationGate::new(GAME_TOGGLE_PROMPTS.into_iter().map(Prompt::new).collect())
}

fn limit_increase_gate() -> ConfirmationGate<u32> {
    ConfirmationGate::new(
        LIMIT_INCREASE_PROMPTS
            .into_iter()
            .map(|(title, message)| Prompt::titled(title, message))
            .collect(),
    )
}

fn rejection_message(reason: Option<&str>) -> String {
    format!(
        "❌ Failed to update limit. Error: {}",
        reason.unwrap_or("Unknown error")
    )
}

// ---------------------------------------------------------------------------
// Displayed state
// ---------------------------------------------------------------------------

/// A one-line message shown under a control or in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Which gate the open dialog belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    GameToggle,
    LimitIncrease,
}

/// The confirmation dialog currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub order: ButtonOrder,
    pub focus: GateButton,
}

impl Dialog {
    fn shown(kind: DialogKind) -> Self {
        let order = ButtonOrder::shuffled();
        Self {
            kind,
            order,
            focus: order.left,
        }
    }
}

// ---------------------------------------------------------------------------
// SettingsController
// ---------------------------------------------------------------------------

/// Headless model of the settings screens.
///
/// Owns the table controllers, the displayed control state and both
/// confirmation gates. User intents become engine requests; engine events
/// are folded back in through [`SettingsController::apply_event`].
#[derive(Clone)]
pub struct SettingsController {
    engine: EngineHandle,
    reply_tx: Sender<Event>,
    navigator: Navigator,

    apps: TableController<AppEntry>,
    limits: TableController<TimeLimitEntry>,
    apps_cursor: usize,
    limits_cursor: usize,

    toggles: HashMap<String, bool>,
    current_limits: HashMap<String, u32>,
    limit_inputs: HashMap<String, String>,
    limit_messages: HashMap<String, Notice>,

    global_limit: u32,
    global_input: String,
    global_message: Option<Notice>,
    global_submit_enabled: bool,

    game_gate: ConfirmationGate<String>,
    limit_gate: ConfirmationGate<u32>,
    dialog: Option<Dialog>,

    status: Option<Notice>,
    alert: Option<String>,
    last_synced: Option<DateTime<Utc>>,
    loading: bool,
}

impl SettingsController {
    pub fn new(engine: EngineHandle, reply_tx: Sender<Event>, navigator: Navigator) -> Self {
        Self {
            engine,
            reply_tx,
            navigator,
            apps: TableController::new(Vec::new()),
            limits: TableController::new(Vec::new()),
            apps_cursor: 0,
            limits_cursor: 0,
            toggles: HashMap::new(),
            current_limits: HashMap::new(),
            limit_inputs: HashMap::new(),
            limit_messages: HashMap::new(),
            global_limit: 0,
            global_input: "0".to_owned(),
            global_message: None,
            global_submit_enabled: true,
            game_gate: game_toggle_gate(),
            limit_gate: limit_increase_gate(),
            dialog: None,
            status: None,
            alert: None,
            last_synced: None,
            loading: false,
        }
    }

    // -- Snapshot ----------------------------------------------------------

    pub fn request_snapshot(&mut self) {
        self.loading = true;
        self.engine.send(Request::FetchSnapshot {
            reply_tx: self.reply_tx.clone(),
        });
    }

    /// Replace everything displayed with a freshly fetched snapshot.
    ///
    /// Search queries survive; inputs, inline messages and cursors reset.
    pub fn apply_snapshot(&mut self, mut snapshot: SettingsSnapshot) {
        snapshot.sort_apps();
        self.toggles = snapshot
            .apps
            .iter()
            .map(|app| (app.name.clone(), app.is_game))
            .collect();
        self.current_limits = snapshot
            .time_limit_settings
            .iter()
            .map(|entry| (entry.exe_name.clone(), entry.max_time))
            .collect();
        self.limit_inputs.clear();
        self.limit_messages.clear();
        self.global_limit = snapshot.global_timing_limit;
        self.apps.replace_rows(snapshot.apps);
        self.limits.replace_rows(snapshot.time_limit_settings);
        self.apps_cursor = 0;
        self.limits_cursor = 0;
        self.last_synced = Some(Utc::now());
        self.loading = false;
    }

    // -- Navigation --------------------------------------------------------

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn active_section(&self) -> SectionId {
        self.navigator.active()
    }

    pub fn show_section(&mut self, section: SectionId) {
        self.navigator.show_section(section);
    }

    pub fn next_section(&mut self) {
        self.show_section(self.active_section().next());
    }

    pub fn prev_section(&mut self) {
        self.show_section(self.active_section().prev());
    }

    // -- Tables ------------------------------------------------------------

    pub fn apps(&self) -> &TableController<AppEntry> {
        &self.apps
    }

    pub fn limits(&self) -> &TableController<TimeLimitEntry> {
        &self.limits
    }

    /// Search query of the active section's table.
    pub fn search_query(&self) -> &str {
        match self.active_section() {
            SectionId::Classifications => self.apps.query(),
            SectionId::TimeLimits => self.limits.query(),
        }
    }

    pub fn set_search(&mut self, query: &str) {
        match self.active_section() {
            SectionId::Classifications => {
                self.apps.set_search(query);
                self.apps_cursor = 0;
            }
            SectionId::TimeLimits => {
                self.limits.set_search(query);
                self.limits_cursor = 0;
            }
        }
    }

    pub fn next_page(&mut self) -> bool {
        let moved = match self.active_section() {
            SectionId::Classifications => self.apps.next_page(),
            SectionId::TimeLimits => self.limits.next_page(),
        };
        if moved {
            *self.cursor_mut() = 0;
        }
        moved
    }

    pub fn prev_page(&mut self) -> bool {
        let moved = match self.active_section() {
            SectionId::Classifications => self.apps.prev_page(),
            SectionId::TimeLimits => self.limits.prev_page(),
        };
        if moved {
            *self.cursor_mut() = 0;
        }
        moved
    }

    pub fn page_indicator(&self) -> String {
        match self.active_section() {
            SectionId::Classifications => self.apps.page_indicator(),
            SectionId::TimeLimits => self.limits.page_indicator(),
        }
    }

    /// Cursor position within the visible page of the active section.
    pub fn cursor(&self) -> usize {
        match self.active_section() {
            SectionId::Classifications => self.apps_cursor,
            SectionId::TimeLimits => self.limits_cursor,
        }
    }

    fn cursor_mut(&mut self) -> &mut usize {
        match self.active_section() {
            SectionId::Classifications => &mut self.apps_cursor,
            SectionId::TimeLimits => &mut self.limits_cursor,
        }
    }

    fn visible_rows(&self) -> usize {
        match self.active_section() {
            SectionId::Classifications => self.apps.page_indices().len(),
            SectionId::TimeLimits => self.limits.page_indices().len(),
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let visible = self.visible_rows();
        let cursor = self.cursor_mut();
        if visible == 0 {
            *cursor = 0;
            return;
        }
        *cursor = cursor.saturating_add_signed(delta).min(visible - 1);
    }

    pub fn selected_app(&self) -> Option<&AppEntry> {
        let idx = *self.apps.page_indices().get(self.apps_cursor)?;
        self.apps.rows().get(idx)
    }

    pub fn selected_limit(&self) -> Option<&TimeLimitEntry> {
        let idx = *self.limits.page_indices().get(self.limits_cursor)?;
        self.limits.rows().get(idx)
    }

    // -- Classification toggle ---------------------------------------------

    /// Whether the "game" toggle is displayed as on for `name`.
    pub fn is_game(&self, name: &str) -> bool {
        self.toggles.get(name).copied().unwrap_or(false)
    }

    pub fn toggle_selected_game(&mut self) {
        if let Some(name) = self.selected_app().map(|app| app.name.clone()) {
            self.toggle_game(&name);
        }
    }

    /// Flip the "game" toggle for `name`.
    ///
    /// Marking an app as a game is applied at once. Unmarking it keeps the
    /// toggle on and opens the confirmation dialog instead.
    pub fn toggle_game(&mut self, name: &str) {
        if self.is_game(name) {
            let step = self.game_gate.start(name.to_owned());
            self.on_game_step(step);
        } else {
            self.toggles.insert(name.to_owned(), true);
            self.send_classification(name.to_owned(), true);
        }
    }

    fn send_classification(&self, exe_name: String, is_game: bool) {
        self.engine.send(Request::UpdateClassification {
            exe_name,
            is_game,
            reply_tx: self.reply_tx.clone(),
        });
    }

    // -- Confirmation dialog -----------------------------------------------

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_prompt(&self) -> Option<&Prompt> {
        match self.dialog?.kind {
            DialogKind::GameToggle => self.game_gate.current_prompt(),
            DialogKind::LimitIncrease => self.limit_gate.current_prompt(),
        }
    }

    /// `(step, total)` of the open dialog, 1-based.
    pub fn dialog_progress(&self) -> Option<(usize, usize)> {
        let (step, total) = match self.dialog?.kind {
            DialogKind::GameToggle => (
                self.game_gate.session()?.step(),
                self.game_gate.required_confirmations(),
            ),
            DialogKind::LimitIncrease => (
                self.limit_gate.session()?.step(),
                self.limit_gate.required_confirmations(),
            ),
        };
        Some((step + 1, total))
    }

    pub fn focus_button(&mut self, button: GateButton) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.focus = button;
        }
    }

    pub fn focus_left(&mut self) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.focus = dialog.order.left;
        }
    }

    pub fn focus_right(&mut self) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.focus = dialog.order.right;
        }
    }

    pub fn activate_focused(&mut self) {
        match self.dialog.map(|d| d.focus) {
            Some(GateButton::Confirm) => self.confirm_dialog(),
            Some(GateButton::Cancel) => self.cancel_dialog(),
            None => {}
        }
    }

    pub fn confirm_dialog(&mut self) {
        let Some(dialog) = self.dialog else {
            return;
        };
        match dialog.kind {
            DialogKind::GameToggle => {
                let step = self.game_gate.confirm();
                self.on_game_step(step);
            }
            DialogKind::LimitIncrease => {
                let step = self.limit_gate.confirm();
                self.on_limit_step(step);
            }
        }
    }

    /// Show the next game-toggle prompt, or unmark the app once the gate
    /// is through.
    fn on_game_step(&mut self, step: GateStep<String>) {
        match step {
            GateStep::Prompt(_) => self.dialog = Some(Dialog::shown(DialogKind::GameToggle)),
            GateStep::Apply(name) => {
                self.dialog = None;
                self.toggles.insert(name.clone(), false);
                tracing::info!("settings: {name} marked as: Not Game");
                self.send_classification(name, false);
            }
            GateStep::Idle => self.dialog = None,
        }
    }

    fn on_limit_step(&mut self, step: GateStep<u32>) {
        match step {
            GateStep::Prompt(_) => self.dialog = Some(Dialog::shown(DialogKind::LimitIncrease)),
            GateStep::Apply(limit) => {
                self.dialog = None;
                self.send_global_limit(limit);
            }
            GateStep::Idle => self.dialog = None,
        }
    }

    pub fn cancel_dialog(&mut self) {
        let Some(dialog) = self.dialog.take() else {
            return;
        };
        match dialog.kind {
            DialogKind::GameToggle => {
                if let Some(name) = self.game_gate.cancel() {
                    self.toggles.insert(name, true);
                }
            }
            DialogKind::LimitIncrease => {
                self.limit_gate.cancel();
            }
        }
    }

    // -- Global limit ------------------------------------------------------

    pub fn global_limit(&self) -> u32 {
        self.global_limit
    }

    pub fn global_input(&self) -> &str {
        &self.global_input
    }

    pub fn global_message(&self) -> Option<&Notice> {
        self.global_message.as_ref()
    }

    pub fn global_submit_enabled(&self) -> bool {
        self.global_submit_enabled
    }

    /// Update the global limit input and the live hint under it.
    pub fn set_global_input(&mut self, input: &str) {
        let hint = limits::global_limit_hint(input);
        self.global_input = input.to_owned();
        self.global_submit_enabled = hint.submit_enabled;
        self.global_message = Some(if hint.submit_enabled {
            Notice::info(hint.text)
        } else {
            Notice::error(hint.text)
        });
    }

    pub fn submit_global_limit(&mut self) {
        match limits::decide_global_limit(&self.global_input, self.global_limit) {
            Err(e) => self.global_message = Some(Notice::error(e.global_message())),
            Ok(GlobalLimitDecision::ApplyNow(limit)) => self.send_global_limit(limit),
            Ok(GlobalLimitDecision::RequiresConfirmation(limit)) => {
                self.global_input = "0".to_owned();
                self.global_message = None;
                let step = self.limit_gate.start(limit);
                self.on_limit_step(step);
            }
        }
    }

    fn send_global_limit(&self, limit: u32) {
        self.engine.send(Request::UpdateGlobalLimit {
            limit,
            reply_tx: self.reply_tx.clone(),
        });
    }

    // -- Per-application limit ---------------------------------------------

    pub fn current_limit(&self, exe_name: &str) -> Option<u32> {
        self.current_limits.get(exe_name).copied()
    }

    pub fn limit_input(&self, exe_name: &str) -> &str {
        self.limit_inputs.get(exe_name).map_or("0", String::as_str)
    }

    pub fn set_limit_input(&mut self, exe_name: &str, input: &str) {
        self.limit_inputs
            .insert(exe_name.to_owned(), input.to_owned());
    }

    pub fn limit_message(&self, exe_name: &str) -> Option<&Notice> {
        self.limit_messages.get(exe_name)
    }

    /// Validate and send the typed limit for `exe_name`.
    ///
    /// Increases are not gated. Once a call is issued the input goes back to
    /// `0` whatever the outcome.
    pub fn submit_app_limit(&mut self, exe_name: &str) {
        match limits::validate_app_limit(self.limit_input(exe_name)) {
            Err(e) => {
                self.limit_messages
                    .insert(exe_name.to_owned(), Notice::error(e.app_message()));
            }
            Ok(max_time) => {
                self.engine.send(Request::UpdateAppLimit {
                    exe_name: exe_name.to_owned(),
                    max_time,
                    reply_tx: self.reply_tx.clone(),
                });
                self.limit_inputs.insert(exe_name.to_owned(), "0".to_owned());
            }
        }
    }

    // -- Refresh -------------------------------------------------------------

    pub fn refresh_time_limits(&mut self) {
        self.engine.send(Request::RefreshTimeLimits {
            reply_tx: self.reply_tx.clone(),
        });
    }

    // -- Status ------------------------------------------------------------

    pub fn status(&self) -> Option<&Notice> {
        self.status.as_ref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn last_synced(&self) -> Option<DateTime<Utc>> {
        self.last_synced
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // -- Engine events -----------------------------------------------------

    pub fn apply_event(&mut self, event: Event) {
        match event {
            Event::SnapshotFetched { snapshot } => {
                tracing::debug!("settings: snapshot with {} apps", snapshot.apps.len());
                self.apply_snapshot(snapshot);
            }
            Event::SnapshotFailed { message } => {
                self.loading = false;
                self.status = Some(Notice::error(format!("Failed to load settings: {message}")));
            }
            Event::ClassificationUpdated {
                exe_name,
                is_game,
                outcome,
            } => {
                let label = if is_game { "Game" } else { "Not Game" };
                self.status = Some(match outcome {
                    Outcome::Applied => Notice::info(format!("{exe_name} marked as: {label}")),
                    Outcome::Rejected(reason) => Notice::error(format!(
                        "Failed to update classification: {}",
                        reason.as_deref().unwrap_or("Unknown error")
                    )),
                    Outcome::Failed(e) => {
                        Notice::error(format!("Error updating classification: {e}"))
                    }
                });
            }
            Event::GlobalLimitUpdated { limit, outcome } => {
                self.global_message = Some(match outcome {
                    Outcome::Applied => {
                        tracing::info!("settings: global limit set to {limit}");
                        self.global_limit = limit;
                        Notice::info(format!(
                            "✅ Global limit set to {limit} mins. Stay strong, warrior."
                        ))
                    }
                    Outcome::Rejected(reason) => Notice::error(rejection_message(reason.as_deref())),
                    Outcome::Failed(_) => Notice::error(UPDATE_FAILED_MESSAGE),
                });
            }
            Event::AppLimitUpdated {
                exe_name,
                max_time,
                outcome,
            } => {
                let notice = match outcome {
                    Outcome::Applied => {
                        tracing::info!("settings: limit for {exe_name} set to {max_time}");
                        self.current_limits.insert(exe_name.clone(), max_time);
                        Notice::info(format!("✅ Limit for {exe_name} set to {max_time} mins."))
                    }
                    Outcome::Rejected(reason) => Notice::error(rejection_message(reason.as_deref())),
                    Outcome::Failed(_) => Notice::error(UPDATE_FAILED_MESSAGE),
                };
                self.limit_messages.insert(exe_name, notice);
            }
            Event::TimeLimitsRefreshed { outcome } => match outcome {
                Outcome::Applied => self.request_snapshot(),
                Outcome::Rejected(reason) => {
                    self.alert = Some(format!(
                        "Failed to refresh time limit list: {}",
                        reason.as_deref().unwrap_or("Unknown error")
                    ));
                }
                Outcome::Failed(_) => self.alert = Some(REFRESH_FAILED_ALERT.to_owned()),
            },
        }
    }
}
