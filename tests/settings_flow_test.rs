use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use playtime_board::engine::{Engine, Event, StubEngine};
use playtime_board::navigation::{Navigator, SectionId};
use playtime_board::pager::TableController;
use playtime_board::settings::{DialogKind, SettingsController};
use playtime_board::types::{AppEntry, SettingsSnapshot, TimeLimitEntry};

fn fixture() -> SettingsSnapshot {
    serde_json::from_str(include_str!("fixtures/snapshot.json")).expect("valid fixture")
}

/// Start a stub-backed controller and apply the first snapshot.
fn loaded(location: &str) -> (SettingsController, Receiver<Event>) {
    let handle = StubEngine {
        snapshot: fixture(),
    }
    .start();
    let (tx, rx) = mpsc::channel();
    let mut ctl = SettingsController::new(handle, tx, Navigator::restore(location, None));
    ctl.request_snapshot();
    assert!(ctl.is_loading());
    pump(&mut ctl, &rx);
    assert!(!ctl.is_loading());
    (ctl, rx)
}

/// Apply the next engine event to the controller.
fn pump(ctl: &mut SettingsController, rx: &Receiver<Event>) {
    let event = rx
        .recv_timeout(Duration::from_secs(2))
        .expect("engine should reply within 2 seconds");
    ctl.apply_event(event);
}

fn assert_quiet(rx: &Receiver<Event>) {
    assert!(
        rx.recv_timeout(Duration::from_millis(200)).is_err(),
        "no backend call expected"
    );
}

#[test]
fn first_load_restores_section_from_location() {
    let (ctl, _rx) = loaded("/settings?section=time-limits");
    assert_eq!(ctl.active_section(), SectionId::TimeLimits);
    assert_eq!(ctl.global_limit(), 120);
    assert_eq!(ctl.current_limit("Minecraft.exe"), Some(90));
    assert_eq!(ctl.apps().rows()[0].name, "Minecraft.exe");
    assert!(ctl.last_synced().is_some());
    assert_eq!(ctl.page_indicator(), "Page 1 of 1");
}

#[test]
fn unknown_section_falls_back_to_first() {
    let (mut ctl, _rx) = loaded("/settings?section=bogus");
    assert_eq!(ctl.active_section(), SectionId::Classifications);
    ctl.next_section();
    assert_eq!(ctl.navigator().location(), "/settings?section=time-limits");
}

#[test]
fn unmarking_game_needs_three_confirmations() {
    let (mut ctl, rx) = loaded("/settings");
    ctl.toggle_game("Minecraft.exe");
    assert_eq!(ctl.dialog().map(|d| d.kind), Some(DialogKind::GameToggle));

    ctl.confirm_dialog();
    ctl.confirm_dialog();
    assert_eq!(ctl.dialog_progress(), Some((3, 3)));
    assert!(ctl.is_game("Minecraft.exe"));
    assert_quiet(&rx);

    ctl.confirm_dialog();
    assert!(ctl.dialog().is_none());
    assert!(!ctl.is_game("Minecraft.exe"));
    pump(&mut ctl, &rx);
    let status = ctl.status().expect("status after update");
    assert_eq!(status.text, "Minecraft.exe marked as: Not Game");
    assert!(!status.is_error);
}

#[test]
fn cancelled_unmark_keeps_game_and_sends_nothing() {
    let (mut ctl, rx) = loaded("/settings");
    ctl.toggle_game("steam.exe");
    ctl.confirm_dialog();
    ctl.cancel_dialog();
    assert!(ctl.dialog().is_none());
    assert!(ctl.is_game("steam.exe"));
    assert_quiet(&rx);
}

#[test]
fn global_increase_goes_through_gate() {
    let (mut ctl, rx) = loaded("/settings?section=time-limits");
    ctl.set_global_input("150");
    assert!(ctl.global_submit_enabled());
    ctl.submit_global_limit();
    assert_eq!(ctl.dialog().map(|d| d.kind), Some(DialogKind::LimitIncrease));
    assert_eq!(
        ctl.dialog_prompt().and_then(|p| p.title.as_deref()),
        Some("Level 1: Just Checking")
    );

    for _ in 0..3 {
        ctl.confirm_dialog();
    }
    pump(&mut ctl, &rx);
    assert_eq!(ctl.global_limit(), 150);
    assert!(!ctl.global_message().unwrap().is_error);
}

#[test]
fn global_decrease_applies_without_dialog() {
    let (mut ctl, rx) = loaded("/settings?section=time-limits");
    ctl.set_global_input("60");
    ctl.submit_global_limit();
    assert!(ctl.dialog().is_none());
    pump(&mut ctl, &rx);
    assert_eq!(ctl.global_limit(), 60);
}

#[test]
fn global_above_maximum_disables_submit() {
    let (mut ctl, rx) = loaded("/settings?section=time-limits");
    ctl.set_global_input("200");
    assert!(!ctl.global_submit_enabled());
    ctl.submit_global_limit();
    assert!(ctl.global_message().unwrap().is_error);
    assert_eq!(ctl.global_limit(), 120);
    assert_quiet(&rx);
}

#[test]
fn app_limit_validation_and_update() {
    let (mut ctl, rx) = loaded("/settings?section=time-limits");

    for bad in ["-5", "181"] {
        ctl.set_limit_input("steam.exe", bad);
        ctl.submit_app_limit("steam.exe");
        assert_eq!(
            ctl.limit_message("steam.exe").map(|n| n.text.as_str()),
            Some("🚫 Invalid limit. Please enter a number between 0-180.")
        );
    }
    assert_quiet(&rx);

    ctl.set_limit_input("steam.exe", "45");
    ctl.submit_app_limit("steam.exe");
    assert_eq!(ctl.limit_input("steam.exe"), "0");
    pump(&mut ctl, &rx);
    assert_eq!(ctl.current_limit("steam.exe"), Some(45));
    assert_eq!(
        ctl.limit_message("steam.exe").map(|n| n.text.as_str()),
        Some("✅ Limit for steam.exe set to 45 mins.")
    );
}

#[test]
fn refresh_reloads_snapshot() {
    let (mut ctl, rx) = loaded("/settings?section=time-limits");
    ctl.set_limit_input("steam.exe", "30");
    ctl.refresh_time_limits();
    // Refresh reply, then the follow-up snapshot.
    pump(&mut ctl, &rx);
    assert!(ctl.is_loading());
    pump(&mut ctl, &rx);
    assert!(!ctl.is_loading());
    assert_eq!(ctl.limit_input("steam.exe"), "0");
    assert!(ctl.alert().is_none());
}

#[test]
fn search_then_page_through_matches() {
    let rows: Vec<AppEntry> = (0..25)
        .map(|i| AppEntry {
            name: if i % 2 == 0 {
                format!("Lab{i:02}.exe")
            } else {
                format!("zz{i:02}.exe")
            },
            is_game: false,
            user_marked: false,
        })
        .collect();
    let mut table = TableController::new(rows);
    assert_eq!(table.total_pages(), 3);

    table.set_search("ab");
    assert_eq!(table.filtered_count(), 13);
    assert_eq!(table.total_pages(), 2);
    assert_eq!(table.page_rows().len(), 10);
    assert_eq!(table.page_rows()[0].name, "Lab00.exe");

    assert!(table.next_page());
    let names: Vec<&str> = table.page_rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Lab20.exe", "Lab22.exe", "Lab24.exe"]);
    assert!(!table.next_page());
    assert_eq!(table.page_indicator(), "Page 2 of 2");

    table.set_search("nothing-matches");
    assert_eq!(table.total_pages(), 0);
    assert!(table.page_rows().is_empty());
}

#[test]
fn search_applies_to_active_section_only() {
    let (mut ctl, _rx) = loaded("/settings?section=time-limits");
    ctl.set_search("mine");
    assert_eq!(ctl.limits().filtered_count(), 1);
    assert_eq!(
        ctl.selected_limit().map(|l: &TimeLimitEntry| l.exe_name.as_str()),
        Some("Minecraft.exe")
    );
    assert_eq!(ctl.apps().query(), "");
}
