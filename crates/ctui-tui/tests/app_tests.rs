//! App-level behaviour: job tracking, stale results and idle refresh

mod helpers;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ctui_core::test_support::{container_table, MockExecutor};
use ctui_core::Operation;
use ctui_provider::CommandOutput;
use ctui_tui::{AppContext, AppEvent, Event, Screen, ScreenId};
use helpers::{loaded_app, loaded_app_with, scripted_mock, LIST};
use std::sync::Arc;
use std::time::Duration;

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn container_ids(app: &ctui_tui::App) -> Vec<String> {
    match app.screen() {
        Screen::ContainerList(list) => list.containers().iter().map(|c| c.id.clone()).collect(),
        _ => panic!("expected container list"),
    }
}

/// The root screen loads containers on startup
#[tokio::test]
async fn test_startup_loads_containers() {
    let mock = scripted_mock();
    let app = loaded_app(&mock).await;

    assert_eq!(app.current_screen(), ScreenId::ContainerList);
    assert_eq!(container_ids(&app), vec!["abc123", "def456"]);
    assert!(!app.is_busy());
}

/// A second command is refused while the first is running
#[tokio::test]
async fn test_busy_rejects_second_command() {
    let mock = scripted_mock();
    let mut app = loaded_app(&mock).await;
    let before = mock.call_count();

    // Without settling, the refresh task has not been polled yet
    app.handle_key(key('r'));
    assert!(app.is_busy());
    app.handle_key(key('r'));
    assert_eq!(app.message(), Some("Another command is still running"));

    app.settle().await;
    assert!(!app.is_busy());
    assert_eq!(mock.call_count(), before + 1);
}

/// Results started on a screen that was left are dropped
#[tokio::test]
async fn test_stale_results_are_dropped() {
    let mock = scripted_mock();
    let mut app = loaded_app(&mock).await;
    let stale_epoch = app.navigator().epoch();

    app.send_key(KeyCode::Char('?'), KeyModifiers::NONE).await.unwrap();
    app.send_key(KeyCode::Esc, KeyModifiers::NONE).await.unwrap();
    assert_ne!(app.navigator().epoch(), stale_epoch);

    app.handle_app_event(AppEvent::Completed {
        epoch: stale_epoch,
        op: Operation::RefreshContainers,
        result: Ok(CommandOutput::success(
            container_table(&[("zzz999", "redis:7", "cache", "running")]),
            Duration::from_millis(1),
        )),
    });

    assert_eq!(container_ids(&app), vec!["abc123", "def456"]);
}

/// A failed refresh is shown instead of the list
#[tokio::test]
async fn test_refresh_failure_is_reported() {
    let mock = Arc::new(MockExecutor::new());
    mock.fail(LIST, 1, "Error: XPC connection error");
    let mut app = loaded_app(&mock).await;

    let screen = helpers::render_app(&mut app, 100, 24);
    assert!(screen.contains("XPC connection error"), "{}", screen);
}

/// Idle ticks refresh the list when refresh-on-focus is enabled
#[tokio::test]
async fn test_idle_ticks_refresh() {
    let mock = scripted_mock();
    let mut ctx = AppContext::default();
    ctx.preferences.refresh_on_focus = true;
    let mut app = loaded_app_with(&mock, ctx).await;
    let before = mock.call_count();

    for _ in 0..20 {
        app.handle_event(Event::Tick).unwrap();
    }
    app.settle().await;

    assert_eq!(mock.call_count(), before + 1);
    assert!(app.spinner_index() >= 20);
}

/// Idle ticks leave the list alone when refresh-on-focus is disabled
#[tokio::test]
async fn test_idle_ticks_respect_preference() {
    let mock = scripted_mock();
    let mut app = loaded_app(&mock).await;
    let before = mock.call_count();

    for _ in 0..40 {
        app.handle_event(Event::Tick).unwrap();
    }
    app.settle().await;

    assert_eq!(mock.call_count(), before);
}

/// Keys go to the open confirmation, not the screen underneath
#[tokio::test]
async fn test_confirmation_captures_keys() {
    let mock = scripted_mock();
    let mut app = loaded_app(&mock).await;

    app.send_key(KeyCode::Char('j'), KeyModifiers::NONE).await.unwrap();
    app.send_key(KeyCode::Char('d'), KeyModifiers::NONE).await.unwrap();
    app.send_key(KeyCode::Char('q'), KeyModifiers::NONE).await.unwrap();
    app.send_key(KeyCode::Char('i'), KeyModifiers::NONE).await.unwrap();

    assert!(!app.should_quit());
    assert_eq!(app.current_screen(), ScreenId::ContainerList);
    assert!(app.confirmation().is_some());
}

/// Failures of a start are summarised in the status message
#[tokio::test]
async fn test_command_failure_message() {
    let mock = scripted_mock();
    mock.fail(&["start", "def456"], 1, "Error: container is locked");
    let mut app = loaded_app(&mock).await;

    app.send_key(KeyCode::Char('j'), KeyModifiers::NONE).await.unwrap();
    app.send_key(KeyCode::Char('s'), KeyModifiers::NONE).await.unwrap();
    app.send_key(KeyCode::Char('y'), KeyModifiers::NONE).await.unwrap();

    let message = app.message().unwrap_or_default();
    assert!(message.starts_with("Start container failed"), "{}", message);
    assert!(message.contains("container is locked"), "{}", message);
}
