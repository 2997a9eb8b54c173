use super::*;
use crate::config::AutomationConfig;
use crate::controller::AutomationEvent;
use crate::page::{Page, SimulatedPage};
use crate::storage::{MemorySettingsStore, SettingsStore, StorageScope};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

fn spawn_engine() -> (Arc<SimulatedPage>, AutomationController, CommandHandle) {
    let page = Arc::new(SimulatedPage::new(600.0, 2600.0));
    let store = Arc::new(MemorySettingsStore::new());
    let controller =
        AutomationController::new(page.clone(), store, AutomationConfig::default());
    let (handle, _task) = spawn_dispatcher(controller.clone());
    (page, controller, handle)
}

/// Store whose writes always fail, for exercising the error reply path.
struct BrokenStore;

#[async_trait]
impl SettingsStore for BrokenStore {
    async fn get(&self, _scope: StorageScope, _key: &str) -> AutomationResult<Option<Value>> {
        Ok(None)
    }

    async fn set(&self, _scope: StorageScope, _key: &str, _value: Value) -> AutomationResult<()> {
        Err(AutomationError::Storage("disk full".to_string()))
    }
}

#[tokio::test(start_paused = true)]
async fn test_start_command_acknowledges_and_starts() {
    let (_page, controller, handle) = spawn_engine();

    let response = handle
        .send(Command::Start {
            settings: AutomationSettings::default(),
        })
        .await
        .unwrap();

    assert!(matches!(response, CommandResponse::Ack { success: true }));
    assert!(controller.is_active());
}

#[tokio::test(start_paused = true)]
async fn test_stop_command_acknowledges_and_stops() {
    let (_page, controller, handle) = spawn_engine();

    handle
        .send(Command::Start {
            settings: AutomationSettings::default(),
        })
        .await
        .unwrap();
    let response = handle.send(Command::Stop).await.unwrap();

    assert!(matches!(response, CommandResponse::Ack { success: true }));
    assert!(!controller.is_active());
}

#[tokio::test(start_paused = true)]
async fn test_status_command_reports_inactive_before_start() {
    let (_page, _controller, handle) = spawn_engine();

    let response = handle.send(Command::Status).await.unwrap();
    match response {
        CommandResponse::Status(status) => {
            assert!(!status.is_active);
            assert!(!status.last_activity.is_empty());
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_scroll_to_bottom_command_when_already_there() {
    let (page, _controller, handle) = spawn_engine();
    page.scroll_to(2000.0);

    let response = handle
        .send(Command::ScrollToBottom { speed: 5 })
        .await
        .unwrap();
    match response {
        CommandResponse::Scroll(outcome) => {
            assert!(outcome.reached_bottom);
            assert_eq!(outcome.current_position, 2000.0);
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_handler_failure_becomes_error_reply() {
    let page = Arc::new(SimulatedPage::new(600.0, 2600.0));
    let controller =
        AutomationController::new(page, Arc::new(BrokenStore), AutomationConfig::default());
    let (handle, _task) = spawn_dispatcher(controller);

    let response = handle
        .send(Command::Start {
            settings: AutomationSettings::default(),
        })
        .await
        .unwrap();
    match response {
        CommandResponse::Error { success, error } => {
            assert!(!success);
            assert!(error.contains("disk full"));
        }
        other => panic!("unexpected response: {other:?}"),
    }

    // The dispatcher survives the failure and keeps answering.
    let response = handle.send(Command::Status).await.unwrap();
    assert!(matches!(response, CommandResponse::Status(_)));
}

#[test]
fn test_command_wire_format() {
    let command: Command = serde_json::from_value(json!({
        "action": "start",
        "settings": {"refreshTime": 60, "scrollSpeed": 3, "continuousScroll": true}
    }))
    .unwrap();

    match command {
        Command::Start { settings } => {
            assert_eq!(settings.refresh_time, 60);
            assert_eq!(settings.scroll_speed, 3);
            assert!(settings.continuous_scroll);
        }
        other => panic!("unexpected command: {other:?}"),
    }

    let command: Command =
        serde_json::from_value(json!({"action": "scrollToBottom"})).unwrap();
    assert!(matches!(command, Command::ScrollToBottom { speed: 5 }));
}

#[test]
fn test_response_wire_format() {
    let ack = serde_json::to_value(CommandResponse::Ack { success: true }).unwrap();
    assert_eq!(ack, json!({"success": true}));

    let error = serde_json::to_value(CommandResponse::Error {
        success: false,
        error: "boom".to_string(),
    })
    .unwrap();
    assert_eq!(error, json!({"success": false, "error": "boom"}));

    // Scroll failures reply with a bare error, no success flag.
    let scroll_error = serde_json::to_value(CommandResponse::ScrollError {
        error: "page gone".to_string(),
    })
    .unwrap();
    assert_eq!(scroll_error, json!({"error": "page gone"}));

    let parsed: CommandResponse =
        serde_json::from_value(json!({"error": "page gone"})).unwrap();
    assert!(matches!(parsed, CommandResponse::ScrollError { .. }));
}

#[test]
fn test_event_wire_format() {
    let event = serde_json::to_value(AutomationEvent::HumanActivity).unwrap();
    assert_eq!(event, json!({"action": "humanActivity"}));
}
