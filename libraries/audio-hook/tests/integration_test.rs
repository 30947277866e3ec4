//! Integration tests for the event-driven controller
//!
//! Drives the controller the way a host would: pushed `play` / `pause`
//! events, natural completion from the engine, and element teardown.


use audio_hook::{ControllerEvent, ControllerState, HandleId, HookError, PlaybackIntent};
use serde_json::json;
use test_helpers::{mounted, HandleStatus};

const ENDED: &str = "audio-ended";

#[test]
fn test_full_session_scenario() {
    let (mut controller, engine, binding) = mounted();

    controller
        .handle_event("play", &json!({ "music": "track1.mp3" }))
        .unwrap();
    assert_eq!(controller.state(), ControllerState::Playing);
    assert_eq!(controller.current_media().unwrap().as_str(), "track1.mp3");
    assert_eq!(binding.count(ENDED), 0);

    // Natural end: exactly one notification, state is left to the host
    assert!(engine.finish(0));
    assert_eq!(binding.count(ENDED), 1);
    assert_eq!(controller.state(), ControllerState::Playing);
    assert!(controller.has_finished());

    // A second `ended` from the same handle is swallowed
    assert!(!engine.finish(0));
    assert_eq!(binding.count(ENDED), 1);

    controller
        .handle_event("play", &json!({ "music": "track2.mp3" }))
        .unwrap();
    assert!(!engine.fire_stale(0));
    assert_eq!(binding.count(ENDED), 1);
    assert_eq!(engine.media(1), "track2.mp3");
    assert_eq!(engine.status(1), HandleStatus::Playing);
    assert!(!controller.has_finished());

    controller.handle_event("pause", &json!({})).unwrap();
    assert_eq!(controller.state(), ControllerState::Idle);
    assert_eq!(engine.status(1), HandleStatus::Stopped);
    assert_eq!(binding.count(ENDED), 1);

    controller.destroy();
    assert_eq!(engine.registered_listeners(), 0);
    assert_eq!(engine.playing_count(), 0);
}

#[test]
fn test_superseded_handle_never_notifies() {
    let (mut controller, engine, binding) = mounted();

    controller
        .handle_event("play", &json!({ "music": "a.mp3" }))
        .unwrap();
    controller
        .handle_event("play", &json!({ "music": "b.mp3" }))
        .unwrap();

    assert_eq!(engine.status(0), HandleStatus::Stopped);
    assert_eq!(engine.playing_count(), 1);
    assert_eq!(engine.registered_listeners(), 1);
    assert_eq!(controller.current_media().unwrap().as_str(), "b.mp3");

    // Even a backend that still delivers `ended` to A's old listener stays silent
    assert!(!engine.finish(0));
    assert!(!engine.fire_stale(0));
    assert_eq!(binding.count(ENDED), 0);

    assert!(engine.finish(1));
    assert_eq!(binding.count(ENDED), 1);
}

#[test]
fn test_stopped_handle_never_notifies() {
    let (mut controller, engine, binding) = mounted();

    controller
        .handle_event("play", &json!({ "music": "a.mp3" }))
        .unwrap();
    controller.handle_event("pause", &json!({})).unwrap();

    assert!(!engine.fire_stale(0));
    assert_eq!(binding.count(ENDED), 0);
    assert_eq!(engine.registered_listeners(), 0);
}

#[test]
fn test_empty_music_stops_playback() {
    let (mut controller, engine, _binding) = mounted();

    controller
        .handle_event("play", &json!({ "music": "a.mp3" }))
        .unwrap();
    controller
        .handle_event("play", &json!({ "music": "" }))
        .unwrap();

    assert_eq!(controller.state(), ControllerState::Idle);
    assert_eq!(engine.handle_count(), 1);
    assert_eq!(engine.status(0), HandleStatus::Stopped);
}

#[test]
fn test_pause_while_idle_is_noop() {
    let (mut controller, engine, binding) = mounted();

    controller.handle_event("pause", &json!({})).unwrap();
    controller.accept_intent(PlaybackIntent::Stop).unwrap();

    assert_eq!(controller.state(), ControllerState::Idle);
    assert_eq!(engine.handle_count(), 0);
    assert!(binding.pushed.borrow().is_empty());
    assert!(!controller.has_pending_events());
}

#[test]
fn test_same_track_replayed_gets_fresh_handle() {
    let (mut controller, engine, binding) = mounted();

    for _ in 0..3 {
        controller
            .handle_event("play", &json!({ "music": "loop.ogg" }))
            .unwrap();
    }

    assert_eq!(engine.handle_count(), 3);
    assert_eq!(engine.playing_count(), 1);
    assert_eq!(controller.current_handle(), Some(HandleId(3)));

    engine.finish(0);
    engine.finish(1);
    assert_eq!(binding.count(ENDED), 0);
    engine.finish(2);
    assert_eq!(binding.count(ENDED), 1);
}

#[test]
fn test_natural_end_unregisters_listener() {
    let (mut controller, engine, binding) = mounted();

    controller
        .handle_event("play", &json!({ "music": "a.mp3" }))
        .unwrap();
    assert_eq!(engine.registered_listeners(), 1);

    assert!(engine.finish(0));
    assert_eq!(engine.registered_listeners(), 0);
    assert_eq!(controller.state(), ControllerState::Playing);
    assert!(controller.has_finished());

    controller.destroy();
    assert_eq!(engine.registered_listeners(), 0);
    assert_eq!(binding.count(ENDED), 1);
}

#[test]
fn test_host_restarts_after_completion() {
    let (mut controller, engine, binding) = mounted();

    controller
        .handle_event("play", &json!({ "music": "a.mp3" }))
        .unwrap();
    engine.finish(0);

    // Host reacts to `audio-ended` by advancing to the next track
    controller
        .handle_event("play", &json!({ "music": "b.mp3" }))
        .unwrap();
    engine.finish(1);

    assert_eq!(binding.count(ENDED), 2);
    assert_eq!(engine.registered_listeners(), 0);
}

#[test]
fn test_ended_payload_is_empty_object() {
    let (mut controller, engine, binding) = mounted();

    controller
        .handle_event("play", &json!({ "music": "a.mp3" }))
        .unwrap();
    engine.finish(0);

    let pushed = binding.pushed.borrow();
    assert_eq!(pushed.len(), 1);
    assert_eq!(pushed[0].name, ENDED);
    assert_eq!(pushed[0].payload, json!({}));
}

#[test]
fn test_custom_event_names() {
    let config = audio_hook::ControllerConfig {
        play_event: "start-track".to_string(),
        pause_event: "silence".to_string(),
        ended_event: "track-done".to_string(),
        ..Default::default()
    };
    let (mut controller, engine, binding) = test_helpers::setup(config);
    controller.mount().unwrap();

    controller
        .handle_event("start-track", &json!({ "music": "a.mp3" }))
        .unwrap();
    engine.finish(0);
    assert_eq!(binding.count("track-done"), 1);
    assert_eq!(binding.count(ENDED), 0);

    controller.handle_event("silence", &json!(null)).unwrap();
    assert_eq!(controller.state(), ControllerState::Idle);

    let err = controller
        .handle_event("play", &json!({ "music": "a.mp3" }))
        .unwrap_err();
    assert!(matches!(err, HookError::UnknownEvent(_)));
}

#[test]
fn test_invalid_payload_leaves_state_untouched() {
    let (mut controller, engine, _binding) = mounted();

    controller
        .handle_event("play", &json!({ "music": "a.mp3" }))
        .unwrap();
    let err = controller
        .handle_event("play", &json!({ "song": "b.mp3" }))
        .unwrap_err();

    assert!(matches!(err, HookError::InvalidPayload { .. }));
    assert_eq!(controller.state(), ControllerState::Playing);
    assert_eq!(engine.status(0), HandleStatus::Playing);
}

#[test]
fn test_events_drained_in_order() {
    let (mut controller, _engine, _binding) = mounted();

    controller
        .handle_event("play", &json!({ "music": "a.mp3" }))
        .unwrap();
    controller
        .handle_event("play", &json!({ "music": "b.mp3" }))
        .unwrap();
    controller.destroy();

    let events = controller.drain_events();
    let kinds: Vec<&str> = events
        .iter()
        .map(|e| match e {
            ControllerEvent::StateChanged { .. } => "state",
            ControllerEvent::HandleStarted { .. } => "started",
            ControllerEvent::HandleRetired { .. } => "retired",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["started", "state", "retired", "started", "retired", "state"]
    );
    assert_eq!(
        events.last(),
        Some(&ControllerEvent::StateChanged {
            state: ControllerState::Idle
        })
    );
}
