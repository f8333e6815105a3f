use approx::assert_abs_diff_eq;
use vectorplay_core::{
    Color, EventKind, EventPayload, FileType, Listener, LoopMode, PlaybackError, PlaybackState,
    PlayerConfig, SkipReason, TickHandle, TickOutcome,
};
use vectorplay_test_fixtures::Harness;

use EventKind::*;

fn harness(config: PlayerConfig) -> Harness {
    Harness::new(config).expect("harness builds")
}

fn loaded(name: &str, config: PlayerConfig) -> Harness {
    let mut h = harness(config);
    assert!(h.load(name).expect("fixture exists"), "{name} should load");
    h
}

#[test]
fn load_play_and_run_to_completion() {
    let mut h = harness(PlayerConfig::default());
    assert_eq!(h.player.state(), PlaybackState::Idle);

    assert!(h.load("two-second").unwrap());
    assert_eq!(h.player.state(), PlaybackState::Stopped);
    assert_eq!(h.player.total_frames(), 60);
    assert_eq!(h.recorder.transitions(), vec![Load]);

    h.player.play().unwrap();
    assert_eq!(h.player.state(), PlaybackState::Playing);
    assert!(h.player.pending_tick().is_some());

    let outcomes = h.run_ticks(0.5, 10);
    assert_eq!(outcomes.len(), 4);
    assert_eq!(outcomes[0], TickOutcome::Drawn { fraction: 0.25 });
    assert_eq!(outcomes[3], TickOutcome::Finished { fraction: 1.0 });

    assert_eq!(h.player.state(), PlaybackState::Stopped);
    assert_eq!(h.recorder.transitions(), vec![Load, Play, Complete, Stop]);
    assert_eq!(h.player.fraction(), 1.0);
    assert!(h.player.pending_tick().is_none());
    assert!(!h.time.has_pending());
}

#[test]
fn load_event_carries_timing() {
    let h = loaded("two-second", PlayerConfig::default());
    let events = h.recorder.events();
    assert_eq!(
        events[0].payload,
        EventPayload::Load {
            duration: 2.0,
            fps: 30.0,
            total_frames: 60
        }
    );
    assert_eq!(events[0].player, h.player.id());
    // First frame is drawn right after load
    assert_eq!(events[1].kind, Frame);
    assert_eq!(events[1].fraction(), Some(0.0));
}

#[test]
fn frame_events_follow_draws() {
    let mut h = loaded("two-second", PlayerConfig::default());
    h.player.play().unwrap();
    h.run_ticks(0.5, 2);

    let frames: Vec<_> = h
        .recorder
        .events()
        .into_iter()
        .filter(|e| e.kind == Frame)
        .map(|e| e.payload)
        .collect();
    assert_eq!(
        frames,
        vec![
            EventPayload::Frame { fraction: 0.0, frame: 0 },
            EventPayload::Frame { fraction: 0.25, frame: 15 },
            EventPayload::Frame { fraction: 0.5, frame: 30 },
        ]
    );
    assert_eq!(h.surface.borrow().presents, 3);
}

#[test]
fn freeze_round_trip_does_not_leak_time() {
    let mut h = loaded("one-second", PlayerConfig::default());
    h.player.play().unwrap();
    h.run_ticks(0.25, 1);
    assert_abs_diff_eq!(h.player.fraction(), 0.25, epsilon = 1e-12);

    h.player.freeze().unwrap();
    assert_eq!(h.player.state(), PlaybackState::Frozen);
    assert_eq!(h.player.snapshot().frozen_from, Some(PlaybackState::Playing));
    assert!(!h.time.has_pending());

    h.time.advance(10.0);
    h.player.unfreeze().unwrap();
    assert_eq!(h.player.state(), PlaybackState::Playing);

    let resumed = h.run_ticks(0.0, 1);
    assert_eq!(
        resumed,
        vec![TickOutcome::Skipped {
            fraction: 0.25,
            reason: SkipReason::Unchanged
        }]
    );
    h.run_ticks(0.25, 1);
    assert_abs_diff_eq!(h.player.fraction(), 0.5, epsilon = 1e-12);

    let events = h.recorder.events();
    let freeze = events.iter().find(|e| e.kind == Freeze).unwrap();
    assert_eq!(freeze.payload, EventPayload::Freeze { prior: PlaybackState::Playing });
    let unfreeze = events.iter().find(|e| e.kind == Unfreeze).unwrap();
    assert_eq!(
        unfreeze.payload,
        EventPayload::Unfreeze { restored: PlaybackState::Playing }
    );
}

#[test]
fn freeze_while_paused_restores_paused() {
    let mut h = loaded("one-second", PlayerConfig::default());
    h.player.play().unwrap();
    h.run_ticks(0.25, 1);
    h.player.pause().unwrap();
    h.player.freeze().unwrap();
    h.time.advance(5.0);
    h.player.unfreeze().unwrap();
    assert_eq!(h.player.state(), PlaybackState::Paused);
    assert!(h.player.pending_tick().is_none());

    h.player.play().unwrap();
    h.run_ticks(0.25, 1);
    assert_abs_diff_eq!(h.player.fraction(), 0.5, epsilon = 1e-12);
}

#[test]
fn pause_and_resume_continue_from_same_position() {
    let mut h = loaded("two-second", PlayerConfig::default());
    h.player.play().unwrap();
    h.run_ticks(0.5, 1);
    h.player.pause().unwrap();
    assert_eq!(h.player.state(), PlaybackState::Paused);

    h.time.advance(3.0);
    h.player.play().unwrap();
    h.run_ticks(0.5, 1);
    assert_abs_diff_eq!(h.player.fraction(), 0.5, epsilon = 1e-12);
    assert_eq!(h.recorder.transitions(), vec![Load, Play, Pause, Play]);
}

#[test]
fn disallowed_operations_are_rejected_without_side_effects() {
    let mut h = harness(PlayerConfig::default());
    let err = h.player.play().unwrap_err();
    assert_eq!(
        err,
        PlaybackError::InvalidTransition {
            current: PlaybackState::Idle,
            operation: "play".to_string()
        }
    );
    assert!(err.is_recoverable());

    assert!(h.load("one-second").unwrap());
    assert!(h.player.pause().is_err());
    assert!(h.player.stop().is_err());
    assert!(h.player.unfreeze().is_err());

    h.player.freeze().unwrap();
    assert!(h.player.freeze().is_err());
    assert!(h.player.play().is_err());
    assert_eq!(h.player.state(), PlaybackState::Frozen);
    h.player.unfreeze().unwrap();
    assert_eq!(h.player.state(), PlaybackState::Stopped);
}

#[test]
fn stop_resets_to_first_frame_and_cancels_tick() {
    let mut h = loaded("two-second", PlayerConfig::default());
    h.player.play().unwrap();
    h.run_ticks(0.5, 2);
    assert_abs_diff_eq!(h.player.fraction(), 0.5, epsilon = 1e-12);

    h.player.stop().unwrap();
    assert_eq!(h.player.state(), PlaybackState::Stopped);
    assert_eq!(h.player.fraction(), 0.0);
    assert_eq!(h.player.current_frame(), 0);
    assert!(h.player.pending_tick().is_none());
    assert_eq!(h.time.cancelled_count(), 1);

    let kinds = h.recorder.kinds();
    assert_eq!(&kinds[kinds.len() - 2..], &[Stop, Frame]);
}

#[test]
fn stale_ticks_are_ignored() {
    let mut h = loaded("two-second", PlayerConfig::default());
    h.player.play().unwrap();
    let first = h.player.pending_tick().unwrap();

    assert_eq!(h.player.tick(TickHandle(999)), TickOutcome::Stale);
    assert_eq!(h.player.pending_tick(), Some(first));

    h.player.pause().unwrap();
    assert_eq!(h.player.tick(first), TickOutcome::Stale);
    assert_eq!(h.player.state(), PlaybackState::Paused);
}

#[test]
fn clock_regressions_are_clamped() {
    let mut h = loaded("two-second", PlayerConfig::default());
    h.player.play().unwrap();
    h.run_ticks(0.5, 1);

    h.time.set(0.2);
    let outcome = h.run_ticks(0.0, 1);
    assert_eq!(
        outcome,
        vec![TickOutcome::Skipped {
            fraction: 0.25,
            reason: SkipReason::Unchanged
        }]
    );
}

#[test]
fn load_failure_errors_and_recovers_on_next_load() {
    let mut h = harness(PlayerConfig::default());
    h.fakes.fail_next_load("corrupt payload");
    assert!(!h.load("one-second").unwrap());
    assert_eq!(h.player.state(), PlaybackState::Errored);
    assert_eq!(h.recorder.transitions(), vec![Error]);

    let events = h.recorder.events();
    assert!(events[0].error_message().unwrap().contains("corrupt payload"));
    assert!(h.player.freeze().is_err());

    assert!(h.load("one-second").unwrap());
    assert_eq!(h.player.state(), PlaybackState::Stopped);
}

#[test]
fn invalid_timing_is_a_session_error() {
    for name in ["zero-duration", "sub-frame"] {
        let mut h = harness(PlayerConfig::default());
        assert!(!h.load(name).unwrap());
        assert_eq!(h.player.state(), PlaybackState::Errored);
        let events = h.recorder.events();
        match &events[0].payload {
            EventPayload::Error { category, .. } => assert_eq!(category, "session"),
            other => panic!("expected error payload, got {other:?}"),
        }
        assert_eq!(h.backend.borrow().disposed, 1);
        assert!(!h.player.is_loaded());
    }
}

#[test]
fn render_fault_stops_the_loop() {
    let mut h = loaded("render-fault", PlayerConfig::default());
    h.player.play().unwrap();

    let outcomes = h.run_ticks(0.25, 5);
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[1], TickOutcome::Faulted);
    assert_eq!(h.player.state(), PlaybackState::Errored);
    assert!(!h.time.has_pending());
    assert_eq!(h.recorder.transitions(), vec![Load, Play, Error]);
}

#[test]
fn frames_without_damage_are_skipped_but_completion_still_runs() {
    let mut h = loaded("still-frame", PlayerConfig::default());
    assert_eq!(h.surface.borrow().presents, 0);

    h.player.play().unwrap();
    let outcomes = h.run_ticks(0.25, 10);
    assert_eq!(outcomes.len(), 4);
    assert!(outcomes[..3].iter().all(|o| matches!(
        o,
        TickOutcome::Skipped {
            reason: SkipReason::NoDamage,
            ..
        }
    )));
    assert_eq!(outcomes[3], TickOutcome::Finished { fraction: 1.0 });
    assert_eq!(h.recorder.count(Frame), 0);
    assert_eq!(h.recorder.transitions(), vec![Load, Play, Complete, Stop]);
    assert_eq!(h.surface.borrow().presents, 0);
}

#[test]
fn loop_mode_emits_milestones_and_keeps_playing() {
    let config = PlayerConfig {
        loop_mode: LoopMode::Loop,
        ..Default::default()
    };
    let mut h = loaded("one-second", config);
    h.player.play().unwrap();
    let outcomes = h.run_ticks(0.25, 10);
    assert_eq!(outcomes.len(), 10);
    assert_eq!(h.player.state(), PlaybackState::Playing);

    let loops: Vec<_> = h
        .recorder
        .events()
        .into_iter()
        .filter(|e| e.kind == Complete)
        .map(|e| e.payload)
        .collect();
    assert_eq!(
        loops,
        vec![
            EventPayload::Complete { fraction: 0.0, loops: 1 },
            EventPayload::Complete { fraction: 0.0, loops: 2 },
        ]
    );
    assert_eq!(h.recorder.count(Stop), 0);
}

#[test]
fn loop_count_stops_after_requested_plays() {
    let config = PlayerConfig {
        loop_mode: LoopMode::Loop,
        loop_count: Some(2),
        ..Default::default()
    };
    let mut h = loaded("one-second", config);
    h.player.play().unwrap();
    let outcomes = h.run_ticks(0.25, 20);
    assert_eq!(outcomes.len(), 8);
    assert_eq!(outcomes[7], TickOutcome::Finished { fraction: 1.0 });
    assert_eq!(h.player.state(), PlaybackState::Stopped);
    assert_eq!(h.recorder.transitions(), vec![Load, Play, Complete, Complete, Stop]);
}

#[test]
fn bounce_count_includes_the_return_pass() {
    let config = PlayerConfig {
        loop_mode: LoopMode::Bounce,
        loop_count: Some(1),
        ..Default::default()
    };
    let mut h = loaded("one-second", config);
    h.player.play().unwrap();
    let outcomes = h.run_ticks(0.25, 20);
    assert_eq!(outcomes.len(), 8);
    assert_eq!(outcomes[3], TickOutcome::Drawn { fraction: 1.0 });
    assert_eq!(outcomes[5], TickOutcome::Drawn { fraction: 0.5 });
    assert_eq!(outcomes[7], TickOutcome::Finished { fraction: 0.0 });
    assert_eq!(h.player.snapshot().loops_completed, 2);
}

#[test]
fn late_tick_stops_on_the_limit_boundary() {
    let config = PlayerConfig {
        loop_mode: LoopMode::Bounce,
        loop_count: Some(1),
        ..Default::default()
    };
    let mut h = loaded("one-second", config);
    h.player.play().unwrap();
    // One tick lands a pass and a half past the end of the only round trip
    let outcomes = h.run_ticks(3.5, 1);
    assert_eq!(outcomes, vec![TickOutcome::Finished { fraction: 0.0 }]);
    assert_eq!(h.player.snapshot().loops_completed, 2);
    let completes: Vec<_> = h
        .recorder
        .events()
        .into_iter()
        .filter(|e| e.kind == Complete)
        .map(|e| e.payload)
        .collect();
    assert_eq!(completes, vec![EventPayload::Complete { fraction: 0.0, loops: 2 }]);

    let config = PlayerConfig {
        loop_mode: LoopMode::Loop,
        loop_count: Some(2),
        ..Default::default()
    };
    let mut h = loaded("one-second", config);
    h.player.play().unwrap();
    let outcomes = h.run_ticks(5.25, 1);
    assert_eq!(outcomes, vec![TickOutcome::Finished { fraction: 1.0 }]);
    assert_eq!(h.player.snapshot().loops_completed, 2);
}

#[test]
fn seek_during_bounce_return_keeps_direction() {
    let config = PlayerConfig {
        loop_mode: LoopMode::Bounce,
        ..Default::default()
    };
    let mut h = loaded("one-second", config);
    h.player.play().unwrap();
    let outcomes = h.run_ticks(0.25, 5);
    assert_eq!(outcomes[4], TickOutcome::Drawn { fraction: 0.75 });

    h.player.seek_to(0.5).unwrap();
    assert_eq!(h.player.fraction(), 0.5);
    assert_eq!(h.run_ticks(0.25, 1), vec![TickOutcome::Drawn { fraction: 0.25 }]);
    assert_eq!(h.run_ticks(0.25, 1), vec![TickOutcome::Drawn { fraction: 0.0 }]);
    assert_eq!(h.run_ticks(0.25, 1), vec![TickOutcome::Drawn { fraction: 0.25 }]);
}

#[test]
fn intermission_holds_the_boundary_frame() {
    let config = PlayerConfig {
        loop_mode: LoopMode::Loop,
        intermission: 0.5,
        ..Default::default()
    };
    let mut h = loaded("one-second", config);
    h.player.play().unwrap();
    let outcomes = h.run_ticks(0.25, 7);
    assert_eq!(outcomes[3], TickOutcome::Drawn { fraction: 1.0 });
    assert_eq!(
        outcomes[4],
        TickOutcome::Skipped {
            fraction: 1.0,
            reason: SkipReason::Unchanged
        }
    );
    assert_eq!(outcomes[5], TickOutcome::Drawn { fraction: 0.0 });
    assert_eq!(outcomes[6], TickOutcome::Drawn { fraction: 0.25 });
    assert_eq!(h.recorder.count(Complete), 1);

    assert!(h.player.set_intermission(-1.0).is_err());
    assert!(h.player.set_intermission(f64::NAN).is_err());
    assert_eq!(h.player.config().intermission, 0.5);
}

#[test]
fn frozen_time_does_not_eat_the_intermission() {
    let config = PlayerConfig {
        loop_mode: LoopMode::Loop,
        intermission: 0.5,
        ..Default::default()
    };
    let mut h = loaded("one-second", config);
    h.player.play().unwrap();
    let outcomes = h.run_ticks(0.25, 4);
    assert_eq!(outcomes[3], TickOutcome::Drawn { fraction: 1.0 });

    h.time.advance(0.25);
    h.player.freeze().unwrap();
    h.time.advance(10.0);
    h.player.unfreeze().unwrap();

    assert_eq!(
        h.run_ticks(0.0, 1),
        vec![TickOutcome::Skipped {
            fraction: 1.0,
            reason: SkipReason::Unchanged
        }]
    );
    assert_eq!(h.run_ticks(0.25, 1), vec![TickOutcome::Drawn { fraction: 0.0 }]);
}

#[test]
fn reverse_rate_plays_from_the_end() {
    let config = PlayerConfig {
        rate: -1.0,
        ..Default::default()
    };
    let mut h = loaded("two-second", config);
    h.player.play().unwrap();
    let outcomes = h.run_ticks(0.5, 10);
    assert_eq!(outcomes[0], TickOutcome::Drawn { fraction: 0.75 });
    assert_eq!(outcomes.last(), Some(&TickOutcome::Finished { fraction: 0.0 }));
}

#[test]
fn rate_change_mid_play_is_continuous() {
    let mut h = loaded("two-second", PlayerConfig::default());
    h.player.play().unwrap();
    h.run_ticks(0.5, 1);
    h.player.set_rate(2.0).unwrap();
    h.run_ticks(0.5, 1);
    assert_abs_diff_eq!(h.player.fraction(), 0.75, epsilon = 1e-12);

    assert!(matches!(
        h.player.set_rate(f64::NAN),
        Err(PlaybackError::Config { .. })
    ));
}

#[test]
fn loop_mode_change_mid_play_keeps_position() {
    let mut h = loaded("one-second", PlayerConfig::default());
    h.player.play().unwrap();
    h.run_ticks(0.5, 1);
    h.player.set_loop_mode(LoopMode::Loop);
    h.run_ticks(0.75, 1);
    assert_abs_diff_eq!(h.player.fraction(), 0.25, epsilon = 1e-12);
    assert_eq!(h.player.state(), PlaybackState::Playing);
    assert_eq!(h.recorder.count(Complete), 1);
}

#[test]
fn seek_validates_and_goes_through_the_gate() {
    let mut h = harness(PlayerConfig::default());
    assert!(matches!(
        h.player.seek_to(1.5),
        Err(PlaybackError::InvalidFraction { .. })
    ));
    assert!(matches!(
        h.player.seek_to(0.5),
        Err(PlaybackError::InvalidTransition { .. })
    ));

    assert!(h.load("two-second").unwrap());
    h.player.seek_to(0.5).unwrap();
    assert_eq!(h.player.current_frame(), 30);
    let skips = h.player.gate().skips();
    h.player.seek_to(0.5).unwrap();
    assert_eq!(h.player.gate().skips(), skips + 1);

    // Playing from a scrubbed position starts there
    h.player.play().unwrap();
    h.run_ticks(0.5, 1);
    assert_abs_diff_eq!(h.player.fraction(), 0.75, epsilon = 1e-12);
}

#[test]
fn seek_while_playing_moves_the_clock() {
    let mut h = loaded("two-second", PlayerConfig::default());
    h.player.play().unwrap();
    h.run_ticks(0.5, 1);
    h.player.seek_to(0.8).unwrap();
    assert_abs_diff_eq!(h.player.fraction(), 0.8, epsilon = 1e-12);
    h.run_ticks(0.2, 1);
    assert_abs_diff_eq!(h.player.fraction(), 0.9, epsilon = 1e-9);
}

#[test]
fn autoplay_starts_after_load() {
    let config = PlayerConfig {
        autoplay: true,
        ..Default::default()
    };
    let h = loaded("one-second", config);
    assert_eq!(h.player.state(), PlaybackState::Playing);
    assert_eq!(h.recorder.transitions(), vec![Load, Play]);
}

#[test]
fn hiding_freezes_and_showing_unfreezes() {
    let mut h = loaded("one-second", PlayerConfig::default());
    h.player.play().unwrap();
    h.player.set_visible(false);
    assert_eq!(h.player.state(), PlaybackState::Frozen);
    h.player.set_visible(true);
    assert_eq!(h.player.state(), PlaybackState::Playing);

    // A manual freeze is not undone by visibility changes
    h.player.freeze().unwrap();
    h.player.set_visible(false);
    h.player.set_visible(true);
    assert_eq!(h.player.state(), PlaybackState::Frozen);
}

#[test]
fn resize_and_background_redraw_when_idle() {
    let mut h = loaded("two-second", PlayerConfig::default());
    assert_eq!(h.surface.borrow().presents, 1);

    h.player.resize(64, 32).unwrap();
    assert_eq!(h.surface.borrow().resizes, vec![(64, 32)]);
    assert_eq!(h.surface.borrow().presents, 2);
    assert!(h.player.resize(0, 5).is_err());

    h.player.set_background(Color::BLACK).unwrap();
    assert_eq!(h.surface.borrow().last_clear, Some(Color::BLACK));
    assert_eq!(h.surface.borrow().presents, 3);
}

#[test]
fn static_content_renders_once_and_cannot_play() {
    let config = PlayerConfig {
        file_type: FileType::Png,
        ..Default::default()
    };
    let mut h = loaded("logo", config);
    assert_eq!(h.backend.borrow().last_file_type, Some(FileType::Png));
    assert_eq!(h.player.total_frames(), 1);
    assert_eq!(h.surface.borrow().presents, 1);
    assert!(matches!(h.player.play(), Err(PlaybackError::NotAnimated { .. })));
    assert!(matches!(
        h.player.seek_to(0.5),
        Err(PlaybackError::NotAnimated { .. })
    ));
}

#[test]
fn reload_disposes_previous_content() {
    let mut h = loaded("two-second", PlayerConfig::default());
    h.player.play().unwrap();
    h.run_ticks(0.5, 1);

    assert!(h.load("one-second").unwrap());
    assert_eq!(h.backend.borrow().disposed, 1);
    assert_eq!(h.player.state(), PlaybackState::Stopped);
    assert_eq!(h.player.total_frames(), 30);
    assert!(!h.time.has_pending());
}

#[test]
fn failed_first_frame_fails_the_load() {
    let mut h = harness(PlayerConfig::default());
    assert!(!h.load("first-frame-fault").unwrap());
    assert_eq!(h.player.state(), PlaybackState::Errored);
    assert_eq!(h.recorder.kinds(), vec![Error]);
    assert!(!h.player.is_loaded());
    assert_eq!(h.backend.borrow().disposed, 1);
    assert!(h.player.play().is_err());
}

#[test]
fn unload_keeps_listeners_and_dispose_drops_them() {
    let mut h = loaded("one-second", PlayerConfig::default());
    h.player.unload();
    assert_eq!(h.player.state(), PlaybackState::Idle);
    assert!(!h.player.is_loaded());
    assert!(h.player.events().has_listeners(Load));

    assert!(h.load("one-second").unwrap());
    h.player.dispose();
    assert_eq!(h.backend.borrow().disposed, 2);
    assert_eq!(h.player.events().kind_count(), 0);
    assert!(!h.player.load(vectorplay_core::AnimationSource::Url("one-second".into())));
    assert!(h.player.is_disposed());
}

#[test]
fn listener_faults_do_not_break_playback() {
    let mut h = loaded("two-second", PlayerConfig::default());
    h.player.add_event_listener(
        Frame,
        &Listener::new(|_| Err(anyhow::anyhow!("frame consumer failed"))),
    );
    h.player.play().unwrap();
    let outcomes = h.run_ticks(0.5, 10);
    assert_eq!(outcomes.last(), Some(&TickOutcome::Finished { fraction: 1.0 }));
    assert_eq!(h.player.events().fault_count(), 4);
}

#[test]
fn removed_listener_stops_receiving() {
    let mut h = loaded("two-second", PlayerConfig::default());
    h.player.remove_event_listener(Frame, Some(h.recorder.listener()));
    h.player.play().unwrap();
    h.run_ticks(0.5, 2);
    assert_eq!(h.recorder.count(Frame), 1);

    h.player.remove_event_listener(Play, None);
    h.player.pause().unwrap();
    h.player.play().unwrap();
    assert_eq!(h.recorder.count(Play), 1);
}

#[test]
fn snapshot_reflects_player() {
    let config = PlayerConfig {
        loop_mode: LoopMode::Bounce,
        background: Color::WHITE,
        ..Default::default()
    };
    let mut h = loaded("two-second", config);
    h.player.seek_to(0.5).unwrap();

    let snapshot = h.player.snapshot();
    assert!(snapshot.is_stopped());
    assert!(snapshot.is_loaded);
    assert_eq!(snapshot.current_frame, 30);
    assert_eq!(snapshot.total_frames, 60);
    assert_eq!(snapshot.loop_mode, LoopMode::Bounce);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["state"], "stopped");
    assert_eq!(json["loop_mode"], "bounce");
    assert_eq!(json["background"], "#ffffffff");
}

#[test]
fn players_are_independent() {
    let mut a = loaded("one-second", PlayerConfig::default());
    let mut b = loaded("two-second", PlayerConfig::default());
    assert_ne!(a.player.id(), b.player.id());

    a.player.play().unwrap();
    a.run_ticks(0.25, 2);
    assert_eq!(b.player.state(), PlaybackState::Stopped);
    assert!(b.recorder.events().iter().all(|e| e.player == b.player.id()));
    assert_eq!(b.run_ticks(0.25, 1), vec![]);
}
