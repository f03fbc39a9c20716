//! Coordinator flows over in-memory window and display doubles.
//!
//! Where the unit tests pin down single decisions, these walk multi-event
//! sessions: repeated snaps refining into corners, windows living on a
//! second monitor, settings reloads taking effect mid-session, and the
//! metrics a whole session leaves behind.

use std::sync::Arc;
use xsnap::config::{MarginConfig, Settings};
use xsnap::models::{Direction, Rect, TilingState};
use xsnap::services::{SnapCoordinator, SnapMetrics, SnapOutcome};
use xsnap::ui::RecordingNotifier;
use xsnap::x11::{DisplayInfo, InMemoryDisplays, InMemoryWindowSystem};

fn coordinator_on_1080p(
    windows: Arc<InMemoryWindowSystem>,
    settings: Settings,
) -> SnapCoordinator {
    SnapCoordinator::new(
        windows,
        Arc::new(InMemoryDisplays::single_1080p()),
        Arc::new(RecordingNotifier::new()),
        settings,
    )
}

fn applied_rect(outcome: &SnapOutcome) -> Rect {
    match outcome {
        SnapOutcome::Applied { rect, .. } => *rect,
        other => panic!("expected an applied snap, got {:?}", other),
    }
}

#[tokio::test]
async fn repeated_snaps_refine_a_floating_window_into_a_corner() {
    let windows = Arc::new(InMemoryWindowSystem::with_window(
        7,
        Rect::new(400, 300, 800, 500),
    ));
    let coordinator = coordinator_on_1080p(windows.clone(), Settings::default());

    let first = coordinator.snap(Direction::Left).await.unwrap();
    assert_eq!(applied_rect(&first), Rect::new(0, 0, 960, 1080));

    let second = coordinator.snap(Direction::Down).await.unwrap();
    assert_eq!(applied_rect(&second), Rect::new(0, 540, 960, 540));
    assert!(matches!(
        second,
        SnapOutcome::Applied {
            from: TilingState::LeftHalf,
            to: TilingState::BottomLeftQuadrant,
            ..
        }
    ));

    // The corner climbs back out through the top half.
    let third = coordinator.snap(Direction::Up).await.unwrap();
    assert_eq!(applied_rect(&third), Rect::new(0, 0, 1920, 540));

    assert_eq!(windows.moves().await.len(), 3);
}

#[tokio::test]
async fn windows_tile_on_the_monitor_under_their_origin() {
    let windows = Arc::new(InMemoryWindowSystem::with_window(
        3,
        Rect::new(2200, 100, 800, 600),
    ));
    let displays = Arc::new(InMemoryDisplays::new_with(vec![
        DisplayInfo {
            name: "eDP-1".to_string(),
            frame: Rect::new(0, 0, 1920, 1080),
            primary: true,
        },
        DisplayInfo {
            name: "HDMI-1".to_string(),
            frame: Rect::new(1920, 0, 2560, 1440),
            primary: false,
        },
    ]));
    let coordinator = SnapCoordinator::new(
        windows.clone(),
        displays,
        Arc::new(RecordingNotifier::new()),
        Settings::default(),
    );

    let maximized = coordinator.apply(TilingState::Maximized).await.unwrap();
    assert_eq!(applied_rect(&maximized), Rect::new(1920, 0, 2560, 1440));

    // Still on the second monitor: the left half splits its frame, not the
    // primary's.
    let half = coordinator.snap(Direction::Left).await.unwrap();
    assert_eq!(applied_rect(&half), Rect::new(1920, 0, 1280, 1440));
}

#[tokio::test]
async fn a_session_accumulates_honest_metrics() {
    let windows = Arc::new(InMemoryWindowSystem::with_window(
        1,
        Rect::new(100, 100, 500, 400),
    ));
    let coordinator = coordinator_on_1080p(windows.clone(), Settings::default());

    coordinator.snap(Direction::Right).await.unwrap();
    // Reinforcing the right edge changes nothing.
    coordinator.snap(Direction::Right).await.unwrap();

    windows.set_active(None).await;
    coordinator.snap(Direction::Left).await.unwrap();

    windows.set_active(Some(1)).await;
    coordinator.apply(TilingState::Maximized).await.unwrap();

    windows.fail_moves(true).await;
    assert!(coordinator.snap(Direction::Left).await.is_err());
    windows.fail_moves(false).await;

    assert_eq!(
        coordinator.metrics().await,
        SnapMetrics {
            snaps_applied: 1,
            manual_applies: 1,
            noops: 1,
            no_active_window: 1,
            aborted: 1,
            settings_reloads: 0,
        }
    );
}

#[tokio::test]
async fn new_margins_take_effect_on_the_next_event() {
    let windows = Arc::new(InMemoryWindowSystem::with_window(
        2,
        Rect::new(50, 50, 600, 400),
    ));
    let coordinator = coordinator_on_1080p(windows.clone(), Settings::default());

    let before = coordinator.apply(TilingState::LeftHalf).await.unwrap();
    assert_eq!(applied_rect(&before), Rect::new(0, 0, 960, 1080));

    coordinator
        .replace_settings(Settings {
            margins: MarginConfig { outer: 10, gap: 8 },
            ..Settings::default()
        })
        .await;

    // The old tile no longer matches under the new margins, so the same
    // request moves the window again instead of short-circuiting.
    let after = coordinator.apply(TilingState::LeftHalf).await.unwrap();
    assert_eq!(applied_rect(&after), Rect::new(10, 10, 946, 1060));

    let metrics = coordinator.metrics().await;
    assert_eq!(metrics.manual_applies, 2);
    assert_eq!(metrics.settings_reloads, 1);
}

#[tokio::test]
async fn applied_snaps_notify_with_the_layout_title() {
    let windows = Arc::new(InMemoryWindowSystem::with_window(
        9,
        Rect::new(200, 200, 700, 500),
    ));
    let notifier = Arc::new(RecordingNotifier::new());
    let coordinator = SnapCoordinator::new(
        windows,
        Arc::new(InMemoryDisplays::single_1080p()),
        notifier.clone(),
        Settings {
            notify_on_apply: true,
            ..Settings::default()
        },
    );

    coordinator.snap(Direction::Up).await.unwrap();
    coordinator.snap(Direction::Up).await.unwrap();

    // The reinforcing no-op stays silent.
    assert_eq!(
        notifier.messages().await,
        vec![("xsnap".to_string(), "Snapped to Top Half".to_string())]
    );
}
