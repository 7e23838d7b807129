use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::{sync::broadcast::error::TryRecvError, time::Instant};

use moodgarden::breathing::{
    phase::{BreathingConfig, Phase, PhaseCycle, MIN_PHASE_MS},
    timer::{BreathEvent, BreathingTimer, HapticSink, NoHaptics},
};

#[derive(Default)]
struct RecordingHaptics {
    patterns: Mutex<Vec<Vec<u32>>>,
}

impl RecordingHaptics {
    fn patterns(&self) -> Vec<Vec<u32>> {
        self.patterns.lock().expect("lock").clone()
    }
}

impl HapticSink for RecordingHaptics {
    fn vibrate(&self, pattern: &[u32]) {
        self.patterns.lock().expect("lock").push(pattern.to_vec());
    }
}

fn phase(phase: Phase, duration_ms: u64) -> BreathEvent {
    BreathEvent::Phase { phase, duration_ms }
}

#[test]
fn cycle_wraps_after_exhale() {
    let mut cycle = PhaseCycle::new(BreathingConfig::default());
    assert_eq!(cycle.current(), Phase::Inhale);
    assert_eq!(cycle.duration(), Duration::from_secs(4));
    assert_eq!(cycle.haptic(), &[20]);

    assert_eq!(cycle.advance(), Phase::Hold);
    assert_eq!(cycle.duration(), Duration::from_secs(2));
    assert!(cycle.haptic().is_empty());

    assert_eq!(cycle.advance(), Phase::Exhale);
    assert_eq!(cycle.duration(), Duration::from_secs(6));
    assert_eq!(cycle.haptic(), &[40, 60, 40]);

    assert_eq!(cycle.advance(), Phase::Inhale);
}

#[test]
fn phase_labels() {
    assert_eq!(Phase::Inhale.label(), "Inhale");
    assert_eq!(Phase::Hold.label(), "Hold");
    assert_eq!(Phase::Exhale.label(), "Exhale");
}

#[tokio::test(start_paused = true)]
async fn phases_announce_on_schedule_with_haptics() {
    let haptics = Arc::new(RecordingHaptics::default());
    let mut timer = BreathingTimer::new(BreathingConfig::default(), haptics.clone());
    let mut rx = timer.subscribe();
    let started = Instant::now();

    timer.start();
    assert!(timer.is_running());
    assert_eq!(rx.recv().await.expect("inhale"), phase(Phase::Inhale, 4000));
    assert_eq!(started.elapsed(), Duration::ZERO);

    assert_eq!(rx.recv().await.expect("hold"), phase(Phase::Hold, 2000));
    assert_eq!(started.elapsed(), Duration::from_secs(4));

    assert_eq!(rx.recv().await.expect("exhale"), phase(Phase::Exhale, 6000));
    assert_eq!(started.elapsed(), Duration::from_secs(6));

    assert_eq!(rx.recv().await.expect("inhale"), phase(Phase::Inhale, 4000));
    assert_eq!(started.elapsed(), Duration::from_secs(12));

    assert_eq!(haptics.patterns(), vec![vec![20], vec![40, 60, 40], vec![20]]);
    assert!(timer.stop());
}

#[tokio::test(start_paused = true)]
async fn stop_mid_phase_cancels_the_pending_change() {
    let expected = [
        (Phase::Inhale, 4000, 1),
        (Phase::Hold, 2000, 1),
        (Phase::Exhale, 6000, 2),
    ];

    for (stop_in, duration_ms, cues) in expected {
        let haptics = Arc::new(RecordingHaptics::default());
        let mut timer = BreathingTimer::new(BreathingConfig::default(), haptics.clone());
        let mut rx = timer.subscribe();

        timer.start();
        loop {
            match rx.recv().await.expect("phase") {
                BreathEvent::Phase { phase, .. } if phase == stop_in => break,
                BreathEvent::Phase { .. } => {}
                BreathEvent::Stopped => panic!("stopped before {stop_in:?}"),
            }
        }

        tokio::time::advance(Duration::from_millis(duration_ms / 2)).await;
        assert!(timer.stop());
        assert!(!timer.is_running());
        assert_eq!(rx.try_recv(), Ok(BreathEvent::Stopped));

        tokio::time::advance(Duration::from_secs(30)).await;
        tokio::task::yield_now().await;
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty), "stopped in {stop_in:?}");
        assert_eq!(haptics.patterns().len(), cues, "stopped in {stop_in:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn stop_is_idempotent() {
    let mut timer = BreathingTimer::new(BreathingConfig::default(), Arc::new(NoHaptics));
    let mut rx = timer.subscribe();
    assert!(!timer.stop());

    timer.start();
    assert!(timer.stop());
    assert!(!timer.stop());

    assert_eq!(rx.try_recv(), Ok(phase(Phase::Inhale, 4000)));
    assert_eq!(rx.try_recv(), Ok(BreathEvent::Stopped));
    assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test(start_paused = true)]
async fn restart_begins_again_at_inhale() {
    let mut timer = BreathingTimer::new(BreathingConfig::default(), Arc::new(NoHaptics));
    let mut rx = timer.subscribe();

    timer.start();
    assert_eq!(rx.recv().await.expect("inhale"), phase(Phase::Inhale, 4000));
    assert_eq!(rx.recv().await.expect("hold"), phase(Phase::Hold, 2000));

    timer.start();
    assert_eq!(rx.try_recv(), Ok(BreathEvent::Stopped));
    assert_eq!(rx.try_recv(), Ok(phase(Phase::Inhale, 4000)));
    let restarted = Instant::now();
    assert_eq!(rx.recv().await.expect("hold"), phase(Phase::Hold, 2000));
    assert_eq!(restarted.elapsed(), Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn custom_pattern_without_haptics() {
    let config = BreathingConfig {
        inhale_ms: 1000,
        hold_ms: 300,
        exhale_ms: 500,
        inhale_haptic: Vec::new(),
        hold_haptic: Vec::new(),
        exhale_haptic: Vec::new(),
    };
    let haptics = Arc::new(RecordingHaptics::default());
    let mut timer = BreathingTimer::new(config, haptics.clone());
    let mut rx = timer.subscribe();

    timer.start();
    assert_eq!(rx.recv().await.expect("inhale"), phase(Phase::Inhale, 1000));
    assert_eq!(rx.recv().await.expect("hold"), phase(Phase::Hold, 300));
    assert_eq!(rx.recv().await.expect("exhale"), phase(Phase::Exhale, 500));
    assert!(haptics.patterns().is_empty());
}

#[test]
fn zero_durations_are_raised_to_the_minimum() {
    let config = BreathingConfig {
        inhale_ms: 0,
        hold_ms: 0,
        exhale_ms: 0,
        ..BreathingConfig::default()
    };
    for p in [Phase::Inhale, Phase::Hold, Phase::Exhale] {
        assert_eq!(config.duration(p), Duration::from_millis(MIN_PHASE_MS));
    }
}

#[tokio::test(start_paused = true)]
async fn all_zero_pattern_still_waits_between_phases() {
    let config = BreathingConfig {
        inhale_ms: 0,
        hold_ms: 0,
        exhale_ms: 0,
        ..BreathingConfig::default()
    };
    let mut timer = BreathingTimer::new(config, Arc::new(NoHaptics));
    let mut rx = timer.subscribe();
    let started = Instant::now();

    timer.start();
    assert_eq!(rx.recv().await.expect("inhale"), phase(Phase::Inhale, MIN_PHASE_MS));
    assert_eq!(rx.recv().await.expect("hold"), phase(Phase::Hold, MIN_PHASE_MS));
    assert_eq!(rx.recv().await.expect("exhale"), phase(Phase::Exhale, MIN_PHASE_MS));
    assert!(started.elapsed() >= Duration::from_millis(2 * MIN_PHASE_MS));

    assert!(timer.stop());
    assert_eq!(rx.try_recv(), Ok(BreathEvent::Stopped));
    assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test(start_paused = true)]
async fn dropping_the_timer_stops_it() {
    let timer_haptics = Arc::new(RecordingHaptics::default());
    let mut timer = BreathingTimer::new(BreathingConfig::default(), timer_haptics.clone());
    let mut rx = timer.subscribe();
    timer.start();
    drop(timer);

    assert_eq!(rx.try_recv(), Ok(phase(Phase::Inhale, 4000)));
    assert_eq!(rx.try_recv(), Ok(BreathEvent::Stopped));

    tokio::time::advance(Duration::from_secs(10)).await;
    tokio::task::yield_now().await;
    assert_eq!(timer_haptics.patterns(), vec![vec![20]]);
}
