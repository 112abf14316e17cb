use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use linkboot_engine::{
    Category, DelayRange, DisplayLine, PlaybackEngine, PlaybackTiming, SessionOutcome,
};

#[derive(Debug, Default)]
struct Recorder {
    ticks: Vec<(Vec<String>, f64)>,
    completions: usize,
    ticks_after_complete: usize,
}

type Shared = Arc<Mutex<Recorder>>;

fn lines(n: usize) -> Vec<DisplayLine> {
    (0..n)
        .map(|i| DisplayLine::new(format!("line {i}"), Category::Plain))
        .collect()
}

fn start(
    engine: &mut PlaybackEngine,
    input: Vec<DisplayLine>,
) -> (Shared, linkboot_engine::PlaybackHandle) {
    let recorder: Shared = Arc::default();
    let on_tick = {
        let recorder = Arc::clone(&recorder);
        move |revealed: &[DisplayLine], progress: f64| {
            let mut rec = recorder.lock().unwrap();
            if rec.completions > 0 {
                rec.ticks_after_complete += 1;
            }
            rec.ticks
                .push((revealed.iter().map(|l| l.text.clone()).collect(), progress));
        }
    };
    let on_complete = {
        let recorder = Arc::clone(&recorder);
        move || recorder.lock().unwrap().completions += 1
    };
    let handle = engine.start(input, on_tick, on_complete).unwrap();
    (recorder, handle)
}

#[tokio::test(start_paused = true)]
async fn two_lines_reveal_in_order_then_complete_once() {
    let timing = PlaybackTiming::default();
    let mut engine = PlaybackEngine::new(timing.clone()).with_seed(42);
    let input = vec![
        DisplayLine::new("boot ok", Category::Ok),
        DisplayLine::new("net up", Category::Plain),
    ];

    let (recorder, handle) = start(&mut engine, input);
    assert_eq!(handle.wait().await, SessionOutcome::Completed);

    let rec = recorder.lock().unwrap();
    assert_eq!(rec.completions, 1);
    assert_eq!(rec.ticks_after_complete, 0);
    assert_eq!(rec.ticks[0].0, vec!["boot ok"]);
    assert_eq!(rec.ticks[1].0, vec!["boot ok", "net up"]);
    let (last_revealed, last_progress) = rec.ticks.last().unwrap();
    assert_eq!(last_revealed.len(), 2);
    assert!((last_progress - timing.progress_ceiling).abs() < f64::EPSILON);
}

#[tokio::test(start_paused = true)]
async fn revealed_prefix_grows_by_one_without_skips() {
    let mut engine = PlaybackEngine::new(PlaybackTiming::default()).with_seed(5);
    let input = lines(30);
    let (recorder, handle) = start(&mut engine, input.clone());
    assert_eq!(handle.wait().await, SessionOutcome::Completed);

    let rec = recorder.lock().unwrap();
    // 30 reveal ticks plus the settle tick.
    assert_eq!(rec.ticks.len(), 31);
    for (i, (revealed, _)) in rec.ticks.iter().take(30).enumerate() {
        assert_eq!(revealed.len(), i + 1);
        assert_eq!(revealed[i], input[i].text);
    }
    assert_eq!(rec.ticks[30].0.len(), 30);
}

#[tokio::test(start_paused = true)]
async fn progress_is_monotonic_and_bounded() {
    let timing = PlaybackTiming {
        progress_step: linkboot_engine::StepRange {
            min: 5.0,
            max: 20.0,
        },
        ..Default::default()
    };
    let mut engine = PlaybackEngine::new(timing).with_seed(77);
    let (recorder, handle) = start(&mut engine, lines(40));
    handle.wait().await;

    let rec = recorder.lock().unwrap();
    let mut last = 0.0;
    for (_, progress) in &rec.ticks {
        assert!(*progress >= last, "{progress} < {last}");
        assert!(*progress <= 100.0);
        last = *progress;
    }
}

#[tokio::test(start_paused = true)]
async fn empty_input_settles_and_completes_once() {
    let mut engine = PlaybackEngine::new(PlaybackTiming::default()).with_seed(1);
    let started = tokio::time::Instant::now();
    let (recorder, handle) = start(&mut engine, Vec::new());
    assert_eq!(handle.wait().await, SessionOutcome::Completed);

    let rec = recorder.lock().unwrap();
    assert_eq!(rec.completions, 1);
    assert_eq!(rec.ticks.len(), 1);
    assert!(rec.ticks[0].0.is_empty());
    assert!((rec.ticks[0].1 - 100.0).abs() < f64::EPSILON);
    assert!(started.elapsed() >= Duration::from_millis(3500));
}

#[tokio::test(start_paused = true)]
async fn cancel_before_first_tick_yields_nothing() {
    let mut engine = PlaybackEngine::new(PlaybackTiming::default()).with_seed(2);
    let (recorder, handle) = start(&mut engine, lines(5));
    handle.cancel();
    assert!(handle.is_cancelled());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(handle.is_finished());
    assert_eq!(handle.wait().await, SessionOutcome::Cancelled);

    let rec = recorder.lock().unwrap();
    assert!(rec.ticks.is_empty());
    assert_eq!(rec.completions, 0);
}

#[tokio::test(start_paused = true)]
async fn cancel_mid_session_stops_callbacks() {
    let mut engine = PlaybackEngine::new(PlaybackTiming::default()).with_seed(8);
    let (recorder, handle) = start(&mut engine, lines(20));

    tokio::time::sleep(Duration::from_millis(500)).await;
    handle.cancel();
    let seen = recorder.lock().unwrap().ticks.len();
    assert!(seen > 0 && seen < 20, "saw {seen} ticks");

    tokio::time::sleep(Duration::from_secs(10)).await;
    let rec = recorder.lock().unwrap();
    assert_eq!(rec.ticks.len(), seen);
    assert_eq!(rec.completions, 0);
}

#[tokio::test(start_paused = true)]
async fn cancel_during_drain_suppresses_completion() {
    let mut engine = PlaybackEngine::new(PlaybackTiming::default()).with_seed(4);
    let (recorder, handle) = start(&mut engine, lines(3));

    // Three reveals take at most 390ms; the trailing delay is 1.5s.
    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(recorder.lock().unwrap().ticks.len(), 4);
    handle.cancel();

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(recorder.lock().unwrap().completions, 0);
}

#[tokio::test(start_paused = true)]
async fn dropping_handle_cancels_session() {
    let mut engine = PlaybackEngine::new(PlaybackTiming::default()).with_seed(6);
    let (recorder, handle) = start(&mut engine, lines(10));
    drop(handle);

    tokio::time::sleep(Duration::from_secs(10)).await;
    let rec = recorder.lock().unwrap();
    assert!(rec.ticks.is_empty());
    assert_eq!(rec.completions, 0);
    assert!(!engine.is_active());
}

#[tokio::test(start_paused = true)]
async fn fifty_lines_finish_within_schedule_bounds() {
    let timing = PlaybackTiming::default();
    let (min, max) = timing.total_bounds(50);
    let mut engine = PlaybackEngine::new(timing).with_seed(50);

    let started = tokio::time::Instant::now();
    let (recorder, handle) = start(&mut engine, lines(50));
    assert_eq!(handle.wait().await, SessionOutcome::Completed);
    let elapsed = started.elapsed();

    assert!(elapsed >= min, "{elapsed:?} < {min:?}");
    assert!(elapsed <= max, "{elapsed:?} > {max:?}");
    assert_eq!(recorder.lock().unwrap().completions, 1);
}

#[tokio::test(start_paused = true)]
async fn same_seed_reproduces_progress_curve() {
    let run = |seed| async move {
        let mut engine = PlaybackEngine::new(PlaybackTiming::default()).with_seed(seed);
        let (recorder, handle) = start(&mut engine, lines(15));
        handle.wait().await;
        let rec = recorder.lock().unwrap();
        rec.ticks.iter().map(|(_, p)| *p).collect::<Vec<_>>()
    };
    assert_eq!(run(99).await, run(99).await);
}

#[tokio::test(start_paused = true)]
async fn ambient_fires_without_touching_state() {
    let hits = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&hits);
    let timing = PlaybackTiming {
        ambient_probability: 1.0,
        reveal_delay: DelayRange::from_millis(10, 10),
        ..Default::default()
    };
    let mut engine = PlaybackEngine::new(timing)
        .with_seed(12)
        .with_ambient(move || *counter.lock().unwrap() += 1);

    let (recorder, handle) = start(&mut engine, lines(6));
    assert_eq!(handle.wait().await, SessionOutcome::Completed);
    assert_eq!(*hits.lock().unwrap(), 6);
    assert_eq!(recorder.lock().unwrap().ticks.len(), 7);
}

#[tokio::test(start_paused = true)]
async fn missing_ambient_is_a_noop() {
    let timing = PlaybackTiming {
        ambient_probability: 1.0,
        ..Default::default()
    };
    let mut engine = PlaybackEngine::new(timing).with_seed(13);
    let (recorder, handle) = start(&mut engine, lines(4));
    assert_eq!(handle.wait().await, SessionOutcome::Completed);
    assert_eq!(recorder.lock().unwrap().completions, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cancel_waits_for_running_completion() {
    let timing = PlaybackTiming {
        reveal_delay: DelayRange::from_millis(1, 1),
        trailing_delay: Duration::from_millis(1),
        drain_delay: Duration::from_millis(1),
        ..Default::default()
    };
    let mut engine = PlaybackEngine::new(timing).with_seed(21);
    let entered = Arc::new(AtomicBool::new(false));
    let finished = Arc::new(AtomicBool::new(false));
    let on_complete = {
        let entered = Arc::clone(&entered);
        let finished = Arc::clone(&finished);
        move || {
            entered.store(true, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(300));
            finished.store(true, Ordering::SeqCst);
        }
    };
    let handle = engine.start(lines(2), |_, _| {}, on_complete).unwrap();

    let done_when_cancel_returned = tokio::task::spawn_blocking(move || {
        while !entered.load(Ordering::SeqCst) {
            std::thread::yield_now();
        }
        handle.cancel();
        let done = finished.load(Ordering::SeqCst);
        assert!(!handle.is_cancelled());
        done
    })
    .await
    .unwrap();

    assert!(done_when_cancel_returned);
}
