// tests/unit_dispatch.rs
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use supercat_core::dispatch::{Dispatcher, TaskOutcome};
use supercat_core::graph::load_edges;
use supercat_core::score::{DepthAnnotation, TargetSet};

fn names(n: usize) -> impl Iterator<Item = String> + Send {
    (0..n).map(|i| format!("Category_{i}"))
}

#[test]
fn test_concurrency_never_exceeds_cap() {
    let running = AtomicUsize::new(0);
    let peak = AtomicUsize::new(0);

    let stats = Dispatcher::new(3, 0).unwrap().run(names(40), |_| {
        let now = running.fetch_add(1, Ordering::SeqCst) + 1;
        peak.fetch_max(now, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(2));
        running.fetch_sub(1, Ordering::SeqCst);
        TaskOutcome::Scored
    });

    assert_eq!(stats.dispatched, 40);
    assert_eq!(stats.scored, 40);
    assert!(peak.load(Ordering::SeqCst) <= 3);
    assert!(stats.peak_active <= 3);
    assert_eq!(running.load(Ordering::SeqCst), 0);
}

#[test]
fn test_every_task_runs_once() {
    let seen = AtomicUsize::new(0);
    let stats = Dispatcher::new(8, 7).unwrap().run(names(1000), |_| {
        seen.fetch_add(1, Ordering::Relaxed);
        TaskOutcome::Scored
    });
    assert_eq!(seen.load(Ordering::Relaxed), 1000);
    assert_eq!(stats.completed(), 1000);
}

#[test]
fn test_outcomes_are_tallied() {
    let stats = Dispatcher::new(2, 0)
        .unwrap()
        .run(names(9), |name| match name.as_bytes().last() {
            Some(b'0' | b'1' | b'2') => TaskOutcome::Unknown,
            Some(b'3') => TaskOutcome::Unscored,
            Some(b'4') => TaskOutcome::Failed,
            _ => TaskOutcome::Scored,
        });
    assert_eq!(stats.unknown, 3);
    assert_eq!(stats.unscored, 1);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.scored, 4);
}

#[test]
fn test_zero_threads_means_one() {
    let d = Dispatcher::new(0, 0).unwrap();
    assert_eq!(d.max_threads(), 1);
    let stats = d.run(names(5), |_| TaskOutcome::Scored);
    assert_eq!(stats.peak_active, 1);
}

#[test]
fn test_depth_annotation_stays_on_worker_pool() {
    let (g, _) = load_edges("Contracts Law\nMusic Arts\n".as_bytes(), false).unwrap();
    let targets = TargetSet::new(["Law", "Arts"]).resolve(&g);

    let d = Dispatcher::new(1, 0).unwrap();
    let annotation = d.install(|| DepthAnnotation::build(&g, &targets));
    assert_eq!(annotation.workers(), 1);
    assert_eq!(annotation.depth(0, g.lookup("Contracts").unwrap()), Some(1));

    let d = Dispatcher::new(3, 0).unwrap();
    assert_eq!(d.install(|| DepthAnnotation::build(&g, &targets)).workers(), 3);
}
