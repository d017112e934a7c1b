// src/dispatch.rs
//! Bounded worker pool draining a stream of start-node names.
//!
//! A fixed set of long-lived workers pull from one shared task source. The
//! source and the active-task counter sit behind a single lock that is held
//! only while a task is handed out or retired, never while it runs.

use std::iter::Fuse;
use std::sync::{Mutex, PoisonError};

use crate::error::Result;

/// How a single task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// A vector was produced and written.
    Scored,
    /// The name is not in the graph.
    Unknown,
    /// The strategy produced no vector for this node.
    Unscored,
    /// The vector could not be written.
    Failed,
}

/// Counters for one dispatch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub dispatched: usize,
    pub scored: usize,
    pub unknown: usize,
    pub unscored: usize,
    pub failed: usize,
    pub peak_active: usize,
}

impl DispatchStats {
    fn record(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Scored => self.scored += 1,
            TaskOutcome::Unknown => self.unknown += 1,
            TaskOutcome::Unscored => self.unscored += 1,
            TaskOutcome::Failed => self.failed += 1,
        }
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.scored + self.unknown + self.unscored + self.failed
    }
}

struct QueueState<I> {
    source: I,
    active: usize,
    stats: DispatchStats,
}

/// The shared task source plus its active counter.
pub struct TaskQueue<I> {
    state: Mutex<QueueState<Fuse<I>>>,
    max_active: usize,
    progress_every: usize,
}

impl<I> TaskQueue<I>
where
    I: Iterator<Item = String>,
{
    #[must_use]
    pub fn new(source: I, max_active: usize, progress_every: usize) -> Self {
        Self {
            state: Mutex::new(QueueState {
                source: source.fuse(),
                active: 0,
                stats: DispatchStats::default(),
            }),
            max_active,
            progress_every,
        }
    }

    /// Retires the caller's finished task (if any) and hands it the next one.
    ///
    /// Returns `None` once the source is drained; the caller should then exit.
    pub fn on_worker_free(&self, done: Option<TaskOutcome>) -> Option<String> {
        let mut report = None;

        let next = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

            if let Some(outcome) = done {
                state.active = state.active.saturating_sub(1);
                state.stats.record(outcome);
                let completed = state.stats.completed();
                if self.progress_every > 0 && completed % self.progress_every == 0 {
                    report = Some((completed, state.stats.dispatched));
                }
            }

            let next = state.source.next();
            if next.is_some() {
                debug_assert!(state.active < self.max_active, "worker cap exceeded");
                state.active += 1;
                state.stats.dispatched += 1;
                state.stats.peak_active = state.stats.peak_active.max(state.active);
            }
            next
        };

        if let Some((completed, dispatched)) = report {
            tracing::info!(completed, dispatched, "scoring progress");
        }

        next
    }

    /// Number of tasks currently handed out.
    #[must_use]
    pub fn active(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .active
    }

    #[must_use]
    pub fn into_stats(self) -> DispatchStats {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .stats
    }
}

/// Runs tasks on a fixed pool of `max_threads` workers.
#[derive(Debug)]
pub struct Dispatcher {
    pool: rayon::ThreadPool,
    max_threads: usize,
    progress_every: usize,
}

impl Dispatcher {
    /// Builds the worker pool. Zero threads is treated as one.
    ///
    /// # Errors
    /// Returns error if the worker pool cannot be created.
    pub fn new(max_threads: usize, progress_every: usize) -> Result<Self> {
        let max_threads = max_threads.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(max_threads)
            .thread_name(|i| format!("supercat-worker-{i}"))
            .build()?;
        Ok(Self {
            pool,
            max_threads,
            progress_every,
        })
    }

    #[must_use]
    pub fn max_threads(&self) -> usize {
        self.max_threads
    }

    /// Runs `op` on the worker pool, so any rayon fan-out inside it stays
    /// within `max_threads`.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    /// Feeds every task from `tasks` to `work` and blocks until all have finished.
    pub fn run<I, F>(&self, tasks: I, work: F) -> DispatchStats
    where
        I: Iterator<Item = String> + Send,
        F: Fn(&str) -> TaskOutcome + Sync,
    {
        let queue = TaskQueue::new(tasks, self.max_threads, self.progress_every);

        self.pool.scope(|s| {
            for _ in 0..self.max_threads {
                s.spawn(|_| drain(&queue, &work));
            }
        });

        queue.into_stats()
    }
}

fn drain<I, F>(queue: &TaskQueue<I>, work: &F)
where
    I: Iterator<Item = String>,
    F: Fn(&str) -> TaskOutcome,
{
    let mut done = None;
    while let Some(task) = queue.on_worker_free(done) {
        done = Some(work(&task));
    }
}
