// src/crawl/scheduler.rs
// =============================================================================
// The crawl loop.
//
// One coordinating loop owns the Frontier and the Visited Set. Each turn:
// 1. Dispatch: top the in-flight pool up to `max_concurrent_requests` from
//    the front of the Frontier
// 2. Done?   : Frontier empty AND nothing in flight -> return Visited
// 3. Wait    : sleep until a fetch completes (or the status timer fires)
// 4. Harvest : for every completed fetch, record its classification and
//    queue the in-scope, not-yet-seen links found in its body
//
// Fetches are futures in a FuturesUnordered. They only see their own Link
// and hand back the classified copy; they never touch the queues. That keeps
// all mutation on this loop and needs no locks.
//
// Both conditions in step 2 matter: an empty Frontier with fetches in flight
// can still grow, and a non-empty Frontier with nothing in flight still has
// work to dispatch.
// =============================================================================

use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use serde::Serialize;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::frontier::{Frontier, VisitedSlot};
use crate::checker::{classify, ClassifyPolicy, Fetcher, LinkExtractor};
use crate::config::CrawlConfig;
use crate::error::ConfigError;
use crate::link::Link;
use crate::scope::DomainScope;

/// How often the status line is emitted while crawling
pub const STATUS_INTERVAL: Duration = Duration::from_secs(10);

/// Extra time a whole HEAD + GET exchange may take on top of the two request timeouts
const DEADLINE_GRACE: Duration = Duration::from_secs(1);

/// Lifecycle of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlState {
    /// Seed not queued yet
    Idle,
    /// Links waiting in the Frontier
    Running,
    /// Frontier empty, waiting for the last fetches to come back
    Draining,
    Done,
}

impl CrawlState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => CrawlState::Idle,
            1 => CrawlState::Running,
            2 => CrawlState::Draining,
            _ => CrawlState::Done,
        }
    }
}

/// Counts at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub checked: usize,
    pub dead: usize,
}

/// Live crawl counters, readable from anywhere without blocking the crawl
#[derive(Debug, Clone, Default)]
pub struct ProgressHandle {
    inner: Arc<ProgressInner>,
}

#[derive(Debug, Default)]
struct ProgressInner {
    checked: AtomicUsize,
    dead: AtomicUsize,
    state: AtomicU8,
}

impl ProgressHandle {
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            checked: self.inner.checked.load(Ordering::Relaxed),
            dead: self.inner.dead.load(Ordering::Relaxed),
        }
    }

    pub fn state(&self) -> CrawlState {
        CrawlState::from_u8(self.inner.state.load(Ordering::Relaxed))
    }

    fn record(&self, link: &Link) {
        self.inner.checked.fetch_add(1, Ordering::Relaxed);
        if link.is_dead() {
            self.inner.dead.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn reset(&self) {
        self.inner.checked.store(0, Ordering::Relaxed);
        self.inner.dead.store(0, Ordering::Relaxed);
        self.set_state(CrawlState::Idle);
    }

    fn set_state(&self, state: CrawlState) {
        self.inner.state.store(state as u8, Ordering::Relaxed);
    }
}

type StatusCallback = Box<dyn Fn(ProgressSnapshot) + Send + Sync>;

/// Crawls one domain with a given Fetcher and LinkExtractor
pub struct Crawler<F, E> {
    fetcher: F,
    extractor: E,
    config: CrawlConfig,
    scope: DomainScope,
    policy: ClassifyPolicy,
    progress: ProgressHandle,
    status_interval: Duration,
    on_status: Option<StatusCallback>,
}

impl<F, E> Crawler<F, E>
where
    F: Fetcher,
    E: LinkExtractor,
{
    /// Validates the configuration; nothing is fetched until run()
    pub fn new(config: CrawlConfig, fetcher: F, extractor: E) -> Result<Self, ConfigError> {
        let scope = config.validate()?;

        let policy = ClassifyPolicy {
            error_text: config.error_text.clone(),
            dead_status_threshold: config.dead_status_threshold,
            deadline: config.request_timeout() * 2 + DEADLINE_GRACE,
        };

        Ok(Crawler {
            fetcher,
            extractor,
            config,
            scope,
            policy,
            progress: ProgressHandle::default(),
            status_interval: STATUS_INTERVAL,
            on_status: None,
        })
    }

    /// Calls `callback` with the current counts every status interval
    pub fn with_progress_callback<C>(mut self, callback: C) -> Self
    where
        C: Fn(ProgressSnapshot) + Send + Sync + 'static,
    {
        self.on_status = Some(Box::new(callback));
        self
    }

    /// Sets how often the status line and callback fire
    ///
    /// Never more often than STATUS_INTERVAL; shorter values are raised to it.
    pub fn with_status_interval(mut self, interval: Duration) -> Self {
        self.status_interval = interval.max(STATUS_INTERVAL);
        self
    }

    /// Handle for reading the counters while run() is in progress
    pub fn progress(&self) -> ProgressHandle {
        self.progress.clone()
    }

    pub fn scope(&self) -> &DomainScope {
        &self.scope
    }

    /// Runs the crawl to completion and returns every checked link in dispatch order
    ///
    /// Each call is a fresh crawl: the progress counters start again from zero.
    pub async fn run(&self) -> Vec<Link> {
        self.progress.reset();

        let max_in_flight = self.config.max_concurrent_requests;
        let mut frontier = Frontier::new();
        let mut in_flight = FuturesUnordered::new();

        log::info!(
            "Crawling {} (domain {}, up to {} requests at once)",
            self.config.seed_url,
            self.scope.domain(),
            max_in_flight
        );
        frontier.enqueue_if_new(Link::seed(self.config.seed_url.clone()));

        let mut status_timer =
            interval_at(Instant::now() + self.status_interval, self.status_interval);
        status_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let free = max_in_flight.saturating_sub(in_flight.len());
            for (slot, link) in frontier.dequeue_batch(free) {
                log::debug!("Fetching {}", link);
                in_flight.push(self.fetch(slot, link));
            }

            if in_flight.is_empty() && frontier.is_empty() {
                break;
            }

            self.progress.set_state(if frontier.is_empty() {
                CrawlState::Draining
            } else {
                CrawlState::Running
            });

            tokio::select! {
                Some((slot, link)) = in_flight.next() => {
                    self.harvest(&mut frontier, slot, link);

                    // Pick up everything else that finished meanwhile
                    while let Some(Some((slot, link))) = in_flight.next().now_or_never() {
                        self.harvest(&mut frontier, slot, link);
                    }
                }
                _ = status_timer.tick() => self.report_status(),
            }
        }

        self.progress.set_state(CrawlState::Done);
        let snapshot = self.progress.snapshot();
        log::info!(
            "Crawl finished: {} links checked, {} dead",
            snapshot.checked,
            snapshot.dead
        );

        frontier.into_visited()
    }

    async fn fetch(&self, slot: VisitedSlot, link: Link) -> (VisitedSlot, Link) {
        (slot, classify(&self.fetcher, link, &self.policy).await)
    }

    fn harvest(&self, frontier: &mut Frontier, slot: VisitedSlot, mut link: Link) {
        self.progress.record(&link);

        if link.is_dead() && self.config.verbose {
            log::warn!(
                "Dead link with title \"{}\" and target {} found on {}",
                link.title.as_deref().unwrap_or_default(),
                link.absolute_target(),
                link.found_on.as_deref().unwrap_or("<start>")
            );
        }

        if let Some(body) = link.body.take() {
            let parent = link.absolute_target();
            let mut queued = 0;

            for raw in self.extractor.extract(&body) {
                let child = Link::discovered(raw.href, raw.title, parent.as_str());

                // Out-of-scope links never take up a place in Visited
                if !self.scope.contains(&child) {
                    continue;
                }
                if frontier.enqueue_if_new(child) {
                    queued += 1;
                }
            }

            log::debug!("{} new link(s) queued from {}", queued, parent);
        }

        frontier.record(slot, link);
    }

    fn report_status(&self) {
        let snapshot = self.progress.snapshot();
        if self.config.verbose {
            log::info!(
                "Status: {} links checked. {} dead.",
                snapshot.checked,
                snapshot.dead
            );
        }
        if let Some(callback) = &self.on_status {
            callback(snapshot);
        }
    }
}
