//! Headless page runtime
//!
//! Runs a page against the in-memory host: timers fire when the runner
//! says so and spawned tasks are driven to completion with `pollster`.

use std::rc::Rc;

use anyhow::{bail, Result};
use lantern_core::memory::{
    ManualColorScheme, ManualResizeObserver, ManualScheduler, MemoryDocument, MemoryStore,
    QueuedSpawner,
};
use lantern_core::ColorScheme;
use tracing::trace;

use crate::host::PageHost;

/// Upper bound on timer/task rounds in [`HeadlessHost::run_until_idle`]
const MAX_ROUNDS: u32 = 64;

/// In-memory host with manually driven timers, observers and tasks
pub struct HeadlessHost {
    pub document: Rc<MemoryDocument>,
    pub store: Rc<MemoryStore>,
    pub color_scheme: Rc<ManualColorScheme>,
    pub resize_observer: Rc<ManualResizeObserver>,
    pub scheduler: Rc<ManualScheduler>,
    pub spawner: Rc<QueuedSpawner>,
}

/// Work done by one [`HeadlessHost::run_until_idle`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdleStats {
    pub rounds: u32,
    pub timers: usize,
    pub tasks: usize,
}

impl HeadlessHost {
    pub fn new(document: Rc<MemoryDocument>, scheme: ColorScheme) -> Self {
        Self::with_color_scheme(document, ManualColorScheme::new(scheme))
    }

    pub fn with_color_scheme(
        document: Rc<MemoryDocument>,
        color_scheme: Rc<ManualColorScheme>,
    ) -> Self {
        Self {
            document,
            store: MemoryStore::new(),
            color_scheme,
            resize_observer: ManualResizeObserver::new(),
            scheduler: ManualScheduler::new(),
            spawner: QueuedSpawner::new(),
        }
    }

    /// Shared handles for [`crate::Page::start`]
    pub fn page_host(&self) -> PageHost {
        PageHost {
            document: self.document.clone(),
            store: self.store.clone(),
            color_scheme: self.color_scheme.clone(),
            resize_observer: self.resize_observer.clone(),
            scheduler: self.scheduler.clone(),
            spawner: self.spawner.clone(),
        }
    }

    /// Fire pending timers and drive spawned tasks until nothing is left
    pub fn run_until_idle(&self) -> Result<IdleStats> {
        let mut stats = IdleStats::default();
        loop {
            let timers = self.scheduler.run_pending();
            let tasks = self.spawner.take();
            if timers == 0 && tasks.is_empty() {
                return Ok(stats);
            }

            stats.rounds += 1;
            if stats.rounds > MAX_ROUNDS {
                bail!("headless page still busy after {MAX_ROUNDS} rounds");
            }
            stats.timers += timers;
            stats.tasks += tasks.len();
            trace!(
                "headless round {}: {} timer(s), {} task(s)",
                stats.rounds,
                timers,
                tasks.len()
            );
            for task in tasks {
                pollster::block_on(task);
            }
        }
    }
}
