use std::future;
use std::io::{self, Write};
use std::pin::pin;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::system::collector::{Collector, ProcessLister};
use crate::system::kill::{KillResult, Terminator};
use crate::system::process::ProcessRecord;
use crate::system::snapshot::Snapshot;

/// Period between two sweeps.
pub const DEFAULT_TICK: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("invalid regexp pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// What one sweep saw and did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub seen: usize,
    /// Records skipped because they are this process or one of its children.
    pub excluded: usize,
    /// Pids whose command matched, in listing order.
    pub matched: Vec<String>,
    /// Subset of `matched` the terminator confirmed.
    pub killed: Vec<String>,
}

pub struct Monitor<L, T> {
    pattern: Regex,
    self_pid: String,
    tick: Duration,
    dry_run: bool,
    collector: Collector<L>,
    terminator: T,
    output: Box<dyn Write>,
}

impl<L: ProcessLister, T: Terminator> Monitor<L, T> {
    /// Compile `pattern` and build a monitor. Nothing is listed or killed
    /// until the first sweep.
    pub fn new(
        pattern: &str,
        collector: Collector<L>,
        terminator: T,
    ) -> Result<Self, MonitorError> {
        let pattern = Regex::new(pattern)?;
        Ok(Monitor {
            pattern,
            self_pid: std::process::id().to_string(),
            tick: DEFAULT_TICK,
            dry_run: false,
            collector,
            terminator,
            output: Box::new(io::stdout()),
        })
    }

    pub fn with_self_pid(mut self, pid: impl Into<String>) -> Self {
        self.self_pid = pid.into();
        self
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Where `killed <command>` confirmations go. Defaults to stdout.
    pub fn with_output(mut self, output: impl Write + 'static) -> Self {
        self.output = Box::new(output);
        self
    }

    pub fn self_pid(&self) -> &str {
        &self.self_pid
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// True for this process and anything it spawned directly, including
    /// the `ps` child that produced the listing.
    pub fn is_excluded(&self, record: &ProcessRecord) -> bool {
        record.pid == self.self_pid || record.ppid == self.self_pid
    }

    /// Collect a fresh snapshot and act on it.
    pub fn sweep(&mut self) -> SweepReport {
        let snapshot = self.collector.collect();
        self.evaluate(&snapshot)
    }

    /// Terminate every record in `snapshot` whose command matches, in
    /// listing order. Termination failures do not stop the pass.
    pub fn evaluate(&mut self, snapshot: &Snapshot) -> SweepReport {
        let mut report = SweepReport {
            seen: snapshot.len(),
            ..SweepReport::default()
        };

        for record in &snapshot.records {
            if self.is_excluded(record) {
                report.excluded += 1;
                continue;
            }
            if !self.pattern.is_match(&record.command) {
                continue;
            }
            report.matched.push(record.pid.clone());

            if self.dry_run {
                info!(pid = %record.pid, command = %record.command, "dry run, would terminate");
                continue;
            }

            match self.terminator.terminate(&record.pid) {
                KillResult::Success(_) => {
                    // A closed stdout must not take the loop down with it.
                    if let Err(err) = writeln!(self.output, "killed {}", record.command) {
                        debug!(error = %err, "cannot write kill confirmation");
                    }
                    info!(pid = %record.pid, command = %record.command, "terminated process");
                    report.killed.push(record.pid.clone());
                }
                other => debug!(pid = %record.pid, result = ?other, "termination not confirmed"),
            }
        }

        report
    }

    /// Sweep once per tick until `stop` resolves. The first sweep happens
    /// one full tick after the call; a sweep that overruns the period
    /// delays the next one rather than dropping it.
    pub async fn run_until<F>(&mut self, stop: F)
    where
        F: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval_at(Instant::now() + self.tick, self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut stop = pin!(stop);

        loop {
            tokio::select! {
                _ = &mut stop => break,
                _ = interval.tick() => {
                    let report = self.sweep();
                    debug!(
                        seen = report.seen,
                        excluded = report.excluded,
                        matched = report.matched.len(),
                        killed = report.killed.len(),
                        "sweep finished"
                    );
                }
            }
        }
    }

    /// Sweep forever.
    pub async fn run(&mut self) {
        self.run_until(future::pending()).await
    }
}
