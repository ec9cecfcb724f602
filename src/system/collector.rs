use std::io;
use std::process::{Command, Stdio};

use tracing::debug;

use super::platform::{self, ColumnLayout};
use super::snapshot::Snapshot;

/// Source of raw process-table text, one header line followed by one line
/// per process in the requested column layout.
pub trait ProcessLister {
    fn list(&self, layout: ColumnLayout) -> io::Result<String>;
}

/// Runs `ps axwwo <columns>` and captures its stdout.
pub struct PsLister {
    program: String,
}

impl PsLister {
    pub fn new(program: impl Into<String>) -> Self {
        PsLister {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for PsLister {
    fn default() -> Self {
        Self::new(platform::lister_program())
    }
}

impl ProcessLister for PsLister {
    fn list(&self, layout: ColumnLayout) -> io::Result<String> {
        let output = Command::new(&self.program)
            .args(["axwwo", layout.ps_format()])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()?;

        // Some `ps` builds exit non-zero after printing a usable table.
        if !output.status.success() && output.stdout.is_empty() {
            return Err(io::Error::other(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

pub struct Collector<L = PsLister> {
    lister: L,
    layout: ColumnLayout,
}

impl Collector<PsLister> {
    /// `ps` from the search path, laid out for the host platform.
    pub fn native() -> Self {
        Collector::new(PsLister::default(), platform::native_layout())
    }
}

impl<L: ProcessLister> Collector<L> {
    pub fn new(lister: L, layout: ColumnLayout) -> Self {
        Collector { lister, layout }
    }

    pub fn layout(&self) -> ColumnLayout {
        self.layout
    }

    pub fn lister(&self) -> &L {
        &self.lister
    }

    /// Take one snapshot. A lister failure is indistinguishable from an
    /// empty process table; the next poll simply tries again.
    pub fn collect(&self) -> Snapshot {
        let _span = tracing::debug_span!("collector.collect").entered();

        let output = match self.lister.list(self.layout) {
            Ok(output) => output,
            Err(err) => {
                debug!(error = %err, "process lister failed, treating poll as empty");
                return Snapshot::default();
            }
        };

        let snapshot = Snapshot::parse(&output, self.layout);
        if snapshot.skipped > 0 {
            debug!(skipped = snapshot.skipped, "ignored unparsable process lines");
        }
        snapshot
    }
}
