use super::platform::ColumnLayout;
use super::process::{ProcessRecord, parse_line};

/// Processes seen in one poll, in the order the lister printed them.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub records: Vec<ProcessRecord>,
    /// Lines after the header that did not yield a record.
    pub skipped: usize,
}

impl Snapshot {
    /// Parse full lister output. The first line is the column header and is
    /// always dropped; lines that fail to parse are counted and skipped.
    pub fn parse(output: &str, layout: ColumnLayout) -> Self {
        let mut snapshot = Snapshot::default();
        for line in output.lines().skip(1) {
            match parse_line(line, layout) {
                Ok(record) => snapshot.records.push(record),
                Err(_) if line.trim().is_empty() => {}
                Err(_) => snapshot.skipped += 1,
            }
        }
        snapshot
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
