use std::str::FromStr;

use thiserror::Error;

use super::etime::parse_elapsed;
use super::platform::ColumnLayout;

/// One row of the process table as reported by the lister.
///
/// `pid` and `ppid` stay as the lister printed them; the monitor compares
/// them textually against its own id.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessRecord {
    pub user: String,
    pub ppid: String,
    pub pid: String,
    pub vsz_kb: i64,
    pub rss_kb: i64,
    pub cpu_percent: f64,
    pub threads: i64,
    pub state: String,
    pub elapsed_secs: i64,
    pub cpu_time_secs: i64,
    pub command: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("process line has {found} fields, at least {required} required")]
    InsufficientFields { found: usize, required: usize },
}

/// Parse one whitespace-delimited `ps` line laid out as `layout`.
///
/// The command column comes last and keeps its inner words, re-joined with
/// single spaces. Numeric columns that do not parse become zero.
pub fn parse_line(line: &str, layout: ColumnLayout) -> Result<ProcessRecord, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let required = layout.min_fields();
    if fields.len() < required {
        return Err(ParseError::InsufficientFields {
            found: fields.len(),
            required,
        });
    }

    let threads = match layout.thread_index() {
        Some(idx) => number_or_zero(fields[idx]),
        None => 1,
    };

    Ok(ProcessRecord {
        user: fields[0].to_string(),
        ppid: fields[1].to_string(),
        pid: fields[2].to_string(),
        vsz_kb: number_or_zero(fields[3]),
        rss_kb: number_or_zero(fields[4]),
        cpu_percent: number_or_zero(fields[5]),
        threads,
        state: fields[layout.state_index()].to_string(),
        elapsed_secs: parse_elapsed(fields[layout.etime_index()]),
        cpu_time_secs: parse_elapsed(fields[layout.time_index()]),
        command: fields[layout.command_start()..].join(" "),
    })
}

fn number_or_zero<T: FromStr + Default>(field: &str) -> T {
    field.parse().unwrap_or_default()
}
