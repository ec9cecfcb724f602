use std::sync::LazyLock;

use regex::Regex;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(\d+)-)?(?:(\d+):)?(\d+)[:.](\d+)").expect("duration pattern is valid")
});

/// Convert a `ps` duration (`[[DD-]HH:]MM:SS`, or `MM.SS`) into whole seconds.
///
/// Missing components count as zero. Text that does not look like a
/// duration yields 0.
pub fn parse_elapsed(text: &str) -> i64 {
    let Some(caps) = DURATION_RE.captures(text) else {
        return 0;
    };
    let group = |i: usize| -> i64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };

    let (days, hours, minutes, seconds) = (group(1), group(2), group(3), group(4));
    days.saturating_mul(24)
        .saturating_add(hours)
        .saturating_mul(60)
        .saturating_add(minutes)
        .saturating_mul(60)
        .saturating_add(seconds)
}
