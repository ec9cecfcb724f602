use insta::assert_debug_snapshot;
use procreap::system::platform::ColumnLayout;
use procreap::system::snapshot::Snapshot;

const PROCPS_LISTING: &str = "\
USER         PPID     PID    VSZ   RSS %CPU NLWP STAT     ELAPSED     TIME COMMAND
root            0       1 167752 11468  0.0    1 Ss    3-04:05:06 00:00:12 /sbin/init splash
alice        1432    2211  21364  5400 12.5    4 Sl+        05:06 00:01:02 sleep   100  --tag
truncated    line
";

const BSD_LISTING: &str = "\
USER     PPID   PID      VSZ    RSS  %CPU STAT  ELAPSED      TIME COMMAND
root        0     1 408709760  13376   0.0 Ss   1-00:00:01  1:02.03 /sbin/launchd
";

#[test]
fn procps_listing_parses_into_records() {
    let snapshot = Snapshot::parse(PROCPS_LISTING, ColumnLayout::Standard);
    assert_eq!(snapshot.skipped, 1);
    assert_debug_snapshot!("procps_listing_records", snapshot.records);
}

#[test]
fn bsd_listing_parses_into_records() {
    let snapshot = Snapshot::parse(BSD_LISTING, ColumnLayout::Reduced);
    assert_eq!(snapshot.skipped, 0);
    assert_debug_snapshot!("bsd_listing_records", snapshot.records);
}
