use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use procreap::monitor::Monitor;
use procreap::system::collector::Collector;
use procreap::system::kill::{KillResult, SignalTerminator, Terminator};

fn spawn_sleeper(seconds: &str) -> Child {
    #[cfg(windows)]
    let mut cmd = {
        let script = format!("Start-Sleep -Seconds {seconds}");
        let mut c = Command::new("powershell");
        c.args(["-NoProfile", "-NonInteractive", "-Command", script.as_str()]);
        c
    };

    #[cfg(not(windows))]
    let mut cmd = {
        let mut c = Command::new("sleep");
        c.arg(seconds);
        c
    };

    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to spawn child process")
}

fn wait_for_exit(child: &mut Child, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(_)) => return true,
            Ok(None) if Instant::now() < deadline => thread::sleep(Duration::from_millis(50)),
            _ => return false,
        }
    }
}

/// The host `ps` must understand our column request and list this test
/// binary; minimal containers (busybox, no procps) do not.
fn native_ps_usable() -> bool {
    let me = std::process::id().to_string();
    let usable = Collector::native()
        .collect()
        .records
        .iter()
        .any(|r| r.pid == me);
    if !usable {
        eprintln!("skipping: native ps listing does not include this process");
    }
    usable
}

#[test]
fn terminate_nonexistent_pid_returns_not_found() {
    let mut terminator = SignalTerminator::new();
    let result = terminator.terminate(&u32::MAX.to_string());
    assert!(matches!(result, KillResult::NotFound(_)));
}

#[test]
fn terminate_spawned_child() {
    let mut child = spawn_sleeper("30");
    let pid = child.id();

    let mut terminator = SignalTerminator::new();
    let result = terminator.terminate(&pid.to_string());

    match result {
        KillResult::Success(killed) => {
            assert_eq!(killed, pid);
            if !wait_for_exit(&mut child, Duration::from_secs(5)) {
                let _ = child.kill();
                panic!("child process did not exit before timeout");
            }
        }
        other => {
            let _ = child.kill();
            panic!("terminate reported {other:?}");
        }
    }
}

#[cfg(unix)]
#[test]
fn monitor_spares_its_own_children() {
    if !native_ps_usable() {
        return;
    }
    let mut child = spawn_sleeper("7919");

    let mut monitor =
        Monitor::new("^sleep 7919$", Collector::native(), SignalTerminator::new()).unwrap();
    let report = monitor.sweep();

    let still_running = matches!(child.try_wait(), Ok(None));
    let _ = child.kill();
    let _ = child.wait();

    assert!(report.matched.is_empty(), "matched {:?}", report.matched);
    assert!(report.excluded >= 2, "expected self and ps/sleep children");
    assert!(still_running);
}

#[cfg(unix)]
#[test]
fn monitor_terminates_matching_process() {
    if !native_ps_usable() {
        return;
    }
    let mut child = spawn_sleeper("7907");
    let pid = child.id().to_string();

    // Pretend to be someone else so the child is no longer protected.
    let mut monitor = Monitor::new("^sleep 7907$", Collector::native(), SignalTerminator::new())
        .unwrap()
        .with_self_pid("not-a-pid");
    let report = monitor.sweep();

    let exited = wait_for_exit(&mut child, Duration::from_secs(5));
    if !exited {
        let _ = child.kill();
    }

    assert_eq!(report.matched, vec![pid.clone()]);
    assert_eq!(report.killed, vec![pid]);
    assert!(exited, "matched child did not exit");
}
