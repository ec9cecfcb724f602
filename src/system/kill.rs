use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, Signal, System};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KillResult {
    Success(u32),
    Failed(u32, String),
    NotFound(u32),
    InvalidPid(String),
}

impl KillResult {
    pub fn is_success(&self) -> bool {
        matches!(self, KillResult::Success(_))
    }
}

/// Anything that can ask a process to terminate, given the id as the
/// process lister printed it.
pub trait Terminator {
    fn terminate(&mut self, pid: &str) -> KillResult;
}

/// Send the default termination signal to `pid` if `sys` knows about it.
pub fn kill_process(sys: &System, pid: u32) -> KillResult {
    let sysinfo_pid = Pid::from_u32(pid);
    match sys.process(sysinfo_pid) {
        Some(process) => match process.kill_with(Signal::Term) {
            Some(true) => KillResult::Success(pid),
            Some(false) => {
                KillResult::Failed(pid, format!("Failed to send SIGTERM to PID {pid}"))
            }
            None => {
                // Signal not supported on this platform, fall back to kill()
                if process.kill() {
                    KillResult::Success(pid)
                } else {
                    KillResult::Failed(
                        pid,
                        format!("Failed to kill PID {pid} (permission denied?)"),
                    )
                }
            }
        },
        None => KillResult::NotFound(pid),
    }
}

/// Terminates processes through `sysinfo`, refreshing only the target pid
/// before each signal.
pub struct SignalTerminator {
    sys: System,
}

impl Default for SignalTerminator {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalTerminator {
    pub fn new() -> Self {
        SignalTerminator { sys: System::new() }
    }
}

impl Terminator for SignalTerminator {
    fn terminate(&mut self, pid: &str) -> KillResult {
        let Ok(raw) = pid.parse::<u32>() else {
            return KillResult::InvalidPid(pid.to_string());
        };
        let target = [Pid::from_u32(raw)];
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&target),
            true,
            ProcessRefreshKind::nothing(),
        );
        kill_process(&self.sys, raw)
    }
}
