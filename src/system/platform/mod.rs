/// Column set requested from `ps`, and where each column lands once a line
/// is split on whitespace. `Reduced` is for listers that cannot report a
/// per-process thread count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnLayout {
    Standard,
    Reduced,
}

impl ColumnLayout {
    pub fn ps_format(self) -> &'static str {
        match self {
            ColumnLayout::Standard => "user,ppid,pid,vsz,rss,pcpu,nlwp,state,etime,time,command",
            ColumnLayout::Reduced => "user,ppid,pid,vsz,rss,pcpu,state,etime,time,command",
        }
    }

    pub fn threads_known(self) -> bool {
        matches!(self, ColumnLayout::Standard)
    }

    /// Fewest fields a line may have and still produce a record.
    pub fn min_fields(self) -> usize {
        self.command_start() + 1
    }

    pub fn thread_index(self) -> Option<usize> {
        self.threads_known().then_some(6)
    }

    pub fn state_index(self) -> usize {
        6 + self.shift()
    }

    pub fn etime_index(self) -> usize {
        7 + self.shift()
    }

    pub fn time_index(self) -> usize {
        8 + self.shift()
    }

    pub fn command_start(self) -> usize {
        9 + self.shift()
    }

    fn shift(self) -> usize {
        usize::from(self.threads_known())
    }
}

pub trait PlatformExtensions {
    fn column_layout() -> ColumnLayout;
    fn lister_program() -> &'static str;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
mod other;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
use other as platform_impl;

/// Layout the host's `ps` supports.
pub fn native_layout() -> ColumnLayout {
    platform_impl::Platform::column_layout()
}

pub fn lister_program() -> &'static str {
    platform_impl::Platform::lister_program()
}
