pub mod collector;
pub mod etime;
pub mod kill;
pub mod platform;
pub mod process;
pub mod snapshot;
