//! Polling process reaper.
//!
//! On every tick the [`monitor::Monitor`] takes a `ps` snapshot through a
//! [`system::collector::Collector`], skips itself and its direct children,
//! and hands every process whose command line matches the pattern to a
//! [`system::kill::Terminator`].

pub mod config;
pub mod monitor;
pub mod system;
