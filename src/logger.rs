use std::sync::atomic::{AtomicU8, Ordering};

pub const QUIET: u8 = 0;
pub const NORMAL: u8 = 1;
pub const VERBOSE: u8 = 2;

static LEVEL: AtomicU8 = AtomicU8::new(NORMAL);

/// Sets the process-wide output level once, from the CLI flags.
/// Quiet wins over verbose when both are given.
pub fn init(quiet: bool, verbose: bool) {
    let level = if quiet {
        QUIET
    } else if verbose {
        VERBOSE
    } else {
        NORMAL
    };
    LEVEL.store(level, Ordering::Relaxed);
}

pub fn level() -> u8 {
    LEVEL.load(Ordering::Relaxed)
}

/// Normal-level line on stdout.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        if $crate::logger::level() >= $crate::logger::NORMAL {
            println!($($arg)*);
        }
    };
}

/// Verbose-level line on stdout: per-item sizes, constraint dumps.
#[macro_export]
macro_rules! detail {
    ($($arg:tt)*) => {
        if $crate::logger::level() >= $crate::logger::VERBOSE {
            println!("  {}", format!($($arg)*));
        }
    };
}

/// Warning on stderr; suppressed only by quiet mode.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        if $crate::logger::level() >= $crate::logger::NORMAL {
            eprintln!("⚠️  {}", format!($($arg)*));
        }
    };
}
