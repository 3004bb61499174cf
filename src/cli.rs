use std::sync::atomic::{AtomicBool, Ordering};

/// Width of the message prefix column
const PREFIX_LEN: usize = 10;

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Right-align a (possibly styled) prefix so messages line up
pub fn gen_prefix(prefix: &str) -> String {
    let width = console::measure_text_width(prefix);
    if width >= PREFIX_LEN {
        format!("{} ", prefix)
    } else {
        format!("{}{} ", " ".repeat(PREFIX_LEN - width), prefix)
    }
}

#[macro_export]
macro_rules! msg {
    ($prefix:expr, $($arg:tt)+) => {
        eprintln!("{}{}", $crate::cli::gen_prefix($prefix), format!($($arg)+));
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::msg!(&console::style("INFO").blue().bold().to_string(), $($arg)+);
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        $crate::msg!(&console::style("SUCCESS").green().bold().to_string(), $($arg)+);
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::msg!(&console::style("WARNING").yellow().bold().to_string(), $($arg)+);
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::msg!(&console::style("ERROR").red().bold().to_string(), $($arg)+);
    };
}

#[macro_export]
macro_rules! due_to {
    ($($arg:tt)+) => {
        $crate::msg!(&console::style("DUE TO").yellow().bold().to_string(), $($arg)+);
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        if $crate::cli::is_verbose() {
            $crate::msg!(&console::style("DEBUG").dim().to_string(), $($arg)+);
        }
    };
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn prefix_alignment() {
        assert_eq!(gen_prefix("INFO"), "      INFO ");
        assert_eq!(gen_prefix(""), "           ");
        assert_eq!(gen_prefix("VERYLONGPREFIX"), "VERYLONGPREFIX ");
        // ANSI escapes must not count towards the width
        let styled = console::style("DONE").dim().force_styling(true).to_string();
        assert_eq!(console::measure_text_width(&gen_prefix(&styled)), PREFIX_LEN + 1);
    }
}
