//! Terminal lifecycle guard.
//!
//! [`TerminalGuard`] enters raw mode and the alternate screen, and puts the
//! terminal back on drop. That covers normal exit, early `?` returns during
//! setup, and unwinding. [`restore`] is also safe to call from a panic hook.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

/// Set while raw mode is on. Restoring is a no-op otherwise.
static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Owns the raw-mode/alternate-screen session.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen.
    ///
    /// If entering the alternate screen fails, raw mode is switched off
    /// again before the error is returned.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);
        let guard = Self { _private: () };

        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
    }
}

/// Put the terminal back into cooked mode on the main screen.
///
/// Only the first call after [`TerminalGuard::enter`] does anything.
pub fn restore() {
    if RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test: the flag is process-wide.
    #[test]
    fn test_guard_drop_restores_once() {
        // A guard whose alternate-screen step never ran
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);
        let guard = TerminalGuard { _private: () };
        drop(guard);
        assert!(!RAW_MODE_ACTIVE.load(Ordering::SeqCst));

        restore();
        restore();
        assert!(!RAW_MODE_ACTIVE.load(Ordering::SeqCst));
    }
}
