//! Process interrupt handling
//!
//! SIGINT/SIGTERM (Unix) and console control events (Windows) set a static
//! flag that the teleop loop observes through [`InterruptFlag`].

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::errors::{Result, TeleopError};
use crate::teleop::InterruptFlag;

static SIGNALED: AtomicBool = AtomicBool::new(false);

/// Install the OS interrupt handler and return a flag wired to it
pub fn install_interrupt_handler() -> Result<InterruptFlag> {
    platform::install()?;
    debug!("Interrupt handler installed");
    Ok(InterruptFlag::with_os_signal(&SIGNALED))
}

#[cfg(unix)]
mod platform {
    use super::*;
    use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};

    extern "C" fn on_signal(_: nix::libc::c_int) {
        SIGNALED.store(true, Ordering::SeqCst);
    }

    pub(super) fn install() -> Result<()> {
        let action = SigAction::new(
            SigHandler::Handler(on_signal),
            SaFlags::SA_RESTART,
            SigSet::empty(),
        );
        for signal in [Signal::SIGINT, Signal::SIGTERM] {
            // SAFETY: the handler only performs an atomic store
            unsafe { sigaction(signal, &action) }.map_err(|e| {
                TeleopError::signal_operation(format!("Failed to install {:?} handler: {}", signal, e))
            })?;
        }
        Ok(())
    }
}

#[cfg(windows)]
mod platform {
    use super::*;
    use windows_sys::Win32::System::Console::SetConsoleCtrlHandler;

    unsafe extern "system" fn on_console_event(_ctrl_type: u32) -> i32 {
        SIGNALED.store(true, Ordering::SeqCst);
        1
    }

    pub(super) fn install() -> Result<()> {
        // SAFETY: registers a handler that only performs an atomic store
        let ok = unsafe { SetConsoleCtrlHandler(Some(on_console_event), 1) };
        if ok == 0 {
            return Err(TeleopError::signal_operation(format!(
                "Failed to install console control handler: {}",
                std::io::Error::last_os_error()
            )));
        }
        Ok(())
    }
}
