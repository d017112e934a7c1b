// src/exit.rs
//! Standardized process exit codes for `supercat`.
//!
//! Provides a stable contract for the batch scripts that drive scoring runs.

use std::process::Termination;

use crate::error::SupercatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SupercatExit {
    /// Run completed; every dispatched task finished.
    Success = 0,
    /// Generic error (I/O, output write failure, worker pool setup).
    Error = 1,
    /// Configuration rejected (bad TOML, out-of-range constants, unknown root).
    InvalidConfig = 2,
    /// A required input file does not exist.
    MissingInput = 3,
}

impl SupercatExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }

    /// Maps a failed run to its exit code by looking for a typed cause in the chain.
    #[must_use]
    pub fn classify(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            match cause.downcast_ref::<SupercatError>() {
                Some(SupercatError::MissingInput(_)) => return Self::MissingInput,
                Some(SupercatError::InvalidConfig(_) | SupercatError::Toml(_)) => {
                    return Self::InvalidConfig
                }
                _ => {}
            }
        }
        Self::Error
    }
}

impl Termination for SupercatExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

impl From<anyhow::Result<()>> for SupercatExit {
    fn from(res: anyhow::Result<()>) -> Self {
        match res {
            Ok(()) => Self::Success,
            Err(e) => Self::classify(&e),
        }
    }
}
