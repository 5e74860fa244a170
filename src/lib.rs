#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

//! Failure taxonomy for disk provisioning and image deployment.
//!
//! Every failure the provisioning stages can raise (block-device discovery,
//! partitioning, LVM/MD management, config-drive and image handling, external
//! tools, input validation) is one variant of [`Error`]. Each variant carries
//! a message fixed at construction plus whatever structured context the kind
//! defines: lookup criteria, process output, validation defects, or a snapshot
//! of the failure an internal error was raised from.

pub mod device;
pub mod error;
pub mod internal;
pub mod process;
pub mod report;
pub mod validation;

pub use device::BlockDeviceLookupError;
pub use error::{Error, ErrorKind, Result};
pub use internal::{CapturedContext, InternalError};
pub use process::{ProcessExecutionError, ProcessExecutionErrorBuilder};
pub use report::{ErrorClass, ErrorReport};
pub use validation::{Defect, InputDataSchemaValidationError, PathSegment};
