//! What a boundary (CLI, API layer) needs to turn an [`Error`] into output:
//! a coarse class, an exit status, and a serializable payload carrying every
//! structured field of the kind.

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorClass {
    /// Provisioning code is inconsistent; never swallow.
    Internal,
    /// Supplied data is invalid; report back to whoever supplied it.
    InputData,
    /// The machine is not in the state a step requires.
    Environment,
    /// An external tool failed.
    Execution,
}

impl ErrorClass {
    /// sysexits(3)-style process exit status.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Internal => 70,    // EX_SOFTWARE
            Self::InputData => 65,   // EX_DATAERR
            Self::Environment => 69, // EX_UNAVAILABLE
            Self::Execution => 71,   // EX_OSERR
        }
    }

    pub fn is_recoverable(self) -> bool {
        !matches!(self, Self::Internal)
    }
}

impl ErrorKind {
    pub fn class(self) -> ErrorClass {
        if self.is_internal() {
            return ErrorClass::Internal;
        }
        if self.is_input_data() {
            return ErrorClass::InputData;
        }
        match self {
            Self::ProcessExecution | Self::UnexpectedProcess | Self::GrubUtils | Self::FsUtils => {
                ErrorClass::Execution
            }
            _ => ErrorClass::Environment,
        }
    }
}

/// Machine-readable rendering of an [`Error`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub class: ErrorClass,
    pub exit_code: i32,
    pub message: String,
    /// Structured fields of the kind; `null` for message-only kinds.
    pub details: serde_json::Value,
}

impl ErrorReport {
    /// Logs the report as one structured `tracing` event.
    pub fn emit(&self) {
        match self.class {
            ErrorClass::Internal | ErrorClass::Execution => tracing::error!(
                kind = %self.kind,
                class = %self.class,
                exit_code = self.exit_code,
                "{}",
                self.message
            ),
            ErrorClass::InputData | ErrorClass::Environment => tracing::warn!(
                kind = %self.kind,
                class = %self.class,
                exit_code = self.exit_code,
                "{}",
                self.message
            ),
        }
    }
}

impl Error {
    pub fn class(&self) -> ErrorClass {
        self.kind().class()
    }

    pub fn report(&self) -> ErrorReport {
        let kind = self.kind();
        let class = kind.class();
        ErrorReport {
            kind,
            class,
            exit_code: class.exit_code(),
            message: self.message().to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> serde_json::Value {
        match self {
            Self::Internal(err) | Self::DataSchemaCorrupt(err) => match err.context() {
                Some(context) => serde_json::json!({
                    "source_type": context.source_type(),
                    "chain": context.chain(),
                }),
                None => serde_json::Value::Null,
            },
            Self::InputDataSchemaValidation(err) => serde_json::json!({
                "defects": err.defects(),
            }),
            Self::BlockDeviceNotFound(err) => serde_json::json!({
                "kind": err.kind(),
                "needle": err.needle(),
            }),
            Self::ProcessExecution(err) => serde_json::json!({
                "cmd": err.cmd(),
                "exit_code": err.exit_code(),
                "stdout": err.stdout(),
                "stderr": err.stderr(),
                "description": err.description(),
            }),
            _ => serde_json::Value::Null,
        }
    }
}
