//! The failure taxonomy shared by every provisioning stage.
//!
//! [`Error`] is deliberately flat: one variant per failure kind, so callers
//! recover from exactly the kind they understand with a plain `match` and let
//! everything else propagate. The only grouping that exists is expressed as
//! capability predicates on [`ErrorKind`] ([`ErrorKind::is_internal`],
//! [`ErrorKind::is_input_data`], [`ErrorKind::is_block_device_scheme`]).

use crate::device::BlockDeviceLookupError;
use crate::internal::InternalError;
use crate::process::ProcessExecutionError;
use crate::validation::{Defect, InputDataSchemaValidationError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    /// A bug or broken invariant in provisioning code itself.
    #[error(transparent)]
    Internal(InternalError),

    /// Data that already passed validation turned out to be inconsistent.
    #[error(transparent)]
    DataSchemaCorrupt(InternalError),

    #[error("{0}")]
    ApplicationDataCorrupt(String),

    #[error("{0}")]
    WrongInputData(String),

    #[error(transparent)]
    InputDataSchemaValidation(InputDataSchemaValidationError),

    #[error(transparent)]
    BlockDeviceNotFound(BlockDeviceLookupError),

    #[error("{0}")]
    BlockDeviceScheme(String),

    #[error("{0}")]
    BlockDeviceAllocation(String),

    #[error("{0}")]
    WrongPartitionScheme(String),

    #[error("{0}")]
    WrongPartitionPolicy(String),

    #[error("{0}")]
    PartitionSchemeMismatch(String),

    #[error("{0}")]
    HardwarePartitionSchemeCannotBeRead(String),

    #[error("{0}")]
    WrongPartitionLabel(String),

    #[error("{0}")]
    PartitionNotFound(String),

    #[error("{0}")]
    DiskNotFound(String),

    #[error("{0}")]
    NotEnoughSpace(String),

    #[error("{0}")]
    PvAlreadyExists(String),

    #[error("{0}")]
    PvNotFound(String),

    /// The physical volume is still claimed by a volume group.
    #[error("{0}")]
    PvBelongsToVg(String),

    #[error("{0}")]
    VgAlreadyExists(String),

    #[error("{0}")]
    VgNotFound(String),

    #[error("{0}")]
    LvAlreadyExists(String),

    #[error("{0}")]
    LvNotFound(String),

    #[error("{0}")]
    MdAlreadyExists(String),

    #[error("{0}")]
    MdNotFound(String),

    #[error("{0}")]
    MdDeviceDuplication(String),

    #[error("{0}")]
    MdWrongSpec(String),

    #[error("{0}")]
    MdRemoving(String),

    #[error("{0}")]
    WrongConfigDriveData(String),

    #[error("{0}")]
    WrongImageData(String),

    #[error("{0}")]
    TemplateWrite(String),

    #[error(transparent)]
    ProcessExecution(ProcessExecutionError),

    #[error("{0}")]
    GrubUtils(String),

    #[error("{0}")]
    FsUtils(String),

    #[error("{0}")]
    HttpUrlConnection(String),

    #[error("{0}")]
    HttpUrlInvalidContentLength(String),

    #[error("{0}")]
    ImageChecksumMismatch(String),

    #[error("{0}")]
    NoFreeLoopDevices(String),

    #[error("{0}")]
    WrongRepository(String),

    #[error("{0}")]
    WrongDevice(String),

    #[error("{0}")]
    UnexpectedProcess(String),

    #[error("{0}")]
    IncorrectChroot(String),

    #[error("{0}")]
    TooManyKernels(String),

    #[error("{0}")]
    EmptyCustomFlow(String),

    #[error("{0}")]
    NonexistingFlow(String),

    #[error("{0}")]
    WrongOutputContainer(String),

    #[error("{0}")]
    BootstrapFileAlreadyExists(String),
}

/// Stable, fieldless name of every [`Error`] variant.
///
/// The string form is the conventional kind name (`DiskNotFoundError`,
/// `NoFreeLoopDevices`, ...) and round-trips through `FromStr`, which lets a
/// boundary log or serialize the kind and read it back.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::IntoStaticStr,
    strum_macros::EnumIter,
    strum_macros::VariantNames,
)]
#[serde(into = "&'static str", try_from = "String")]
pub enum ErrorKind {
    #[strum(to_string = "InternalError")]
    Internal,
    #[strum(to_string = "DataSchemaCorruptError")]
    DataSchemaCorrupt,
    #[strum(to_string = "ApplicationDataCorruptError")]
    ApplicationDataCorrupt,
    #[strum(to_string = "WrongInputDataError")]
    WrongInputData,
    #[strum(to_string = "InputDataSchemaValidationError")]
    InputDataSchemaValidation,
    #[strum(to_string = "BlockDeviceNotFoundError")]
    BlockDeviceNotFound,
    #[strum(to_string = "BlockDeviceSchemeError")]
    BlockDeviceScheme,
    #[strum(to_string = "BlockDeviceAllocationError")]
    BlockDeviceAllocation,
    #[strum(to_string = "WrongPartitionSchemeError")]
    WrongPartitionScheme,
    #[strum(to_string = "WrongPartitionPolicyError")]
    WrongPartitionPolicy,
    #[strum(to_string = "PartitionSchemeMismatchError")]
    PartitionSchemeMismatch,
    #[strum(to_string = "HardwarePartitionSchemeCannotBeReadError")]
    HardwarePartitionSchemeCannotBeRead,
    #[strum(to_string = "WrongPartitionLabelError")]
    WrongPartitionLabel,
    #[strum(to_string = "PartitionNotFoundError")]
    PartitionNotFound,
    #[strum(to_string = "DiskNotFoundError")]
    DiskNotFound,
    #[strum(to_string = "NotEnoughSpaceError")]
    NotEnoughSpace,
    #[strum(to_string = "PVAlreadyExistsError")]
    PvAlreadyExists,
    #[strum(to_string = "PVNotFoundError")]
    PvNotFound,
    #[strum(to_string = "PVBelongsToVGError")]
    PvBelongsToVg,
    #[strum(to_string = "VGAlreadyExistsError")]
    VgAlreadyExists,
    #[strum(to_string = "VGNotFoundError")]
    VgNotFound,
    #[strum(to_string = "LVAlreadyExistsError")]
    LvAlreadyExists,
    #[strum(to_string = "LVNotFoundError")]
    LvNotFound,
    #[strum(to_string = "MDAlreadyExistsError")]
    MdAlreadyExists,
    #[strum(to_string = "MDNotFoundError")]
    MdNotFound,
    #[strum(to_string = "MDDeviceDuplicationError")]
    MdDeviceDuplication,
    #[strum(to_string = "MDWrongSpecError")]
    MdWrongSpec,
    #[strum(to_string = "MDRemovingError")]
    MdRemoving,
    #[strum(to_string = "WrongConfigDriveDataError")]
    WrongConfigDriveData,
    #[strum(to_string = "WrongImageDataError")]
    WrongImageData,
    #[strum(to_string = "TemplateWriteError")]
    TemplateWrite,
    #[strum(to_string = "ProcessExecutionError")]
    ProcessExecution,
    #[strum(to_string = "GrubUtilsError")]
    GrubUtils,
    #[strum(to_string = "FsUtilsError")]
    FsUtils,
    #[strum(to_string = "HttpUrlConnectionError")]
    HttpUrlConnection,
    #[strum(to_string = "HttpUrlInvalidContentLength")]
    HttpUrlInvalidContentLength,
    #[strum(to_string = "ImageChecksumMismatchError")]
    ImageChecksumMismatch,
    #[strum(to_string = "NoFreeLoopDevices")]
    NoFreeLoopDevices,
    #[strum(to_string = "WrongRepositoryError")]
    WrongRepository,
    #[strum(to_string = "WrongDeviceError")]
    WrongDevice,
    #[strum(to_string = "UnexpectedProcessError")]
    UnexpectedProcess,
    #[strum(to_string = "IncorrectChroot")]
    IncorrectChroot,
    #[strum(to_string = "TooManyKernels")]
    TooManyKernels,
    #[strum(to_string = "EmptyCustomFlow")]
    EmptyCustomFlow,
    #[strum(to_string = "NonexistingFlow")]
    NonexistingFlow,
    #[strum(to_string = "WrongOutputContainer")]
    WrongOutputContainer,
    #[strum(to_string = "BootstrapFileAlreadyExists")]
    BootstrapFileAlreadyExists,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Bugs in provisioning code, as opposed to bad input or environment.
    pub fn is_internal(self) -> bool {
        matches!(self, Self::Internal | Self::DataSchemaCorrupt)
    }

    /// Externally supplied data failed validation.
    pub fn is_input_data(self) -> bool {
        matches!(self, Self::WrongInputData | Self::InputDataSchemaValidation)
    }

    pub fn is_block_device_scheme(self) -> bool {
        matches!(self, Self::BlockDeviceScheme | Self::BlockDeviceAllocation)
    }
}

impl TryFrom<String> for ErrorKind {
    type Error = strum::ParseError;

    fn try_from(name: String) -> std::result::Result<Self, Self::Error> {
        name.parse()
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Internal(_) => ErrorKind::Internal,
            Self::DataSchemaCorrupt(_) => ErrorKind::DataSchemaCorrupt,
            Self::ApplicationDataCorrupt(_) => ErrorKind::ApplicationDataCorrupt,
            Self::WrongInputData(_) => ErrorKind::WrongInputData,
            Self::InputDataSchemaValidation(_) => ErrorKind::InputDataSchemaValidation,
            Self::BlockDeviceNotFound(_) => ErrorKind::BlockDeviceNotFound,
            Self::BlockDeviceScheme(_) => ErrorKind::BlockDeviceScheme,
            Self::BlockDeviceAllocation(_) => ErrorKind::BlockDeviceAllocation,
            Self::WrongPartitionScheme(_) => ErrorKind::WrongPartitionScheme,
            Self::WrongPartitionPolicy(_) => ErrorKind::WrongPartitionPolicy,
            Self::PartitionSchemeMismatch(_) => ErrorKind::PartitionSchemeMismatch,
            Self::HardwarePartitionSchemeCannotBeRead(_) => {
                ErrorKind::HardwarePartitionSchemeCannotBeRead
            }
            Self::WrongPartitionLabel(_) => ErrorKind::WrongPartitionLabel,
            Self::PartitionNotFound(_) => ErrorKind::PartitionNotFound,
            Self::DiskNotFound(_) => ErrorKind::DiskNotFound,
            Self::NotEnoughSpace(_) => ErrorKind::NotEnoughSpace,
            Self::PvAlreadyExists(_) => ErrorKind::PvAlreadyExists,
            Self::PvNotFound(_) => ErrorKind::PvNotFound,
            Self::PvBelongsToVg(_) => ErrorKind::PvBelongsToVg,
            Self::VgAlreadyExists(_) => ErrorKind::VgAlreadyExists,
            Self::VgNotFound(_) => ErrorKind::VgNotFound,
            Self::LvAlreadyExists(_) => ErrorKind::LvAlreadyExists,
            Self::LvNotFound(_) => ErrorKind::LvNotFound,
            Self::MdAlreadyExists(_) => ErrorKind::MdAlreadyExists,
            Self::MdNotFound(_) => ErrorKind::MdNotFound,
            Self::MdDeviceDuplication(_) => ErrorKind::MdDeviceDuplication,
            Self::MdWrongSpec(_) => ErrorKind::MdWrongSpec,
            Self::MdRemoving(_) => ErrorKind::MdRemoving,
            Self::WrongConfigDriveData(_) => ErrorKind::WrongConfigDriveData,
            Self::WrongImageData(_) => ErrorKind::WrongImageData,
            Self::TemplateWrite(_) => ErrorKind::TemplateWrite,
            Self::ProcessExecution(_) => ErrorKind::ProcessExecution,
            Self::GrubUtils(_) => ErrorKind::GrubUtils,
            Self::FsUtils(_) => ErrorKind::FsUtils,
            Self::HttpUrlConnection(_) => ErrorKind::HttpUrlConnection,
            Self::HttpUrlInvalidContentLength(_) => ErrorKind::HttpUrlInvalidContentLength,
            Self::ImageChecksumMismatch(_) => ErrorKind::ImageChecksumMismatch,
            Self::NoFreeLoopDevices(_) => ErrorKind::NoFreeLoopDevices,
            Self::WrongRepository(_) => ErrorKind::WrongRepository,
            Self::WrongDevice(_) => ErrorKind::WrongDevice,
            Self::UnexpectedProcess(_) => ErrorKind::UnexpectedProcess,
            Self::IncorrectChroot(_) => ErrorKind::IncorrectChroot,
            Self::TooManyKernels(_) => ErrorKind::TooManyKernels,
            Self::EmptyCustomFlow(_) => ErrorKind::EmptyCustomFlow,
            Self::NonexistingFlow(_) => ErrorKind::NonexistingFlow,
            Self::WrongOutputContainer(_) => ErrorKind::WrongOutputContainer,
            Self::BootstrapFileAlreadyExists(_) => ErrorKind::BootstrapFileAlreadyExists,
        }
    }

    /// The fully rendered message, fixed when the error was constructed.
    pub fn message(&self) -> &str {
        match self {
            Self::Internal(err) | Self::DataSchemaCorrupt(err) => err.message(),
            Self::InputDataSchemaValidation(err) => err.message(),
            Self::BlockDeviceNotFound(err) => err.message(),
            Self::ProcessExecution(err) => err.message(),
            Self::ApplicationDataCorrupt(message)
            | Self::WrongInputData(message)
            | Self::BlockDeviceScheme(message)
            | Self::BlockDeviceAllocation(message)
            | Self::WrongPartitionScheme(message)
            | Self::WrongPartitionPolicy(message)
            | Self::PartitionSchemeMismatch(message)
            | Self::HardwarePartitionSchemeCannotBeRead(message)
            | Self::WrongPartitionLabel(message)
            | Self::PartitionNotFound(message)
            | Self::DiskNotFound(message)
            | Self::NotEnoughSpace(message)
            | Self::PvAlreadyExists(message)
            | Self::PvNotFound(message)
            | Self::PvBelongsToVg(message)
            | Self::VgAlreadyExists(message)
            | Self::VgNotFound(message)
            | Self::LvAlreadyExists(message)
            | Self::LvNotFound(message)
            | Self::MdAlreadyExists(message)
            | Self::MdNotFound(message)
            | Self::MdDeviceDuplication(message)
            | Self::MdWrongSpec(message)
            | Self::MdRemoving(message)
            | Self::WrongConfigDriveData(message)
            | Self::WrongImageData(message)
            | Self::TemplateWrite(message)
            | Self::GrubUtils(message)
            | Self::FsUtils(message)
            | Self::HttpUrlConnection(message)
            | Self::HttpUrlInvalidContentLength(message)
            | Self::ImageChecksumMismatch(message)
            | Self::NoFreeLoopDevices(message)
            | Self::WrongRepository(message)
            | Self::WrongDevice(message)
            | Self::UnexpectedProcess(message)
            | Self::IncorrectChroot(message)
            | Self::TooManyKernels(message)
            | Self::EmptyCustomFlow(message)
            | Self::NonexistingFlow(message)
            | Self::WrongOutputContainer(message)
            | Self::BootstrapFileAlreadyExists(message) => message,
        }
    }

    pub fn is_internal(&self) -> bool {
        self.kind().is_internal()
    }

    pub fn is_input_data(&self) -> bool {
        self.kind().is_input_data()
    }

    pub fn is_block_device_scheme(&self) -> bool {
        self.kind().is_block_device_scheme()
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(InternalError::new(message))
    }

    /// Internal error wrapping the lower-level failure that exposed the bug.
    pub fn internal_caused_by<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Internal(InternalError::caused_by(message, source))
    }

    pub fn data_schema_corrupt() -> Self {
        Self::DataSchemaCorrupt(InternalError::data_schema_corrupt())
    }

    pub fn data_schema_corrupt_caused_by<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::DataSchemaCorrupt(InternalError::data_schema_corrupt_caused_by(source))
    }

    pub fn block_device_not_found(kind: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::BlockDeviceNotFound(BlockDeviceLookupError::new(kind, needle))
    }

    /// Aggregates validator defects into one input-data error.
    ///
    /// An empty defect list is a bug in the caller and comes back as
    /// [`Error::Internal`] instead.
    pub fn schema_validation(defects: Vec<Defect>) -> Self {
        match InputDataSchemaValidationError::try_new(defects) {
            Ok(err) => Self::InputDataSchemaValidation(err),
            Err(err) => Self::Internal(err),
        }
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        if err.is_data_schema_corrupt() {
            Self::DataSchemaCorrupt(err)
        } else {
            Self::Internal(err)
        }
    }
}

impl From<InputDataSchemaValidationError> for Error {
    fn from(err: InputDataSchemaValidationError) -> Self {
        Self::InputDataSchemaValidation(err)
    }
}

impl From<BlockDeviceLookupError> for Error {
    fn from(err: BlockDeviceLookupError) -> Self {
        Self::BlockDeviceNotFound(err)
    }
}

impl From<ProcessExecutionError> for Error {
    fn from(err: ProcessExecutionError) -> Self {
        Self::ProcessExecution(err)
    }
}

/// An input document that cannot even be parsed is wrong input data.
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::WrongInputData(format!("Malformed input data: {err}"))
    }
}
