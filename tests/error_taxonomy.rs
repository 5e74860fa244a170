#![expect(
    clippy::unwrap_used,
    clippy::panic,
    reason = "test code uses unwrap/panic for concise assertions"
)]

use std::error::Error as _;

use provision_errors::{
    Defect, Error, ErrorClass, ErrorKind, InternalError, ProcessExecutionError, Result,
};
use strum::IntoEnumIterator;

fn sample(kind: ErrorKind) -> Error {
    let text = format!("sample {kind}");
    match kind {
        ErrorKind::Internal => Error::internal(text),
        ErrorKind::DataSchemaCorrupt => Error::data_schema_corrupt(),
        ErrorKind::ApplicationDataCorrupt => Error::ApplicationDataCorrupt(text),
        ErrorKind::WrongInputData => Error::WrongInputData(text),
        ErrorKind::InputDataSchemaValidation => {
            Error::schema_validation(vec![Defect::at_root(text)])
        }
        ErrorKind::BlockDeviceNotFound => Error::block_device_not_found("disk", text),
        ErrorKind::BlockDeviceScheme => Error::BlockDeviceScheme(text),
        ErrorKind::BlockDeviceAllocation => Error::BlockDeviceAllocation(text),
        ErrorKind::WrongPartitionScheme => Error::WrongPartitionScheme(text),
        ErrorKind::WrongPartitionPolicy => Error::WrongPartitionPolicy(text),
        ErrorKind::PartitionSchemeMismatch => Error::PartitionSchemeMismatch(text),
        ErrorKind::HardwarePartitionSchemeCannotBeRead => {
            Error::HardwarePartitionSchemeCannotBeRead(text)
        }
        ErrorKind::WrongPartitionLabel => Error::WrongPartitionLabel(text),
        ErrorKind::PartitionNotFound => Error::PartitionNotFound(text),
        ErrorKind::DiskNotFound => Error::DiskNotFound(text),
        ErrorKind::NotEnoughSpace => Error::NotEnoughSpace(text),
        ErrorKind::PvAlreadyExists => Error::PvAlreadyExists(text),
        ErrorKind::PvNotFound => Error::PvNotFound(text),
        ErrorKind::PvBelongsToVg => Error::PvBelongsToVg(text),
        ErrorKind::VgAlreadyExists => Error::VgAlreadyExists(text),
        ErrorKind::VgNotFound => Error::VgNotFound(text),
        ErrorKind::LvAlreadyExists => Error::LvAlreadyExists(text),
        ErrorKind::LvNotFound => Error::LvNotFound(text),
        ErrorKind::MdAlreadyExists => Error::MdAlreadyExists(text),
        ErrorKind::MdNotFound => Error::MdNotFound(text),
        ErrorKind::MdDeviceDuplication => Error::MdDeviceDuplication(text),
        ErrorKind::MdWrongSpec => Error::MdWrongSpec(text),
        ErrorKind::MdRemoving => Error::MdRemoving(text),
        ErrorKind::WrongConfigDriveData => Error::WrongConfigDriveData(text),
        ErrorKind::WrongImageData => Error::WrongImageData(text),
        ErrorKind::TemplateWrite => Error::TemplateWrite(text),
        ErrorKind::ProcessExecution => ProcessExecutionError::builder().build().into(),
        ErrorKind::GrubUtils => Error::GrubUtils(text),
        ErrorKind::FsUtils => Error::FsUtils(text),
        ErrorKind::HttpUrlConnection => Error::HttpUrlConnection(text),
        ErrorKind::HttpUrlInvalidContentLength => Error::HttpUrlInvalidContentLength(text),
        ErrorKind::ImageChecksumMismatch => Error::ImageChecksumMismatch(text),
        ErrorKind::NoFreeLoopDevices => Error::NoFreeLoopDevices(text),
        ErrorKind::WrongRepository => Error::WrongRepository(text),
        ErrorKind::WrongDevice => Error::WrongDevice(text),
        ErrorKind::UnexpectedProcess => Error::UnexpectedProcess(text),
        ErrorKind::IncorrectChroot => Error::IncorrectChroot(text),
        ErrorKind::TooManyKernels => Error::TooManyKernels(text),
        ErrorKind::EmptyCustomFlow => Error::EmptyCustomFlow(text),
        ErrorKind::NonexistingFlow => Error::NonexistingFlow(text),
        ErrorKind::WrongOutputContainer => Error::WrongOutputContainer(text),
        ErrorKind::BootstrapFileAlreadyExists => Error::BootstrapFileAlreadyExists(text),
    }
}

#[derive(thiserror::Error, Debug)]
#[error("volume group layout references unknown disk {0}")]
struct LayoutError(String);

// ──────────────────── Kind identity ────────────────────

#[test]
fn every_kind_constructs_and_keeps_its_identity() {
    for kind in ErrorKind::iter() {
        let err = sample(kind);
        assert_eq!(err.kind(), kind);
        assert!(!err.message().is_empty(), "{kind} rendered an empty message");
        assert_eq!(err.to_string(), err.message());
        assert_eq!(err.report().kind, kind);
    }
}

#[test]
fn errors_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync + 'static>() {}
    assert_send_sync::<Error>();
}

fn find_disk_by_serial(serial: &str) -> Result<String> {
    Err(Error::DiskNotFound(format!("no disk matches serial {serial}")))
}

fn prepare_root_volume() -> Result<String> {
    let disk = find_disk_by_serial("X")?;
    Ok(format!("{disk}1"))
}

#[test]
fn catch_by_exact_kind_after_propagation() {
    let err = prepare_root_volume().unwrap_err();

    match &err {
        Error::DiskNotFound(message) => assert_eq!(message, "no disk matches serial X"),
        other => panic!("expected DiskNotFound, got {other:?}"),
    }
    assert!(!matches!(err, Error::PvNotFound(_)));
    assert_ne!(err.kind(), ErrorKind::PvNotFound);
    assert_eq!(err.class(), ErrorClass::Environment);
}

#[test]
fn families_are_catchable_as_a_group() {
    let allocation = sample(ErrorKind::BlockDeviceAllocation);
    assert!(allocation.is_block_device_scheme());
    assert!(!allocation.is_internal());

    let validation = sample(ErrorKind::InputDataSchemaValidation);
    assert!(validation.is_input_data());
    assert!(!validation.is_block_device_scheme());

    let corrupt = sample(ErrorKind::DataSchemaCorrupt);
    assert!(corrupt.is_internal());
    assert!(!corrupt.class().is_recoverable());
}

// ──────────────────── Message formatting ────────────────────

#[test]
fn block_device_not_found_message() {
    let err = Error::block_device_not_found("disk", "/dev/sda");
    assert!(err.message().contains(r#"kind="disk""#));
    assert!(err.message().contains(r#"needle="/dev/sda""#));

    let Error::BlockDeviceNotFound(lookup) = &err else {
        panic!("expected BlockDeviceNotFound, got {err:?}");
    };
    assert_eq!(lookup.kind(), "disk");
    assert_eq!(lookup.needle(), "/dev/sda");
}

#[test]
fn process_execution_with_output() {
    let err = ProcessExecutionError::builder()
        .stdout("out")
        .stderr("err")
        .exit_code(1)
        .cmd("ls")
        .build();
    let message = err.message();
    assert!(message.starts_with("Unexpected error while running command.\n"));
    assert!(message.contains("Exit code: 1\n"));
    assert!(message.contains("Stdout: \"out\"\n"));
    assert!(message.ends_with("Stderr: \"err\""));
    assert_eq!(err.exit_code(), Some(1));
}

#[test]
fn process_execution_without_arguments() {
    let err = Error::from(ProcessExecutionError::builder().build());
    assert!(
        err.message()
            .starts_with("Unexpected error while running command.")
    );
    assert!(err.message().contains("Exit code: -"));
}

#[test]
fn schema_validation_lists_defects_in_order() {
    let err = Error::schema_validation(vec![
        Defect::new(["a", "b"], "m1"),
        Defect::new(Vec::<&str>::new(), "m2"),
    ]);
    let lines: Vec<_> = err.message().lines().collect();
    assert_eq!(
        lines,
        ["Invalid input data:", "    #0 (/a/b): m1", "    #1 (/): m2"]
    );

    let Error::InputDataSchemaValidation(validation) = err else {
        panic!("expected InputDataSchemaValidation");
    };
    assert_eq!(validation.defects()[0].path.len(), 2);
    assert!(validation.defects()[1].path.is_empty());
}

// ──────────────────── Context capture ────────────────────

#[test]
fn data_schema_corrupt_without_context() {
    let err = Error::data_schema_corrupt();
    assert!(
        err.message()
            .starts_with("Integrity error in data processed by data validator.")
    );
    assert!(!err.message().contains("Original exception"));
    assert!(err.source().is_none());
}

#[test]
fn data_schema_corrupt_with_originating_failure() {
    let err = Error::data_schema_corrupt_caused_by(LayoutError("vdc".to_string()));
    assert!(err.message().contains("\nOriginal exception "));
    assert!(
        err.message()
            .contains("LayoutError: volume group layout references unknown disk vdc")
    );
    assert_eq!(
        err.source().unwrap().to_string(),
        "volume group layout references unknown disk vdc"
    );
}

#[test]
fn internal_context_survives_rewrapping() {
    let inner = InternalError::caused_by("inner", LayoutError("vdb".to_string()));
    let err = Error::internal_caused_by("outer", inner);

    let Error::Internal(outer) = &err else {
        panic!("expected Internal, got {err:?}");
    };
    let chain = outer.context().unwrap().chain();
    assert!(chain[0].starts_with("inner\nOriginal exception "));
    assert_eq!(chain[1], "volume group layout references unknown disk vdb");
    assert!(err.message().contains("unknown disk vdb"));
}
