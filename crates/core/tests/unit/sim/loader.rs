//! # Loader Tests
//!
//! Loading programs from strings and files, including batched decode errors.

use std::io::Write;

use mipsim_core::sim::{LoadError, load_program, load_program_file};
use tempfile::NamedTempFile;

#[test]
fn loads_program_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "addi $1, $0, 5").unwrap();
    writeln!(file, "nop").unwrap();

    let program = load_program_file(file.path()).unwrap();
    assert_eq!(program.len(), 2);
    assert_eq!(program[1].text, "nop");
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_program_file(dir.path().join("absent.s")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("absent.s"));
}

#[test]
fn decode_errors_are_batched() {
    let err = load_program("bogus\nnop\nadd $0, $1, $1").unwrap_err();
    match &err {
        LoadError::Parse(errors) => assert_eq!(errors.len(), 2),
        other => panic!("unexpected {other:?}"),
    }
    let text = err.to_string();
    assert!(text.starts_with("2 decode error(s):"), "{text}");
    assert!(text.contains("line 1:"));
    assert!(text.contains("line 3:"));
}

#[test]
fn comment_only_source_is_empty() {
    assert!(matches!(load_program("# nothing here\n\n"), Err(LoadError::Empty)));
}
