//! Error Extension Tests

use ogr_domain::error::{Error, Result};
use ogr_infrastructure::error_ext::ErrorContext;
use std::io;

#[test]
fn test_io_context() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

    let result: Result<()> = Err(io_error).io_context("failed to read file");

    if let Err(Error::Io { source, message }) = result {
        assert!(message.contains("failed to read file"));
        assert!(message.contains("file not found"));
        assert!(source.is_some());
    } else {
        panic!("Expected Io error");
    }
}

#[test]
fn test_factory_context() {
    let parse_error = "abc".parse::<u16>().unwrap_err();

    let result: Result<u16> = Err(parse_error).factory_context("invalid port");

    match result {
        Err(Error::Factory { message, source }) => {
            assert!(message.starts_with("invalid port: "));
            assert!(source.is_some());
        }
        _ => panic!("Expected Factory error"),
    }
}

#[test]
fn test_with_factory_context_is_lazy() {
    let ok: std::result::Result<u8, io::Error> = Ok(3);
    let value = ok
        .with_factory_context(|| -> String { panic!("context must not be built on success") })
        .unwrap();
    assert_eq!(value, 3);
}

#[test]
fn test_config_context() {
    let io_error = io::Error::other("bad toml");

    let result: Result<()> = Err(io_error).config_context("cannot parse");

    assert!(matches!(result, Err(Error::Configuration { source: Some(_), .. })));
}
