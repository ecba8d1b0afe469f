use kdl_parse::{
    from_reader, from_slice, parse, parse_with_options, Error, ErrorKind, ParseOptions, Position,
};
use std::io;

fn err(input: &str) -> Error {
    match parse(input) {
        Ok(doc) => panic!("expected an error for {:?}, parsed {:?}", input, doc),
        Err(err) => err,
    }
}

fn at(line: usize, column: usize, offset: usize) -> Position {
    Position {
        offset,
        line,
        column,
    }
}

#[test]
fn test_unterminated_strings() {
    let e = err("node \"abc\n");
    assert_eq!(e, Error::UnterminatedString { position: at(1, 6, 5) });

    let e = err("node \"\"\"\nnever closed\n");
    assert_eq!(e.kind(), ErrorKind::UnterminatedString);
    assert_eq!(e.position(), Some(at(1, 6, 5)));

    let e = err("n \"ends in escape\\");
    assert_eq!(e.kind(), ErrorKind::UnterminatedString);
}

#[test]
fn test_unterminated_raw_string_reports_hash_count() {
    let e = err("a\nnode ##\"abc\"#\n");
    assert_eq!(
        e,
        Error::UnterminatedRawString {
            position: at(2, 6, 7),
            hashes: 2,
        }
    );
}

#[test]
fn test_unterminated_comment_reports_depth() {
    let e = err("a /* outer /* inner */\n");
    assert_eq!(
        e,
        Error::UnterminatedComment {
            position: at(1, 3, 2),
            depth: 1,
        }
    );

    let e = err("/* /* /*");
    assert!(matches!(e, Error::UnterminatedComment { depth: 3, .. }));
}

#[test]
fn test_invalid_escapes() {
    let e = err("n \"a\\qb\"\n");
    assert_eq!(e.kind(), ErrorKind::InvalidEscape);
    assert_eq!(e.position(), Some(at(1, 5, 4)));
    assert!(e.to_string().contains("\\q"));

    assert_eq!(err("n \"\\u{}\"").kind(), ErrorKind::InvalidEscape);
    assert_eq!(err("n \"\\u{1234567}\"").kind(), ErrorKind::InvalidEscape);
    // Surrogates are not scalar values
    assert_eq!(err("n \"\\u{D800}\"").kind(), ErrorKind::InvalidEscape);
    assert_eq!(err("n \"\\u0041\"").kind(), ErrorKind::InvalidEscape);
}

#[test]
fn test_invalid_numbers() {
    let e = err("node 0x\n");
    assert_eq!(e.kind(), ErrorKind::InvalidNumber);
    assert_eq!(e.position(), Some(at(1, 6, 5)));

    for input in ["n 1abc", "n 0b102", "n 1.", "n .5", "n 1e", "n -0o8"] {
        let e = err(input);
        assert_eq!(e.kind(), ErrorKind::InvalidNumber, "input {:?}", input);
        assert_eq!(e.position().map(|p| p.offset), Some(2), "input {:?}", input);
    }
}

#[test]
fn test_unexpected_tokens() {
    let e = err("node [1]\n");
    assert_eq!(e.kind(), ErrorKind::UnexpectedToken);
    assert_eq!(e.position(), Some(at(1, 6, 5)));

    assert_eq!(err("n #maybe").kind(), ErrorKind::UnexpectedToken);
    assert_eq!(err("n / 1").kind(), ErrorKind::UnexpectedToken);
    assert_eq!(err("n 1 \\ 2\n").kind(), ErrorKind::UnexpectedToken);
    assert_eq!(err("n key=\n").kind(), ErrorKind::UnexpectedToken);
    assert_eq!(err("= 1\n").kind(), ErrorKind::UnexpectedToken);
}

#[test]
fn test_unexpected_token_names_both_sides() {
    let e = err("a {\n  b\n");
    match e {
        Error::UnexpectedToken {
            expected, found, ..
        } => {
            assert_eq!(expected, "'}'");
            assert_eq!(found, "end of input");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_second_children_block() {
    let e = err("a { b }{ c }\n");
    assert_eq!(e.kind(), ErrorKind::UnexpectedToken);
    assert_eq!(e.position().map(|p| p.offset), Some(7));

    // A slashdashed block does not count as the active one
    assert!(parse("a /-{ b } { c }\n").is_ok());
    assert!(parse("a { b } /-{ c }\n").is_ok());
}

#[test]
fn test_missing_terminator() {
    let e = err("a \"x\"\"y\"\n");
    assert_eq!(e.kind(), ErrorKind::MissingTerminator);
    assert_eq!(e.position(), Some(at(1, 6, 5)));

    assert_eq!(err("(t)n(u)1\n").kind(), ErrorKind::MissingTerminator);
}

#[test]
fn test_version_marker_errors() {
    let e = err("/- kdl-version 3\nnode\n");
    assert_eq!(
        e,
        Error::InvalidVersion {
            position: at(1, 16, 15),
            found: "3".to_string(),
        }
    );
    assert_eq!(err("/- kdl-version two\n").kind(), ErrorKind::InvalidVersion);

    let e = err("a\n/- kdl-version 2\n");
    assert_eq!(e, Error::MisplacedVersionMarker { position: at(2, 1, 2) });
}

#[test]
fn test_nesting_limit() {
    let options = ParseOptions::new().with_max_depth(3);
    assert!(parse_with_options("a { b { c { d } } }\n", options).is_ok());

    let e = parse_with_options("a { b { c { d { e } } } }\n", options).unwrap_err();
    assert_eq!(
        e,
        Error::NestingTooDeep {
            position: at(1, 15, 14),
            limit: 3,
        }
    );

    let deep = format!("{}{}", "n {".repeat(300), "}".repeat(300));
    assert_eq!(err(&deep).kind(), ErrorKind::NestingTooDeep);
}

#[test]
fn test_invalid_utf8() {
    let e = from_slice(b"node \"\xe2\x28\xa1\"\n").unwrap_err();
    assert_eq!(e, Error::InvalidUtf8 { valid_up_to: 6 });
    assert_eq!(e.position(), None);
}

struct FailingReader;

impl io::Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
    }
}

#[test]
fn test_io_error() {
    let e = from_reader(FailingReader).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Io);
    assert!(e.to_string().contains("disk on fire"));
}

#[test]
fn test_error_messages_carry_location() {
    let e = err("a\nb \"open\n");
    assert_eq!(
        e.to_string(),
        "Unterminated string starting at line 2, column 3 (byte 4)"
    );
}
