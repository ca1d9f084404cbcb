mod common;

use common::{line_len, replace, write_bytes, write_file, THREE_LINES};
use lazylines::{Encoding, Error, LazyFile};
use tempfile::tempdir;

#[test]
fn test_apply_line_lengths() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "data.txt", THREE_LINES);

    let mut file = LazyFile::new(&path).unwrap();
    file.open().unwrap();
    let lengths: Vec<usize> = file
        .apply(line_len)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    file.close().unwrap();

    // Terminators count: "a\n" is 2 bytes.
    assert_eq!(lengths, vec![2, 3, 4]);
}

#[test]
fn test_map_function_line_lengths() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "data.txt", THREE_LINES);

    let mut file = LazyFile::new(&path).unwrap();
    file.open().unwrap();
    let lengths: Vec<usize> = file
        .map_function(line_len)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    file.close().unwrap();

    assert_eq!(lengths, vec![2, 3, 4]);
}

#[test]
fn test_map_function_with_replace() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "data.txt", THREE_LINES);

    let mut file = LazyFile::new(&path).unwrap();
    file.open().unwrap();
    let out: Vec<String> = file
        .map_function_with(replace, ("a", "X"))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    file.close().unwrap();

    assert_eq!(out, vec!["X\n", "bb\n", "ccc\n"]);
}

#[test]
fn test_apply_with_matches_map_function_with() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "data.txt", THREE_LINES);

    let mut file = LazyFile::new(&path).unwrap();

    file.open().unwrap();
    let via_apply: Vec<String> = file
        .apply_with(replace, ("a", "X"))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    file.close().unwrap();

    file.open().unwrap();
    let via_map: Vec<String> = file
        .map_function_with(replace, ("a", "X"))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    file.close().unwrap();

    assert_eq!(via_apply, via_map);
}

#[test]
fn test_unit_bundle_matches_no_bundle() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "data.txt", THREE_LINES);

    fn len_ignoring_unit(line: String, _args: &()) -> usize {
        line.len()
    }

    let mut file = LazyFile::new(&path).unwrap();

    file.open().unwrap();
    let direct: Vec<usize> = file
        .apply(line_len)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    file.close().unwrap();

    file.open().unwrap();
    let bundled: Vec<usize> = file
        .map_function_with(len_ignoring_unit, ())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    file.close().unwrap();

    assert_eq!(direct, bundled);
}

#[test]
fn test_terminators_preserved() {
    let dir = tempdir().unwrap();
    let contents = "one\r\ntwo\nthree";
    let path = write_file(&dir, "mixed.txt", contents);

    let mut file = LazyFile::new(&path).unwrap();
    file.open().unwrap();
    let lines: Vec<String> = file.lines().unwrap().map(Result::unwrap).collect();
    file.close().unwrap();

    assert_eq!(lines, vec!["one\r\n", "two\n", "three"]);
    assert_eq!(lines.concat(), contents);
}

#[test]
fn test_empty_file_yields_nothing() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "empty.txt", "");

    let mut file = LazyFile::new(&path).unwrap();
    file.open().unwrap();
    let count = file.apply(line_len).unwrap().count();
    file.close().unwrap();

    assert_eq!(count, 0);
}

#[test]
fn test_blank_lines_are_lines() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "blank.txt", "\n\n");

    let mut file = LazyFile::new(&path).unwrap();
    file.open().unwrap();
    let lines: Vec<String> = file.lines().unwrap().map(Result::unwrap).collect();
    file.close().unwrap();

    assert_eq!(lines, vec!["\n", "\n"]);
}

#[test]
fn test_strict_utf8_fails_on_invalid_line() {
    let dir = tempdir().unwrap();
    let path = write_bytes(&dir, "bad.txt", b"ok\n\xff\xfe\nrest\n");

    let mut file = LazyFile::new(&path).unwrap();
    file.open().unwrap();
    let items: Vec<_> = file.lines().unwrap().collect();
    file.close().unwrap();

    assert_eq!(items.len(), 2, "the sequence ends at the failed read");
    assert_eq!(items[0].as_deref().unwrap(), "ok\n");
    let err = items[1].as_ref().unwrap_err();
    assert!(matches!(err, Error::Read { line: 2, .. }));
    assert_eq!(err.line(), Some(2));
}

#[test]
fn test_lossy_utf8_replaces_invalid_bytes() {
    let dir = tempdir().unwrap();
    let path = write_bytes(&dir, "bad.txt", b"ok\n\xff\xfe\nrest\n");

    let mut file = LazyFile::builder(&path)
        .encoding(Encoding::Utf8Lossy)
        .build()
        .unwrap();
    file.open().unwrap();
    let lines: Vec<String> = file.lines().unwrap().map(Result::unwrap).collect();
    file.close().unwrap();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "ok\n");
    assert!(lines[1].contains('\u{FFFD}'));
    assert_eq!(lines[2], "rest\n");
}

#[test]
fn test_try_apply_tags_failing_line() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "numbers.txt", "1\n2\nx\n4\n");

    let mut file = LazyFile::new(&path).unwrap();
    file.open().unwrap();
    let items: Vec<_> = file
        .try_apply(|line| line.trim_end().parse::<i32>())
        .unwrap()
        .collect();
    file.close().unwrap();

    assert_eq!(items.len(), 4);
    assert_eq!(*items[0].as_ref().unwrap(), 1);
    assert_eq!(*items[1].as_ref().unwrap(), 2);
    let err = items[2].as_ref().unwrap_err();
    assert!(matches!(err, Error::Function { line: 3, .. }));
    assert_eq!(err.line(), Some(3));
    assert_eq!(*items[3].as_ref().unwrap(), 4, "later lines stay reachable");
}

#[test]
fn test_successive_applications_share_the_sequence() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "data.txt", THREE_LINES);

    let mut file = LazyFile::new(&path).unwrap();
    file.open().unwrap();

    let first: Vec<usize> = file
        .apply(line_len)
        .unwrap()
        .take(1)
        .map(Result::unwrap)
        .collect();
    assert_eq!(first, vec![2]);

    // The second application continues where the first stopped.
    let rest: Vec<String> = file
        .map_function(|line| line)
        .unwrap()
        .map(Result::unwrap)
        .collect();
    assert_eq!(rest, vec!["bb\n", "ccc\n"]);

    file.close().unwrap();
}

#[test]
fn test_closure_arguments_capture() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "data.txt", THREE_LINES);

    let prefix = String::from("> ");
    let mut file = LazyFile::new(&path).unwrap();
    file.open().unwrap();
    let out: Vec<String> = file
        .apply(|line| format!("{prefix}{line}"))
        .unwrap()
        .map(Result::unwrap)
        .collect();
    file.close().unwrap();

    assert_eq!(out, vec!["> a\n", "> bb\n", "> ccc\n"]);
}
