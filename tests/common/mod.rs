#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// The canonical three-line fixture used across the test suite.
pub const THREE_LINES: &str = "a\nbb\nccc\n";

pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

pub fn write_bytes(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

pub fn line_len(line: String) -> usize {
    line.len()
}

pub fn replace(line: String, args: &(&str, &str)) -> String {
    line.replace(args.0, args.1)
}
