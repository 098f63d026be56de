//! Integration tests for the bufunzip binary.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn bufunzip_cmd() -> Command {
    cargo_bin_cmd!("bufunzip")
}

/// Write a sample archive into `dir` and return its path
fn sample_zip(dir: &Path) -> PathBuf {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    zip.add_directory("docs/", options).unwrap();
    zip.start_file("docs/readme.txt", options).unwrap();
    zip.write_all(b"read me").unwrap();
    zip.start_file("notes.md", options).unwrap();
    zip.write_all(b"# notes").unwrap();
    zip.start_file("skip.txt", options).unwrap();
    zip.write_all(b"skipped").unwrap();

    let path = dir.join("sample.zip");
    fs::write(&path, zip.finish().unwrap().into_inner()).unwrap();
    path
}

#[test]
fn test_help_flag() {
    bufunzip_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unzip a ZIP archive entirely in memory"));
}

#[test]
fn test_list() {
    let temp = TempDir::new().unwrap();
    let archive = sample_zip(temp.path());

    bufunzip_cmd()
        .arg("-l")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("docs/readme.txt"))
        .stdout(predicate::str::contains("notes.md"));
}

#[test]
fn test_verbose_list_totals() {
    let temp = TempDir::new().unwrap();
    let archive = sample_zip(temp.path());

    bufunzip_cmd()
        .arg("-v")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("Length"))
        .stdout(predicate::str::contains("3 files"));
}

#[test]
fn test_extract_to_dir() {
    let temp = TempDir::new().unwrap();
    let archive = sample_zip(temp.path());
    let out = temp.path().join("out");

    bufunzip_cmd()
        .arg(&archive)
        .arg("-d")
        .arg(&out)
        .arg("-x")
        .arg("skip.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("extracting: docs/readme.txt"));

    assert_eq!(fs::read(out.join("docs/readme.txt")).unwrap(), b"read me");
    assert_eq!(fs::read(out.join("notes.md")).unwrap(), b"# notes");
    assert!(!out.join("skip.txt").exists());
}

#[test]
fn test_extract_selected_junk_paths() {
    let temp = TempDir::new().unwrap();
    let archive = sample_zip(temp.path());
    let out = temp.path().join("out");

    bufunzip_cmd()
        .arg(&archive)
        .arg("*.txt")
        .arg("-j")
        .arg("-q")
        .arg("-d")
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("readme.txt").exists());
    assert!(out.join("skip.txt").exists());
    assert!(!out.join("notes.md").exists());
}

#[test]
fn test_existing_files_are_kept() {
    let temp = TempDir::new().unwrap();
    let archive = sample_zip(temp.path());
    let out = temp.path().join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("notes.md"), b"mine").unwrap();

    bufunzip_cmd()
        .arg(&archive)
        .arg("notes.md")
        .arg("-d")
        .arg(&out)
        .assert()
        .success();
    assert_eq!(fs::read(out.join("notes.md")).unwrap(), b"mine");

    bufunzip_cmd()
        .arg(&archive)
        .arg("notes.md")
        .arg("-o")
        .arg("-d")
        .arg(&out)
        .assert()
        .success();
    assert_eq!(fs::read(out.join("notes.md")).unwrap(), b"# notes");
}

#[test]
fn test_pipe_from_stdin() {
    let temp = TempDir::new().unwrap();
    let archive = sample_zip(temp.path());

    bufunzip_cmd()
        .arg("-p")
        .arg("-")
        .arg("notes.md")
        .write_stdin(fs::read(&archive).unwrap())
        .assert()
        .success()
        .stdout("# notes");
}

#[test]
fn test_rejects_non_zip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bogus.zip");
    fs::write(&path, b"this is not an archive").unwrap();

    bufunzip_cmd()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a valid ZIP file"));
}

#[test]
fn test_max_size_limit() {
    let temp = TempDir::new().unwrap();
    let archive = sample_zip(temp.path());

    bufunzip_cmd()
        .arg(&archive)
        .arg("--max-size")
        .arg("4")
        .arg("-d")
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Limit exceeded"));
}
