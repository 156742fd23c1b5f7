use std::fs;
use std::path::PathBuf;

use jackc::driver::{compile_file, discover_sources, output_path};
use jackc::Error;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("jackc-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

const MAIN: &str = "class Main { function void main() { return; } }";

#[test]
fn directory_sources_are_sorted() {
    let dir = scratch_dir("discover");
    fs::write(dir.join("Zeta.jack"), MAIN).unwrap();
    fs::write(dir.join("Alpha.jack"), MAIN).unwrap();
    fs::write(dir.join("README.md"), "not a source").unwrap();

    let sources = discover_sources(&dir).unwrap();
    assert_eq!(sources, vec![dir.join("Alpha.jack"), dir.join("Zeta.jack")]);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn empty_directory_has_no_sources() {
    let dir = scratch_dir("empty");
    assert!(matches!(discover_sources(&dir), Err(Error::NoSources(_))));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn compile_file_writes_vm_next_to_source() {
    let dir = scratch_dir("compile");
    let source = dir.join("Main.jack");
    fs::write(&source, MAIN).unwrap();

    let out = compile_file(&source).unwrap();
    assert_eq!(out, dir.join("Main.vm"));
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "function Main.main 0\npush constant 0\nreturn\n"
    );

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn failed_unit_writes_nothing() {
    let dir = scratch_dir("failed");
    let source = dir.join("Broken.jack");
    fs::write(&source, "class Broken { function void f() { return } }").unwrap();

    assert!(matches!(compile_file(&source), Err(Error::Syntax { .. })));
    assert!(!output_path(&source).exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_file_reports_open_error() {
    let dir = scratch_dir("missing");
    assert!(matches!(
        compile_file(&dir.join("Nope.jack")),
        Err(Error::FileOpen(..))
    ));
    fs::remove_dir_all(&dir).unwrap();
}
