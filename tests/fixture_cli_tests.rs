//! End-to-end runs against a real PDF. Each test skips when the binary cannot
//! bind a PDFium library on this host.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn run(pdf: &Path, out_dir: &Path) -> Option<Output> {
    let output = Command::cargo_bin("pdf2jpeg")
        .unwrap()
        .arg(pdf)
        .arg(out_dir)
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.contains("PDFium library unavailable") {
        eprintln!("skipping: {stderr}");
        return None;
    }
    Some(output)
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

fn page_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("page_"))
        .collect();
    names.sort();
    names
}

#[test]
fn three_page_pdf_yields_three_ordered_jpegs() {
    let dir = TempDir::new().unwrap();
    let Some(output) = run(&fixture("three_letter_pages.pdf"), dir.path()) else {
        return;
    };

    assert_eq!(output.status.code(), Some(0), "{output:?}");
    let expected: Vec<String> = (1..=3)
        .map(|i| dir.path().join(format!("page_{i}.jpg")).display().to_string())
        .collect();
    assert_eq!(stdout_lines(&output), expected);
    assert_eq!(page_files(dir.path()), ["page_1.jpg", "page_2.jpg", "page_3.jpg"]);
}

#[test]
fn letter_pages_render_at_300_dpi() {
    let dir = TempDir::new().unwrap();
    let Some(output) = run(&fixture("three_letter_pages.pdf"), dir.path()) else {
        return;
    };
    assert!(output.status.success(), "{output:?}");

    let page = image::open(dir.path().join("page_2.jpg")).unwrap();
    assert_eq!((page.width(), page.height()), (2550, 3300));
}

#[test]
fn rerun_with_fewer_pages_leaves_extra_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("page_4.jpg"), b"left over").unwrap();

    let Some(output) = run(&fixture("three_letter_pages.pdf"), dir.path()) else {
        return;
    };
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout_lines(&output).len(), 3);
    assert_eq!(fs::read(dir.path().join("page_4.jpg")).unwrap(), b"left over");
}

#[test]
fn corrupt_pdf_fails_to_open_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let corrupt = dir.path().join("broken.pdf");
    let mut bytes = fs::read(fixture("three_letter_pages.pdf")).unwrap();
    bytes.truncate(40);
    fs::write(&corrupt, bytes).unwrap();
    let out_dir = dir.path().join("images");
    fs::create_dir(&out_dir).unwrap();

    let Some(output) = run(&corrupt, &out_dir) else {
        return;
    };
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("Error: failed to open PDF"), "{stderr}");
    assert!(page_files(&out_dir).is_empty());
}
