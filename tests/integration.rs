//! Integration tests for boxdu


use std::fs;

use assert_cmd::Command;
use harness::{
    Listing, TestDir, add_script, bucket, count_files, dsize, read_document, run_boxdu,
    run_boxdu_with, synthetic_listing,
};
use predicates::prelude::*;

#[test]
fn test_listing_example_document() {
    let dir = TestDir::new();
    let listing = Listing::new()
        .line("1 f 10 dir1/file1")
        .line("2 fo 5 dir1/file1")
        .line("3 fX 1 dir2/file2");
    let input = dir.add_listing("listing.txt", &listing);
    let out = dir.path().join("out.json");

    let (_stdout, stderr, success) = run_boxdu(
        dir.path(),
        &[input.to_str().unwrap(), "-o", out.to_str().unwrap()],
    );
    assert!(success, "boxdu should succeed: {}", stderr);

    let doc = read_document(&out);
    assert_eq!(doc[0], 1);
    assert_eq!(doc[1], 0);
    assert_eq!(doc[2]["progname"], "boxdu");
    assert_eq!(doc[2]["progver"], "0.1");
    assert_eq!(doc[3][0]["name"], "boxbackup");

    let names: Vec<_> = doc[3].as_array().unwrap()[1..]
        .iter()
        .map(|b| b[0]["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["current", "deleted", "unclear", "old"]);

    assert_eq!(dsize(bucket(&doc, "current"), "dir1/file1"), Some(40960));
    assert_eq!(dsize(bucket(&doc, "old"), "dir1/file1"), Some(20480));
    assert_eq!(dsize(bucket(&doc, "deleted"), "dir2/file2"), Some(4096));
    assert_eq!(bucket(&doc, "unclear").as_array().unwrap().len(), 1);
}

#[test]
fn test_stdin_input() {
    let dir = TestDir::new();
    let listing = Listing::new().entry("f", 2, "a/b");
    let out = dir.path().join("out.json");

    let (_stdout, stderr, success) = run_boxdu_with(
        dir.path(),
        &["-", "-o", out.to_str().unwrap()],
        &[],
        Some(listing.text()),
    );
    assert!(success, "{}", stderr);
    let doc = read_document(&out);
    assert_eq!(dsize(bucket(&doc, "current"), "a/b"), Some(8192));
}

#[test]
fn test_old_versions_accumulate() {
    let dir = TestDir::new();
    let listing = Listing::new()
        .entry("fo", 2, "a/b/file")
        .entry("fo", 3, "a/b/file");
    let input = dir.add_listing("listing.txt", &listing);

    Command::cargo_bin("boxdu")
        .unwrap()
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("out.json"))
        .env_remove("RUST_LOG")
        .assert()
        .success();

    let doc = read_document(&dir.path().join("out.json"));
    assert_eq!(dsize(bucket(&doc, "old"), "a/b/file"), Some(5 * 4096));
    assert_eq!(count_files(&doc), 1);
}

#[test]
fn test_unclear_entries_have_own_bucket() {
    let dir = TestDir::new();
    let listing = Listing::new()
        .entry("fa", 1, "x/attr")
        .entry("faX", 1, "x/gone")
        .entry("fao", 1, "x/attr-old");
    let input = dir.add_listing("listing.txt", &listing);
    let out = dir.path().join("out.json");

    let (_, stderr, success) = run_boxdu(
        dir.path(),
        &[input.to_str().unwrap(), "-o", out.to_str().unwrap()],
    );
    assert!(success, "{}", stderr);
    let doc = read_document(&out);
    assert_eq!(dsize(bucket(&doc, "unclear"), "x/attr"), Some(4096));
    assert_eq!(dsize(bucket(&doc, "unclear"), "x/attr-old"), Some(4096));
    assert_eq!(dsize(bucket(&doc, "deleted"), "x/gone"), Some(4096));
    assert_eq!(dsize(bucket(&doc, "current"), "x/attr"), None);
}

#[test]
fn test_zero_size_entries_are_ignored() {
    let dir = TestDir::new();
    let listing = Listing::new()
        .entry("d", 0, "empty-dir")
        .entry("f", 0, "empty-dir/empty-file")
        .entry("fo", 0, "old/empty");
    let input = dir.add_listing("listing.txt", &listing);
    let out = dir.path().join("out.json");

    let (_, _, success) = run_boxdu(
        dir.path(),
        &[input.to_str().unwrap(), "-o", out.to_str().unwrap()],
    );
    assert!(success);
    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(
        text,
        r#"[1,0,{"progname":"boxdu","progver":"0.1"},[{"name":"boxbackup"},[{"name":"current"}],[{"name":"deleted"}],[{"name":"unclear"}],[{"name":"old"}]]]"#
    );
}

#[test]
fn test_path_cache_is_transparent() {
    let dir = TestDir::new();
    // Interleave buckets and revisit directories so the cache misses often.
    let listing = synthetic_listing(40, 25)
        .entry("f", 3, "home/user0/project0/src/late.rs")
        .entry("fo", 3, "home/user1/project1/src/file1.rs")
        .entry("f", 1, "home/user0/project0/src/file0.rs");
    let input = dir.add_listing("listing.txt", &listing);
    let cached = dir.path().join("cached.json");
    let uncached = dir.path().join("uncached.json");

    let (_, _, ok1) = run_boxdu(
        dir.path(),
        &["-q", input.to_str().unwrap(), "-o", cached.to_str().unwrap()],
    );
    let (_, _, ok2) = run_boxdu(
        dir.path(),
        &[
            "-q",
            "--no-path-cache",
            input.to_str().unwrap(),
            "-o",
            uncached.to_str().unwrap(),
        ],
    );
    assert!(ok1 && ok2);
    assert_eq!(fs::read(&cached).unwrap(), fs::read(&uncached).unwrap());
}

#[test]
fn test_file_count_matches_stored_entries() {
    let dir = TestDir::new();
    let listing = Listing::new()
        .entry("f", 1, "a/one")
        .entry("f", 1, "a/two")
        .entry("f", 1, "a/one/conflict")
        .entry("f", 1, "a")
        .entry("fX", 1, "b/three")
        .entry("f", 0, "a/zero");
    let input = dir.add_listing("listing.txt", &listing);
    let out = dir.path().join("out.json");

    let (_, _, success) = run_boxdu(
        dir.path(),
        &[input.to_str().unwrap(), "-o", out.to_str().unwrap()],
    );
    assert!(success);
    let doc = read_document(&out);
    assert_eq!(count_files(&doc), 3);
}

#[test]
fn test_names_with_quotes_and_spaces() {
    let dir = TestDir::new();
    let listing = Listing::new()
        .entry("f", 1, r#"My Documents/say "hi".txt"#)
        .entry("f", 1, r"odd\dir/file");
    let input = dir.add_listing("listing.txt", &listing);
    let out = dir.path().join("out.json");

    let (_, _, success) = run_boxdu(
        dir.path(),
        &[input.to_str().unwrap(), "-o", out.to_str().unwrap()],
    );
    assert!(success);
    let doc = read_document(&out);
    let current = bucket(&doc, "current");
    assert_eq!(dsize(current, r#"My Documents/say "hi".txt"#), Some(4096));
    assert_eq!(dsize(current, r"odd\dir/file"), Some(4096));
}

#[test]
fn test_visualizer_gets_temp_document() {
    let dir = TestDir::new();
    let listing = Listing::new().entry("f", 4, "a/b");
    let input = dir.add_listing("listing.txt", &listing);
    let viewer = add_script(
        dir.path(),
        "fake-ncdu",
        r#"[ "$1" = "-f" ] || exit 3
cp "$2" "$(dirname "$0")/seen.json"
echo "$2" > "$(dirname "$0")/seen-path""#,
    );

    let (_, stderr, success) = run_boxdu_with(
        dir.path(),
        &[input.to_str().unwrap()],
        &[("BOXDU_VISUALIZER", viewer.as_path())],
        None,
    );
    assert!(success, "{}", stderr);

    let doc = read_document(&dir.path().join("seen.json"));
    assert_eq!(dsize(bucket(&doc, "current"), "a/b"), Some(4 * 4096));

    let temp_path = fs::read_to_string(dir.path().join("seen-path")).unwrap();
    assert!(
        !std::path::Path::new(temp_path.trim()).exists(),
        "temp document should be removed"
    );
}

#[test]
fn test_visualizer_failure_is_fatal() {
    let dir = TestDir::new();
    let input = dir.add_listing("listing.txt", &Listing::new().entry("f", 1, "a"));
    let viewer = add_script(dir.path(), "broken-ncdu", "exit 4");

    let (_, stderr, success) = run_boxdu_with(
        dir.path(),
        &[input.to_str().unwrap()],
        &[("BOXDU_VISUALIZER", viewer.as_path())],
        None,
    );
    assert!(!success);
    assert!(stderr.contains("broken-ncdu"), "{}", stderr);
}

#[test]
fn test_query_tool_used_without_input() {
    let dir = TestDir::new();
    dir.add_listing("listing.txt", &Listing::new().entry("fX", 2, "gone/file"));
    let query = add_script(
        dir.path(),
        "fake-query",
        r#"printf '%s\n' "$@" > "$(dirname "$0")/args"
cat "$(dirname "$0")/listing.txt""#,
    );
    let out = dir.path().join("out.json");

    let (_, stderr, success) = run_boxdu_with(
        dir.path(),
        &["-o", out.to_str().unwrap()],
        &[("BOXDU_QUERY", query.as_path())],
        None,
    );
    assert!(success, "{}", stderr);
    let args = fs::read_to_string(dir.path().join("args")).unwrap();
    assert_eq!(args, "list -rdos /\nquit\n");
    let doc = read_document(&out);
    assert_eq!(dsize(bucket(&doc, "deleted"), "gone/file"), Some(8192));
}

#[test]
fn test_query_tool_failure_is_fatal() {
    let dir = TestDir::new();
    dir.add_listing("listing.txt", &Listing::new().entry("f", 1, "a"));
    let query = add_script(
        dir.path(),
        "failing-query",
        r#"cat "$(dirname "$0")/listing.txt"
exit 2"#,
    );
    let out = dir.path().join("out.json");

    let (_, stderr, success) = run_boxdu_with(
        dir.path(),
        &["-o", out.to_str().unwrap()],
        &[("BOXDU_QUERY", query.as_path())],
        None,
    );
    assert!(!success);
    assert!(stderr.contains("failing-query"), "{}", stderr);
    assert!(!out.exists());
}

#[test]
fn test_debug_prints_timings() {
    let dir = TestDir::new();
    let input = dir.add_listing("listing.txt", &Listing::new().entry("f", 1, "a"));
    let out = dir.path().join("out.json");

    Command::cargo_bin("boxdu")
        .unwrap()
        .args(["-d", "-o"])
        .arg(&out)
        .arg(&input)
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("timing: read+build"))
        .stderr(predicate::str::contains("timing: serialize"))
        .stderr(predicate::str::contains("timing: total"));
}

#[test]
fn test_help_and_version() {
    Command::cargo_bin("boxdu")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--quiet"));

    Command::cargo_bin("boxdu")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("boxdu"));
}
