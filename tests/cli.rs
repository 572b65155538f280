use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn algo(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("algo").unwrap();
    cmd.env("ALGO_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn add(home: &Path, title: &str, difficulty: &str, extra: &[&str]) {
    algo(home)
        .args(["add", "--title", title, "--difficulty", difficulty])
        .args(extra)
        .assert()
        .success();
}

#[test]
fn add_list_gen_rm_roundtrip() {
    let home = TempDir::new().unwrap();
    let src = home.path().join("solution.rs");
    fs::write(&src, "fn main() {}\n").unwrap();

    algo(home.path())
        .args([
            "add",
            "--title",
            "Two Sum",
            "-d",
            "Easy",
            "--tags",
            "Array, array, Hash",
            "--score",
            "42",
            "--note",
            "One pass with a map",
            "--code",
        ])
        .arg(&src)
        .assert()
        .success()
        .stdout(predicate::str::contains("Problem added: Two Sum (0001_two-sum)"));

    let code = home.path().join("algo/code/0001_two-sum_code.rs");
    assert_eq!(fs::read_to_string(&code).unwrap(), "fn main() {}\n");
    assert!(home.path().join("algo/db/algo.db").exists());

    algo(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("0001_two-sum"))
        .stdout(predicate::str::contains("[array, hash]"));

    algo(home.path())
        .args(["gen", "0001_two-sum"])
        .assert()
        .success();
    let doc = fs::read_to_string(home.path().join("algo/markdown/easy/0001_two-sum.md")).unwrap();
    assert!(doc.starts_with("# Two Sum\n"));
    assert!(doc.contains("| **Score** | 42 |"));
    assert!(doc.contains("One pass with a map"));
    assert!(doc.contains("~~~rs\nfn main() {}\n~~~"));

    algo(home.path())
        .args(["rm", "0001_two-sum"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Problem removed"));
    assert!(!code.exists());

    algo(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No problems found."));
}

#[test]
fn edit_title_changes_slug() {
    let home = TempDir::new().unwrap();
    add(home.path(), "Two Sum", "easy", &[]);

    algo(home.path())
        .args(["edit", "0001_two-sum", "--title", "Two Sum II"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0001_two-sum-ii"));

    algo(home.path())
        .args(["edit", "0001_two-sum", "--note", "x"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Problem not found: 0001_two-sum"));
}

#[test]
fn invalid_difficulty_fails_without_writing() {
    let home = TempDir::new().unwrap();
    algo(home.path())
        .args(["add", "--title", "X", "--difficulty", "extreme"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid difficulty"));

    algo(home.path())
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn missing_title_without_terminal_is_rejected() {
    let home = TempDir::new().unwrap();
    algo(home.path())
        .args(["add", "--difficulty", "easy"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Title cannot be empty"));
}

#[test]
fn out_of_range_score_warns() {
    let home = TempDir::new().unwrap();
    algo(home.path())
        .args(["add", "--title", "Big", "-d", "hard", "--score", "300"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score '300'"));

    algo(home.path())
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"score\": null"));
}

#[test]
fn list_rejects_bad_paging_and_score() {
    let home = TempDir::new().unwrap();
    for args in [
        ["--limit", "101"],
        ["--offset", "-1"],
        ["--score", "300"],
        ["-s", "-3"],
    ] {
        algo(home.path())
            .arg("list")
            .args(args)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Validation error"));
    }
}

#[test]
fn gen_fences_code_containing_tildes() {
    let home = TempDir::new().unwrap();
    let src = home.path().join("notes.md");
    fs::write(&src, "~~~\ninner\n~~~\n").unwrap();
    algo(home.path())
        .args(["add", "--title", "Fence", "-d", "easy", "--code"])
        .arg(&src)
        .assert()
        .success();

    algo(home.path())
        .args(["gen", "0001_fence"])
        .assert()
        .success();
    let doc = fs::read_to_string(home.path().join("algo/markdown/easy/0001_fence.md")).unwrap();
    assert!(doc.contains("~~~~md\n~~~\ninner\n~~~\n~~~~"));
}

#[test]
fn list_filters_and_json() {
    let home = TempDir::new().unwrap();
    add(home.path(), "Two Sum", "easy", &["--tags", "array"]);
    add(home.path(), "Word Ladder", "hard", &["--tags", "graph"]);

    let output = algo(home.path())
        .args(["list", "--json", "--tags", "graph"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["slug"], "0002_word-ladder");
    assert_eq!(rows[0]["difficulty"], "hard");
    assert_eq!(rows[0]["tags"][0], "graph");
}

#[test]
fn tags_and_contests() {
    let home = TempDir::new().unwrap();
    add(home.path(), "A", "easy", &["--tags", "dp, array"]);
    add(home.path(), "B", "medium", &["--tags", "dp"]);

    algo(home.path())
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"array\s+1").unwrap())
        .stdout(predicate::str::is_match(r"dp\s+2").unwrap());

    algo(home.path())
        .args(["contest", "add", "--title", "Round 1", "--kind", "weekly"])
        .args(["--problems", "0002_b,0001_a"])
        .assert()
        .success();

    algo(home.path())
        .args(["gen", "Round 1", "--contest", "weekly"])
        .assert()
        .success();
    let doc = fs::read_to_string(home.path().join("algo/markdown/weekly/Round 1.md")).unwrap();
    assert!(doc.find("# B").unwrap() < doc.find("# A").unwrap());

    algo(home.path())
        .args(["contest", "add", "--title", "Round 2", "--kind", "weekly"])
        .args(["--problems", "0009_nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Problem not found: 0009_nope"));
}

#[test]
fn config_file_redirects_directories() {
    let home = TempDir::new().unwrap();
    let conf_dir = home.path().join("algo");
    fs::create_dir_all(&conf_dir).unwrap();
    fs::write(
        conf_dir.join("algo.toml"),
        "[dir]\nmarkdown_dir = \"~/notes\"\n",
    )
    .unwrap();

    algo(home.path())
        .arg("paths")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            home.path().join("notes").display().to_string(),
        ));

    add(home.path(), "Two Sum", "easy", &[]);
    algo(home.path())
        .args(["gen", "0001_two-sum"])
        .assert()
        .success();
    assert!(home.path().join("notes/easy/0001_two-sum.md").exists());
}

#[test]
fn broken_config_is_fatal() {
    let home = TempDir::new().unwrap();
    let conf_dir = home.path().join("algo");
    fs::create_dir_all(&conf_dir).unwrap();
    fs::write(conf_dir.join("algo.toml"), "[dir\n").unwrap();

    algo(home.path())
        .arg("tags")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Config error"));
}
