use predicates::prelude::*;

use std::fs;
use std::path::Path;

use anvaya_protocol::Vocabulary;

const HEADER: &str = "word\tanvaya_no\tmorph_in_context\tbgcolor\tkaaraka_sambandha\tpossible_relations";

fn anvaya_check() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("anvaya-check");
    cmd.env_remove("ANVAYA_LOG");
    cmd
}

fn write_table(dir: &Path, name: &str, rows: &[&str]) {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    fs::write(dir.join(name), text).unwrap();
}

#[test]
fn test_clean_table_prints_only_the_banner() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("valid_strings.txt"), "कर्ता\n").unwrap();
    write_table(
        dir.path(),
        "clean.tsv",
        &[
            "रामः\t1.1\t{पुं;1;एक}\tN1\tकर्ता,1.2\tकर्ता,1.2",
            "गच्छति\t1.2\t{कर्तरि;लट्;प्र;एक}\tKP\t-\t-",
        ],
    );

    anvaya_check()
        .arg("check")
        .arg(dir.path())
        .arg("--fail-on-error")
        .assert()
        .success()
        .stdout("--- Checking clean.tsv ---\n");
}

#[test]
fn test_violations_are_printed_in_row_order() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("valid_strings.txt"), "कर्ता\nकर्म\n").unwrap();
    write_table(
        dir.path(),
        "broken.tsv",
        &[
            "रामः\t2.1\t{पुं;1;एक}\tN1\tकर्ता,2.2\tकर्ता,2.2",
            "गतः\t2.2\t{लट्;प्र;एक}\tN1\t-\t-",
            "वनम्\t2.3\t{नपुं;2;एक}\tN2\t-\t-",
        ],
    );

    let assert = anvaya_check().arg("check").arg(dir.path()).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(
        lines,
        vec![
            "--- Checking broken.tsv ---",
            "Error in line 2 - कर्ता in case 1 needs कर्तरि or क्तवतु on line 3",
            "Error in line 4 - Hanging node detected",
        ]
    );
}

#[test]
fn test_fail_on_error_sets_exit_status() {
    let dir = tempfile::tempdir().unwrap();
    let valid = dir.path().join("strings.txt");
    fs::write(&valid, "कर्म\n").unwrap();
    write_table(dir.path(), "one.tsv", &["वनम्\t1.1\t{नपुं;2;एक}\tN2\t-\t-"]);

    anvaya_check()
        .arg("check")
        .arg(dir.path().join("one.tsv"))
        .arg("--valid-strings")
        .arg(&valid)
        .arg("--fail-on-error")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Hanging node detected"));
}

#[test]
fn test_missing_column_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("valid_strings.txt"), "कर्म\n").unwrap();
    fs::write(dir.path().join("bad.csv"), "word,anvaya_no\nक,1.1\n").unwrap();

    anvaya_check()
        .arg("check")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("morph_in_context"));
}

#[test]
fn test_missing_valid_strings_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    write_table(dir.path(), "one.tsv", &["वनम्\t1.1\t{नपुं;2;एक}\tN2\t-\t-"]);

    anvaya_check()
        .arg("check")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid strings"));
}

#[test]
fn test_empty_directory_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();

    anvaya_check()
        .arg("check")
        .arg(dir.path())
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No .tsv or .csv files found"));
}

#[test]
fn test_compiled_vocabulary_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("vocab.json");
    let archive = dir.path().join("vocab.rkyv");

    // Treat N2 as the indeclinable color instead of NA
    let mut vocab = Vocabulary::sanskrit_default();
    vocab.indeclinable_color = "N2".to_string();
    fs::write(&json, serde_json::to_string(&vocab).unwrap()).unwrap();

    anvaya_check()
        .arg("compile-vocab")
        .arg("--input")
        .arg(&json)
        .arg("--output")
        .arg(&archive)
        .assert()
        .success();

    fs::write(dir.path().join("valid_strings.txt"), "समुच्चयः\n").unwrap();
    write_table(
        dir.path(),
        "avyaya.tsv",
        &[
            "च\t1.1\t{अव्य}\tN2\tसमुच्चयः,1.2\tसमुच्चयः,1.2",
            "च\t1.2\t{अव्य}\tN2\tसमुच्चयः,1.1\tसमुच्चयः,1.1",
        ],
    );

    anvaya_check()
        .arg("check")
        .arg(dir.path())
        .arg("--vocab")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("Color Code").not());
}

#[test]
fn test_repeated_positions_warn_unless_strict() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("valid_strings.txt"), "कर्ता\n").unwrap();
    write_table(
        dir.path(),
        "repeat.tsv",
        &[
            "रामः\t1.1\t{पुं;1;एक}\tN1\tकर्ता,1.2\tकर्ता,1.2",
            "रामः\t1.1\t{पुं;1;एक}\tN1\tकर्ता,1.2\tकर्ता,1.2",
            "गच्छति\t1.2\t{कर्तरि;लट्;प्र;एक}\tKP\t-\t-",
        ],
    );

    anvaya_check()
        .arg("check")
        .arg(dir.path())
        .assert()
        .success()
        .stdout("--- Checking repeat.tsv ---\n")
        .stderr(predicate::str::contains("anvaya_no repeats an earlier row"));

    anvaya_check()
        .arg("check")
        .arg(dir.path())
        .arg("--strict-positions")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error in line 3 - anvaya_no 1.1 already used on line 2"))
        .stderr(predicate::str::contains("repeats an earlier row").not());
}
