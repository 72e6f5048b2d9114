use assert_cmd::Command;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const VECTORS: &str = "\
6 4
bank 1 1 0 0
money 1 0.1 0 0
deposit 1 0.2 0.3 0
river 0.1 1 0 0
shore 0.2 1 0 0.3
cash 0.6 0 0 0.8
";

#[allow(deprecated)]
fn run_cli(workdir: &Path, args: &[&str]) -> Value {
    let output = Command::cargo_bin("sense")
        .expect("binary")
        .current_dir(workdir)
        .arg("--quiet")
        .args(args)
        .output()
        .expect("command run");

    assert!(
        output.status.success(),
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    serde_json::from_slice(&output.stdout).expect("valid json")
}

fn induce(root: &Path) -> Value {
    fs::write(root.join("toy.vec"), VECTORS).unwrap();
    run_cli(
        root,
        &[
            "induce",
            "--vectors",
            "toy.vec",
            "--output",
            "toy",
            "--neighbors",
            "4",
        ],
    )
}

#[test]
fn induce_writes_inventory_per_budget() {
    let temp = tempdir().unwrap();
    let root = temp.path();

    let report = induce(root);
    let budgets = report.as_array().expect("budgets");
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0]["neighbors"], 4);
    assert_eq!(budgets[0]["report"]["processed"], 6);
    assert!(budgets[0]["report"]["failed"].as_array().unwrap().is_empty());

    let inventory = fs::read_to_string(root.join("toy.top4.inventory.tsv")).unwrap();
    assert!(inventory.starts_with("word\tcid\tkeyword\tcluster\n"));

    let senses = run_cli(root, &["senses", "--inventory", "toy.top4.inventory.tsv", "Bank"]);
    let keywords: Vec<&str> = senses
        .as_array()
        .unwrap()
        .iter()
        .map(|sense| sense["keyword"].as_str().unwrap())
        .collect();
    assert_eq!(keywords.len(), 2);
    assert!(keywords.contains(&"money"));
    assert!(keywords.contains(&"river"));
}

#[test]
fn resume_skips_induced_words() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    induce(root);

    let report = run_cli(
        root,
        &[
            "induce",
            "--vectors",
            "toy.vec",
            "--output",
            "toy",
            "--neighbors",
            "4",
            "--resume",
        ],
    );
    assert!(report[0]["resumed"].as_u64().unwrap() >= 1);

    let inventory = fs::read_to_string(root.join("toy.top4.inventory.tsv")).unwrap();
    assert_eq!(inventory.matches("word\tcid\tkeyword\tcluster").count(), 1);
    assert_eq!(inventory.lines().filter(|line| line.starts_with("bank\t")).count(), 2);
}

#[test]
fn disambiguate_text_picks_money_sense() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    induce(root);

    let result = run_cli(
        root,
        &[
            "disambiguate",
            "--vectors",
            "toy.vec",
            "--inventory",
            "toy.top4.inventory.tsv",
            "--target",
            "bank",
            "--text",
            "I withdrew cash from the bank.",
        ],
    );
    assert_eq!(result["target"], "bank");
    assert_eq!(result["senses"][0]["sense"]["keyword"], "money");

    let unknown = run_cli(
        root,
        &[
            "disambiguate",
            "--vectors",
            "toy.vec",
            "--inventory",
            "toy.top4.inventory.tsv",
            "--target",
            "zebra",
            "--tokens",
            "a",
            "zebra",
        ],
    );
    assert_eq!(unknown["senses"][0]["sense"]["word"], "UNKNOWN");
    assert_eq!(unknown["senses"][0]["confidence"], 1.0);
}

#[test]
fn tokenize_prints_tokens() {
    let temp = tempdir().unwrap();
    let tokens = run_cli(temp.path(), &["tokenize", "Cash, from the bank!"]);
    assert_eq!(tokens, serde_json::json!(["Cash", "from", "the", "bank"]));
}
