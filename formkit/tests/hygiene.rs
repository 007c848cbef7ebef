//! Hygiene: source scan for crash and silent-loss patterns.
//!
//! `formkit` runs inside the browser and the server alike, so production
//! code must not panic or drop errors. Every budget below is zero;
//! `*_test.rs` files are exempt.

use std::fs;
use std::path::{Path, PathBuf};

/// (pattern, budget, why it is banned)
const BUDGETS: &[(&str, usize, &str)] = &[
    (".unwrap()", 0, "panics on None/Err"),
    (".expect(", 0, "panics on None/Err"),
    ("panic!(", 0, "aborts the caller"),
    ("unreachable!(", 0, "aborts the caller"),
    ("todo!(", 0, "unfinished stub"),
    ("unimplemented!(", 0, "unfinished stub"),
    ("let _ =", 0, "discards a result without inspecting it"),
    (".ok()", 0, "discards the error value"),
    ("#[allow(dead_code)]", 0, "hides unused code"),
];

fn production_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            production_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs")
            && !path.to_string_lossy().ends_with("_test.rs")
        {
            out.push(path);
        }
    }
}

fn hits_for(pattern: &str) -> Vec<(String, usize)> {
    let mut files = Vec::new();
    production_files(Path::new("src"), &mut files);
    files
        .into_iter()
        .filter_map(|path| {
            let content = fs::read_to_string(&path).unwrap_or_default();
            let count = content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (path.display().to_string(), count))
        })
        .collect()
}

#[test]
fn source_tree_is_scanned() {
    let mut files = Vec::new();
    production_files(Path::new("src"), &mut files);
    assert!(files.iter().any(|p| p.ends_with("step.rs")), "expected src/step.rs in {files:?}");
}

#[test]
fn pattern_budgets_hold() {
    let mut failures = Vec::new();
    for (pattern, budget, why) in BUDGETS {
        let hits = hits_for(pattern);
        let count: usize = hits.iter().map(|(_, c)| c).sum();
        if count > *budget {
            let detail = hits
                .iter()
                .map(|(path, c)| format!("    {path}: {c}"))
                .collect::<Vec<_>>()
                .join("\n");
            failures.push(format!("{pattern} ({why}): found {count}, max {budget}\n{detail}"));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}
