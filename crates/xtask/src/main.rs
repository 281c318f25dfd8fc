//! Workspace maintenance tasks.
//!
//! `cargo run -p xtask -- arch-check` enforces the crate layering:
//! `oracle-domain` and `oracle-shared` stay free of runtime and transport
//! crates, and nothing below the binaries depends on a binary crate.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Crate -> dependencies it must never pull in (directly).
const FORBIDDEN: &[(&str, &[&str])] = &[
    (
        "oracle-domain",
        &[
            "tokio",
            "axum",
            "tokio-tungstenite",
            "oracle-shared",
            "oracle-client",
            "oracle-server",
        ],
    ),
    (
        "oracle-shared",
        &["tokio", "axum", "tokio-tungstenite", "oracle-client", "oracle-server"],
    ),
    ("oracle-client", &["axum", "oracle-server"]),
    ("oracle-server", &["oracle-client"]),
];

/// Paths the pure crates must not mention in source.
const FORBIDDEN_PATHS: &str = r"\b(tokio|axum|tokio_tungstenite)::";

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    manifest_path: String,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
    kind: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;
    let packages: BTreeMap<&str, &Package> = metadata
        .packages
        .iter()
        .map(|p| (p.name.as_str(), p))
        .collect();

    let mut violations = dependency_violations(&packages);
    let pattern = regex_lite::Regex::new(FORBIDDEN_PATHS).context("compiling path pattern")?;
    for name in ["oracle-domain", "oracle-shared"] {
        if let Some(package) = packages.get(name) {
            violations.extend(source_violations(package, &pattern)?);
        }
    }

    if violations.is_empty() {
        println!("arch-check: ok ({} packages)", packages.len());
        return Ok(());
    }
    for violation in &violations {
        eprintln!("arch-check: {violation}");
    }
    anyhow::bail!("{} layering violation(s)", violations.len())
}

fn dependency_violations(packages: &BTreeMap<&str, &Package>) -> Vec<String> {
    let mut violations = Vec::new();
    for (name, forbidden) in FORBIDDEN {
        let Some(package) = packages.get(name) else {
            violations.push(format!("{name} is missing from the workspace"));
            continue;
        };
        for dep in &package.dependencies {
            // dev-dependencies may use the runtime for tests
            if dep.kind.as_deref() == Some("dev") {
                continue;
            }
            if forbidden.contains(&dep.name.as_str()) {
                violations.push(format!("{name} must not depend on {}", dep.name));
            }
        }
    }
    violations
}

fn source_violations(package: &Package, pattern: &regex_lite::Regex) -> anyhow::Result<Vec<String>> {
    let src = Path::new(&package.manifest_path)
        .parent()
        .map(|dir| dir.join("src"))
        .context("manifest path has no parent")?;

    let mut violations = Vec::new();
    let mut pending = vec![src];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir).with_context(|| format!("reading {}", dir.display()))? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("rs") {
                continue;
            }
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            for (line_no, line) in text.lines().enumerate() {
                if pattern.is_match(line) {
                    violations.push(format!(
                        "{}:{}: {} must stay runtime-free: {}",
                        path.display(),
                        line_no + 1,
                        package.name,
                        line.trim()
                    ));
                }
            }
        }
    }
    Ok(violations)
}
