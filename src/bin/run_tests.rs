//! Test runner - executes the project test suites.
//!
//! Usage:
//!   cargo run --bin run-tests            # run everything
//!   cargo run --bin run-tests unit       # library unit tests only
//!   cargo run --bin run-tests integration # tests/ directory only
//!
//! Exits with code 1 as soon as any suite fails.

use std::process::Command;

const VALID_SUITES: &[&str] = &["all", "unit", "integration"];

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let suite = args.get(1).map(String::as_str).unwrap_or("all");

    if !VALID_SUITES.contains(&suite) {
        eprintln!("Unknown test suite: {}", suite);
        eprintln!("Valid suites: {}", VALID_SUITES.join(", "));
        std::process::exit(1);
    }

    println!("Running test suite: {}", suite);

    for (name, extra_args) in suite_commands(suite) {
        println!("\n--- {} tests ---", name);
        let status = Command::new("cargo")
            .arg("test")
            .args(extra_args)
            .status();

        match status {
            Ok(status) if status.success() => {
                println!("{} tests passed", name);
            }
            Ok(status) => {
                eprintln!(
                    "{} tests failed (exit code {})",
                    name,
                    status.code().unwrap_or(-1)
                );
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Failed to launch cargo test: {}", e);
                std::process::exit(1);
            }
        }
    }

    println!("\nAll requested test suites passed.");
}

/// Map a suite name to the cargo test invocations it runs.
fn suite_commands(suite: &str) -> Vec<(&'static str, Vec<&'static str>)> {
    match suite {
        "unit" => vec![("unit", vec!["--lib", "--bins"])],
        "integration" => vec![("integration", vec!["--tests"])],
        _ => vec![
            ("unit", vec!["--lib", "--bins"]),
            ("integration", vec!["--tests"]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_commands_all() {
        let commands = suite_commands("all");
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].0, "unit");
        assert_eq!(commands[1].0, "integration");
    }

    #[test]
    fn test_suite_commands_unit_only() {
        let commands = suite_commands("unit");
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].1, vec!["--lib", "--bins"]);
    }

    #[test]
    fn test_valid_suites_cover_default() {
        assert!(VALID_SUITES.contains(&"all"));
    }
}
