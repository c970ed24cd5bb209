use clap::CommandFactory;
use prlog::Cli;

use crate::helpers::ENV;

/// Every variable the binary reads is cleared before each run.
#[test]
fn runs_are_isolated_from_the_environment() {
    let command = Cli::command();
    let missing: Vec<String> = command
        .get_arguments()
        .filter_map(|arg| arg.get_env())
        .filter_map(|env| env.to_str())
        .filter(|env| !ENV.contains(env))
        .map(String::from)
        .collect();
    assert!(missing.is_empty(), "not cleared: {missing:?}");
}
