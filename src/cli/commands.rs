//! Command dispatch for the exprtree binary.

use std::io::{self, BufRead};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::{Analysis, ExpressionService};
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{Token, Traversals};
use crate::tree_traits::ToTermTree;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::InvalidArgs(
            "no command given, see --help".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let service = ExpressionService::new(load_settings(cli)?);
    match command {
        Commands::Tree { expr } => each_expression(expr, |raw| tree(&service, raw)),
        Commands::Postfix { expr } => each_expression(expr, |raw| postfix(&service, raw)),
        Commands::Traverse { expr } => each_expression(expr, |raw| traverse(&service, raw)),
        Commands::Show { expr } => each_expression(expr, |raw| show(&service, raw)),
        Commands::Config => {
            output::info(&service.settings().to_toml()?);
            Ok(())
        }
        Commands::Completion { .. } => Ok(()),
    }
}

/// Layered settings plus command line overrides.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(check) = cli.negative_check {
        settings.negative_check = check;
    }
    if let Some(traversal) = cli.traversal {
        settings.traversal = traversal;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

/// Run `f` for the argument, or for every non-blank stdin line when it is `-`.
fn each_expression(expr: &str, mut f: impl FnMut(&str) -> CliResult<()>) -> CliResult<()> {
    if expr != "-" {
        return f(expr);
    }
    let lines = read_lines(io::stdin().lock())?;
    if lines.is_empty() {
        return Err(CliError::NoInput);
    }
    lines.iter().try_for_each(|line| f(line.as_str()))
}

/// Non-blank, trimmed lines of a reader.
pub fn read_lines(reader: impl BufRead) -> CliResult<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| CliError::io("read stdin", e))?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    Ok(lines)
}

#[instrument(level = "debug", skip(service))]
fn tree(service: &ExpressionService, raw: &str) -> CliResult<()> {
    let tree = service
        .parse_and_build(raw)
        .map_err(|e| CliError::expression(raw, e))?;
    output::info(&tree.to_term_tree());
    Ok(())
}

#[instrument(level = "debug", skip(service))]
fn postfix(service: &ExpressionService, raw: &str) -> CliResult<()> {
    let postfix = service
        .postfix(raw)
        .map_err(|e| CliError::expression(raw, e))?;
    output::info(&join_tokens(&postfix, &service.settings().separator));
    Ok(())
}

#[instrument(level = "debug", skip(service))]
fn traverse(service: &ExpressionService, raw: &str) -> CliResult<()> {
    let tree = service
        .parse_and_build(raw)
        .map_err(|e| CliError::expression(raw, e))?;
    let traversals = service.compute_traversals(&tree);
    for (label, values) in traversal_lines(&traversals, &service.settings().separator) {
        output::labelled(label, &values);
    }
    Ok(())
}

#[instrument(level = "debug", skip(service))]
fn show(service: &ExpressionService, raw: &str) -> CliResult<()> {
    let analysis = service
        .analyze(raw)
        .map_err(|e| CliError::expression(raw, e))?;
    let sep = &service.settings().separator;

    output::header(raw);
    for (label, values) in summary_lines(&analysis, sep) {
        output::labelled(label, &values);
    }
    output::info(&analysis.tree.to_term_tree());
    for (label, values) in traversal_lines(&analysis.traversals, sep) {
        output::labelled(label, &values);
    }
    Ok(())
}

pub fn join_tokens(tokens: &[Token], sep: &str) -> String {
    tokens.iter().join(sep)
}

pub fn traversal_lines(traversals: &Traversals, sep: &str) -> [(&'static str, String); 3] {
    [
        ("preorder", traversals.preorder.join(sep)),
        ("inorder", traversals.inorder.join(sep)),
        ("postorder", traversals.postorder.join(sep)),
    ]
}

fn summary_lines(analysis: &Analysis, sep: &str) -> [(&'static str, String); 4] {
    [
        ("tokens", join_tokens(&analysis.tokens, sep)),
        ("postfix", join_tokens(&analysis.postfix, sep)),
        ("nodes", analysis.tree.node_count().to_string()),
        ("depth", analysis.tree.depth().to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_lines_skips_blank() {
        let input = Cursor::new("1+2\n\n   \n (3*4) \n");
        let lines = read_lines(input).unwrap();
        assert_eq!(lines, vec!["1+2".to_string(), "(3*4)".to_string()]);
    }

    #[test]
    fn test_traversal_lines_use_separator() {
        let analysis = ExpressionService::default().analyze("(1+2)*3").unwrap();
        let lines = traversal_lines(&analysis.traversals, ",");
        assert_eq!(lines[0], ("preorder", "*,+,1,2,3".to_string()));
        assert_eq!(lines[1], ("inorder", "1,+,2,*,3".to_string()));
        assert_eq!(lines[2], ("postorder", "1,2,+,3,*".to_string()));
    }

    #[test]
    fn test_summary_lines() {
        let analysis = ExpressionService::default().analyze("3 + 4*2").unwrap();
        let lines = summary_lines(&analysis, " ");
        assert_eq!(lines[0].1, "3 + 4 * 2");
        assert_eq!(lines[1].1, "3 4 2 * +");
        assert_eq!(lines[2].1, "5");
        assert_eq!(lines[3].1, "3");
    }

    #[test]
    fn test_each_expression_passes_argument_through() {
        let mut seen = Vec::new();
        each_expression("7*8", |raw| {
            seen.push(raw.to_string());
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec!["7*8".to_string()]);
    }
}
