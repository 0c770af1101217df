//! Interactive shell mode for the Hackflow CLI
//!
//! Provides a REPL with command history and tab completion.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};

use super::{Cli, Commands, OutputOptions};
use crate::config;

const COMMANDS: &[(&str, &[&str])] = &[
    ("list", &[]),
    ("search", &[]),
    ("config", &["show", "get", "set", "path"]),
    ("diag", &["paths", "ping"]),
    ("help", &[]),
    ("exit", &[]),
    ("quit", &[]),
];

/// Command completer for the shell
struct ShellCompleter;

fn pairs<'a>(names: impl Iterator<Item = &'a str>) -> Vec<Pair> {
    names
        .map(|name| Pair {
            display: name.to_string(),
            replacement: name.to_string(),
        })
        .collect()
}

/// Candidates for the word being typed, and where that word starts
fn complete_line(line: &str) -> (usize, Vec<Pair>) {
    let words: Vec<&str> = line.split_whitespace().collect();
    let finished_word = line.is_empty() || line.ends_with(' ');
    let start = if finished_word {
        line.len()
    } else {
        line.rfind(' ').map(|i| i + 1).unwrap_or(0)
    };

    let candidates = match (words.as_slice(), finished_word) {
        ([], _) => pairs(COMMANDS.iter().map(|(cmd, _)| *cmd)),
        ([prefix], false) => pairs(
            COMMANDS
                .iter()
                .map(|(cmd, _)| *cmd)
                .filter(|cmd| cmd.starts_with(prefix)),
        ),
        ([cmd], true) => subcommands(cmd).map(|subs| pairs(subs.iter().copied())).unwrap_or_default(),
        ([cmd, prefix], false) => subcommands(cmd)
            .map(|subs| pairs(subs.iter().copied().filter(|sub| sub.starts_with(prefix))))
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    (start, candidates)
}

fn subcommands(cmd: &str) -> Option<&'static [&'static str]> {
    COMMANDS.iter().find(|(c, _)| *c == cmd).map(|(_, subs)| *subs)
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(complete_line(&line[..pos]))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for ShellCompleter {}
impl Validator for ShellCompleter {}
impl Helper for ShellCompleter {}

/// Split a command line into arguments, honouring single and double quotes
fn parse_args(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match (c, quote) {
            ('"' | '\'', None) => quote = Some(c),
            (c, Some(q)) if c == q => quote = None,
            (c, None) if c.is_whitespace() => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        args.push(current);
    }

    args
}

/// Flags given when the shell was launched; each line may add to them
#[derive(Debug, Clone, Default)]
struct ShellDefaults {
    output: Option<OutputOptions>,
    api_url: Option<String>,
}

impl ShellDefaults {
    /// Merge launch flags into a parsed line; flags on the line win
    fn apply(&self, cli: &mut Cli) {
        if let Some(output) = &self.output {
            cli.output.json |= output.json;
            cli.output.quiet |= output.quiet;
            cli.output.verbose |= output.verbose;
        }
        if cli.api_url.is_none() {
            cli.api_url = self.api_url.clone();
        }
    }
}

/// Run a single command in the shell.
/// Returns Ok(true) to continue, Ok(false) to exit.
async fn run_command(args: Vec<String>, defaults: &ShellDefaults) -> Result<bool> {
    let Some(first) = args.first() else {
        return Ok(true);
    };

    match first.as_str() {
        "help" => {
            print_help();
            return Ok(true);
        }
        "exit" | "quit" => return Ok(false),
        _ => {}
    }

    let argv = std::iter::once("hackflow".to_string()).chain(args);
    let mut cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(e) => {
            println!("{}", e);
            return Ok(true);
        }
    };

    defaults.apply(&mut cli);

    match cli.command {
        None => print_help(),
        Some(Commands::Shell) => println!("Already in shell mode."),
        Some(command) => super::run(command, &cli.output, cli.api_url.as_deref()).await?,
    }

    Ok(true)
}

fn print_help() {
    println!(
        r#"Hackflow Interactive Shell

Commands:
  list                     List every hackathon
  search <text>            Search hackathons by city or title

  config show              Show current configuration
  config get <key>         Get a specific setting
  config set <key> <value> Set a configuration value
  config path              Show config file path

  diag paths               Show data paths and backend URL
  diag ping                Check that the backend answers

  help                     Show this help
  exit, quit               Exit the shell

Flags (can be added to any command):
  --json                   Output in JSON format
  --quiet, -q              Suppress non-essential output
  --api-url <URL>          Use a different backend
"#
    );
}

/// Get the history file path
pub fn history_path() -> Result<PathBuf> {
    Ok(config::project_dirs()?.data_dir().join("shell_history"))
}

/// Run the interactive shell. `output` and `api_url` from the launch line
/// apply to every command typed in it.
pub async fn run(output: &OutputOptions, api_url: Option<&str>) -> Result<()> {
    let defaults = ShellDefaults {
        output: Some(output.clone()),
        api_url: api_url.map(str::to_string),
    };

    println!("Hackflow Interactive Shell v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for available commands, 'exit' to quit.\n");

    let rl_config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let mut rl = Editor::with_config(rl_config)?;
    rl.set_helper(Some(ShellCompleter));

    let history = history_path().ok();
    if let Some(path) = &history {
        let _ = rl.load_history(path);
    }

    loop {
        match rl.readline("hackflow> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                rl.add_history_entry(line)?;

                match Box::pin(run_command(parse_args(line), &defaults)).await {
                    Ok(true) => continue,
                    Ok(false) => break,
                    Err(e) => super::print_error(&e.to_string()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break;
            }
            Err(err) => {
                tracing::error!("Readline failed: {:?}", err);
                break;
            }
        }
    }

    if let Some(path) = &history {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = rl.save_history(path) {
            tracing::warn!("Failed to save shell history: {}", e);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacements(line: &str) -> (usize, Vec<String>) {
        let (start, pairs) = complete_line(line);
        (start, pairs.into_iter().map(|p| p.replacement).collect())
    }

    #[test]
    fn test_parse_args_quotes() {
        assert_eq!(
            parse_args(r#"search "St. Petersburg" -q"#),
            vec!["search", "St. Petersburg", "-q"]
        );
        assert_eq!(parse_args("  config   get 'api.base_url' "), vec!["config", "get", "api.base_url"]);
        assert!(parse_args("   ").is_empty());
    }

    #[test]
    fn test_complete_command_prefix() {
        assert_eq!(replacements("se"), (0, vec!["search".to_string()]));
        assert_eq!(replacements("").1.len(), COMMANDS.len());
    }

    #[test]
    fn test_complete_subcommands() {
        assert_eq!(
            replacements("diag "),
            (5, vec!["paths".to_string(), "ping".to_string()])
        );
        assert_eq!(replacements("config s"), (7, vec!["show".to_string(), "set".to_string()]));
        assert!(replacements("search ").1.is_empty());
    }

    #[tokio::test]
    async fn test_builtins() {
        let defaults = ShellDefaults::default();
        assert!(!run_command(vec!["exit".to_string()], &defaults).await.unwrap());
        assert!(run_command(vec!["help".to_string()], &defaults).await.unwrap());
        assert!(run_command(vec!["shell".to_string()], &defaults).await.unwrap());
        assert!(run_command(Vec::new(), &defaults).await.unwrap());
    }

    fn launched_with(argv: &[&str]) -> ShellDefaults {
        let cli = Cli::try_parse_from(argv).unwrap();
        ShellDefaults {
            output: Some(cli.output),
            api_url: cli.api_url,
        }
    }

    #[test]
    fn test_launch_flags_apply_to_lines() {
        let defaults = launched_with(&["hackflow", "--api-url", "http://x:1", "--json", "shell"]);

        let mut line = Cli::try_parse_from(["hackflow", "list"]).unwrap();
        defaults.apply(&mut line);
        assert_eq!(line.api_url.as_deref(), Some("http://x:1"));
        assert!(line.output.json);
        assert!(!line.output.quiet);
    }

    #[test]
    fn test_line_flags_win() {
        let defaults = launched_with(&["hackflow", "--api-url", "http://x:1", "shell"]);

        let mut line = Cli::try_parse_from(["hackflow", "list", "--api-url", "http://y:2", "-q"]).unwrap();
        defaults.apply(&mut line);
        assert_eq!(line.api_url.as_deref(), Some("http://y:2"));
        assert!(line.output.quiet);
    }
}
