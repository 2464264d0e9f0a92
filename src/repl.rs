// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Rill Project Developers

//! Interactive REPL (Read-Eval-Print Loop) for the rill runtime.

use owo_colors::OwoColorize;
use rill_runtime::{RuntimeError, Session};
use rill_script::Value;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Config, Editor, Helper};
use std::borrow::Cow;
use std::path::PathBuf;

/// REPL configuration constants
const HISTORY_FILE: &str = ".rill_history";
const MAX_HISTORY_SIZE: usize = 1000;

/// REPL commands that can be executed with a dot prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Exit,
    Clear,
    Version,
    Modules,
    Reload,
    Load,
}

impl ReplCommand {
    /// Parse a REPL command from input string
    pub fn parse(input: &str) -> Option<(Self, Option<&str>)> {
        let input = input.trim();
        if !input.starts_with('.') {
            return None;
        }

        let parts: Vec<&str> = input[1..].splitn(2, char::is_whitespace).collect();
        let cmd = parts.first()?.to_lowercase();
        let arg = parts.get(1).copied();

        match cmd.as_str() {
            "help" | "h" | "?" => Some((ReplCommand::Help, arg)),
            "exit" | "quit" | "q" => Some((ReplCommand::Exit, arg)),
            "clear" | "cls" => Some((ReplCommand::Clear, arg)),
            "version" | "v" => Some((ReplCommand::Version, arg)),
            "modules" | "m" => Some((ReplCommand::Modules, arg)),
            "reload" | "r" => Some((ReplCommand::Reload, arg)),
            "load" | "l" => Some((ReplCommand::Load, arg)),
            _ => None,
        }
    }

    /// Get all available commands for help/completion
    pub fn all_commands() -> &'static [(&'static str, &'static str)] {
        &[
            (".help", "Show this help message"),
            (".exit", "Exit the REPL"),
            (".clear", "Clear the screen"),
            (".version", "Show version information"),
            (".modules", "List imported modules and their sources"),
            (".reload", "Force a reload check on all modules"),
            (".load <file>", "Run a rill script file"),
        ]
    }
}

/// Helper struct for rustyline that provides completion, hints, and validation
#[derive(Default)]
struct RillHelper {
    /// Keywords and built-in identifiers for completion
    keywords: Vec<String>,
}

impl RillHelper {
    fn new() -> Self {
        let keywords = vec![
            // Keywords
            "let", "fn", "return", "if", "else", "while", "import", "true", "false", "nil",
            // Builtins
            "print", "str", "abs",
            // REPL commands
            ".help", ".exit", ".clear", ".version", ".modules", ".reload", ".load",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self { keywords }
    }
}

impl Completer for RillHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Find the start of the current word
        let start = line[..pos]
            .rfind(|c: char| !c.is_alphanumeric() && c != '_' && c != '.')
            .map(|i| i + 1)
            .unwrap_or(0);

        let word = &line[start..pos];
        if word.is_empty() {
            return Ok((pos, vec![]));
        }

        let matches: Vec<Pair> = self
            .keywords
            .iter()
            .filter(|kw| kw.starts_with(word))
            .map(|kw| Pair {
                display: kw.clone(),
                replacement: kw[word.len()..].to_string(),
            })
            .collect();

        Ok((pos, matches))
    }
}

impl Hinter for RillHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        if pos < line.len() {
            return None;
        }

        // Find the start of the current word
        let start = line
            .rfind(|c: char| !c.is_alphanumeric() && c != '_' && c != '.')
            .map(|i| i + 1)
            .unwrap_or(0);

        let word = &line[start..];
        if word.len() < 2 {
            return None;
        }

        // Find first matching keyword
        self.keywords
            .iter()
            .find(|kw| kw.starts_with(word) && kw.len() > word.len())
            .map(|kw| kw[word.len()..].to_string().dimmed().to_string())
    }
}

impl Highlighter for RillHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        // Basic syntax highlighting
        let mut result = String::with_capacity(line.len() * 2);
        let mut chars = line.chars().peekable();
        let mut current_word = String::new();

        while let Some(c) = chars.next() {
            if c.is_alphanumeric() || c == '_' {
                current_word.push(c);
            } else {
                if !current_word.is_empty() {
                    result.push_str(&highlight_word(&current_word));
                    current_word.clear();
                }
                // Color operators and punctuation
                let colored = match c {
                    '(' | ')' | '{' | '}' => c.to_string().yellow().to_string(),
                    '+' | '-' | '*' | '/' | '%' | '=' | '<' | '>' | '!' | '&' | '|' => {
                        c.to_string().cyan().to_string()
                    }
                    '"' | '\'' => c.to_string().green().to_string(),
                    '.' if line.starts_with('.') => c.to_string().magenta().to_string(),
                    _ => c.to_string(),
                };
                result.push_str(&colored);
            }
        }

        if !current_word.is_empty() {
            result.push_str(&highlight_word(&current_word));
        }

        Cow::Owned(result)
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

fn highlight_word(word: &str) -> String {
    const KEYWORDS: &[&str] = &["let", "fn", "return", "if", "else", "while", "import"];

    const LITERALS: &[&str] = &["true", "false", "nil"];

    const BUILTINS: &[&str] = &["print", "str", "abs"];

    if KEYWORDS.contains(&word) {
        word.magenta().bold().to_string()
    } else if LITERALS.contains(&word) {
        word.blue().to_string()
    } else if BUILTINS.contains(&word) {
        word.cyan().to_string()
    } else if word.chars().all(|c| c.is_ascii_digit() || c == '.') {
        word.yellow().to_string()
    } else {
        word.to_string()
    }
}

impl Validator for RillHelper {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        let input = ctx.input();

        // Check for balanced braces and parentheses
        if !is_balanced(input) {
            return Ok(ValidationResult::Incomplete);
        }

        // Check if line ends with an operator that expects more input
        let trimmed = input.trim();
        if trimmed.ends_with('\\')
            || trimmed.ends_with('+')
            || trimmed.ends_with('-')
            || trimmed.ends_with('*')
            || trimmed.ends_with('/')
            || trimmed.ends_with('=')
            || trimmed.ends_with(',')
            || trimmed.ends_with('{')
            || trimmed.ends_with('(')
        {
            return Ok(ValidationResult::Incomplete);
        }

        Ok(ValidationResult::Valid(None))
    }
}

/// Check if braces and parentheses are balanced
fn is_balanced(input: &str) -> bool {
    let mut stack = Vec::new();
    let mut in_string = None;
    let mut escape_next = false;

    for c in input.chars() {
        if escape_next {
            escape_next = false;
            continue;
        }

        if c == '\\' && in_string.is_some() {
            escape_next = true;
            continue;
        }

        match in_string {
            Some(quote) if c == quote => in_string = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => in_string = Some(c),
                '(' => stack.push(')'),
                '{' => stack.push('}'),
                ')' | '}' => {
                    if stack.pop() != Some(c) {
                        return true; // Unbalanced but we should let the parser handle the error
                    }
                }
                _ => {}
            },
        }
    }

    stack.is_empty() && in_string.is_none()
}

impl Helper for RillHelper {}

/// The interactive REPL for the rill runtime
pub struct Repl {
    session: Session,
    editor: Editor<RillHelper, DefaultHistory>,
    history_path: PathBuf,
}

impl Repl {
    /// Create a new REPL around an existing session
    pub fn new(session: Session) -> rustyline::Result<Self> {
        let config = Config::builder()
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .max_history_size(MAX_HISTORY_SIZE)?
            .auto_add_history(true)
            .build();

        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(RillHelper::new()));

        // Determine history file path
        let history_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rill")
            .join(HISTORY_FILE);

        // Create parent directory if it doesn't exist
        if let Some(parent) = history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        // Load history
        let _ = editor.load_history(&history_path);

        Ok(Self {
            session,
            editor,
            history_path,
        })
    }

    /// Run the REPL main loop
    pub fn run(&mut self) -> rustyline::Result<()> {
        self.print_banner();

        loop {
            let prompt = format!("{} ", "rill>".bright_green().bold());

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();

                    if trimmed.is_empty() {
                        continue;
                    }

                    // Check for REPL commands
                    if let Some((cmd, arg)) = ReplCommand::parse(trimmed) {
                        match self.execute_command(cmd, arg) {
                            CommandResult::Continue => continue,
                            CommandResult::Exit => break,
                        }
                    }

                    // Pick up source edits before evaluating
                    self.sweep_reloads();
                    self.eval_and_print(trimmed);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "^C".dimmed());
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", "^D".dimmed());
                    break;
                }
                Err(err) => {
                    eprintln!("{}: {:?}", "Error".red().bold(), err);
                    break;
                }
            }
        }

        // Save history
        let _ = self.editor.save_history(&self.history_path);

        Ok(())
    }

    fn print_banner(&self) {
        let version = env!("CARGO_PKG_VERSION");
        println!(
            "{} {} {}",
            "rill".bright_cyan().bold(),
            "v".dimmed(),
            version.bright_yellow()
        );
        println!(
            "  {}",
            "Edit an imported module's file and the changes show up here.".dimmed()
        );
        println!(
            "  {} {} {}",
            "Type".dimmed(),
            ".help".cyan(),
            "for available commands".dimmed()
        );
        println!();
    }

    fn execute_command(&mut self, cmd: ReplCommand, arg: Option<&str>) -> CommandResult {
        match cmd {
            ReplCommand::Help => {
                self.print_help();
                CommandResult::Continue
            }
            ReplCommand::Exit => CommandResult::Exit,
            ReplCommand::Clear => {
                print!("\x1B[2J\x1B[H");
                CommandResult::Continue
            }
            ReplCommand::Version => {
                println!(
                    "{}: {}",
                    "rill".bright_cyan().bold(),
                    env!("CARGO_PKG_VERSION").yellow()
                );
                CommandResult::Continue
            }
            ReplCommand::Modules => {
                self.print_modules();
                CommandResult::Continue
            }
            ReplCommand::Reload => {
                let report = self.session.check_and_reload_all();
                if report.is_empty() {
                    println!("{}", "All modules up to date".dimmed());
                } else {
                    self.print_report(&report);
                }
                CommandResult::Continue
            }
            ReplCommand::Load => {
                if let Some(path) = arg {
                    self.load_file(path);
                } else {
                    eprintln!(
                        "{}: {} {}",
                        "Error".red().bold(),
                        ".load".cyan(),
                        "requires a file path".dimmed()
                    );
                }
                CommandResult::Continue
            }
        }
    }

    fn print_help(&self) {
        println!();
        println!("{}", "REPL Commands:".white().bold());
        println!();

        for (cmd, desc) in ReplCommand::all_commands() {
            println!("  {:16} {}", cmd.cyan(), desc.dimmed());
        }

        println!();
        println!("{}", "Keyboard Shortcuts:".white().bold());
        println!();
        println!(
            "  {:16} {}",
            "Ctrl+C".yellow(),
            "Cancel current input".dimmed()
        );
        println!("  {:16} {}", "Ctrl+D".yellow(), "Exit REPL".dimmed());
        println!("  {:16} {}", "Tab".yellow(), "Autocomplete".dimmed());
        println!("  {:16} {}", "↑/↓".yellow(), "Navigate history".dimmed());
        println!();
    }

    fn print_modules(&self) {
        let registry = self.session.registry();
        if registry.is_empty() {
            println!("{}", "No modules imported".dimmed());
            return;
        }

        println!();
        for name in registry.names() {
            if let Some(entry) = registry.get(&name) {
                println!(
                    "  {:16} {} {}",
                    name.cyan(),
                    entry.path.display().to_string().dimmed(),
                    format!("[{}]", entry.signature).yellow()
                );
            }
        }
        println!();
    }

    fn sweep_reloads(&mut self) {
        let report = self.session.check_and_reload_all();
        if !report.is_empty() {
            self.print_report(&report);
        }
    }

    fn print_report(&self, report: &rill_runtime::ReloadReport) {
        for name in &report.reloaded {
            println!("{}", format!("reloaded {}", name).dimmed());
        }
        for (name, error) in &report.errors {
            eprintln!(
                "{}: {} {}",
                "reload failed".red().bold(),
                name.cyan(),
                format!("({})", error).dimmed()
            );
        }
    }

    fn load_file(&mut self, path: &str) {
        let path = std::path::Path::new(path.trim());

        match self.session.run_file(path) {
            Ok(value) => {
                println!("{}", format_value(&value));
            }
            Err(e) => {
                print_error(&e);
            }
        }
    }

    fn eval_and_print(&mut self, input: &str) {
        match self.session.eval(input) {
            Ok(value) => {
                println!("{}", format_value(&value));
            }
            Err(e) => {
                print_error(&e);
            }
        }
    }
}

/// Result of executing a REPL command
enum CommandResult {
    Continue,
    Exit,
}

/// Format a rill value for display with syntax coloring
fn format_value(value: &Value) -> String {
    match value {
        Value::Nil => "nil".blue().dimmed().to_string(),
        Value::Boolean(b) => b.to_string().yellow().to_string(),
        Value::Number(n) => n.to_string().yellow().to_string(),
        Value::String(s) => format!("\"{}\"", s).green().to_string(),
        Value::Function(_) | Value::Native(_) => value.to_string().magenta().to_string(),
        Value::Module(_) => value.to_string().cyan().to_string(),
    }
}

/// Print a formatted error message
fn print_error(error: &RuntimeError) {
    let error_str = error.to_string();

    // Split error type from message
    if let Some(colon_pos) = error_str.find(':') {
        let (error_type, message) = error_str.split_at(colon_pos);
        eprintln!("{}{}", error_type.red().bold(), message);
    } else {
        eprintln!("{}", error_str.red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repl_command_parse() {
        assert!(matches!(
            ReplCommand::parse(".help"),
            Some((ReplCommand::Help, None))
        ));
        assert!(matches!(
            ReplCommand::parse(".exit"),
            Some((ReplCommand::Exit, None))
        ));
        assert!(matches!(
            ReplCommand::parse(".modules"),
            Some((ReplCommand::Modules, None))
        ));
        assert!(matches!(
            ReplCommand::parse(".reload"),
            Some((ReplCommand::Reload, None))
        ));
        assert!(matches!(
            ReplCommand::parse(".load util.rl"),
            Some((ReplCommand::Load, Some("util.rl")))
        ));
        assert!(ReplCommand::parse("not a command").is_none());
    }

    #[test]
    fn test_is_balanced() {
        assert!(is_balanced("(1 + 2)"));
        assert!(is_balanced("fn add(a, b) { return a + b; }"));
        assert!(!is_balanced("(1 + 2"));
        assert!(!is_balanced("fn add(a, b) {"));
        assert!(is_balanced("\"string with (unbalanced\""));
    }
}
