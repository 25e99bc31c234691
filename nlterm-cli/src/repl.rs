//! The interactive prompt: the presentation host over the core pipeline.
//!
//! Owns the read-print loop and a handful of prompt-only directives
//! (`history`, `ai on|off`, `exit`); everything else goes straight through
//! the terminal pipeline.

use std::io::{BufRead, Write};

use colored::Colorize;
use nlterm_core::{RunOutcome, Session, TermConfig, Terminal};

pub async fn run_repl(config: &TermConfig) -> anyhow::Result<()> {
    let mut session = Session::new()?
        .with_capacities(config.history.output_capacity, config.history.command_capacity);
    session.set_ai_enabled(config.interpreter.ai_enabled);

    let terminal = Terminal::from_config(config);

    println!("{}", "nlterm ready".green().bold());
    println!(
        "Type {} for commands, natural language for anything else, {} to leave.",
        "help".cyan(),
        "exit".cyan()
    );

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_prompt(&session);

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        match input {
            "" => continue,
            "exit" | "quit" => break,
            "history" => {
                print_history(&session);
                continue;
            }
            "ai on" => {
                session.set_ai_enabled(true);
                println!("{}", "Natural-language assist enabled".green());
                continue;
            }
            "ai off" => {
                session.set_ai_enabled(false);
                println!("{}", "Natural-language assist disabled".yellow());
                continue;
            }
            _ => {}
        }

        let outcome = terminal.run(&mut session, input).await;
        print_outcome(&outcome);
    }

    Ok(())
}

fn print_prompt(session: &Session) {
    let dir = session
        .current_dir()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| session.current_dir().display().to_string());
    print!("{} ", format!("nlterm:{dir}$").green().bold());
    let _ = std::io::stdout().flush();
}

fn print_history(session: &Session) {
    let recent = session.recent_commands(10);
    if recent.is_empty() {
        println!("{}", "No commands executed yet".dimmed());
        return;
    }
    for (i, command) in recent.iter().enumerate() {
        println!("  {:>2}  {}", i + 1, command);
    }
}

pub fn print_outcome(outcome: &RunOutcome) {
    if let Some(translated) = &outcome.translated {
        println!(
            "{} {} {}",
            "AI interpreted:".blue(),
            "→".dimmed(),
            translated.cyan()
        );
    }
    if let Some(notice) = &outcome.notice {
        println!("{} {}", "!".yellow().bold(), notice.yellow());
    }
    if !outcome.result.output.is_empty() {
        println!("{}", outcome.result.output);
    }
    if !outcome.result.error.is_empty() {
        eprintln!("{} {}", "Error:".red().bold(), outcome.result.error);
    }
}
