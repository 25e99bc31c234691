use clap::{Parser, Subcommand};
use colored::Colorize;
use nlterm_core::{Session, SystemCollector, TermConfig, Terminal};
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod repl;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "nlterm")]
#[command(version = VERSION)]
#[command(about = "nlterm - a terminal that understands natural language")]
#[command(long_about = r#"
nlterm accepts either literal commands (ls, cd, pwd, mkdir, ps, top, ...) or
natural language ("show me all files"), translates the latter through a
hosted language model, and executes the result with a bounded timeout.

Run without a subcommand for the interactive prompt. Set GEMINI_API_KEY (or
GOOGLE_API_KEY) to enable natural-language assist.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Start the interactive prompt (default)")]
    Run,

    #[command(about = "Execute a single command and print its result")]
    Exec {
        /// The command or natural-language text to run
        command: Vec<String>,

        #[arg(long, help = "Disable natural-language assist for this run")]
        no_ai: bool,
    },

    #[command(about = "Show a system resource snapshot (CPU, memory, disk, processes)")]
    Status {
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = TermConfig::load()?;
    tracing::debug!(
        model = %config.interpreter.model,
        assist = config.interpreter.ai_enabled,
        "Configuration loaded"
    );

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => repl::run_repl(&config).await,
        Commands::Exec { command, no_ai } => cmd_exec(&config, command.join(" "), no_ai).await,
        Commands::Status { format } => cmd_status(&format).await,
    }
}

async fn cmd_exec(config: &TermConfig, command: String, no_ai: bool) -> anyhow::Result<()> {
    let mut session = Session::new()?
        .with_capacities(config.history.output_capacity, config.history.command_capacity);
    session.set_ai_enabled(config.interpreter.ai_enabled && !no_ai);

    let terminal = Terminal::from_config(config);
    let outcome = terminal.run(&mut session, &command).await;

    repl::print_outcome(&outcome);

    if outcome.result.is_success() {
        Ok(())
    } else {
        std::process::exit(outcome.result.exit_code);
    }
}

async fn cmd_status(format: &str) -> anyhow::Result<()> {
    let collector = SystemCollector::new();
    let snapshot = collector.collect().await;

    if format == "json" {
        let output = serde_json::json!({
            "timestamp": snapshot.timestamp.to_rfc3339(),
            "cpu_percent": snapshot.cpu_percent,
            "memory": {
                "used_bytes": snapshot.memory.used_bytes,
                "total_bytes": snapshot.memory.total_bytes,
                "percent": snapshot.memory.percent()
            },
            "disk": {
                "used_bytes": snapshot.disk.used_bytes,
                "total_bytes": snapshot.disk.total_bytes,
                "percent": snapshot.disk.percent()
            },
            "process_count": snapshot.process_count()
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", "System Status".cyan().bold());
        println!("{}", "═".repeat(40).dimmed());
        println!();
        println!("  CPU Usage:  {:>6.1}%", snapshot.cpu_percent);
        println!(
            "  Memory:     {:>6.1}%  ({} GB / {} GB)",
            snapshot.memory.percent(),
            snapshot.memory.used_gb(),
            snapshot.memory.total_gb()
        );
        println!(
            "  Disk:       {:>6.1}%  ({} GB / {} GB)",
            snapshot.disk.percent(),
            snapshot.disk.used_gb(),
            snapshot.disk.total_gb()
        );
        println!("  Processes:  {:>6}", snapshot.process_count());
    }

    Ok(())
}
