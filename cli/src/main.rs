mod error_formatter;
mod formatter;
mod server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use formatter::Formatter;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use verdict::{Engine, Facts};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "verdict")]
#[command(about = "Evaluate boolean rules against facts.")]
#[command(
    long_about = "Verdict evaluates rules such as `amount > 1000 AND country == UK` against named values.\nThe CLI checks single rules, evaluates rule sets loaded from .rules files, or serves them over HTTP."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a rule and print its canonical form
    ///
    /// Syntax errors are reported with the offending token highlighted.
    Check {
        /// The rule to parse, e.g. "amount > 1000 AND country == UK"
        rule: String,
        /// Print the parsed tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Evaluate a single rule against facts
    ///
    /// Prints `true` or `false`. Fields missing from the facts fall back to
    /// 0 for `>` and `<`, and to the empty string for `==`.
    ///
    /// Fact values that look like numbers are numbers, and `==` reads a
    /// number as the empty string. Quote the value to compare digits as
    /// text: verdict eval "mcc == 5411" 'mcc="5411"'
    Eval {
        /// The rule to evaluate
        rule: String,
        /// Facts (format: name=value)
        ///
        /// Examples: amount=1200 country=UK mcc='"5411"'
        facts: Vec<String>,
        /// Show every clause evaluated and every branch skipped
        #[arg(short, long)]
        trace: bool,
        /// Print the result and trace as JSON
        #[arg(long)]
        json: bool,
    },
    /// Evaluate the rules of a workspace (try: high_value,tiny amount=5)
    ///
    /// Loads all .rules files from the workspace and evaluates every rule, or
    /// only the comma-separated rules named first, against the given facts.
    Run {
        /// Rules to evaluate (format: rule1,rule2); omit to evaluate all rules
        #[arg(value_name = "[RULES]")]
        rules: Option<String>,
        /// Facts (format: name=value)
        facts: Vec<String>,
        /// Workspace root directory containing .rules files
        #[arg(short = 'd', long = "dir", default_value = ".")]
        workdir: PathBuf,
        /// Output `name=true|false` lines only (for piping to other tools)
        #[arg(short = 'r', long)]
        raw: bool,
        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all rules in a workspace
    List {
        /// Workspace root directory containing .rules files
        #[arg(default_value = ".")]
        root: PathBuf,
    },
    /// Start HTTP REST API server (default: localhost:3000)
    ///
    /// API: GET /rules, POST /evaluate with {rule, facts},
    /// POST /rules/{name}/evaluate with {facts}
    Server {
        /// Workspace root directory containing .rules files
        #[arg(short = 'd', long = "dir", default_value = ".")]
        workdir: PathBuf,
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port number to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Server { .. }));

    let result = match &cli.command {
        Commands::Check { rule, json } => check_command(rule, *json),
        Commands::Eval {
            rule,
            facts,
            trace,
            json,
        } => eval_command(rule, facts, *trace, *json),
        Commands::Run {
            rules,
            facts,
            workdir,
            raw,
            json,
        } => run_command(workdir, rules.as_deref(), facts, *raw, *json),
        Commands::List { root } => list_command(root),
        Commands::Server {
            workdir,
            host,
            port,
        } => server_command(workdir, host, *port),
    };

    if let Err(e) = result {
        // Check if it's a VerdictError and format it nicely, otherwise use default
        if let Some(verdict_err) = e.downcast_ref::<verdict::VerdictError>() {
            let color = std::io::stderr().is_terminal();
            eprintln!("{}", error_formatter::format_error(verdict_err, color));
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn init_tracing(serving: bool) {
    let default_filter = if serving {
        "verdict=info,tower_http=info"
    } else {
        "verdict=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn check_command(rule: &str, json: bool) -> Result<()> {
    let engine = Engine::new();
    let expression = engine.parse(rule)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&expression)?);
    } else {
        println!("{}", expression);
    }

    Ok(())
}

fn eval_command(rule: &str, facts: &[String], trace: bool, json: bool) -> Result<()> {
    let engine = Engine::new();
    let expression = engine.parse(rule)?;
    let facts = parse_fact_args(facts)?;

    let mut operations = Vec::new();
    let matched = expression.interpret_traced(&facts, &mut operations);

    if json {
        let output = serde_json::json!({
            "rule": expression.to_string(),
            "matched": matched,
            "operations": operations,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if trace {
        print!("{}", Formatter::default().format_trace(&operations, matched));
    } else {
        println!("{}", matched);
    }

    Ok(())
}

fn run_command(
    workdir: &Path,
    rules: Option<&str>,
    facts: &[String],
    raw: bool,
    json: bool,
) -> Result<()> {
    let mut engine = Engine::new();
    load_workspace(&mut engine, workdir)?;

    // A leading `name=value` is a fact, not a rule list
    let mut fact_args = facts.to_vec();
    let rule_names = match rules {
        Some(arg) if arg.contains('=') => {
            fact_args.insert(0, arg.to_string());
            None
        }
        Some(arg) => Some(parse_rule_names(arg)),
        None => None,
    };

    let facts = parse_fact_args(&fact_args)?;
    let response = engine.evaluate_rules(&facts, rule_names)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", Formatter::default().format_response(&response, raw));
    }

    Ok(())
}

fn list_command(root: &Path) -> Result<()> {
    let mut engine = Engine::new();

    println!("Loading workspace from {}...", root.display());
    let file_count = load_workspace(&mut engine, root)?;

    println!();
    print!(
        "{}",
        Formatter::default().format_rule_list(engine.rules(), file_count)
    );

    Ok(())
}

fn server_command(workdir: &Path, host: &str, port: u16) -> Result<()> {
    #[cfg(feature = "server")]
    {
        use tokio::runtime::Runtime;
        let rt = Runtime::new()?;
        rt.block_on(async {
            let mut engine = Engine::new();
            load_workspace(&mut engine, workdir)?;

            tracing::info!(
                rules = engine.rules().len(),
                "starting HTTP server with rules loaded"
            );
            server::http::start_server(engine, host, port).await
        })?;
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = (workdir, host, port);
        eprintln!("Error: Server feature not enabled");
        eprintln!("Recompile with: cargo build --features server");
        std::process::exit(1);
    }

    Ok(())
}

fn parse_fact_args(facts: &[String]) -> Result<Facts> {
    let refs: Vec<&str> = facts.iter().map(|s| s.as_str()).collect();
    Ok(verdict::parse_facts(&refs)?)
}

fn parse_rule_names(arg: &str) -> Vec<String> {
    arg.split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Load every `.rules` file under `workdir`, returning the number of files
fn load_workspace(engine: &mut Engine, workdir: &Path) -> Result<usize> {
    let mut file_count = 0;
    for entry in WalkDir::new(workdir).sort_by_file_name() {
        let entry = entry?;
        if entry.path().extension().and_then(|s| s.to_str()) == Some("rules") {
            let path = entry.path();
            let source_id = path.to_string_lossy().to_string();
            debug!(source = %source_id, "loading rule file");
            engine.add_rules(&fs::read_to_string(path)?, &source_id)?;
            file_count += 1;
        }
    }
    Ok(file_count)
}
