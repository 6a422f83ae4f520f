mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add_button, add_label, embed_script, new_file, serve, show, AddButtonArgs, AddLabelArgs, EmbedScriptArgs,
    NewArgs, ShowArgs,
};
use config::Config;
use std::path::PathBuf;
use tosc_editor::{ToolSurface, SERVER_NAME, TOOL_NAMES};

/// TouchOSC layout editor
#[derive(Parser, Debug)]
#[command(name = "tosc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Project root for relative layout paths (overrides the config file)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Config file (default: ./tosc.config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the editing tools as JSON lines on stdin/stdout
    Serve,

    /// Create an empty layout
    New(NewArgs),

    /// Add a label to a layout
    AddLabel(AddLabelArgs),

    /// Add a push or toggle button to a layout
    AddButton(AddButtonArgs),

    /// Attach a script to a control, replacing any existing one
    EmbedScript(EmbedScriptArgs),

    /// Print a layout as XML
    Show(ShowArgs),

    /// List the tools exposed by `serve`
    Tools,
}

fn main() {
    // stdout carries tool responses, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::load(&cwd, cli.config.as_deref())?;

    let project_root = match cli.root {
        Some(root) => cwd.join(root),
        None => config.get_project_root(&cwd),
    };
    tracing::debug!("project root {}", project_root.display());

    let mut tools = ToolSurface::new(project_root).with_default_color(config.default_color);

    match cli.command {
        Command::Serve => serve(&mut tools),
        Command::New(args) => new_file(args, &mut tools),
        Command::AddLabel(args) => add_label(args, &mut tools),
        Command::AddButton(args) => add_button(args, &mut tools),
        Command::EmbedScript(args) => embed_script(args, &mut tools),
        Command::Show(args) => show(args, &tools),
        Command::Tools => {
            println!("{}", SERVER_NAME.bright_blue().bold());
            for name in TOOL_NAMES {
                println!("  {}", name);
            }
            Ok(())
        }
    }
}
