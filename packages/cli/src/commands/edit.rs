//! One-shot edits: load a file, apply one tool, write it back.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tosc_editor::{Frame, ToolSurface};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Layout file to create
    pub file: String,
}

#[derive(Debug, Args)]
pub struct GeometryArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub x: i32,

    #[arg(long, allow_hyphen_values = true)]
    pub y: i32,

    #[arg(long, allow_hyphen_values = true)]
    pub w: i32,

    #[arg(long, allow_hyphen_values = true)]
    pub h: i32,
}

impl GeometryArgs {
    fn frame(&self) -> Frame {
        Frame::new(self.x, self.y, self.w, self.h)
    }
}

#[derive(Debug, Args)]
pub struct AddLabelArgs {
    /// Layout file to edit
    pub file: String,

    /// Control name, unique within the layout
    #[arg(short, long)]
    pub name: String,

    /// Label text
    #[arg(short, long)]
    pub text: String,

    #[command(flatten)]
    pub geometry: GeometryArgs,

    /// Color (defaults to the configured default color)
    #[arg(short, long)]
    pub color: Option<String>,
}

#[derive(Debug, Args)]
pub struct AddButtonArgs {
    /// Layout file to edit
    pub file: String,

    /// Control name, unique within the layout
    #[arg(short, long)]
    pub name: String,

    /// Button behavior (push or toggle)
    #[arg(short = 'b', long, default_value = "push")]
    pub button_type: String,

    #[command(flatten)]
    pub geometry: GeometryArgs,

    /// Color (defaults to the configured default color)
    #[arg(short, long)]
    pub color: Option<String>,
}

#[derive(Debug, Args)]
pub struct EmbedScriptArgs {
    /// Layout file to edit
    pub file: String,

    /// Name of the control receiving the script
    #[arg(long)]
    pub control: String,

    /// Script text
    #[arg(long, conflicts_with = "script_file", required_unless_present = "script_file")]
    pub script: Option<String>,

    /// Read the script from a file instead
    #[arg(long)]
    pub script_file: Option<PathBuf>,
}

pub fn new_file(args: NewArgs, tools: &mut ToolSurface) -> Result<()> {
    report(tools.create_new_file(&args.file))
}

pub fn add_label(args: AddLabelArgs, tools: &mut ToolSurface) -> Result<()> {
    edit(tools, &args.file, |tools| {
        tools.add_label(&args.name, &args.text, args.geometry.frame(), args.color.as_deref())
    })
}

pub fn add_button(args: AddButtonArgs, tools: &mut ToolSurface) -> Result<()> {
    edit(tools, &args.file, |tools| {
        tools.add_button(&args.name, &args.button_type, args.geometry.frame(), args.color.as_deref())
    })
}

pub fn embed_script(args: EmbedScriptArgs, tools: &mut ToolSurface) -> Result<()> {
    let script = match (args.script, args.script_file) {
        (Some(script), _) => script,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read script {}", path.display()))?,
        (None, None) => bail!("either --script or --script-file is required"),
    };

    edit(tools, &args.file, |tools| tools.embed_script(&args.control, &script))
}

/// Load `file`, run `apply`, write the result back to the same path
fn edit(tools: &mut ToolSurface, file: &str, apply: impl FnOnce(&mut ToolSurface) -> String) -> Result<()> {
    expect_success(tools.load_file(file))?;
    report(apply(tools))?;
    expect_success(tools.write_file(None))?;
    Ok(())
}

fn report(status: String) -> Result<()> {
    let status = expect_success(status)?;
    println!("{} {}", "✓".green(), status);
    Ok(())
}

/// Turn an `Error: ` status into an error for `main` to print
pub fn expect_success(status: String) -> Result<String> {
    match status.strip_prefix("Error: ") {
        Some(message) => bail!("{}", message),
        None => Ok(status),
    }
}
