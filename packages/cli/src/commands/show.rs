use anyhow::Result;
use clap::Args;
use tosc_editor::ToolSurface;
use tosc_lexml::{open, to_pretty_xml};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Layout file to print
    pub file: String,
}

/// Print the decompressed XML of a layout
pub fn show(args: ShowArgs, tools: &ToolSurface) -> Result<()> {
    let doc = open(&tools.resolve(&args.file))?;
    print!("{}", to_pretty_xml(&doc));
    Ok(())
}
