//! Line-delimited JSON tool server.
//!
//! Each input line is one [`ToolCall`]; each gets exactly one
//! [`ToolResponse`] line back. A line that does not parse gets an `Error:`
//! response and the loop carries on. Logs go to stderr, never stdout.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use tosc_editor::{ToolCall, ToolResponse, ToolSurface, SERVER_NAME, TOOL_NAMES};

pub fn serve(tools: &mut ToolSurface) -> Result<()> {
    tracing::info!("{} ready with tools: {}", SERVER_NAME, TOOL_NAMES.join(", "));

    let stdin = io::stdin();
    let stdout = io::stdout();
    serve_io(tools, stdin.lock(), stdout.lock())
}

pub fn serve_io<R: BufRead, W: Write>(tools: &mut ToolSurface, input: R, mut output: W) -> Result<()> {
    for line in input.split(b'\n') {
        let line = line?;

        let response = match String::from_utf8(line) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => handle_line(tools, &line),
            Err(e) => {
                tracing::warn!("rejected request: {}", e);
                ToolResponse::error(format!("Invalid tool call: {}", e))
            }
        };

        serde_json::to_writer(&mut output, &response)?;
        output.write_all(b"\n")?;
        output.flush()?;
    }

    tracing::info!("input closed, shutting down");
    Ok(())
}

fn handle_line(tools: &mut ToolSurface, line: &str) -> ToolResponse {
    match serde_json::from_str::<ToolCall>(line) {
        Ok(call) => ToolResponse::from_status(tools.dispatch(call)),
        Err(e) => {
            tracing::warn!("rejected request: {}", e);
            ToolResponse::error(format!("Invalid tool call: {}", e))
        }
    }
}
