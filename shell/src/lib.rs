use anyhow::Result;
use searchcore::command::USAGE;
use searchcore::{Command, DocumentList, Error, SearchEngine};
use std::io::{BufRead, Write};

pub const WELCOME: &str = "Welcome to the search engine!";

/// Whether the loop should keep reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Read commands from `input` until EXIT or end of input.
pub fn run_repl<R: BufRead, W: Write>(engine: &SearchEngine, input: R, out: &mut W) -> Result<()> {
    writeln!(out, "{WELCOME}\n{USAGE}")?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let flow = match Command::parse(&line) {
            Ok(cmd) => execute(engine, cmd, out)?,
            Err(e) => {
                writeln!(out, "{e}\n{USAGE}")?;
                Flow::Continue
            }
        };
        if flow == Flow::Exit {
            break;
        }
    }
    writeln!(out, "Closed the search engine.")?;
    Ok(())
}

/// Run one command. Engine errors are reported to `out`; only I/O on `out`
/// itself fails the call.
pub fn execute<W: Write>(engine: &SearchEngine, cmd: Command, out: &mut W) -> Result<Flow> {
    match cmd {
        Command::Add { doc_id, text } => match engine.add_document(&doc_id, &text) {
            Ok(()) => writeln!(out, "Added {doc_id}.")?,
            Err(e @ Error::DocumentExists(_)) => writeln!(out, "{e}. Please use another file name.")?,
            Err(e) => writeln!(out, "Failed to add the file: {e}")?,
        },
        Command::Get { terms } => match engine.search(&terms) {
            Ok(results) => print_results(out, &results)?,
            Err(e) => writeln!(out, "{e}")?,
        },
        Command::Select { doc_ids } => match engine.reload(&doc_ids) {
            Ok(summary) => {
                for id in &summary.missing {
                    writeln!(out, "File {id} doesn't exist, skipped it.")?;
                }
                for id in &summary.unreadable {
                    writeln!(out, "File {id} is not a text file, skipped it.")?;
                }
                writeln!(out, "Reloaded the index with {} documents.", summary.num_docs)?;
            }
            Err(e) => writeln!(out, "Failed to reload the index: {e}")?,
        },
        Command::Exit => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}

pub fn print_results<W: Write>(out: &mut W, results: &DocumentList) -> Result<()> {
    if results.is_empty() {
        writeln!(out, "No documents match {:?}.", results.term())?;
        return Ok(());
    }
    writeln!(out, "Search results for {:?}:", results.term())?;
    for (rank, hit) in results.entries().iter().enumerate() {
        writeln!(out, "{}. {}  {:.4}", rank + 1, hit.doc_id, hit.score)?;
    }
    Ok(())
}
