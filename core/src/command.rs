use crate::error::{Error, Result};
use crate::tokenizer::{self, TokenKind};

pub const USAGE: &str = "Type EXIT to terminate,\n\
ADD <filename.txt> <file content> to add a document,\n\
GET <query> to search for a word,\n\
SELECT <filename.txt> <filename.txt> ... to select a subset of the files.";

/// One line of the shell's command language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { doc_id: String, text: String },
    Get { terms: Vec<String> },
    /// An empty selection means every stored document.
    Select { doc_ids: Vec<String> },
    Exit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command> {
        let line = line.trim();
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((k, r)) => (k, r.trim_start()),
            None => (line, ""),
        };
        if keyword.is_empty() {
            return Err(Error::Syntax("empty command".into()));
        }

        match keyword.to_lowercase().as_str() {
            "add" => parse_add(rest),
            "get" => {
                let tokens = tokenizer::tokenize_query(rest)?;
                Ok(Command::Get { terms: tokenizer::query_terms(&tokens) })
            }
            "select" => {
                let tokens = tokenizer::tokenize_query(rest)?;
                if let Some(bad) = tokens.iter().find(|t| t.kind != TokenKind::Filename) {
                    return Err(Error::Syntax(format!("SELECT expects file names, got [{}]", bad.value)));
                }
                Ok(Command::Select { doc_ids: tokens.into_iter().map(|t| t.value).collect() })
            }
            "exit" => Ok(Command::Exit),
            _ => Err(Error::Syntax("Please start a command with ADD, GET, SELECT or EXIT.".into())),
        }
    }
}

fn parse_add(rest: &str) -> Result<Command> {
    let malformed = || Error::Syntax("Please use the command format: ADD <filename>.txt <text>".into());
    let (name, text) = rest.split_once(char::is_whitespace).ok_or_else(malformed)?;
    let doc_id = name.to_lowercase();
    let text = text.trim();
    if !tokenizer::is_document_id(&doc_id) || text.is_empty() {
        return Err(malformed());
    }
    Ok(Command::Add { doc_id, text: text.to_string() })
}
