//! Command parsing for the interactive prompt.

use notewire_core::{Error, NoteId, Result};
use notewire_sync::NoteCollection;

/// One parsed prompt command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a note with the given text.
    Add(String),
    /// Replace a note's text. `id` may be a unique prefix.
    Edit { id: String, text: String },
    /// Delete a note. `id` may be a unique prefix.
    Remove { id: String },
    /// Print the note list.
    List,
    /// Print command help.
    Help,
    /// Leave the prompt.
    Quit,
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "add" => {
            if rest.is_empty() {
                Err(Error::InvalidInput("usage: add <text>".to_string()))
            } else {
                Ok(Some(Command::Add(rest.to_string())))
            }
        }
        "edit" => match rest.split_once(char::is_whitespace) {
            Some((id, text)) if !text.trim().is_empty() => Ok(Some(Command::Edit {
                id: id.to_string(),
                text: text.trim().to_string(),
            })),
            _ => Err(Error::InvalidInput("usage: edit <id> <text>".to_string())),
        },
        "rm" | "del" => {
            if rest.is_empty() || rest.contains(char::is_whitespace) {
                Err(Error::InvalidInput("usage: rm <id>".to_string()))
            } else {
                Ok(Some(Command::Remove {
                    id: rest.to_string(),
                }))
            }
        }
        "ls" | "list" => Ok(Some(Command::List)),
        "help" => Ok(Some(Command::Help)),
        "quit" | "exit" | "q" => Ok(Some(Command::Quit)),
        other => Err(Error::InvalidInput(format!("unknown command: {}", other))),
    }
}

/// Resolve a full id or unambiguous prefix against the collection.
pub fn resolve_id(collection: &NoteCollection, prefix: &str) -> Result<NoteId> {
    // An exact id wins even when it prefixes another.
    if let Some(note) = collection.get(&NoteId::from(prefix)) {
        return Ok(note.id.clone());
    }

    let mut matches = collection
        .notes()
        .iter()
        .filter(|n| n.id.as_str().starts_with(prefix));
    match (matches.next(), matches.next()) {
        (Some(note), None) => Ok(note.id.clone()),
        (Some(_), Some(_)) => Err(Error::InvalidInput(format!(
            "ambiguous note id: {}",
            prefix
        ))),
        (None, _) => Err(Error::NoteNotFound(NoteId::from(prefix))),
    }
}
