//! notewire - interactive terminal client for a managed GraphQL notes backend.
//!
//! One prompt, one list: `add` creates a note, `edit`/`rm` mutate it, and
//! every change arrives back through the event subscriptions before it shows
//! up in the list. Logs go to a rolling file; stdout belongs to the UI.

mod command;

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use notewire_client::{BackendConfig, GraphqlNotesClient};
use notewire_core::Note;
use notewire_sync::{Applied, NotesSession};

use command::{parse_command, resolve_id, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let file_appender = tracing_appender::rolling::daily("logs", "notewire.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("notewire=info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    let config = BackendConfig::from_env().context("loading backend configuration")?;
    let client = GraphqlNotesClient::new(&config).context("building backend client")?;
    let mut session = NotesSession::new(Arc::new(client)).with_event_buffer(config.event_buffer);

    let count = session.load_all().await.context("fetching notes")?;
    println!("notewire — {} note(s) loaded. Type 'help' for commands.", count);
    render_list(session.collection().notes());

    let (subscriptions, mut events) = session
        .subscribe()
        .await
        .context("subscribing to note events")?;
    info!(subsystem = "cli", "Ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if handle_line(&mut session, &line).await {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    error!(subsystem = "cli", error = %e, "stdin read failed");
                    break;
                }
            },
            maybe_event = events.recv() => match maybe_event {
                Some(envelope) => {
                    let applied = session.apply_event(envelope);
                    render_applied(&session, &applied);
                }
                None => {
                    println!("event streams closed, exiting");
                    break;
                }
            },
        }
    }

    subscriptions.shutdown().await;
    info!(subsystem = "cli", "Shut down");
    Ok(())
}

/// Run one input line. Returns true when the user asked to quit.
async fn handle_line(session: &mut NotesSession, line: &str) -> bool {
    let command = match parse_command(line) {
        Ok(Some(command)) => command,
        Ok(None) => return false,
        Err(e) => {
            println!("error: {}", e);
            return false;
        }
    };

    match command {
        Command::Quit => return true,
        Command::Help => print_help(),
        Command::List => render_list(session.collection().notes()),
        Command::Add(text) => match session.submit_create(&text).await {
            // Insertion happens when the created event echoes back.
            Ok(note) => println!("submitted as [{}]", note.id),
            Err(e) => println!("error: {}", e),
        },
        Command::Edit { id, text } => match resolve_id(session.collection(), &id) {
            Ok(id) => {
                if let Err(e) = session.submit_update(&id, &text).await {
                    println!("error: {}", e);
                }
            }
            Err(e) => println!("error: {}", e),
        },
        Command::Remove { id } => match resolve_id(session.collection(), &id) {
            Ok(id) => {
                if let Err(e) = session.submit_delete(&id).await {
                    println!("error: {}", e);
                }
            }
            Err(e) => println!("error: {}", e),
        },
    }
    false
}

fn render_list(notes: &[Note]) {
    if notes.is_empty() {
        println!("(no notes)");
        return;
    }
    for note in notes {
        println!("  [{}] {}", note.id, note.text);
    }
}

fn render_applied(session: &NotesSession, applied: &Applied) {
    match applied {
        Applied::Inserted(id) | Applied::Replaced(id) => {
            if let Some(note) = session.collection().get(id) {
                let marker = if matches!(applied, Applied::Inserted(_)) {
                    '+'
                } else {
                    '~'
                };
                println!("{} [{}] {}", marker, note.id, note.text);
            }
        }
        Applied::Removed(id) => println!("- [{}]", id),
        Applied::AlreadyPresent(_) | Applied::Missing(_) => {}
    }
}

fn print_help() {
    println!("commands:");
    println!("  add <text>       create a note");
    println!("  edit <id> <text> replace a note's text (id may be a unique prefix)");
    println!("  rm <id>          delete a note (id may be a unique prefix)");
    println!("  ls               print the note list");
    println!("  help             this message");
    println!("  quit             exit");
}
