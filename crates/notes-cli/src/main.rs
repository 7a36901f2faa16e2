//! `notes` — command-line client for the notes service.
//!
//! # Usage
//!
//! ```
//! notes list
//! notes add --title "Groceries" --content "eggs, milk"
//! notes delete 3
//! notes --url http://localhost:5000 list
//! notes --config ~/.config/notes/config.toml list
//! ```

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use notes_cli::{ApiConfig, ClientError, NotesClient};
use notes_core::note::{NewNote, Note};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "notes", about = "Create, list and delete notes")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the notes server (default: http://localhost:5000).
  #[arg(long, env = "NOTES_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List all notes, newest first.
  List,
  /// Create a note.
  Add {
    #[arg(short, long)]
    title:   String,
    #[arg(short, long)]
    content: String,
  },
  /// Delete a note by id.
  Delete { id: i64 },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:5000".to_string()),
  };
  tracing::debug!(base_url = %api_config.base_url, "using server");

  let client = NotesClient::new(api_config).context("failed to build HTTP client")?;

  match args.command {
    Command::List => print_notes(&client.list_notes().await?),
    Command::Add { title, content } => {
      let note = match client.create_note(NewNote::new(title, content)).await {
        Ok(note) => note,
        Err(e @ (ClientError::Invalid(_) | ClientError::ValidationFailed { .. })) => {
          eprintln!("{e}");
          std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
      };
      println!("Created note #{}", note.id);
      print_notes(&client.list_notes().await?);
    }
    Command::Delete { id } => {
      client.delete_note(id).await?;
      println!("Deleted note #{id}");
    }
  }

  Ok(())
}

fn print_notes(notes: &[Note]) {
  if notes.is_empty() {
    println!("No notes yet.");
    return;
  }
  for note in notes {
    let when = note.created_at.map_or_else(
      || "-".to_string(),
      |at| at.with_timezone(&Local).format("%b %-d, %Y %H:%M").to_string(),
    );
    println!("#{:<4} {when}  {}", note.id, note.title);
    for line in note.content.lines() {
      println!("      {line}");
    }
  }
}
