//! `chum` — talk to the friends you taught.
//!
//! Reads `chum.toml` (or the path given with `--config`), opens the SQLite
//! store, and picks canned replies for whatever you type.
//!
//! # Usage
//!
//! ```text
//! chum import corpus.json
//! chum friends --user alice
//! chum chat --user alice --friend Tom where is the cat
//! chum talk --user alice --friend 3
//! chum --json chat --user alice --friend Tom hello
//! ```

mod import;
mod settings;

use std::path::PathBuf;

use anyhow::{Context as _, bail};
use chum_core::{Reply, friend::FriendScope, select_response};
use chum_store_sqlite::SqliteStore;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::CliConfig;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "chum", author, version, about = "Chat with friends made of canned lines")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "chum.toml")]
  config: PathBuf,

  /// Print replies as JSON objects instead of plain text.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Pick one reply for TEXT and exit.
  Chat {
    #[command(flatten)]
    target: Target,
    /// What you say to your friend.
    #[arg(required = true, num_args = 1..)]
    text:   Vec<String>,
  },
  /// Reply to each line read from stdin until EOF or `/quit`.
  Talk {
    #[command(flatten)]
    target: Target,
  },
  /// Load friends, statements and responses from a JSON corpus.
  Import {
    file: PathBuf,
  },
  /// List a user's friends.
  Friends {
    #[arg(short, long)]
    user: Option<String>,
  },
}

#[derive(Args)]
struct Target {
  /// Owning username; falls back to `owner` from the config.
  #[arg(short, long)]
  user:   Option<String>,
  /// Friend id, or a friend name.
  #[arg(short, long)]
  friend: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr; stdout is reserved for replies.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = CliConfig::load(&cli.config)?;

  let store_path = cfg.store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match cli.command {
    Command::Chat { target, text } => {
      let scope = resolve_scope(&store, &cfg, &target).await?;
      let mut rng = cfg.rng();
      let reply = chat(&store, &mut rng, &scope, &text.join(" ")).await?;
      println!("{}", render(&reply, cli.json)?);
    }
    Command::Talk { target } => {
      let scope = resolve_scope(&store, &cfg, &target).await?;
      talk(&store, cfg.rng(), &scope, cli.json).await?;
    }
    Command::Import { file } => {
      let corpus = import::read_corpus(&file)?;
      let counts = import::import(&store, corpus).await?;
      println!(
        "imported {} friends, {} statements, {} responses",
        counts.friends, counts.statements, counts.responses
      );
    }
    Command::Friends { user } => {
      let owner = owner(user, &cfg)?;
      for friend in store.list_friends(&owner).await? {
        println!("{:>5}  {}  {}", friend.id, friend.name, friend.description);
      }
    }
  }

  Ok(())
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn owner(user: Option<String>, cfg: &CliConfig) -> anyhow::Result<String> {
  match user.or_else(|| cfg.owner.clone()) {
    Some(u) => Ok(u),
    None => bail!("no user given; pass --user or set `owner` in the config"),
  }
}

/// Turn `--user`/`--friend` into a scope. A numeric friend is taken as an id
/// without further checks; the selector treats a foreign id as "no match".
async fn resolve_scope(
  store: &SqliteStore,
  cfg: &CliConfig,
  target: &Target,
) -> anyhow::Result<FriendScope> {
  let owner = owner(target.user.clone(), cfg)?;

  if let Ok(id) = target.friend.parse::<i64>() {
    return Ok(FriendScope::new(id, owner));
  }

  match store.find_friend(&owner, &target.friend).await? {
    Some(friend) => Ok(FriendScope::new(friend.id, owner)),
    None => bail!("{owner} has no friend named {:?}", target.friend),
  }
}

async fn chat(
  store: &SqliteStore,
  rng: &mut StdRng,
  scope: &FriendScope,
  text: &str,
) -> anyhow::Result<Reply> {
  let reply = select_response(store, rng, scope, text)
    .await
    .context("failed to select a response")?;
  tracing::debug!(fallback = reply.is_fallback(), "selected reply");
  Ok(reply)
}

/// Plain text is the reply verbatim; JSON is `{"kind": ..., "text": ...}`
/// with `text` absent for the two fallbacks.
fn render(reply: &Reply, json: bool) -> anyhow::Result<String> {
  if json {
    serde_json::to_string(reply).context("serialising reply")
  } else {
    Ok(reply.to_string())
  }
}

async fn talk(
  store: &SqliteStore,
  mut rng: StdRng,
  scope: &FriendScope,
  json: bool,
) -> anyhow::Result<()> {
  let mut lines = BufReader::new(tokio::io::stdin()).lines();

  while let Some(line) = lines.next_line().await.context("reading stdin")? {
    let line = line.trim();
    if line == "/quit" {
      break;
    }
    if line.is_empty() {
      continue;
    }
    let reply = chat(store, &mut rng, scope, line).await?;
    println!("{}", render(&reply, json)?);
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_rendering_is_the_reply_text() {
    assert_eq!(render(&Reply::Matched("meow".into()), false).unwrap(), "meow");
    assert_eq!(
      render(&Reply::NoResponse, false).unwrap(),
      Reply::NoResponse.text()
    );
  }

  #[test]
  fn json_rendering_tags_the_kind() {
    assert_eq!(
      render(&Reply::Matched("meow".into()), true).unwrap(),
      r#"{"kind":"matched","text":"meow"}"#
    );
    assert_eq!(render(&Reply::NoResponse, true).unwrap(), r#"{"kind":"no_response"}"#);
    assert_eq!(
      render(&Reply::NothingImportant, true).unwrap(),
      r#"{"kind":"nothing_important"}"#
    );
  }

  #[test]
  fn json_flag_is_accepted_after_the_subcommand() {
    let cli = Cli::try_parse_from(["chum", "chat", "--friend", "Tom", "--json", "hello"]).unwrap();
    assert!(cli.json);
    assert!(matches!(cli.command, Command::Chat { text, .. } if text == ["hello"]));
  }
}
