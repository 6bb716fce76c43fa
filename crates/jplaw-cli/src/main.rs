mod display;
mod translate;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use jplaw_ai::Translator;
use jplaw_core::config::{DEFAULT_HISTORY_CAPACITY, DEFAULT_PREVIEW_CHARS};
use jplaw_core::{DEFAULT_MODEL, HistoryConfig, Provider, parse_output_with_strategy};
use jplaw_store::{FileKv, HistoryStore, TranslationRecord, document_file_name};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jplaw", version, about = "Translate Japanese legal text with an LLM")]
struct Cli {
    /// Directory holding the translation history.
    #[arg(long, global = true, env = "JPLAW_DATA_DIR", default_value = ".jplaw")]
    data_dir: PathBuf,

    /// Provider API key. Without one, translations are simulated offline.
    #[arg(long, global = true, env = "JPLAW_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model id; the provider is chosen from it.
    #[arg(long, global = true, env = "JPLAW_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Translations kept before the oldest is evicted.
    #[arg(long, global = true, env = "JPLAW_HISTORY_CAPACITY", default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history_capacity: usize,

    /// Source characters kept in each history preview.
    #[arg(long, global = true, env = "JPLAW_PREVIEW_CHARS", default_value_t = DEFAULT_PREVIEW_CHARS)]
    preview_chars: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate a file (or stdin) and print translation and interpretation.
    Translate {
        file: Option<PathBuf>,
        /// Do not record the result in history.
        #[arg(long)]
        no_history: bool,
        /// Also write the markdown document to this path.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Split a saved raw model completion into its sections.
    Parse { file: Option<PathBuf> },
    /// Inspect or manage saved translations.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// List the selectable models.
    Models,
    /// Verify the API key against a provider.
    CheckKey {
        /// gemini or openai; defaults to the provider of --model.
        #[arg(long)]
        provider: Option<Provider>,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// Show all saved translations, newest first.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one saved translation in full.
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Delete one saved translation.
    Delete { id: String },
    /// Delete all saved translations.
    Clear,
    /// Write a saved translation as a markdown document.
    Export {
        id: String,
        /// Defaults to `translation-<timestamp>.md` in the current directory.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    fn history_config(&self) -> HistoryConfig {
        HistoryConfig {
            capacity: self.history_capacity,
            preview_chars: self.preview_chars,
            ..HistoryConfig::default()
        }
    }

    fn history_store(&self) -> HistoryStore<FileKv> {
        HistoryStore::with_config(FileKv::open(&self.data_dir), self.history_config())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!(
        model = %cli.model,
        data_dir = %cli.data_dir.display(),
        "jplaw v{}",
        env!("CARGO_PKG_VERSION")
    );

    match &cli.command {
        Command::Translate {
            file,
            no_history,
            output,
        } => cmd_translate(&cli, file.as_deref(), *no_history, output.as_deref()).await,
        Command::Parse { file } => cmd_parse(file.as_deref()),
        Command::History { action } => cmd_history(&cli, action),
        Command::Models => {
            display::print_models(&cli.model);
            Ok(())
        }
        Command::CheckKey { provider } => {
            let provider = provider.unwrap_or_else(|| Provider::for_model(&cli.model));
            // Only probe --model when it belongs to the provider being checked.
            let model = (Provider::for_model(&cli.model) == provider).then_some(cli.model.as_str());
            let status = Translator::new(cli.api_key.clone())
                .check_connection(provider, model)
                .await;
            println!("{}", status.message);
            if !status.success {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

// ── Commands ──

async fn cmd_translate(
    cli: &Cli,
    file: Option<&Path>,
    no_history: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let text = translate::read_input(file)?;
    let translator = Translator::new(cli.api_key.clone());
    let store = cli.history_store();
    let history = (!no_history).then_some(&store);

    let outcome = translate::run_translate(&translator, history, &text, &cli.model).await?;
    display::print_translation(&outcome.translation);
    eprintln!("  Finished in {:.1}s", outcome.elapsed_secs);

    if let Some(path) = output {
        let record = match &outcome.record {
            Some(record) => record.clone(),
            None => bail!("result was not saved to history; nothing to write to {}", path.display()),
        };
        translate::write_document(&record, path)?;
        eprintln!("  Wrote {}", path.display());
    }
    Ok(())
}

fn cmd_parse(file: Option<&Path>) -> anyhow::Result<()> {
    let raw = translate::read_input(file)?;
    let (output, strategy) = parse_output_with_strategy(&raw);
    display::print_parsed(&output, strategy);
    Ok(())
}

fn cmd_history(cli: &Cli, action: &HistoryAction) -> anyhow::Result<()> {
    let store = cli.history_store();
    match action {
        HistoryAction::List { json } => {
            let records = store.list();
            if *json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                display::print_history_table(&records);
            }
        }
        HistoryAction::Show { id, json } => {
            let record = find(&store, id)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                display::print_record_card(&record);
            }
        }
        HistoryAction::Delete { id } => {
            find(&store, id)?;
            store.delete(id);
            eprintln!("  Deleted {id}");
        }
        HistoryAction::Clear => {
            store.clear();
            eprintln!("  History cleared");
        }
        HistoryAction::Export { id, output } => {
            let record = find(&store, id)?;
            let path = output
                .clone()
                .unwrap_or_else(|| PathBuf::from(document_file_name(&record)));
            translate::write_document(&record, &path)?;
            eprintln!("  Wrote {}", path.display());
        }
    }
    Ok(())
}

fn find(store: &HistoryStore<FileKv>, id: &str) -> anyhow::Result<TranslationRecord> {
    store
        .get(id)
        .with_context(|| format!("no history record with id {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        let cli = Cli::try_parse_from(["jplaw", "models"]).unwrap();
        assert_eq!(cli.model, DEFAULT_MODEL);
        assert_eq!(cli.history_capacity, DEFAULT_HISTORY_CAPACITY);
        assert_eq!(cli.preview_chars, DEFAULT_PREVIEW_CHARS);
        assert!(matches!(cli.command, Command::Models));
    }

    #[test]
    fn translate_flags() {
        let cli = Cli::try_parse_from([
            "jplaw",
            "translate",
            "article.txt",
            "--no-history",
            "-o",
            "out.md",
            "--model",
            "gpt-4o",
        ])
        .unwrap();
        assert_eq!(cli.model, "gpt-4o");
        match cli.command {
            Command::Translate {
                file,
                no_history,
                output,
            } => {
                assert_eq!(file, Some(PathBuf::from("article.txt")));
                assert!(no_history);
                assert_eq!(output, Some(PathBuf::from("out.md")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn history_subcommands() {
        let cli = Cli::try_parse_from(["jplaw", "history", "export", "abc", "-o", "r.md"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::History {
                action: HistoryAction::Export { ref id, output: Some(_) }
            } if id == "abc"
        ));
        assert!(Cli::try_parse_from(["jplaw", "history", "show"]).is_err());
    }

    #[test]
    fn check_key_provider_parses() {
        let cli = Cli::try_parse_from(["jplaw", "check-key", "--provider", "openai"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::CheckKey {
                provider: Some(Provider::OpenAi)
            }
        ));
        assert!(Cli::try_parse_from(["jplaw", "check-key", "--provider", "claude"]).is_err());
    }

    #[test]
    fn history_config_from_flags() {
        let cli = Cli::try_parse_from([
            "jplaw",
            "--history-capacity",
            "5",
            "--preview-chars",
            "10",
            "history",
            "list",
        ])
        .unwrap();
        let config = cli.history_config();
        assert_eq!(config.capacity, 5);
        assert_eq!(config.preview_chars, 10);
        assert_eq!(config, HistoryConfig { capacity: 5, preview_chars: 10, ..HistoryConfig::default() });
    }

    #[test]
    fn history_store_uses_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["jplaw", "--data-dir", data_dir, "history", "clear"]).unwrap();
        let store = cli.history_store();
        store.save("第一条", "第一条", "解读", "gpt-4o").unwrap();

        let reopened = cli.history_store();
        assert_eq!(reopened.list().len(), 1);
        assert_eq!(reopened.kv().dir(), dir.path());
    }
}
