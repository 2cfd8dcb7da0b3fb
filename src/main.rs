use std::process::ExitCode;

use clap::Parser;
use note_cards::constants as C;
use note_cards::{Cli, Command, Config, JsonPreferenceStore, NoteCollection};
use tracing_subscriber::EnvFilter;

/// Settings shared by every command
pub struct Context {
    pub config: Config,
    pub json: bool,
}

impl Context {
    pub fn collect(&self) -> note_cards::Result<NoteCollection> {
        let root = self.config.root_dir()?;
        note_cards::collect_notes(&root, &self.config.note_options())
    }

    pub fn preference_store(&self) -> note_cards::Result<JsonPreferenceStore> {
        Ok(JsonPreferenceStore::new(self.config.preferences_path()?))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(C::ENV_LOG).unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> note_cards::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(root) = cli.root {
        config.root = Some(root);
    }
    let ctx = Context { config, json: cli.json };

    match cli.command {
        Command::Scan => cmd::scan::run(&ctx),
        Command::Tags => cmd::tags::run(&ctx),
        Command::Filter { tag } => cmd::filter::run(&ctx, &tag),
        Command::Render { output, tag } => cmd::render::run(&ctx, output.as_deref(), tag.as_deref()),
        Command::Theme { action } => cmd::theme::run(&ctx, action),
        Command::Open { path } => cmd::open::run(&path),
        Command::Message { json } => cmd::message::run(&json),
    }
}

mod cmd {
    pub mod filter;
    pub mod message;
    pub mod open;
    pub mod render;
    pub mod scan;
    pub mod tags;
    pub mod theme;
}
