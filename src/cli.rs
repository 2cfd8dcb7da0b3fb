use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// note-cards - Browse a folder of markdown notes as cards
///
/// # Quick Reference
///
/// ## Scanning
///
/// ```bash
/// note-cards scan                      # One line per note, sorted by name
/// note-cards --root ~/notes scan       # Scan another directory
/// note-cards --json scan               # Records as JSON
/// note-cards tags                      # Sorted tag vocabulary
/// ```
///
/// ## Filtering
///
/// ```bash
/// note-cards filter work               # Notes tagged "work", count as "1/3"
/// note-cards filter all                # Every note
/// ```
///
/// ## Card Page
///
/// ```bash
/// note-cards render -o cards.html      # Write the HTML card view
/// note-cards render --tag work         # Pre-select a tag
/// note-cards --json render             # Render payload instead of HTML
/// ```
///
/// ## Theme
///
/// ```bash
/// note-cards theme                     # Current theme (stored or system)
/// note-cards theme dark                # Store a theme
/// note-cards theme toggle              # Flip and store
/// ```
///
/// ## Surface Messages
///
/// ```bash
/// note-cards open notes/a.md                                   # Open in $VISUAL/$EDITOR
/// note-cards message '{"command":"openNote","filePath":"a.md"}'
/// note-cards message '{"command":"alert","text":"hello"}'
/// ```
///
/// ## Environment Variables
///
/// - `NOTE_CARDS_ROOT`: Directory to scan (default: current directory)
/// - `NOTE_CARDS_EXCERPT_LENGTH`: Excerpt length in characters (default: 120)
/// - `NOTE_CARDS_PREFERS_DARK`: System dark-mode signal (true/false)
/// - `NOTE_CARDS_LOG`: Log filter, e.g. `debug` or `note_cards=trace`
#[derive(Parser, Debug)]
#[command(name = "note-cards")]
#[command(version = "0.1.0")]
#[command(about = "Browse a folder of markdown notes as cards")]
pub struct Cli {
    /// Directory to scan (default: $NOTE_CARDS_ROOT or current directory)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Configuration file (default: <config dir>/note-cards/config.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for scripting)
    #[arg(short = 'j', long, global = true)]
    pub json: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every note with its title, tags and excerpt
    #[command(alias = "ls")]
    Scan,

    /// Print the sorted tag vocabulary
    Tags,

    /// Show only notes carrying a tag ("all" shows every note)
    Filter {
        /// Tag to select
        tag: String,
    },

    /// Write the HTML card page
    Render {
        /// Output file (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Tag selected when the page opens
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Show or change the stored theme
    Theme {
        /// light, dark or toggle (prints the current theme if omitted)
        action: Option<ThemeAction>,
    },

    /// Open a note in the editor
    Open {
        /// Path to the note
        path: PathBuf,
    },

    /// Dispatch a raw surface message
    Message {
        /// JSON object, e.g. {"command":"alert","text":"hi"}
        json: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Light,
    Dark,
    Toggle,
}
