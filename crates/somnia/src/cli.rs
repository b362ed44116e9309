use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "somnia")]
#[command(version)]
#[command(about = "Dream journal with generated insights")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a dream
    Add {
        /// What you dreamt
        content: String,

        /// Mark the dream as lucid
        #[arg(long)]
        lucid: bool,

        /// Emotion as label:intensity (0-10), repeatable
        #[arg(short, long = "emotion")]
        emotions: Vec<String>,

        /// Symbol as name or name:meaning, repeatable
        #[arg(short, long = "symbol")]
        symbols: Vec<String>,

        /// Main theme of the dream
        #[arg(short, long)]
        theme: Option<String>,
    },

    /// List recorded dreams, newest first
    List {
        /// Show at most this many
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Show journal statistics
    Stats,

    /// Show insights, regenerating them when the journal has grown
    Insights {
        /// Regenerate even if the cached insights are current
        #[arg(long)]
        force: bool,
    },

    /// Print dream quotes
    Quote {
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },

    /// Show journal and insight status as JSON
    Status,

    /// Print version information
    Version,
}
