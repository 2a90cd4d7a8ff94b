use clap::{Args, Parser, Subcommand, ValueEnum};

/// Output mode for command results.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Single-line JSON.
    Raw,
}

/// Top-level CLI parser for the `admissions` binary.
#[derive(Debug, Parser)]
#[command(name = "admissions", version, about = "Admissions application review")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Review server URL (overrides `client.base_url`)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the review server
    Serve {
        /// Address to bind (overrides `server.bind_addr`)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Review submitted applications
    Applications {
        #[command(subcommand)]
        action: ApplicationCommands,
    },

    /// Submit a new application through the public intake
    Submit(SubmitArgs),

    /// List partner universities
    Universities,
}

#[derive(Debug, Subcommand)]
pub enum ApplicationCommands {
    /// List applications, newest first
    List {
        /// Case-insensitive text to search for across all fields
        #[arg(long)]
        search: Option<String>,

        /// Only show this status (Submitted, Reviewing, Approved, Rejected, or ALL)
        #[arg(long)]
        status: Option<String>,
    },

    /// Show one application
    Show { id: String },

    /// Change the status of one application
    SetStatus { id: String, status: String },
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub whatsapp: Option<String>,
    #[arg(long)]
    pub university: Option<String>,
    #[arg(long)]
    pub nationality: Option<String>,
    #[arg(long)]
    pub current_country: Option<String>,
    #[arg(long)]
    pub degree: Option<String>,
    #[arg(long)]
    pub major: Option<String>,
    /// Preferred majors, in order (up to three)
    #[arg(long = "preferred-major", num_args = 1..=3)]
    pub preferred_majors: Vec<String>,
}
