use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "tick")]
#[command(about = "A Supabase-backed todo list for the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quick capture: tick "pay rent"
    #[arg(trailing_var_arg = true)]
    pub title: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new todo
    #[command(alias = "new")]
    Add {
        /// Todo title
        title: Vec<String>,
        /// Optional longer description
        #[arg(short, long)]
        description: Option<String>,
        /// Due date (YYYY-MM-DD, defaults to today)
        #[arg(long, value_name = "DATE")]
        due: Option<String>,
    },
    /// List todos
    List {
        /// Date/status filter applied server-side
        #[arg(long, value_enum, default_value_t = ListFilter::All)]
        filter: ListFilter,
        /// Narrow the listing by title/description text
        #[arg(short, long)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit a todo's title, description, or due date
    Edit {
        /// Todo ID
        id: i64,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description (pass an empty string to clear it)
        #[arg(long)]
        description: Option<String>,
        /// New due date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        due: Option<String>,
    },
    /// Flip a todo between pending and completed
    #[command(alias = "done")]
    Toggle {
        /// Todo ID
        id: i64,
    },
    /// Delete a todo permanently
    Delete {
        /// Todo ID
        id: i64,
    },
    /// Manage the signed-in account
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ListFilter {
    All,
    Today,
    Week,
    Completed,
    Pending,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create an account and its profile row
    Signup {
        /// Account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Account password
        #[arg(long, value_name = "PASSWORD")]
        password: String,
        /// Display name stored on the profile
        #[arg(long, value_name = "NAME")]
        name: String,
    },
    /// Sign in with email/password and store the session in the keychain
    Login {
        /// Account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Account password
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Show who is signed in
    Status,
    /// Sign out and clear the stored session
    Logout,
}
