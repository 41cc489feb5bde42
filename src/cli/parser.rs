use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for hourledger
/// Monthly hour-allocation ledger backed by SQLite
#[derive(Parser)]
#[command(
    name = "hourledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Budget hours per month, track worked time and transfer unused budget (SQLite)",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Caller role: customer, developer or admin (default from config)
    #[arg(global = true, long = "role")]
    pub role: Option<String>,

    /// Caller user id, used as owner of logged time (default from config)
    #[arg(global = true, long = "user")]
    pub user: Option<i64>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration file or open it in an editor
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Available, worked and remaining hours for every month of a year
    Overview {
        /// Year (default: current year)
        #[arg(long, short)]
        year: Option<i32>,

        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },

    /// Set the available hours of a month (admin)
    Allocate {
        /// Month (YYYY-MM)
        period: String,

        /// Available hours (>= 0)
        #[arg(allow_negative_numbers = true)]
        hours: f64,
    },

    /// Move available hours from one month to another (admin)
    Transfer {
        /// Source month (YYYY-MM)
        from: String,

        /// Destination month (YYYY-MM)
        to: String,

        /// Hours to move (> 0)
        #[arg(allow_negative_numbers = true)]
        hours: f64,
    },

    /// Total hours worked in a month
    Worked {
        /// Month (YYYY-MM)
        period: String,

        #[arg(long, help = "Print JSON instead of text")]
        json: bool,
    },

    /// List every stored allocation (admin)
    Allocations {
        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },

    /// Log and maintain time entries
    Hours {
        #[command(subcommand)]
        action: HoursAction,
    },

    /// Export a year overview
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute output path")]
        file: String,

        /// Year (default: current year)
        #[arg(long, short)]
        year: Option<i32>,

        #[arg(long, short = 'f', help = "Overwrite an existing file")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum HoursAction {
    /// Log time against a work order (developer, admin)
    Add {
        /// Date (YYYY-MM-DD)
        date: String,

        #[arg(long, default_value_t = 0)]
        hours: u32,

        #[arg(long, default_value_t = 0)]
        minutes: u32,

        #[arg(long = "work-order")]
        work_order: i64,
    },

    /// List logged time entries
    List {
        #[arg(long, help = "Only entries of this month (YYYY-MM)")]
        period: Option<String>,
    },

    /// Change a time entry (owner or admin)
    Edit {
        id: i64,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        hours: Option<u32>,

        #[arg(long)]
        minutes: Option<u32>,

        #[arg(long = "work-order")]
        work_order: Option<i64>,
    },

    /// Delete a time entry (owner or admin)
    Del { id: i64 },

    /// Total time logged against a work order
    Total {
        #[arg(long = "work-order")]
        work_order: i64,

        #[arg(long, help = "Print JSON instead of text")]
        json: bool,
    },
}
