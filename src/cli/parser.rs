use crate::export::{ExportFormat, ExportTarget};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for teamledger
/// Team finance ledger: attendance fines, bonuses and payments on SQLite
#[derive(Parser)]
#[command(
    name = "teamledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A team finance ledger: attendance-driven fines and bonuses, payments and derived balances on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Use another configuration file
    #[arg(global = true, long = "config", env = "TEAMLEDGER_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Shared password required by mutating commands when one is configured
    #[arg(
        global = true,
        long = "password",
        env = "TEAMLEDGER_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

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

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
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

    /// Print the internal operation log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the roster
    Player {
        #[command(subcommand)]
        action: PlayerAction,
    },

    /// Record practice sessions and attendance
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Record payments to or from the treasury
    Pay {
        #[command(subcommand)]
        action: PayAction,
    },

    /// Recompute every balance from the full history
    Recalc,

    /// Show the roster with current balances
    Balances {
        #[arg(long = "reasons", help = "Show the adjustments behind each balance")]
        reasons: bool,
    },

    /// Export balances or the ledger
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "what", value_enum, default_value = "balances")]
        what: ExportTarget,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing backup without asking")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum PlayerAction {
    /// Add a player to the roster
    Add {
        name: String,

        #[arg(long, help = "Role: M=Member, L=Leader, T=Treasurer (default: Member)")]
        role: Option<String>,

        #[arg(long, help = "Attendance group number")]
        group: Option<i64>,
    },

    /// Change a player's name, role or group
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, help = "Role: M=Member, L=Leader, T=Treasurer")]
        role: Option<String>,

        #[arg(long, conflicts_with = "no_group")]
        group: Option<i64>,

        #[arg(long = "no-group", help = "Remove the player from any group")]
        no_group: bool,
    },

    /// Remove a player with their attendance and payments
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List the roster
    List,
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// Record a session (overwrites an existing one on the same date)
    Add {
        /// Date of the session (YYYY-MM-DD)
        date: String,

        #[arg(long)]
        online: bool,

        #[arg(long)]
        settled: bool,

        #[arg(
            long = "mark",
            value_name = "ID=STATUS",
            help = "Attendance of one player: O=On Time, L=Late, I=Absent Informed, U=Absent Uninformed"
        )]
        marks: Vec<String>,
    },

    /// Change date, mode or attendance of a session
    Edit {
        date: String,

        #[arg(long = "date", value_name = "NEW_DATE")]
        new_date: Option<String>,

        #[arg(long, value_name = "BOOL")]
        online: Option<bool>,

        #[arg(long = "mark", value_name = "ID=STATUS")]
        marks: Vec<String>,
    },

    /// Delete a session and its attendance
    Del {
        date: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Toggle the settled flag of a session
    Settle { date: String },

    /// List sessions
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,
    },

    /// Show attendance and resulting adjustments of one session
    Show { date: String },
}

#[derive(Subcommand)]
pub enum PayAction {
    /// Record a payment (positive: player pays in, negative: payout)
    Add {
        player_id: i64,

        #[arg(allow_negative_numbers = true)]
        amount: i64,

        #[arg(long)]
        note: Option<String>,
    },

    /// Delete a payment
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List payments
    List {
        #[arg(long)]
        player: Option<i64>,
    },
}
