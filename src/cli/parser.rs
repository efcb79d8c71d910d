use crate::export::{ExportFormat, ExportTarget};
use crate::models::{Priority, Recurrence, WeekFilter, WeekParity};
use clap::{Parser, Subcommand};

/// Command-line interface definition for echampo
/// Student planner: subjects, grades and averages, weekly timetable, todos
#[derive(Parser)]
#[command(
    name = "echampo",
    version = env!("CARGO_PKG_VERSION"),
    about = "A student planner CLI: grades and averages, weekly timetable and todos, stored in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (built-in defaults, no config file read or written)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init {
        #[arg(long = "empty", help = "Do not create the default subjects")]
        empty: bool,
    },

    /// Manage the configuration file (view, check, migrate or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

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

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage subjects
    Subject {
        #[command(subcommand)]
        action: SubjectAction,
    },

    /// Manage grades
    Grade {
        #[command(subcommand)]
        action: GradeAction,
    },

    /// Show subject and general averages, or simulate a new grade
    Average {
        #[arg(long, help = "Subject id or name")]
        subject: Option<String>,

        #[arg(
            long,
            value_name = "VALUE/MAX[xCOEF]",
            requires = "subject",
            help = "Preview averages with a hypothetical grade, e.g. 15/20x2"
        )]
        simulate: Option<String>,
    },

    /// Manage the weekly timetable
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },

    /// Manage todos
    Todo {
        #[command(subcommand)]
        action: TodoAction,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Write a .zip archive instead of a plain copy")]
        compress: bool,
    },

    /// Export grades, averages, timetable or todos
    Export {
        #[arg(long, value_enum, default_value = "grades")]
        what: ExportTarget,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute path of the output file")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter grades by year/month/day or a custom range (A:B)"
        )]
        range: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite the output file without asking")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Add a subject
    Add {
        name: String,

        #[arg(long, help = "#RRGGBB or a palette name (Rose, Ocean, Mint, …)")]
        color: Option<String>,

        #[arg(long = "coef", help = "Weight in the general average (default 1)")]
        coefficient: Option<f64>,
    },

    /// Rename, recolor or reweight a subject
    Edit {
        /// Subject id or name
        subject: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        color: Option<String>,

        #[arg(long = "coef")]
        coefficient: Option<f64>,
    },

    /// Delete a subject with its grades and timetable slots
    Del {
        /// Subject id or name
        subject: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List subjects with their averages
    List,

    /// Create the default subjects (only when there are none)
    Seed,
}

#[derive(Subcommand)]
pub enum GradeAction {
    /// Record a grade
    Add {
        /// Subject id or name
        subject: String,

        /// Points obtained
        #[arg(allow_negative_numbers = true)]
        value: f64,

        #[arg(long, help = "Maximum points (default from config, 20)")]
        max: Option<f64>,

        #[arg(long = "coef", default_value_t = 1.0)]
        coefficient: f64,

        #[arg(long = "desc")]
        description: Option<String>,

        #[arg(long, help = "YYYY-MM-DD, today or tomorrow (default today)")]
        date: Option<String>,
    },

    /// Delete a grade by id
    Del { id: i64 },

    /// List grades, newest first
    List {
        #[arg(long, help = "Subject id or name")]
        subject: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Add a timetable slot
    Add {
        /// Subject id or name
        subject: String,

        /// Day: 0-6 (Monday first) or a name (mon, lundi, …)
        day: String,

        /// Start time HH:MM
        start: String,

        #[arg(long, help = "End time HH:MM (default start + 1h)")]
        end: Option<String>,

        #[arg(long, value_enum, default_value = "both")]
        week: WeekParity,

        #[arg(long, value_enum, default_value = "weekly")]
        recurrence: Recurrence,
    },

    /// Move a slot to another day and hour, keeping its length
    Move {
        id: i64,

        /// Target day: 0-6 or a name
        day: String,

        /// Target start hour: 14 or 14:00
        hour: String,
    },

    /// Delete a slot by id
    Del { id: i64 },

    /// Show the weekly grid
    Show {
        #[arg(long, value_enum, help = "all, week1 or week2 (default from config)")]
        week: Option<WeekFilter>,
    },

    /// List slots by day and time
    List,
}

#[derive(Subcommand)]
pub enum TodoAction {
    /// Add a todo
    Add {
        title: String,

        #[arg(long, value_enum, default_value = "medium")]
        priority: Priority,

        #[arg(long, help = "YYYY-MM-DD, today or tomorrow")]
        due: Option<String>,
    },

    /// Toggle a todo between done and not done
    Done { id: i64 },

    /// Edit title and formatting (style flags toggle)
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        bold: bool,

        #[arg(long)]
        italic: bool,

        #[arg(long)]
        underline: bool,

        #[arg(long, help = "#RRGGBB or Yellow, Green, Blue, Pink, Orange")]
        highlight: Option<String>,

        #[arg(long = "no-highlight", conflicts_with = "highlight")]
        no_highlight: bool,
    },

    /// Delete a todo by id
    Del { id: i64 },

    /// List todos (completed ones only with --all)
    List {
        #[arg(long, help = "Include completed todos")]
        all: bool,
    },
}
