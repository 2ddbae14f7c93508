use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for piecelog
/// CLI application to record piecework production into a spreadsheet store
#[derive(Parser)]
#[command(
    name = "piecelog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record piecework production entries: scan or pick a job, enter a quantity, submit",
    long_about = None
)]
pub struct Cli {
    /// Override journal path (useful for tests or a custom journal)
    #[arg(global = true, long = "journal")]
    pub journal: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the local journal
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
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

    /// Show the reference catalog fetched from the store
    Catalog {
        #[arg(long = "workers", help = "List workers")]
        workers: bool,

        #[arg(long = "products", help = "List the products that can be picked")]
        products: bool,

        #[arg(long = "processes", help = "List processes (narrowed by --product)")]
        processes: bool,

        #[arg(long = "parts", help = "List part numbers (narrowed by --product/--process)")]
        parts: bool,

        #[arg(long = "product", help = "Product used to narrow the lists")]
        product: Option<String>,

        #[arg(long = "process", help = "Process used to narrow the lists")]
        process: Option<String>,
    },

    /// Submit one production entry
    Add {
        #[arg(long = "worker", short = 'w', help = "Worker code (default: config default_worker)")]
        worker: Option<String>,

        #[arg(long = "job", short = 'j', conflicts_with = "scan", help = "Job code")]
        job: Option<String>,

        #[arg(long = "scan", help = "Read the job code from the scanner (stdin)")]
        scan: bool,

        #[arg(long = "product", conflicts_with_all = ["job", "scan"], help = "Product (when no job code is given)")]
        product: Option<String>,

        #[arg(long = "process", conflicts_with_all = ["job", "scan"], help = "Process (when no job code is given)")]
        process: Option<String>,

        #[arg(long = "part", conflicts_with_all = ["job", "scan"], help = "Part number (optional)")]
        part: Option<String>,

        #[arg(long = "date", short = 'd', help = "Work date (YYYY-MM-DD, default today)")]
        date: Option<String>,

        #[arg(long = "qty", short = 'q', allow_hyphen_values = true, help = "Quantity (decimals allowed)")]
        qty: String,
    },

    /// Interactive entry loop for rapid successive entries
    Session {
        #[arg(long = "worker", short = 'w', help = "Worker code to start with")]
        worker: Option<String>,

        #[arg(long = "date", short = 'd', help = "Work date to start with (YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// List journalled submissions
    List {
        #[arg(long = "date", short = 'd', help = "Only records for this work date (YYYY-MM-DD)")]
        date: Option<String>,
    },

    /// Export the journal
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "date", short = 'd', help = "Only records for this work date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite an existing file")]
        force: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
