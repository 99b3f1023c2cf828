use clap::{Parser, Subcommand};
use emprecord::{Config, Employee, Gateway, SearchCriteria, Shell, Store, format_table};
use eyre::{Context, Result};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "emprecord")]
#[command(about = "Employee record manager - add, modify, search and count employee records")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to the employee file (overrides the config file)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to a YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Shell,

    /// Print every record
    List,

    /// Print the number of records
    Count,

    /// Print records matching all given criteria (case-insensitive, exact)
    Search {
        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,

        #[arg(long, default_value = "")]
        department: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(file) = cli.file {
        config.data_file = file;
    }
    if cli.no_color {
        config.color = false;
    }

    // Setup tracing; stderr keeps the menu on stdout readable
    tracing_subscriber::fmt()
        .with_max_level(config.level()?)
        .with_writer(io::stderr)
        .init();

    if !config.color {
        colored::control::set_override(false);
    }

    let gateway = Gateway::new(&config.data_file);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let _lock = gateway
                .lock()
                .with_context(|| format!("Cannot open {}", gateway.path().display()))?;
            let mut store = gateway.load_store();

            let stdin = io::stdin();
            Shell::new(&mut store, &gateway, stdin.lock(), io::stdout()).run()?;
        }
        Commands::List => {
            let store = load_read_only(&gateway)?;
            print_records(store.all().iter().collect());
        }
        Commands::Count => {
            let store = load_read_only(&gateway)?;
            println!("Total number of records: {}", store.count());
        }
        Commands::Search {
            first_name,
            last_name,
            department,
        } => {
            let store = load_read_only(&gateway)?;
            let criteria = SearchCriteria::new(&first_name, &last_name, &department);
            print_records(store.search(&criteria));
        }
    }

    Ok(())
}

/// Load without the fallback: a bad file is an error here, never moved aside
fn load_read_only(gateway: &Gateway) -> Result<Store> {
    let employees = gateway
        .load()
        .with_context(|| format!("Failed to load {}", gateway.path().display()))?;
    Ok(Store::from_records(employees))
}

fn print_records(records: Vec<&Employee>) {
    if records.is_empty() {
        println!("No records found.");
    } else {
        print!("{}", format_table(&records));
    }
}
