use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use xrm::Database;

#[derive(Parser)]
#[command(name = "xrm")]
#[command(about = "Query and manipulate X resource database files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a resource in a database file
    Query {
        /// Path to the resource file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Fully qualified resource name, e.g. "xterm.vt100.background"
        #[arg(value_name = "NAME")]
        name: String,

        /// Fully qualified resource class, e.g. "XTerm.VT100.Background"
        #[arg(short, long)]
        class: Option<String>,

        /// Print the value converted to an integer
        #[arg(long)]
        as_long: bool,

        /// Print the value converted to a bool
        #[arg(long, conflicts_with = "as_long")]
        as_bool: bool,
    },

    /// Load a file (expanding includes) and print the canonical form
    Dump {
        /// Path to the resource file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Merge resource files left to right and print the result
    Merge {
        /// Input files; later files override earlier ones
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            file,
            name,
            class,
            as_long,
            as_bool,
        } => cmd_query(file, name, class, as_long, as_bool),
        Commands::Dump { file } => cmd_dump(file),
        Commands::Merge { files } => cmd_merge(files),
    }
}

fn load(file: &PathBuf) -> Result<Database> {
    Database::from_file(file).with_context(|| format!("failed to load {}", file.display()))
}

fn cmd_query(
    file: PathBuf,
    name: String,
    class: Option<String>,
    as_long: bool,
    as_bool: bool,
) -> Result<()> {
    let db = load(&file)?;
    let class = class.as_deref();

    if as_bool {
        // Absent resources read as false by convention, so this always
        // prints a value.
        println!("{}", db.lookup_bool(&name, class));
        return Ok(());
    }

    if as_long {
        match db.lookup_long(&name, class) {
            Some(value) => println!("{}", value),
            None => std::process::exit(1),
        }
        return Ok(());
    }

    match db.lookup(&name, class)? {
        Some(value) => println!("{}", value),
        None => std::process::exit(1),
    }
    Ok(())
}

fn cmd_dump(file: PathBuf) -> Result<()> {
    let db = load(&file)?;
    print!("{}", db);
    Ok(())
}

fn cmd_merge(files: Vec<PathBuf>) -> Result<()> {
    let mut merged = Database::new();
    for file in &files {
        merged.combine(load(file)?, true);
    }
    print!("{}", merged);
    Ok(())
}
