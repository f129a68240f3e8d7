use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gitling::commands;
use gitling::config::Config;
use gitling::error::Error;
use gitling::store::Store;

#[derive(Parser, Debug)]
#[command(name = "gitling")]
#[command(about = "Minimal content-addressed version-control client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an empty repository in the current directory
    Init,

    /// Print an object's payload
    #[command(name = "cat-file")]
    CatFile {
        /// Pretty-print the object contents
        #[arg(short = 'p')]
        pretty: bool,
        digest: String,
    },

    /// Store a file as a blob and print its digest
    #[command(name = "hash-object")]
    HashObject {
        /// Write the object into the store
        #[arg(short = 'w')]
        write: bool,
        file: PathBuf,
    },

    /// Encode the current directory as a tree and print its digest
    #[command(name = "write-tree")]
    WriteTree,

    /// List a tree object's entries
    #[command(name = "ls-tree")]
    LsTree {
        #[arg(long)]
        name_only: bool,
        digest: String,
    },

    /// Write a commit object and print its digest
    #[command(name = "commit-tree")]
    CommitTree {
        tree: String,
        #[arg(short = 'p')]
        parent: Option<String>,
        #[arg(short = 'm')]
        message: String,
    },

    /// Clone a remote repository over Smart-HTTP
    Clone { url: String, directory: PathBuf },
}

fn main() -> Result<()> {
    // Log to stderr; stdout belongs to command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let mut stdout = io::stdout();

    match cli.command {
        Commands::Init => commands::init::handle(Path::new("."), &config, &mut stdout),
        Commands::CatFile { pretty, digest } => {
            if !pretty {
                return Err(Error::BadArguments("cat-file requires -p".to_string()).into());
            }
            commands::cat_file::handle(&Store::new(".git"), &digest, &mut stdout)
        }
        Commands::HashObject { write, file } => {
            if !write {
                return Err(Error::BadArguments("hash-object requires -w".to_string()).into());
            }
            commands::hash_object::handle(&Store::new(".git"), &file, &mut stdout)
        }
        Commands::WriteTree => {
            commands::write_tree::handle(&Store::new(".git"), Path::new("."), &mut stdout)
        }
        Commands::LsTree { name_only, digest } => {
            commands::ls_tree::handle(&Store::new(".git"), &digest, name_only, &mut stdout)
        }
        Commands::CommitTree {
            tree,
            parent,
            message,
        } => commands::commit_tree::handle(
            &Store::new(".git"),
            &config,
            &tree,
            parent.as_deref(),
            &message,
            &mut stdout,
        ),
        Commands::Clone { url, directory } => commands::clone::handle(&config, &url, &directory),
    }
}
