//! normstore command-line tool
//!
//! Usage:
//!   normstore parse response.json --pretty
//!   normstore compose --schema schema.json entity.json
//!   normstore merge newest.json older.json
//!
//! Input files default to stdin; output goes to stdout and logs to stderr.

use anyhow::Result;
use clap::{Parser, Subcommand};
use normstore_cli::{compose_document, merge_documents, parse_document, read_json, render};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "normstore")]
#[command(about = "Normalize, compose and merge hypermedia API documents")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Flatten a response document into a normalized store
    Parse {
        /// Response document (stdin when omitted)
        file: Option<PathBuf>,

        /// Key entities by id and this meta member
        #[arg(long)]
        revision_key: Option<String>,

        #[arg(long)]
        pretty: bool,
    },
    /// Build a request document from a flat entity
    Compose {
        /// Composition schema
        #[arg(short, long)]
        schema: PathBuf,

        /// Flat entity (stdin when omitted)
        file: Option<PathBuf>,

        /// Emit `data` as a single resource
        #[arg(long)]
        single: bool,

        #[arg(long)]
        pretty: bool,
    },
    /// Merge two normalized stores, the first winning collisions
    Merge {
        primary: PathBuf,
        secondary: PathBuf,

        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let (output, pretty) = match args.command {
        Command::Parse {
            file,
            revision_key,
            pretty,
        } => {
            let document = read_json(file.as_deref())?;
            (parse_document(&document, revision_key.as_deref())?, pretty)
        }
        Command::Compose {
            schema,
            file,
            single,
            pretty,
        } => {
            let schema = read_json(Some(schema.as_path()))?;
            let entity = read_json(file.as_deref())?;
            (compose_document(&entity, &schema, single)?, pretty)
        }
        Command::Merge {
            primary,
            secondary,
            pretty,
        } => {
            let primary = read_json(Some(primary.as_path()))?;
            let secondary = read_json(Some(secondary.as_path()))?;
            (merge_documents(&primary, &secondary)?, pretty)
        }
    };

    println!("{}", render(&output, pretty)?);
    Ok(())
}
