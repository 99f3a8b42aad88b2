//! Main packer executable, to be used as cli tool. For help run this command
//! with `-h`.

#![warn(missing_docs)]

use anyhow::{Context, Error};
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::{
    io::stdin,
    path::{Path, PathBuf},
    process::ExitCode,
};
use webroot_pack_packer::{
    common::{INDEX_DOCUMENT, NAME_DB_FILE_NAME, NOT_FOUND_PATH, OBJECT_DB_FILE_NAME},
    driver::Driver,
    name_index::{IndexFormat, NameIndex},
    object_store::ObjectStore,
    output::OutputPaths,
    resolve::{PathResolver, ResolveOptions},
    scan,
};

/// Reads request uris from stdin (one per line), resolves them under web root
/// and packs their files into an object blob and a C name index.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Arguments {
    /// Directory uris are resolved against.
    #[arg(default_value = ".")]
    web_root: PathBuf,

    /// Output object blob path.
    #[arg(long, default_value = OBJECT_DB_FILE_NAME)]
    object_db: PathBuf,

    /// Output name index path.
    #[arg(long, default_value = NAME_DB_FILE_NAME)]
    name_db: PathBuf,

    /// File served for uris that can't be resolved. Must exist if any uri is
    /// not resolved.
    #[arg(long, default_value = NOT_FOUND_PATH)]
    not_found: PathBuf,

    /// Document looked up when uri resolves to a directory. May be repeated,
    /// first existing wins.
    #[arg(long = "index-document", default_value = INDEX_DOCUMENT)]
    index_documents: Vec<String>,

    /// Wrap index entries in a `static const struct webroot_name <NAME>[]`
    /// definition instead of emitting bare initializers.
    #[arg(long, value_name = "NAME")]
    array_name: Option<String>,

    /// Pack every file found in web root instead of reading uris from stdin.
    #[arg(long)]
    scan: bool,
}

fn main() -> ExitCode {
    let arguments = Arguments::parse();

    match run(arguments) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("webroot-pack-packer: {:#}", error);
            ExitCode::from(exit_code(&error))
        }
    }
}

// build errors carry their own exit code, anything else is a generic failure
fn exit_code(error: &Error) -> u8 {
    error
        .downcast_ref::<webroot_pack_packer::error::Error>()
        .map_or(1, webroot_pack_packer::error::Error::exit_code)
}

fn run(arguments: Arguments) -> Result<(), Error> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
        .context("logger")?;

    // normalizes trailing separators
    let web_root = arguments.web_root.components().collect::<PathBuf>();
    log::info!("web root is {}", web_root.display());

    let mut driver = Driver::new(
        PathResolver::new(
            web_root.clone(),
            ResolveOptions {
                index_documents: arguments.index_documents,
            },
        ),
        ObjectStore::with_not_found_path(arguments.not_found),
        NameIndex::new(),
    );

    if arguments.scan {
        let uris = scan::search(&web_root, &scan::SearchOptions::default())?;
        driver.register_all(uris.iter().map(String::as_str))?;
    } else {
        driver.register_lines(stdin().lock(), Path::new("<stdin>"))?;
    }

    driver.finish(
        &OutputPaths {
            object_db: arguments.object_db,
            name_db: arguments.name_db,
        },
        &IndexFormat {
            array_name: arguments.array_name,
        },
    )?;

    Ok(())
}
