pub mod check;
pub mod cli;
pub mod concat;
pub mod data;
pub mod decide;
pub mod io_utils;
pub mod merge;
pub mod render;
pub mod rows;
pub mod schema;
pub mod table;
pub mod zip;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug};

use crate::cli::{Cli, Commands};

pub use crate::decide::{
    Decision, Divergence, SchemaDecision, SchemaWitness, decide_column_type, decide_schema,
};
pub use crate::merge::{
    ConcatError, RowCountMismatchError, SchemaMismatchError, concat_all, concat_tables,
    zip_columns,
};
pub use crate::schema::{ColumnMeta, ColumnType, Schema};
pub use crate::table::{Row, Table, TableError};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("schema_merge", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    debug!("Parsed command line: {:?}", cli.command);
    match cli.command {
        Commands::Check(args) => check::execute(&args),
        Commands::Concat(args) => concat::execute(&args),
        Commands::Zip(args) => zip::execute(&args),
    }
}
