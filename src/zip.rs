use std::path::Path;

use anyhow::{Context, Result, anyhow};
use encoding_rs::Encoding;
use log::info;

use crate::{cli::ZipArgs, io_utils, merge, render, schema::Schema, table::Table};

pub fn execute(args: &ZipArgs) -> Result<()> {
    if io_utils::is_dash(&args.left) && io_utils::is_dash(&args.right) {
        return Err(anyhow!("Only one of --left and --right may read from stdin"));
    }
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let left = load_side(&args.left, args.left_meta.as_deref(), args.delimiter, encoding)?;
    let right = load_side(
        &args.right,
        args.right_meta.as_deref(),
        args.delimiter,
        encoding,
    )?;

    let zipped = merge::zip_columns(&left, &right)
        .map_err(|err| anyhow!("Cannot zip {:?} with {:?}: {err}", args.left, args.right))?;

    if args.table {
        render::print_table(&zipped);
    } else {
        let fallback = io_utils::resolve_input_delimiter(&args.left, args.delimiter);
        let delimiter =
            io_utils::resolve_output_delimiter(args.output.as_deref(), args.delimiter, fallback);
        io_utils::write_table(&zipped, args.output.as_deref(), delimiter)?;
    }
    info!(
        "Wrote {} row(s) across {} column(s)",
        zipped.row_count(),
        zipped.column_count()
    );
    Ok(())
}

fn load_side(
    path: &Path,
    meta: Option<&Path>,
    delimiter: Option<u8>,
    encoding: &'static Encoding,
) -> Result<Table> {
    let schema = match meta {
        Some(meta) => {
            Some(Schema::load(meta).with_context(|| format!("Loading schema from {meta:?}"))?)
        }
        None => None,
    };
    let delimiter = io_utils::resolve_input_delimiter(path, delimiter);
    let table = io_utils::read_table(path, schema.as_ref(), delimiter, encoding)
        .with_context(|| format!("Loading {path:?}"))?;
    info!("✓ Loaded {} row(s) from {:?}", table.row_count(), path);
    Ok(table)
}
