use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::info;

use crate::{
    cli::ConcatArgs,
    io_utils,
    merge::{self, ConcatError},
    render,
    schema::Schema,
};

pub fn execute(args: &ConcatArgs) -> Result<()> {
    let first = args
        .inputs
        .first()
        .ok_or_else(|| anyhow!("At least one input file must be provided"))?;
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    if !args.input_metas.is_empty() && args.input_metas.len() != args.inputs.len() {
        return Err(anyhow!(
            "Got {} --input-meta file(s) for {} input(s); pass one per input or none",
            args.input_metas.len(),
            args.inputs.len()
        ));
    }
    let shared = args.meta.as_deref().map(load_schema).transpose()?;

    let mut tables = Vec::with_capacity(args.inputs.len());
    for (idx, input) in args.inputs.iter().enumerate() {
        let own = args.input_metas.get(idx).map(|path| load_schema(path)).transpose()?;
        let schema = own.as_ref().or(shared.as_ref());
        let delimiter = io_utils::resolve_input_delimiter(input, args.delimiter);
        let table = io_utils::read_table(input, schema, delimiter, encoding)
            .with_context(|| format!("Loading {input:?}"))?;
        info!("✓ Loaded {} row(s) from {:?}", table.row_count(), input);
        tables.push(table);
    }

    let merged = merge::concat_all(&tables).map_err(|err| describe_failure(err, &args.inputs))?;

    if args.table {
        render::print_table(&merged);
    } else {
        let fallback = io_utils::resolve_input_delimiter(first, args.delimiter);
        let delimiter =
            io_utils::resolve_output_delimiter(args.output.as_deref(), args.delimiter, fallback);
        io_utils::write_table(&merged, args.output.as_deref(), delimiter)?;
    }
    info!("Wrote {} data row(s) to output", merged.row_count());
    Ok(())
}

fn load_schema(path: &Path) -> Result<Schema> {
    Schema::load(path).with_context(|| format!("Loading schema from {path:?}"))
}

fn describe_failure(err: ConcatError, inputs: &[PathBuf]) -> anyhow::Error {
    match &err {
        ConcatError::Schema {
            table_index,
            source,
        } => {
            let path = inputs.get(*table_index).map(PathBuf::as_path);
            let first = inputs.first().map(PathBuf::as_path);
            anyhow!(
                "{} cannot be appended to {}: {source}",
                display_path(path),
                display_path(first)
            )
        }
        ConcatError::Empty => anyhow::Error::new(err),
    }
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| format!("{p:?}"))
        .unwrap_or_else(|| "<unknown>".to_string())
}
