use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;

use crate::{
    cli::{CheckArgs, ReportFormat},
    decide::{Divergence, SchemaDecision, decide_schema},
    merge::SchemaMismatchError,
    schema::Schema,
};

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    matches: bool,
    left: &'a Schema,
    right: &'a Schema,
    #[serde(skip_serializing_if = "Option::is_none")]
    divergence: Option<Divergence>,
}

pub fn execute(args: &CheckArgs) -> Result<()> {
    let left = Schema::load(&args.left_meta)
        .with_context(|| format!("Loading schema from {:?}", args.left_meta))?;
    let right = Schema::load(&args.right_meta)
        .with_context(|| format!("Loading schema from {:?}", args.right_meta))?;
    debug!("Checking {left} against {right}");

    let decision = decide_schema(&left, &right);
    let report = CheckReport {
        matches: decision.is_match(),
        left: &left,
        right: &right,
        divergence: decision.divergence(),
    };
    match args.format {
        ReportFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Serializing check report")?
        ),
        ReportFormat::Text => println!("{}", render_text(&decision)),
    }

    match decision {
        SchemaDecision::Match(witness) => {
            info!("✓ Schemas match across {} column(s)", witness.width());
            Ok(())
        }
        SchemaDecision::Mismatch(divergence) => Err(SchemaMismatchError { divergence }.into()),
    }
}

fn render_text(decision: &SchemaDecision<'_>) -> String {
    match decision {
        SchemaDecision::Match(witness) => format!("match {}", witness.schema()),
        SchemaDecision::Mismatch(divergence) => format!("mismatch: {divergence}"),
    }
}
