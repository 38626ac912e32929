use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about = "Merge CSV tables only when their schemas line up", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decide whether two schema files describe the same column layout
    Check(CheckArgs),
    /// Stack the rows of several CSV files that share one schema
    Concat(ConcatArgs),
    /// Combine the columns of two CSV files with the same number of rows
    Zip(ZipArgs),
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Schema file for the left table
    #[arg(long = "left-meta")]
    pub left_meta: PathBuf,
    /// Schema file for the right table
    #[arg(long = "right-meta")]
    pub right_meta: PathBuf,
    /// Output format for the decision
    #[arg(long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

#[derive(Debug, Args)]
pub struct ConcatArgs {
    /// CSV files to concatenate, in order
    #[arg(short = 'i', long = "input", required = true, action = clap::ArgAction::Append)]
    pub inputs: Vec<PathBuf>,
    /// Schema file for inputs without their own --input-meta
    #[arg(short, long)]
    pub meta: Option<PathBuf>,
    /// Schema file for one input, paired with the -i values in order
    #[arg(long = "input-meta", action = clap::ArgAction::Append)]
    pub input_metas: Vec<PathBuf>,
    /// Destination CSV file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding for input files (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Render the result as an elastic table instead of CSV
    #[arg(long = "table")]
    pub table: bool,
}

#[derive(Debug, Args)]
pub struct ZipArgs {
    /// Left CSV input; its columns come first
    #[arg(long = "left")]
    pub left: PathBuf,
    /// Right CSV input
    #[arg(long = "right")]
    pub right: PathBuf,
    /// Schema file for the left input
    #[arg(long = "left-meta")]
    pub left_meta: Option<PathBuf>,
    /// Schema file for the right input
    #[arg(long = "right-meta")]
    pub right_meta: Option<PathBuf>,
    /// Destination CSV file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding for input files (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Render the result as an elastic table instead of CSV
    #[arg(long = "table")]
    pub table: bool,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
