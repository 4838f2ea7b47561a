use std::path::Path;

use ldwizard_api::{extract_config, ExtractMode, MappingFormat, DEFAULT_BASE_IRI};

use crate::commands::report_warnings;
use crate::error::CliResult;
use crate::input::{initial_config, read_csv_file, read_file, write_output};

pub fn run(
    mapping: &Path,
    csv: &Path,
    delimiter: Option<char>,
    strict: bool,
    output: Option<&Path>,
) -> CliResult<()> {
    let csv = read_csv_file(csv, delimiter)?;
    let current = initial_config(&csv, DEFAULT_BASE_IRI);
    let mode = if strict {
        ExtractMode::Strict
    } else {
        ExtractMode::BestEffort
    };

    let extraction = extract_config(
        &read_file(mapping)?,
        MappingFormat::from_path(mapping),
        &current,
        mode,
    )?;
    report_warnings(&extraction.warnings);

    write_output(&extraction.config.to_json_pretty()?, output)
}
