use std::path::Path;

use ldwizard_api::{execute_rml, load_mapping, to_turtle, MappingFormat};

use crate::config::Settings;
use crate::error::CliResult;
use crate::input::{read_csv_file, read_file, write_output};

/// Run a mapping document as written over one CSV file
pub fn run(
    mapping: &Path,
    csv: &Path,
    delimiter: Option<char>,
    base_iri: Option<&str>,
    output: Option<&Path>,
    settings: &Settings,
) -> CliResult<()> {
    let csv = read_csv_file(csv, delimiter)?;
    let mapping = load_mapping(&read_file(mapping)?, MappingFormat::from_path(mapping))?;
    let quads = execute_rml(&mapping, &csv.table)?;

    let mut prefixes = settings.prefix_map(base_iri.unwrap_or(&settings.default_base_iri));
    prefixes.merge_discovered(
        mapping
            .prefixes
            .iter()
            .map(|(p, ns)| (p.as_str(), ns.as_str())),
    );
    write_output(&to_turtle(quads, &prefixes)?, output)
}
