use std::path::Path;

use ldwizard_api::{
    extract_config, read_csv, CsvProps, ExtractMode, MappingFormat, PrefixMap, RowTable,
    TransformationConfig,
};

use crate::cli::ConfigArgs;
use crate::commands::report_warnings;
use crate::config::Settings;
use crate::error::{CliError, CliResult};

/// Read a whole file, naming it in the error.
pub fn read_file(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| CliError::Input(format!("failed to read {}: {e}", path.display())))
}

/// Write `text` to `output`, or to stdout when no path is given.
pub fn write_output(text: &str, output: Option<&Path>) -> CliResult<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .map_err(|e| CliError::Input(format!("failed to write {}: {e}", path.display())))?;
            tracing::info!(path = %path.display(), bytes = text.len(), "wrote output");
            Ok(())
        }
        None => {
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
            Ok(())
        }
    }
}

/// CSV input plus the dialect it was read with and the name the mapping
/// refers to it by
pub struct CsvInput {
    pub table: RowTable,
    pub props: CsvProps,
    pub source_name: String,
}

pub fn read_csv_file(path: &Path, delimiter: Option<char>) -> CliResult<CsvInput> {
    let text = read_file(path)?;
    let (table, props) = read_csv(&text, &CsvProps { delimiter })
        .map_err(|e| CliError::Input(format!("{}: {e}", path.display())))?;
    let source_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(ldwizard_api::DEFAULT_SOURCE_FILE_NAME)
        .to_string();
    Ok(CsvInput {
        table,
        props,
        source_name,
    })
}

/// Fresh configuration for a CSV file: one unmapped column per header
pub fn initial_config(csv: &CsvInput, base_iri: &str) -> TransformationConfig {
    let mut config = TransformationConfig::from_headers(csv.table.headers(), &csv.source_name);
    config.base_iri = base_iri.to_string();
    config.csv_props = csv.props.clone();
    config
}

/// Configuration for `transform`/`generate` plus the inputs it came from
pub struct Prepared {
    pub config: TransformationConfig,
    pub table: RowTable,
    /// Prefixes declared by the `--mapping` document
    pub prefixes: Vec<(String, String)>,
}

impl Prepared {
    /// Output prefix table: settings first, then the mapping's own prefixes
    /// under names that are still free
    pub fn prefix_map(&self, settings: &Settings) -> PrefixMap {
        let mut prefixes = settings.prefix_map(&self.config.base_iri);
        prefixes.merge_discovered(self.prefixes.iter().map(|(p, ns)| (p.as_str(), ns.as_str())));
        prefixes
    }
}

/// Assemble the configuration for `transform`/`generate`
///
/// Layers, later ones winning: headers of the CSV file, the mapping document,
/// the JSON configuration, then the individual flags.
pub fn build_config(args: &ConfigArgs, settings: &Settings) -> CliResult<Prepared> {
    let csv = read_csv_file(&args.csv, args.delimiter)?;
    let mut config = initial_config(&csv, &settings.default_base_iri);
    let mut prefixes = Vec::new();

    if let Some(mapping) = &args.mapping {
        let mode = if settings.strict_extraction {
            ExtractMode::Strict
        } else {
            ExtractMode::BestEffort
        };
        let extraction = extract_config(
            &read_file(mapping)?,
            MappingFormat::from_path(mapping),
            &config,
            mode,
        )?;
        report_warnings(&extraction.warnings);
        config = extraction.config;
        prefixes = extraction.prefixes;
    }

    if let Some(path) = &args.config {
        config = TransformationConfig::from_json(&read_file(path)?).map_err(|e| {
            CliError::Input(format!("invalid configuration {}: {e}", path.display()))
        })?;
        if config.csv_props.delimiter.is_none() {
            config.csv_props = csv.props.clone();
        }
    }

    if let Some(base_iri) = &args.base_iri {
        config.base_iri = base_iri.clone();
    }
    if let Some(class) = &args.class {
        config.resource_class = Some(class.clone());
    }
    if let Some(key) = &args.key {
        let index = config.column_index(key).ok_or_else(|| {
            CliError::Usage(format!("--key: no column named '{key}' in {}", args.csv.display()))
        })?;
        config.key = Some(index);
    }

    tracing::info!(
        columns = config.column_configuration.len(),
        key = ?config.key,
        rows = csv.table.num_rows(),
        "configuration ready"
    );
    Ok(Prepared {
        config,
        table: csv.table,
        prefixes,
    })
}
