use std::path::Path;

use ldwizard_api::{apply_transformation_with, TransformationKind, TransformationSource};

use crate::cli::ConfigArgs;
use crate::config::Settings;
use crate::error::CliResult;
use crate::input::{build_config, write_output};

pub fn run(args: &ConfigArgs, output: Option<&Path>, settings: &Settings) -> CliResult<()> {
    let prepared = build_config(args, settings)?;
    let prefixes = prepared.prefix_map(settings);

    let turtle = apply_transformation_with(
        TransformationKind::Rml,
        TransformationSource::Matrix(prepared.table.into_matrix()),
        &prepared.config,
        &prefixes,
    )?;
    write_output(&turtle, output)
}
