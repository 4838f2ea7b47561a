use std::path::Path;

use ldwizard_api::generate_rml;

use crate::cli::ConfigArgs;
use crate::config::Settings;
use crate::error::CliResult;
use crate::input::{build_config, write_output};

pub fn run(args: &ConfigArgs, output: Option<&Path>, settings: &Settings) -> CliResult<()> {
    let prepared = build_config(args, settings)?;
    let rml = generate_rml(&prepared.config)?;
    write_output(&rml, output)
}
