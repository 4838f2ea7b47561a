use std::path::Path;

use crate::config::SETTINGS_FILE;
use crate::error::{CliError, CliResult};

const DEFAULT_SETTINGS_TEMPLATE: &str = r#"# LD Wizard settings
#
# Every key is optional. Command line flags override these values.

# Base IRI for generated subjects when no mapping or configuration sets one.
# default_base_iri = "https://w3id.org/my-ldwizard/"

# Fail `extract` (and `--mapping` preloading) on rules that reference
# columns missing from the CSV header instead of skipping them.
# strict_extraction = false

# Extra prefixes for Turtle output, added after the built-in set
# (rdf, rdfs, xsd, schema, ... and `:` for the base IRI).
# [[prefixes]]
# prefix = "ex"
# iri = "http://example.org/"
"#;

pub fn run(force: bool) -> CliResult<()> {
    let path = Path::new(SETTINGS_FILE);
    if path.exists() && !force {
        return Err(CliError::Usage(format!(
            "{SETTINGS_FILE} already exists; pass --force to overwrite it"
        )));
    }
    std::fs::write(path, DEFAULT_SETTINGS_TEMPLATE)
        .map_err(|e| CliError::Config(format!("failed to write {SETTINGS_FILE}: {e}")))?;
    println!("Wrote {SETTINGS_FILE}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_template_parses_to_defaults() {
        assert_eq!(
            Settings::parse(DEFAULT_SETTINGS_TEMPLATE).unwrap(),
            Settings::default()
        );
    }
}
