//! Templates command implementation for the ScatterScore CLI.

use std::io::Write;

use scatterscore_core::{ScoringTemplate, TemplateDefinition};

use crate::{CliError, write_json};

pub(super) fn run_templates() -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_templates_with(&mut stdout)
}

pub(super) fn run_templates_with(writer: &mut dyn Write) -> Result<(), CliError> {
    write_json(&template_definitions(), None, writer)
}

pub(super) fn template_definitions() -> Vec<TemplateDefinition> {
    ScoringTemplate::ALL
        .into_iter()
        .map(ScoringTemplate::definition)
        .collect()
}
