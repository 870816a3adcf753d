//! Generate command implementation

use crate::codegen::{CLIENT_MODULE, SkippedMessage, emit_object, render_index};
use crate::plan::BuildPlan;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use xapigen_core::{Config, Description, GenError};

/// Index file declaring every generated module.
const INDEX_FILE: &str = "mod.rs";

/// What one run produced.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Generated unit names, in description order.
    pub units: Vec<String>,

    /// Generated methods across all units.
    pub methods: usize,

    /// Object types that got no unit.
    pub skipped_types: Vec<String>,

    /// Messages that got no method.
    pub skipped_messages: Vec<SkippedMessage>,
}

impl GenerationReport {
    /// Number of messages skipped because a type-expression has no binding.
    pub fn unsupported(&self) -> usize {
        self.skipped_messages
            .iter()
            .filter(|s| s.reason.is_unsupported())
            .count()
    }
}

/// Run the generate command
pub fn run(config: &Config, dry_run: bool) -> Result<GenerationReport> {
    let (plan, report) = plan(config)?;

    if config.generator.strict && report.unsupported() > 0 {
        for skip in report.skipped_messages.iter().filter(|s| s.reason.is_unsupported()) {
            eprintln!("  {}: {}", skip.identity, skip.reason);
        }
        return Err(GenError::UnsupportedMessages {
            count: report.unsupported(),
        }
        .into());
    }

    if dry_run {
        println!("Dry run, nothing written:");
        print!("{plan}");
    } else {
        plan.apply()?;
        println!("✓ Generated {} unit(s) in {}", report.units.len(), plan.root().display());
    }

    println!(
        "  {} method(s), {} object type(s) without unit, {} message(s) skipped",
        report.methods,
        report.skipped_types.len(),
        report.skipped_messages.len()
    );

    Ok(report)
}

/// Generate every unit of the description into a build plan, without writing.
pub fn plan(config: &Config) -> Result<(BuildPlan, GenerationReport)> {
    let generator = &config.generator;
    let description = Description::from_file(&generator.description)?;
    tracing::info!(
        description = %generator.description.display(),
        object_types = description.object_types.len(),
        "loaded description"
    );

    let passthrough = config.passthrough_path();
    if !passthrough.is_file() {
        return Err(GenError::Config(format!(
            "passthrough file {} does not exist",
            passthrough.display()
        ))
        .into());
    }

    let normalizer = config.normalizer();
    let mut plan = BuildPlan::new(&generator.output);
    let mut report = GenerationReport::default();
    let mut taken: BTreeSet<String> = [INDEX_FILE.trim_end_matches(".rs"), CLIENT_MODULE]
        .into_iter()
        .map(str::to_string)
        .collect();

    for ot in &description.object_types {
        let unit_name = xapigen_core::naming::unit_name(&ot.name);
        if ot.is_generated() && taken.contains(&unit_name) {
            tracing::warn!(
                object_type = %ot.name,
                unit = %unit_name,
                "unit name already taken, object type skipped"
            );
            report.skipped_types.push(ot.name.clone());
            continue;
        }

        let extension = read_extension(&generator.extras, &unit_name, &generator.passthrough)?;
        let Some(unit) = emit_object(ot, &normalizer, extension.as_deref())
            .with_context(|| format!("Failed to generate unit for {}", ot.name))?
        else {
            report.skipped_types.push(ot.name.clone());
            continue;
        };

        taken.insert(unit.unit_name.clone());
        plan.add_file(format!("{}.rs", unit.unit_name), unit.source);
        report.units.push(unit.unit_name);
        report.methods += unit.methods;
        report.skipped_messages.extend(unit.skipped);
    }

    plan.add_file(INDEX_FILE, render_index(&report.units)?);
    plan.add_link(format!("{CLIENT_MODULE}.rs"), passthrough);

    tracing::info!(
        units = report.units.len(),
        methods = report.methods,
        skipped_messages = report.skipped_messages.len(),
        unsupported = report.unsupported(),
        "planned output"
    );

    Ok((plan, report))
}

/// Read the hand-written extension `<extras>/<unit_name>.rs`, if there is one.
fn read_extension(extras: &Path, unit_name: &str, passthrough: &str) -> Result<Option<String>> {
    let file_name = format!("{unit_name}.rs");
    if file_name == passthrough {
        return Ok(None);
    }

    let path = extras.join(file_name);
    match fs::read_to_string(&path) {
        Ok(content) => {
            tracing::debug!(extension = %path.display(), "appending hand-written extension");
            Ok(Some(content))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(GenError::io(path, e).into()),
    }
}
