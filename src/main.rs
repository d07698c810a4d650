//! HRM forms - check form values from the command line
//!
//! Validates a JSON document of field values against one of the HR screen
//! presets or a JSON rule file, the same way the screen would on submit.

use anyhow::{Context, Result};
use hrm_forms::{Form, FormsConfig, Preset, RuleSet, SubmitTarget, Values};
use serde_json::json;
use std::fs;
use std::io;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: hrm-forms <preset|rules.json> <values.json>";

#[tokio::main]
async fn main() -> Result<()> {
    let config = FormsConfig::load().context("failed to load configuration")?;

    // Initialize logging
    let default_filter = config
        .log_filter
        .clone()
        .unwrap_or_else(|| "hrm_forms=info".to_string());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [source, values_path] = args.as_slice() else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let content = fs::read_to_string(values_path)
        .with_context(|| format!("failed to read {values_path}"))?;
    let values: Values = serde_json::from_str(&content)
        .with_context(|| format!("{values_path} is not a JSON object"))?;

    let (mut form, target) = build_form(source, values, &config)?;
    tracing::info!(source = %source, fields = form.rules().len(), "checking form");

    // No transport: the submit settles locally once validation passes
    let outcome = form.handle_submit().await?;
    let valid = outcome.is_submitted();

    let report = json!({
        "valid": valid,
        "errors": form.errors(),
        "target": target.map(|t| t.to_string()),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !valid {
        std::process::exit(1);
    }
    Ok(())
}

/// A path to an existing file is read as a rule set; anything else names a
/// preset, whose blank values are overlaid with the supplied ones
fn build_form(
    source: &str,
    values: Values,
    config: &FormsConfig,
) -> Result<(Form, Option<SubmitTarget>)> {
    if Path::new(source).is_file() {
        let rules = RuleSet::from_json(&fs::read_to_string(source)?)
            .with_context(|| format!("invalid rule file {source}"))?;
        return Ok((Form::new(values, rules), None));
    }

    let preset = Preset::from_name(source)?;
    let mut initial = preset.initial_values();
    initial.extend(values);
    let target = SubmitTarget::resolve(config, preset.endpoint(), Some(preset.method()));
    Ok((Form::new(initial, preset.rules()), Some(target)))
}
