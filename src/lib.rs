pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod form;
pub mod report;
pub mod risk;
pub mod telemetry;
pub mod view;

use crate::client::HttpPredictionClient;
use crate::commands::{App, Event, Outcome};
use crate::view::LogNotifier;
use anyhow::{bail, Context};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Submits one form read from a JSON object of control id → value
/// (`patientid` included) and saves the report when a result comes back.
pub async fn run(form_path: &Path, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = config::load_config(config_path)?;
    telemetry::init_tracing(&config.logging.level);

    let raw = std::fs::read_to_string(form_path)
        .with_context(|| format!("reading form values from {}", form_path.display()))?;
    let values: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(&raw).context("form file must be a JSON object")?;

    let service = Arc::new(HttpPredictionClient::new(&config.endpoint)?);
    let app = App::new(config, service, Arc::new(LogNotifier));

    for (field_id, value) in values {
        let value = match value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        let event = if field_id == "patientid" {
            Event::PatientIdChanged(value)
        } else {
            Event::FieldChanged { field_id, value }
        };
        app.dispatch(event).await;
    }

    match app.dispatch(Event::Submit).await {
        Outcome::Rendered(_) => {}
        other => bail!("prediction did not complete: {:?}", other),
    }
    if let Some(view) = app.state().result.as_ref() {
        info!(message = %view.message, probability = %view.probability_text, "Assessment result");
    }

    match app.dispatch(Event::Print).await {
        Outcome::ReportSaved(path) => {
            info!(path = %path.display(), "Done");
            Ok(())
        }
        other => bail!("report was not saved: {:?}", other),
    }
}
