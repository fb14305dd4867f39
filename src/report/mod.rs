//! Single-page assessment report, saved to disk or embedded for email.

pub mod datauri;
pub mod layout;
pub mod pdf;
pub mod source;

pub use layout::{ReportMeta, Variant};
pub use source::ReportSource;

use crate::form::FormInput;
use crate::view::{Controls, ResultView};
use chrono::{DateTime, Local};
use rand::Rng;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument};

pub const LOADING_TEXT: &str = "Generating PDF... Please wait.";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No result has been rendered yet")]
    NothingRendered,
    #[error("PDF generation failed: {0}")]
    Pdf(String),
    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn file_name(date: &DateTime<Local>) -> String {
    format!("Heart_Assessment_{}.pdf", date.format("%m-%d-%Y"))
}

fn meta(title: &str, now: &DateTime<Local>) -> ReportMeta {
    ReportMeta {
        title: title.to_string(),
        date: now.format("%m/%d/%Y").to_string(),
        report_id: rand::thread_rng().gen_range(0..10_000),
        generated_on: now.format("%m/%d/%Y, %I:%M:%S %p").to_string(),
    }
}

/// Builds report bytes for one variant from the current view.
pub fn build(
    title: &str,
    view: &ResultView,
    form: &FormInput,
    variant: Variant,
    now: &DateTime<Local>,
) -> Result<Vec<u8>, ReportError> {
    let source = ReportSource::read(view, form);
    let meta = meta(title, now);
    let ops = layout::layout(&source, &meta, variant);
    debug!(ops = ops.len(), ?variant, report_id = meta.report_id, "Laid out report");
    pdf::render_pdf(title, &ops)
}

pub struct ReportExporter {
    title: String,
    output_dir: PathBuf,
}

impl ReportExporter {
    pub fn new(title: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes the download variant. The loading overlay is attached for the
    /// duration and removed on every exit path.
    #[instrument(skip(self, view, form, controls))]
    pub fn download(
        &self,
        view: Option<&ResultView>,
        form: &FormInput,
        controls: &Controls,
    ) -> Result<PathBuf, ReportError> {
        let _loading = controls.show_loading(LOADING_TEXT);
        let view = view.ok_or(ReportError::NothingRendered)?;

        let now = Local::now();
        let bytes = build(&self.title, view, form, Variant::Download, &now)?;
        let path = self.output_dir.join(file_name(&now));
        std::fs::write(&path, &bytes).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), bytes = bytes.len(), "Report saved");
        Ok(path)
    }

    /// The email variant as a `data:application/pdf;base64,` URI.
    #[instrument(skip(self, view, form))]
    pub fn for_email(&self, view: Option<&ResultView>, form: &FormInput) -> Result<String, ReportError> {
        let view = view.ok_or(ReportError::NothingRendered)?;
        let bytes = build(&self.title, view, form, Variant::Email, &Local::now())?;
        let uri = datauri::encode_pdf(&bytes);
        debug!(length = uri.len(), "Report encoded for email");
        Ok(uri)
    }
}
