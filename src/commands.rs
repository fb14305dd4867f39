use crate::client::{EmailRequest, PredictionService};
use crate::config::Config;
use crate::form::{Field, FieldKind, FormInput};
use crate::report::source::PATIENT_ID_FALLBACK;
use crate::report::ReportExporter;
use crate::view::{render, Button, Controls, Notifier, RenderInstruction, ResultView};
use chrono::{Local, Months, NaiveDate};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

pub const PREDICTION_FAILED: &str = "An error occurred during prediction. Please try again.";
pub const REPORT_FAILED: &str = "Error generating PDF. Please try again.";
pub const EMAIL_MISSING: &str = "Please enter doctor's email address";
pub const EMAIL_PDF_FAILED: &str = "Failed to generate PDF for email. Please try again.";
pub const EMAIL_FAILED: &str = "Failed to send email. Please try again later.";
pub const EMAIL_SENT: &str = "Email sent successfully";

pub const PROCESSING_LABEL: &str = "Processing...";
pub const GENERATING_LABEL: &str = "Generating PDF...";
pub const SENDING_LABEL: &str = "Sending Email...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Email,
    Reminder,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modals {
    pub email_open: bool,
    pub reminder_open: bool,
    pub reminder_date: Option<NaiveDate>,
}

pub struct AppState {
    pub form: FormInput,
    pub result: Option<ResultView>,
    pub modals: Modals,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            form: FormInput::new(),
            result: None,
            modals: Modals::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A control changed; `field_id` is the form id, `value` the raw input
    /// or the selected option value.
    FieldChanged { field_id: String, value: String },
    PatientIdChanged(String),
    Submit,
    Print,
    OpenEmail,
    SendEmail { doctor_email: String, message: String },
    OpenReminder,
    CloseModal(Modal),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Done,
    /// Nothing happened, e.g. a second submit while one is in flight.
    Ignored,
    /// An alert was raised and the state left as it was.
    Failed,
    Rendered(Vec<RenderInstruction>),
    ReportSaved(PathBuf),
    EmailSent,
    ReminderDate(NaiveDate),
}

pub struct App {
    config: Config,
    service: Arc<dyn PredictionService>,
    notifier: Arc<dyn Notifier>,
    exporter: ReportExporter,
    controls: Controls,
    state: Mutex<AppState>,
}

impl App {
    pub fn new(config: Config, service: Arc<dyn PredictionService>, notifier: Arc<dyn Notifier>) -> Self {
        let exporter = ReportExporter::new(config.report.title.clone(), config.report.output_dir.clone());
        Self {
            config,
            service,
            notifier,
            exporter,
            controls: Controls::new(),
            state: Mutex::new(AppState::default()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Locks the state. Never held across an await.
    pub fn state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub async fn dispatch(&self, event: Event) -> Outcome {
        match event {
            Event::FieldChanged { field_id, value } => self.on_field_change(&field_id, &value),
            Event::PatientIdChanged(id) => {
                self.state().form.patient_id = Some(id);
                Outcome::Done
            }
            Event::Submit => self.on_submit().await,
            Event::Print => self.on_print(),
            Event::OpenEmail => {
                self.state().modals.email_open = true;
                Outcome::Done
            }
            Event::SendEmail {
                doctor_email,
                message,
            } => self.on_send_email(&doctor_email, &message).await,
            Event::OpenReminder => self.open_reminder(),
            Event::CloseModal(modal) => {
                self.close_modal(modal);
                Outcome::Done
            }
        }
    }

    /* ---------- 1.  FORM ---------- */

    fn on_field_change(&self, field_id: &str, value: &str) -> Outcome {
        let field = match Field::from_form_id(field_id) {
            Ok(field) => field,
            Err(e) => {
                warn!(error = %e, "Ignoring change");
                return Outcome::Ignored;
            }
        };

        let mut state = self.state();
        let result = match field.kind() {
            FieldKind::Numeric(_) => state.form.set_numeric(field, value),
            FieldKind::Dropdown => state
                .form
                .select_value(field, value)
                .or_else(|_| state.form.select(field, value))
                .map(|_| None),
        };
        drop(state);

        match result {
            Ok(Some(notice)) => {
                self.notifier.alert(&notice.message);
                Outcome::Done
            }
            Ok(None) => Outcome::Done,
            Err(e) => {
                warn!(field = field.form_id(), error = %e, "Rejected field change");
                Outcome::Failed
            }
        }
    }

    /* ---------- 2.  PREDICTION ---------- */

    pub async fn on_submit(&self) -> Outcome {
        let Some(_busy) = self.controls.try_busy(Button::Submit, PROCESSING_LABEL) else {
            return Outcome::Ignored;
        };

        let request_id = Uuid::new_v4();
        let form = self.state().form.clone();
        let payload = form.payload();

        async {
            info!(fields = payload.len(), "Submitting assessment");
            match self.service.predict(&payload).await {
                Ok(result) => {
                    let (view, instructions) =
                        render(&result, &form, self.config.interpretation.placeholder_confidence);
                    info!(
                        category = %view.category(),
                        probability = result.probability,
                        fallback = result.note.is_some(),
                        "Prediction rendered"
                    );
                    self.state().result = Some(view);
                    Outcome::Rendered(instructions)
                }
                Err(e) => {
                    error!(error = %e, "Prediction failed");
                    self.notifier.alert(PREDICTION_FAILED);
                    Outcome::Failed
                }
            }
        }
        .instrument(info_span!("submit", %request_id))
        .await
    }

    /* ---------- 3.  REPORT ---------- */

    pub fn on_print(&self) -> Outcome {
        let state = self.state();
        let saved = self
            .exporter
            .download(state.result.as_ref(), &state.form, &self.controls);
        drop(state);

        match saved {
            Ok(path) => Outcome::ReportSaved(path),
            Err(e) => {
                error!(error = %e, "Report download failed");
                self.notifier.alert(REPORT_FAILED);
                Outcome::Failed
            }
        }
    }

    pub async fn on_send_email(&self, doctor_email: &str, message: &str) -> Outcome {
        if doctor_email.trim().is_empty() {
            self.notifier.alert(EMAIL_MISSING);
            return Outcome::Failed;
        }
        let Some(busy) = self.controls.try_busy(Button::SendEmail, GENERATING_LABEL) else {
            return Outcome::Ignored;
        };

        let request = {
            let state = self.state();
            let attachment = match self.exporter.for_email(state.result.as_ref(), &state.form) {
                Ok(uri) => uri,
                Err(e) => {
                    error!(error = %e, "Email report failed");
                    self.notifier.alert(EMAIL_PDF_FAILED);
                    return Outcome::Failed;
                }
            };
            let (prediction_result, probability) = state
                .result
                .as_ref()
                .map(|v| (v.message.clone(), v.probability_text.clone()))
                .unwrap_or_default();
            EmailRequest {
                doctor_email: doctor_email.to_string(),
                message: message.to_string(),
                prediction_result,
                probability,
                patient_id: state.form.patient_id().unwrap_or(PATIENT_ID_FALLBACK).to_string(),
                pdf_attachment: attachment,
            }
        };

        busy.relabel(SENDING_LABEL);
        match self.service.send_email(&request).await {
            Ok(resp) if resp.success => {
                let text = resp
                    .message
                    .as_deref()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or(EMAIL_SENT);
                self.notifier.alert(text);
                self.close_modal(Modal::Email);
                info!("Report emailed");
                Outcome::EmailSent
            }
            Ok(resp) => {
                warn!(error = ?resp.error, "Email service refused");
                self.notifier.alert(EMAIL_FAILED);
                Outcome::Failed
            }
            Err(e) => {
                error!(error = %e, "Email request failed");
                self.notifier.alert(EMAIL_FAILED);
                Outcome::Failed
            }
        }
    }

    /* ---------- 4.  DIALOGS ---------- */

    pub fn open_reminder(&self) -> Outcome {
        let today = Local::now().date_naive();
        let date = today.checked_add_months(Months::new(6)).unwrap_or(today);
        let mut state = self.state();
        state.modals.reminder_date = Some(date);
        state.modals.reminder_open = true;
        Outcome::ReminderDate(date)
    }

    pub fn close_modal(&self, modal: Modal) {
        let mut state = self.state();
        match modal {
            Modal::Email => state.modals.email_open = false,
            Modal::Reminder => state.modals.reminder_open = false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, ClientResult, EmailResponse, PredictionResult};
    use crate::form::TransportPayload;
    use crate::risk::{RecommendationSource, RiskCategory};
    use crate::view::AlertLog;
    use async_trait::async_trait;

    struct StubService {
        prediction: Option<PredictionResult>,
        email: Option<EmailResponse>,
        seen: Mutex<Vec<TransportPayload>>,
        emails: Mutex<Vec<EmailRequest>>,
    }

    impl StubService {
        fn new(prediction: Option<PredictionResult>, email: Option<EmailResponse>) -> Arc<Self> {
            Arc::new(Self {
                prediction,
                email,
                seen: Mutex::new(Vec::new()),
                emails: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl PredictionService for StubService {
        async fn predict(&self, payload: &TransportPayload) -> ClientResult<PredictionResult> {
            self.seen.lock().unwrap().push(payload.clone());
            self.prediction.clone().ok_or(ClientError::Status {
                status: 500,
                body: "boom".into(),
            })
        }

        async fn send_email(&self, request: &EmailRequest) -> ClientResult<EmailResponse> {
            self.emails.lock().unwrap().push(request.clone());
            self.email.clone().ok_or(ClientError::Timeout)
        }
    }

    fn bare(probability: f64) -> PredictionResult {
        PredictionResult {
            prediction: u8::from(probability >= 0.5),
            probability,
            confidence: None,
            contributing_factors: None,
            recommendations: None,
            message: None,
            note: None,
        }
    }

    fn app(service: Arc<StubService>, dir: &std::path::Path) -> (App, Arc<AlertLog>) {
        let mut config = Config::default();
        config.report.output_dir = dir.to_path_buf();
        let alerts = Arc::new(AlertLog::new());
        (App::new(config, service, alerts.clone()), alerts)
    }

    fn change(field_id: &str, value: &str) -> Event {
        Event::FieldChanged {
            field_id: field_id.into(),
            value: value.into(),
        }
    }

    #[tokio::test]
    async fn out_of_range_input_is_clamped_with_alert() {
        let dir = tempfile::tempdir().unwrap();
        let (app, alerts) = app(StubService::new(None, None), dir.path());

        assert_eq!(app.dispatch(change("age", "95")).await, Outcome::Done);
        assert_eq!(app.state().form.value(Field::Age), Some("80"));
        assert_eq!(alerts.drain(), vec!["Age must be at most 80".to_string()]);

        assert_eq!(app.dispatch(change("gender", "1")).await, Outcome::Done);
        assert_eq!(app.dispatch(change("chestpain", "Atypical Angina (2)")).await, Outcome::Done);
        assert_eq!(app.state().form.value(Field::ChestPain), Some("2"));
        assert_eq!(app.dispatch(change("nope", "1")).await, Outcome::Ignored);

        assert_eq!(app.dispatch(change("gender", "")).await, Outcome::Done);
        assert_eq!(app.state().form.value(Field::Gender), Some(""));
        assert!(alerts.messages().is_empty());
    }

    #[tokio::test]
    async fn high_risk_submission_falls_back_locally() {
        let dir = tempfile::tempdir().unwrap();
        let service = StubService::new(Some(bare(0.85)), None);
        let (app, alerts) = app(service.clone(), dir.path());

        app.dispatch(change("age", "65")).await;
        app.dispatch(change("chol", "250")).await;
        app.dispatch(change("trestbps", "145")).await;
        app.dispatch(Event::PatientIdChanged("P-1".into())).await;

        let outcome = app.dispatch(Event::Submit).await;
        assert!(matches!(outcome, Outcome::Rendered(ref i) if i.contains(&RenderInstruction::ScrollIntoView)));
        assert!(alerts.messages().is_empty());
        assert_eq!(app.controls().snapshot().submit.label, crate::view::controls::SUBMIT_LABEL);
        assert!(app.controls().snapshot().submit.enabled);

        let state = app.state();
        let view = state.result.as_ref().unwrap();
        assert_eq!(view.category(), RiskCategory::High);
        assert!(view.emergency_warning);
        assert_eq!(view.recommendation_source, RecommendationSource::Static);
        let names: Vec<&str> = view.factors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Age", "Cholesterol", "Blood Pressure"]);
        assert!(view.recommendations.medical.iter().any(|m| m.contains("cardiologist")));

        let seen = service.seen.lock().unwrap();
        assert_eq!(seen[0].get("patientid"), Some("P-1"));
    }

    #[tokio::test]
    async fn failed_submission_alerts_and_reenables() {
        let dir = tempfile::tempdir().unwrap();
        let (app, alerts) = app(StubService::new(None, None), dir.path());

        assert_eq!(app.dispatch(Event::Submit).await, Outcome::Failed);
        assert_eq!(alerts.drain(), vec![PREDICTION_FAILED.to_string()]);
        assert!(app.controls().snapshot().submit.enabled);
        assert!(app.state().result.is_none());
    }

    #[tokio::test]
    async fn submit_is_ignored_while_busy() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app(StubService::new(Some(bare(0.1)), None), dir.path());
        let _busy = app.controls().try_busy(Button::Submit, PROCESSING_LABEL).unwrap();
        assert_eq!(app.dispatch(Event::Submit).await, Outcome::Ignored);
    }

    #[tokio::test]
    async fn print_without_result_alerts() {
        let dir = tempfile::tempdir().unwrap();
        let (app, alerts) = app(StubService::new(None, None), dir.path());
        assert_eq!(app.dispatch(Event::Print).await, Outcome::Failed);
        assert_eq!(alerts.drain(), vec![REPORT_FAILED.to_string()]);
        assert!(app.controls().snapshot().overlays.is_empty());
    }

    #[tokio::test]
    async fn print_saves_report() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app(StubService::new(Some(bare(0.45)), None), dir.path());
        app.dispatch(Event::Submit).await;
        match app.dispatch(Event::Print).await {
            Outcome::ReportSaved(path) => assert!(path.starts_with(dir.path())),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn email_flow_reports_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let ok = EmailResponse {
            success: true,
            message: Some("Email sent successfully with PDF attachment".into()),
            error: None,
        };
        let service = StubService::new(Some(bare(0.2)), Some(ok));
        let (app, alerts) = app(service.clone(), dir.path());

        let send = |email: &str| Event::SendEmail {
            doctor_email: email.into(),
            message: "Please review".into(),
        };

        assert_eq!(app.dispatch(send("  ")).await, Outcome::Failed);
        assert_eq!(alerts.drain(), vec![EMAIL_MISSING.to_string()]);

        assert_eq!(app.dispatch(send("dr@example.org")).await, Outcome::Failed);
        assert_eq!(alerts.drain(), vec![EMAIL_PDF_FAILED.to_string()]);
        assert_eq!(app.controls().snapshot().send_email.label, "Send Email");

        app.dispatch(Event::Submit).await;
        app.dispatch(Event::OpenEmail).await;
        assert!(app.state().modals.email_open);
        assert_eq!(app.dispatch(send("dr@example.org")).await, Outcome::EmailSent);
        assert_eq!(
            alerts.drain(),
            vec!["Email sent successfully with PDF attachment".to_string()]
        );
        assert!(!app.state().modals.email_open);
        let snapshot = app.controls().snapshot();
        assert_eq!(snapshot.send_email.label, "Send Email");
        assert!(snapshot.send_email.enabled);

        let emails = service.emails.lock().unwrap();
        assert_eq!(emails[0].patient_id, "Not provided");
        assert_eq!(emails[0].probability, "Probability: 20.00%");
        assert!(emails[0].pdf_attachment.starts_with("data:application/pdf;base64,"));
    }

    #[tokio::test]
    async fn accepted_email_without_message_alerts_fixed_text() {
        let dir = tempfile::tempdir().unwrap();
        let accepted = EmailResponse {
            success: true,
            message: None,
            error: None,
        };
        let (app, alerts) = app(StubService::new(Some(bare(0.2)), Some(accepted)), dir.path());
        app.dispatch(Event::Submit).await;

        let outcome = app
            .dispatch(Event::SendEmail {
                doctor_email: "dr@example.org".into(),
                message: String::new(),
            })
            .await;
        assert_eq!(outcome, Outcome::EmailSent);
        assert_eq!(alerts.drain(), vec![EMAIL_SENT.to_string()]);
    }

    #[tokio::test]
    async fn refused_email_alerts_generic_failure() {
        let dir = tempfile::tempdir().unwrap();
        let refused = EmailResponse {
            success: false,
            message: None,
            error: Some("Email sending failed".into()),
        };
        let (app, alerts) = app(StubService::new(Some(bare(0.2)), Some(refused)), dir.path());
        app.dispatch(Event::Submit).await;
        app.dispatch(Event::OpenEmail).await;

        let outcome = app
            .dispatch(Event::SendEmail {
                doctor_email: "dr@example.org".into(),
                message: String::new(),
            })
            .await;
        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(alerts.drain(), vec![EMAIL_FAILED.to_string()]);
        assert!(app.state().modals.email_open);
    }

    #[tokio::test]
    async fn reminder_defaults_to_six_months_out() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app(StubService::new(None, None), dir.path());
        let expected = Local::now()
            .date_naive()
            .checked_add_months(Months::new(6))
            .unwrap();
        assert_eq!(app.dispatch(Event::OpenReminder).await, Outcome::ReminderDate(expected));
        assert!(app.state().modals.reminder_open);

        app.dispatch(Event::CloseModal(Modal::Reminder)).await;
        assert!(!app.state().modals.reminder_open);
        assert_eq!(app.state().modals.reminder_date, Some(expected));
    }
}
