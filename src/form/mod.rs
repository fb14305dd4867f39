//! Patient form: field catalogue, dropdown labels, numeric bounds and the
//! transport payload sent to the prediction endpoint.

pub mod fields;
pub mod mapping;
pub mod payload;

pub use fields::{Bounds, ClampNotice};
pub use mapping::{SelectControl, SelectOption};
pub use payload::TransportPayload;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Unknown form field: {0}")]
    UnknownField(String),
    #[error("Field {0} is not a dropdown")]
    NotADropdown(&'static str),
    #[error("Field {0} is not numeric")]
    NotNumeric(&'static str),
    #[error("No option labelled {label:?} on {field}")]
    UnknownOption { field: &'static str, label: String },
}

/// The twelve clinical inputs, in the order the endpoint expects them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Gender,
    ChestPain,
    Age,
    RestingBloodPressure,
    Cholesterol,
    FastingBloodSugar,
    RestingEcg,
    MaxHeartRate,
    ExerciseAngina,
    StDepression,
    Slope,
    MajorVessels,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Numeric(Bounds),
    Dropdown,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::Gender,
        Field::ChestPain,
        Field::Age,
        Field::RestingBloodPressure,
        Field::Cholesterol,
        Field::FastingBloodSugar,
        Field::RestingEcg,
        Field::MaxHeartRate,
        Field::ExerciseAngina,
        Field::StDepression,
        Field::Slope,
        Field::MajorVessels,
    ];

    /// Control id on the page.
    pub fn form_id(&self) -> &'static str {
        match self {
            Field::Gender => "gender",
            Field::ChestPain => "chestpain",
            Field::Age => "age",
            Field::RestingBloodPressure => "trestbps",
            Field::Cholesterol => "chol",
            Field::FastingBloodSugar => "fastingbloodsugar",
            Field::RestingEcg => "restingrelectro",
            Field::MaxHeartRate => "thalach",
            Field::ExerciseAngina => "exerciseangia",
            Field::StDepression => "oldpeak",
            Field::Slope => "slope",
            Field::MajorVessels => "noofmajorvessels",
        }
    }

    /// Parameter name in the `/predict` payload.
    pub fn param_name(&self) -> &'static str {
        match self {
            Field::Gender => "gender",
            Field::ChestPain => "chestpain",
            Field::Age => "age",
            Field::RestingBloodPressure => "trestbps",
            Field::Cholesterol => "chol",
            Field::FastingBloodSugar => "fbs",
            Field::RestingEcg => "restecg",
            Field::MaxHeartRate => "thalach",
            Field::ExerciseAngina => "exang",
            Field::StDepression => "oldpeak",
            Field::Slope => "slope",
            Field::MajorVessels => "ca",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Field::Gender => "Gender",
            Field::ChestPain => "Chest Pain Type",
            Field::Age => "Age",
            Field::RestingBloodPressure => "Resting Blood Pressure",
            Field::Cholesterol => "Serum Cholesterol",
            Field::FastingBloodSugar => "Fasting Blood Sugar",
            Field::RestingEcg => "Resting ECG Results",
            Field::MaxHeartRate => "Maximum Heart Rate",
            Field::ExerciseAngina => "Exercise Induced Angina",
            Field::StDepression => "ST Depression",
            Field::Slope => "ST Segment Slope",
            Field::MajorVessels => "Number of Major Vessels",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match fields::bounds_for(*self) {
            Some(bounds) => FieldKind::Numeric(bounds),
            None => FieldKind::Dropdown,
        }
    }

    pub fn from_form_id(id: &str) -> Result<Self, FormError> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.form_id() == id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))
    }
}

/// Current contents of the patient form.
///
/// Numeric inputs hold the raw text typed by the user; dropdowns hold a
/// [`SelectControl`] whose selected option value is the encoded integer.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    inputs: BTreeMap<Field, String>,
    selects: BTreeMap<Field, SelectControl>,
    pub patient_id: Option<String>,
}

impl FormInput {
    /// A form with every dropdown populated from the label tables and
    /// already relabelled.
    pub fn new() -> Self {
        let mut form = Self::default();
        for field in Field::ALL {
            if let FieldKind::Dropdown = field.kind() {
                let mut select = SelectControl::from_table(field);
                mapping::apply_labels(&mut select);
                form.selects.insert(field, select);
            }
        }
        form
    }

    /// Sets a numeric input, clamping it to its bounds.
    pub fn set_numeric(&mut self, field: Field, raw: &str) -> Result<Option<ClampNotice>, FormError> {
        let bounds = match field.kind() {
            FieldKind::Numeric(bounds) => bounds,
            FieldKind::Dropdown => return Err(FormError::NotNumeric(field.form_id())),
        };
        let (value, notice) = fields::enforce(field, bounds, raw);
        self.inputs.insert(field, value);
        Ok(notice)
    }

    /// Selects a dropdown option by its visible (possibly relabelled) text.
    pub fn select(&mut self, field: Field, text: &str) -> Result<(), FormError> {
        let select = self
            .selects
            .get_mut(&field)
            .ok_or(FormError::NotADropdown(field.form_id()))?;
        select.select_by_text(text)
    }

    /// Selects a dropdown option by its encoded value.
    pub fn select_value(&mut self, field: Field, value: &str) -> Result<(), FormError> {
        let select = self
            .selects
            .get_mut(&field)
            .ok_or(FormError::NotADropdown(field.form_id()))?;
        select.select_by_value(value)
    }

    pub fn select_control(&self, field: Field) -> Option<&SelectControl> {
        self.selects.get(&field)
    }

    /// The value the control would submit: raw text for inputs, the
    /// selected option value for dropdowns.
    pub fn value(&self, field: Field) -> Option<&str> {
        match field.kind() {
            FieldKind::Numeric(_) => self.inputs.get(&field).map(String::as_str),
            FieldKind::Dropdown => self.selects.get(&field).map(|s| s.value()),
        }
    }

    /// Visible text of the selected dropdown option.
    pub fn selected_text(&self, field: Field) -> Option<&str> {
        self.selects.get(&field).and_then(|s| s.selected_text())
    }

    /// Patient identifier, ignoring blank input.
    pub fn patient_id(&self) -> Option<&str> {
        self.patient_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn payload(&self) -> TransportPayload {
        TransportPayload::from_form(self)
    }

    /// Field values keyed by payload parameter name.
    pub fn values_by_param(&self) -> BTreeMap<&'static str, String> {
        Field::ALL
            .iter()
            .filter_map(|f| self.value(*f).map(|v| (f.param_name(), v.to_string())))
            .collect()
    }
}
