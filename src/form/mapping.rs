//! Dropdown label tables.
//!
//! Every dropdown option shows its encoded integer next to the label,
//! e.g. `Male` becomes `Male (1)`. The option value is that integer, so the
//! submitted payload always carries the documented code.

use super::{Field, FormError};

type LabelTable = &'static [(&'static str, u8)];

const GENDER: LabelTable = &[("Male", 1), ("Female", 0)];

const CHEST_PAIN: LabelTable = &[
    ("Typical Angina", 1),
    ("Atypical Angina", 2),
    ("Non-anginal Pain", 3),
    ("Asymptomatic", 0),
];

const YES_NO: LabelTable = &[("Yes", 1), ("No", 0)];

const RESTING_ECG: LabelTable = &[
    ("Normal", 0),
    ("ST-T Wave Abnormality", 1),
    ("Left Ventricular Hypertrophy", 2),
];

const SLOPE: LabelTable = &[
    ("Upsloping", 0),
    ("Flat", 1),
    ("Downsloping", 2),
    ("Severe Downsloping", 3),
];

const MAJOR_VESSELS: LabelTable = &[("0", 0), ("1", 1), ("2", 2), ("3", 3)];

/// Label table for a dropdown field, `None` for numeric inputs.
pub fn table_for(field: Field) -> Option<LabelTable> {
    match field {
        Field::Gender => Some(GENDER),
        Field::ChestPain => Some(CHEST_PAIN),
        Field::FastingBloodSugar | Field::ExerciseAngina => Some(YES_NO),
        Field::RestingEcg => Some(RESTING_ECG),
        Field::Slope => Some(SLOPE),
        Field::MajorVessels => Some(MAJOR_VESSELS),
        _ => None,
    }
}

/// Encoded integer for a plain label.
pub fn code_for(field: Field, label: &str) -> Option<u8> {
    table_for(field)?
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, code)| *code)
}

/// `"Label (code)"`, or `None` when the label is not in the table.
pub fn mapped_label(field: Field, label: &str) -> Option<String> {
    code_for(field, label).map(|code| format!("{} ({})", label, code))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct SelectControl {
    pub field: Field,
    pub options: Vec<SelectOption>,
    pub selected: usize,
}

impl SelectControl {
    /// Placeholder option (empty value) followed by one option per table row.
    pub fn from_table(field: Field) -> Self {
        let mut options = vec![SelectOption {
            value: String::new(),
            text: format!("Select {}", field.display_name()),
        }];
        if let Some(table) = table_for(field) {
            options.extend(table.iter().map(|(label, code)| SelectOption {
                value: code.to_string(),
                text: label.to_string(),
            }));
        }
        Self {
            field,
            options,
            selected: 0,
        }
    }

    pub fn value(&self) -> &str {
        self.options
            .get(self.selected)
            .map(|o| o.value.as_str())
            .unwrap_or("")
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.options.get(self.selected).map(|o| o.text.as_str())
    }

    pub fn select_by_text(&mut self, text: &str) -> Result<(), FormError> {
        let idx = self
            .options
            .iter()
            .position(|o| o.text == text)
            .ok_or_else(|| FormError::UnknownOption {
                field: self.field.form_id(),
                label: text.to_string(),
            })?;
        self.selected = idx;
        Ok(())
    }

    /// An empty value selects the placeholder again.
    pub fn select_by_value(&mut self, value: &str) -> Result<(), FormError> {
        let idx = self
            .options
            .iter()
            .position(|o| o.value == value)
            .ok_or_else(|| FormError::UnknownOption {
                field: self.field.form_id(),
                label: value.to_string(),
            })?;
        self.selected = idx;
        Ok(())
    }
}

/// Rewrites option text in place. Options without a value, or whose text
/// has no table entry (including already relabelled ones), are untouched.
pub fn apply_labels(select: &mut SelectControl) {
    let field = select.field;
    for option in select.options.iter_mut() {
        if option.value.is_empty() {
            continue;
        }
        if let Some(mapped) = mapped_label(field, &option.text) {
            option.text = mapped;
        }
    }
}
