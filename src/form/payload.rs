//! Form-encoded body for `POST /predict`.

use super::{Field, FormInput};
use serde::Serialize;

/// Ordered `(name, value)` pairs; serializes as an urlencoded form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TransportPayload(Vec<(&'static str, String)>);

impl TransportPayload {
    /// Every field the form holds, in endpoint order, then `patientid` if
    /// one was entered.
    pub fn from_form(form: &FormInput) -> Self {
        let mut pairs: Vec<(&'static str, String)> = Field::ALL
            .iter()
            .filter_map(|field| {
                form.value(*field)
                    .map(|value| (field.param_name(), value.to_string()))
            })
            .collect();

        if let Some(id) = form.patient_id() {
            pairs.push(("patientid", id.to_string()));
        }
        Self(pairs)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
