//! Numeric input bounds and change-time clamping.

use super::Field;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

/// Ranges accepted by the prediction service.
pub fn bounds_for(field: Field) -> Option<Bounds> {
    match field {
        Field::Age => Some(Bounds::new(20.0, 80.0)),
        Field::RestingBloodPressure => Some(Bounds::new(94.0, 200.0)),
        Field::Cholesterol => Some(Bounds::new(0.0, 602.0)),
        Field::MaxHeartRate => Some(Bounds::new(71.0, 202.0)),
        Field::StDepression => Some(Bounds::new(0.0, 6.2)),
        _ => None,
    }
}

/// Blocking notice raised when an input had to be pulled back into range.
#[derive(Debug, Clone, PartialEq)]
pub struct ClampNotice {
    pub field: Field,
    pub bound: f64,
    pub message: String,
}

/// Returns the value the input should hold after a change event, plus a
/// notice if it was out of range. Text that does not parse, or parses to
/// NaN, is kept as is. Infinities clamp like any other value.
pub fn enforce(field: Field, bounds: Bounds, raw: &str) -> (String, Option<ClampNotice>) {
    let value = match raw.trim().parse::<f64>() {
        Ok(v) if !v.is_nan() => v,
        _ => return (raw.to_string(), None),
    };

    let (bound, relation) = if value < bounds.min {
        (bounds.min, "at least")
    } else if value > bounds.max {
        (bounds.max, "at most")
    } else {
        return (raw.to_string(), None);
    };

    debug!(field = field.form_id(), value, bound, "Clamping numeric input");
    let notice = ClampNotice {
        field,
        bound,
        message: format!("{} must be {} {}", field.display_name(), relation, bound),
    };
    (bound.to_string(), Some(notice))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_matches_min_max_composition() {
        let bounds = Bounds::new(94.0, 200.0);
        for v in [-10.0, 0.0, 93.9, 94.0, 120.0, 200.0, 200.1, 1e9] {
            assert_eq!(bounds.clamp(v), v.max(94.0).min(200.0));
        }
    }

    #[test]
    fn below_min_raises_notice() {
        let bounds = bounds_for(Field::Age).unwrap();
        let (value, notice) = enforce(Field::Age, bounds, "12");
        assert_eq!(value, "20");
        let notice = notice.unwrap();
        assert_eq!(notice.message, "Age must be at least 20");
        assert_eq!(notice.bound, 20.0);
    }

    #[test]
    fn above_max_uses_fractional_bound() {
        let bounds = bounds_for(Field::StDepression).unwrap();
        let (value, notice) = enforce(Field::StDepression, bounds, "7.5");
        assert_eq!(value, "6.2");
        assert_eq!(notice.unwrap().message, "ST Depression must be at most 6.2");
    }

    #[test]
    fn overflowing_input_clamps_to_the_bound() {
        let bounds = bounds_for(Field::Age).unwrap();
        let (value, notice) = enforce(Field::Age, bounds, "1e400");
        assert_eq!(value, "80");
        assert_eq!(notice.unwrap().message, "Age must be at most 80");

        let (value, notice) = enforce(Field::Age, bounds, "-1e400");
        assert_eq!(value, "20");
        assert_eq!(notice.unwrap().message, "Age must be at least 20");

        let (value, notice) = enforce(Field::Age, bounds, "inf");
        assert_eq!(value, "80");
        assert!(notice.is_some());
        assert_eq!(enforce(Field::Age, bounds, "NaN"), ("NaN".to_string(), None));
    }

    #[test]
    fn in_range_and_garbage_are_untouched() {
        let bounds = bounds_for(Field::Cholesterol).unwrap();
        assert_eq!(enforce(Field::Cholesterol, bounds, "233"), ("233".to_string(), None));
        assert_eq!(enforce(Field::Cholesterol, bounds, ""), (String::new(), None));
        assert_eq!(enforce(Field::Cholesterol, bounds, "abc"), ("abc".to_string(), None));
    }
}
