//! View models handed to the templates.

use serde::Serialize;

use crate::domain::vehicle::{VehicleCity, VehicleStatus};

pub mod fleet;
pub mod main;
pub mod vehicle;

/// One `<option>` of a select box.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    /// All statuses, marking the one whose wire value equals `selected`.
    pub fn statuses(selected: Option<&str>) -> Vec<Self> {
        VehicleStatus::ALL
            .into_iter()
            .map(|status| Self {
                value: status.as_str().to_string(),
                label: status.label().to_string(),
                selected: selected == Some(status.as_str()),
            })
            .collect()
    }

    pub fn cities(selected: Option<&str>) -> Vec<Self> {
        VehicleCity::ALL
            .into_iter()
            .map(|city| Self {
                value: city.as_str().to_string(),
                label: city.as_str().to_string(),
                selected: selected == Some(city.as_str()),
            })
            .collect()
    }
}

/// `<input type="hidden">` carrying state through a GET form.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HiddenField {
    pub name: &'static str,
    pub value: String,
}

/// Groups digits by thousands: `1234567` -> `1 234 567`.
pub fn format_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
