use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const DISPLAY: &str = "display";
pub const DISPLAY_NONE: &str = "none";

/// Style properties handed to the renderer, ordered by property name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StyleMap {
    properties: BTreeMap<String, String>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// `{ display: <value> }`
    pub fn display(value: impl Into<String>) -> Self {
        let mut style = Self::new();
        style.set(DISPLAY, value);
        style
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    pub fn is_hidden(&self) -> bool {
        self.get(DISPLAY) == Some(DISPLAY_NONE)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(property, value)| (property.as_str(), value.as_str()))
    }
}

impl fmt::Display for StyleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (property, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(";")?;
            }
            write!(f, " {}: {}", property, value)?;
        }
        f.write_str(" }")
    }
}
