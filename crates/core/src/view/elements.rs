use crate::core_types::Seconds;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! element_id {
    ($name:ident, $tag:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub(crate) u64);

        impl $name {
            /// Numeric handle, stable for the lifetime of the view
            pub fn raw(self) -> u64 {
                self.0
            }

            #[must_use]
            pub fn from_raw(raw: u64) -> Self {
                $name(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "#{}"), self.0)
            }
        }
    };
}

element_id!(SectionId, "section");
element_id!(CounterId, "counter");
element_id!(DecorationId, "decoration");

/// Any element whose layout the host reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Section(SectionId),
    Counter(CounterId),
}

impl From<SectionId> for ElementId {
    fn from(id: SectionId) -> Self {
        ElementId::Section(id)
    }
}

impl From<CounterId> for ElementId {
    fn from(id: CounterId) -> Self {
        ElementId::Counter(id)
    }
}

/// Entrance style of a revealed wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SectionVariant {
    /// Fade in and rise 50px
    #[default]
    Section,
    /// Fade in, rise 20px and grow from 95%
    Card,
}

/// Visibility-gated wrapper around host-owned children
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionProps {
    /// Wait after the element becomes visible
    pub delay: Seconds,
    /// Passed through to the host untouched
    pub class_name: String,
    pub variant: SectionVariant,
}

impl SectionProps {
    #[must_use]
    pub fn section(delay: Seconds) -> Self {
        SectionProps {
            delay,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn card(delay: Seconds) -> Self {
        SectionProps {
            delay,
            variant: SectionVariant::Card,
            ..Default::default()
        }
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_tags() {
        assert_eq!(SectionId(3).to_string(), "section#3");
        assert_eq!(CounterId::from_raw(7).to_string(), "counter#7");
        assert_eq!(DecorationId(0).raw(), 0);
    }

    #[test]
    fn test_props_constructors() {
        let card = SectionProps::card(Seconds::new(0.4)).with_class_name("grid-item");
        assert_eq!(card.variant, SectionVariant::Card);
        assert_eq!(card.class_name, "grid-item");
        assert_eq!(SectionProps::default().variant, SectionVariant::Section);
    }
}
