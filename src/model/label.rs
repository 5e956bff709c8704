//! Closed label sets: member status, task priority and task category.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a label does not name any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseLabelError {
    kind: &'static str,
    value: String,
    expected: String,
}

/// Case-insensitive lookup of `value` among `all`, by display label.
fn parse_label<T: Copy + fmt::Display>(
    all: &[T],
    kind: &'static str,
    value: &str,
) -> Result<T, ParseLabelError> {
    let wanted = value.trim();
    all.iter().copied().find(|v| v.to_string().eq_ignore_ascii_case(wanted)).ok_or_else(|| {
        ParseLabelError {
            kind,
            value: value.to_string(),
            expected: all.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
        }
    })
}

/// A member's current availability.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Status {
    /// Heads down on tasks.
    Working,
    /// Away for a short break.
    Break,
    /// In a meeting.
    Meeting,
    /// Not available.
    #[default]
    Offline,
}

impl Status {
    /// Every status, in display order.
    pub const ALL: [Self; 4] = [Self::Working, Self::Break, Self::Meeting, Self::Offline];

    /// Canonical label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Working => "Working",
            Self::Break => "Break",
            Self::Meeting => "Meeting",
            Self::Offline => "Offline",
        }
    }

    /// Whether a member in this status counts as active (working or in a meeting).
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Working | Self::Meeting)
    }
}

/// Urgency of a task.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Priority {
    /// Needs attention first.
    High,
    /// Normal urgency.
    #[default]
    Medium,
    /// Can wait.
    Low,
}

impl Priority {
    /// Every priority, most urgent first.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Canonical label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Kind of work a task represents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Category {
    /// Building features.
    #[default]
    Development,
    /// Visual and UX work.
    Design,
    /// Writing or running tests.
    Testing,
    /// Docs and guides.
    Documentation,
    /// Reviews, planning, people work.
    Management,
    /// Audits and hardening.
    Security,
}

impl Category {
    /// Every category.
    pub const ALL: [Self; 6] = [
        Self::Development,
        Self::Design,
        Self::Testing,
        Self::Documentation,
        Self::Management,
        Self::Security,
    ];

    /// Canonical label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "Development",
            Self::Design => "Design",
            Self::Testing => "Testing",
            Self::Documentation => "Documentation",
            Self::Management => "Management",
            Self::Security => "Security",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, "status", s)
    }
}

impl FromStr for Priority {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, "priority", s)
    }
}

impl FromStr for Category {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(&Self::ALL, "category", s)
    }
}
