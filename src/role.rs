//! Acting role and current user.
//!
//! There is no identity system behind this. [`RoleContext::switch_role`]
//! resets the current user to the fixed identity bound to the new role; call
//! [`RoleContext::set_current_user`] afterwards to act as someone else.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identity assumed whenever the lead role is entered.
pub const LEAD_DEFAULT_USER: &str = "Sarah Wilson";

/// Identity assumed whenever the member role is entered.
pub const MEMBER_DEFAULT_USER: &str = "John Doe";

/// What the current user may see and do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Sees and manages the whole team.
    Lead,
    /// Sees their own tasks.
    #[default]
    Member,
}

impl Role {
    /// The other role.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Lead => Self::Member,
            Self::Member => Self::Lead,
        }
    }

    /// The identity bound to this role.
    #[must_use]
    pub fn default_user(self) -> &'static str {
        match self {
            Self::Lead => LEAD_DEFAULT_USER,
            Self::Member => MEMBER_DEFAULT_USER,
        }
    }

    /// Lower-case label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lead" => Ok(Self::Lead),
            "member" => Ok(Self::Member),
            other => Err(format!("unknown role '{other}' (expected lead or member)")),
        }
    }
}

/// Tracks the acting role, the current user, and the users that can be picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleContext {
    role: Role,
    current_user: String,
    available_users: Vec<String>,
}

impl RoleContext {
    /// Starts in the member role as that role's default user.
    #[must_use]
    pub fn new(available_users: Vec<String>) -> Self {
        let role = Role::default();
        Self { role, current_user: role.default_user().to_string(), available_users }
    }

    /// The acting role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Name of the current user.
    #[must_use]
    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    /// Users known to the session.
    #[must_use]
    pub fn available_users(&self) -> &[String] {
        &self.available_users
    }

    /// Sets `role`, or toggles when `None`, and resets the current user to
    /// the new role's default identity. Returns the new role.
    pub fn switch_role(&mut self, role: Option<Role>) -> Role {
        self.role = role.unwrap_or_else(|| self.role.toggled());
        self.current_user = self.role.default_user().to_string();
        tracing::debug!(role = %self.role, user = %self.current_user, "role switched");
        self.role
    }

    /// Overrides the current user without touching the role.
    pub fn set_current_user(&mut self, name: impl Into<String>) {
        self.current_user = name.into();
        tracing::debug!(user = %self.current_user, "current user set");
    }
}

impl Default for RoleContext {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
