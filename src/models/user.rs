//! User records and roles.
//!
//! DESIGN
//! ======
//! `UserRecord` is a tagged union keyed by `userType`. Records written by
//! this crate always carry the tag. Backend profile DTOs and records
//! persisted by older clients may lack it, so deserialization falls back to
//! the role-specific field (`expertise` for mentors, `fieldOfStudy` for
//! students). A record with neither is rejected rather than guessed.

#[cfg(test)]
#[path = "user_test.rs"]
mod user_test;

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const STUDENT_DASHBOARD: &str = "/cabinet-student";
pub const MENTOR_DASHBOARD: &str = "/cabinet-mentor";

// =============================================================================
// ROLE
// =============================================================================

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Mentor,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Mentor => "mentor",
        }
    }

    /// Landing route for a signed-in user of this role.
    #[must_use]
    pub fn dashboard_path(self) -> &'static str {
        match self {
            Self::Student => STUDENT_DASHBOARD,
            Self::Mentor => MENTOR_DASHBOARD,
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
            "student" => Ok(Self::Student),
            "mentor" => Ok(Self::Mentor),
            other => Err(format!("unknown user type: {other}")),
        }
    }
}

// =============================================================================
// USER ID
// =============================================================================

/// Backend identifier. Older endpoints emit numbers, newer ones strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for UserId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) if !s.is_empty() => Ok(Self(s)),
            serde_json::Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(D::Error::custom(format!("expected string or number id, got {other}"))),
        }
    }
}

// =============================================================================
// PROFILES
// =============================================================================

/// Fields shared by every account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCommon {
    pub id: UserId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl UserCommon {
    /// `name`, else `first last`, else the e-mail address.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_owned();
        }
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if full.is_empty() { self.email.clone() } else { full }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(flatten)]
    pub user: UserCommon,
    pub field_of_study: String,
    #[serde(default)]
    pub education_level: String,
    #[serde(default)]
    pub learning_goals: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub is_available_for_mentorship: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorProfile {
    #[serde(flatten)]
    pub user: UserCommon,
    pub expertise: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
}

// =============================================================================
// USER RECORD
// =============================================================================

/// The signed-in account, discriminated by role.
#[derive(Debug, Clone, PartialEq)]
pub enum UserRecord {
    Student(StudentProfile),
    Mentor(MentorProfile),
}

impl UserRecord {
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::Student(_) => Role::Student,
            Self::Mentor(_) => Role::Mentor,
        }
    }

    #[must_use]
    pub fn common(&self) -> &UserCommon {
        match self {
            Self::Student(s) => &s.user,
            Self::Mentor(m) => &m.user,
        }
    }

    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.common().id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.common().email
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        self.common().display_name()
    }

    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.common().is_verified
    }
}

#[derive(Serialize)]
#[serde(tag = "userType", rename_all = "lowercase")]
enum TaggedRef<'a> {
    Student(&'a StudentProfile),
    Mentor(&'a MentorProfile),
}

impl Serialize for UserRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Student(s) => TaggedRef::Student(s).serialize(serializer),
            Self::Mentor(m) => TaggedRef::Mentor(m).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for UserRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let role = match value.get("userType").and_then(serde_json::Value::as_str) {
            Some(tag) => tag.parse::<Role>().map_err(D::Error::custom)?,
            None => infer_role(&value)
                .ok_or_else(|| D::Error::custom("cannot determine user role: no userType, expertise or fieldOfStudy"))?,
        };
        match role {
            Role::Student => serde_json::from_value(value)
                .map(Self::Student)
                .map_err(D::Error::custom),
            Role::Mentor => serde_json::from_value(value)
                .map(Self::Mentor)
                .map_err(D::Error::custom),
        }
    }
}

/// Legacy fallback for untagged records.
fn infer_role(value: &serde_json::Value) -> Option<Role> {
    if value.get("expertise").is_some() {
        Some(Role::Mentor)
    } else if value.get("fieldOfStudy").is_some() {
        Some(Role::Student)
    } else {
        None
    }
}
