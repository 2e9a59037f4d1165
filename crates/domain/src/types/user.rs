//! Team member types
//!
//! Members come from the time-tracking roster. Email is the join key with
//! chat identities.

use serde::{Deserialize, Serialize};

pub type UserId = u64;

/// A person in the time-tracking roster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_admin: bool,
}

impl TeamMember {
    /// "First Last", trimmed when either part is missing
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Lower-cased email for case-insensitive joins
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

/// An active member whose weekly hours fell below the threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelinquentRecord {
    pub member: TeamMember,
    pub hours: f64,
}
