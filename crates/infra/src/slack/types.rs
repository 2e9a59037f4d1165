//! Slack Web API wire types

use serde::Deserialize;
use timebot_domain::ChatUser;

/// Every Web API response carries this envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET users.list`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersListResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub email: Option<String>,
}

impl From<Member> for ChatUser {
    fn from(member: Member) -> Self {
        ChatUser { id: member.id, email: member.profile.and_then(|profile| profile.email) }
    }
}
