//! Wire types shared between the web client and the remote matchmaking API.
//!
//! The client does not own these contracts; they mirror what the backend
//! serves today. Unknown fields are ignored on deserialization so backend
//! additions never break deployed clients.

use serde::{Deserialize, Serialize};

/// Path of the smart-reply suggestion endpoint.
pub const SUGGEST_REPLY_PATH: &str = "/ai/suggest-reply";

/// `GET /match/status/{user_id}`.
pub fn match_status_path(user_id: &str) -> String {
    format!("/match/status/{user_id}")
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPhase {
    Waiting,
    Matched,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartnerProfile {
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Response body of the match-status poll.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchStatus {
    pub status: MatchPhase,
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub partner: Option<PartnerProfile>,
}

impl MatchStatus {
    pub const fn is_matched(&self) -> bool {
        matches!(self.status, MatchPhase::Matched)
    }
}

/// Request body of `POST /ai/suggest-reply`. The backend names these fields
/// in camelCase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestRequest {
    pub context: String,
    pub user_id: String,
    pub partner_user_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waiting_status_omits_the_optional_fields() {
        let status: MatchStatus = serde_json::from_str(r#"{"status": "waiting"}"#).unwrap();

        assert_eq!(status.status, MatchPhase::Waiting);
        assert!(!status.is_matched());
        assert_eq!(status.chat_id, None);
        assert_eq!(status.partner, None);
    }

    #[test]
    fn matched_status_carries_chat_and_partner() {
        let status: MatchStatus = serde_json::from_str(
            r#"{
                "status": "matched",
                "chat_id": "chat-17",
                "partner": {
                    "user_id": "u-42",
                    "display_name": "Sam",
                    "avatar_url": "https://example.test/sam.png"
                },
                "matched_at": "2024-05-01T12:00:00Z"
            }"#,
        )
        .unwrap();

        assert!(status.is_matched());
        assert_eq!(status.chat_id.as_deref(), Some("chat-17"));
        let partner = status.partner.unwrap();
        assert_eq!(partner.display_name, "Sam");
        assert_eq!(partner.avatar_url.as_deref(), Some("https://example.test/sam.png"));
    }

    #[test]
    fn suggest_request_serializes_in_camel_case() {
        let request = SuggestRequest {
            context: "hey!".into(),
            user_id: "u-1".into(),
            partner_user_id: "u-2".into(),
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "context": "hey!",
                "userId": "u-1",
                "partnerUserId": "u-2",
            })
        );
    }

    #[test]
    fn suggestions_deserialize_as_a_plain_list() {
        let response: SuggestResponse =
            serde_json::from_str(r#"{"suggestions": ["Hi!", "How was your day?"]}"#).unwrap();

        assert_eq!(response.suggestions.len(), 2);
    }

    #[test]
    fn status_path_embeds_the_user_id() {
        assert_eq!(match_status_path("u-42"), "/match/status/u-42");
    }
}
