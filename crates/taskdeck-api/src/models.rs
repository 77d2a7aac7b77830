// Remote collection record types
//
// Read-only mirrors of the upstream JSON. Only the fields the views use are
// modelled; everything else the upstream sends is ignored on decode.

use serde::{Deserialize, Serialize};

// ── User ─────────────────────────────────────────────────────────────

/// A user record from `GET /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub company: Company,
    #[serde(default)]
    pub address: Address,
}

/// Company block nested inside `RemoteUser`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub name: String,
}

/// Address block nested inside `RemoteUser`. Only the city is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub city: String,
}

// ── Post ─────────────────────────────────────────────────────────────

/// A post record from `GET /posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePost {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

impl RemotePost {
    /// First `max_chars` characters of the body, with an ellipsis when cut.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let mut chars = self.body.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn user_ignores_unmodelled_fields() {
        let raw = json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "city": "Gwenborough",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": { "name": "Romaguera-Crona", "bs": "harness real-time e-markets" }
        });

        let user: RemoteUser = serde_json::from_value(raw).unwrap();
        assert_eq!(user.address.city, "Gwenborough");
        assert_eq!(user.company.name, "Romaguera-Crona");
        assert_eq!(user.username, "Bret");
    }

    #[test]
    fn post_uses_camel_case_user_id() {
        let raw = json!({ "userId": 3, "id": 21, "title": "t", "body": "b" });
        let post: RemotePost = serde_json::from_value(raw).unwrap();
        assert_eq!(post.user_id, 3);

        let back = serde_json::to_value(&post).unwrap();
        assert_eq!(back["userId"], 3);
    }

    #[test]
    fn excerpt_only_marks_truncated_bodies() {
        let post = RemotePost {
            id: 1,
            user_id: 1,
            title: "t".into(),
            body: "abcdef".into(),
        };
        assert_eq!(post.excerpt(3), "abc...");
        assert_eq!(post.excerpt(6), "abcdef");
    }
}
