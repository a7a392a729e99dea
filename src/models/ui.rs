use serde::{ Serialize, Deserialize };

/// Author identity as the chat widget expects it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiUser {
    pub first_name: String,
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiTextMessage {
    pub author: UiUser,
    pub created_at: i64,
    pub id: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiMessage {
    #[serde(rename = "text")] Text(UiTextMessage),
}

impl UiMessage {
    pub fn text(&self) -> &str {
        match self {
            UiMessage::Text(m) => &m.text,
        }
    }

    pub fn author(&self) -> &UiUser {
        match self {
            UiMessage::Text(m) => &m.author,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            UiMessage::Text(m) => &m.id,
        }
    }
}

/// What the widget hands to its send callback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialText {
    pub text: String,
}

impl From<&str> for PartialText {
    fn from(text: &str) -> Self {
        Self { text: text.to_string() }
    }
}
