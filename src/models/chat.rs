use serde::{ Serialize, Deserialize };

use crate::participants::{ ParticipantRegistry, Role };

/// Wire form of a single message, as exchanged with the remote chat endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageDto {
    pub id: String,
    pub author_name: String,
    pub content: String,
    pub created_at: i64,
}

/// Wire form of a whole conversation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatDto {
    pub messages: Vec<ChatMessageDto>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub author: Role,
    pub content: String,
    /// Unix milliseconds.
    pub created_at: i64,
}

/// Ordered oldest first. Only ever appended to or replaced wholesale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Conversation {
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn with_message(&self, message: Message) -> Self {
        let mut messages = self.messages.clone();
        messages.push(message);
        Self { messages }
    }

    pub fn to_dto(&self, registry: &ParticipantRegistry) -> ChatDto {
        ChatDto {
            messages: self.messages
                .iter()
                .map(|m| ChatMessageDto {
                    id: m.id.clone(),
                    author_name: registry.participant(m.author).name.clone(),
                    content: m.content.clone(),
                    created_at: m.created_at,
                })
                .collect(),
        }
    }

    /// Author names are resolved to roles here, once, as the payload enters the app.
    pub fn from_dto(dto: ChatDto, registry: &ParticipantRegistry) -> Self {
        let messages = dto.messages
            .into_iter()
            .map(|m| Message {
                author: registry.resolve_role(&m.author_name),
                id: m.id,
                content: m.content,
                created_at: m.created_at,
            })
            .collect();
        Self { messages }
    }
}
