use crate::models::chat::Conversation;
use crate::models::ui::{ UiMessage, UiTextMessage };
use crate::participants::ParticipantRegistry;

/// Maps a conversation into the widget's message list, newest first.
pub fn map_conversation_to_ui_messages(
    conversation: &Conversation,
    registry: &ParticipantRegistry
) -> Vec<UiMessage> {
    conversation.messages
        .iter()
        .rev()
        .map(|message| {
            UiMessage::Text(UiTextMessage {
                author: registry.participant(message.author).to_ui_user(),
                created_at: message.created_at,
                id: message.id.clone(),
                text: message.content.clone(),
            })
        })
        .collect()
}
