use crate::models::chat::{ Conversation, Message };

/// View-local conversation state. No validation, no dedup; the last `replace` wins.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    conversation: Conversation,
}

impl ConversationStore {
    pub fn new(initial: Conversation) -> Self {
        Self { conversation: initial }
    }

    pub fn current(&self) -> &Conversation {
        &self.conversation
    }

    /// Appends and returns the updated conversation.
    pub fn append(&mut self, message: Message) -> Conversation {
        self.conversation = self.conversation.with_message(message);
        self.conversation.clone()
    }

    pub fn replace(&mut self, conversation: Conversation) {
        self.conversation = conversation;
    }
}
