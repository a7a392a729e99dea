use chrono::Utc;
use log::{ error, info, warn };
use std::sync::Arc;
use std::time::Duration;

use crate::adapter::map_conversation_to_ui_messages;
use crate::cli::Args;
use crate::client::ConversationSync;
use crate::error::ChatError;
use crate::ids::IdGenerator;
use crate::models::chat::{ Conversation, Message };
use crate::models::ui::{ PartialText, UiMessage };
use crate::participants::{ ParticipantRegistry, Role };
use crate::store::ConversationStore;

pub const DEFAULT_GREETING: &str = "Hello! How are you?";
pub const DEFAULT_PERSONA_TITLE: &str = "🥸 Thadeus the Therapist";

#[derive(Debug, Clone)]
pub struct ChatViewConfig {
    pub persona_title: String,
    pub greeting: String,
    /// Fixed pause before each remote call. Zero disables it.
    pub think_delay: Duration,
}

impl Default for ChatViewConfig {
    fn default() -> Self {
        Self {
            persona_title: DEFAULT_PERSONA_TITLE.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            think_delay: Duration::ZERO,
        }
    }
}

impl From<&Args> for ChatViewConfig {
    fn from(args: &Args) -> Self {
        Self {
            persona_title: args.persona_title.clone(),
            greeting: args.greeting.clone(),
            think_delay: Duration::from_millis(args.think_delay_ms),
        }
    }
}

/// One mounted chat screen. Owns its conversation exclusively; dropping the view drops the conversation.
pub struct ChatView {
    config: ChatViewConfig,
    registry: ParticipantRegistry,
    store: ConversationStore,
    sync: Arc<dyn ConversationSync>,
    ids: Arc<dyn IdGenerator>,
}

impl ChatView {
    /// Mounts the view with a single therapist greeting.
    pub fn mount(
        config: ChatViewConfig,
        registry: ParticipantRegistry,
        sync: Arc<dyn ConversationSync>,
        ids: Arc<dyn IdGenerator>
    ) -> Self {
        let seed = Message {
            id: ids.next_id(),
            author: Role::Therapist,
            content: config.greeting.clone(),
            created_at: Utc::now().timestamp_millis(),
        };
        if !config.think_delay.is_zero() {
            warn!("Think delay of {:?} will be applied before every remote call", config.think_delay);
        }

        Self {
            config,
            registry,
            store: ConversationStore::new(Conversation::new(vec![seed])),
            sync,
            ids,
        }
    }

    pub fn persona_title(&self) -> &str {
        &self.config.persona_title
    }

    pub fn registry(&self) -> &ParticipantRegistry {
        &self.registry
    }

    pub fn conversation(&self) -> &Conversation {
        self.store.current()
    }

    /// Renderable messages, newest first.
    pub fn messages(&self) -> Vec<UiMessage> {
        map_conversation_to_ui_messages(self.store.current(), &self.registry)
    }

    /// Send callback: optimistic append, then replace with the remote reply.
    pub async fn handle_send_press(&mut self, message: PartialText) -> Result<(), ChatError> {
        let new_message = Message {
            id: self.ids.next_id(),
            author: Role::Me,
            content: message.text,
            created_at: Utc::now().timestamp_millis(),
        };
        let local_chat = self.chat_after_press_send(new_message);
        self.update_chat_with_api_reply(&local_chat).await
    }

    fn chat_after_press_send(&mut self, message: Message) -> Conversation {
        info!("Appending local message {} (optimistic)", message.id);
        self.store.append(message)
    }

    async fn update_chat_with_api_reply(&mut self, local_chat: &Conversation) -> Result<(), ChatError> {
        if !self.config.think_delay.is_zero() {
            tokio::time::sleep(self.config.think_delay).await;
        }

        let payload = local_chat.to_dto(&self.registry);
        let reply = self.sync.respond_to(&payload).await.map_err(|e| {
            error!("Remote sync failed: {}", e);
            ChatError::Responding(e)
        })?;

        let new_chat = Conversation::from_dto(reply, &self.registry);
        info!("Conversation synced ({} messages)", new_chat.len());
        self.store.replace(new_chat);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SyncError;
    use crate::ids::SequentialIds;
    use crate::models::chat::{ ChatDto, ChatMessageDto };
    use async_trait::async_trait;
    use std::error::Error as _;
    use std::sync::Mutex;
    use tokio::time::Instant;

    /// Records every payload and appends a fixed therapist reply.
    #[derive(Default)]
    struct ScriptedSync {
        received: Mutex<Vec<ChatDto>>,
    }

    #[async_trait]
    impl ConversationSync for ScriptedSync {
        async fn respond_to(&self, chat: &ChatDto) -> Result<ChatDto, SyncError> {
            self.received.lock().unwrap().push(chat.clone());
            let mut reply = chat.clone();
            reply.messages.push(ChatMessageDto {
                id: format!("reply-{}", chat.messages.len()),
                author_name: "Therapist".into(),
                content: "How does that make you feel?".into(),
                created_at: 0,
            });
            Ok(reply)
        }
    }

    struct FailingSync {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl ConversationSync for FailingSync {
        async fn respond_to(&self, _chat: &ChatDto) -> Result<ChatDto, SyncError> {
            *self.calls.lock().unwrap() += 1;
            Err(SyncError::Status {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                body: "tunnel closed".into(),
            })
        }
    }

    fn mount(sync: Arc<dyn ConversationSync>) -> ChatView {
        let ids = Arc::new(SequentialIds::new("id"));
        let registry = ParticipantRegistry::new("me", "therapist", ids.as_ref());
        ChatView::mount(ChatViewConfig::default(), registry, sync, ids)
    }

    fn texts(view: &ChatView) -> Vec<String> {
        view.messages()
            .iter()
            .map(|m| m.text().to_string())
            .collect()
    }

    #[test]
    fn mounts_with_greeting_from_therapist() {
        let view = mount(Arc::new(ScriptedSync::default()));
        assert_eq!(view.conversation().len(), 1);
        let ui = view.messages();
        assert_eq!(ui[0].text(), DEFAULT_GREETING);
        assert_eq!(ui[0].author(), &view.registry().therapist().to_ui_user());
        assert_eq!(view.persona_title(), DEFAULT_PERSONA_TITLE);
    }

    #[tokio::test]
    async fn send_appends_optimistically_before_the_remote_call() {
        let sync = Arc::new(ScriptedSync::default());
        let mut view = mount(sync.clone());

        view.handle_send_press(PartialText::from("hi")).await.unwrap();

        let received = sync.received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let sent = &received[0].messages;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].content, DEFAULT_GREETING);
        assert_eq!(sent[1].content, "hi");
        assert_eq!(sent[1].author_name, "me");
    }

    #[tokio::test]
    async fn reply_replaces_the_store() {
        let mut view = mount(Arc::new(ScriptedSync::default()));
        view.handle_send_press(PartialText::from("hi")).await.unwrap();

        assert_eq!(view.conversation().len(), 3);
        assert_eq!(
            texts(&view),
            vec!["How does that make you feel?", "hi", DEFAULT_GREETING]
        );
        assert_eq!(view.conversation().messages[2].author, Role::Therapist);
    }

    #[tokio::test]
    async fn failed_sync_keeps_the_optimistic_message() {
        let sync = Arc::new(FailingSync { calls: Mutex::new(0) });
        let mut view = mount(sync.clone());

        let err = view.handle_send_press(PartialText::from("hi")).await.unwrap_err();

        assert_eq!(err.to_string(), "Error responding:");
        assert!(err.source().is_some());
        assert!(matches!(err, ChatError::Responding(SyncError::Status { .. })));
        assert_eq!(*sync.calls.lock().unwrap(), 1);
        assert_eq!(texts(&view), vec!["hi", DEFAULT_GREETING]);
    }

    #[tokio::test]
    async fn message_ids_stay_unique_across_sends() {
        let mut view = mount(Arc::new(ScriptedSync::default()));
        view.handle_send_press(PartialText::from("one")).await.unwrap();
        view.handle_send_press(PartialText::from("two")).await.unwrap();

        let mut ids: Vec<_> = view
            .conversation()
            .messages.iter()
            .map(|m| m.id.clone())
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 5);
    }

    /// Records when the remote call arrives.
    struct TimedSync {
        called_at: Mutex<Option<Instant>>,
    }

    #[async_trait]
    impl ConversationSync for TimedSync {
        async fn respond_to(&self, chat: &ChatDto) -> Result<ChatDto, SyncError> {
            *self.called_at.lock().unwrap() = Some(Instant::now());
            Ok(chat.clone())
        }
    }

    #[tokio::test]
    async fn think_delay_is_applied_before_the_remote_call() {
        let delay = Duration::from_millis(60);
        let sync = Arc::new(TimedSync { called_at: Mutex::new(None) });
        let ids = Arc::new(SequentialIds::new("id"));
        let registry = ParticipantRegistry::new("me", "therapist", ids.as_ref());
        let config = ChatViewConfig {
            think_delay: delay,
            ..ChatViewConfig::default()
        };
        let mut view = ChatView::mount(config, registry, sync.clone(), ids);

        let started = Instant::now();
        view.handle_send_press(PartialText::from("hi")).await.unwrap();

        let called_at = sync.called_at.lock().unwrap().expect("remote call made");
        assert!(called_at.duration_since(started) >= delay);
        assert_eq!(view.conversation().len(), 2);
    }

    #[tokio::test]
    async fn zero_delay_calls_the_remote_right_away() {
        let sync = Arc::new(TimedSync { called_at: Mutex::new(None) });
        let mut view = mount(sync.clone());

        let started = Instant::now();
        view.handle_send_press(PartialText::from("hi")).await.unwrap();

        let called_at = sync.called_at.lock().unwrap().expect("remote call made");
        assert!(called_at.duration_since(started) < Duration::from_millis(500));
    }

    #[test]
    fn optimistic_append_is_visible_before_any_sync() {
        let sync = Arc::new(FailingSync { calls: Mutex::new(0) });
        let mut view = mount(sync.clone());

        let local = view.chat_after_press_send(Message {
            id: "local-1".into(),
            author: Role::Me,
            content: "hi".into(),
            created_at: 0,
        });

        assert_eq!(*sync.calls.lock().unwrap(), 0);
        assert_eq!(view.conversation().len(), 2);
        assert_eq!(&local, view.conversation());
        assert_eq!(texts(&view), vec!["hi", DEFAULT_GREETING]);
    }
}
