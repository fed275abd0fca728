//! Contact message repository.

use chrono::Utc;

use harborview_core::MessageId;

use super::{JsonStore, StoreError};
use crate::models::message::{self, Message, MessagePatch, MessageStats, NewMessage};

/// Repository for the `messages` collection.
pub struct MessageRepository<'a> {
    store: &'a JsonStore,
}

impl<'a> MessageRepository<'a> {
    /// Create a new message repository.
    #[must_use]
    pub const fn new(store: &'a JsonStore) -> Self {
        Self { store }
    }

    /// Store a new submission at the front of the collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data file cannot be read or written.
    pub async fn create(&self, new: NewMessage) -> Result<Message, StoreError> {
        let message = Message::from_submission(new, Utc::now());
        let stored = message.clone();
        self.store
            .update(move |db| {
                db.messages.insert(0, stored);
                ((), true)
            })
            .await?;
        Ok(message)
    }

    /// All messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data file cannot be read.
    pub async fn list(&self) -> Result<Vec<Message>, StoreError> {
        self.store
            .read(|db| {
                let mut messages = db.messages.clone();
                message::sort_newest_first(&mut messages);
                messages
            })
            .await
    }

    /// Get a message by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data file cannot be read.
    pub async fn get(&self, id: &MessageId) -> Result<Option<Message>, StoreError> {
        self.store
            .read(|db| db.messages.iter().find(|m| &m.id == id).cloned())
            .await
    }

    /// Mark a message as read. Returns `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data file cannot be read or written.
    pub async fn mark_read(&self, id: &MessageId) -> Result<Option<Message>, StoreError> {
        self.modify(id, |m| m.mark_read(Utc::now())).await
    }

    /// Apply a staff update. Returns `None` if the message does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data file cannot be read or written.
    pub async fn update(
        &self,
        id: &MessageId,
        patch: MessagePatch,
    ) -> Result<Option<Message>, StoreError> {
        self.modify(id, |m| m.apply(patch, Utc::now())).await
    }

    /// Delete a message. Returns `false` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data file cannot be read or written.
    pub async fn delete(&self, id: &MessageId) -> Result<bool, StoreError> {
        self.store
            .update(|db| {
                let before = db.messages.len();
                db.messages.retain(|m| &m.id != id);
                let removed = db.messages.len() != before;
                (removed, removed)
            })
            .await
    }

    /// Inbox counters.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data file cannot be read.
    pub async fn stats(&self) -> Result<MessageStats, StoreError> {
        self.store
            .read(|db| MessageStats::from_messages(&db.messages))
            .await
    }

    async fn modify(
        &self,
        id: &MessageId,
        f: impl FnOnce(&mut Message),
    ) -> Result<Option<Message>, StoreError> {
        self.store
            .update(|db| match db.messages.iter_mut().find(|m| &m.id == id) {
                Some(message) => {
                    f(message);
                    (Some(message.clone()), true)
                }
                None => (None, false),
            })
            .await
    }
}
