//! In-memory newsletter subscribers and contact messages

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InboxError {
    #[error("Email already subscribed")]
    AlreadySubscribed,
}

/// A newsletter subscriber
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subscriber {
    pub id: u64,
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}

/// A contact form submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug)]
struct InboxState {
    subscribers: Vec<Subscriber>,
    contacts: Vec<Contact>,
    next_subscriber_id: u64,
    next_contact_id: u64,
}

/// Append-only store; contents are lost on restart
#[derive(Debug)]
pub struct Inbox {
    state: RwLock<InboxState>,
}

impl Inbox {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(InboxState {
                subscribers: Vec::new(),
                contacts: Vec::new(),
                next_subscriber_id: 1,
                next_contact_id: 1,
            }),
        }
    }

    /// Add a subscriber unless the email is already present
    pub async fn subscribe(&self, email: &str) -> Result<Subscriber, InboxError> {
        let mut state = self.state.write().await;
        if state.subscribers.iter().any(|s| s.email == email) {
            return Err(InboxError::AlreadySubscribed);
        }

        let subscriber = Subscriber {
            id: state.next_subscriber_id,
            email: email.to_string(),
            subscribed_at: Utc::now(),
        };
        state.next_subscriber_id += 1;
        state.subscribers.push(subscriber.clone());
        Ok(subscriber)
    }

    pub async fn subscriber_by_email(&self, email: &str) -> Option<Subscriber> {
        let state = self.state.read().await;
        state.subscribers.iter().find(|s| s.email == email).cloned()
    }

    pub async fn add_contact(&self, name: &str, email: &str, message: &str) -> Contact {
        let mut state = self.state.write().await;
        let contact = Contact {
            id: state.next_contact_id,
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            submitted_at: Utc::now(),
        };
        state.next_contact_id += 1;
        state.contacts.push(contact.clone());
        contact
    }

    #[cfg(test)]
    async fn subscriber_count(&self) -> usize {
        self.state.read().await.subscribers.len()
    }

    #[cfg(test)]
    async fn contact_count(&self) -> usize {
        self.state.read().await.contacts.len()
    }
}

impl Default for Inbox {
    fn default() -> Self {
        Self::new()
    }
}
