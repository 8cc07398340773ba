//! Store module - the post index and the inbox, built once and shared

mod inbox;
mod index;

pub use inbox::{Contact, Inbox, InboxError, Subscriber};
pub use index::{CategoryCount, PostIndex, ALL_CATEGORIES};
