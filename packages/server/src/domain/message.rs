//! Chat messages and their reaction counts.

use std::collections::BTreeMap;

use super::{
    identity::Identity,
    value_object::{
        Color, ConnectionId, DisplayName, MessageId, MessageText, ReactionSymbol, Timestamp,
    },
};

/// Reaction counts of one message.
///
/// Counts only ever grow, so every stored count is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reactions(BTreeMap<ReactionSymbol, u32>);

impl Reactions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one to the count of `symbol`, creating it at 1. Returns the new count.
    pub fn increment(&mut self, symbol: &ReactionSymbol) -> u32 {
        let count = self.0.entry(symbol.clone()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    pub fn count(&self, symbol: &ReactionSymbol) -> u32 {
        self.0.get(symbol).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ReactionSymbol, u32)> {
        self.0.iter().map(|(symbol, count)| (symbol, *count))
    }
}

/// A message as retained in history.
///
/// The sender's name and color are captured at send time; later renames do
/// not rewrite history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender_id: ConnectionId,
    pub sender_name: DisplayName,
    pub sender_color: Color,
    pub text: MessageText,
    pub timestamp: Timestamp,
    pub reactions: Reactions,
}

impl ChatMessage {
    pub fn new(id: MessageId, sender: &Identity, text: MessageText, timestamp: Timestamp) -> Self {
        Self {
            id,
            sender_id: sender.connection_id.clone(),
            sender_name: sender.display_name.clone(),
            sender_color: sender.color.clone(),
            text,
            timestamp,
            reactions: Reactions::new(),
        }
    }
}
