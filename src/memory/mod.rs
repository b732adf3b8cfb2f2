//! Conversation memory for the assistant.
//!
//! A simple FIFO (First In, First Out) window over the most recent chat
//! messages. The branded system prompt is never stored here; the engine pins
//! it outside the window so trimming can never evict it.

use std::collections::VecDeque;

use crate::chat::ChatMessage;

/// Sliding window memory that keeps the N most recent messages.
///
/// Old messages are dropped automatically once the window is full, so only
/// recent context reaches the chat backend.
#[derive(Debug, Clone)]
pub struct SlidingWindowMemory {
    messages: VecDeque<ChatMessage>,
    window_size: usize,
}

impl SlidingWindowMemory {
    /// Create a new sliding window memory with the specified window size.
    ///
    /// # Panics
    ///
    /// Panics if `window_size` is 0
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "Window size must be greater than 0");
        Self {
            messages: VecDeque::with_capacity(window_size),
            window_size,
        }
    }

    /// The maximum number of messages this memory can hold.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Stores a message, evicting the oldest one when the window is full.
    pub fn remember(&mut self, message: ChatMessage) {
        if self.messages.len() >= self.window_size {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// All stored messages in chronological order.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }

    /// Removes every stored message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_evicts_oldest_message() {
        let mut memory = SlidingWindowMemory::new(3);
        for text in ["one", "two", "three", "four"] {
            memory.remember(ChatMessage::user().content(text).build());
        }
        assert_eq!(memory.len(), 3);
        assert_eq!(memory.messages()[0].content, "two");
        assert_eq!(memory.messages()[2].content, "four");
    }

    #[test]
    #[should_panic(expected = "Window size must be greater than 0")]
    fn zero_window_size_panics() {
        SlidingWindowMemory::new(0);
    }
}
