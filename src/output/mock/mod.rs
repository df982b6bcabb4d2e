use parking_lot::RwLock;
use std::sync::Arc;

use crate::output::{GameOutput, Message};

#[derive(Clone, Default)]
pub struct MockGameOutput {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl MockGameOutput {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn flush(&self) -> Vec<Message> {
        std::mem::replace(&mut *self.messages.write(), Vec::new())
    }

    pub fn contains(&self, message: &Message) -> bool {
        self.messages.read().iter().any(|m| m == message)
    }
}

impl GameOutput for MockGameOutput {
    fn say(&self, message: &Message) {
        self.messages.write().push(message.clone());
    }
}
