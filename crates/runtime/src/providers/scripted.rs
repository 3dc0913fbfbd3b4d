use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::api::{CombatSnapshot, PlayerCommand, PlayerProvider, Result, RuntimeError};

/// Replays a fixed list of commands in order.
pub struct ScriptedProvider {
    commands: Mutex<VecDeque<PlayerCommand>>,
}

impl ScriptedProvider {
    pub fn new(commands: impl IntoIterator<Item = PlayerCommand>) -> Self {
        Self {
            commands: Mutex::new(commands.into_iter().collect()),
        }
    }

    pub async fn remaining(&self) -> usize {
        self.commands.lock().await.len()
    }
}

#[async_trait]
impl PlayerProvider for ScriptedProvider {
    async fn next_command(&self, _snapshot: &CombatSnapshot) -> Result<PlayerCommand> {
        self.commands
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| RuntimeError::Provider("scripted commands exhausted".to_string()))
    }
}
