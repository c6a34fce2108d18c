use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;

use crate::config::AudioConfig;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio available for this verse")]
    MissingUrl,

    #[error("audio player `{player}` could not be started: {source}")]
    Spawn {
        player: String,
        #[source]
        source: std::io::Error,
    },
}

/// Hands recitation URLs to an external media player
#[derive(Clone, Debug)]
pub struct AudioLauncher {
    player: String,
    args: Vec<String>,
}

impl AudioLauncher {
    pub fn new(player: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            player: player.into(),
            args,
        }
    }

    pub fn from_config(config: &AudioConfig) -> Self {
        Self::new(config.player.clone(), config.args.clone())
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    /// Arguments passed to the player, URL last
    pub fn arguments(&self, url: &str) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(url.to_string());
        args
    }

    /// Start playback in the background. The player's stdio is detached so
    /// it cannot draw over the TUI.
    pub fn play(&self, url: &str) -> Result<(), AudioError> {
        if url.trim().is_empty() {
            return Err(AudioError::MissingUrl);
        }

        let mut child = Command::new(&self.player)
            .args(self.arguments(url))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| AudioError::Spawn {
                player: self.player.clone(),
                source,
            })?;

        tracing::info!(player = %self.player, url, "Audio player started");

        // Reap the child so it does not linger as a zombie
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => tracing::debug!(%status, "Audio player exited"),
                Err(e) => tracing::warn!(error = %e, "Failed waiting for audio player"),
            }
        });

        Ok(())
    }
}
