//! Platform audio playback

use crate::error::PlaybackError;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;

/// Plays an audio file on the local machine
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    async fn play(&self, path: &Path) -> Result<(), PlaybackError>;
}

/// Program and leading arguments; the file path is appended last
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl PlayerCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

// Tried in order on platforms without a stock player
const UNIX_CANDIDATES: &[(&str, &[&str])] = &[
    ("mpg123", &["-q"]),
    ("ffplay", &["-nodisp", "-autoexit", "-loglevel", "quiet"]),
    ("mpv", &["--no-video", "--really-quiet"]),
    ("paplay", &[]),
];

/// Shells out to whatever player the platform offers
#[derive(Debug, Clone)]
pub struct SystemPlayer {
    command: Option<PlayerCommand>,
}

impl SystemPlayer {
    /// Pick a player for the running OS, searching `PATH` where needed.
    pub fn detect() -> Self {
        let player = Self::detect_with(std::env::consts::OS, |program| {
            which::which(program).is_ok()
        });
        match &player.command {
            Some(command) => tracing::debug!(program = %command.program, "Selected audio player"),
            None => tracing::debug!("No audio player found; playback disabled"),
        }
        player
    }

    fn detect_with<F>(os: &str, available: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        let command = match os {
            "windows" => Some(PlayerCommand::new("cmd", ["/C", "start", ""])),
            "macos" => Some(PlayerCommand::new("afplay", Vec::<String>::new())),
            _ => UNIX_CANDIDATES
                .iter()
                .find(|(program, _)| available(program))
                .map(|(program, args)| PlayerCommand::new(*program, args.iter().copied())),
        };
        Self { command }
    }

    pub fn with_command(command: PlayerCommand) -> Self {
        Self {
            command: Some(command),
        }
    }

    pub fn command(&self) -> Option<&PlayerCommand> {
        self.command.as_ref()
    }
}

#[async_trait]
impl AudioPlayer for SystemPlayer {
    async fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        let command = self.command.as_ref().ok_or(PlaybackError::NoPlayer)?;

        let status = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|source| PlaybackError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(PlaybackError::ExitStatus {
                program: command.program.clone(),
                status,
            });
        }
        Ok(())
    }
}

/// Skips playback entirely (`--no-playback`)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPlayback;

#[async_trait]
impl AudioPlayer for NoPlayback {
    async fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        tracing::debug!(path = %path.display(), "Playback disabled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_uses_start() {
        let player = SystemPlayer::detect_with("windows", |_| false);
        assert_eq!(
            player.command(),
            Some(&PlayerCommand::new("cmd", ["/C", "start", ""]))
        );
    }

    #[test]
    fn test_macos_uses_afplay() {
        let player = SystemPlayer::detect_with("macos", |_| false);
        assert_eq!(player.command().unwrap().program, "afplay");
    }

    #[test]
    fn test_linux_picks_first_available() {
        let player = SystemPlayer::detect_with("linux", |p| p == "ffplay" || p == "paplay");
        let command = player.command().unwrap();
        assert_eq!(command.program, "ffplay");
        assert!(command.args.contains(&"-autoexit".to_string()));
    }

    #[tokio::test]
    async fn test_no_player_available() {
        let player = SystemPlayer::detect_with("linux", |_| false);
        assert!(player.command().is_none());
        assert!(matches!(
            player.play(Path::new("response.mp3")).await,
            Err(PlaybackError::NoPlayer)
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_reported() {
        let ok = SystemPlayer::with_command(PlayerCommand::new("true", Vec::<String>::new()));
        ok.play(Path::new("response.mp3")).await.unwrap();

        let failing = SystemPlayer::with_command(PlayerCommand::new("false", Vec::<String>::new()));
        assert!(matches!(
            failing.play(Path::new("response.mp3")).await,
            Err(PlaybackError::ExitStatus { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let player = SystemPlayer::with_command(PlayerCommand::new(
            "definitely-not-an-audio-player",
            Vec::<String>::new(),
        ));
        assert!(matches!(
            player.play(Path::new("response.mp3")).await,
            Err(PlaybackError::Spawn { .. })
        ));
    }
}
