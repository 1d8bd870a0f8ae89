//! Desktop notifications via `osascript`.
//!
//! Notifications are fire-and-forget: the `osascript` process is spawned and not
//! waited on, so a slow notification center never delays the result document.

use crate::domain::error::{Result, ScriptFilterError};
use std::process::{Command, Stdio};

/// A desktop notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub subtitle: Option<String>,
    pub message: String,
    /// Name of a system sound, e.g. `Glass`.
    pub sound: Option<String>,
}

impl Notification {
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            message: message.into(),
            sound: None,
        }
    }

    #[must_use]
    pub fn subtitle(self, subtitle: impl Into<String>) -> Self {
        Self {
            subtitle: Some(subtitle.into()),
            ..self
        }
    }

    #[must_use]
    pub fn sound(self, sound: impl Into<String>) -> Self {
        Self {
            sound: Some(sound.into()),
            ..self
        }
    }

    /// AppleScript source that posts this notification.
    ///
    /// # Examples
    ///
    /// ```
    /// use scriptfilter::infrastructure::Notification;
    ///
    /// let script = Notification::new("Done", "Copied \"x\"").applescript();
    /// assert_eq!(script, r#"display notification "Copied \"x\"" with title "Done""#);
    /// ```
    #[must_use]
    pub fn applescript(&self) -> String {
        let mut script = format!(
            "display notification {} with title {}",
            quote(&self.message),
            quote(&self.title)
        );
        if let Some(subtitle) = &self.subtitle {
            script.push_str(&format!(" subtitle {}", quote(subtitle)));
        }
        if let Some(sound) = &self.sound {
            script.push_str(&format!(" sound name {}", quote(sound)));
        }
        script
    }

    /// Posts the notification without waiting for it to be shown.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptFilterError::Notify`] if `osascript` cannot be started.
    pub fn send(&self) -> Result<()> {
        let script = self.applescript();
        tracing::debug!(title = %self.title, "posting notification");

        Command::new("osascript")
            .args(["-e", &script])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|e| ScriptFilterError::Notify(format!("failed to run osascript: {e}")))
    }
}

/// Posts a notification.
///
/// # Errors
///
/// Returns [`ScriptFilterError::Notify`] if `osascript` cannot be started.
pub fn notify(title: &str, subtitle: Option<&str>, message: &str, sound: Option<&str>) -> Result<()> {
    let mut notification = Notification::new(title, message);
    if let Some(subtitle) = subtitle {
        notification = notification.subtitle(subtitle);
    }
    if let Some(sound) = sound {
        notification = notification.sound(sound);
    }
    notification.send()
}

/// AppleScript string literal for `text`.
fn quote(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
