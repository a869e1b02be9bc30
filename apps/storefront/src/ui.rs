//! # UI Collaborators
//!
//! The two capabilities controllers need from whatever renders them: a toast
//! (`Notifier`) and a yes/no modal (`Confirmer`).
//!
//! ```text
//! controller ──notify(kind, title, message)──► Notifier    (fire-and-forget)
//! controller ──confirm(options).await────────► Confirmer   (user decides)
//! ```
//!
//! Headless runs use [`LogNotifier`] and [`AutoConfirmer`].

use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

// =============================================================================
// Notifications
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        };
        write!(f, "{}", s)
    }
}

/// Shows a transient message.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, title: &str, message: &str);

    fn success(&self, title: &str, message: &str) {
        self.notify(NotificationKind::Success, title, message);
    }

    fn error(&self, title: &str, message: &str) {
        self.notify(NotificationKind::Error, title, message);
    }

    fn warning(&self, title: &str, message: &str) {
        self.notify(NotificationKind::Warning, title, message);
    }

    fn info(&self, title: &str, message: &str) {
        self.notify(NotificationKind::Info, title, message);
    }
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: NotificationKind, title: &str, message: &str) {
        match kind {
            NotificationKind::Error => error!(%kind, title, message, "Notification"),
            NotificationKind::Warning => warn!(%kind, title, message, "Notification"),
            NotificationKind::Success | NotificationKind::Info => {
                info!(%kind, title, message, "Notification")
            }
        }
    }
}

/// One delivered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

/// Keeps every notification for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything notified so far, oldest first.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// The most recent notification.
    pub fn last(&self) -> Option<Notification> {
        self.sent().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NotificationKind, title: &str, message: &str) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(Notification {
                kind,
                title: title.to_string(),
                message: message.to_string(),
            });
        }
    }
}

// =============================================================================
// Confirmation
// =============================================================================

/// Visual weight of a confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmTone {
    Danger,
    Warning,
    Info,
}

/// What the dialog says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationOptions {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    pub tone: ConfirmTone,
}

impl ConfirmationOptions {
    /// Irreversible delete of `item_name` (or of an unnamed item).
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_storefront::ui::{ConfirmTone, ConfirmationOptions};
    ///
    /// let opts = ConfirmationOptions::delete(Some("1984"));
    /// assert_eq!(opts.title, "Confirm Deletion");
    /// assert_eq!(opts.tone, ConfirmTone::Danger);
    /// assert!(opts.message.contains("\"1984\""));
    /// ```
    pub fn delete(item_name: Option<&str>) -> Self {
        let message = match item_name {
            Some(name) => format!(
                "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                name
            ),
            None => "Are you sure you want to delete this item? This action cannot be undone."
                .to_string(),
        };

        ConfirmationOptions {
            title: "Confirm Deletion".to_string(),
            message,
            confirm_text: "Delete".to_string(),
            cancel_text: "Cancel".to_string(),
            tone: ConfirmTone::Danger,
        }
    }

    pub fn custom_action(
        title: impl Into<String>,
        message: impl Into<String>,
        confirm_text: impl Into<String>,
    ) -> Self {
        ConfirmationOptions {
            title: title.into(),
            message: message.into(),
            confirm_text: confirm_text.into(),
            cancel_text: "Cancel".to_string(),
            tone: ConfirmTone::Warning,
        }
    }

    pub fn yes_no(title: impl Into<String>, message: impl Into<String>) -> Self {
        ConfirmationOptions {
            title: title.into(),
            message: message.into(),
            confirm_text: "Yes".to_string(),
            cancel_text: "No".to_string(),
            tone: ConfirmTone::Info,
        }
    }
}

/// The user's answer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfirmationResult {
    pub confirmed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ConfirmationResult {
    pub fn confirmed() -> Self {
        ConfirmationResult {
            confirmed: true,
            data: None,
        }
    }

    pub fn cancelled() -> Self {
        ConfirmationResult::default()
    }
}

/// Asks the user before a destructive or final action.
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, options: ConfirmationOptions) -> ConfirmationResult;
}

/// Answers every dialog the same way and records what was asked.
#[derive(Debug, Default)]
pub struct AutoConfirmer {
    answer: bool,
    asked: Mutex<Vec<ConfirmationOptions>>,
}

impl AutoConfirmer {
    /// Confirms everything.
    pub fn accepting() -> Self {
        AutoConfirmer {
            answer: true,
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Cancels everything.
    pub fn declining() -> Self {
        AutoConfirmer::default()
    }

    /// Dialogs shown so far.
    pub fn asked(&self) -> Vec<ConfirmationOptions> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Confirmer for AutoConfirmer {
    async fn confirm(&self, options: ConfirmationOptions) -> ConfirmationResult {
        info!(title = %options.title, confirmed = self.answer, "Auto-answering confirmation");
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(options);
        }
        ConfirmationResult {
            confirmed: self.answer,
            data: None,
        }
    }
}
