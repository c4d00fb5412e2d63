//! Best-effort adhan alert: play the clip, then notify if allowed. Nothing in
//! here can fail the caller.

use crate::errors::AlertError;
use tracing::warn;

pub const ADHAN_URL: &str = "https://islamcan.com/audio/adhan/azan1.mp3";
pub const NOTIFICATION_TITLE: &str = "Prayer Time";
pub const NOTIFICATION_BODY: &str = "It's time to pray";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// Not asked yet.
    Default,
}

pub trait AudioPlayer {
    fn play(&mut self, url: &str) -> Result<(), AlertError>;
}

pub trait Notifier {
    fn permission(&self) -> Permission;
    fn request_permission(&mut self);
    fn notify(&mut self, title: &str, body: &str) -> Result<(), AlertError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    Shown,
    PermissionRequested,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertOutcome {
    pub played: bool,
    pub notification: NotificationOutcome,
}

pub fn play_adhan(audio: &mut impl AudioPlayer, notifier: &mut impl Notifier) -> AlertOutcome {
    let played = match audio.play(ADHAN_URL) {
        Ok(()) => true,
        Err(err) => {
            warn!("prayer alert: {err}");
            false
        }
    };

    let notification = match notifier.permission() {
        Permission::Granted => match notifier.notify(NOTIFICATION_TITLE, NOTIFICATION_BODY) {
            Ok(()) => NotificationOutcome::Shown,
            Err(err) => {
                warn!("prayer alert: {err}");
                NotificationOutcome::Failed
            }
        },
        Permission::Default => {
            notifier.request_permission();
            NotificationOutcome::PermissionRequested
        }
        Permission::Denied => NotificationOutcome::Skipped,
    };

    AlertOutcome { played, notification }
}
