//! Fire-and-forget facade over the browser Notification API. Every failure
//! here is logged and swallowed; nothing in the app depends on a
//! notification actually being shown.

use wasm_bindgen_futures::JsFuture;
use web_sys::{Notification, NotificationOptions, NotificationPermission};

pub(crate) fn request_permission() {
    match Notification::request_permission() {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(outcome) => log::debug!("notification permission: {:?}", outcome),
                Err(err) => log::warn!("notification permission request failed: {:?}", err),
            }
        }),
        Err(err) => log::warn!("could not request notification permission: {:?}", err),
    }
}

/// Browsers expose no OS-level focus or do-not-disturb state; an explicitly
/// denied permission is the closest observable signal.
pub(crate) fn is_do_not_disturb_enabled() -> bool {
    Notification::permission() == NotificationPermission::Denied
}

pub(crate) fn schedule_notification(title: &str, body: &str) {
    if is_do_not_disturb_enabled() {
        log::debug!("notifications denied, dropping: {}", title);
        return;
    }
    let options = NotificationOptions::new();
    options.set_body(body);
    if let Err(err) = Notification::new_with_options(title, &options) {
        log::warn!("could not show notification: {:?}", err);
    }
}
