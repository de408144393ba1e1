//! The notification dispatcher collaborator.
//!
//! The session calls [`Notifier::notify`] once per arrival and does not wait
//! for delivery.  Platform push delivery lives outside this crate; the
//! implementations here log or forward to a channel.

use tokio::sync::mpsc;

/// A user-facing notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body:  String,
}

impl Notification {
    /// The message shown when the observer enters the trigger radius.
    pub fn arrival(distance_m: f64) -> Self {
        Self {
            title: "Approaching target!".to_owned(),
            body:  format!("You are {} m from the target.", distance_m.round() as i64),
        }
    }
}

/// Fire-and-forget notification sink.
pub trait Notifier: Send {
    fn notify(&self, title: &str, body: &str);
}

/// Writes notifications to the `log` facade at `info`.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, body: &str) {
        log::info!("notification: {title} {body}");
    }
}

/// Forwards notifications to a background delivery task.
#[derive(Clone, Debug)]
pub struct ChannelNotifier(pub mpsc::UnboundedSender<Notification>);

impl ChannelNotifier {
    /// Create a notifier and the receiver the delivery task reads from.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self(tx), rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, title: &str, body: &str) {
        let sent = self.0.send(Notification { title: title.to_owned(), body: body.to_owned() });
        if sent.is_err() {
            log::warn!("notification dropped, delivery task has gone away: {title}");
        }
    }
}

impl<F> Notifier for F
where
    F: Fn(&str, &str) + Send,
{
    fn notify(&self, title: &str, body: &str) {
        self(title, body)
    }
}
