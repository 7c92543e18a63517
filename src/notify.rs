//! Notification capability, resolved once at startup. Two tiers only: the
//! platform desktop facility where available, otherwise the in-app blocking
//! alert that the UI raises for [`Delivery::Fallback`].

#[cfg(any(target_os = "linux", target_os = "macos"))]
use notify_rust::Notification;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notifier {
    Desktop,
    AlertOnly,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// Desktop delivery unavailable or refused; the body comes back so the
    /// caller can raise a blocking alert instead.
    Fallback(String),
}

impl Notifier {
    pub fn resolve() -> Self {
        if cfg!(any(target_os = "linux", target_os = "macos")) {
            Notifier::Desktop
        } else {
            Notifier::AlertOnly
        }
    }

    pub fn deliver(self, body: &str) -> Delivery {
        match self {
            Notifier::Desktop if send_desktop_notification(body) => Delivery::Delivered,
            _ => Delivery::Fallback(body.to_string()),
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
fn send_desktop_notification(body: &str) -> bool {
    match Notification::new().summary("BenBot").body(body).show() {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(error = %err, "desktop notification failed");
            false
        }
    }
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn send_desktop_notification(_body: &str) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_only_always_falls_back_with_the_body() {
        let delivery = Notifier::AlertOnly.deliver("VPN actif avec IP: 1.2.3.4");
        assert_eq!(
            delivery,
            Delivery::Fallback("VPN actif avec IP: 1.2.3.4".to_string())
        );
    }
}
