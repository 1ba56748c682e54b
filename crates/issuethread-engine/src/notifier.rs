/// Immediate, caller-facing failure notices (login required, failed code exchange).
///
/// These bypass `ThreadState::error`.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Notifier that writes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}
