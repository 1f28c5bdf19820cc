use flume::{Receiver, Sender};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// User facing notifications. Reducers push toasts in here, the
/// presentation layer drains them
#[derive(Clone)]
pub struct Notifications {
    sender: Sender<Toast>,
    receiver: Receiver<Toast>,
}

impl std::fmt::Debug for Notifications {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifications")
            .field("pending", &self.receiver.len())
            .finish()
    }
}

impl Default for Notifications {
    fn default() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }
}

impl Notifications {
    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&self, kind: ToastKind, message: String) {
        log::info!("toast {kind:?}: {message}");
        let _ = self.sender.send(Toast { kind, message });
    }

    pub fn receiver(&self) -> Receiver<Toast> {
        self.receiver.clone()
    }

    /// Everything that was not consumed yet
    pub fn drain(&self) -> Vec<Toast> {
        self.receiver.try_iter().collect()
    }
}
