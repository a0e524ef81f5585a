//! Message channel between the projects view and the project store.
//!
//! Sends are fire-and-forget; answers arrive later as independent inbound
//! pushes. Nothing correlates a push with the request that caused it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use tokio::sync::broadcast;

use crate::error::ChannelError;

/// Wire names of the store messages.
pub mod event_names {
    pub const GET_PROJECTS: &str = "get-projects";
    pub const SHOW_ADD_PROJECT: &str = "show-add-project";
    pub const SET_PROJECTS: &str = "set-projects";
}

/// Requests sent by the view to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outbound {
    /// Ask for the full project set.
    RequestProjects,
    /// Ask the store to open its add-project flow.
    RequestAddProjectUi,
}

impl Outbound {
    pub fn name(&self) -> &'static str {
        match self {
            Outbound::RequestProjects => event_names::GET_PROJECTS,
            Outbound::RequestAddProjectUi => event_names::SHOW_ADD_PROJECT,
        }
    }
}

/// Notifications pushed by the store to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inbound {
    /// Carries the complete, ordered project set.
    ProjectsUpdated,
}

impl Inbound {
    pub fn name(&self) -> &'static str {
        match self {
            Inbound::ProjectsUpdated => event_names::SET_PROJECTS,
        }
    }
}

pub type InboundHandler = Arc<dyn Fn(&Value) + Send + Sync>;

/// Identifies a registered handler so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub u64);

/// Capability to talk to the project store.
pub trait StoreChannel: Send + Sync {
    /// Sends a request without waiting for any answer.
    fn send(&self, message: Outbound, payload: Value) -> Result<(), ChannelError>;

    /// Registers a handler for an inbound notification.
    fn on_receive(&self, message: Inbound, handler: InboundHandler) -> HandlerId;

    /// Removes a handler registered with [`StoreChannel::on_receive`].
    /// Unknown ids are ignored.
    fn off_receive(&self, message: Inbound, id: HandlerId);
}

/// An outbound request as observed by store-side subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub message: Outbound,
    pub payload: Value,
}

type HandlerMap = HashMap<Inbound, Vec<(HandlerId, InboundHandler)>>;

/// In-process store channel.
///
/// Outbound requests fan out over a `tokio::sync::broadcast` channel, so a
/// store task (or a test) subscribes to see them. Inbound notifications are
/// injected with [`LocalChannel::deliver`].
pub struct LocalChannel {
    sender: broadcast::Sender<OutboundMessage>,
    handlers: Mutex<HandlerMap>,
    next_id: AtomicU64,
    closed: AtomicBool,
}

impl LocalChannel {
    /// Creates a channel buffering up to `capacity` outbound requests per
    /// subscriber. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            handlers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        }
    }

    fn lock_handlers(&self) -> MutexGuard<'_, HandlerMap> {
        self.handlers.lock().unwrap_or_else(|poisoned| {
            log::warn!("Channel handler lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OutboundMessage> {
        self.sender.subscribe()
    }

    /// Invokes every handler registered for `message`, in registration
    /// order, and returns how many ran.
    pub fn deliver(&self, message: Inbound, payload: &Value) -> usize {
        // Handlers run outside the lock so they may register or deliver.
        let handlers: Vec<InboundHandler> = self
            .lock_handlers()
            .get(&message)
            .map(|entries| entries.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default();

        log::debug!(
            "Delivering '{}' to {} handler(s)",
            message.name(),
            handlers.len()
        );
        for handler in &handlers {
            handler(payload);
        }
        handlers.len()
    }

    pub fn handler_count(&self, message: Inbound) -> usize {
        self.lock_handlers().get(&message).map_or(0, Vec::len)
    }

    /// Rejects every later send.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Default for LocalChannel {
    fn default() -> Self {
        Self::new(64)
    }
}

impl StoreChannel for LocalChannel {
    fn send(&self, message: Outbound, payload: Value) -> Result<(), ChannelError> {
        if self.is_closed() {
            return Err(ChannelError::Closed);
        }
        log::debug!("Sending '{}' to project store", message.name());
        // Ignore errors - no active store subscriber is fine
        let _ = self.sender.send(OutboundMessage { message, payload });
        Ok(())
    }

    fn on_receive(&self, message: Inbound, handler: InboundHandler) -> HandlerId {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.lock_handlers()
            .entry(message)
            .or_default()
            .push((id, handler));
        id
    }

    fn off_receive(&self, message: Inbound, id: HandlerId) {
        let mut guard = self.lock_handlers();
        if let Some(entries) = guard.get_mut(&message) {
            entries.retain(|(entry_id, _)| *entry_id != id);
            if entries.is_empty() {
                guard.remove(&message);
            }
        }
    }
}
