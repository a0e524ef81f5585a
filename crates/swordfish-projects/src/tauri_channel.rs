//! Store channel over Tauri application events.

use serde_json::Value;
use tauri::{AppHandle, Emitter, Listener, Runtime};

use crate::channel::{HandlerId, Inbound, InboundHandler, Outbound, StoreChannel};
use crate::error::ChannelError;

/// Bridges the view to a store living in the Tauri backend.
pub struct TauriChannel<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriChannel<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> StoreChannel for TauriChannel<R> {
    fn send(&self, message: Outbound, payload: Value) -> Result<(), ChannelError> {
        self.app
            .emit(message.name(), payload)
            .map_err(|e| ChannelError::Send {
                message: message.name().to_string(),
                reason: e.to_string(),
            })
    }

    fn on_receive(&self, message: Inbound, handler: InboundHandler) -> HandlerId {
        let name = message.name();
        let event_id = self.app.listen(name, move |event| {
            match serde_json::from_str::<Value>(event.payload()) {
                Ok(payload) => handler(&payload),
                Err(e) => {
                    log::warn!("Dropping '{}' event with undecodable payload: {}", name, e);
                }
            }
        });
        HandlerId(u64::from(event_id))
    }

    fn off_receive(&self, _message: Inbound, id: HandlerId) {
        match u32::try_from(id.0) {
            Ok(event_id) => self.app.unlisten(event_id),
            Err(_) => log::debug!("Ignoring unknown listener id {}", id.0),
        }
    }
}
