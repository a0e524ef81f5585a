//! Sizing of the scrollable table region.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::channel::HandlerId;

/// Fallback chrome allowance reserved for the toolbar, in pixels.
pub const DEFAULT_CHROME_ALLOWANCE: i64 = 65;

/// Content-box measurements read from the host on each resize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutMetrics {
    /// Client height of the window body.
    pub body_height: i64,
    /// Client width of the view's container.
    pub container_width: i64,
}

/// Size applied to the scrollable table container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollRegion {
    pub width: u32,
    pub height: u32,
}

impl ScrollRegion {
    /// Fits the region into the body minus the toolbar allowance. Negative
    /// results clamp to zero.
    pub fn fit(metrics: &LayoutMetrics, chrome_allowance: i64) -> Self {
        Self {
            width: clamp_px(metrics.container_width),
            height: clamp_px(metrics.body_height.saturating_sub(chrome_allowance)),
        }
    }
}

fn clamp_px(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

pub type ResizeHandler = Arc<dyn Fn() + Send + Sync>;

/// The element hosting the view, as seen by the view.
pub trait MountPoint: Send + Sync {
    /// Current layout measurements.
    fn metrics(&self) -> LayoutMetrics;

    /// Registers a handler run once per window resize.
    fn on_resize(&self, handler: ResizeHandler) -> HandlerId;

    /// Removes a handler registered with [`MountPoint::on_resize`].
    /// Unknown ids are ignored.
    fn off_resize(&self, id: HandlerId);
}

/// In-memory mount point with host-controlled metrics.
#[derive(Default)]
pub struct FixedMount {
    metrics: Mutex<LayoutMetrics>,
    handlers: Mutex<Vec<(HandlerId, ResizeHandler)>>,
    next_id: AtomicU64,
}

impl FixedMount {
    pub fn new(metrics: LayoutMetrics) -> Self {
        Self {
            metrics: Mutex::new(metrics),
            handlers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    fn lock_handlers(&self) -> MutexGuard<'_, Vec<(HandlerId, ResizeHandler)>> {
        self.handlers.lock().unwrap_or_else(|poisoned| {
            log::warn!("Mount handler lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub fn handler_count(&self) -> usize {
        self.lock_handlers().len()
    }

    pub fn set_metrics(&self, metrics: LayoutMetrics) {
        let mut guard = self.metrics.lock().unwrap_or_else(|poisoned| {
            log::warn!("Mount metrics lock was poisoned, recovering");
            poisoned.into_inner()
        });
        *guard = metrics;
    }

    /// Updates the metrics and notifies every resize handler.
    pub fn resize_to(&self, metrics: LayoutMetrics) {
        self.set_metrics(metrics);
        self.fire_resize();
    }

    pub fn fire_resize(&self) {
        let handlers: Vec<ResizeHandler> =
            self.lock_handlers().iter().map(|(_, h)| h.clone()).collect();
        for handler in handlers {
            handler();
        }
    }
}

impl MountPoint for FixedMount {
    fn metrics(&self) -> LayoutMetrics {
        match self.metrics.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn on_resize(&self, handler: ResizeHandler) -> HandlerId {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.lock_handlers().push((id, handler));
        id
    }

    fn off_resize(&self, id: HandlerId) {
        self.lock_handlers().retain(|(entry_id, _)| *entry_id != id);
    }
}
