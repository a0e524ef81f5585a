pub mod channel;
pub mod config;
pub mod dom;
pub mod error;
pub mod layout;
pub mod project;
pub mod row;
#[cfg(feature = "tauri")]
pub mod tauri_channel;
pub mod telemetry;
pub mod toolbar;
pub mod view;

pub use channel::{
    HandlerId, Inbound, InboundHandler, LocalChannel, Outbound, OutboundMessage, StoreChannel,
};
pub use config::{load_view_config, load_view_config_from_str, ViewConfig};
pub use dom::Element;
pub use error::{ChannelError, ConfigError, Result, TelemetryError, ViewError};
pub use layout::{FixedMount, LayoutMetrics, MountPoint, ScrollRegion};
pub use project::{Project, ProjectSnapshot, ProjectStatus};
pub use row::{render_row, status_label, Column, RowStyle, COLUMNS};
#[cfg(feature = "tauri")]
pub use tauri_channel::TauriChannel;
pub use telemetry::{build_subscriber, init_logging, LoggingConfig};
pub use toolbar::{build_toolbar, ToolbarAction};
pub use view::{ActionOutcome, ProjectsView};
