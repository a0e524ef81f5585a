//! Test harness for isolated view tests.
//!
//! `ViewHarness` owns a `LocalChannel` standing in for the project store, a
//! `FixedMount` standing in for the window, and a subscription to every
//! request the view sends.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::broadcast;

use swordfish_projects::{
    FixedMount, Inbound, LayoutMetrics, LocalChannel, Outbound, OutboundMessage, ProjectsView,
    ViewConfig,
};

pub struct ViewHarness {
    pub view: ProjectsView,
    pub channel: Arc<LocalChannel>,
    pub mount: Arc<FixedMount>,
    outbound: broadcast::Receiver<OutboundMessage>,
}

impl ViewHarness {
    /// Create a harness with an 800x600 body and default config.
    pub fn new() -> Self {
        Self::with_metrics(LayoutMetrics {
            body_height: 600,
            container_width: 800,
        })
    }

    pub fn with_metrics(metrics: LayoutMetrics) -> Self {
        Self::with_config(metrics, ViewConfig::default())
    }

    pub fn with_config(metrics: LayoutMetrics, config: ViewConfig) -> Self {
        let channel = Arc::new(LocalChannel::default());
        let mount = Arc::new(FixedMount::new(metrics));
        // Subscribe before construction so the initial load request is seen.
        let outbound = channel.subscribe();
        let view = ProjectsView::new(mount.clone(), channel.clone(), config);
        Self {
            view,
            channel,
            mount,
            outbound,
        }
    }

    /// Simulate the store pushing a project set.
    pub fn push(&self, payload: Value) -> usize {
        self.channel.deliver(Inbound::ProjectsUpdated, &payload)
    }

    /// Drain every request sent since the last call.
    pub fn sent(&mut self) -> Vec<Outbound> {
        let mut out = Vec::new();
        while let Ok(msg) = self.outbound.try_recv() {
            out.push(msg.message);
        }
        out
    }

    /// Project ids of displayed rows, in row order.
    pub fn row_ids(&self) -> Vec<String> {
        self.view
            .rows()
            .iter()
            .filter_map(|r| swordfish_projects::row::row_project_id(r).map(str::to_string))
            .collect()
    }
}
