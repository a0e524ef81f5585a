//! The projects list view.
//!
//! The view never owns project data. It asks the store for the project set
//! once at startup and afterwards redraws the whole table every time the
//! store pushes a new set. A push that arrives late still wins; there is no
//! request correlation.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use serde_json::Value;

use crate::channel::{HandlerId, Inbound, Outbound, StoreChannel};
use crate::config::ViewConfig;
use crate::dom::Element;
use crate::error::ViewError;
use crate::layout::{LayoutMetrics, MountPoint, ScrollRegion};
use crate::project::ProjectSnapshot;
use crate::row::{self, render_row, Column, RowStyle, COLUMNS};
use crate::toolbar::{build_toolbar, ToolbarAction};

/// Result of a toolbar action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A request went out to the store; any visible effect arrives as a push.
    Requested(Outbound),
    /// The action has no behavior yet. `selected` lists the checked project
    /// ids at the time of the click.
    Unsupported {
        action: ToolbarAction,
        selected: Vec<String>,
    },
}

struct ViewState {
    toolbar: Element,
    scroll: Element,
    table: Element,
    thead: Element,
    tbody: Element,
    region: ScrollRegion,
    row_style: RowStyle,
    chrome_allowance: i64,
    render_count: u64,
}

impl ViewState {
    fn new(config: &ViewConfig) -> Self {
        let header_row = COLUMNS
            .iter()
            .fold(Element::new("tr"), |tr, column| tr.with_child(column.header_cell()));

        Self {
            toolbar: build_toolbar(),
            scroll: Element::new("div").with_class("divContainer"),
            table: Element::new("table")
                .with_class("fill_width")
                .with_class("stripes"),
            thead: Element::new("thead").with_child(header_row),
            tbody: Element::new("tbody"),
            region: ScrollRegion::default(),
            row_style: config.row_style(),
            chrome_allowance: config.chrome_allowance,
            render_count: 0,
        }
    }

    fn render(&mut self, snapshot: &ProjectSnapshot) {
        self.tbody.clear_children();
        for project in snapshot {
            self.tbody.push_child(render_row(project, &self.row_style));
        }
        self.set_header_checked(false);
        self.render_count += 1;
        log::debug!(
            "Rendered {} project(s), render #{}",
            snapshot.len(),
            self.render_count
        );
    }

    fn resize(&mut self, metrics: &LayoutMetrics) -> ScrollRegion {
        let region = ScrollRegion::fit(metrics, self.chrome_allowance);
        self.scroll
            .set_style("height", &format!("{}px", region.height));
        self.scroll.set_style("width", &format!("{}px", region.width));
        self.region = region;
        region
    }

    fn set_header_checked(&mut self, checked: bool) {
        let header_check = self
            .thead
            .children_mut()
            .first_mut()
            .and_then(|tr| tr.children_mut().get_mut(Column::Select.index()))
            .and_then(|th| th.children_mut().first_mut());
        if let Some(check) = header_check {
            set_checked(check, checked);
        }
    }

    fn selected_ids(&self) -> Vec<String> {
        self.tbody
            .children()
            .iter()
            .filter(|tr| row::row_checkbox(tr).is_some_and(|c| c.attr("checked").is_some()))
            .filter_map(|tr| row::row_project_id(tr).map(str::to_string))
            .collect()
    }

    fn container(&self) -> Element {
        let table = self
            .table
            .clone()
            .with_child(self.thead.clone())
            .with_child(self.tbody.clone());
        Element::new("div")
            .with_child(self.toolbar.clone())
            .with_child(self.scroll.clone().with_child(table))
    }
}

fn set_checked(check: &mut Element, checked: bool) {
    if checked {
        check.set_attr("checked", "checked");
    } else {
        check.remove_attr("checked");
    }
}

fn lock_state(state: &Mutex<ViewState>) -> MutexGuard<'_, ViewState> {
    match state.lock() {
        Ok(g) => g,
        Err(poisoned) => {
            log::warn!("Projects view lock was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

/// Unregisters the view's handlers once the last handle is dropped.
struct Registration {
    mount: Arc<dyn MountPoint>,
    channel: Arc<dyn StoreChannel>,
    resize_id: HandlerId,
    push_id: HandlerId,
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.mount.off_resize(self.resize_id);
        self.channel
            .off_receive(Inbound::ProjectsUpdated, self.push_id);
        log::debug!("Projects view torn down");
    }
}

/// Handle to a mounted projects view. Cloning is cheap; the view is torn
/// down when the last handle is dropped.
#[derive(Clone)]
pub struct ProjectsView {
    state: Arc<Mutex<ViewState>>,
    mount: Arc<dyn MountPoint>,
    channel: Arc<dyn StoreChannel>,
    _registration: Arc<Registration>,
}

impl ProjectsView {
    /// Builds the view, wires resize and push handling, and requests the
    /// initial project set.
    pub fn new(
        mount: Arc<dyn MountPoint>,
        channel: Arc<dyn StoreChannel>,
        config: ViewConfig,
    ) -> Self {
        let state = Arc::new(Mutex::new(ViewState::new(&config)));

        let weak_state = Arc::downgrade(&state);
        let weak_mount: Weak<dyn MountPoint> = Arc::downgrade(&mount);
        let resize_id = mount.on_resize(Arc::new(move || {
            if let (Some(state), Some(mount)) = (weak_state.upgrade(), weak_mount.upgrade()) {
                lock_state(&state).resize(&mount.metrics());
            }
        }));

        let weak_state = Arc::downgrade(&state);
        let push_id = channel.on_receive(
            Inbound::ProjectsUpdated,
            Arc::new(move |payload: &Value| match weak_state.upgrade() {
                Some(state) => {
                    let snapshot = ProjectSnapshot::from_payload(payload);
                    lock_state(&state).render(&snapshot);
                }
                None => log::debug!("Projects view is gone, ignoring push"),
            }),
        );

        let registration = Arc::new(Registration {
            mount: mount.clone(),
            channel: channel.clone(),
            resize_id,
            push_id,
        });
        let view = Self {
            state,
            mount,
            channel,
            _registration: registration,
        };

        view.resize();
        view.load_projects();

        log::info!("Projects view initialized");
        view
    }

    /// Asks the store for the full project set. Failure leaves the table as
    /// it is.
    pub fn load_projects(&self) {
        if let Err(e) = self.channel.send(Outbound::RequestProjects, Value::Null) {
            log::error!("Failed to request projects: {}", e);
        }
    }

    /// Resizes the scroll region from the mount's current metrics.
    pub fn resize(&self) -> ScrollRegion {
        let metrics = self.mount.metrics();
        lock_state(&self.state).resize(&metrics)
    }

    /// Replaces every row with the given snapshot, in order.
    pub fn render(&self, snapshot: &ProjectSnapshot) {
        lock_state(&self.state).render(snapshot);
    }

    /// Coerces a raw push payload and renders it.
    pub fn apply_push(&self, payload: &Value) {
        self.render(&ProjectSnapshot::from_payload(payload));
    }

    pub fn trigger(&self, action: ToolbarAction) -> Result<ActionOutcome, ViewError> {
        match action {
            ToolbarAction::Add => self.add_project(),
            ToolbarAction::Remove => Ok(self.remove_project()),
            ToolbarAction::Modify => Ok(self.modify_project()),
            ToolbarAction::Complete => Ok(self.complete_project()),
        }
    }

    /// Asks the store to open its add-project flow. Nothing changes locally.
    pub fn add_project(&self) -> Result<ActionOutcome, ViewError> {
        let message = Outbound::RequestAddProjectUi;
        self.channel.send(message, Value::Null)?;
        Ok(ActionOutcome::Requested(message))
    }

    pub fn remove_project(&self) -> ActionOutcome {
        self.unsupported(ToolbarAction::Remove)
    }

    pub fn modify_project(&self) -> ActionOutcome {
        self.unsupported(ToolbarAction::Modify)
    }

    pub fn complete_project(&self) -> ActionOutcome {
        self.unsupported(ToolbarAction::Complete)
    }

    fn unsupported(&self, action: ToolbarAction) -> ActionOutcome {
        let selected = self.selected_ids();
        log::warn!(
            "'{}' is not yet supported; ignoring click ({} project(s) selected)",
            action.tooltip(),
            selected.len()
        );
        ActionOutcome::Unsupported { action, selected }
    }

    /// Checks or unchecks the row of `project_id`. Returns `false` if no
    /// displayed row carries that id.
    pub fn set_selected(&self, project_id: &str, checked: bool) -> bool {
        let mut state = lock_state(&self.state);
        let row = state
            .tbody
            .children_mut()
            .iter_mut()
            .find(|tr| row::row_project_id(tr) == Some(project_id));
        match row.and_then(row::row_checkbox_mut) {
            Some(check) => {
                set_checked(check, checked);
                true
            }
            None => false,
        }
    }

    /// Header checkbox: checks or unchecks every displayed row.
    pub fn select_all(&self, checked: bool) {
        let mut state = lock_state(&self.state);
        for tr in state.tbody.children_mut() {
            if let Some(check) = row::row_checkbox_mut(tr) {
                set_checked(check, checked);
            }
        }
        state.set_header_checked(checked);
    }

    /// Ids of checked rows, in row order.
    pub fn selected_ids(&self) -> Vec<String> {
        lock_state(&self.state).selected_ids()
    }

    pub fn row_count(&self) -> usize {
        lock_state(&self.state).tbody.children().len()
    }

    pub fn rows(&self) -> Vec<Element> {
        lock_state(&self.state).tbody.children().to_vec()
    }

    /// Text of every cell, row by row.
    pub fn cell_texts(&self) -> Vec<Vec<String>> {
        lock_state(&self.state)
            .tbody
            .children()
            .iter()
            .map(|tr| tr.children().iter().map(Element::text_content).collect())
            .collect()
    }

    pub fn scroll_region(&self) -> ScrollRegion {
        lock_state(&self.state).region
    }

    /// Number of completed renders since construction.
    pub fn render_count(&self) -> u64 {
        lock_state(&self.state).render_count
    }

    /// Snapshot of the whole element tree: toolbar, then the scrollable
    /// table.
    pub fn container(&self) -> Element {
        lock_state(&self.state).container()
    }

    pub fn to_html(&self) -> String {
        self.container().to_html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::LocalChannel;
    use crate::layout::FixedMount;
    use serde_json::json;

    fn setup() -> (ProjectsView, Arc<LocalChannel>, Arc<FixedMount>) {
        let channel = Arc::new(LocalChannel::default());
        let mount = Arc::new(FixedMount::new(LayoutMetrics {
            body_height: 400,
            container_width: 640,
        }));
        let view = ProjectsView::new(mount.clone(), channel.clone(), ViewConfig::default());
        (view, channel, mount)
    }

    #[test]
    fn test_new_builds_toolbar_and_header() {
        let (view, _, _) = setup();
        let root = view.container();

        let toolbar = &root.children()[0];
        assert!(toolbar.has_class("toolbar"));
        assert_eq!(toolbar.children().len(), 4);

        let scroll = &root.children()[1];
        assert!(scroll.has_class("divContainer"));
        let table = &scroll.children()[0];
        assert!(table.has_class("stripes"));

        let header = &table.children()[0].children()[0];
        let titles: Vec<&str> = header.children().iter().map(Element::text).collect();
        assert_eq!(
            titles,
            vec!["", "Description", "Status", "Src.Lang.", "Tgt.Lang.", "Created", "Completed"]
        );
        assert_eq!(view.row_count(), 0);
    }

    #[test]
    fn test_new_sizes_scroll_region() {
        let (view, _, _) = setup();
        assert_eq!(
            view.scroll_region(),
            ScrollRegion {
                width: 640,
                height: 335
            }
        );
        let root = view.container();
        assert_eq!(root.children()[1].style("height"), Some("335px"));
        assert_eq!(root.children()[1].style("width"), Some("640px"));
    }

    #[test]
    fn test_render_replaces_rows() {
        let (view, _, _) = setup();
        view.apply_push(&json!([{ "id": "a" }, { "id": "b" }, { "id": "c" }]));
        assert_eq!(view.row_count(), 3);

        view.apply_push(&json!([{ "id": "z" }]));
        let ids: Vec<String> = view
            .rows()
            .iter()
            .filter_map(|r| row::row_project_id(r).map(str::to_string))
            .collect();
        assert_eq!(ids, vec!["z"]);
        assert_eq!(view.render_count(), 2);
    }

    #[test]
    fn test_selection_is_reset_by_render() {
        let (view, _, _) = setup();
        view.apply_push(&json!([{ "id": "a" }, { "id": "b" }]));
        view.select_all(true);
        assert!(view.to_html().contains("<th><input checked=\"checked\" type=\"checkbox\"></th>"));

        view.apply_push(&json!([{ "id": "a" }, { "id": "b" }]));
        assert!(view.selected_ids().is_empty());
        assert!(view.to_html().contains("<th><input type=\"checkbox\"></th>"));

        assert!(view.set_selected("b", true));
        assert!(!view.set_selected("missing", true));
        assert_eq!(view.selected_ids(), vec!["b"]);

        view.apply_push(&json!([{ "id": "a" }, { "id": "b" }]));
        assert!(view.selected_ids().is_empty());
    }

    #[test]
    fn test_select_all_toggles_rows_and_header() {
        let (view, _, _) = setup();
        view.apply_push(&json!([{ "id": "1" }, { "id": "2" }]));

        view.select_all(true);
        assert_eq!(view.selected_ids(), vec!["1", "2"]);
        assert!(view.to_html().contains("<th><input checked=\"checked\" type=\"checkbox\"></th>"));

        view.select_all(false);
        assert!(view.selected_ids().is_empty());
    }

    #[test]
    fn test_drop_unregisters_handlers() {
        let (view, channel, mount) = setup();
        let clone = view.clone();
        assert_eq!(channel.handler_count(Inbound::ProjectsUpdated), 1);
        assert_eq!(mount.handler_count(), 1);

        drop(view);
        assert_eq!(channel.handler_count(Inbound::ProjectsUpdated), 1);

        drop(clone);
        assert_eq!(channel.handler_count(Inbound::ProjectsUpdated), 0);
        assert_eq!(mount.handler_count(), 0);
        assert_eq!(
            channel.deliver(Inbound::ProjectsUpdated, &json!([{ "id": "1" }])),
            0
        );
    }
}
