//! Toolbar actions of the projects view.

use std::str::FromStr;

use crate::dom::Element;

/// Attribute on each toolbar button naming its action.
pub const ACTION_ATTR: &str = "data-action";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    Add,
    Remove,
    Modify,
    Complete,
}

impl ToolbarAction {
    /// All actions in toolbar order.
    pub const ALL: [ToolbarAction; 4] = [
        ToolbarAction::Add,
        ToolbarAction::Remove,
        ToolbarAction::Modify,
        ToolbarAction::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolbarAction::Add => "add",
            ToolbarAction::Remove => "remove",
            ToolbarAction::Modify => "modify",
            ToolbarAction::Complete => "complete",
        }
    }

    pub fn tooltip(&self) -> &'static str {
        match self {
            ToolbarAction::Add => "Add Project",
            ToolbarAction::Remove => "Remove Project",
            ToolbarAction::Modify => "Modify Project",
            ToolbarAction::Complete => "Complete Project",
        }
    }

    /// Icon identifier; hosts map it to their own asset.
    pub fn icon(&self) -> &'static str {
        match self {
            ToolbarAction::Add => "icon-add-circle",
            ToolbarAction::Remove => "icon-remove-circle",
            ToolbarAction::Modify => "icon-edit-circle",
            ToolbarAction::Complete => "icon-check-circle",
        }
    }

    fn button(&self) -> Element {
        Element::new("a")
            .with_class("tooltip")
            .with_attr(ACTION_ATTR, self.as_str())
            .with_child(Element::new("span").with_class("icon").with_class(self.icon()))
            .with_child(
                Element::new("span")
                    .with_class("tooltiptext")
                    .with_class("bottomTooltip")
                    .with_text(self.tooltip()),
            )
    }
}

impl std::fmt::Display for ToolbarAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ToolbarAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(ToolbarAction::Add),
            "remove" => Ok(ToolbarAction::Remove),
            "modify" => Ok(ToolbarAction::Modify),
            "complete" => Ok(ToolbarAction::Complete),
            other => Err(format!("Unknown toolbar action '{}'", other)),
        }
    }
}

/// Builds the toolbar with one button per action.
pub fn build_toolbar() -> Element {
    ToolbarAction::ALL
        .iter()
        .fold(Element::new("div").with_class("toolbar"), |bar, action| {
            bar.with_child(action.button())
        })
}
