//! Row rendering for the projects table.

use crate::dom::Element;
use crate::project::{Project, ProjectStatus};

/// Attribute on the row checkbox that carries the project id.
pub const ID_ATTR: &str = "data";

/// Columns of the projects table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Select,
    Description,
    Status,
    SourceLang,
    TargetLang,
    Created,
    Completed,
}

pub const COLUMNS: [Column; 7] = [
    Column::Select,
    Column::Description,
    Column::Status,
    Column::SourceLang,
    Column::TargetLang,
    Column::Created,
    Column::Completed,
];

impl Column {
    pub fn title(&self) -> &'static str {
        match self {
            Column::Select => "",
            Column::Description => "Description",
            Column::Status => "Status",
            Column::SourceLang => "Src.Lang.",
            Column::TargetLang => "Tgt.Lang.",
            Column::Created => "Created",
            Column::Completed => "Completed",
        }
    }

    /// Position of this column within a row.
    pub fn index(&self) -> usize {
        *self as usize
    }

    fn is_padded(&self) -> bool {
        matches!(
            self,
            Column::SourceLang | Column::TargetLang | Column::Created | Column::Completed
        )
    }

    pub(crate) fn header_cell(&self) -> Element {
        let th = Element::new("th");
        match self {
            Column::Select => th.with_child(checkbox()),
            column if column.is_padded() => th
                .with_style("padding-left", "5px")
                .with_style("padding-right", "5px")
                .with_text(column.title()),
            column => th.with_text(column.title()),
        }
    }
}

/// Presentation knobs for rendered rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowStyle {
    /// Minimum width in pixels of the two date columns.
    pub date_min_width: u32,
}

impl Default for RowStyle {
    fn default() -> Self {
        Self {
            date_min_width: 170,
        }
    }
}

/// Label for a raw wire status code.
pub fn status_label(code: i64) -> &'static str {
    ProjectStatus::from_code(code).label()
}

/// Renders one table row. Always builds a fresh fragment.
pub fn render_row(project: &Project, style: &RowStyle) -> Element {
    let min_width = format!("{}px", style.date_min_width);

    let select = Element::new("td")
        .with_class("fixed")
        .with_id(&project.id)
        .with_child(checkbox().with_attr(ID_ATTR, &project.id));

    let description = Element::new("td")
        .with_class("noWrap")
        .with_text(&project.description);

    let status = Element::new("td")
        .with_class("center")
        .with_text(project.status.label());

    let source = Element::new("td")
        .with_class("center")
        .with_text(&project.source_lang);

    let target = Element::new("td")
        .with_class("center")
        .with_text(&project.target_lang);

    let created = date_cell(&min_width).with_text(&project.creation_string);

    let completed =
        date_cell(&min_width).with_text(project.finish_date_string.as_deref().unwrap_or(""));

    Element::new("tr")
        .with_class("discover")
        .with_child(select)
        .with_child(description)
        .with_child(status)
        .with_child(source)
        .with_child(target)
        .with_child(created)
        .with_child(completed)
}

/// Project id carried by a rendered row, read back from its checkbox.
pub fn row_project_id(row: &Element) -> Option<&str> {
    row_checkbox(row).and_then(|check| check.attr(ID_ATTR))
}

pub(crate) fn row_checkbox(row: &Element) -> Option<&Element> {
    row.children()
        .get(Column::Select.index())
        .and_then(|cell| cell.children().first())
}

pub(crate) fn row_checkbox_mut(row: &mut Element) -> Option<&mut Element> {
    row.children_mut()
        .get_mut(Column::Select.index())
        .and_then(|cell| cell.children_mut().first_mut())
}

pub(crate) fn checkbox() -> Element {
    Element::new("input").with_attr("type", "checkbox")
}

fn date_cell(min_width: &str) -> Element {
    Element::new("td")
        .with_class("noWrap")
        .with_class("center")
        .with_style("min-width", min_width)
}
