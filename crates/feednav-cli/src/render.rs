//! Plain-text rendering shared by the subcommands.

use feednav_model::{BreadcrumbItem, NavigationEvent};

use crate::steps::Step;

/// Render a trail as `Home > Agency > Route`.
///
/// The home page has no trail and renders as `(home)`.
pub fn trail_line(items: &[BreadcrumbItem]) -> String {
    if items.is_empty() {
        return "(home)".to_string();
    }
    items
        .iter()
        .map(|item| item.label.as_str())
        .collect::<Vec<_>>()
        .join(" > ")
}

/// One line of `feednav walk` output.
///
/// `event` is `None` when the step did not transition (a `back` with
/// nowhere to go).
pub fn walk_line(
    index: usize,
    step: &Step,
    event: Option<&NavigationEvent>,
    trail: &[BreadcrumbItem],
) -> String {
    let step = step.to_string();
    match event {
        Some(event) => format!(
            "{index:>3}. {step:<24} {} -> {}  [{}]",
            event.from(),
            event.to(),
            trail_line(trail)
        ),
        None => format!("{index:>3}. {step:<24} nothing to go back to"),
    }
}
