//! Table rendering for command reports.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use feednav_core::PreloadSummary;
use feednav_feed::FeedTable;
use feednav_model::{BreadcrumbItem, NavigationEvent, codec};

pub fn breadcrumb_table(items: &[BreadcrumbItem], base_path: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Label"),
        header_cell("Page"),
        header_cell("URL"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    let last = items.len().saturating_sub(1);
    for (index, item) in items.iter().enumerate() {
        let label = if index == last {
            Cell::new(&item.label).add_attribute(Attribute::Bold)
        } else {
            Cell::new(&item.label)
        };
        table.add_row(vec![
            dim_cell(index + 1),
            label,
            Cell::new(item.page_state.kind()),
            Cell::new(codec::encode_url(base_path, &item.page_state)),
        ]);
    }
    table
}

pub fn history_table(events: &[NavigationEvent]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("From"),
        header_cell("To"),
        header_cell("At"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, event) in events.iter().enumerate() {
        let to = if event.is_noop() {
            dim_cell(event.to())
        } else {
            Cell::new(event.to())
        };
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(event.from()),
            to,
            dim_cell(event.timestamp().format("%H:%M:%S%.3f")),
        ]);
    }
    table
}

pub fn preload_table(summary: &PreloadSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Names"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        (FeedTable::Agency, summary.agencies),
        (FeedTable::Routes, summary.routes),
        (FeedTable::Stops, summary.stops),
    ];
    for (feed_table, count) in rows {
        let status = if summary.failures.contains(&feed_table) {
            Cell::new("failed")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new("ok").fg(Color::Green)
        };
        table.add_row(vec![Cell::new(feed_table), Cell::new(count), status]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
