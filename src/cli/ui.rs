use crate::store::SubscriptionStore;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right-aligned amount with two decimals.
pub fn amount_cell(value: f64, currency: &str) -> Cell {
    Cell::new(format!("{value:.2} {currency}")).set_alignment(CellAlignment::Right)
}

/// Formats a percentage in bold green.
pub fn percentage_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.2}%"))
        .add_attribute(Attribute::Bold)
        .fg(Color::Green)
        .set_alignment(CellAlignment::Right)
}

/// Days until renewal, red once overdue and yellow within a week.
pub fn renewal_cell(days: i64) -> Cell {
    let text = match days {
        0 => "today".to_string(),
        1 => "in 1 day".to_string(),
        d if d < 0 => format!("{} days ago", -d),
        d => format!("in {d} days"),
    };
    let color = match days {
        d if d < 0 => Color::Red,
        d if d <= 7 => Color::Yellow,
        _ => Color::Reset,
    };
    Cell::new(text).fg(color).set_alignment(CellAlignment::Right)
}

/// Message shown instead of a table or chart when there is no data.
pub fn empty_state(title: &str, hint: &str) -> String {
    format!(
        "{}\n{}",
        style_text(title, StyleType::TotalLabel),
        style_text(hint, StyleType::Subtle)
    )
}

/// Warns about a save that has not gone through yet.
pub fn print_save_warning(store: &SubscriptionStore) {
    if let Some(error) = store.pending_save_error() {
        eprintln!(
            "{}",
            style_text(
                &format!("Warning: changes are not saved yet ({error})"),
                StyleType::Error
            )
        );
    }
}
