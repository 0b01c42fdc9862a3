use super::ui;
use crate::core::subscription::Subscription;
use crate::store::SubscriptionStore;
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use comfy_table::Cell;
use uuid::Uuid;

/// Renders the details of a single subscription.
pub fn render(subscription: &Subscription, today: NaiveDate) -> String {
    let (icon, color) = subscription.category.display_info();

    let mut table = ui::new_styled_table();
    table.add_row(vec![
        ui::header_cell("Cost"),
        ui::amount_cell(subscription.cost, &subscription.currency_code),
    ]);
    table.add_row(vec![
        ui::header_cell("Monthly"),
        ui::amount_cell(subscription.monthly_cost(), &subscription.currency_code),
    ]);
    table.add_row(vec![
        ui::header_cell("Next renewal"),
        Cell::new(subscription.renewal_date.format("%B %-d, %Y")),
    ]);
    table.add_row(vec![
        ui::header_cell("Renews"),
        ui::renewal_cell(subscription.days_until_renewal(today)),
    ]);
    table.add_row(vec![
        ui::header_cell("Payment cycle"),
        Cell::new(subscription.payment_cycle),
    ]);
    table.add_row(vec![
        ui::header_cell("Category"),
        Cell::new(format!(
            "{} {}",
            subscription.category,
            ui::style_text(&format!("[{icon}, {color}]"), ui::StyleType::Subtle)
        )),
    ]);
    table.add_row(vec![ui::header_cell("Id"), Cell::new(subscription.id)]);

    format!(
        "{}\n\n{table}",
        ui::style_text(&subscription.name, ui::StyleType::Title)
    )
}

pub fn show(store: &SubscriptionStore, id: Uuid, today: NaiveDate) -> Result<String> {
    let subscription = store
        .get(id)
        .ok_or_else(|| anyhow!("No subscription with id {id}"))?;
    Ok(render(subscription, today))
}
