use super::ui;
use crate::store::SubscriptionStore;
use chrono::NaiveDate;
use comfy_table::Cell;

/// Renders all subscriptions, soonest renewal first.
pub fn render(store: &SubscriptionStore, today: NaiveDate) -> String {
    if store.is_empty() {
        return ui::empty_state(
            "No subscriptions",
            "Add your first one with `subtrack add` or `subtrack onboard`.",
        );
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Name"),
        ui::header_cell("Cost"),
        ui::header_cell("Cycle"),
        ui::header_cell("Monthly"),
        ui::header_cell("Category"),
        ui::header_cell("Renews"),
        ui::header_cell("Id"),
    ]);

    for subscription in store.sorted_by_renewal() {
        let name = if subscription.is_custom {
            let marker = ui::style_text("(custom)", ui::StyleType::Subtle);
            format!("{} {marker}", subscription.name)
        } else {
            subscription.name.clone()
        };
        table.add_row(vec![
            Cell::new(name),
            ui::amount_cell(subscription.cost, &subscription.currency_code),
            Cell::new(subscription.payment_cycle),
            ui::amount_cell(subscription.monthly_cost(), &subscription.currency_code),
            Cell::new(subscription.category),
            ui::renewal_cell(subscription.days_until_renewal(today)),
            Cell::new(ui::style_text(&subscription.id.to_string(), ui::StyleType::Subtle)),
        ]);
    }

    format!(
        "{}\n\n{}\n\n{} active subscriptions",
        ui::style_text("Subscriptions", ui::StyleType::Title),
        table,
        store.len()
    )
}
