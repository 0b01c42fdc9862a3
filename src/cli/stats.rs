use super::ui;
use crate::core::statistics::StatisticsReport;
use anyhow::{Context, Result};
use comfy_table::Cell;

impl StatisticsReport {
    /// Renders the report as a table. Amounts are summed nominally, so the
    /// currency label is only a display hint.
    pub fn display_as_table(&self, currency: &str) -> String {
        let title = format!("{} statistics", self.period);
        let mut output = format!("{}\n\n", ui::style_text(&title, ui::StyleType::Title));

        if self.is_empty() {
            output.push_str(&ui::empty_state(
                "No statistics yet",
                "Statistics appear once you track at least one subscription.",
            ));
            return output;
        }

        output.push_str(&format!(
            "Total expenses: {}\n",
            ui::style_text(
                &format!("{:.2} {currency}", self.total_expense),
                ui::StyleType::TotalValue
            )
        ));
        if let Some(top) = self.top_category_percentage {
            output.push_str(&format!(
                "Top category: {}\n",
                ui::style_text(&format!("{top}% of total expenses"), ui::StyleType::TotalLabel)
            ));
        }
        if let Some(sub) = &self.most_expensive {
            output.push_str(&format!(
                "Most expensive: {} ({:.2} {} {})\n",
                sub.name,
                sub.cost,
                sub.currency_code,
                sub.payment_cycle.to_string().to_lowercase()
            ));
        }
        output.push('\n');

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Category"),
            ui::header_cell("Subscriptions"),
            ui::header_cell("Cost"),
            ui::header_cell("Share"),
            ui::header_cell("Slice (deg)"),
        ]);

        for (stat, slice) in self.categories.iter().zip(&self.slices) {
            let (icon, color) = stat.category.display_info();
            table.add_row(vec![
                Cell::new(format!(
                    "{} {}",
                    stat.category,
                    ui::style_text(&format!("[{icon}, {color}]"), ui::StyleType::Subtle)
                )),
                Cell::new(stat.transaction_count),
                ui::amount_cell(stat.total_cost, currency),
                ui::percentage_cell(stat.percentage),
                Cell::new(format!("{:.1} .. {:.1}", slice.start_angle, slice.end_angle)),
            ]);
        }
        output.push_str(&table.to_string());
        output
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize statistics")
    }
}

#[cfg(test)]
mod tests {
    use crate::core::statistics::{StatisticsPeriod, StatisticsReport};
    use crate::core::subscription::{Category, PaymentCycle, Subscription};
    use chrono::NaiveDate;

    fn subs() -> Vec<Subscription> {
        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        vec![
            Subscription::new(
                "Netflix",
                18.0,
                "EUR",
                date,
                PaymentCycle::Monthly,
                Category::Entertainment,
                false,
            ),
            Subscription::new(
                "Spotify",
                6.0,
                "EUR",
                date,
                PaymentCycle::Monthly,
                Category::Music,
                false,
            ),
        ]
    }

    #[test]
    fn test_table_lists_categories() {
        let report = StatisticsReport::build(&subs(), StatisticsPeriod::Monthly);
        let output = report.display_as_table("EUR");
        assert!(output.contains("Monthly statistics"));
        assert!(output.contains("24.00 EUR"));
        assert!(output.contains("75.00%"));
        assert!(output.contains("Entertainment"));
        assert!(output.contains("Music"));
        assert!(output.contains("Most expensive: Netflix (18.00 EUR monthly)"));
    }

    #[test]
    fn test_empty_report_shows_empty_state() {
        let report = StatisticsReport::build(&[], StatisticsPeriod::Yearly);
        let output = report.display_as_table("EUR");
        assert!(output.contains("No statistics yet"));
        assert!(!output.contains("Total expenses"));
    }

    #[test]
    fn test_json_output() {
        let report = StatisticsReport::build(&subs(), StatisticsPeriod::Yearly);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["period"], "yearly");
        assert_eq!(json["total_expense"], 288.0);
        assert_eq!(json["subscription_count"], 2);
        assert_eq!(json["categories"][0]["category"], "entertainment");
        assert_eq!(json["categories"][0]["total_cost"], 216.0);
        assert_eq!(json["slices"][0]["start_angle"], -90.0);
        assert_eq!(json["top_category_percentage"], 75);
    }
}
