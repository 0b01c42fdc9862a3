//! Aggregate spending statistics derived from the subscription set.
//!
//! Everything here is recomputed from the subscriptions on every call; the
//! results are read-only view models for the presentation layer.
use crate::core::subscription::{Category, Subscription};
use serde::Serialize;
use std::fmt::Display;
use tracing::{debug, warn};

/// Angle, in degrees, at which the first pie slice starts (top of circle).
pub const PIE_START_ANGLE: f64 = -90.0;

/// Degrees per percentage point of a full circle.
const DEGREES_PER_PERCENT: f64 = 3.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatisticsPeriod {
    Monthly,
    Yearly,
}

impl StatisticsPeriod {
    fn factor(&self) -> f64 {
        match self {
            StatisticsPeriod::Monthly => 1.0,
            StatisticsPeriod::Yearly => 12.0,
        }
    }
}

impl Display for StatisticsPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatisticsPeriod::Monthly => write!(f, "Monthly"),
            StatisticsPeriod::Yearly => write!(f, "Yearly"),
        }
    }
}

/// Spending of a single category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    pub category: Category,
    pub total_cost: f64,
    pub transaction_count: usize,
    /// Share of the total monthly spend, 0-100.
    pub percentage: f64,
}

/// Angular span of one category in a pie chart, in degrees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub category: Category,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Sum of the monthly-equivalent cost of every subscription.
pub fn total_monthly_expense(subscriptions: &[Subscription]) -> f64 {
    subscriptions.iter().map(Subscription::monthly_cost).sum()
}

/// Total expense scaled to `period`.
pub fn total_expense(subscriptions: &[Subscription], period: StatisticsPeriod) -> f64 {
    total_monthly_expense(subscriptions) * period.factor()
}

/// Groups subscriptions by category and computes each group's monthly cost,
/// member count and share of the total.
///
/// Sorted by cost, largest first. Categories with equal cost keep the
/// declaration order of [`Category`]. Categories without subscriptions are
/// omitted, so an empty input yields an empty result.
///
/// Percentages are 0 when the total is zero or not finite.
pub fn category_statistics(subscriptions: &[Subscription]) -> Vec<CategoryStat> {
    let total = total_monthly_expense(subscriptions);
    let has_shares = total.is_finite() && total > 0.0;
    if !total.is_finite() {
        warn!("Total monthly expense {total} is not finite, reporting no shares");
    }

    let mut stats: Vec<CategoryStat> = Category::ALL
        .into_iter()
        .filter_map(|category| {
            let members = subscriptions.iter().filter(|s| s.category == category);
            let (total_cost, transaction_count) = members
                .fold((0.0, 0), |(cost, count), s| (cost + s.monthly_cost(), count + 1));
            if transaction_count == 0 {
                return None;
            }
            let percentage = if has_shares {
                total_cost / total * 100.0
            } else {
                0.0
            };
            Some(CategoryStat {
                category,
                total_cost,
                transaction_count,
                percentage,
            })
        })
        .collect();

    // Stable sort keeps enum order for ties
    stats.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));
    debug!(
        "Computed statistics for {} categories, total {total:.2}",
        stats.len()
    );
    stats
}

/// Rescales category totals to `period`. Percentages and counts are left
/// untouched; only the absolute figure changes.
pub fn period_adjusted(stats: &[CategoryStat], period: StatisticsPeriod) -> Vec<CategoryStat> {
    stats
        .iter()
        .map(|stat| CategoryStat {
            total_cost: stat.total_cost * period.factor(),
            ..stat.clone()
        })
        .collect()
}

/// Assigns each category a contiguous arc starting at the top of the circle.
/// Each slice begins where the previous one ended.
pub fn pie_slice_angles(stats: &[CategoryStat]) -> Vec<PieSlice> {
    let mut cursor = PIE_START_ANGLE;
    stats
        .iter()
        .map(|stat| {
            let start_angle = cursor;
            let end_angle = start_angle + stat.percentage * DEGREES_PER_PERCENT;
            cursor = end_angle;
            PieSlice {
                category: stat.category,
                start_angle,
                end_angle,
            }
        })
        .collect()
}

/// Percentage of the largest category, truncated to a whole number.
pub fn top_category_percentage(stats: &[CategoryStat]) -> Option<u32> {
    stats.first().map(|stat| stat.percentage as u32)
}

/// The subscription with the highest nominal cost.
pub fn most_expensive(subscriptions: &[Subscription]) -> Option<&Subscription> {
    subscriptions
        .iter()
        .max_by(|a, b| a.cost.total_cmp(&b.cost))
}

/// Everything the statistics screen needs for one period.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsReport {
    pub period: StatisticsPeriod,
    pub total_expense: f64,
    pub subscription_count: usize,
    pub categories: Vec<CategoryStat>,
    pub slices: Vec<PieSlice>,
    pub top_category_percentage: Option<u32>,
    pub most_expensive: Option<Subscription>,
}

impl StatisticsReport {
    pub fn build(subscriptions: &[Subscription], period: StatisticsPeriod) -> Self {
        let categories = period_adjusted(&category_statistics(subscriptions), period);
        let slices = pie_slice_angles(&categories);
        Self {
            period,
            total_expense: total_expense(subscriptions, period),
            subscription_count: subscriptions.len(),
            top_category_percentage: top_category_percentage(&categories),
            most_expensive: most_expensive(subscriptions).cloned(),
            categories,
            slices,
        }
    }

    /// No subscriptions means there is nothing to chart.
    pub fn is_empty(&self) -> bool {
        self.subscription_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::subscription::PaymentCycle;
    use chrono::NaiveDate;

    const EPSILON: f64 = 1e-9;

    fn sub(name: &str, cost: f64, cycle: PaymentCycle, category: Category) -> Subscription {
        Subscription::new(
            name,
            cost,
            "EUR",
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            cycle,
            category,
            false,
        )
    }

    fn sample() -> Vec<Subscription> {
        vec![
            sub("Netflix", 17.99, PaymentCycle::Monthly, Category::Entertainment),
            sub("Spotify", 15.99, PaymentCycle::Monthly, Category::Music),
            sub("Adobe", 60.99, PaymentCycle::Quarterly, Category::Productivity),
            sub("Disney+", 89.90, PaymentCycle::Annually, Category::Entertainment),
            sub("Gym", 10.0, PaymentCycle::Weekly, Category::Fitness),
        ]
    }

    #[test]
    fn test_total_monthly_expense_empty() {
        assert_eq!(total_monthly_expense(&[]), 0.0);
        assert_eq!(total_expense(&[], StatisticsPeriod::Yearly), 0.0);
    }

    #[test]
    fn test_total_monthly_expense() {
        let subs = sample();
        let expected = 17.99 + 15.99 + 60.99 / 3.0 + 89.90 / 12.0 + 10.0 * 30.0 / 7.0;
        assert!((total_monthly_expense(&subs) - expected).abs() < EPSILON);
        assert!(
            (total_expense(&subs, StatisticsPeriod::Yearly) - expected * 12.0).abs() < 1e-6
        );
    }

    #[test]
    fn test_category_statistics_groups_and_sorts() {
        let stats = category_statistics(&sample());
        let categories: Vec<_> = stats.iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::Fitness,
                Category::Entertainment,
                Category::Productivity,
                Category::Music,
            ]
        );

        let entertainment = &stats[1];
        assert_eq!(entertainment.transaction_count, 2);
        assert!((entertainment.total_cost - (17.99 + 89.90 / 12.0)).abs() < EPSILON);

        for pair in stats.windows(2) {
            assert!(pair[0].total_cost >= pair[1].total_cost);
        }
    }

    #[test]
    fn test_category_totals_and_percentages_add_up() {
        let subs = sample();
        let stats = category_statistics(&subs);
        let cost_sum: f64 = stats.iter().map(|s| s.total_cost).sum();
        let pct_sum: f64 = stats.iter().map(|s| s.percentage).sum();
        assert!((cost_sum - total_monthly_expense(&subs)).abs() < 1e-6);
        assert!((pct_sum - 100.0).abs() < 1e-6);
        let count: usize = stats.iter().map(|s| s.transaction_count).sum();
        assert_eq!(count, subs.len());
    }

    #[test]
    fn test_category_statistics_empty() {
        assert!(category_statistics(&[]).is_empty());
    }

    #[test]
    fn test_zero_total_gives_zero_percentages() {
        let subs = vec![
            sub("Free tier", 0.0, PaymentCycle::Monthly, Category::News),
            sub("Trial", 0.0, PaymentCycle::Weekly, Category::Gaming),
        ];
        let stats = category_statistics(&subs);
        assert_eq!(stats.len(), 2);
        assert!(stats.iter().all(|s| s.percentage == 0.0));
    }

    #[test_log::test]
    fn test_overflowing_total_gives_finite_statistics() {
        // Loaded data is not validated, so a huge cost can still show up
        let subs = vec![
            sub("Huge", 1e308, PaymentCycle::Weekly, Category::Other),
            sub("Music", 5.0, PaymentCycle::Monthly, Category::Music),
        ];
        let stats = category_statistics(&subs);
        assert_eq!(stats.len(), 2);
        assert!(stats.iter().all(|s| s.percentage == 0.0));

        let slices = pie_slice_angles(&stats);
        assert!(
            slices
                .iter()
                .all(|s| s.start_angle.is_finite() && s.end_angle.is_finite())
        );
        assert_eq!(top_category_percentage(&stats), Some(0));
    }

    #[test]
    fn test_equal_costs_follow_category_order() {
        let subs = vec![
            sub("Other thing", 5.0, PaymentCycle::Monthly, Category::Other),
            sub("Gym", 5.0, PaymentCycle::Monthly, Category::Fitness),
            sub("Paper", 5.0, PaymentCycle::Monthly, Category::News),
        ];
        let categories: Vec<_> = category_statistics(&subs)
            .iter()
            .map(|s| s.category)
            .collect();
        assert_eq!(
            categories,
            vec![Category::News, Category::Fitness, Category::Other]
        );
    }

    #[test]
    fn test_period_adjusted_yearly_only_scales_cost() {
        let stats = category_statistics(&sample());
        let yearly = period_adjusted(&stats, StatisticsPeriod::Yearly);
        for (m, y) in stats.iter().zip(&yearly) {
            assert_eq!(m.category, y.category);
            assert!((y.total_cost - m.total_cost * 12.0).abs() < EPSILON);
            assert_eq!(m.percentage, y.percentage);
            assert_eq!(m.transaction_count, y.transaction_count);
        }
        assert_eq!(period_adjusted(&stats, StatisticsPeriod::Monthly), stats);
    }

    #[test]
    fn test_pie_slices_are_contiguous_and_cover_circle() {
        let stats = category_statistics(&sample());
        let slices = pie_slice_angles(&stats);
        assert_eq!(slices.len(), stats.len());
        assert_eq!(slices[0].start_angle, PIE_START_ANGLE);
        for pair in slices.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
        }
        let last = slices.last().unwrap();
        assert!((last.end_angle - (PIE_START_ANGLE + 360.0)).abs() < 1e-6);
        let covered: f64 = slices.iter().map(PieSlice::span).sum();
        assert!((covered - 360.0).abs() < 1e-6);
    }

    #[test]
    fn test_pie_slices_from_explicit_percentages() {
        let stats = vec![
            CategoryStat {
                category: Category::Music,
                total_cost: 50.0,
                transaction_count: 1,
                percentage: 50.0,
            },
            CategoryStat {
                category: Category::News,
                total_cost: 25.0,
                transaction_count: 2,
                percentage: 25.0,
            },
            CategoryStat {
                category: Category::Other,
                total_cost: 25.0,
                transaction_count: 1,
                percentage: 25.0,
            },
        ];
        let slices = pie_slice_angles(&stats);
        assert_eq!((slices[0].start_angle, slices[0].end_angle), (-90.0, 90.0));
        assert_eq!((slices[1].start_angle, slices[1].end_angle), (90.0, 180.0));
        assert_eq!((slices[2].start_angle, slices[2].end_angle), (180.0, 270.0));
        assert!(pie_slice_angles(&[]).is_empty());
    }

    #[test]
    fn test_top_category_and_most_expensive() {
        let subs = sample();
        let stats = category_statistics(&subs);
        let expected = stats[0].percentage as u32;
        assert_eq!(top_category_percentage(&stats), Some(expected));
        assert_eq!(top_category_percentage(&[]), None);

        assert_eq!(most_expensive(&subs).unwrap().name, "Disney+");
        assert!(most_expensive(&[]).is_none());
    }

    #[test]
    fn test_report_for_yearly_period() {
        let subs = sample();
        let report = StatisticsReport::build(&subs, StatisticsPeriod::Yearly);
        assert!(!report.is_empty());
        assert_eq!(report.subscription_count, 5);
        assert!((report.total_expense - total_monthly_expense(&subs) * 12.0).abs() < 1e-6);
        let cost_sum: f64 = report.categories.iter().map(|s| s.total_cost).sum();
        assert!((cost_sum - report.total_expense).abs() < 1e-6);
        assert_eq!(report.slices.len(), report.categories.len());
        assert_eq!(report.most_expensive.as_ref().unwrap().name, "Disney+");

        let empty = StatisticsReport::build(&[], StatisticsPeriod::Monthly);
        assert!(empty.is_empty());
        assert_eq!(empty.total_expense, 0.0);
        assert!(empty.categories.is_empty());
        assert!(empty.slices.is_empty());
        assert_eq!(empty.top_category_percentage, None);
        assert!(empty.most_expensive.is_none());
    }
}
