//! Subscription records and the closed sets they are built from.

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

/// Recurrence period of a subscription's charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentCycle {
    Weekly,
    Monthly,
    Quarterly,
    Annually,
}

impl PaymentCycle {
    pub const ALL: [PaymentCycle; 4] = [
        PaymentCycle::Weekly,
        PaymentCycle::Monthly,
        PaymentCycle::Quarterly,
        PaymentCycle::Annually,
    ];
}

impl Display for PaymentCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PaymentCycle::Weekly => "Weekly",
                PaymentCycle::Monthly => "Monthly",
                PaymentCycle::Quarterly => "Quarterly",
                PaymentCycle::Annually => "Annually",
            }
        )
    }
}

impl FromStr for PaymentCycle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "w" => Ok(PaymentCycle::Weekly),
            "monthly" | "m" => Ok(PaymentCycle::Monthly),
            "quarterly" | "q" => Ok(PaymentCycle::Quarterly),
            "annually" | "yearly" | "y" => Ok(PaymentCycle::Annually),
            _ => Err(anyhow::anyhow!("Invalid payment cycle: {}", s)),
        }
    }
}

/// Spending category. Declaration order doubles as the tie-break order for
/// category statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Entertainment,
    Music,
    Productivity,
    News,
    Gaming,
    Fitness,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Entertainment,
        Category::Music,
        Category::Productivity,
        Category::News,
        Category::Gaming,
        Category::Fitness,
        Category::Other,
    ];

    /// Returns the icon name and display color for the category
    pub fn display_info(&self) -> (&'static str, &'static str) {
        match self {
            Category::Entertainment => ("tv.fill", "purple"),
            Category::Music => ("music.note", "pink"),
            Category::Productivity => ("briefcase.fill", "blue"),
            Category::News => ("newspaper.fill", "orange"),
            Category::Gaming => ("gamecontroller.fill", "green"),
            Category::Fitness => ("figure.run", "red"),
            Category::Other => ("square.grid.2x2.fill", "gray"),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Category::Entertainment => "Entertainment",
                Category::Music => "Music",
                Category::Productivity => "Productivity",
                Category::News => "News",
                Category::Gaming => "Gaming",
                Category::Fitness => "Fitness",
                Category::Other => "Other",
            }
        )
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("Invalid category: {}", s))
    }
}

/// A recurring subscription. The id is assigned once at creation and never
/// changes, including across save/load cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub name: String,
    pub cost: f64,
    pub currency_code: String,
    pub renewal_date: NaiveDate,
    pub payment_cycle: PaymentCycle,
    pub category: Category,
    #[serde(default)]
    pub is_custom: bool,
}

impl Subscription {
    pub fn new(
        name: impl Into<String>,
        cost: f64,
        currency_code: impl Into<String>,
        renewal_date: NaiveDate,
        payment_cycle: PaymentCycle,
        category: Category,
        is_custom: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            cost,
            currency_code: currency_code.into(),
            renewal_date,
            payment_cycle,
            category,
            is_custom,
        }
    }

    /// Whole days from `today` until the next renewal. Negative once the
    /// renewal date has passed.
    pub fn days_until_renewal(&self, today: NaiveDate) -> i64 {
        (self.renewal_date - today).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_until_renewal() {
        let sub = Subscription::new(
            "Netflix",
            17.99,
            "EUR",
            date(2025, 12, 11),
            PaymentCycle::Monthly,
            Category::Entertainment,
            false,
        );
        assert_eq!(sub.days_until_renewal(date(2025, 12, 8)), 3);
        assert_eq!(sub.days_until_renewal(date(2025, 12, 11)), 0);
        assert_eq!(sub.days_until_renewal(date(2025, 12, 20)), -9);
    }

    #[test]
    fn test_new_assigns_distinct_ids() {
        let a = Subscription::new(
            "A",
            1.0,
            "EUR",
            date(2025, 1, 1),
            PaymentCycle::Monthly,
            Category::Other,
            true,
        );
        let b = a.clone();
        let c = Subscription::new(
            "A",
            1.0,
            "EUR",
            date(2025, 1, 1),
            PaymentCycle::Monthly,
            Category::Other,
            true,
        );
        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_yaml_field_names() {
        let sub = Subscription::new(
            "Spotify Family",
            15.99,
            "EUR",
            date(2025, 12, 23),
            PaymentCycle::Quarterly,
            Category::Music,
            false,
        );
        let yaml = serde_yaml::to_string(&sub).unwrap();
        assert!(yaml.contains("id: "));
        assert!(yaml.contains(&sub.id.to_string()));
        assert!(yaml.contains("currency_code: EUR"));
        assert!(yaml.contains("renewal_date: "));
        assert!(yaml.contains("2025-12-23"));
        assert!(yaml.contains("payment_cycle: quarterly"));
        assert!(yaml.contains("category: music"));
        assert!(yaml.contains("is_custom: false"));

        let parsed: Subscription = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, sub);
    }

    #[test]
    fn test_parse_cycle_and_category() {
        assert_eq!(
            "Quarterly".parse::<PaymentCycle>().unwrap(),
            PaymentCycle::Quarterly
        );
        assert_eq!(
            "yearly".parse::<PaymentCycle>().unwrap(),
            PaymentCycle::Annually
        );
        assert!("fortnightly".parse::<PaymentCycle>().is_err());

        assert_eq!("gaming".parse::<Category>().unwrap(), Category::Gaming);
        assert_eq!("NEWS".parse::<Category>().unwrap(), Category::News);
        assert!("food".parse::<Category>().is_err());
    }
}
