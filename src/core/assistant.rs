//! Keyword-driven answers to free-form questions about the subscriptions.
//!
//! Questions are matched against a fixed set of topics in priority order;
//! the first topic with a matching keyword (and, where needed, data to
//! answer with) wins.

use crate::core::statistics::{category_statistics, most_expensive, total_monthly_expense};
use crate::core::subscription::{Category, Subscription};
use tracing::debug;

const SPENDING_KEYWORDS: [&str; 3] = ["cost", "expense", "spend"];
const SAVING_KEYWORDS: [&str; 3] = ["reduce", "save", "cancel"];
const CATEGORY_KEYWORDS: [&str; 1] = ["categor"];
const COUNT_KEYWORDS: [&str; 2] = ["how many", "count"];

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// Monthly-equivalent total over all subscriptions.
    Spending { monthly_total: f64, count: usize },
    /// The subscription with the highest nominal cost, as a saving hint.
    CancelCandidate {
        name: String,
        cost: f64,
        currency_code: String,
    },
    /// Saving advice when there is nothing to point at.
    GeneralSavingTip,
    TopCategory {
        category: Category,
        monthly_cost: f64,
    },
    ActiveCount(usize),
    /// The question matched no topic.
    Greeting,
}

fn mentions(question: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| question.contains(k))
}

/// Answers `question` from the current subscriptions.
pub fn answer(question: &str, subscriptions: &[Subscription]) -> Answer {
    let question = question.trim().to_lowercase();
    debug!("Answering question: {question}");

    if mentions(&question, &SPENDING_KEYWORDS) {
        return Answer::Spending {
            monthly_total: total_monthly_expense(subscriptions),
            count: subscriptions.len(),
        };
    }

    if mentions(&question, &SAVING_KEYWORDS) {
        return match most_expensive(subscriptions) {
            Some(sub) => Answer::CancelCandidate {
                name: sub.name.clone(),
                cost: sub.cost,
                currency_code: sub.currency_code.clone(),
            },
            None => Answer::GeneralSavingTip,
        };
    }

    // Without any category data the question falls through to later topics
    if mentions(&question, &CATEGORY_KEYWORDS)
        && let Some(top) = category_statistics(subscriptions).first()
    {
        return Answer::TopCategory {
            category: top.category,
            monthly_cost: top.total_cost,
        };
    }

    if mentions(&question, &COUNT_KEYWORDS) {
        return Answer::ActiveCount(subscriptions.len());
    }

    Answer::Greeting
}
