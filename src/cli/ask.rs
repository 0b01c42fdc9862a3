use crate::core::assistant::Answer;

impl Answer {
    /// Reply text. Totals mix currencies nominally, so `currency` only
    /// labels them.
    pub fn message(&self, currency: &str) -> String {
        match self {
            Answer::Spending {
                monthly_total,
                count,
            } => format!(
                "Your total monthly expenses are {monthly_total:.2} {currency}. \
                 You have {count} active subscriptions."
            ),
            Answer::CancelCandidate {
                name,
                cost,
                currency_code,
            } => format!(
                "Your most expensive subscription is {name} at {cost:.2} {currency_code}. \
                 Consider cancelling it if you do not use it regularly."
            ),
            Answer::GeneralSavingTip => "Review the subscriptions you use least and consider \
                                         cancelling them to save money."
                .to_string(),
            Answer::TopCategory {
                category,
                monthly_cost,
            } => format!(
                "Your most expensive category is {category} with {monthly_cost:.2} {currency} \
                 per month."
            ),
            Answer::ActiveCount(count) => format!("You have {count} active subscriptions."),
            Answer::Greeting => "Hi! Ask me about your expenses, your subscriptions or how to \
                                 save money."
                .to_string(),
        }
    }
}
