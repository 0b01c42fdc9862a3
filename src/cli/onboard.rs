//! Interactive terminal driver for the onboarding flow.

use super::ui;
use crate::core::catalog::PredefinedService;
use crate::core::error::FlowError;
use crate::core::onboarding::{
    OnboardingFlow, SUPPORTED_CURRENCIES, StepOutcome, SubscriptionDraft,
};
use crate::store::SubscriptionStore;
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::Cell;
use console::Term;
use std::collections::VecDeque;
use tracing::debug;

/// Source of user answers. `None` means the user went away (EOF or
/// closed terminal).
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Option<String>;
}

/// Reads answers from the terminal.
pub struct ConsoleInput {
    term: Term,
}

impl ConsoleInput {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for ConsoleInput {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for ConsoleInput {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.term.write_str(prompt).ok()?;
        if self.term.is_term() {
            return match self.term.read_line() {
                Ok(line) => Some(line),
                Err(e) => {
                    debug!("Terminal input closed: {e}");
                    None
                }
            };
        }
        // Piped input: zero bytes read means EOF
        let mut line = String::new();
        match std::io::stdin().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(e) => {
                debug!("Input closed: {e}");
                None
            }
        }
    }
}

/// Pre-recorded answers, consumed in order.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> Option<String> {
        self.lines.pop_front()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardOutcome {
    /// All steps configured; this many subscriptions were added.
    Completed(usize),
    Skipped,
    /// The user left; nothing was written to the store.
    Abandoned,
}

/// Reads one trimmed answer. `None` when the user goes away or types `quit`.
fn ask(input: &mut dyn LineSource, prompt: &str) -> Option<String> {
    let line = input.read_line(prompt)?;
    let answer = line.trim();
    if answer.eq_ignore_ascii_case("quit") {
        return None;
    }
    Some(answer.to_string())
}

fn print_catalog(flow: &OnboardingFlow) {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Service"),
        ui::header_cell("Id"),
        ui::header_cell("Selected"),
    ]);
    for (i, service) in flow.catalog().iter().enumerate() {
        let selected = if flow.is_selected(service.id) { "[x]" } else { "[ ]" };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(service.name),
            Cell::new(ui::style_text(service.id, ui::StyleType::Subtle)),
            Cell::new(selected),
        ]);
    }
    println!("{table}");
}

/// Resolves a catalog row number (1-based) or service id.
fn resolve_service<'s>(catalog: &[PredefinedService], answer: &'s str) -> &'s str {
    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| catalog.get(i))
        .map_or(answer, |s| s.id)
}

/// Walks the user through onboarding: select services, then configure one
/// subscription per selected service.
pub fn run(
    store: &mut SubscriptionStore,
    input: &mut dyn LineSource,
    flow: &mut OnboardingFlow,
    default_currency: &str,
    today: NaiveDate,
) -> Result<OnboardOutcome> {
    flow.begin()?;

    println!(
        "{}",
        ui::style_text("Select your active subscriptions", ui::StyleType::Title)
    );
    print_catalog(flow);

    loop {
        let prompt = format!(
            "Toggle a service by number or id, `next` ({} selected), `skip` or `quit`: ",
            flow.selection_count()
        );
        let Some(answer) = ask(input, &prompt) else {
            return Ok(OnboardOutcome::Abandoned);
        };
        match answer.to_lowercase().as_str() {
            "" => continue,
            "skip" => {
                flow.skip(store)?;
                return Ok(OnboardOutcome::Skipped);
            }
            "next" => match flow.start_configuration() {
                Ok(()) => break,
                Err(e @ FlowError::EmptySelection) => {
                    println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
                }
                Err(e) => return Err(e.into()),
            },
            _ => {
                let id = resolve_service(flow.catalog(), &answer);
                match flow.toggle(id) {
                    Ok(true) => println!("Selected {id}"),
                    Ok(false) => println!("Deselected {id}"),
                    Err(e) => println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error)),
                }
            }
        }
    }

    while let Some(service) = flow.current_service().copied() {
        let step = flow.current_step().unwrap_or_default();
        println!(
            "\n{}",
            ui::style_text(
                &format!("Configure {} ({}/{})", service.name, step + 1, flow.total_steps()),
                ui::StyleType::Title
            )
        );

        let Some(mut draft) = flow.draft(today) else {
            break;
        };
        draft = draft.with_currency(default_currency);

        if fill_draft(input, &mut draft).is_none() {
            return Ok(OnboardOutcome::Abandoned);
        }

        match flow.submit(&draft, store) {
            Ok(StepOutcome::Advanced(_)) => continue,
            Ok(StepOutcome::Completed(count)) => return Ok(OnboardOutcome::Completed(count)),
            Err(FlowError::Rejected(e)) => {
                println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(OnboardOutcome::Completed(0))
}

/// Asks for every field of `draft`. Blank answers keep the pre-filled value.
/// Returns `None` when the user abandons the session.
fn fill_draft(input: &mut dyn LineSource, draft: &mut SubscriptionDraft) -> Option<()> {
    let name = ask(input, &format!("Name [{}]: ", draft.name))?;
    if !name.is_empty() {
        draft.name = name;
    }

    draft.cost = ask(input, "Cost: ")?;

    let prompt = format!(
        "Currency ({}) [{}]: ",
        SUPPORTED_CURRENCIES.join("/"),
        draft.currency
    );
    let currency = ask(input, &prompt)?;
    if !currency.is_empty() {
        draft.currency = currency.to_uppercase();
    }

    loop {
        let prompt = format!(
            "Payment cycle (weekly/monthly/quarterly/annually) [{}]: ",
            draft.payment_cycle
        );
        let cycle = ask(input, &prompt)?;
        if cycle.is_empty() {
            break;
        }
        match cycle.parse() {
            Ok(parsed) => {
                draft.payment_cycle = parsed;
                break;
            }
            Err(e) => println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error)),
        }
    }

    loop {
        let category = ask(input, &format!("Category [{}]: ", draft.category))?;
        if category.is_empty() {
            break;
        }
        match category.parse() {
            Ok(parsed) => {
                draft.category = parsed;
                break;
            }
            Err(e) => println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error)),
        }
    }

    loop {
        let date = ask(input, &format!("Next renewal (YYYY-MM-DD) [{}]: ", draft.renewal_date))?;
        if date.is_empty() {
            break;
        }
        match NaiveDate::parse_from_str(&date, "%Y-%m-%d") {
            Ok(parsed) => {
                draft.renewal_date = parsed;
                break;
            }
            Err(e) => println!(
                "{}",
                ui::style_text(&format!("Invalid date {date}: {e}"), ui::StyleType::Error)
            ),
        }
    }

    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog;
    use crate::core::subscription::{Category, PaymentCycle};
    use crate::store::memory::MemoryRepository;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 8).unwrap()
    }

    fn run_script(lines: &[&str]) -> (MemoryRepository, SubscriptionStore, OnboardOutcome) {
        let repo = MemoryRepository::new();
        let mut store = SubscriptionStore::open(Box::new(repo.clone()));
        let mut flow = OnboardingFlow::new(catalog::popular_services());
        let mut input = ScriptedInput::new(lines.iter().copied());
        let outcome = run(&mut store, &mut input, &mut flow, "EUR", today()).unwrap();
        (repo, store, outcome)
    }

    #[test_log::test]
    fn test_full_session() {
        let (repo, store, outcome) = run_script(&[
            "spotify",
            "1", // netflix
            "next",
            // Netflix
            "",
            "17.99",
            "",
            "",
            "",
            "2025-12-11",
            // Spotify
            "Spotify Family",
            "15.99",
            "usd",
            "annually",
            "",
            "",
        ]);

        assert_eq!(outcome, OnboardOutcome::Completed(2));
        assert!(store.is_logged_in());
        let subs = repo.saved_subscriptions();
        assert_eq!(subs.len(), 2);

        assert_eq!(subs[0].name, "Netflix");
        assert_eq!(subs[0].cost, 17.99);
        assert_eq!(subs[0].currency_code, "EUR");
        assert_eq!(subs[0].payment_cycle, PaymentCycle::Monthly);
        assert_eq!(subs[0].category, Category::Entertainment);
        assert_eq!(subs[0].renewal_date, NaiveDate::from_ymd_opt(2025, 12, 11).unwrap());

        assert_eq!(subs[1].name, "Spotify Family");
        assert_eq!(subs[1].currency_code, "USD");
        assert_eq!(subs[1].payment_cycle, PaymentCycle::Annually);
        assert_eq!(subs[1].renewal_date, today());
        assert!(subs.iter().all(|s| !s.is_custom));
    }

    #[test_log::test]
    fn test_rejected_step_is_asked_again() {
        let (_repo, store, outcome) = run_script(&[
            "custom",
            "next",
            // First attempt: cost is not a number
            "Local gym",
            "abc",
            "",
            "weekly",
            "fitness",
            "",
            // Second attempt
            "Local gym",
            "10",
            "",
            "weekly",
            "fitness",
            "",
        ]);

        assert_eq!(outcome, OnboardOutcome::Completed(1));
        let sub = &store.subscriptions()[0];
        assert_eq!(sub.name, "Local gym");
        assert_eq!(sub.payment_cycle, PaymentCycle::Weekly);
        assert_eq!(sub.category, Category::Fitness);
        assert!(sub.is_custom);
    }

    #[test_log::test]
    fn test_next_without_selection_and_bad_ids() {
        let (_repo, store, outcome) = run_script(&["next", "no-such-service", "99", "skip"]);
        assert_eq!(outcome, OnboardOutcome::Skipped);
        assert!(store.is_logged_in());
        assert!(store.is_empty());
    }

    #[test_log::test]
    fn test_abandon_mid_configuration() {
        let (repo, store, outcome) = run_script(&[
            "netflix", "spotify", "next", "", "9.99", "", "", "", "", "Spotify", "quit",
        ]);
        assert_eq!(outcome, OnboardOutcome::Abandoned);
        assert!(store.is_empty());
        assert!(!store.is_logged_in());
        assert_eq!(repo.save_count(), 0);
    }

    #[test_log::test]
    fn test_end_of_input_abandons() {
        let (_repo, store, outcome) = run_script(&["netflix"]);
        assert_eq!(outcome, OnboardOutcome::Abandoned);
        assert!(!store.is_logged_in());
    }
}
