pub mod cli;
pub mod core;
pub mod store;

use crate::cli::manage::NewSubscription;
use crate::cli::onboard::{ConsoleInput, OnboardOutcome};
use crate::core::assistant;
use crate::core::catalog;
use crate::core::config::AppConfig;
use crate::core::onboarding::OnboardingFlow;
use crate::core::statistics::{StatisticsPeriod, StatisticsReport};
use crate::store::SubscriptionStore;
use crate::store::disk::YamlRepository;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use tracing::{debug, info};
use uuid::Uuid;

pub enum AppCommand {
    List,
    Add(NewSubscription),
    Show(Uuid),
    Delete(Uuid),
    Clear,
    Stats { period: StatisticsPeriod, json: bool },
    Onboard { skip: bool },
    Ask(String),
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Opens the store backed by the YAML files in the configured data directory.
pub fn open_store(config: &AppConfig) -> Result<SubscriptionStore> {
    let data_dir = config.data_dir()?;
    info!("Using data directory {}", data_dir.display());
    Ok(SubscriptionStore::open(Box::new(YamlRepository::new(data_dir))))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    let mut store = open_store(&config)?;

    match command {
        AppCommand::List => {
            println!("{}", cli::list::render(&store, today()));
        }
        AppCommand::Add(input) => {
            let subscription = cli::manage::add(&mut store, input, &config.currency, today())?;
            println!("Added {} ({})", subscription.name, subscription.id);
        }
        AppCommand::Show(id) => {
            println!("{}", cli::show::show(&store, id, today())?);
        }
        AppCommand::Delete(id) => {
            let removed = cli::manage::delete(&mut store, id)?;
            println!("Deleted {} ({})", removed.name, removed.id);
        }
        AppCommand::Clear => {
            let removed = cli::manage::clear(&mut store);
            println!("Deleted {removed} subscriptions");
        }
        AppCommand::Stats { period, json } => {
            let report = StatisticsReport::build(store.subscriptions(), period);
            if json {
                println!("{}", report.to_json()?);
            } else {
                println!("{}", report.display_as_table(&config.currency));
            }
        }
        AppCommand::Onboard { skip } => {
            let mut flow = OnboardingFlow::new(catalog::popular_services());
            let outcome = if skip {
                flow.begin()?;
                flow.skip(&mut store)?;
                OnboardOutcome::Skipped
            } else {
                cli::onboard::run(
                    &mut store,
                    &mut ConsoleInput::new(),
                    &mut flow,
                    &config.currency,
                    today(),
                )?
            };
            match outcome {
                OnboardOutcome::Completed(count) => println!("Added {count} subscriptions"),
                OnboardOutcome::Skipped => println!("Onboarding skipped"),
                OnboardOutcome::Abandoned => println!("Onboarding abandoned, nothing was saved"),
            }
        }
        AppCommand::Ask(question) => {
            let answer = assistant::answer(&question, store.subscriptions());
            println!("{}", answer.message(&config.currency));
        }
    }

    cli::ui::print_save_warning(&store);
    Ok(())
}
