use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use subtrack::cli::manage::NewSubscription;
use subtrack::core::log::init_logging;
use subtrack::core::statistics::StatisticsPeriod;
use subtrack::core::subscription::{Category, PaymentCycle};
use uuid::Uuid;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct AddArgs {
    /// Display name
    #[arg(short, long)]
    name: String,

    /// Cost per payment cycle
    #[arg(long)]
    cost: String,

    /// Currency code (EUR, USD or GBP); defaults to the configured currency
    #[arg(long)]
    currency: Option<String>,

    /// weekly, monthly, quarterly or annually
    #[arg(long, default_value = "monthly")]
    cycle: PaymentCycle,

    #[arg(long, default_value = "other")]
    category: Category,

    /// Next renewal date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    renewal_date: Option<NaiveDate>,
}

impl From<AddArgs> for NewSubscription {
    fn from(args: AddArgs) -> Self {
        NewSubscription {
            name: args.name,
            cost: args.cost,
            currency: args.currency,
            payment_cycle: args.cycle,
            category: args.category,
            renewal_date: args.renewal_date,
        }
    }
}

impl From<Commands> for subtrack::AppCommand {
    fn from(cmd: Commands) -> subtrack::AppCommand {
        match cmd {
            Commands::List => subtrack::AppCommand::List,
            Commands::Add(args) => subtrack::AppCommand::Add(args.into()),
            Commands::Show { id } => subtrack::AppCommand::Show(id),
            Commands::Delete { id } => subtrack::AppCommand::Delete(id),
            Commands::Clear => subtrack::AppCommand::Clear,
            Commands::Stats { yearly, json } => subtrack::AppCommand::Stats {
                period: if yearly {
                    StatisticsPeriod::Yearly
                } else {
                    StatisticsPeriod::Monthly
                },
                json,
            },
            Commands::Onboard { skip } => subtrack::AppCommand::Onboard { skip },
            Commands::Ask { question } => subtrack::AppCommand::Ask(question.join(" ")),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List subscriptions by renewal date
    List,
    /// Add a subscription
    Add(AddArgs),
    /// Show the details of a subscription
    Show { id: Uuid },
    /// Delete a subscription by id
    Delete { id: Uuid },
    /// Delete all subscriptions
    Clear,
    /// Display spending statistics
    Stats {
        /// Show yearly instead of monthly figures
        #[arg(long)]
        yearly: bool,
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Pick and configure your subscriptions
    Onboard {
        /// Skip onboarding without adding anything
        #[arg(long)]
        skip: bool,
    },
    /// Ask a question about your spending, e.g. `subtrack ask how can I save`
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => subtrack::cli::setup::setup(),
        Some(cmd) => subtrack::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
