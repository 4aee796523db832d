use clap::Parser;

use inertiafit_nutrition_rs::cli::{Cli, Command, RecommendArgs};
use inertiafit_nutrition_rs::client::{HttpTransport, RecommendationClient};
use inertiafit_nutrition_rs::config::AppConfig;
use inertiafit_nutrition_rs::error::Result;
use inertiafit_nutrition_rs::interface::{
    adjust_preferences, display_fields, display_outcome, prompt_yes_no,
};
use inertiafit_nutrition_rs::logging;
use inertiafit_nutrition_rs::models::{NutritionPreference, PreferenceModel};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.service.base_url = endpoint;
    }
    logging::init(&config.logging)?;

    match cli.command.unwrap_or_default() {
        Command::Recommend(args) => cmd_recommend(&config, &args).await,
        Command::Fields => {
            display_fields(&NutritionPreference::default());
            Ok(())
        }
        Command::Health => cmd_health(&config).await,
    }
}

/// Collect targets, submit them, and show the outcome.
async fn cmd_recommend(config: &AppConfig, args: &RecommendArgs) -> Result<()> {
    let mut model = PreferenceModel::new();
    for (field, value) in args.overrides() {
        model.set(field, value)?;
    }
    for (name, value) in &args.assignments {
        model.set_named(name, *value)?;
    }

    let transport = HttpTransport::new(&config.service)?;
    tracing::info!(url = %transport.recommend_url(), "using recommendation service");
    let mut client = RecommendationClient::new(transport);

    loop {
        if args.interactive {
            adjust_preferences(&mut model)?;
        } else {
            display_fields(&model.read());
        }

        let pending = client.begin(&model.read())?;
        display_outcome(client.outcome());

        let completion = client.dispatch(pending).await;
        client.complete(completion);
        display_outcome(client.outcome());

        if !args.interactive || !prompt_yes_no("Adjust targets and generate again?", true)? {
            break;
        }
    }

    Ok(())
}

/// Report whether the recommendation service is reachable.
async fn cmd_health(config: &AppConfig) -> Result<()> {
    let transport = HttpTransport::new(&config.service)?;

    match transport.check_health().await {
        Ok(health) => {
            println!("{}: {} ({})", transport.endpoint(), health.status, health.message);
            Ok(())
        }
        Err(e) => {
            eprintln!("Recommendation service at {} is unavailable.", transport.endpoint());
            Err(e)
        }
    }
}
