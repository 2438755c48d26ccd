use clap::Parser;
use stea_client::utils::error::{ErrorSeverity, SteaError};
use stea_client::utils::{logger, validation::Validate};
use stea_client::{CalculationRunner, CliArgs, LocalStorage, RunOutcome, SteaClient, SteaConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting stea CLI");
    tracing::debug!("CLI args: {:?}", args);

    match run(&args).await {
        Ok(RunOutcome::DryRun(request)) => {
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        Ok(RunOutcome::Completed { results, written }) => {
            tracing::info!("✅ Stea calculation completed");
            for (key, value) in &results {
                println!("{}: {}", key, value);
            }
            tracing::info!("📁 Wrote: {}", written.join(", "));
        }
        Err(e) => {
            tracing::error!(
                "❌ Stea calculation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run(args: &CliArgs) -> Result<RunOutcome, SteaError> {
    args.validate()?;

    let config = SteaConfig::load(&args.config, args.ecl_case.as_deref())?;
    let client = SteaClient::from_config(&config)?;
    let storage = LocalStorage::new(&args.output_path);

    CalculationRunner::new(client, storage, config)
        .run(args.dry_run, &args.response_file)
        .await
}
