use aws_facade::config::{Command, TransferArgs};
use aws_facade::utils::{logger, validation::Validate};
use aws_facade::{AwsClients, AwsFacade, CliConfig, FacadeConfig, Result, TransferDirection};
use clap::Parser;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if let Err(e) = run(cli).await {
        tracing::error!("❌ {} (category: {:?})", e, e.category());
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: CliConfig) -> Result<()> {
    let mut config = FacadeConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let timeout = config.operation_timeout();
    let facade = AwsClients::connect(&config).await.into_facade();

    let result = match &cli.command {
        Command::Tables { json, .. } => {
            list_tables(&facade, config.dynamodb.list_limit, timeout, *json).await
        }
        Command::Put(args) => {
            transfer(&facade, &config, TransferDirection::Upload, args, timeout).await
        }
        Command::Get(args) => {
            transfer(&facade, &config, TransferDirection::Download, args, timeout).await
        }
    };

    facade.shutdown();
    result
}

async fn list_tables(
    facade: &AwsFacade,
    limit: usize,
    timeout: Duration,
    json: bool,
) -> Result<()> {
    let names = facade.list_table_names(limit, timeout).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        for name in &names {
            println!("{}", name);
        }
    }
    Ok(())
}

async fn transfer(
    facade: &AwsFacade,
    config: &FacadeConfig,
    direction: TransferDirection,
    args: &TransferArgs,
    timeout: Duration,
) -> Result<()> {
    let location = args.location(config)?;
    let outcome = facade
        .transfer_object(direction, &location, &args.file, timeout)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!(
            "✅ {} {} ({} bytes, {:?})",
            outcome.direction,
            outcome.location,
            outcome.bytes,
            outcome.elapsed
        );
    }
    Ok(())
}
