use anyhow::Context;
use cart_store::utils::error::CartError;
use cart_store::utils::{logger, validation::Validate};
use cart_store::{run_demo, CartCommand, CartStore, CliConfig, KeyValueStore};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = cli
        .store_config()
        .context("failed to load cart-store configuration")?;

    if config.json_logging() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let mut store = match config.open() {
        Ok(store) => store,
        Err(e) => exit_with(&e),
    };

    if let Err(e) = execute(&cli.command, &mut store) {
        tracing::error!("Command failed: {} (Severity: {:?})", e, e.severity());
        exit_with(&e);
    }

    Ok(())
}

fn execute<S: KeyValueStore>(
    command: &CartCommand,
    store: &mut CartStore<S>,
) -> cart_store::Result<()> {
    let item = command.item().transpose()?;

    match (command, item) {
        (CartCommand::Add { .. }, Some(item)) => store.add_one(&item)?,
        (CartCommand::Remove { .. }, Some(item)) => store.remove_one(&item)?,
        (CartCommand::RemoveAll { .. }, Some(item)) => store.remove_all(&item)?,
        (CartCommand::Clear, _) => store.clear()?,
        (CartCommand::Demo, _) => {
            run_demo(store)?;
            return Ok(());
        }
        (CartCommand::Show, _) | (_, None) => {}
    }

    println!("{}", store.inspect());
    Ok(())
}

fn exit_with(e: &CartError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code())
}
