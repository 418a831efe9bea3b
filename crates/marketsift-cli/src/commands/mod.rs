mod quote;
mod screen;
mod strategies;

use std::time::Duration;

use serde_json::Value;

use marketsift_core::{AcquisitionCoordinator, ChainConfig, Envelope};
use marketsift_screener::ScreenerService;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let service = build_service(cli);

    match &cli.command {
        Command::Quote(args) => quote::run(args, &service).await,
        Command::Screen(args) => screen::run(args, &service).await,
        Command::Strategies(args) => strategies::run(args, &service),
    }
}

fn build_service(cli: &Cli) -> ScreenerService {
    let mut config = ChainConfig::default();

    if let Some(timeout_ms) = cli.timeout_ms {
        let timeout = Duration::from_millis(timeout_ms);
        config.sina.timeout = timeout;
        config.tencent.timeout = timeout;
        config.eastmoney.timeout = timeout;
    }
    config.deadline = cli.deadline_ms.map(Duration::from_millis);
    config.use_real_data = !cli.offline;

    let coordinator = if cli.offline {
        // No adapters needed; the chain is skipped in offline mode.
        AcquisitionCoordinator::with_adapters(Vec::new(), config)
    } else {
        AcquisitionCoordinator::live(config)
    };

    ScreenerService::new(coordinator)
}
