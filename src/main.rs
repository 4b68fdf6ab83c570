use clap::Parser;
use pos_tracker_client::utils::error::ErrorSeverity;
use pos_tracker_client::utils::logger;
use pos_tracker_client::{run_with_config, ClientError, CliConfig, TomlConfig};

fn report_and_exit(e: ClientError) -> ! {
    tracing::error!(
        "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
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
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    let command = match config.command.clone().into_command() {
        Ok(command) => command,
        Err(e) => report_and_exit(e),
    };

    // 指定 --config 時，以 TOML 的連線設定取代命令列參數
    let outcome = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(toml_config) => run_with_config(&toml_config, command).await,
                Err(e) => Err(e),
            }
        }
        None => run_with_config(&config, command).await,
    };

    match outcome {
        Ok(output) => println!("{}", output),
        Err(e) => report_and_exit(e),
    }
}
