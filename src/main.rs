use clap::Parser;
use surcharge_engine::core::Pipeline;
use surcharge_engine::utils::error::ErrorSeverity;
use surcharge_engine::utils::{logger, validation::Validate};
use surcharge_engine::{CatalogPipeline, CliConfig, LocalStorage, SurchargeRunner, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting surcharge CLI");
    tracing::info!("📁 Loading configuration from: {}", cli.config);

    let mut config = match TomlConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };
    cli.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, cli.dry_run);

    let storage = LocalStorage::new(".");
    let pipeline = CatalogPipeline::new(storage, config).with_settings_file(&cli.config);

    let outcome = if cli.dry_run {
        dry_run(&pipeline).await
    } else {
        SurchargeRunner::new(pipeline).run().await
    };

    match outcome {
        Ok(output) => {
            tracing::info!("✅ Surcharge run completed successfully!");
            println!("✅ Surcharge run completed successfully!");
            println!("📁 {}", output);
        }
        Err(e) => {
            tracing::error!(
                "❌ Surcharge run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
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

fn display_config_summary(config: &TomlConfig, dry_run: bool) {
    let surcharge = &config.surcharge;
    let or_unset = |value: Option<String>| value.unwrap_or_else(|| "(not set)".to_string());

    println!("📋 Configuration Summary:");
    println!(
        "  Category: {}",
        or_unset(surcharge.category.as_ref().map(|c| c.to_string()))
    );
    println!(
        "  Type: {}",
        or_unset(surcharge.surcharge_type.as_ref().map(|t| t.to_string()))
    );
    println!(
        "  Amount: {}",
        or_unset(surcharge.surcharge_amount.map(|a| a.to_string()))
    );
    if surcharge.strict {
        println!("  Strict: enabled");
    }
    println!("  Delivery times: {}", config.delivery_times.source);
    println!("  Input: {}", config.catalog.input);
    println!("  Output: {}", config.catalog.output_path);
    println!("  Formats: {}", config.catalog.output_formats.join(", "));

    if dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn dry_run<P: Pipeline>(pipeline: &P) -> surcharge_engine::Result<String> {
    let catalog = pipeline.extract().await?;
    let result = pipeline.transform(catalog).await?;

    println!("🔍 Dry Run Analysis:");
    println!("  Items evaluated: {}", result.report.evaluated);
    println!("  Items qualified: {}", result.report.qualified);
    println!("  Surcharges applied: {}", result.report.applied);

    Ok("Dry run complete, nothing written".to_string())
}
