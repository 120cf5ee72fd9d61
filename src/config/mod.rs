pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "surcharge")]
#[command(about = "Apply configured surcharges to catalog item prices")]
pub struct CliConfig {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "surcharge.toml")]
    pub config: String,

    /// Override catalog.input from the configuration
    #[arg(long)]
    pub input: Option<String>,

    /// Override catalog.output_path from the configuration
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// Evaluate surcharges without writing any output
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 將命令列參數套用到 TOML 設定上
    pub fn apply_overrides(&self, config: &mut toml_config::TomlConfig) {
        if let Some(input) = &self.input {
            config.catalog.input = input.clone();
            tracing::info!("🔧 Catalog input overridden to: {}", input);
        }
        if let Some(output_path) = &self.output_path {
            config.catalog.output_path = output_path.clone();
            tracing::info!("🔧 Output path overridden to: {}", output_path);
        }
    }
}
