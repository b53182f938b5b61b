use clap::Parser;
use colored::Colorize;

use pulso::cli::{Cli, Commands};
use pulso::config::{get_config, init_config};
use pulso::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // 配置无效时直接退出
    if let Err(e) = init_config(cli.config.as_deref()) {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }
    let config = get_config();

    // 必须持有 guard 直到进程退出，否则缓冲中的日志会丢失
    let _log_guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    match cli.command {
        #[cfg(feature = "server")]
        Commands::Serve => pulso::runtime::modes::run_server().await,

        #[cfg(feature = "cli")]
        cmd => {
            if let Err(e) = pulso::runtime::modes::run_cli(cmd).await {
                eprintln!("{} {}", "✗".bold().red(), e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }

        #[cfg(not(feature = "cli"))]
        _ => anyhow::bail!("pipeline commands require the `cli` feature"),
    }
}
