use std::process;

use clap::Parser;
use tracing::error;

use ipwhere::config::{Cli, Command, StaticConfig, get_config, init_config};
use ipwhere::errors::IpWhereError;
use ipwhere::runtime::modes::run_server;
use ipwhere::system::{init_logging, install_panic_hook};

fn generate_config(output: Option<&str>) -> ipwhere::errors::Result<()> {
    match output {
        Some(path) => {
            StaticConfig::default().save_to_file(path)?;
            eprintln!("[INFO] Sample configuration written to {}", path);
        }
        None => print!("{}", StaticConfig::generate_sample_config()?),
    }
    Ok(())
}

fn exit_with(err: &IpWhereError) -> ! {
    eprintln!("{}", err.format_colored());
    process::exit(1);
}

#[actix_web::main]
async fn main() {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    if let Some(Command::GenerateConfig { output }) = &cli.command {
        if let Err(e) = generate_config(output.as_deref()) {
            exit_with(&e);
        }
        return;
    }

    if let Err(e) = init_config(cli.config.as_deref()) {
        exit_with(&e);
    }
    let config = get_config();

    // 必须在进程生命周期内持有，保证日志被刷新
    let log_guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => exit_with(&e),
    };
    install_panic_hook();

    if let Err(e) = run_server().await {
        error!("Fatal: {:#}", e);
        drop(log_guard);
        eprintln!("{}", IpWhereError::server_startup(format!("{:#}", e)).format_colored());
        process::exit(1);
    }
}
