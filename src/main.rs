mod asset;
mod cli;
mod config;
mod download;
mod error;
mod install;
mod platform;
mod types;


use anyhow::{anyhow, Result};
use clap::Parser;
use cli::Cli;
use config::{detect_package_manager, Settings, ARM_VERSION_VAR, USER_AGENT_VAR};
use error::InstallError;
use std::env;
use types::PlatformKey;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli)?;

    if let Err(err) = run(&cli).await {
        fail(&err);
    }

    Ok(())
}

async fn run(cli: &Cli) -> error::Result<()> {
    let settings = settings_for(cli);

    let key = platform_key_for(cli);
    let tag = platform::resolve(&key)?;
    let version = settings.release_version()?;
    let target = asset::locate(&settings.release_base_url, &tag, &version);

    if cli.print_target {
        println!("url: {}", target.url);
        println!("format: {}", target.format);
        println!("binary: {}", target.format.binary_name());
        return Ok(());
    }

    if !cli.skip_invoker_check {
        detect_package_manager(env::var(USER_AGENT_VAR).ok().as_deref())?;
    }

    let client = download::build_client()?;
    install::install_release(&client, &target, &settings.install_dir).await?;

    Ok(())
}

/// The one abnormal exit of the process.
fn fail(err: &InstallError) -> ! {
    tracing::error!("Error: {}", err);
    // RUST_LOG may filter the line above out.
    eprintln!("Error: {}", err);
    std::process::exit(err.exit_code())
}

fn settings_for(cli: &Cli) -> Settings {
    let mut settings = Settings::from_env();

    if let Some(dir) = &cli.install_dir {
        settings.install_dir = dir.clone();
    }
    if let Some(url) = &cli.release_base_url {
        settings.release_base_url = url.clone();
    }
    if let Some(path) = &cli.package_json {
        settings.package_json = path.clone();
    }
    if let Some(version) = &cli.release_version {
        settings.release_version = Some(version.clone());
    }

    settings
}

fn platform_key_for(cli: &Cli) -> PlatformKey {
    let mut key = PlatformKey::host();

    if let Some(os) = &cli.os {
        key.os = os.clone();
    }
    if let Some(arch) = &cli.arch {
        key.arch = arch.clone();
    }
    if let Some(arm_version) = cli
        .arm_version
        .clone()
        .or_else(|| env::var(ARM_VERSION_VAR).ok())
    {
        key.arm_version = Some(arm_version);
    }

    key
}

fn setup_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if cli.quiet {
        "error"
    } else if cli.verbose == 0 {
        "info"
    } else if cli.verbose == 1 {
        "debug"
    } else {
        "trace"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .try_init()
        .map_err(|e| anyhow!("Could not initialise logging: {}", e))?;

    Ok(())
}
