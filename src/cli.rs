use clap::Parser;
use std::path::PathBuf;

fn get_version() -> &'static str {
    const BASE_VERSION: &str = env!("CARGO_PKG_VERSION");

    // Release builds are tagged, so the tag alone identifies them
    if let Some(tag) = option_env!("MONOSPACE_INSTALLER_GIT_TAG") {
        return tag;
    }

    let commit = option_env!("MONOSPACE_INSTALLER_GIT_COMMIT").unwrap_or("unknown");
    let version = format!("v{}-{}", BASE_VERSION, commit);
    Box::leak(version.into_boxed_str())
}

#[derive(Debug, Parser)]
#[command(name = "monospace-installer")]
#[command(about = "Download and install the prebuilt monospace binary for this platform")]
#[command(version = get_version())]
pub struct Cli {
    /// Increase verbosity (use multiple times for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Reduce output to errors only
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory the binary is written to [default: ./bin]
    #[arg(long, value_name = "DIR")]
    pub install_dir: Option<PathBuf>,

    /// Release version to fetch instead of the one in package.json
    #[arg(long, value_name = "VERSION")]
    pub release_version: Option<String>,

    /// Base URL releases are downloaded from
    #[arg(long, value_name = "URL")]
    pub release_base_url: Option<String>,

    /// Package metadata file holding the release version [default: ./package.json]
    #[arg(long, value_name = "PATH")]
    pub package_json: Option<PathBuf>,

    /// Operating system identifier (e.g. 'linux', 'darwin', 'win32'), defaults to the host
    #[arg(long)]
    pub os: Option<String>,

    /// CPU architecture identifier (e.g. 'x64', 'arm64', 'ia32', 'arm'), defaults to the host
    #[arg(long)]
    pub arch: Option<String>,

    /// ARM sub-version used for 32-bit ARM (e.g. '6', '7')
    #[arg(long)]
    pub arm_version: Option<String>,

    /// Install even when not launched by a package manager
    #[arg(long)]
    pub skip_invoker_check: bool,

    /// Print the resolved download URL and archive format, then exit
    #[arg(long)]
    pub print_target: bool,
}
