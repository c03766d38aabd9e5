use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wc_bundle::env::{self as bundle_env, logging, EnvVar};
use wc_bundle::{BundleConfig, BundleError, BundleTask};

#[derive(Parser)]
#[command(name = "wc-bundle")]
#[command(version)]
#[command(about = "Inline a web-component entry page and split its scripts into a sibling JS file")]
#[command(long_about = "\
Inline a web-component entry page and split its scripts into a sibling JS file

The entry document (adminViewElem.src) has every <link rel=\"import\"> and
<script src> it references inlined, then all inline scripts are moved into
<basename>.js. Both files are written to build.rootDirectory/adminViewElem.dest.

Configuration is read from --config, or the first existing of wc-bundle.toml,
wc-bundle.json and ~/.config/wc-bundle/config.toml. WC_BUNDLE_SRC,
WC_BUNDLE_ROOT_DIR and WC_BUNDLE_DEST override the file; flags override both.")]
struct Cli {
    /// Configuration file (TOML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Bundle the entry document
    Build(BuildArgs),
    /// Print the resolved configuration as TOML
    Config {
        /// Print an example configuration file instead
        #[arg(long)]
        example: bool,
        /// List the environment variables that are read
        #[arg(long, conflicts_with = "example")]
        env: bool,
    },
}

#[derive(clap::Args)]
struct BuildArgs {
    /// Entry HTML document
    #[arg(long)]
    src: Option<PathBuf>,

    /// Base output directory
    #[arg(long)]
    root_dir: Option<PathBuf>,

    /// Output subdirectory, relative to the root directory
    #[arg(long)]
    dest: Option<PathBuf>,

    /// Leave <script src> references as they are
    #[arg(long)]
    no_inline_scripts: bool,

    /// Inline <link rel="stylesheet"> as <style>
    #[arg(long)]
    inline_css: bool,

    /// Drop comments, keeping one copy of each @license comment
    #[arg(long)]
    strip_comments: bool,
}

impl BuildArgs {
    fn apply(&self, config: &mut BundleConfig) {
        if let Some(src) = &self.src {
            config.admin_view_elem.src = src.clone();
        }
        if let Some(root_dir) = &self.root_dir {
            config.build.root_directory = root_dir.clone();
        }
        if let Some(dest) = &self.dest {
            config.admin_view_elem.dest = dest.clone();
        }
        if self.no_inline_scripts {
            config.vulcanize.inline_scripts = false;
        }
        if self.inline_css {
            config.vulcanize.inline_css = true;
        }
        if self.strip_comments {
            config.vulcanize.strip_comments = true;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error_chain(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), BundleError> {
    match cli.command {
        Command::Build(args) => {
            let mut config = load_config(&cli.config)?;
            args.apply(&mut config);
            config.validate()?;

            let output = BundleTask::new(&config).build().await?;

            println!("{} ({} bytes)", output.html.path.display(), output.html.bytes);
            println!("{} ({} bytes)", output.js.path.display(), output.js.bytes);
            if let Some(css) = &output.css {
                println!("{} ({} bytes)", css.path.display(), css.bytes);
            }
        }
        Command::Config { example: true, .. } => {
            print!("{}", BundleConfig::example().to_toml()?);
        }
        Command::Config { env: true, .. } => {
            for (name, description) in bundle_env::describe_all() {
                println!("{name:<22}{description}");
            }
        }
        Command::Config { .. } => {
            print!("{}", load_config(&cli.config)?.to_toml()?);
        }
    }

    Ok(())
}

fn load_config(path: &Option<PathBuf>) -> Result<BundleConfig, BundleError> {
    match path {
        Some(path) => BundleConfig::load(path),
        None => BundleConfig::discover(),
    }
}

/// 日志输出到 stderr，stdout 只留给命令结果
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => logging::LogLevel::get().unwrap_or_else(|_| "info".to_string()),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("wc_bundle={level}")))
        .with_writer(std::io::stderr)
        .with_ansi(!logging::NoColor::get_or_default(false))
        .with_target(false)
        .init();
}

fn print_error_chain(err: &BundleError) {
    eprintln!("Error: {err}");

    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  Caused by: {cause}");
        source = cause.source();
    }
}
