use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use wheelboard::cli::{
    handle_build, handle_inspect, handle_open, handle_seal, handle_summary, handle_sync,
    handle_verify, BuildArgs, OpenArgs, SealArgs, SyncArgs,
};
use wheelboard::config::{paths::WheelboardPaths, settings::Settings};
use wheelboard::logging::init_logging;

#[derive(Parser)]
#[command(
    name = "wheelboard",
    version,
    about = "Password-protected static options dashboard builder",
    long_about = "Wheelboard encrypts options-trading portfolio data into a single \
                  static HTML page. The page asks for a password and decrypts the \
                  data in the browser, so it can be hosted anywhere."
)]
struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, global = true, env = "WHEELBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Environment variable holding the password
    #[arg(long, global = true)]
    password_env: Option<String>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt the portfolio data into the dashboard page
    Build(BuildArgs),

    /// Encrypt the portfolio data into a bare envelope file
    Seal(SealArgs),

    /// Decrypt a built page or envelope file
    #[command(alias = "decrypt")]
    Open(OpenArgs),

    /// Check a password against a built page or envelope file
    Verify {
        /// Built page or envelope JSON file
        artifact: PathBuf,
    },

    /// Show envelope field sizes without decrypting
    Inspect {
        /// Built page or envelope JSON file
        artifact: PathBuf,
    },

    /// Summarize the plaintext portfolio data
    Summary {
        /// Portfolio data file (defaults to the configured data file)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Extract portfolio data from a legacy build script
    Sync(SyncArgs),

    /// Write default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = WheelboardPaths::new()?;
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load_or_create(&paths)?,
    };
    if let Some(env_var) = cli.password_env {
        settings.password_env = env_var;
    }

    init_logging(&settings.log_level, cli.verbose)?;

    match cli.command {
        Some(Commands::Build(args)) => handle_build(&settings, args)?,
        Some(Commands::Seal(args)) => handle_seal(&settings, args)?,
        Some(Commands::Open(args)) => handle_open(&settings, args)?,
        Some(Commands::Verify { artifact }) => handle_verify(&settings, &artifact)?,
        Some(Commands::Inspect { artifact }) => handle_inspect(&artifact)?,
        Some(Commands::Summary { data }) => {
            handle_summary(data.as_ref().unwrap_or(&settings.data_file))?
        }
        Some(Commands::Sync(args)) => handle_sync(&settings, args)?,
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!(
                    "Already initialized: {}",
                    paths.settings_file().display()
                );
            } else {
                settings.save(&paths)?;
                println!("Settings written to {}", paths.settings_file().display());
                println!();
                println!("Put your portfolio data in {}", settings.data_file.display());
                println!("and run 'wheelboard build'.");
            }
        }
        Some(Commands::Config) => {
            println!("Wheelboard Configuration");
            println!("========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Data file:      {}", settings.data_file.display());
            match &settings.template_file {
                Some(template) => println!("  Template:       {}", template.display()),
                None => println!("  Template:       (bundled)"),
            }
            println!("  Output file:    {}", settings.output_file.display());
            println!("  Password env:   {}", settings.password_env);
            println!("  Log level:      {}", settings.log_level);
        }
        None => {
            println!("Wheelboard - password-protected options dashboard");
            println!();
            println!("Run 'wheelboard --help' for usage information.");
            println!("Run 'wheelboard build' to build the dashboard page.");
        }
    }

    Ok(())
}
