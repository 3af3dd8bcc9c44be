use clap::{Parser, Subcommand};
use phone_repairs::contact::{ContactFields, ContactSubmission};
use phone_repairs::types::EstimateResult;
use phone_repairs::{config, estimate, markup, output};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "phone-repairs")]
#[command(about = "Repair estimates and contact links for the phone repair site")]
#[command(long_about = "\
Repair estimates and contact links for the phone repair site

The same pricing table, validation and mail-link logic the page runs in the
browser, available from the command line for checking prices and config.

Devices:  iPhone, Samsung, Google Pixel, Other Android
Repairs:  Screen Replacement, Battery Replacement, Charging Port Repair,
          Water Damage Diagnostic, Camera / Mic / Speaker

Config is read from site.toml when present; every key is optional and
overrides the stock default. Run 'phone-repairs gen-config' to generate a
documented site.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site config file (stock defaults if missing)
    #[arg(long, default_value = "site.toml", global = true)]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up the price range for a device and repair
    Estimate {
        #[arg(long)]
        device: String,
        #[arg(long)]
        issue: String,
        /// Print the result as JSON
        #[arg(long, conflicts_with = "html")]
        json: bool,
        /// Print the HTML fragment the page shows
        #[arg(long)]
        html: bool,
    },
    /// Print the full pricing table with averages
    Prices,
    /// Validate a contact request and print its mailto link
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long)]
        device: String,
        #[arg(long)]
        issue: String,
        #[arg(long, default_value = "")]
        message: String,
    },
    /// Normalize and validate a phone number
    Phone { input: String },
    /// Load and validate the config
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Estimate {
            device,
            issue,
            json,
            html,
        } => {
            let site = config::load_config(&cli.config)?;
            let result = estimate::resolve_selection(&site.pricing, &device, &issue)?;
            let (device, issue) = (device.trim(), issue.trim());
            if json {
                let report = output::EstimateReport::new(device, issue, &result);
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if html {
                let fragment = match result {
                    EstimateResult::Priced(range) => {
                        markup::estimate(range, device, issue)
                    }
                    EstimateResult::CustomQuote => markup::custom_quote(
                        &site.business.phone,
                        &site.business.display_phone(),
                    ),
                };
                println!("{}", fragment.into_string());
            } else {
                output::print_estimate(device, issue, &result, &site.business.display_phone());
            }
        }
        Command::Prices => {
            let site = config::load_config(&cli.config)?;
            output::print_price_table(&site.pricing);
        }
        Command::Contact {
            name,
            phone,
            email,
            device,
            issue,
            message,
        } => {
            let site = config::load_config(&cli.config)?;
            let fields = ContactFields {
                name,
                phone,
                email,
                device,
                issue,
                message,
            };
            let submission = ContactSubmission::validate(&fields)?;
            let submitted_at = chrono::Local::now()
                .format("%-m/%-d/%Y, %-I:%M:%S %p")
                .to_string();
            println!("{}", submission.mailto(&site.business.email, &submitted_at));
        }
        Command::Phone { input } => {
            output::print_phone_check(&input);
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let site = config::load_config(&cli.config)?;
            let source = cli.config.exists().then_some(cli.config.as_path());
            output::print_config_summary(&site, source);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
