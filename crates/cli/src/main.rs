use anyhow::Context;
use clap::{Parser, Subcommand};
use derma_core::analytics::{AnalyticsFilters, Dashboard};
use derma_core::constants::{AUTO_FILE_NO_ENV, FILE_NO_PREFIX_ENV, OUTPUT_FORMAT_ENV};
use derma_core::script::load_script;
use derma_core::search::PatientDirectory;
use derma_core::visibility::visible_details;
use derma_core::{FormStore, FormValue, IntakeConfig, PatientRecord};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "derma")]
#[command(about = "Dermatology patient intake form CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a blank patient record
    New,
    /// Replay an update script onto a fresh record and print it
    Apply {
        /// YAML or JSON file holding a list of updates
        script: PathBuf,
        /// Start from this JSON record instead of a fresh form
        #[arg(long)]
        record: Option<PathBuf>,
        /// Check the required fields and print the notification
        #[arg(long)]
        submit: bool,
        /// Print the detail fields currently shown instead of the record
        #[arg(long)]
        visible: bool,
    },
    /// Look up a patient by phone number
    Search {
        /// Phone number to search for
        phone: String,
    },
    /// Show the analytics dashboard
    Analytics {
        #[arg(long)]
        diagnosis: Option<String>,
        #[arg(long)]
        duration: Option<String>,
        #[arg(long)]
        age_range: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        occupation: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
}

fn load_config() -> anyhow::Result<IntakeConfig> {
    let config = IntakeConfig::from_env_values(
        std::env::var(FILE_NO_PREFIX_ENV).ok(),
        std::env::var(OUTPUT_FORMAT_ENV).ok(),
        std::env::var(AUTO_FILE_NO_ENV).ok(),
    )?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("derma=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config().context("invalid configuration")?;
    let format = config.output_format();

    match cli.command {
        Some(Commands::New) => {
            let store = FormStore::open(&config)?;
            println!("{}", format.render(store.record())?);
        }
        Some(Commands::Apply {
            script,
            record,
            submit,
            visible,
        }) => {
            let updates = load_script(&script)
                .with_context(|| format!("failed to load {}", script.display()))?;
            let mut store = match record {
                Some(path) => FormStore::with_record(
                    PatientRecord::load(&path)
                        .with_context(|| format!("failed to load {}", path.display()))?,
                ),
                None => FormStore::open(&config)?,
            };
            store.apply_all(&updates)?;

            if visible {
                let shown: BTreeMap<String, FormValue> = visible_details(store.record())
                    .into_iter()
                    .map(|(rule, value)| (format!("{}.{}", rule.section, rule.detail), value))
                    .collect();
                println!("{}", format.render(&shown)?);
            } else {
                println!("{}", format.render(store.record())?);
            }

            if submit {
                let outcome = store.submit();
                println!("{}", format.render(&outcome)?);
            }
        }
        Some(Commands::Search { phone }) => {
            let result = PatientDirectory::sample().search_by_phone(&phone);
            eprintln!("{}", result.notification);
            if let Some(patient) = &result.patient {
                println!("{}", format.render(patient)?);
            }
        }
        Some(Commands::Analytics {
            diagnosis,
            duration,
            age_range,
            gender,
            occupation,
            location,
        }) => {
            let selected = [
                ("diagnosis", diagnosis),
                ("duration", duration),
                ("ageRange", age_range),
                ("gender", gender),
                ("occupation", occupation),
                ("location", location),
            ];
            let mut filters = AnalyticsFilters::default();
            for (key, value) in selected {
                if let Some(value) = value {
                    filters = filters.with_filter(key, &value)?;
                }
            }

            let mut dashboard = Dashboard::sample();
            dashboard.apply(filters);
            println!("{}", format.render(&dashboard.key_statistics())?);
            println!("{}", format.render(&dashboard)?);
        }
        None => {
            println!("Use 'derma --help' for commands");
        }
    }

    Ok(())
}
