use anyhow::Context;
use clap::{Parser, Subcommand};
use pager::{IncidentKey, Pager, PagerConfig, TriggerEvent};

#[derive(Parser)]
struct Args {
    /// Integration key of the PagerDuty service. Falls back to PAGERDUTY_SERVICE_KEY
    #[arg(long)]
    service_key: Option<String>,

    #[arg(long)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Trigger {
        description: String,

        #[arg(long)]
        incident_key: Option<String>,

        /// Derive the incident key from the description
        #[arg(long, conflicts_with = "incident_key")]
        dedup: bool,

        /// Extra details, as name=value pairs
        #[arg(long = "detail")]
        details: Vec<String>,
    },
    Resolve {
        incident_key: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let service_key = match args.service_key {
        Some(key) => key,
        None => std::env::var("PAGERDUTY_SERVICE_KEY")
            .context("Neither --service-key nor PAGERDUTY_SERVICE_KEY specified")?,
    };
    let config = match args.endpoint {
        Some(endpoint) => PagerConfig::builder()
            .service_key(service_key)
            .endpoint(endpoint)
            .build(),
        None => PagerConfig::builder().service_key(service_key).build(),
    };
    let pager = Pager::with_config(config);

    match args.command {
        Command::Trigger {
            description,
            incident_key,
            dedup,
            details,
        } => {
            let mut event = TriggerEvent::new(&description);
            if dedup {
                event = event.incident_key(IncidentKey::digest(&description));
            } else if let Some(key) = incident_key {
                event = event.incident_key(key);
            }
            for detail in details {
                let (name, value) = detail
                    .split_once('=')
                    .with_context(|| format!("Detail {detail:?} is not a name=value pair"))?;
                event = event.detail(name, value);
            }

            let key = pager.send_trigger(&event).context("Triggering incident")?;
            println!("{key}");
        }
        Command::Resolve { incident_key } => {
            let response = pager
                .resolve(incident_key)
                .context("Resolving incident")?;
            println!("{}", response.status().unwrap_or("<no status>"));
        }
    }

    Ok(())
}
