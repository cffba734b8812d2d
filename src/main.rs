use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use phishguard::{
    ClientConfig, DashboardAnalytics, DetectionClient, DetectionResult, LoadStatus, ParsedEmail,
    RecentDetection, load_from_path,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(author, version, about = "Parse emails and check them against the PhishGuard service")]
struct Cli {
    /// Base URL of the detection API (overrides PHISHGUARD_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print raw JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an email file and print the extracted fields
    Parse { file: PathBuf },

    /// Check an email for phishing
    Email {
        /// `.eml` or text file to load the fields from
        file: Option<PathBuf>,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        body: Option<String>,
    },

    /// Check a URL
    Url { url: String },

    /// Show dashboard analytics
    Analytics,

    /// Show recent detections
    Recent {
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Check that the detection service is up
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> phishguard::Result<()> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url)?;
    }

    match cli.command {
        Command::Parse { file } => {
            let loaded = load_from_path(&file).await?;
            if loaded.status == LoadStatus::Unparsed {
                eprintln!("Warning: {}", loaded.notice().message);
            }
            print_email(&loaded.email, cli.json)?;
        }
        Command::Email {
            file,
            from,
            subject,
            body,
        } => {
            let mut email = match file {
                Some(path) => {
                    let loaded = load_from_path(&path).await?;
                    if loaded.status == LoadStatus::Unparsed {
                        eprintln!("Warning: {}", loaded.notice().message);
                    }
                    loaded.email
                }
                None => ParsedEmail::default(),
            };
            if let Some(from) = from {
                email.from = from;
            }
            if let Some(subject) = subject {
                email.subject = subject;
            }
            if let Some(body) = body {
                email.body = body;
            }
            if email.body.is_empty() {
                return Err(phishguard::Error::MissingInput(
                    "an email body is required (pass a file or --body)".into(),
                ));
            }

            let client = DetectionClient::new(config)?;
            let result = client.try_detect_email(&email).await?;
            print_verdict(&result, cli.json)?;
        }
        Command::Url { url } => {
            let client = DetectionClient::new(config)?;
            let result = client.try_detect_url(&url).await?;
            print_verdict(&result, cli.json)?;
        }
        Command::Analytics => {
            let client = DetectionClient::new(config)?;
            let analytics = client.dashboard_analytics().await?;
            print_analytics(&analytics, cli.json)?;
        }
        Command::Recent { limit } => {
            let limit = limit.unwrap_or(config.recent_limit);
            let client = DetectionClient::new(config)?;
            let recent = client.recent_activity(limit).await?;
            print_recent(&recent, cli.json)?;
        }
        Command::Health => {
            let client = DetectionClient::new(config)?;
            let health = client.health().await?;
            if cli.json {
                print_json(&health)?;
            } else {
                println!(
                    "{} ({})",
                    health.status,
                    health.service.as_deref().unwrap_or("unknown service")
                );
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> phishguard::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_email(email: &ParsedEmail, json: bool) -> phishguard::Result<()> {
    if json {
        return print_json(email);
    }
    println!("From:    {}", email.from);
    println!("Subject: {}", email.subject);
    println!();
    println!("{}", email.body);
    Ok(())
}

fn print_verdict(result: &DetectionResult, json: bool) -> phishguard::Result<()> {
    if json {
        return print_json(result);
    }
    println!("{} ({}% confidence): {}", result.status, result.confidence, result.label);
    println!("{}", result.message);
    for indicator in &result.indicators {
        println!("  - {indicator}");
    }
    Ok(())
}

fn print_analytics(analytics: &DashboardAnalytics, json: bool) -> phishguard::Result<()> {
    if json {
        return print_json(analytics);
    }
    let totals = &analytics.totals;
    println!("Total scans:      {}", totals.total_detections);
    println!(
        "Threats detected: {} (+{} today)",
        analytics.threats_detected(),
        analytics.threats_today()
    );
    println!("Avg confidence:   {:.0}%", totals.avg_confidence);
    println!("Scans today:      {}", analytics.today.total_scans);
    println!(
        "Safe / suspicious / phishing: {} / {} / {}",
        totals.total_safe, totals.total_suspicious, totals.total_phishing
    );
    Ok(())
}

fn print_recent(recent: &[RecentDetection], json: bool) -> phishguard::Result<()> {
    if json {
        return print_json(&recent);
    }
    if recent.is_empty() {
        println!("No recent activity");
    }
    for row in recent {
        let when = row
            .created_at
            .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());
        println!(
            "{when}  {:<10} {:>3}%  {:?}  {}",
            row.status.as_str(),
            row.confidence,
            row.detection_type,
            row.display_text.as_deref().unwrap_or("")
        );
    }
    Ok(())
}
