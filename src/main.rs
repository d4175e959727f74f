// Agenda - headless recommendation runner
// Usage: agenda <uid> [--dismiss]

use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::{error, info};

use agenda::alerts::raise_risk_alert;
use agenda::config::{validate_config, AppConfig};
use agenda::utils::logging::{init_logging, log_error_with_context};
use agenda::{AppState, Database};

struct Args {
    uid: String,
    dismiss: bool,
}

fn parse_args() -> Result<Args> {
    let mut uid = None;
    let mut dismiss = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--dismiss" => dismiss = true,
            flag if flag.starts_with("--") => bail!("Unknown option {}", flag),
            value if uid.is_none() => uid = Some(value.to_string()),
            value => bail!("Unexpected argument {}", value),
        }
    }

    let uid = uid.context("Usage: agenda <uid> [--dismiss]")?;
    Ok(Args { uid, dismiss })
}

async fn run(args: Args) -> Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let catalog = config.load_catalog().context("Failed to load recommendation catalog")?;
    validate_config(&config, &catalog).context("Invalid configuration")?;

    let db = Database::connect(&config.database_url).await?;
    let state = AppState::new(db, config, catalog);

    let user = state.session_user(&args.uid).await?;
    info!("Session for {} (cluster {:?})", args.uid, user.cluster);

    if let Err(e) = raise_risk_alert(state.db.as_ref(), &args.uid, user.risk_score, state.config.risk_threshold).await {
        error!("Risk check failed for {}: {}", args.uid, e.to_safe_string());
    }

    let orchestrator = state.orchestrator();
    let Some(active) = orchestrator.load_active_recommendation(&user).await else {
        println!("No recommendation.");
        return Ok(());
    };

    println!("{}", active.text);
    if let Some(action) = &active.action {
        let draft = action.to_draft_event(Utc::now());
        println!(
            "  Suggested: {} ({} - {})",
            draft.title,
            draft.start.format("%H:%M"),
            draft.end.format("%H:%M")
        );
    }

    if args.dismiss {
        if let Some(persist) = orchestrator.dismiss(&user, Some(&active)) {
            persist.await.context("Dismissal task panicked")?;
        }
        println!("Dismissed.");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let args = parse_args()?;
    if let Err(e) = run(args).await {
        log_error_with_context(&e, "agenda");
        return Err(e);
    }
    Ok(())
}
