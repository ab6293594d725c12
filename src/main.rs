//! Command-line entry point.
//!
//! Runs one discovery cycle around a fixed position and prints the nearby
//! restaurants.
//!
//! ```text
//! foodiepal [CONFIG.toml | -] [RESTAURANT_ID]
//! ```
//!
//! Configuration comes from the TOML file when one is given, otherwise from
//! `FOODIEPAL_*` environment variables. When no user is stored and both
//! `FOODIEPAL_EMAIL` and `FOODIEPAL_PASSWORD` are set, the binary signs in
//! first. With a restaurant id, the binary also selects it and waits for the
//! camera and callout to settle before printing.
//!
//! # Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing
//! 2. **Session**: Restore or sign in the user
//! 3. **Discover**: Exit with status 2 when nobody is signed in, otherwise
//!    `Activate` and run until the cycle is terminal
//! 4. **Select**: Optionally select a restaurant and let timers fire
//! 5. **Print**: Notice and list to stdout

#![allow(clippy::multiple_crate_versions)]

use foodiepal::app::selection::{CAMERA_ANIMATION, SCROLL_RETRY_DELAY};
use foodiepal::auth::FirebaseIdentity;
use foodiepal::domain::DEFAULT_CENTER;
use foodiepal::location::FixedLocation;
use foodiepal::observability::init_tracing;
use foodiepal::places::PlacesClient;
use foodiepal::render::{TerminalList, TracingMap};
use foodiepal::{restore_session, AppState, Config, Event, Runtime};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Rows shown by the terminal list.
const LIST_ROWS: usize = 10;

/// Upper bound on one discovery cycle, fix and search included.
const CYCLE_DEADLINE: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match load_config(args.first().map(String::as_str)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("foodiepal: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);

    match run(&config, args.get(1).map(String::as_str)).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "foodiepal failed");
            eprintln!("foodiepal: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(arg: Option<&str>) -> foodiepal::Result<Config> {
    match arg {
        Some(path) if path != "-" => Config::from_file(Path::new(path)),
        _ => Ok(Config::from_env()),
    }
}

async fn run(config: &Config, select_id: Option<&str>) -> foodiepal::Result<ExitCode> {
    let mut session = restore_session(config)?;

    if !session.is_signed_in() {
        if let (Ok(email), Ok(password)) = (
            std::env::var("FOODIEPAL_EMAIL"),
            std::env::var("FOODIEPAL_PASSWORD"),
        ) {
            let identity = FirebaseIdentity::from_config(config)?;
            session.sign_in(&identity, &email, &password).await?;
        }
    }

    let state = AppState::new(session.current_user().cloned());
    let center = match (config.latitude, config.longitude) {
        (Some(latitude), Some(longitude)) => (latitude, longitude),
        _ => {
            tracing::info!("no position configured, using default center");
            (DEFAULT_CENTER.latitude, DEFAULT_CENTER.longitude)
        }
    };
    let location = Arc::new(FixedLocation::at(center.0, center.1));

    if state.user.is_none() {
        tracing::info!("no signed-in user, not searching");
        eprintln!("foodiepal: sign in required (set FOODIEPAL_EMAIL and FOODIEPAL_PASSWORD)");
        return Ok(ExitCode::from(2));
    }

    let places = Arc::new(PlacesClient::from_config(config)?);
    tracing::info!(provider = places.provider(), "places client ready");

    let mut runtime = Runtime::new(
        state,
        location,
        places,
        TracingMap::new(),
        TerminalList::new(LIST_ROWS),
    );

    runtime.dispatch(Event::Activate);
    let settled = tokio::time::timeout(
        CYCLE_DEADLINE,
        runtime.run_until(|s| s.discovery.phase().is_terminal()),
    )
    .await;
    if settled.is_err() {
        tracing::warn!("discovery did not finish in time");
    }
    let view = runtime.viewmodel();

    if let Some(id) = select_id {
        runtime.dispatch(Event::SelectRestaurant { id: id.to_string() });

        let shutdown = CancellationToken::new();
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(CAMERA_ANIMATION + SCROLL_RETRY_DELAY * 2).await;
            trigger.cancel();
        });
        runtime.run(shutdown).await;
    }

    if let Some(notice) = &view.notice {
        println!("{}\n{}\n", notice.message, notice.subtitle);
    }
    runtime.list().render(&mut std::io::stdout())?;
    if let Some(id) = runtime.map().open_callout() {
        println!("\ncallout: {id}");
    }

    Ok(ExitCode::SUCCESS)
}
