use cloak_core::camera::NokhwaCamera;
use cloak_core::display::WindowDisplay;
use cloak_core::prompt::ask_color;
use cloak_core::session::{run_session, SessionSettings};
use cloak_core::Config;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = Config::load_default();
    let log_level = match &config {
        Ok(cfg) => cfg.system.log_level.clone(),
        Err(_) => "info".to_string(),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Invisibility cloak waking up...");

    let config = config.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Could not load configuration file, using defaults");
        Config::default()
    });

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> anyhow::Result<()> {
    let settings = SessionSettings::from_config(&config);
    let display = WindowDisplay::new(config.display.clone());
    let report = run_session(
        || NokhwaCamera::open(&config.camera),
        || {
            let stdin = std::io::stdin();
            let (color, profile) = ask_color(&mut stdin.lock(), &mut std::io::stdout())?;
            tracing::info!("Hold something {color} in front of the camera");
            Ok(profile)
        },
        display,
        settings,
    )?;

    tracing::info!(
        frames = report.frames_shown,
        read_failures = report.read_failures,
        skipped = report.skipped_frames,
        "session finished"
    );
    Ok(())
}
