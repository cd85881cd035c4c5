use anyhow::{Context, Result};
use clap::Parser;
use smart_transit::command::{Command, HELP};
use smart_transit::config::Config;
use smart_transit::{AppController, SampleData, SessionState, SpeechAnnouncer};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Logs go to stderr so the rendered screen on stdout stays readable.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // 1. Reference data
    let data = match &config.sample_data {
        Some(path) => SampleData::from_json_file(path)
            .with_context(|| format!("loading sample data from {}", path.display()))?,
        None => SampleData::builtin(),
    };

    // 2. Controller and announcer
    let session = SessionState::default()
        .with_voice(config.voice)
        .with_language(config.language);
    let mut app = AppController::new(session, Arc::new(data));
    app.subscribe(Arc::new(SpeechAnnouncer::new(config.speech_backend())));
    tracing::info!(speech = ?config.speech, language = %config.language, "SmartTransit ready");

    println!("{}\n", HELP);
    println!("{}", app.frame());

    // 3. Event loop: one command per line, plus a redraw when the SOS overlay lifts.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut redraw = tokio::time::interval(Duration::from_millis(250));
    let mut shown_emergency = app.session().emergency_active;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(cmd) => match cmd.apply(&mut app) {
                        Ok(Some(note)) => println!("{}", note),
                        Ok(None) => {}
                        Err(e) => eprintln!("error: {}", e),
                    },
                    Err(e) => {
                        eprintln!("error: {}", e);
                        continue;
                    }
                }
                shown_emergency = app.session().emergency_active;
                println!("{}", app.frame());
            }
            _ = redraw.tick() => {
                let active = app.session().emergency_active;
                if active != shown_emergency {
                    shown_emergency = active;
                    println!("{}", app.frame());
                }
            }
        }
    }

    tracing::info!("Session ended");
    Ok(())
}
