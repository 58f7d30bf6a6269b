#![windows_subsystem = "windows"]
use std::io::{self, BufRead, Write};
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;

mod config;
mod error;
mod logging;
mod model;
mod protocol;
mod services;
mod session;
mod state;

use config::CoreConfig;
use services::random::StdRandom;
use services::translator::RapidApiTranslator;
use services::worker::Event;
use session::Session;

fn spawn_stdin_reader(tx: Sender<Event>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let event = match line {
                Ok(l) => Event::Line(l),
                // the bad line is already consumed, keep reading after it
                Err(e) if e.kind() == io::ErrorKind::InvalidData => Event::UnreadableLine,
                Err(e) => {
                    tracing::error!(error = %e, "stdin read failed");
                    break;
                }
            };
            if tx.send(event).is_err() {
                return;
            }
        }
        let _ = tx.send(Event::InputClosed);
    });
}

fn handle_line(session: &mut Session, line: &str) -> String {
    let result = panic::catch_unwind(AssertUnwindSafe(|| protocol::handle(session, line)));

    match result {
        Ok(resp) => resp,
        Err(_) => serde_json::json!({
            "status": "error",
            "message": "internal core error"
        })
        .to_string(),
    }
}

fn main() -> ExitCode {
    logging::init();

    let cfg = match CoreConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let client = match RapidApiTranslator::new(&cfg) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    if cfg.api_key.is_empty() {
        tracing::warn!("no translation API key configured, translations will fail");
    }

    let (tx, rx) = mpsc::channel();
    spawn_stdin_reader(tx.clone());

    let rng = Box::new(StdRandom::from_seed_option(cfg.seed));
    let mut session = match Session::new(rng, Arc::new(client), tx) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to start session");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(endpoint = %cfg.endpoint, seeded = cfg.seed.is_some(), "texttools-core started");

    let mut stdout = io::stdout();
    let mut input_open = true;

    // the session keeps a sender alive, so recv only ends through the break below
    while let Ok(event) = rx.recv() {
        let response = match event {
            Event::Line(line) if line.trim().is_empty() => None,
            Event::Line(line) => Some(handle_line(&mut session, &line)),
            Event::UnreadableLine => Some(protocol::invalid_json()),
            Event::InputClosed => {
                input_open = false;
                None
            }
            Event::Translated { ticket, outcome } => {
                protocol::finished_event(&mut session, ticket, outcome)
            }
        };

        if let Some(response) = response {
            if writeln!(stdout, "{response}").is_err() {
                break;
            }
            let _ = stdout.flush();
        }

        // drain an in-flight translation before exiting on EOF
        if !input_open && !session.is_busy() {
            break;
        }
    }

    ExitCode::SUCCESS
}
