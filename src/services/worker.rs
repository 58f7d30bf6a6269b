use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use crate::error::{CoreError, CoreResult};
use crate::services::translator::Translate;

/// Shared flag telling a worker its result is no longer wanted.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Everything the main loop can be woken up by.
#[derive(Debug)]
pub enum Event {
    Line(String),
    /// A stdin line that was not valid UTF-8.
    UnreadableLine,
    InputClosed,
    Translated {
        ticket: u64,
        outcome: CoreResult<String>,
    },
}

pub struct TranslationJob {
    pub ticket: u64,
    pub text: String,
    pub target_code: String,
    pub token: CancelToken,
}

/// Runs a blocking translation on its own thread and reports back through `tx`.
pub fn spawn_translation(translator: Arc<dyn Translate>, job: TranslationJob, tx: Sender<Event>) {
    thread::spawn(move || {
        tracing::info!(ticket = job.ticket, to = %job.target_code, "translation started");

        // a panicking provider must still report, otherwise the translator stays loading
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            translator.translate(&job.text, &job.target_code)
        }))
        .unwrap_or_else(|_| {
            tracing::error!(ticket = job.ticket, "translation worker panicked");
            Err(CoreError::InvalidResponse("translation worker panicked".into()))
        });

        if job.token.is_cancelled() {
            tracing::debug!(ticket = job.ticket, "translation cancelled, dropping result");
            return;
        }

        // receiver gone means the core is shutting down
        let _ = tx.send(Event::Translated {
            ticket: job.ticket,
            outcome,
        });
    });
}
