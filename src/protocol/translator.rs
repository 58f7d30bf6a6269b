use serde_json::{json, Value};

use crate::error::{CoreError, CoreResult};
use crate::services::effects::PlatformEffect;
use crate::session::Session;
use crate::state::translator::TranslatorAction;

use super::command::Command;

pub fn snapshot(session: &Session) -> Value {
    json!(session.translator.view())
}

fn require_str<'a>(payload: &'a Value, key: &str) -> CoreResult<&'a str> {
    payload
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| CoreError::InvalidParameter(format!("payload.{key} must be a string")))
}

fn effect_payload(effect: Option<PlatformEffect>) -> Value {
    let effects: Vec<PlatformEffect> = effect.into_iter().collect();
    json!({ "effects": effects })
}

pub fn handle(cmd: Command, session: &mut Session, payload: &Value) -> Option<CoreResult<Value>> {
    let result = match cmd {
        Command::TranslatorGet => Ok(snapshot(session)),

        Command::TranslatorHistory => Ok(json!({ "history": session.translator.history })),

        Command::TranslatorSetInput => require_str(payload, "text")
            .and_then(|t| session.apply_translator(TranslatorAction::SetInput(t.to_string())))
            .map(|_| snapshot(session)),

        Command::TranslatorSetTarget => require_str(payload, "code")
            .and_then(|c| session.apply_translator(TranslatorAction::SetTarget(c.to_string())))
            .map(|_| snapshot(session)),

        Command::TranslatorSubmit => session.submit_translation().map(|_| snapshot(session)),

        Command::TranslatorCancel => session
            .apply_translator(TranslatorAction::Cancel)
            .map(|_| snapshot(session)),

        Command::TranslatorClear => session
            .apply_translator(TranslatorAction::Clear)
            .map(|_| snapshot(session)),

        Command::TranslatorSpeak => session
            .apply_translator(TranslatorAction::Speak)
            .map(effect_payload),

        Command::TranslatorCopy => session
            .apply_translator(TranslatorAction::Copy)
            .map(effect_payload),

        _ => return None,
    };

    Some(result)
}

/// Feeds a worker result through the state machine and renders the event line, if any.
pub fn finished_event(session: &mut Session, ticket: u64, outcome: CoreResult<String>) -> Option<String> {
    let current = session.translator.in_flight_ticket();
    if current != Some(ticket) {
        tracing::debug!(ticket, ?current, "dropping result for a request no longer in flight");
        return None;
    }

    if let Err(e) = session.apply_translator(TranslatorAction::Finish { ticket, outcome }) {
        tracing::error!(error = %e, "failed to apply translation result");
        return None;
    }

    Some(
        json!({
            "event": "translation.finished",
            "payload": snapshot(session),
        })
        .to_string(),
    )
}
