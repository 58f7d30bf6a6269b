use serde_json::{json, Value};

use crate::error::{CoreError, CoreResult};
use crate::session::Session;
use crate::state::generator::GeneratorAction;

use super::command::Command;

pub fn snapshot(session: &Session) -> Value {
    json!(session.generator.view())
}

fn require_bool(payload: &Value, key: &str) -> CoreResult<bool> {
    payload
        .get(key)
        .and_then(|v| v.as_bool())
        .ok_or_else(|| CoreError::InvalidParameter(format!("payload.{key} must be a boolean")))
}

fn require_length(payload: &Value) -> CoreResult<i64> {
    let v = payload
        .get("length")
        .ok_or_else(|| CoreError::InvalidParameter("payload.length is required".into()))?;

    if let Some(n) = v.as_i64() {
        return Ok(n);
    }
    // a huge unsigned value is still a positive integer; clamp handles it
    if v.as_u64().is_some() {
        return Ok(i64::MAX);
    }

    Err(CoreError::InvalidParameter(format!(
        "payload.length must be an integer, got {v}"
    )))
}

pub fn handle(cmd: Command, session: &mut Session, payload: &Value) -> Option<CoreResult<Value>> {
    let action = match cmd {
        Command::GeneratorGet => return Some(Ok(snapshot(session))),
        Command::GeneratorSetLength => require_length(payload).map(GeneratorAction::SetLength),
        Command::GeneratorSetIncludeNumbers => {
            require_bool(payload, "value").map(GeneratorAction::SetIncludeNumbers)
        }
        Command::GeneratorSetIncludeSymbols => {
            require_bool(payload, "value").map(GeneratorAction::SetIncludeSymbols)
        }
        Command::GeneratorRegenerate => Ok(GeneratorAction::Regenerate),
        _ => return None,
    };

    Some(
        action
            .and_then(|a| session.apply_generator(a))
            .map(|_| snapshot(session)),
    )
}
