use serde_json::{json, Value};

use crate::error::{CoreError, CoreResult};
use crate::model::language::LANGUAGES;
use crate::model::route::Route;
use crate::session::Session;

mod command;
mod generator;
mod translator;

use command::Command;
pub use translator::finished_event;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

fn view_for(session: &Session, route: Route) -> Value {
    match route {
        Route::Translator => translator::snapshot(session),
        Route::Generator => generator::snapshot(session),
    }
}

fn navigate(session: &mut Session, payload: &Value) -> CoreResult<Value> {
    let path = payload
        .get("path")
        .and_then(|v| v.as_str())
        .ok_or_else(|| CoreError::InvalidParameter("payload.path must be a string".into()))?;
    let route = session.navigate(path)?;
    Ok(json!({
        "route": route,
        "path": route.path(),
        "view": view_for(session, route),
    }))
}

fn dispatch(cmd: Command, session: &mut Session, payload: &Value) -> CoreResult<Value> {
    if let Some(result) = generator::handle(cmd, session, payload) {
        return result;
    }
    if let Some(result) = translator::handle(cmd, session, payload) {
        return result;
    }

    match cmd {
        Command::Ping => Ok(json!({ "message": "texttools-core alive" })),
        Command::Navigate => navigate(session, payload),
        Command::RouteCurrent => Ok(json!({
            "route": session.route,
            "path": session.route.path(),
        })),
        Command::LanguagesList => Ok(json!({ "languages": LANGUAGES })),
        other => Err(CoreError::InvalidParameter(format!("unhandled command {other:?}"))),
    }
}

/// Response for a line that could not be parsed at all.
pub fn invalid_json() -> String {
    json!({
        "status": "error",
        "message": "invalid json"
    })
    .to_string()
}

pub fn handle(session: &mut Session, input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => return invalid_json(),
    };

    let id = get_id(&req);
    let cmd_str = get_cmd(&req);
    let payload = get_payload(&req);

    let cmd = Command::from(cmd_str);
    if cmd == Command::Unknown {
        return err(id, "unknown command");
    }

    tracing::debug!(cmd = cmd_str, "handling command");

    match dispatch(cmd, session, payload) {
        Ok(v) => ok(id, v),
        Err(e) => err(id, e.to_string()),
    }
}
