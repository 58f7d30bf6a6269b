use serde::Serialize;

/// Platform work the core hands back to the shell: it has no speaker or clipboard of its own.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum PlatformEffect {
    Speak(String),
    Copy(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_kind_and_text() {
        let v = serde_json::to_value(PlatformEffect::Speak("hola".into())).unwrap();
        assert_eq!(v, json!({ "kind": "speak", "text": "hola" }));

        let v = serde_json::to_value(PlatformEffect::Copy("hola".into())).unwrap();
        assert_eq!(v, json!({ "kind": "copy", "text": "hola" }));
    }
}
