use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::model::history::{History, TranslationRecord};
use crate::model::language::{self, DEFAULT_TARGET};
use crate::services::effects::PlatformEffect;
use crate::services::translator::{FALLBACK_MESSAGE, MAX_INPUT_CHARS};
use crate::services::worker::{CancelToken, TranslationJob};

#[derive(Debug)]
pub enum TranslatorAction {
    SetInput(String),
    SetTarget(String),
    Submit { ticket: u64 },
    Finish { ticket: u64, outcome: CoreResult<String> },
    Cancel,
    Clear,
    Speak,
    Copy,
}

/// What the caller must do after a transition.
pub enum TranslatorEffect {
    Request(TranslationJob),
    Platform(PlatformEffect),
}

#[derive(Debug, Clone)]
struct InFlight {
    ticket: u64,
    token: CancelToken,
    // captured at submit so later edits don't leak into the history record
    text: String,
    target_code: String,
}

#[derive(Debug, Clone)]
pub struct TranslatorState {
    pub input_text: String,
    pub char_count: usize,
    pub target_lang: String,
    pub translated_text: String,
    pub loading: bool,
    pub history: History,
    in_flight: Option<InFlight>,
}

impl Default for TranslatorState {
    fn default() -> Self {
        TranslatorState {
            input_text: String::new(),
            char_count: 0,
            target_lang: DEFAULT_TARGET.to_string(),
            translated_text: String::new(),
            loading: false,
            history: History::default(),
            in_flight: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TranslatorView<'a> {
    pub input_text: &'a str,
    pub char_count: usize,
    pub max_chars: usize,
    pub target_lang: &'a str,
    pub target_language_name: String,
    pub translated_text: &'a str,
    pub loading: bool,
    pub can_submit: bool,
    pub can_speak: bool,
    pub can_copy: bool,
    pub show_history: bool,
    pub history: &'a History,
}

impl TranslatorState {
    pub fn in_flight_ticket(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|f| f.ticket)
    }

    pub fn can_submit(&self) -> bool {
        !self.input_text.is_empty() && !self.loading
    }

    pub fn view(&self) -> TranslatorView<'_> {
        let has_output = !self.translated_text.is_empty();
        TranslatorView {
            input_text: &self.input_text,
            char_count: self.char_count,
            max_chars: MAX_INPUT_CHARS,
            target_lang: &self.target_lang,
            target_language_name: language::display_name(&self.target_lang),
            translated_text: &self.translated_text,
            loading: self.loading,
            can_submit: self.can_submit(),
            can_speak: has_output,
            can_copy: has_output,
            show_history: !self.history.is_empty(),
            history: &self.history,
        }
    }

    fn output_effect(&self, make: fn(String) -> PlatformEffect) -> CoreResult<TranslatorEffect> {
        if self.translated_text.is_empty() {
            return Err(CoreError::InvalidParameter("there is no translated text yet".into()));
        }
        Ok(TranslatorEffect::Platform(make(self.translated_text.clone())))
    }
}

fn truncate_chars(text: String, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text,
    }
}

pub fn reduce(
    state: &TranslatorState,
    action: TranslatorAction,
) -> CoreResult<(TranslatorState, Option<TranslatorEffect>)> {
    let mut next = state.clone();

    let effect = match action {
        TranslatorAction::SetInput(text) => {
            next.input_text = truncate_chars(text, MAX_INPUT_CHARS);
            next.char_count = next.input_text.chars().count();
            None
        }

        TranslatorAction::SetTarget(code) => {
            if language::find(&code).is_none() {
                return Err(CoreError::UnknownLanguage(code));
            }
            next.target_lang = code;
            None
        }

        TranslatorAction::Submit { ticket } => {
            if next.loading {
                return Err(CoreError::Busy);
            }
            if next.input_text.is_empty() {
                return Ok((next, None));
            }

            let token = CancelToken::default();
            next.loading = true;
            next.in_flight = Some(InFlight {
                ticket,
                token: token.clone(),
                text: next.input_text.clone(),
                target_code: next.target_lang.clone(),
            });

            Some(TranslatorEffect::Request(TranslationJob {
                ticket,
                text: next.input_text.clone(),
                target_code: next.target_lang.clone(),
                token,
            }))
        }

        TranslatorAction::Finish { ticket, outcome } => {
            let flight = match next.in_flight.take() {
                Some(f) if f.ticket == ticket => f,
                other => {
                    tracing::debug!(ticket, "stale translation result ignored");
                    next.in_flight = other;
                    return Ok((next, None));
                }
            };

            next.loading = false;

            match outcome {
                Ok(translation) => {
                    next.history.push(TranslationRecord {
                        input_text: flight.text,
                        output_text: translation.clone(),
                        target_language_name: language::display_name(&flight.target_code),
                    });
                    tracing::info!(ticket, history = next.history.len(), "translation finished");
                    next.translated_text = translation;
                }
                Err(e) => {
                    tracing::warn!(ticket, error = %e, "translation failed");
                    next.translated_text = FALLBACK_MESSAGE.to_string();
                }
            }
            None
        }

        TranslatorAction::Cancel => {
            if let Some(flight) = next.in_flight.take() {
                flight.token.cancel();
                tracing::debug!(ticket = flight.ticket, "translation cancelled");
            }
            next.loading = false;
            None
        }

        TranslatorAction::Clear => {
            next.input_text.clear();
            next.translated_text.clear();
            next.char_count = 0;
            None
        }

        TranslatorAction::Speak => Some(next.output_effect(PlatformEffect::Speak)?),
        TranslatorAction::Copy => Some(next.output_effect(PlatformEffect::Copy)?),
    };

    Ok((next, effect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::history::HISTORY_CAP;

    fn apply(state: TranslatorState, action: TranslatorAction) -> TranslatorState {
        reduce(&state, action).unwrap().0
    }

    fn submit(state: TranslatorState, ticket: u64) -> (TranslatorState, TranslationJob) {
        match reduce(&state, TranslatorAction::Submit { ticket }).unwrap() {
            (s, Some(TranslatorEffect::Request(job))) => (s, job),
            _ => panic!("submit did not produce a request"),
        }
    }

    fn translate_once(state: TranslatorState, ticket: u64, input: &str, out: &str) -> TranslatorState {
        let s = apply(state, TranslatorAction::SetInput(input.to_string()));
        let (s, _) = submit(s, ticket);
        apply(
            s,
            TranslatorAction::Finish {
                ticket,
                outcome: Ok(out.to_string()),
            },
        )
    }

    #[test]
    fn successful_translation_updates_output_and_history() {
        let s = translate_once(TranslatorState::default(), 1, "hello", "hola");

        assert_eq!(s.translated_text, "hola");
        assert!(!s.loading);
        assert_eq!(s.history.len(), 1);
        let rec = s.history.iter().next().unwrap();
        assert_eq!(rec.input_text, "hello");
        assert_eq!(rec.output_text, "hola");
        assert_eq!(rec.target_language_name, "Spanish");
        assert_eq!(serde_json::to_value(s.view()).unwrap()["show_history"], true);
    }

    #[test]
    fn six_translations_keep_five_most_recent_first() {
        let mut s = TranslatorState::default();
        for i in 1..=6u64 {
            s = translate_once(s, i, &format!("text {i}"), &format!("texto {i}"));
        }

        assert_eq!(s.history.len(), HISTORY_CAP);
        let inputs: Vec<&str> = s.history.iter().map(|r| r.input_text.as_str()).collect();
        assert_eq!(inputs, vec!["text 6", "text 5", "text 4", "text 3", "text 2"]);
    }

    #[test]
    fn failure_shows_fallback_and_skips_history() {
        let s = apply(TranslatorState::default(), TranslatorAction::SetInput("hello".into()));
        let (s, _) = submit(s, 1);
        let s = apply(
            s,
            TranslatorAction::Finish {
                ticket: 1,
                outcome: Err(CoreError::InvalidResponse("missing translation field".into())),
            },
        );

        assert_eq!(s.translated_text, FALLBACK_MESSAGE);
        assert!(s.history.is_empty());
        assert!(!s.loading);
    }

    #[test]
    fn clear_resets_input_output_and_count() {
        let s = translate_once(TranslatorState::default(), 1, "hello", "hola");
        let s = apply(s, TranslatorAction::Clear);

        assert_eq!(s.input_text, "");
        assert_eq!(s.translated_text, "");
        assert_eq!(s.char_count, 0);
        assert_eq!(s.history.len(), 1);
    }

    #[test]
    fn input_is_capped_at_max_chars() {
        let s = apply(
            TranslatorState::default(),
            TranslatorAction::SetInput("ñ".repeat(MAX_INPUT_CHARS + 20)),
        );
        assert_eq!(s.char_count, MAX_INPUT_CHARS);
        assert_eq!(s.input_text.chars().count(), MAX_INPUT_CHARS);
    }

    #[test]
    fn empty_submit_is_a_no_op() {
        let (s, effect) = reduce(&TranslatorState::default(), TranslatorAction::Submit { ticket: 1 }).unwrap();
        assert!(effect.is_none());
        assert!(!s.loading);
        assert_eq!(s.in_flight_ticket(), None);
    }

    #[test]
    fn second_submit_while_loading_is_busy() {
        let s = apply(TranslatorState::default(), TranslatorAction::SetInput("hello".into()));
        let (s, _) = submit(s, 1);
        assert!(!s.can_submit());

        let err = reduce(&s, TranslatorAction::Submit { ticket: 2 }).err().unwrap();
        assert!(matches!(err, CoreError::Busy));
    }

    #[test]
    fn stale_result_is_ignored() {
        let s = apply(TranslatorState::default(), TranslatorAction::SetInput("hello".into()));
        let (s, _) = submit(s, 7);
        let s = apply(
            s,
            TranslatorAction::Finish {
                ticket: 6,
                outcome: Ok("old".into()),
            },
        );

        assert!(s.loading);
        assert_eq!(s.in_flight_ticket(), Some(7));
        assert_eq!(s.translated_text, "");
    }

    #[test]
    fn cancel_triggers_token_and_drops_late_result() {
        let s = apply(TranslatorState::default(), TranslatorAction::SetInput("hello".into()));
        let (s, job) = submit(s, 1);
        let s = apply(s, TranslatorAction::Cancel);

        assert!(job.token.is_cancelled());
        assert!(!s.loading);

        let s = apply(
            s,
            TranslatorAction::Finish {
                ticket: 1,
                outcome: Ok("late".into()),
            },
        );
        assert_eq!(s.translated_text, "");
        assert!(s.history.is_empty());
    }

    #[test]
    fn history_uses_text_and_language_captured_at_submit() {
        let s = apply(TranslatorState::default(), TranslatorAction::SetInput("hello".into()));
        let (s, job) = submit(s, 1);
        assert_eq!(job.target_code, "es");

        let s = apply(s, TranslatorAction::SetInput("edited".into()));
        let s = apply(s, TranslatorAction::SetTarget("de".into()));
        let s = apply(
            s,
            TranslatorAction::Finish {
                ticket: 1,
                outcome: Ok("hola".into()),
            },
        );

        let rec = s.history.iter().next().unwrap();
        assert_eq!(rec.input_text, "hello");
        assert_eq!(rec.target_language_name, "Spanish");
    }

    #[test]
    fn unknown_target_is_rejected() {
        let err = reduce(&TranslatorState::default(), TranslatorAction::SetTarget("xx".into()))
            .err()
            .unwrap();
        assert!(matches!(err, CoreError::UnknownLanguage(c) if c == "xx"));
    }

    #[test]
    fn speak_and_copy_need_output() {
        let empty = TranslatorState::default();
        assert!(reduce(&empty, TranslatorAction::Speak).is_err());
        assert!(reduce(&empty, TranslatorAction::Copy).is_err());

        let s = translate_once(empty, 1, "hello", "hola");
        match reduce(&s, TranslatorAction::Speak).unwrap().1 {
            Some(TranslatorEffect::Platform(PlatformEffect::Speak(t))) => assert_eq!(t, "hola"),
            _ => panic!("expected speak effect"),
        }
        match reduce(&s, TranslatorAction::Copy).unwrap().1 {
            Some(TranslatorEffect::Platform(PlatformEffect::Copy(t))) => assert_eq!(t, "hola"),
            _ => panic!("expected copy effect"),
        }
    }

    #[test]
    fn view_reports_derived_flags() {
        let s = apply(TranslatorState::default(), TranslatorAction::SetInput("hi".into()));
        let v = serde_json::to_value(s.view()).unwrap();
        assert_eq!(v["can_submit"], true);
        assert_eq!(v["can_speak"], false);
        assert_eq!(v["show_history"], false);
        assert_eq!(v["char_count"], 2);
        assert_eq!(v["target_language_name"], "Spanish");
        assert_eq!(v["max_chars"], 1000);
    }
}
