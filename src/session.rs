use std::sync::mpsc::Sender;
use std::sync::Arc;

use crate::error::CoreResult;
use crate::model::route::Route;
use crate::services::effects::PlatformEffect;
use crate::services::random::RandomSource;
use crate::services::translator::Translate;
use crate::services::worker::{self, Event};
use crate::state::generator::{self, GeneratorAction, GeneratorState};
use crate::state::translator::{self, TranslatorAction, TranslatorEffect, TranslatorState};

/// All state of one running core. Owned by the main loop thread.
pub struct Session {
    pub route: Route,
    pub generator: GeneratorState,
    pub translator: TranslatorState,
    rng: Box<dyn RandomSource>,
    client: Arc<dyn Translate>,
    events: Sender<Event>,
    next_ticket: u64,
}

impl Session {
    pub fn new(
        mut rng: Box<dyn RandomSource>,
        client: Arc<dyn Translate>,
        events: Sender<Event>,
    ) -> CoreResult<Self> {
        let generator = GeneratorState::initial(rng.as_mut())?;

        Ok(Session {
            route: Route::default(),
            generator,
            translator: TranslatorState::default(),
            rng,
            client,
            events,
            next_ticket: 1,
        })
    }

    pub fn navigate(&mut self, path: &str) -> CoreResult<Route> {
        self.route = Route::try_from(path)?;
        Ok(self.route)
    }

    pub fn apply_generator(&mut self, action: GeneratorAction) -> CoreResult<()> {
        self.generator = generator::reduce(&self.generator, action, self.rng.as_mut())?;
        Ok(())
    }

    pub fn submit_translation(&mut self) -> CoreResult<()> {
        let ticket = self.next_ticket;
        self.apply_translator(TranslatorAction::Submit { ticket })?;
        if self.translator.in_flight_ticket() == Some(ticket) {
            self.next_ticket += 1;
        }
        Ok(())
    }

    /// Runs a translator transition. Requests are dispatched here; platform effects go back to the caller.
    pub fn apply_translator(&mut self, action: TranslatorAction) -> CoreResult<Option<PlatformEffect>> {
        let (next, effect) = translator::reduce(&self.translator, action)?;
        self.translator = next;

        match effect {
            Some(TranslatorEffect::Request(job)) => {
                worker::spawn_translation(Arc::clone(&self.client), job, self.events.clone());
                Ok(None)
            }
            Some(TranslatorEffect::Platform(p)) => Ok(Some(p)),
            None => Ok(None),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.translator.loading
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::services::random::StdRandom;
    use crate::services::translator::FALLBACK_MESSAGE;
    use std::sync::mpsc::{self, Receiver};
    use std::time::Duration;

    pub(crate) struct Fixed(pub Result<&'static str, &'static str>);

    impl Translate for Fixed {
        fn translate(&self, _text: &str, _target_code: &str) -> CoreResult<String> {
            match self.0 {
                Ok(t) => Ok(t.to_string()),
                Err(e) => Err(CoreError::InvalidResponse(e.to_string())),
            }
        }
    }

    struct Exploding;

    impl Translate for Exploding {
        fn translate(&self, _text: &str, _target_code: &str) -> CoreResult<String> {
            panic!("provider blew up");
        }
    }

    pub(crate) fn session_with(client: impl Translate + 'static) -> (Session, Receiver<Event>) {
        let (tx, rx) = mpsc::channel();
        let session = Session::new(Box::new(StdRandom::seeded(11)), Arc::new(client), tx).unwrap();
        (session, rx)
    }

    fn finish_next(session: &mut Session, rx: &Receiver<Event>) {
        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            Event::Translated { ticket, outcome } => {
                session
                    .apply_translator(TranslatorAction::Finish { ticket, outcome })
                    .unwrap();
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn submit_dispatches_and_result_lands_in_state() {
        let (mut session, rx) = session_with(Fixed(Ok("hola")));
        session
            .apply_translator(TranslatorAction::SetInput("hello".into()))
            .unwrap();
        session.submit_translation().unwrap();
        assert!(session.is_busy());

        finish_next(&mut session, &rx);

        assert!(!session.is_busy());
        assert_eq!(session.translator.translated_text, "hola");
        assert_eq!(session.translator.history.len(), 1);
    }

    #[test]
    fn tickets_increase_per_dispatched_request() {
        let (mut session, rx) = session_with(Fixed(Err("down")));
        session
            .apply_translator(TranslatorAction::SetInput("hello".into()))
            .unwrap();

        session.submit_translation().unwrap();
        assert_eq!(session.translator.in_flight_ticket(), Some(1));
        finish_next(&mut session, &rx);

        session.submit_translation().unwrap();
        assert_eq!(session.translator.in_flight_ticket(), Some(2));
    }

    #[test]
    fn worker_panic_shows_fallback_and_frees_the_translator() {
        let (mut session, rx) = session_with(Exploding);
        session
            .apply_translator(TranslatorAction::SetInput("hello".into()))
            .unwrap();
        session.submit_translation().unwrap();

        finish_next(&mut session, &rx);

        assert!(!session.is_busy());
        assert_eq!(session.translator.translated_text, FALLBACK_MESSAGE);
        assert_eq!(session.translator.history.len(), 0);
        assert!(session.submit_translation().is_ok());
    }

    #[test]
    fn navigation_switches_route() {
        let (mut session, _rx) = session_with(Fixed(Ok("x")));
        assert_eq!(session.route, Route::Translator);
        assert_eq!(session.navigate("/generator").unwrap(), Route::Generator);
        assert!(session.navigate("/nope").is_err());
        assert!(session.navigate("").is_err());
        assert_eq!(session.route, Route::Generator);
    }
}
