use serde::Serialize;

use crate::error::CoreResult;
use crate::model::generator::GenerationParameters;
use crate::services::generator;
use crate::services::random::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorAction {
    SetLength(i64),
    SetIncludeNumbers(bool),
    SetIncludeSymbols(bool),
    Regenerate,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct GeneratorState {
    #[serde(flatten)]
    pub params: GenerationParameters,
    pub value: String,
}

impl GeneratorState {
    /// Default parameters with a first sample already drawn.
    pub fn initial(rng: &mut dyn RandomSource) -> CoreResult<Self> {
        let params = GenerationParameters::default();
        let value = generator::generate(&params, rng)?;
        Ok(GeneratorState { params, value })
    }

    pub fn alphabet_size(&self) -> usize {
        generator::alphabet(&self.params).len()
    }

    pub fn view(&self) -> GeneratorView<'_> {
        GeneratorView {
            state: self,
            alphabet_size: self.alphabet_size(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GeneratorView<'a> {
    #[serde(flatten)]
    pub state: &'a GeneratorState,
    pub alphabet_size: usize,
}

/// Every action, including a no-op parameter change, yields a fresh sample.
pub fn reduce(
    state: &GeneratorState,
    action: GeneratorAction,
    rng: &mut dyn RandomSource,
) -> CoreResult<GeneratorState> {
    let mut params = state.params;

    match action {
        GeneratorAction::SetLength(n) => params.length = generator::normalize_length(n)?,
        GeneratorAction::SetIncludeNumbers(v) => params.include_numbers = v,
        GeneratorAction::SetIncludeSymbols(v) => params.include_symbols = v,
        GeneratorAction::Regenerate => {}
    }

    let value = generator::generate(&params, rng)?;
    Ok(GeneratorState { params, value })
}
