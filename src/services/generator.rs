use crate::error::{CoreError, CoreResult};
use crate::model::generator::{GenerationParameters, MAX_LENGTH, MIN_LENGTH};
use crate::services::random::RandomSource;

pub const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Letters first, then digits and symbols when enabled. Order is fixed.
pub fn alphabet(params: &GenerationParameters) -> Vec<char> {
    let mut chars: Vec<char> = LETTERS.chars().collect();

    if params.include_numbers {
        chars.extend(DIGITS.chars());
    }
    if params.include_symbols {
        chars.extend(SYMBOLS.chars());
    }

    chars
}

/// Validates a requested length. Non-positive values are rejected, positive
/// values outside `MIN_LENGTH..=MAX_LENGTH` are clamped.
pub fn normalize_length(requested: i64) -> CoreResult<usize> {
    if requested <= 0 {
        return Err(CoreError::InvalidParameter(format!(
            "length must be a positive integer, got {requested}"
        )));
    }

    let clamped = requested.clamp(MIN_LENGTH as i64, MAX_LENGTH as i64) as usize;
    if clamped as i64 != requested {
        tracing::debug!(requested, clamped, "length clamped into range");
    }

    Ok(clamped)
}

pub fn generate(params: &GenerationParameters, rng: &mut dyn RandomSource) -> CoreResult<String> {
    if params.length == 0 {
        return Err(CoreError::InvalidParameter("length must be positive".into()));
    }

    let chars = alphabet(params);
    if chars.is_empty() {
        return Err(CoreError::InvalidParameter("alphabet is empty".into()));
    }

    Ok((0..params.length).map(|_| chars[rng.pick(chars.len())]).collect())
}
