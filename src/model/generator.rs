use serde::Serialize;

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 1000;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParameters {
    pub length: usize,
    pub include_numbers: bool,
    pub include_symbols: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        GenerationParameters {
            length: 12,
            include_numbers: true,
            include_symbols: true,
        }
    }
}
