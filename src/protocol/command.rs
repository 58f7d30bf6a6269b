#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Navigate,
    RouteCurrent,
    LanguagesList,
    GeneratorGet,
    GeneratorSetLength,
    GeneratorSetIncludeNumbers,
    GeneratorSetIncludeSymbols,
    GeneratorRegenerate,
    TranslatorGet,
    TranslatorSetInput,
    TranslatorSetTarget,
    TranslatorSubmit,
    TranslatorCancel,
    TranslatorClear,
    TranslatorSpeak,
    TranslatorCopy,
    TranslatorHistory,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "navigate" => Command::Navigate,
            "route.current" => Command::RouteCurrent,
            "languages.list" => Command::LanguagesList,
            "generator.get" => Command::GeneratorGet,
            "generator.set_length" => Command::GeneratorSetLength,
            "generator.set_include_numbers" => Command::GeneratorSetIncludeNumbers,
            "generator.set_include_symbols" => Command::GeneratorSetIncludeSymbols,
            "generator.regenerate" => Command::GeneratorRegenerate,
            "translator.get" => Command::TranslatorGet,
            "translator.set_input" => Command::TranslatorSetInput,
            "translator.set_target" => Command::TranslatorSetTarget,
            "translator.submit" => Command::TranslatorSubmit,
            "translator.cancel" => Command::TranslatorCancel,
            "translator.clear" => Command::TranslatorClear,
            "translator.speak" => Command::TranslatorSpeak,
            "translator.copy" => Command::TranslatorCopy,
            "translator.history" => Command::TranslatorHistory,
            _ => Command::Unknown,
        }
    }
}
