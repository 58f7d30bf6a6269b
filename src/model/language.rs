use serde::Serialize;

pub const SOURCE_LANG: &str = "en";
pub const DEFAULT_TARGET: &str = "es";

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

const fn lang(code: &'static str, name: &'static str) -> Language {
    Language { code, name }
}

pub const LANGUAGES: [Language; 24] = [
    lang("ar", "Arabic"),
    lang("bn", "Bengali"),
    lang("zh", "Chinese"),
    lang("cs", "Czech"),
    lang("nl", "Dutch"),
    lang("es", "Spanish"),
    lang("fi", "Finnish"),
    lang("fr", "French"),
    lang("de", "German"),
    lang("el", "Greek"),
    lang("hi", "Hindi"),
    lang("id", "Indonesian"),
    lang("it", "Italian"),
    lang("ja", "Japanese"),
    lang("ko", "Korean"),
    lang("pl", "Polish"),
    lang("pt", "Portuguese"),
    lang("ru", "Russian"),
    lang("sv", "Swedish"),
    lang("th", "Thai"),
    lang("tr", "Turkish"),
    lang("uk", "Ukrainian"),
    lang("ur", "Urdu"),
    lang("vi", "Vietnamese"),
];

pub fn find(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.code == code)
}

/// Display name for a code, falling back to the code itself.
pub fn display_name(code: &str) -> String {
    find(code)
        .map(|l| l.name.to_string())
        .unwrap_or_else(|| code.to_string())
}
