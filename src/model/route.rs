use serde::Serialize;

use crate::error::CoreError;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    #[default]
    Translator,
    Generator,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Translator => "/",
            Route::Generator => "/generator",
        }
    }
}

impl TryFrom<&str> for Route {
    type Error = CoreError;

    fn try_from(path: &str) -> Result<Self, Self::Error> {
        // tolerate a trailing slash, "/generator/" is the same view
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        match normalized {
            "/" => Ok(Route::Translator),
            "/generator" => Ok(Route::Generator),
            other => Err(CoreError::UnknownRoute(other.to_string())),
        }
    }
}
