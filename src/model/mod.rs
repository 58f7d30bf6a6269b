pub mod generator;
pub mod history;
pub mod language;
pub mod route;
