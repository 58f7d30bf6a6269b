pub mod generator;
pub mod translator;
