pub mod effects;
pub mod generator;
pub mod random;
pub mod translator;
pub mod worker;
