pub mod generator;
pub mod params;
pub mod prompts;
