pub mod daily;
pub mod difficulty;
pub mod generator;
pub mod letter_classifier;
pub mod rng;
pub mod seed_codec;
pub mod stats;
pub mod word_loader;
