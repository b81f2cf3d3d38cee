//! Trait seams for pluggable host capabilities

mod speech;

pub use speech::{
    Capability, RecognitionEngine, RecognitionOptions, SynthesisEngine, SynthesisOptions,
};
