pub mod assessment_engine;
pub mod guidance_generator;
pub mod profile_synthesizer;

pub use assessment_engine::AssessmentEngine;
pub use guidance_generator::{GuidanceEntry, GuidanceGenerator};
pub use profile_synthesizer::ProfileSynthesizer;
