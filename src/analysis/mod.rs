pub mod archetype;
pub mod composition;
pub mod normalizer;
pub mod pipeline;
pub mod productivity;
pub mod ranking;
pub mod velocity;

pub use archetype::{classify, ArchetypeSignals, ARCHETYPE_RULES};
pub use composition::{extrapolate, extrapolate_breakdown, Fallback, FallbackRules, SampleCounts};
pub use normalizer::{InputNormalizer, NormalizedInputs, RawStoryInputs};
pub use pipeline::{build_story, StoryPipeline};
pub use velocity::{analyze_velocity, VelocityReport};
