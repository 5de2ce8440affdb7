// External topic sampler: the trait boundary, the HCA adapter and the
// process runner behind it.

pub mod hca;
pub mod process;
pub mod traits;

pub use hca::HcaSampler;
pub use traits::{Rank, SamplerOutcome, SamplerParams, SamplerStatus, TopicSampler};
