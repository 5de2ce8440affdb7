// Topics: parsed sampler output, phrase assembly and the discovery
// pipeline that ties them to the corpus.

pub mod discovery;
pub mod phrases;
pub mod topic;

pub use discovery::TopicDiscovery;
pub use topic::{Topic, TopicSet, TopicState};
