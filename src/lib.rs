// topicwright: topic discovery over plain-text corpora
//
// This is the library root. Text handling and the corpus model feed the
// exchange files an external HCA sampler trains on; the topics module
// reads the sampler's report back and assembles phrases from the corpus.

pub mod config;
pub mod corpus;
pub mod error;
pub mod exchange;
pub mod output;
pub mod sampler;
pub mod text;
pub mod topics;

pub use error::{Error, Result};
