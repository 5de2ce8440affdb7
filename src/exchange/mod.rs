// Exchange formats: the flat files the external sampler reads and the
// topic-word lines it reports back.

pub mod files;
pub mod formats;
pub mod topic_line;

pub use files::ExchangeFiles;
pub use topic_line::parse_topic_line;
