// JSON rendering of discovered topics, for piping into other tools.

use anyhow::Result;

use crate::topics::Topic;

/// Serialize topics as a pretty-printed array of `{ "id", "words" }`.
pub fn render_topics(topics: &[Topic]) -> Result<String> {
    Ok(serde_json::to_string_pretty(topics)?)
}
