// Output formatting: terminal display and JSON reports.

pub mod json;
pub mod terminal;
