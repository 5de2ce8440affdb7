// Text handling: the invertible tokenizer and sentence-mode casing.

pub mod casing;
pub mod tokenizer;
