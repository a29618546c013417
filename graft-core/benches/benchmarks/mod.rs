pub mod graphs;
pub mod matching;
pub mod rewrite;
