pub mod eval;
pub mod search;

pub use search::{Searcher, greedy_move};
