pub mod results;
pub mod searcher;

pub use results::{SearchResult, SearchStats};
pub use searcher::Search;
