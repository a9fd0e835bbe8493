/// Core functionality modules
///
/// Name normalization, validated updates and searching. The store itself
/// lives in `crate::store`.

pub mod normalizer;
pub mod searcher;
pub mod updater;

pub use normalizer::{normalize, parse_count};
pub use searcher::Searcher;
pub use updater::Updater;
