//! Benchmark ranking pipeline.
//!
//! Loads per-scale measurement rows, drops the warm-up scale, scores each
//! remaining scale by a weighted blend of relative error and fixed-point
//! time, and ranks the scales by ascending weight.

pub mod loader;
pub mod rank;
pub mod sanitize;
pub mod score;
pub mod types;

pub use loader::{load_file, load_rows};
pub use rank::rank_rows;
pub use sanitize::drop_warmup;
pub use score::{ALGORITHM_VERSION, ScoreWeights, score_row, score_rows};
pub use types::{MeasurementRow, RankedRow, ScoredRow};
