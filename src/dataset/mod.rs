//! Source dataset model and ingestion.
//!
//! The hand-maintained dataset has drifted over time: the unaffiliated
//! bucket uses a size-based shape while named parades use a
//! medallion/regular split, and the unaffiliated key has had more than one
//! spelling. [`parser`] resolves all of that once, so the rest of the crate
//! only ever sees [`BeadSplit`]s under canonical keys.

pub mod keyed;
pub mod parser;
pub mod types;

pub use keyed::KeyedMap;
pub use types::{
    BeadSplit, ColorLedger, Dataset, Parade, SizeBreakdown, Specials, StuffedAnimals, Tally,
    Throws, UNAFFILIATED,
};
