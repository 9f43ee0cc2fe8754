pub mod codes;
pub mod market;

pub use codes::{flag_code, lookup_flag_code, lookup_map_code, map_code};
pub use market::{
    extremes, impact_rows, mean_change, normalize, sort_ascending, ImpactRow, MarketSummary,
    SortKey,
};
