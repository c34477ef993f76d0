#![forbid(unsafe_code)]

//! The functions dictionary and curve-changer pipeline (spec §4.6-§4.7).

pub mod aggregator;
pub mod changers;
pub mod dict;
pub mod errors;
pub mod pipeline;

pub mod prelude {
    pub use crate::aggregator::{Aggregator, Count, First, Last, Max, Mean, Min, Percentage, Sum};
    pub use crate::changers::{
        AddCurve, CheckNoInvalidNumbers, CheckNoNaN, CheckSameXAxis, Identity, Print, QuantizeXAxis, RemoveSmallCurve, RemoveSmallFunction, ReplaceFirstNaN, ReplaceNaNWithPrevious,
        ReplaceNaNWithStops, ReplaceTailNaN, SaveOnCsv, SortAll, StatisticsOfFunctionsPerX, SyntheticCount, SyntheticPercentage, TransformX, TransformY, TruncateToLowestX, UseValueToFillCurve,
    };
    pub use crate::dict::{AbscissaStatus, BoxData, FunctionsDict};
    pub use crate::errors::{CurveError, CurveResult};
    pub use crate::pipeline::{CurveChanger, Pipeline};
}
