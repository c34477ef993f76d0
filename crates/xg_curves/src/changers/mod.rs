mod checks;
mod io;
mod misc;
mod nan_fill;
mod shaping;
mod synthesis;
mod transforms;

pub use checks::{CheckNoInvalidNumbers, CheckNoNaN, CheckSameXAxis};
pub use io::SaveOnCsv;
pub use misc::{Identity, Print};
pub use nan_fill::{ReplaceFirstNaN, ReplaceNaNWithPrevious, ReplaceNaNWithStops, ReplaceTailNaN, UseValueToFillCurve};
pub use shaping::{QuantizeXAxis, RemoveSmallCurve, RemoveSmallFunction, SortAll, TruncateToLowestX};
pub use synthesis::{AddCurve, StatisticsOfFunctionsPerX, SyntheticCount, SyntheticPercentage};
pub use transforms::{TransformX, TransformY};
