//! Geo-distance sort construction: point parsing, validation, configuration,
//! wire codec, planning and comparator building.

pub mod comparator;
pub mod geo_distance;
pub mod mode;
pub mod nested;
pub mod order;
pub mod points;
pub mod validation;
pub mod warnings;

pub use self::comparator::{
    ComparatorPlan, DocComparator, GeoFieldReader, SortKeyAndFormat, SortValueFormat, ValueScope,
    build_sort, plan,
};
pub use self::geo_distance::GeoDistanceSortBuilder;
pub use self::mode::SortMode;
pub use self::nested::NestedSortBuilder;
pub use self::order::SortOrder;
pub use self::points::parse_points;
pub use self::validation::GeoValidationMethod;
pub use self::warnings::DeprecationWarnings;
