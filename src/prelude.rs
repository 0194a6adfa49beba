pub use crate::boxmean::BoxMeanFilter;
pub use crate::config::FilterConfig;
pub use crate::enums::FilterMethod;
pub use crate::enums::SampleType;
pub use crate::error::FilterError;
pub use crate::filter::Configurable;
pub use crate::filter::WindowFilter;
pub use crate::grid::SampleGrid;
pub use crate::median8::TwoLevelMedianFilter;
pub use crate::medianhist::HistogramMedianFilter;
pub use crate::mediansort::LocalSortMedianFilter;
pub use crate::ordinal::OrdinalTable;
pub use crate::sample::Sample;
