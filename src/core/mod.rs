pub mod completeness;
pub mod diff;
pub mod paging;
pub mod validation;

pub use completeness::{classify, visible_chips, CardCompleteness, Chip, ChipColor, ChipName};
pub use diff::{Blank, DirtyFields, Patch, PatchBuilder};
pub use paging::{paginate, PagedView, Tagged};
pub use validation::ValidationErrors;
