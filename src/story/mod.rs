pub mod act1;
pub mod act2;
pub mod act3;
pub mod content;
pub mod data;
pub mod page;

use std::fmt;

use crate::foundation::error::{StoryError, StoryResult};
use crate::segment::table::SegmentTable;

/// `(start, end)` of a declared section.
pub(crate) fn bounds<S>(table: &SegmentTable<S>, id: &S) -> StoryResult<(f64, f64)>
where
    S: Clone + PartialEq + fmt::Debug,
{
    table
        .get(id)
        .map(|s| (s.start, s.end))
        .ok_or_else(|| StoryError::config(format!("section {id:?} is not declared")))
}
