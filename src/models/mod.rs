pub mod content;
pub mod display;
pub mod search;
pub mod state;

pub use content::{ContentFields, ContentFile, ContentRecord, MetadataTag};
pub use display::{build_display_rows, is_record_field, DisplayRow};
pub use search::{
    valid_range, ActiveFilter, ContentFilters, DuplicatableFilter, SearchCriteria, SortDirection,
    SortSpec,
};
pub use state::QueryState;
