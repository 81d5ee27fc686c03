//! Layout reconstruction.
//!
//! This module contains:
//! - Character collection with ligature merging (`collector`)
//! - Row curation and row assignment (`rows`)
//! - Column width estimation (`slots`)
//! - Line rendering (`render`)
//! - Page orchestration and vertical spacing (`page`)
//! - Layout parameters (`params`)

pub mod collector;
pub mod page;
pub mod params;
pub mod render;
pub mod rows;
pub mod slots;

pub use collector::{
    CharRecord, CharacterCollector, CollectedPage, LigatureMerge, PageBounds, merge_ligature,
};
pub use page::{PAGE_SEPARATOR, PageStats, PageText, layout_page, row_advance};
pub use params::LayoutParams;
pub use render::render_line;
pub use rows::{RowGroups, assign_rows, curate_rows, find_row};
pub use slots::SlotEstimate;
