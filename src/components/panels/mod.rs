//! Side panels: filters, search, description and title.

mod categories;
mod description;
mod edge_filter;
mod node_filter;
mod panel;
mod search;
mod title;
mod year_range;

pub use categories::{CategoryList, CategoryRow, bar_width, checked_note, count_caption};
pub use description::DescriptionPanel;
pub use edge_filter::EdgeFilterPanel;
pub use node_filter::NodeFilterPanel;
pub use panel::Panel;
pub use search::{MenuAnchor, MenuPlacement, SearchField, clears_selection, step_highlight};
pub use title::{GraphTitle, visible_caption};
pub use year_range::{YearRangePanel, track_background};
