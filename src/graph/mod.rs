//! The researcher network and the pure logic run over it: filtering, hover
//! reducers, search and selection.

mod filter;
mod handle;
mod highlight;
mod model;
mod search;
mod selection;

pub use filter::{FilterState, Tally, VisibilityStats, apply_filters};
pub use handle::GraphHandle;
pub use highlight::{DEFAULT_EDGE_SIZE, EdgeDisplay, HOVERED_EDGE_SIZE, NodeDisplay, edge_display, node_display};
pub use model::{Edge, EdgeIdx, EdgeLabel, Node, NodeIdx, Role, SocialGraph};
pub use search::{SearchHit, SearchIndex, fold};
pub use selection::{Camera, CameraTarget, SelectionController};
