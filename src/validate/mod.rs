//! Graph-level validation: connection policy and rule-graph completeness.

pub mod connection;
pub mod structural;

pub use connection::{
    ALLOWED_CONNECTIONS, ConnectOutcome, FilteredEdges, RejectedEdge, check_connection, connect,
    filter_edges, is_allowed,
};
pub use structural::{StructuralReport, is_complete, validate_structural};
