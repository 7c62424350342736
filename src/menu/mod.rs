/// Menu Module Index
///
/// The permission-aware menu pipeline:
/// rows from the repository are assembled into a tree (`tree`), filtered against the
/// caller's identity and the route table (`evaluator`, `permissions`), and finally
/// shaped into the nested JSON the admin UI renders (`serializer`).

/// Menu tree assembly from flat `menu_items` rows.
pub mod tree;

/// The exact-match path → permission table.
pub mod permissions;

/// Bottom-up visibility filtering.
pub mod evaluator;

/// Locale-aware conversion into response nodes.
pub mod serializer;

pub use evaluator::AccessEvaluator;
pub use permissions::RoutePermissionMap;
pub use serializer::MenuSerializer;
pub use tree::{MenuItem, build_tree};
