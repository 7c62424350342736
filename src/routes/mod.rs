/// Router Module Index
///
/// Organizes the routing logic into access-segregated modules. Authentication is
/// applied per module (Axum layers or extractors), never ad hoc per route.

/// Routes accessible to all clients. `/menu` degrades to an empty menu for
/// anonymous callers instead of rejecting them.
pub mod public;

/// Routes protected by the `AuthUser` extractor middleware.
pub mod authenticated;

/// Routes that additionally require a specific permission, checked in the handler.
pub mod admin;
