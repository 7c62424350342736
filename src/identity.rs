use std::collections::BTreeSet;

/// Identity
///
/// The resolved role and permission sets of an authenticated caller.
///
/// Wildcard resolution happens once, in `Identity::new`: a caller holding the
/// configured wildcard role (the "super-admin") satisfies every permission check
/// from then on, so call sites only ever ask `can(..)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    roles: BTreeSet<String>,
    permissions: BTreeSet<String>,
    wildcard: bool,
}

impl Identity {
    /// new
    ///
    /// Builds an identity from role names and the (already role-expanded) permission names.
    /// `wildcard_role` names the role that grants every permission.
    pub fn new<R, P>(roles: R, permissions: P, wildcard_role: &str) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let roles: BTreeSet<String> = roles.into_iter().map(Into::into).collect();
        let permissions = permissions.into_iter().map(Into::into).collect();
        let wildcard = !wildcard_role.is_empty() && roles.contains(wildcard_role);

        Self {
            roles,
            permissions,
            wildcard,
        }
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    pub fn permissions(&self) -> &BTreeSet<String> {
        &self.permissions
    }

    /// True when the identity holds the wildcard role.
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// can
    ///
    /// The single permission check used across the application. Unknown permission
    /// names are simply not held, so they deny like any other missing grant.
    pub fn can(&self, permission: &str) -> bool {
        self.wildcard || self.permissions.contains(permission)
    }
}
