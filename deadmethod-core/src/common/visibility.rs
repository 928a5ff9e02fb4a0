//! Class member visibility as written in TypeScript source.

use oxc_ast::ast::TSAccessibility;

/// Visibility level of a class member.
///
/// Only the TypeScript modifier decides this. An ECMAScript `#name` member
/// without a modifier is `Public` here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// No modifier, or `public`
    #[default]
    Public,
    /// `protected`
    Protected,
    /// `private`
    Private,
}

impl Visibility {
    pub fn from_accessibility(accessibility: Option<TSAccessibility>) -> Self {
        match accessibility {
            Some(TSAccessibility::Private) => Self::Private,
            Some(TSAccessibility::Protected) => Self::Protected,
            Some(TSAccessibility::Public) | None => Self::Public,
        }
    }

    pub fn is_private(self) -> bool {
        matches!(self, Self::Private)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_private_is_private() {
        assert!(Visibility::Private.is_private());
        assert!(!Visibility::Protected.is_private());
        assert!(!Visibility::Public.is_private());
    }

    #[test]
    fn test_from_accessibility() {
        assert_eq!(Visibility::from_accessibility(None), Visibility::Public);
        assert_eq!(
            Visibility::from_accessibility(Some(TSAccessibility::Private)),
            Visibility::Private
        );
        assert_eq!(
            Visibility::from_accessibility(Some(TSAccessibility::Protected)),
            Visibility::Protected
        );
    }
}
