//! Resource identifier parsing
//!
//! This crate turns opaque slash-delimited resource identifiers into a typed
//! hierarchical structure ([`ResourceIdentifier`]).
//!
//! ## Identifier grammar
//!
//! ```text
//! /subscriptions/{subId}
//!   [/resourceGroups/{rg}]
//!   /providers/{namespace}/{type}/{name}[/{type}/{name}...]
//!   [/providers/{extNamespace}/{extType}/{extName}[/{extType}/{extName}...]]
//! ```
//!
//! Nested types fold into one type string and only the last name is kept:
//! - `.../providers/Microsoft.Compute/virtualMachines/vm1/extensions/ext1`
//!   → type `Microsoft.Compute/virtualMachines/extensions`, name `ext1`
//!
//! Malformed identifiers are always rejected; the parser never guesses.

mod identifier;

pub use identifier::{ProviderChain, ResourceIdentifier, TypedSegment};

use arm_resource_projector_common::Result;

/// Parse a resource identifier string
///
/// # Arguments
/// * `identifier` - Full identifier, e.g. `/subscriptions/s1/resourceGroups/rg1/providers/...`
///
/// # Returns
/// * `ResourceIdentifier` - Typed decomposition of the identifier
pub fn parse_resource_id(identifier: &str) -> Result<ResourceIdentifier> {
    ResourceIdentifier::parse(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource_id() {
        let id = parse_resource_id("/subscriptions/s1/providers/Microsoft.Resources/deployments/d1");
        assert!(id.is_ok());
        assert_eq!(id.unwrap().resource_group_name(), None);
    }
}
