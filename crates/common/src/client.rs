//! Seam to the management API
//!
//! The core never talks to the network. A [`ResourceClient`] is supplied by
//! the caller; this module only defines the contract and the helpers that
//! translate its `NotFound` signal into presence checks.

use crate::{GenericResource, ResourcePage};
use thiserror::Error;

/// Errors surfaced by a [`ResourceClient`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Request failed: {0}")]
    Request(String),
}

/// Source of raw resource records
#[cfg_attr(test, mockall::automock)]
pub trait ResourceClient {
    /// Fetch a single resource by its full identifier
    fn get_resource(&self, resource_id: &str) -> Result<GenericResource, ClientError>;

    /// Fetch one page of resources under `scope`
    ///
    /// `next_link` is the continuation returned by the previous page.
    fn list_resources(
        &self,
        scope: &str,
        next_link: Option<String>,
    ) -> Result<ResourcePage, ClientError>;
}

/// Check whether `resource_id` exists
///
/// `NotFound` becomes `Ok(false)`; any other failure is returned unchanged.
pub fn resource_exists<C>(client: &C, resource_id: &str) -> Result<bool, ClientError>
where
    C: ResourceClient + ?Sized,
{
    match client.get_resource(resource_id) {
        Ok(_) => Ok(true),
        Err(ClientError::NotFound(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Fetch every page under `scope`, following continuation links
///
/// Stops early if a page hands back the link that was just requested.
pub fn list_all_resources<C>(client: &C, scope: &str) -> Result<Vec<GenericResource>, ClientError>
where
    C: ResourceClient + ?Sized,
{
    let mut all_items = Vec::new();
    let mut next_link: Option<String> = None;

    loop {
        let requested = next_link.take();
        let page = client.list_resources(scope, requested.clone())?;
        all_items.extend(page.value);

        match page.next_link {
            Some(link) if requested.as_deref() == Some(link.as_str()) => {
                tracing::warn!(scope, next_link = %link, "continuation link repeated, stopping");
                break;
            }
            Some(link) => next_link = Some(link),
            None => break,
        }
    }

    Ok(all_items)
}
