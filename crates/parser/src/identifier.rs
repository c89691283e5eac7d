//! Resource identifier model and parser
//!
//! Identifiers have the shape
//! `/subscriptions/{sub}[/resourceGroups/{rg}]/providers/{ns}/{type}/{name}[/{type}/{name}...]`
//! optionally followed by one extension chain introduced by a second
//! `providers` token.

use arm_resource_projector_common::{ProjectorError, Result};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Peekable;
use std::str::FromStr;

const SUBSCRIPTIONS: &str = "subscriptions";
const RESOURCE_GROUPS: &str = "resourceGroups";
const PROVIDERS: &str = "providers";

/// One `{type}/{name}` pair under a provider namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypedSegment {
    pub resource_type: String,
    pub name: String,
}

/// A provider namespace followed by at least one type/name pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderChain {
    namespace: String,
    segments: Vec<TypedSegment>,
}

impl ProviderChain {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn segments(&self) -> &[TypedSegment] {
        &self.segments
    }

    /// Namespace and every type segment joined with `/`
    ///
    /// Intermediate names are dropped: `Microsoft.Compute/virtualMachines/vm1/extensions/ext1`
    /// yields `Microsoft.Compute/virtualMachines/extensions`.
    pub fn resource_type(&self) -> String {
        let mut joined = self.namespace.clone();
        for segment in &self.segments {
            joined.push('/');
            joined.push_str(&segment.resource_type);
        }
        joined
    }

    /// Name of the last type/name pair
    pub fn resource_name(&self) -> &str {
        // parse_chain never builds an empty chain
        self.segments
            .last()
            .map(|s| s.name.as_str())
            .unwrap_or_default()
    }
}

/// Parsed hierarchical resource identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceIdentifier {
    subscription_id: String,
    resource_group_name: Option<String>,
    resource: ProviderChain,
    extension: Option<ProviderChain>,
}

impl ResourceIdentifier {
    /// Parse an identifier string
    ///
    /// Fails with [`ProjectorError::MalformedIdentifier`] when the string does
    /// not start with `/subscriptions/{id}`, lacks a provider namespace, or
    /// leaves a type segment without a name.
    pub fn parse(identifier: &str) -> Result<Self> {
        let parsed = parse_identifier(identifier);
        if let Err(ref e) = parsed {
            tracing::debug!(identifier, error = %e, "rejected resource identifier");
        }
        parsed
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    /// `None` for subscription-level resources
    pub fn resource_group_name(&self) -> Option<&str> {
        self.resource_group_name.as_deref()
    }

    pub fn provider_namespace(&self) -> &str {
        self.resource.namespace()
    }

    pub fn resource_type(&self) -> String {
        self.resource.resource_type()
    }

    pub fn resource_name(&self) -> &str {
        self.resource.resource_name()
    }

    pub fn resource_segments(&self) -> &[TypedSegment] {
        self.resource.segments()
    }

    pub fn extension(&self) -> Option<&ProviderChain> {
        self.extension.as_ref()
    }

    pub fn extension_resource_type(&self) -> Option<String> {
        self.extension.as_ref().map(ProviderChain::resource_type)
    }

    pub fn extension_resource_name(&self) -> Option<&str> {
        self.extension.as_ref().map(ProviderChain::resource_name)
    }

    pub fn extension_segments(&self) -> Option<&[TypedSegment]> {
        self.extension.as_ref().map(ProviderChain::segments)
    }

    /// Resource type with the extension type appended directly, no separator
    pub fn full_resource_type(&self) -> String {
        let mut full = self.resource_type();
        if let Some(ext) = self.extension_resource_type() {
            full.push_str(&ext);
        }
        full
    }

    /// Display type name used for view dispatch: `full_resource_type` with `/` turned into `.`
    pub fn type_display_name(&self) -> String {
        self.full_resource_type().replace('/', ".")
    }
}

fn is_keyword(token: &str, keyword: &str) -> bool {
    token.eq_ignore_ascii_case(keyword)
}

fn parse_identifier(identifier: &str) -> Result<ResourceIdentifier> {
    let Some(path) = identifier.strip_prefix('/') else {
        return Err(ProjectorError::malformed(
            identifier,
            "must start with '/subscriptions/'",
        ));
    };
    let path = path.strip_suffix('/').unwrap_or(path);

    let tokens: Vec<&str> = path.split('/').collect();
    if tokens.iter().any(|t| t.is_empty()) {
        return Err(ProjectorError::malformed(identifier, "contains an empty segment"));
    }

    let mut cursor = tokens.into_iter().peekable();

    match cursor.next() {
        Some(token) if is_keyword(token, SUBSCRIPTIONS) => {}
        _ => {
            return Err(ProjectorError::malformed(
                identifier,
                "must start with '/subscriptions/'",
            ))
        }
    }

    let subscription_id = cursor
        .next()
        .ok_or_else(|| ProjectorError::malformed(identifier, "missing subscription id"))?
        .to_string();

    let resource_group_name = if cursor.peek().is_some_and(|t| is_keyword(t, RESOURCE_GROUPS)) {
        cursor.next();
        let name = cursor
            .next()
            .ok_or_else(|| ProjectorError::malformed(identifier, "missing resource group name"))?;
        Some(name.to_string())
    } else {
        None
    };

    match cursor.next() {
        Some(token) if is_keyword(token, PROVIDERS) => {}
        Some(token) => {
            return Err(ProjectorError::malformed(
                identifier,
                format!("expected 'providers' but found '{}'", token),
            ))
        }
        None => {
            return Err(ProjectorError::malformed(
                identifier,
                "missing provider namespace",
            ))
        }
    }

    let resource = parse_chain(identifier, &mut cursor)?;

    // parse_chain only stops at the end of input or at a `providers` token
    let extension = match cursor.next() {
        None => None,
        Some(_) => {
            let chain = parse_chain(identifier, &mut cursor)?;
            if cursor.next().is_some() {
                return Err(ProjectorError::malformed(
                    identifier,
                    "only one extension resource chain is allowed",
                ));
            }
            Some(chain)
        }
    };

    Ok(ResourceIdentifier {
        subscription_id,
        resource_group_name,
        resource,
        extension,
    })
}

fn parse_chain<'a, I>(identifier: &str, cursor: &mut Peekable<I>) -> Result<ProviderChain>
where
    I: Iterator<Item = &'a str>,
{
    let namespace = cursor
        .next()
        .ok_or_else(|| ProjectorError::malformed(identifier, "missing provider namespace"))?;

    let mut segments = Vec::new();
    while let Some(&token) = cursor.peek() {
        if is_keyword(token, PROVIDERS) {
            break;
        }
        cursor.next();
        let name = cursor.next().ok_or_else(|| {
            ProjectorError::malformed(
                identifier,
                format!("resource type '{}' has no name", token),
            )
        })?;
        segments.push(TypedSegment {
            resource_type: token.to_string(),
            name: name.to_string(),
        });
    }

    if segments.is_empty() {
        return Err(ProjectorError::malformed(
            identifier,
            format!("provider '{}' has no type/name pair", namespace),
        ));
    }

    Ok(ProviderChain {
        namespace: namespace.to_string(),
        segments,
    })
}

impl fmt::Display for ProviderChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", PROVIDERS, self.namespace)?;
        for segment in &self.segments {
            write!(f, "/{}/{}", segment.resource_type, segment.name)?;
        }
        Ok(())
    }
}

/// Canonical form: keywords in documented casing, no trailing slash
impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", SUBSCRIPTIONS, self.subscription_id)?;
        if let Some(ref rg) = self.resource_group_name {
            write!(f, "/{}/{}", RESOURCE_GROUPS, rg)?;
        }
        write!(f, "{}", self.resource)?;
        if let Some(ref ext) = self.extension {
            write!(f, "{}", ext)?;
        }
        Ok(())
    }
}

impl FromStr for ResourceIdentifier {
    type Err = ProjectorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ResourceIdentifier {
    type Error = ProjectorError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl Serialize for ResourceIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResourceIdentifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}
