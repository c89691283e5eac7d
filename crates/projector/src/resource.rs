//! Generic resource projection
//!
//! Builds the presentation object for one resource record. Members appear in
//! [`RESOURCE_FIELDS`] order and a member whose value is absent is left out
//! entirely rather than emitted as null.

use crate::properties::{project_labeled, to_untyped};
use crate::tags::project_tags;
use crate::value::PresentationObject;
use arm_resource_projector_common::{GenericResource, ProjectionFormat, Result};
use arm_resource_projector_parser::ResourceIdentifier;

/// Type name carried by every projected resource after its computed type name
pub const AZURE_RESOURCE_TYPE_NAME: &str = "Microsoft.Azure.Resource";

/// Output member order
pub const RESOURCE_FIELDS: [&str; 16] = [
    "Name",
    "ResourceId",
    "ResourceName",
    "ResourceType",
    "ExtensionResourceName",
    "ExtensionResourceType",
    "Kind",
    "ResourceGroupName",
    "Location",
    "SubscriptionId",
    "Tags",
    "Plan",
    "Properties",
    "CreatedTime",
    "ChangedTime",
    "ETag",
];

/// Project a resource record into a presentation object
///
/// Fails with `MalformedIdentifier` when `resource.id` does not parse.
///
/// `Plan` is always a typed object, whatever the format. `Properties` is a
/// typed object under the structured format and an untyped mapping
/// ([`to_untyped`]) under the legacy format.
pub fn to_presentation(
    resource: &GenericResource,
    format: ProjectionFormat,
) -> Result<PresentationObject> {
    let id = ResourceIdentifier::parse(&resource.id)?;
    let type_name = id.type_display_name();

    let plan = project_labeled(
        resource.plan.as_ref(),
        ProjectionFormat::Structured,
        &format!("{}.Plan", type_name),
    );
    let properties = match format {
        ProjectionFormat::Legacy => to_untyped(resource.properties.as_ref()),
        ProjectionFormat::Structured => project_labeled(
            resource.properties.as_ref(),
            format,
            &format!("{}.Properties", type_name),
        ),
    };

    let mut obj = PresentationObject::new(type_name);
    obj.add_type_name(AZURE_RESOURCE_TYPE_NAME);

    obj.insert_present("Name", resource.name.as_deref());
    obj.insert_present("ResourceId", Some(resource.id.as_str()));
    obj.insert_present("ResourceName", Some(id.resource_name()));
    obj.insert_present("ResourceType", Some(id.resource_type()));
    obj.insert_present("ExtensionResourceName", id.extension_resource_name());
    obj.insert_present("ExtensionResourceType", id.extension_resource_type());
    obj.insert_present("Kind", resource.kind.as_deref());
    obj.insert_present("ResourceGroupName", id.resource_group_name());
    obj.insert_present("Location", resource.location.as_deref());
    obj.insert_present("SubscriptionId", Some(id.subscription_id()));
    obj.insert_present("Tags", project_tags(resource.tags.as_ref()));
    obj.insert_present("Plan", plan);
    obj.insert_present("Properties", properties);
    obj.insert_present("CreatedTime", resource.created_time.as_deref());
    obj.insert_present("ChangedTime", resource.changed_time.as_deref());
    obj.insert_present("ETag", resource.etag.as_deref());

    tracing::trace!(
        resource_id = %resource.id,
        type_name = obj.type_name().unwrap_or_default(),
        %format,
        members = obj.members().len(),
        "projected resource"
    );

    Ok(obj)
}

/// Project each record independently
///
/// A malformed identifier only fails its own entry; whether to skip it or stop
/// is up to the caller.
pub fn project_resources<'a, I>(
    resources: I,
    format: ProjectionFormat,
) -> Vec<Result<PresentationObject>>
where
    I: IntoIterator<Item = &'a GenericResource>,
{
    resources
        .into_iter()
        .map(|resource| to_presentation(resource, format))
        .collect()
}
