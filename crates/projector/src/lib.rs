//! Projection of generic resource records into presentation objects
//!
//! This crate turns raw [`GenericResource`] records into ordered,
//! presentation-ready objects, under one of two output conventions
//! ([`ProjectionFormat`]):
//! - **Legacy**: nested payloads become untyped mappings and sequences
//! - **Structured**: nested payloads become typed objects whose type labels
//!   follow their position in the tree
//!
//! Every operation is a pure function of its inputs; records may be projected
//! concurrently without coordination.
//!
//! ## Usage
//! ```rust,ignore
//! use arm_resource_projector_projector::{to_presentation, ProjectionFormat};
//!
//! let resource = GenericResource::from_value(raw_json)?;
//! let obj = to_presentation(&resource, ProjectionFormat::Structured)?;
//! println!("{}", serde_json::to_string_pretty(&obj)?);
//! ```

mod properties;
mod resource;
mod tags;
mod value;

pub use properties::{project, project_labeled, to_untyped, walk, JsonVisitor, DEFAULT_ROOT_LABEL};
pub use resource::{project_resources, to_presentation, AZURE_RESOURCE_TYPE_NAME, RESOURCE_FIELDS};
pub use tags::project_tags;
pub use value::{Mapping, PresentationObject, PresentationValue};

pub use arm_resource_projector_common::{GenericResource, ProjectionFormat};
