//! Tag projection

use crate::value::{Mapping, PresentationValue};
use arm_resource_projector_common::Tags;

/// Convert tags into an ordered presentation mapping
///
/// Absent tags stay absent; an empty tag set stays an empty mapping.
pub fn project_tags(tags: Option<&Tags>) -> Option<PresentationValue> {
    let tags = tags?;
    let map: Mapping = tags
        .iter()
        .map(|(k, v)| (k.to_string(), PresentationValue::from(v)))
        .collect();
    Some(PresentationValue::Map(map))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_tags_stay_absent() {
        assert!(project_tags(None).is_none());
    }

    #[test]
    fn test_empty_tags_are_present() {
        let projected = project_tags(Some(&Tags::new())).unwrap();
        assert!(projected.as_map().unwrap().is_empty());
    }

    #[test]
    fn test_tags_keep_order_and_values() {
        let tags: Tags = vec![("env", "prod"), ("owner", ""), ("Cost Center", "42")]
            .into_iter()
            .collect();

        let projected = project_tags(Some(&tags)).unwrap();
        let map = projected.as_map().unwrap();

        assert_eq!(
            map.names().collect::<Vec<_>>(),
            vec!["env", "owner", "Cost Center"]
        );
        assert_eq!(map.get("owner").and_then(PresentationValue::as_str), Some(""));
        assert_eq!(map.get("Cost Center").and_then(PresentationValue::as_str), Some("42"));
    }
}
