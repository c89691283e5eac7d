//! Integration tests for generic resource projection

use arm_resource_projector_common::ProjectorError;
use arm_resource_projector_projector::{
    project_resources, to_presentation, GenericResource, PresentationValue, ProjectionFormat,
    AZURE_RESOURCE_TYPE_NAME, RESOURCE_FIELDS,
};
use serde_json::json;

const VM_ID: &str =
    "/subscriptions/s1/resourceGroups/rg1/providers/Microsoft.Compute/virtualMachines/vm1";

fn sample_resource() -> GenericResource {
    GenericResource::from_value(json!({
        "id": VM_ID,
        "properties": {"a": 1, "b": [true, null]}
    }))
    .unwrap()
}

#[test]
fn test_legacy_omits_tags_and_keeps_untyped_properties() {
    let obj = to_presentation(&sample_resource(), ProjectionFormat::Legacy).unwrap();

    assert!(obj.get("Tags").is_none());
    assert!(obj.get("Plan").is_none());

    let properties = obj.get("Properties").unwrap();
    let map = properties.as_map().expect("legacy properties are an untyped mapping");
    assert_eq!(map.names().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(properties.to_json(), json!({"a": 1, "b": [true, null]}));
    assert_eq!(properties.type_label(), None);
}

#[test]
fn test_structured_properties_are_typed_objects() {
    let obj = to_presentation(&sample_resource(), ProjectionFormat::Structured).unwrap();

    assert!(obj.get("Plan").is_none());

    let properties = obj.get("Properties").unwrap().as_object().unwrap();
    assert!(properties.type_name().is_some_and(|t| !t.is_empty()));
    assert_eq!(properties.get("a").unwrap().to_json(), json!(1));
    assert_eq!(
        properties.get("b").unwrap().as_list().unwrap(),
        &[PresentationValue::Bool(true), PresentationValue::Null]
    );
}

#[test]
fn test_full_resource_member_order() {
    let resource = GenericResource::from_value(json!({
        "id": "/subscriptions/s1/resourceGroups/rg1/providers/Microsoft.Compute/virtualMachines/vm1/providers/Microsoft.Insights/diagnosticSettings/ds1",
        "eTag": "etag-1",
        "changedTime": "2024-02-01T00:00:00Z",
        "createdTime": "2024-01-01T00:00:00Z",
        "properties": {"logs": []},
        "plan": {"name": "p1", "publisher": "contoso"},
        "tags": {"env": "prod"},
        "location": "westus",
        "kind": "diagnostics",
        "name": "ds1"
    }))
    .unwrap();

    for format in [ProjectionFormat::Legacy, ProjectionFormat::Structured] {
        let obj = to_presentation(&resource, format).unwrap();
        assert_eq!(obj.member_names(), RESOURCE_FIELDS.to_vec());

        assert_eq!(
            obj.get("ExtensionResourceType").and_then(PresentationValue::as_str),
            Some("Microsoft.Insights/diagnosticSettings")
        );
        assert_eq!(
            obj.get("ExtensionResourceName").and_then(PresentationValue::as_str),
            Some("ds1")
        );
        assert_eq!(
            obj.type_name(),
            Some("Microsoft.Compute.virtualMachinesMicrosoft.Insights.diagnosticSettings")
        );
        assert_eq!(obj.type_names()[1], AZURE_RESOURCE_TYPE_NAME);
    }
}

#[test]
fn test_legacy_plan_stays_typed_while_properties_are_untyped() {
    let mut resource = GenericResource::new(VM_ID);
    resource.plan = Some(json!({"name": "p1", "product": {"id": "x"}}));
    resource.properties = Some(json!({"a": 1}));

    let legacy = to_presentation(&resource, ProjectionFormat::Legacy).unwrap();
    let plan = legacy.get("Plan").unwrap();
    assert!(plan.as_object().is_some());
    assert!(plan.as_map().is_none());
    assert_eq!(plan.type_label(), Some("Microsoft.Compute.virtualMachines.Plan"));
    assert_eq!(
        plan.as_object().unwrap().get("product").unwrap().type_label(),
        Some("Microsoft.Compute.virtualMachines.Plan.product")
    );

    let properties = legacy.get("Properties").unwrap();
    assert!(properties.as_map().is_some());
    assert_eq!(properties.type_label(), None);

    let structured = to_presentation(&resource, ProjectionFormat::Structured).unwrap();
    assert_eq!(structured.get("Plan"), legacy.get("Plan"));
    assert!(structured.get("Properties").unwrap().as_object().is_some());
}

#[test]
fn test_subscription_level_resource_has_no_resource_group() {
    let resource = GenericResource::new("/subscriptions/s1/providers/Microsoft.Resources/deployments/d1");
    let obj = to_presentation(&resource, ProjectionFormat::Structured).unwrap();

    assert!(obj.get("ResourceGroupName").is_none());
    assert_eq!(
        obj.get("SubscriptionId").and_then(PresentationValue::as_str),
        Some("s1")
    );
    assert_eq!(obj.type_name(), Some("Microsoft.Resources.deployments"));
}

#[test]
fn test_serialized_output_has_no_nulls_for_absent_fields() {
    let json = serde_json::to_value(
        to_presentation(&sample_resource(), ProjectionFormat::Structured).unwrap(),
    )
    .unwrap();

    assert_eq!(
        json,
        json!({
            "ResourceId": VM_ID,
            "ResourceName": "vm1",
            "ResourceType": "Microsoft.Compute/virtualMachines",
            "ResourceGroupName": "rg1",
            "SubscriptionId": "s1",
            "Properties": {"a": 1, "b": [true, null]}
        })
    );
}

#[test]
fn test_malformed_identifier_fails_only_its_record() {
    let resources = vec![
        sample_resource(),
        GenericResource::new("/subscriptions/s1/resourceGroups/rg1/providers/Microsoft.Compute"),
    ];

    let results = project_resources(&resources, ProjectionFormat::Legacy);
    assert!(results[0].is_ok());
    assert!(matches!(
        results[1],
        Err(ProjectorError::MalformedIdentifier { .. })
    ));
}

#[test]
fn test_projection_is_thread_safe() {
    let resources: Vec<GenericResource> = (0..16)
        .map(|i| {
            let mut resource = GenericResource::new(format!(
                "/subscriptions/s1/resourceGroups/rg1/providers/Microsoft.Compute/virtualMachines/vm{}",
                i
            ));
            resource.properties = Some(json!({"index": i}));
            resource
        })
        .collect();

    let names: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = resources
            .iter()
            .map(|resource| {
                scope.spawn(move || to_presentation(resource, ProjectionFormat::Structured))
            })
            .collect();

        handles
            .into_iter()
            .map(|h| {
                let obj = h.join().unwrap().unwrap();
                obj.get("ResourceName").unwrap().as_str().unwrap().to_string()
            })
            .collect()
    });

    let expected: Vec<String> = (0..16).map(|i| format!("vm{}", i)).collect();
    assert_eq!(names, expected);
}
