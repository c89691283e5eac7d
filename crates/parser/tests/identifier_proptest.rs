//! Property-based tests for identifier parsing
//!
//! Generates well-formed identifiers from their parts and checks that parsing
//! recovers the parts and that the canonical form round-trips.

use arm_resource_projector_parser::ResourceIdentifier;
use proptest::prelude::*;

/// Any name segment, including words that collide with grammar keywords
fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[A-Za-z0-9][A-Za-z0-9._-]{0,15}",
        1 => prop_oneof![
            Just("providers".to_string()),
            Just("PROVIDERS".to_string()),
            Just("resourceGroups".to_string()),
            Just("Subscriptions".to_string()),
        ],
    ]
}

/// Type segments; a `providers` token in type position starts a new chain
fn arb_type() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[A-Za-z0-9][A-Za-z0-9._-]{0,15}",
        1 => Just("resourceGroups".to_string()),
    ]
    .prop_filter("reserved keyword", |s| !s.eq_ignore_ascii_case("providers"))
}

/// Keyword spelled in a random ASCII casing
fn arb_keyword(keyword: &'static str) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<bool>(), keyword.len()).prop_map(move |upper| {
        keyword
            .chars()
            .zip(upper)
            .map(|(c, u)| if u { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect()
    })
}

fn arb_namespace() -> impl Strategy<Value = String> {
    "(Microsoft|Contoso)\\.[A-Z][a-zA-Z]{1,12}"
}

fn arb_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((arb_type(), arb_name()), 1..4)
}

fn arb_chain() -> impl Strategy<Value = (String, Vec<(String, String)>)> {
    (arb_namespace(), arb_pairs())
}

#[derive(Debug, Clone)]
struct Keywords {
    subscriptions: String,
    resource_groups: String,
    providers: String,
    ext_providers: String,
}

fn arb_keywords() -> impl Strategy<Value = Keywords> {
    (
        arb_keyword("subscriptions"),
        arb_keyword("resourceGroups"),
        arb_keyword("providers"),
        arb_keyword("providers"),
    )
        .prop_map(|(subscriptions, resource_groups, providers, ext_providers)| Keywords {
            subscriptions,
            resource_groups,
            providers,
            ext_providers,
        })
}

fn render_chain(keyword: &str, namespace: &str, pairs: &[(String, String)]) -> String {
    let mut out = format!("/{}/{}", keyword, namespace);
    for (t, n) in pairs {
        out.push_str(&format!("/{}/{}", t, n));
    }
    out
}

fn render(
    keywords: &Keywords,
    sub: &str,
    rg: Option<&str>,
    chain: &(String, Vec<(String, String)>),
    ext: Option<&(String, Vec<(String, String)>)>,
) -> String {
    let mut raw = format!("/{}/{}", keywords.subscriptions, sub);
    if let Some(rg) = rg {
        raw.push_str(&format!("/{}/{}", keywords.resource_groups, rg));
    }
    raw.push_str(&render_chain(&keywords.providers, &chain.0, &chain.1));
    if let Some((ext_ns, ext_pairs)) = ext {
        raw.push_str(&render_chain(&keywords.ext_providers, ext_ns, ext_pairs));
    }
    raw
}

fn expected_type(namespace: &str, pairs: &[(String, String)]) -> String {
    std::iter::once(namespace.to_string())
        .chain(pairs.iter().map(|(t, _)| t.clone()))
        .collect::<Vec<_>>()
        .join("/")
}

proptest! {
    /// Parsing recovers every component of a generated identifier
    #[test]
    fn parse_recovers_components(
        keywords in arb_keywords(),
        sub in arb_name(),
        rg in prop::option::of(arb_name()),
        chain in arb_chain(),
        ext in prop::option::of(arb_chain()),
    ) {
        let raw = render(&keywords, &sub, rg.as_deref(), &chain, ext.as_ref());

        let id = ResourceIdentifier::parse(&raw).unwrap();
        prop_assert_eq!(id.subscription_id(), sub.as_str());
        prop_assert_eq!(id.resource_group_name(), rg.as_deref());
        prop_assert_eq!(id.resource_type(), expected_type(&chain.0, &chain.1));
        prop_assert_eq!(id.resource_name(), chain.1.last().unwrap().1.as_str());
        prop_assert_eq!(
            id.extension_resource_type(),
            ext.as_ref().map(|(n, p)| expected_type(n, p))
        );
        prop_assert_eq!(
            id.extension_resource_name(),
            ext.as_ref().map(|(_, p)| p.last().unwrap().1.as_str())
        );
    }

    /// Canonical string re-parses to the same structure
    #[test]
    fn canonical_round_trip(
        keywords in arb_keywords(),
        sub in arb_name(),
        rg in prop::option::of(arb_name()),
        chain in arb_chain(),
        ext in prop::option::of(arb_chain()),
    ) {
        let raw = render(&keywords, &sub, rg.as_deref(), &chain, ext.as_ref());

        let first = ResourceIdentifier::parse(&raw).unwrap();
        let canonical = first.to_string();
        let second = ResourceIdentifier::parse(&canonical).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(second.to_string(), canonical);
    }

    /// Dropping the last name always yields a parse failure
    #[test]
    fn truncated_identifier_is_rejected(
        keywords in arb_keywords(),
        sub in arb_name(),
        chain in arb_chain(),
        ext in prop::option::of(arb_chain()),
    ) {
        let raw = render(&keywords, &sub, None, &chain, ext.as_ref());
        let truncated = raw.rsplit_once('/').unwrap().0;
        prop_assert!(ResourceIdentifier::parse(truncated).is_err());
    }
}

#[test]
fn test_round_trip_with_keyword_names_and_extension() {
    let raw = "/subscriptions/s1/providers/A.B/t/providers/providers/C.D/e/f";
    let id = ResourceIdentifier::parse(raw).unwrap();

    assert_eq!(id.resource_name(), "providers");
    assert_eq!(id.extension_resource_type().as_deref(), Some("C.D/e"));
    assert_eq!(id.to_string(), raw);
    assert_eq!(ResourceIdentifier::parse(&id.to_string()).unwrap(), id);
}
