//! Property-based tests for host list parsing and normalization.
//!
//! Test coverage:
//! - parse_hosts: never yields blank entries and keeps order
//! - ConfigLoader: accepts any http(s) host/port and strips trailing slashes

use proptest::prelude::*;

use es_output_config::{ConfigLoader, parse_hosts};

fn host_strategy() -> impl Strategy<Value = String> {
    let scheme = prop_oneof![Just("http"), Just("https")];
    let name = prop_oneof![
        Just("localhost".to_string()),
        "[a-z][a-z0-9-]{0,15}".prop_map(String::from),
        (1u8..=254u8, 0u8..=255u8).prop_map(|(a, b)| format!("10.0.{}.{}", b, a)),
    ];
    (scheme, name, 1u16..=65535u16)
        .prop_map(|(scheme, name, port)| format!("{}://{}:{}", scheme, name, port))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_parse_hosts_drops_blanks_and_keeps_order(
        hosts in prop::collection::vec(host_strategy(), 0..6),
        padding in prop::collection::vec(" {0,3}", 0..6),
    ) {
        let mut raw = String::new();
        for (i, host) in hosts.iter().enumerate() {
            let pad = padding.get(i).map(String::as_str).unwrap_or("");
            raw.push_str(pad);
            raw.push_str(host);
            raw.push_str(pad);
            raw.push_str(",,");
        }

        let parsed = parse_hosts(&raw);
        prop_assert_eq!(parsed, hosts);
    }

    #[test]
    fn test_loader_normalizes_hosts(host in host_strategy(), trailing in any::<bool>()) {
        let input = if trailing { format!("{}/", host) } else { host.clone() };

        let config = ConfigLoader::new()
            .with_hosts(vec![input])
            .build()
            .expect("generated host should be valid");

        prop_assert_eq!(config.connection.hosts.len(), 1);
        prop_assert!(!config.connection.hosts[0].ends_with('/'));
        prop_assert!(config.connection.hosts[0].starts_with("http"));
    }
}
