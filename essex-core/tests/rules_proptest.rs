use essex_core::rules::{RuleLayer, RuleSetBuilder};
use proptest::prelude::*;
use serde_json::json;

fn gen_layer() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec(("[a-e]", 0i64..100), 0..8)
}

fn to_layer(name: &str, entries: &[(String, i64)]) -> RuleLayer {
    entries
        .iter()
        .fold(RuleLayer::new(name), |layer, (id, v)| layer.rule(id.clone(), json!(v)))
}

proptest! {
    #[test]
    fn test_last_writer_wins(layers in prop::collection::vec(gen_layer(), 1..5)) {
        let mut builder = RuleSetBuilder::new();
        for (idx, entries) in layers.iter().enumerate() {
            builder = builder.layer(to_layer(&format!("layer-{}", idx), entries));
        }
        let rules = builder.build();

        let mut expected = std::collections::HashMap::new();
        for entries in &layers {
            for (id, v) in entries {
                expected.insert(id.clone(), *v);
            }
        }

        prop_assert_eq!(rules.len(), expected.len());
        for (id, v) in expected {
            prop_assert_eq!(rules.get(&id), Some(&json!(v)));
        }
    }

    #[test]
    fn test_build_is_deterministic(layers in prop::collection::vec(gen_layer(), 1..5)) {
        let build = || {
            layers
                .iter()
                .enumerate()
                .fold(RuleSetBuilder::new(), |b, (idx, entries)| {
                    b.layer(to_layer(&format!("layer-{}", idx), entries))
                })
                .build()
        };
        prop_assert_eq!(build(), build());
    }
}
