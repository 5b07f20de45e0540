//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store against a simple model across random
//! operation sequences.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::thread::sleep;
use std::time::Duration;

use crate::cache::{create_cache_key, invalidate_cache_pattern, Cache, EvictionStrategy};
use crate::config::CacheConfig;

// == Test Configuration ==
const TEST_MAX_SIZE: usize = 100;
const TEST_DEFAULT_TTL: Duration = Duration::from_secs(300);

fn new_cache(max_size: usize, strategy: EvictionStrategy) -> Cache<String> {
    Cache::new(CacheConfig::new(TEST_DEFAULT_TTL, max_size, strategy)).unwrap()
}

// == Strategies ==
/// Generates keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e][0-9]"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,32}"
}

fn eviction_strategy() -> impl Strategy<Value = EvictionStrategy> {
    prop_oneof![
        Just(EvictionStrategy::Lru),
        Just(EvictionStrategy::Fifo),
        Just(EvictionStrategy::OldestByCreation),
    ]
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Has { key: String },
    Remove { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        2 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Has { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Remove { key }),
    ]
}

/// Reference model: insertion/creation/access order tracked as plain vectors.
#[derive(Default)]
struct Model {
    values: HashMap<String, String>,
    inserted: Vec<String>,
    created: Vec<String>,
    accessed: Vec<String>,
}

impl Model {
    fn bump(order: &mut Vec<String>, key: &str) {
        order.retain(|k| k != key);
        order.push(key.to_string());
    }

    fn set(&mut self, key: &str, value: &str, max_size: usize, strategy: EvictionStrategy) {
        if !self.values.contains_key(key) {
            if self.values.len() >= max_size {
                let victim = match strategy {
                    EvictionStrategy::Lru => self.accessed[0].clone(),
                    EvictionStrategy::Fifo => self.inserted[0].clone(),
                    EvictionStrategy::OldestByCreation => self.created[0].clone(),
                };
                self.remove(&victim);
            }
            self.inserted.push(key.to_string());
        }
        self.values.insert(key.to_string(), value.to_string());
        Self::bump(&mut self.created, key);
        Self::bump(&mut self.accessed, key);
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let value = self.values.get(key).cloned();
        if value.is_some() {
            Self::bump(&mut self.accessed, key);
        }
        value
    }

    fn remove(&mut self, key: &str) -> bool {
        self.inserted.retain(|k| k != key);
        self.created.retain(|k| k != key);
        self.accessed.retain(|k| k != key);
        self.values.remove(key).is_some()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any operation sequence leaves the cache agreeing with the model, for
    // every eviction policy.
    #[test]
    fn prop_matches_reference_model(
        strategy in eviction_strategy(),
        max_size in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let mut cache = new_cache(max_size, strategy);
        let mut model = Model::default();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    cache.set(key.as_str(), value.clone(), None);
                    model.set(&key, &value, max_size, strategy);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get(&key).cloned(), model.get(&key));
                }
                CacheOp::Has { key } => {
                    prop_assert_eq!(cache.has(&key), model.values.contains_key(&key));
                }
                CacheOp::Remove { key } => {
                    prop_assert_eq!(cache.remove(&key), model.remove(&key));
                }
            }
            prop_assert!(cache.len() <= max_size);
            cache.assert_queue_consistent();
        }

        let keys: HashSet<String> = cache.keys().into_iter().collect();
        let expected: HashSet<String> = model.values.keys().cloned().collect();
        prop_assert_eq!(keys, expected);
    }

    // Hit and miss counters account for every `get`.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut cache = new_cache(TEST_MAX_SIZE, EvictionStrategy::Lru);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => cache.set(key, value, None),
                CacheOp::Get { key } => match cache.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Has { key } => {
                    cache.has(&key);
                }
                CacheOp::Remove { key } => {
                    cache.remove(&key);
                }
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.size, cache.len(), "Size mismatch");
        prop_assert_eq!(stats.max_size, TEST_MAX_SIZE);
    }

    // Storing a value and reading it back before expiry returns it unchanged.
    #[test]
    fn prop_set_then_get(key in key_strategy(), value in value_strategy()) {
        let mut cache = new_cache(TEST_MAX_SIZE, EvictionStrategy::Lru);

        cache.set(key.as_str(), value.clone(), None);

        prop_assert_eq!(cache.get(&key), Some(&value));
        prop_assert!(cache.has(&key));
    }

    // Overwriting keeps a single entry holding the latest value.
    #[test]
    fn prop_overwrite_semantics(
        strategy in eviction_strategy(),
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut cache = new_cache(1, strategy);

        cache.set(key.as_str(), value1, None);
        cache.set(key.as_str(), value2.clone(), None);

        prop_assert_eq!(cache.get(&key), Some(&value2));
        prop_assert_eq!(cache.len(), 1);
        prop_assert_eq!(cache.stats().evictions, 0);
    }

    // Composite keys round through the invalidation helper: a pattern over
    // one prefix never touches keys under another.
    #[test]
    fn prop_invalidate_by_prefix(
        ids in prop::collection::hash_set("[0-9]{1,4}", 1..20),
        other in prop::collection::hash_set("[0-9]{1,4}", 0..20)
    ) {
        let mut cache = new_cache(TEST_MAX_SIZE, EvictionStrategy::Lru);
        for id in &ids {
            cache.set(create_cache_key("users", [id.as_str(), "profile"]), id.clone(), None);
        }
        for id in &other {
            cache.set(create_cache_key("posts", [id.as_str()]), id.clone(), None);
        }

        let removed = invalidate_cache_pattern(&mut cache, "users:[0-9]+:profile").unwrap();

        prop_assert_eq!(removed, ids.len());
        prop_assert_eq!(cache.len(), other.len());
        prop_assert!(cache.keys().iter().all(|k| k.starts_with("posts:")));
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // Entries vanish once their TTL elapses, while longer-lived ones remain.
    #[test]
    fn prop_ttl_expiration_behavior(
        key in key_strategy(),
        value in value_strategy()
    ) {
        let mut cache = new_cache(TEST_MAX_SIZE, EvictionStrategy::Lru);

        cache.set(key.as_str(), value.clone(), Some(Duration::from_millis(100)));
        cache.set("survivor", value.clone(), Some(Duration::from_secs(10)));

        prop_assert_eq!(cache.get(&key), Some(&value));

        sleep(Duration::from_millis(150));

        prop_assert_eq!(cache.stats().expired, 1);
        prop_assert_eq!(cache.get(&key), None);
        prop_assert!(!cache.has(&key));
        prop_assert_eq!(cache.get("survivor"), Some(&value));
    }
}
