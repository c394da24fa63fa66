// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for `Cache` over the in-memory backend.

use std::collections::{HashMap, HashSet};

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::{Deserialize, Serialize};
use stowage::{BackendConfig, Cache, Error, InMemoryBackend, Scalar, ValueKind};
use tracing_test::traced_test;

type TestResult = Result<(), Error>;

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    futures::executor::block_on(f)
}

fn strings<const N: usize>(values: [&str; N]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    logins: u32,
    tags: Vec<String>,
}

#[test]
fn end_to_end() -> TestResult {
    block_on(async {
        let cache = Cache::memory();

        cache.set("x", "v1").await?;
        assert_eq!(cache.get("x").await?.as_deref(), Some("v1"));

        cache.set_json("y", &serde_json::json!({ "a": 1 })).await?;
        assert_eq!(
            cache.get_json::<serde_json::Value>("y").await?,
            Some(serde_json::json!({ "a": 1 }))
        );

        cache.push_to_set("z", 1).await?;
        cache.push_to_set("z", 1).await?;
        cache.push_to_set("z", 2).await?;
        assert_eq!(cache.get_set("z").await?, strings(["1", "2"]).into_iter().collect::<HashSet<_>>());

        cache.push_to_list("w", 1).await?;
        cache.push_to_list("w", 2).await?;
        assert_eq!(cache.get_list("w").await?, strings(["1", "2"]));
        Ok(())
    })
}

#[rstest]
#[case::text(Scalar::from("hello"), "hello")]
#[case::empty(Scalar::from(""), "")]
#[case::integer(Scalar::from(42), "42")]
#[case::negative(Scalar::from(-7_i64), "-7")]
#[case::float(Scalar::from(2.5), "2.5")]
#[case::boolean(Scalar::from(false), "false")]
fn scalars_read_back_as_their_string_form(#[case] value: Scalar, #[case] expected: &str) -> TestResult {
    block_on(async {
        let cache = Cache::memory();
        cache.set("k", value).await?;

        assert_eq!(cache.get("k").await?.as_deref(), Some(expected));
        Ok(())
    })
}

#[test]
fn get_json_is_absent_for_missing_and_malformed() -> TestResult {
    block_on(async {
        let cache = Cache::memory();
        assert_eq!(cache.get_json::<serde_json::Value>("never").await?, None);

        cache.set("broken", "{\"a\":").await?;
        assert_eq!(cache.get_json::<serde_json::Value>("broken").await?, None);

        cache.set_json("profile", &serde_json::json!({ "name": 1 })).await?;
        assert_eq!(cache.get_json::<Profile>("profile").await?, None);
        Ok(())
    })
}

#[test]
fn typed_json_round_trips() -> TestResult {
    block_on(async {
        let cache = Cache::memory();
        let profile = Profile {
            name: "ada".to_owned(),
            logins: 3,
            tags: strings(["admin", "beta"]),
        };

        cache.set_json("profile", &profile).await?;

        assert_eq!(cache.get_json::<Profile>("profile").await?, Some(profile));
        Ok(())
    })
}

#[traced_test]
#[test]
fn unencodable_json_is_skipped_and_logged() -> TestResult {
    block_on(async {
        let cache = Cache::memory();
        cache.set("k", "before").await?;

        cache.set_json("k", &HashMap::from([((1, 2), 3)])).await?;

        assert_eq!(cache.get("k").await?.as_deref(), Some("before"));
        Ok(())
    })?;

    assert!(logs_contain("skipping write of a value that cannot be encoded as JSON"));
    Ok(())
}

#[traced_test]
#[test]
fn malformed_json_is_logged() -> TestResult {
    block_on(async {
        let cache = Cache::memory();
        cache.set("k", "not json").await?;
        assert_eq!(cache.get_json::<u32>("k").await?, None);
        Ok(())
    })?;

    assert!(logs_contain("stored value is not valid JSON for the requested type"));
    Ok(())
}

#[traced_test]
#[test]
fn init_logs_the_backend() -> TestResult {
    block_on(async {
        let cache = Cache::init(&BackendConfig::Memory).await?;
        assert_eq!(cache.get("k").await?, None);
        Ok(())
    })?;

    assert!(logs_contain("initializing in-memory cache"));
    Ok(())
}

#[test]
fn list_preserves_insertion_order() -> TestResult {
    block_on(async {
        let cache = Cache::memory();
        for value in ["c", "a", "b", "a"] {
            cache.push_to_list("l", value).await?;
        }

        assert_eq!(cache.get_list("l").await?, strings(["c", "a", "b", "a"]));
        assert!(cache.get_list("missing").await?.is_empty());
        Ok(())
    })
}

#[test]
fn set_push_is_idempotent() -> TestResult {
    block_on(async {
        let once = Cache::memory();
        let twice = Cache::memory();

        once.push_to_set("s", "v").await?;
        twice.push_to_set("s", "v").await?;
        twice.push_to_set("s", "v").await?;

        assert_eq!(once.get_set("s").await?, twice.get_set("s").await?);
        assert!(twice.is_set_member("s", "v").await?);
        assert!(!twice.is_set_member("s", "w").await?);
        assert!(!twice.is_set_member("missing", "v").await?);
        Ok(())
    })
}

#[test]
fn hash_field_lifecycle() -> TestResult {
    block_on(async {
        let cache = Cache::memory();

        cache.set_hash_field("h", "f", 1).await?;
        assert!(cache.hash_field_exists("h", "f").await?);

        cache.delete_hash_field("h", "f").await?;
        assert!(!cache.hash_field_exists("h", "f").await?);
        assert!(cache.get_hash("h").await?.is_empty());
        Ok(())
    })
}

#[test]
fn set_hash_merges_fields() -> TestResult {
    block_on(async {
        let cache = Cache::memory();

        cache.set_hash("h", [("a", 1), ("b", 2)]).await?;
        cache.set_hash("h", [("b", 20), ("c", 30)]).await?;
        cache.set_hash("h", Vec::<(String, String)>::new()).await?;

        let expected = HashMap::from([
            ("a".to_owned(), "1".to_owned()),
            ("b".to_owned(), "20".to_owned()),
            ("c".to_owned(), "30".to_owned()),
        ]);
        assert_eq!(cache.get_hash("h").await?, expected);
        Ok(())
    })
}

#[test]
fn cross_shape_access_is_rejected() -> TestResult {
    block_on(async {
        let cache = Cache::memory();
        cache.push_to_list("l", "v").await?;

        let error = cache.push_to_set("l", "v").await.unwrap_err();
        assert!(matches!(
            error,
            Error::TypeMismatch {
                ref key,
                expected: ValueKind::Set
            } if key == "l"
        ));

        let error = cache.get_json::<serde_json::Value>("l").await.unwrap_err();
        assert!(error.is_type_mismatch());

        assert_eq!(cache.get_list("l").await?, strings(["v"]));
        Ok(())
    })
}

#[test]
fn caches_over_one_backend_share_state() -> TestResult {
    block_on(async {
        let backend = InMemoryBackend::builder().name("shared").build();
        let first = Cache::new(backend.clone());
        let second = Cache::new(backend.clone());

        first.set("k", "v").await?;

        assert_eq!(second.get("k").await?.as_deref(), Some("v"));
        assert_eq!(backend.len(), 1);
        Ok(())
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_clones_lose_no_writes() -> TestResult {
    let cache = Cache::memory();

    let tasks: Vec<_> = (0_u32..8)
        .map(|task| {
            let cache = cache.clone();
            tokio::spawn(async move {
                for i in 0..25 {
                    cache.push_to_set("members", task * 100 + i).await?;
                    cache.push_to_list("log", task).await?;
                }
                Ok::<_, Error>(())
            })
        })
        .collect();

    for task in tasks {
        task.await.expect("task panicked")?;
    }

    assert_eq!(cache.get_set("members").await?.len(), 200);
    assert_eq!(cache.get_list("log").await?.len(), 200);
    Ok(())
}
