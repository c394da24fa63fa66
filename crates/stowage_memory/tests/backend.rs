// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for `InMemoryBackend`.

use std::collections::{HashMap, HashSet};

use pretty_assertions::assert_eq;
use stowage_backend::{Backend, Error, ValueKind};
use stowage_memory::InMemoryBackend;
use tracing_test::traced_test;

type TestResult = Result<(), Error>;

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    futures::executor::block_on(f)
}

fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}

#[test]
fn new_backend_is_empty() {
    let backend = InMemoryBackend::new();
    assert!(backend.is_empty());
    assert_eq!(backend.len(), 0);
    assert_eq!(backend.name(), None);
}

#[test]
fn get_returns_none_for_missing_key() -> TestResult {
    block_on(async {
        let backend = InMemoryBackend::new();
        assert_eq!(backend.get("missing").await?, None);
        Ok(())
    })
}

#[test]
fn set_overwrites_previous_scalar() -> TestResult {
    block_on(async {
        let backend = InMemoryBackend::new();
        backend.set("x", "v1".to_owned()).await?;
        backend.set("x", "v2".to_owned()).await?;

        assert_eq!(backend.get("x").await?.as_deref(), Some("v2"));
        Ok(())
    })
}

#[test]
fn set_replaces_a_collection() -> TestResult {
    block_on(async {
        let backend = InMemoryBackend::new();
        backend.push_to_list("x", "1".to_owned()).await?;
        backend.set("x", "scalar".to_owned()).await?;

        assert_eq!(backend.get("x").await?.as_deref(), Some("scalar"));
        Ok(())
    })
}

#[test]
fn list_preserves_insertion_order_and_duplicates() -> TestResult {
    block_on(async {
        let backend = InMemoryBackend::new();
        for value in ["1", "2", "3", "1", "1"] {
            backend.push_to_list("w", value.to_owned()).await?;
        }

        assert_eq!(backend.get_list("w").await?, vec!["1", "2", "3", "1", "1"]);
        Ok(())
    })
}

#[test]
fn get_list_returns_empty_for_missing_key() -> TestResult {
    block_on(async {
        let backend = InMemoryBackend::new();
        assert!(backend.get_list("missing").await?.is_empty());
        Ok(())
    })
}

#[test]
fn set_deduplicates_members() -> TestResult {
    block_on(async {
        let backend = InMemoryBackend::new();
        backend.push_to_set("z", "1".to_owned()).await?;
        backend.push_to_set("z", "1".to_owned()).await?;
        backend.push_to_set("z", "2".to_owned()).await?;

        assert_eq!(backend.get_set("z").await?, HashSet::from(["1".to_owned(), "2".to_owned()]));
        assert!(backend.is_set_member("z", "1").await?);
        assert!(backend.is_set_member("z", "2").await?);
        assert!(!backend.is_set_member("z", "3").await?);
        Ok(())
    })
}

#[test]
fn set_reads_are_empty_for_missing_key() -> TestResult {
    block_on(async {
        let backend = InMemoryBackend::new();
        assert!(backend.get_set("missing").await?.is_empty());
        assert!(!backend.is_set_member("missing", "1").await?);
        Ok(())
    })
}

#[test]
fn set_hash_merges_fields() -> TestResult {
    block_on(async {
        let backend = InMemoryBackend::new();
        backend.set_hash("h", fields(&[("a", "1"), ("b", "2")])).await?;
        backend.set_hash("h", fields(&[("b", "20"), ("c", "3")])).await?;

        assert_eq!(backend.get_hash("h").await?, fields(&[("a", "1"), ("b", "20"), ("c", "3")]));
        Ok(())
    })
}

#[test]
fn hash_field_lifecycle() -> TestResult {
    block_on(async {
        let backend = InMemoryBackend::new();

        backend.set_hash_field("h", "f", "v".to_owned()).await?;
        assert!(backend.hash_field_exists("h", "f").await?);

        backend.delete_hash_field("h", "f").await?;
        assert!(!backend.hash_field_exists("h", "f").await?);
        assert!(backend.get_hash("h").await?.is_empty());
        Ok(())
    })
}

#[test]
fn hash_field_with_empty_value_still_exists() -> TestResult {
    block_on(async {
        let backend = InMemoryBackend::new();
        backend.set_hash_field("h", "blank", String::new()).await?;

        assert!(backend.hash_field_exists("h", "blank").await?);
        Ok(())
    })
}

#[test]
fn hash_operations_on_missing_key() -> TestResult {
    block_on(async {
        let backend = InMemoryBackend::new();

        backend.delete_hash_field("missing", "f").await?;
        assert!(!backend.hash_field_exists("missing", "f").await?);
        assert!(backend.get_hash("missing").await?.is_empty());
        assert!(backend.is_empty());
        Ok(())
    })
}

#[test]
fn cross_shape_use_is_rejected() -> TestResult {
    block_on(async {
        let backend = InMemoryBackend::new();
        backend.set("scalar", "1".to_owned()).await?;
        backend.push_to_list("list", "1".to_owned()).await?;
        backend.push_to_set("set", "1".to_owned()).await?;
        backend.set_hash_field("hash", "f", "1".to_owned()).await?;

        let checks = [
            (backend.get("list").await, ValueKind::Scalar),
            (backend.get_list("set").await.map(|_| None), ValueKind::List),
            (backend.push_to_list("hash", "2".to_owned()).await.map(|()| None), ValueKind::List),
            (backend.get_set("scalar").await.map(|_| None), ValueKind::Set),
            (backend.is_set_member("list", "1").await.map(|_| None), ValueKind::Set),
            (backend.push_to_set("hash", "2".to_owned()).await.map(|()| None), ValueKind::Set),
            (backend.get_hash("set").await.map(|_| None), ValueKind::Hash),
            (backend.set_hash_field("list", "f", "2".to_owned()).await.map(|()| None), ValueKind::Hash),
            (backend.delete_hash_field("scalar", "f").await.map(|()| None), ValueKind::Hash),
            (backend.hash_field_exists("set", "f").await.map(|_| None), ValueKind::Hash),
        ];

        for (result, kind) in checks {
            match result {
                Err(Error::TypeMismatch { expected, .. }) => assert_eq!(expected, kind),
                other => panic!("expected a {kind} type mismatch, got {other:?}"),
            }
        }
        Ok(())
    })
}

#[test]
fn clones_share_state() -> TestResult {
    block_on(async {
        let backend = InMemoryBackend::new();
        let clone = backend.clone();

        backend.push_to_set("shared", "a".to_owned()).await?;
        assert!(clone.is_set_member("shared", "a").await?);
        assert_eq!(clone.len(), 1);
        Ok(())
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_pushes_do_not_lose_writes() -> TestResult {
    let backend = InMemoryBackend::new();

    let tasks: Vec<_> = (0..8)
        .map(|task| {
            let backend = backend.clone();
            tokio::spawn(async move {
                for i in 0..100 {
                    backend.push_to_list("list", format!("{task}-{i}")).await?;
                    backend.push_to_set("set", (i % 10).to_string()).await?;
                }
                Ok::<(), Error>(())
            })
        })
        .collect();

    for task in tasks {
        task.await.expect("task panicked")?;
    }

    assert_eq!(backend.get_list("list").await?.len(), 800);
    assert_eq!(backend.get_set("set").await?.len(), 10);
    Ok(())
}

#[traced_test]
#[test]
fn type_mismatch_is_logged() {
    block_on(async {
        let backend = InMemoryBackend::builder().name("logged").build();
        backend.set("k", "v".to_owned()).await.expect("set failed");
        let _ = backend.get_hash("k").await;
    });

    assert!(logs_contain("initializing in-memory cache"));
    assert!(logs_contain("key holds a value of a different shape"));
}
