// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Smoke Test
//!
//! Writes one value of every shape and prints what reads back. The backend is chosen from the
//! environment: set `CACHE_BACKEND=redis` and `REDIS_SERVER` (with the `redis` feature enabled)
//! to run against a server, otherwise an in-memory map is used.

use std::time::{SystemTime, UNIX_EPOCH};

use stowage::{BackendConfig, Cache};

#[tokio::main]
async fn main() -> Result<(), stowage::Error> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cache = Cache::init(&BackendConfig::from_env()?).await?;

    let millis = SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_millis());
    cache.set("test2", format!("456{millis}")).await?;
    cache.set_json("test3", &serde_json::json!({ "a": 1, "b": 2, "c": 3 })).await?;
    cache.set_hash("test4", [("a", 1), ("b", 2), ("c", 3)]).await?;

    // Duplicates collapse in the set but not in the list
    for value in (1..=5).chain([1, 1, 1, 1]) {
        cache.push_to_set("test5", value).await?;
        cache.push_to_list("test6", value).await?;
    }

    println!("test2 {:?}", cache.get("test2").await?);
    println!("test3 {:?}", cache.get_json::<serde_json::Value>("test3").await?);
    println!("test4 {:?}", cache.get_hash("test4").await?);
    println!("test5 {:?}", cache.get_set("test5").await?);
    println!("test6 {:?}", cache.get_list("test6").await?);

    Ok(())
}
