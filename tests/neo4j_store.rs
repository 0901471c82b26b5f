//! Live tests for the Neo4j knowledge backend
//!
//! These need a running database and are ignored by default:
//!
//! ```sh
//! NEO4J_PASSWORD=... cargo test --test neo4j_store -- --ignored
//! ```
//!
//! `NEO4J_URI` and `NEO4J_USER` default to `bolt://localhost:7687` and `neo4j`.
//! Each test writes into a fresh group so runs never see each other's records.

use leetcode_mcp::knowledge::{GraphStore, Neo4jStore};

async fn live_store() -> Option<Neo4jStore> {
    let Ok(password) = std::env::var("NEO4J_PASSWORD") else {
        eprintln!("NEO4J_PASSWORD not set, skipping");
        return None;
    };
    let uri = std::env::var("NEO4J_URI").unwrap_or_else(|_| "bolt://localhost:7687".to_string());
    let user = std::env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string());

    Some(Neo4jStore::connect(&uri, &user, &password).await.unwrap())
}

fn fresh_group(name: &str) -> String {
    format!("test-{}-{}", name, chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

#[tokio::test]
#[ignore = "requires a Neo4j database (set NEO4J_PASSWORD)"]
async fn test_add_assigns_id_and_timestamp() {
    let Some(store) = live_store().await else { return };
    let group = fresh_group("add");

    let record = store.add("two pointers on sorted input", &group).await.unwrap();
    assert!(!record.id.is_empty());
    assert_eq!(record.group_id, group);
    assert_eq!(record.text, "two pointers on sorted input");
    assert!(record.created_at <= chrono::Utc::now());
}

#[tokio::test]
#[ignore = "requires a Neo4j database (set NEO4J_PASSWORD)"]
async fn test_search_contains_newest_first_limited() {
    let Some(store) = live_store().await else { return };
    let group = fresh_group("search");

    for text in ["DP knapsack", "dp one", "dp two", "dp three"] {
        store.add(text, &group).await.unwrap();
        // created_at has millisecond resolution
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let found = store.search("dp", &group, 2).await.unwrap();
    let texts: Vec<_> = found.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["dp three", "dp two"]);

    let upper = store.search("DP", &group, 10).await.unwrap();
    assert_eq!(upper.len(), 1);
    assert_eq!(upper[0].text, "DP knapsack");
}

#[tokio::test]
#[ignore = "requires a Neo4j database (set NEO4J_PASSWORD)"]
async fn test_search_scoped_to_group() {
    let Some(store) = live_store().await else { return };
    let mine = fresh_group("mine");
    let other = fresh_group("other");

    store.add("union find with path compression", &mine).await.unwrap();
    store.add("union find elsewhere", &other).await.unwrap();

    let found = store.search("union find", &mine, 10).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].group_id, mine);
}
