use xg_store::prelude::*;

fn tabular_key() -> ArtifactKey {
    ArtifactKey::new("runs/alpha", "results", "csv")
}

fn exercise_backend(mut store: impl ResourceManager) {
    let key = tabular_key();
    assert!(!store.contains(&key));
    assert!(matches!(store.get(&key), Err(StoreError::NotFound(_))));

    let rows = vec![vec!["x".to_string(), "y".to_string()], vec!["0".to_string(), "1.5".to_string()], vec!["1".to_string(), "2.5".to_string()]];
    store.save_at(&key, Content::Tabular(rows.clone())).unwrap();
    assert!(store.contains(&key));

    let got = store.get(&key).unwrap();
    assert_eq!(got, Content::Tabular(rows.clone()));

    assert_eq!(store.head(&key, 2).unwrap(), rows[..2].to_vec());
    assert_eq!(store.tail(&key, 1).unwrap(), rows[2..].to_vec());

    let raw = store.head_raw(&key, 4).unwrap();
    assert_eq!(raw, b"x,y\n".to_vec());

    let items = store.iterate_over(&key).unwrap();
    assert_eq!(items.len(), 3);
    assert!(matches!(&items[0], Item::Row(r) if r == &rows[0]));

    let bytes_key = ArtifactKey::new("runs/alpha", "plot", "png");
    store.save_at(&bytes_key, Content::Bytes(vec![1, 2, 3, 4])).unwrap();
    assert!(matches!(store.head(&bytes_key, 1), Err(StoreError::NotTabular(_))));
    assert_eq!(store.head_raw(&bytes_key, 2).unwrap(), vec![1, 2]);
    assert_eq!(store.tail_raw(&bytes_key, 2).unwrap(), vec![3, 4]);

    let mut all = store.get_all(Some("runs/alpha"), None).unwrap();
    all.sort();
    assert_eq!(all, {
        let mut v = vec![key.clone(), bytes_key.clone()];
        v.sort();
        v
    });
    assert_eq!(store.get_all(Some("runs/alpha"), Some("png")).unwrap(), vec![bytes_key.clone()]);
    assert_eq!(store.get_all(Some("elsewhere"), None).unwrap(), Vec::new());

    store.remove(&key).unwrap();
    assert!(!store.contains(&key));
    assert!(matches!(store.remove(&key), Err(StoreError::NotFound(_))));
}

#[test]
fn in_memory_store_honors_the_resource_manager_contract() {
    exercise_backend(InMemoryStore::new());
}

#[test]
fn local_store_honors_the_resource_manager_contract() {
    let dir = tempfile::tempdir().unwrap();
    exercise_backend(LocalStore::new(dir.path().to_path_buf()));
}

#[test]
fn local_store_round_trips_cells_containing_commas_and_quotes() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = LocalStore::new(dir.path().to_path_buf());
    let key = ArtifactKey::new("", "weird", "csv");
    let rows = vec![vec!["a,b".to_string(), "say \"hi\"".to_string()]];
    store.save_at(&key, Content::Tabular(rows.clone())).unwrap();
    assert_eq!(store.get(&key).unwrap(), Content::Tabular(rows));
}

#[test]
fn local_store_survives_overwriting_an_existing_key() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = LocalStore::new(dir.path().to_path_buf());
    let key = ArtifactKey::new("", "f", "bin");
    store.save_at(&key, Content::Bytes(vec![1])).unwrap();
    store.save_at(&key, Content::Bytes(vec![2, 3])).unwrap();
    assert_eq!(store.get(&key).unwrap(), Content::Bytes(vec![2, 3]));
}
