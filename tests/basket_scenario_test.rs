use fruit_basket::{
    AddOutcome, BasketStore, KeyValueStore, MemoryStorage, RecordingView, ShopSettings,
};

const INCOMPATIBLE: &str = "Strawberries and bananas cannot be combined.";

fn store_with_view() -> (BasketStore<MemoryStorage>, RecordingView) {
    let mut store = BasketStore::new(MemoryStorage::new(), ShopSettings::default());
    let view = RecordingView::new();
    store.subscribe(Box::new(view.clone()));
    (store, view)
}

#[test]
fn test_banana_strawberry_apple_scenario() {
    let (mut store, view) = store_with_view();
    assert!(store.read().is_empty());

    let outcome = store.add("banana").unwrap();
    assert!(outcome.accepted());
    assert_eq!(store.read(), vec!["banana"]);
    assert_eq!(view.indicator(), Some(1));

    let outcome = store.add("strawberry").unwrap();
    assert!(!outcome.accepted());
    assert_eq!(store.read(), vec!["banana"]);
    assert_eq!(view.error().as_deref(), Some(INCOMPATIBLE));

    let outcome = store.add("apple").unwrap();
    assert_eq!(outcome, AddOutcome::Accepted);
    assert_eq!(store.read(), vec!["banana", "apple"]);
    assert_eq!(view.list(), vec!["banana", "apple"]);
    assert!(view.error().is_none());
}

#[test]
fn test_corrupted_slot_reads_empty() {
    let mut storage = MemoryStorage::new();
    storage.set("basket", "{not json").unwrap();
    let mut store = BasketStore::new(storage, ShopSettings::default());

    assert!(store.read().is_empty());

    // 損壞的資料在下一次新增時被覆寫
    assert!(store.add("lemon").unwrap().accepted());
    assert_eq!(store.read(), vec!["lemon"]);
}

#[test]
fn test_clear_from_any_state() {
    let (mut store, view) = store_with_view();
    store.add("apple").unwrap();
    store.add("banana").unwrap();
    store.add("strawberry").unwrap();

    store.clear().unwrap();
    assert!(store.read().is_empty());
    assert!(store.storage().get("basket").unwrap().is_none());
    assert!(view.error().is_none());
    assert_eq!(view.indicator(), None);
    assert!(view.list().is_empty());

    let first = view.snapshot();
    store.clear().unwrap();
    let second = view.snapshot();
    assert_eq!(first.list, second.list);
    assert_eq!(first.indicator, second.indicator);
    assert_eq!(first.error, second.error);
}

#[test]
fn test_add_sequences_never_hold_conflicting_pair() {
    let products = ["apple", "banana", "lemon", "strawberry", "kiwi"];
    let settings = ShopSettings::default();

    for a in products {
        for b in products {
            for c in products {
                for d in products {
                    let mut store = BasketStore::new(MemoryStorage::new(), settings.clone());
                    for candidate in [a, b, c, d] {
                        store.add(candidate).unwrap();
                    }

                    let basket = store.read();
                    for (i, left) in basket.iter().enumerate() {
                        for right in &basket[i + 1..] {
                            let blocked = settings
                                .conflicts
                                .conflicts_of(left)
                                .is_some_and(|set| set.contains(right));
                            assert!(
                                !blocked,
                                "sequence {:?} produced {:?}",
                                [a, b, c, d],
                                basket
                            );
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_rejection_reports_first_conflict() {
    let (mut store, _view) = store_with_view();
    store.add("strawberry").unwrap();

    match store.add("banana").unwrap() {
        AddOutcome::Rejected { conflicting } => assert_eq!(conflicting, "strawberry"),
        AddOutcome::Accepted => panic!("banana should be rejected"),
    }
}
