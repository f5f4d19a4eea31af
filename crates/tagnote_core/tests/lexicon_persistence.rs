use tagnote_core::db::open_db_in_memory;
use tagnote_core::{LexiconPersistence, LexiconStore, SqliteLexiconRepository, Tag, TagState};

#[test]
fn save_and_load_round_trips_the_full_tag_set() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteLexiconRepository::new(conn);

    let mut work = Tag::new("仕事");
    work.record_use(1_000);
    work.record_use(2_000);
    let mut shopping = Tag::new("買い物");
    shopping.record_use(3_000);

    repo.save(&[work.clone(), shopping.clone()]).unwrap();

    let loaded = repo.load().unwrap();
    assert_eq!(loaded.len(), 2);

    let loaded_work = loaded.iter().find(|tag| tag.name == "仕事").unwrap();
    assert_eq!(loaded_work.uuid, work.uuid);
    assert_eq!(loaded_work.usage_count, 2);
    assert_eq!(loaded_work.last_used_at, Some(2_000));
    assert_eq!(loaded_work.state, TagState::Adopted);
}

#[test]
fn save_replaces_the_previous_set() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteLexiconRepository::new(conn);

    let mut stale = Tag::new("旅行");
    stale.record_use(1_000);
    repo.save(&[stale]).unwrap();

    let mut fresh = Tag::new("勉強");
    fresh.record_use(2_000);
    repo.save(&[fresh]).unwrap();

    let loaded = repo.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].name, "勉強");
}

#[test]
fn save_rejects_invalid_tag_names() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteLexiconRepository::new(conn);

    let invalid = Tag::new("   ");
    assert!(repo.save(&[invalid]).is_err());

    // Nothing may be persisted after a rejected write.
    assert!(repo.load().unwrap().is_empty());
}

#[test]
fn store_adoptions_survive_a_reopen_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lexicon.db");

    {
        let conn = tagnote_core::db::open_db(&path).unwrap();
        let mut store = LexiconStore::open(Box::new(SqliteLexiconRepository::new(conn)));
        store.record_adoption("仕事").unwrap();
        store.record_adoption("仕事").unwrap();
        store.record_adoption("買い物").unwrap();
    }

    let conn = tagnote_core::db::open_db(&path).unwrap();
    let store = LexiconStore::open(Box::new(SqliteLexiconRepository::new(conn)));
    let ranked = store.rank();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].name, "仕事");
    assert_eq!(ranked[0].usage_count, 2);
    assert_eq!(ranked[1].name, "買い物");
}
