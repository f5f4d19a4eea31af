use std::sync::Arc;
use std::time::Duration;
use tagnote_core::db::open_db_in_memory;
use tagnote_core::{
    EngineConfig, LexiconStore, NoopLinguisticAnalyzer, SqliteLexiconRepository, SuggestionEngine,
    TagPolicy, TagState, TemplatePolicy,
};

fn engine_with(tag_policy: TagPolicy) -> SuggestionEngine {
    let conn = open_db_in_memory().unwrap();
    let store = LexiconStore::open(Box::new(SqliteLexiconRepository::new(conn)));
    SuggestionEngine::new(
        store,
        Arc::new(NoopLinguisticAnalyzer),
        EngineConfig {
            tag_policy,
            template_policy: TemplatePolicy::Off,
            ..EngineConfig::default()
        },
    )
}

async fn settle() {
    tokio::task::yield_now().await;
    tokio::time::sleep(Duration::from_millis(500)).await;
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn adopting_a_suggestion_moves_it_onto_the_memo() {
    let engine = engine_with(TagPolicy::SuggestOnly);

    engine.on_text_changed("買い物");
    settle().await;
    assert!(engine
        .current_tag_suggestions()
        .iter()
        .any(|tag| tag.name == "買い物"));

    engine.adopt("買い物").unwrap();

    let adopted = engine.adopted_tags();
    assert_eq!(adopted.len(), 1);
    assert_eq!(adopted[0].name, "買い物");
    assert_eq!(adopted[0].state, TagState::Adopted);
    assert!(engine
        .current_tag_suggestions()
        .iter()
        .all(|tag| tag.name != "買い物"));
}

#[tokio::test(start_paused = true)]
async fn double_adoption_keeps_one_memo_entry() {
    let engine = engine_with(TagPolicy::SuggestOnly);

    engine.adopt("仕事").unwrap();
    engine.adopt("仕事").unwrap();

    // One record on the memo; usage accounting is covered by the lexicon
    // store tests (two increments, same id).
    assert_eq!(engine.adopted_tags().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn adopted_names_are_not_resuggested() {
    let engine = engine_with(TagPolicy::SuggestOnly);

    engine.adopt("買い物").unwrap();
    engine.on_text_changed("牛乳を買う");
    settle().await;

    assert!(engine
        .current_tag_suggestions()
        .iter()
        .all(|tag| tag.name != "買い物"));
}

#[tokio::test(start_paused = true)]
async fn dismissing_an_adopted_tag_removes_it_without_usage_rollback() {
    let engine = engine_with(TagPolicy::SuggestOnly);

    engine.adopt("仕事").unwrap();
    engine.dismiss("仕事");

    assert!(engine.adopted_tags().is_empty());

    // The usage increment from adoption must survive the removal: the
    // lexicon still ranks the tag first when scoring falls back to it.
    engine.on_text_changed("");
    engine.on_text_changed("あれこれ色々と思うところ");
    settle().await;
    assert!(engine
        .current_tag_suggestions()
        .iter()
        .any(|tag| tag.name == "仕事" && tag.usage_count == 1));
}

#[tokio::test(start_paused = true)]
async fn auto_adopt_policy_writes_directly_to_the_memo() {
    let engine = engine_with(TagPolicy::AutoAdopt);

    engine.on_text_changed("買い物");
    settle().await;

    let adopted = engine.adopted_tags();
    assert!(adopted.iter().any(|tag| tag.name == "買い物"));
    assert!(
        engine.current_tag_suggestions().is_empty(),
        "auto-adopt bypasses the suggestion list"
    );

    // Re-evaluating the same text must not duplicate memo entries.
    engine.on_text_changed("買い物 ");
    settle().await;
    let count = engine
        .adopted_tags()
        .iter()
        .filter(|tag| tag.name == "買い物")
        .count();
    assert_eq!(count, 1);
}

#[tokio::test(start_paused = true)]
async fn persistence_write_failure_keeps_in_memory_adoption() {
    use tagnote_core::{LexiconError, LexiconPersistence, LexiconResult, Tag};

    struct WriteFailingPersistence;

    impl LexiconPersistence for WriteFailingPersistence {
        fn load(&self) -> LexiconResult<Vec<Tag>> {
            Ok(Vec::new())
        }

        fn save(&mut self, _tags: &[Tag]) -> LexiconResult<()> {
            Err(LexiconError::InvalidData("disk full".to_string()))
        }
    }

    let store = LexiconStore::open(Box::new(WriteFailingPersistence));
    let engine = SuggestionEngine::new(
        store,
        Arc::new(NoopLinguisticAnalyzer),
        EngineConfig {
            template_policy: TemplatePolicy::Off,
            ..EngineConfig::default()
        },
    );

    // The failure is surfaced, but the adoption still lands on the memo.
    assert!(engine.adopt("仕事").is_err());
    assert_eq!(engine.adopted_tags().len(), 1);
}
