use paged_corpus::corpus::{ChangeSet, Corpus, CorpusError};
use paged_corpus::document::{Document, DocumentId, Page, PageId};
use paged_corpus::index::CorpusIndex;
use paged_corpus::relevance::UnicodeTokenizer;
use paged_corpus::search::SearchConfig;

fn make_doc(id: i64, name: &str, pages: &[&str]) -> Document {
    let pages = pages
        .iter()
        .enumerate()
        .map(|(i, content)| {
            let page_id = PageId::new(id * 10 + i as i64);
            Page::new(page_id, DocumentId::new(id), i as u32 + 1, *content)
        })
        .collect();
    Document::new(DocumentId::new(id), name, pages).unwrap()
}

fn library() -> CorpusIndex {
    let mut index = CorpusIndex::new();
    index
        .add_document(make_doc(1, "fox.txt", &["The quick brown fox", "jumps over the lazy dog"]))
        .unwrap();
    index
        .add_document(make_doc(2, "java.txt", &["Java programming is fun and challenging"]))
        .unwrap();
    index
        .add_document(make_doc(
            3,
            "fatiha.txt",
            &["بسم الله الرحمن الرحيم", "الحمد لله رب العالمين"],
        ))
        .unwrap();
    index
}

#[test]
fn index_keeps_search_scoring_and_hashes_aligned() {
    let mut index = library();
    let baseline = index.manifest().unwrap();

    assert_eq!(index.search_keyword(Some("LAZY")), vec!["fox.txt"]);
    assert_eq!(index.search_keyword(Some("الرحمن")), vec!["fatiha.txt"]);
    assert!(index.search_keyword(Some("ja")).is_empty());
    assert!(index.score(Some("fox")) > 0.0);
    assert_eq!(index.score(None), 0.0);

    let before = index.score(Some("fox"));
    let new_hash = index
        .update_page(DocumentId::new(2), 1, "Rust programming, no fox here")
        .unwrap();
    assert_eq!(index.corpus().get(DocumentId::new(2)).unwrap().content_hash(), &new_hash);
    assert!(index.score(Some("fox")) < before, "fox became more common");
    assert_eq!(index.search_keyword(Some("fox")), vec!["fox.txt", "java.txt"]);

    let ranked = index.rank("fox");
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].id, DocumentId::new(1));

    assert!(index.remove_document(DocumentId::new(1)).is_some());
    assert!(index.remove_document(DocumentId::new(1)).is_none());
    assert_eq!(index.document_count(), 2);
    assert_eq!(index.document_frequency("quick"), 0);

    let changes = index.changes_since(&baseline).unwrap();
    assert_eq!(
        changes,
        ChangeSet {
            added: vec![],
            removed: vec![DocumentId::new(1)],
            modified: vec![DocumentId::new(2)],
        }
    );
}

#[test]
fn duplicate_add_leaves_statistics_untouched() {
    let mut index = library();
    let count = index.document_count();

    let err = index
        .add_document(make_doc(2, "other.txt", &["completely different words"]))
        .unwrap_err();

    assert!(matches!(err, CorpusError::DuplicateDocument(_)));
    assert_eq!(index.document_count(), count);
    assert_eq!(index.document_frequency("completely"), 0);
    assert_eq!(index.corpus().get(DocumentId::new(2)).unwrap().name(), "java.txt");
}

#[test]
fn index_built_from_existing_corpus_matches_incremental_one() {
    let corpus: Corpus = [
        make_doc(1, "fox.txt", &["The quick brown fox", "jumps over the lazy dog"]),
        make_doc(2, "java.txt", &["Java programming is fun and challenging"]),
        make_doc(3, "fatiha.txt", &["بسم الله الرحمن الرحيم", "الحمد لله رب العالمين"]),
    ]
    .into_iter()
    .collect();

    let rebuilt = CorpusIndex::from_corpus(corpus, UnicodeTokenizer, SearchConfig::v0());
    let incremental = library();

    for query in ["fox", "java fun", "الله", "missing"] {
        assert_eq!(
            rebuilt.score(Some(query)).to_bits(),
            incremental.score(Some(query)).to_bits()
        );
    }
    assert_eq!(
        rebuilt.manifest().unwrap().corpus_hash,
        incremental.manifest().unwrap().corpus_hash
    );
}

#[test]
fn statistics_follow_corpus_membership() {
    let mut index = CorpusIndex::new();
    assert_eq!(index.document_count(), 0);

    index.add_document(make_doc(1, "a.txt", &["alpha beta"])).unwrap();
    index.add_document(make_doc(2, "b.txt", &["beta gamma"])).unwrap();
    assert_eq!(index.document_count(), index.corpus().len());
    assert_eq!(index.document_frequency("beta"), 2);

    index.update_page(DocumentId::new(2), 1, "gamma delta").unwrap();
    assert_eq!(index.document_count(), index.corpus().len());
    assert_eq!(index.document_frequency("beta"), 1);
    assert_eq!(index.document_frequency("delta"), 1);

    let _ = index.add_document(make_doc(1, "dup.txt", &["ghost"]));
    index.remove_document(DocumentId::new(1));
    index.remove_document(DocumentId::new(1));
    assert_eq!(index.document_count(), 1);
    assert_eq!(index.document_count(), index.corpus().len());
    assert_eq!(index.document_frequency("ghost"), 0);
    assert_eq!(index.idf("alpha"), None);
    assert!(index.idf("gamma").is_some());
}

#[test]
fn unknown_page_update_is_rejected() {
    let mut index = library();
    assert!(matches!(
        index.update_page(DocumentId::new(1), 7, "x"),
        Err(CorpusError::Document(_))
    ));
    assert!(matches!(
        index.update_page(DocumentId::new(42), 1, "x"),
        Err(CorpusError::UnknownDocument(_))
    ));
}
