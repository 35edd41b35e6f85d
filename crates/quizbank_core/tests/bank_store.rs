mod common;

use quizbank_core::{
    BankStore, BankUploadError, BankValidationError, KeyValueStore, MemoryKeyValueStore,
    QuestionId, TagGroup,
};

#[test]
fn upload_then_load_preserves_order_and_normalizes_fields() {
    let store = MemoryKeyValueStore::new();
    let bank = BankStore::new(&store);

    let count = bank.upload(common::SAMPLE_BANK.as_bytes()).unwrap();
    assert_eq!(count, 8);

    let loaded = bank.load();
    let ids: Vec<&str> = loaded.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4", "5", "6", "7", "P1-extra"]);

    // Numeric and string PaperIDs compare the same after parsing.
    assert_eq!(loaded[0].paper_id.as_deref(), Some("1"));
    assert_eq!(loaded[3].paper_id.as_deref(), Some("2"));

    // Absent tag groups read as empty lists.
    assert!(loaded[7].tags(TagGroup::Concept).is_empty());
    assert_eq!(loaded[7].tags(TagGroup::Content), ["media"]);
}

#[test]
fn upload_missing_required_field_keeps_previous_bank() {
    let store = MemoryKeyValueStore::new();
    let bank = BankStore::new(&store);
    bank.upload(common::SAMPLE_BANK.as_bytes()).unwrap();

    let err = bank
        .upload(br#"[{"ID": 9, "QuestionText": "No answer"}]"#)
        .unwrap_err();
    match err {
        BankUploadError::Validation(BankValidationError::MissingField { index, field }) => {
            assert_eq!(index, 0);
            assert_eq!(field, "AnswerText");
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(bank.load().len(), 8);
}

#[test]
fn upload_rejects_non_array_and_bad_tag_shapes() {
    let store = MemoryKeyValueStore::new();
    let bank = BankStore::new(&store);

    assert!(matches!(
        bank.upload(br#"{"ID": 1}"#),
        Err(BankUploadError::Validation(BankValidationError::NotAnArray))
    ));
    assert!(matches!(
        bank.upload(b"not json"),
        Err(BankUploadError::Validation(BankValidationError::InvalidJson(_)))
    ));
    assert!(matches!(
        bank.upload(br#"[{"ID": 1, "QuestionText": "a", "AnswerText": "b", "ContentTags": "data"}]"#),
        Err(BankUploadError::Validation(BankValidationError::TagFieldNotArray { index: 0, .. }))
    ));
    assert!(bank.load().is_empty());
}

#[test]
fn upload_rejects_duplicate_ids_across_json_types() {
    let store = MemoryKeyValueStore::new();
    let bank = BankStore::new(&store);

    let err = bank
        .upload(
            br#"[
                {"ID": 7, "QuestionText": "a", "AnswerText": "a"},
                {"ID": "7", "QuestionText": "b", "AnswerText": "b"}
            ]"#,
        )
        .unwrap_err();
    match err {
        BankUploadError::Validation(BankValidationError::DuplicateId { index, id }) => {
            assert_eq!(index, 1);
            assert_eq!(id, "7");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn nested_optional_values_do_not_reject_the_upload() {
    let store = MemoryKeyValueStore::new();
    let bank = BankStore::new(&store);

    let count = bank
        .upload(
            br#"[{"ID": 1, "QuestionText": "Q", "AnswerText": "A",
                 "Title": {}, "Stimulus": ["part one", "part two"], "Marks": {"value": 4},
                 "CommandTerm": "Define"}]"#,
        )
        .unwrap();
    assert_eq!(count, 1);

    let loaded = bank.load();
    assert_eq!(loaded[0].title, None);
    assert_eq!(loaded[0].stimulus, None);
    assert_eq!(loaded[0].marks, None);
    assert_eq!(loaded[0].command_term.as_deref(), Some("Define"));
}

#[test]
fn nested_question_text_is_still_rejected() {
    let store = MemoryKeyValueStore::new();
    let bank = BankStore::new(&store);

    let err = bank
        .upload(br#"[{"ID": 1, "QuestionText": {"en": "Q"}, "AnswerText": "A"}]"#)
        .unwrap_err();
    assert!(matches!(
        err,
        BankUploadError::Validation(BankValidationError::InvalidRecord { index: 0, .. })
    ));
    assert!(bank.load().is_empty());
}

#[test]
fn empty_array_is_a_valid_bank() {
    let store = MemoryKeyValueStore::new();
    let bank = BankStore::new(&store);

    assert_eq!(bank.upload(b"[]").unwrap(), 0);
    assert!(bank.load().is_empty());
}

#[test]
fn corrupt_stored_bank_reads_as_empty() {
    let store = MemoryKeyValueStore::new();
    store
        .set("digitalSocietyQuestionBank", "{not valid json")
        .unwrap();

    assert!(BankStore::new(&store).load().is_empty());
}

#[test]
fn clear_removes_the_bank() {
    let store = MemoryKeyValueStore::new();
    let bank = BankStore::new(&store);
    bank.upload(common::SAMPLE_BANK.as_bytes()).unwrap();

    bank.clear().unwrap();

    assert!(bank.load().is_empty());
    assert!(!store.contains_key("digitalSocietyQuestionBank"));
}

#[test]
fn numeric_ids_round_trip_as_numbers() {
    let store = MemoryKeyValueStore::new();
    let bank = BankStore::new(&store);
    bank.upload(common::SAMPLE_BANK.as_bytes()).unwrap();

    let raw = store.get("digitalSocietyQuestionBank").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["ID"], serde_json::json!(1));
    assert_eq!(value[7]["ID"], serde_json::json!("P1-extra"));
    assert_eq!(bank.load()[0].id, QuestionId::from(1));
}
