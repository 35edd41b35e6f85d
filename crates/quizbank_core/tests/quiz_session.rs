mod common;

use common::sample_bank;
use quizbank_core::service::quiz_session::QuestionSource;
use quizbank_core::{
    ManualClock, MemoryKeyValueStore, QuestionId, QuizConfig, QuizEntry, QuizHandoff, QuizId,
    QuizSession, ResponseEntry, ResponseStore,
};

fn ids(session: &QuizSession) -> Vec<&str> {
    session.questions().iter().map(|q| q.id.as_str()).collect()
}

#[test]
fn saved_responses_take_precedence_over_stored_ids() {
    let bank = sample_bank();
    let store = MemoryKeyValueStore::new();
    let responses = ResponseStore::new(&store);
    let quiz_id = responses
        .create_quiz(QuizEntry {
            questions: vec![QuestionId::from(1), QuestionId::from(2)],
            responses: vec![ResponseEntry::new(3, "networks"), ResponseEntry::new(4, "")],
            ..QuizEntry::default()
        })
        .unwrap();

    let session =
        QuizSession::open(quiz_id, &bank, &responses, &QuizHandoff::new(&store)).unwrap();

    assert_eq!(session.source(), QuestionSource::SavedResponses);
    assert_eq!(ids(&session), ["3", "4"]);
    assert_eq!(session.answers(), ["networks", ""]);
}

#[test]
fn dropped_rows_take_their_saved_answers_with_them() {
    let bank = sample_bank();
    let store = MemoryKeyValueStore::new();
    let responses = ResponseStore::new(&store);
    let quiz_id = responses
        .create_quiz(QuizEntry {
            responses: vec![
                ResponseEntry::new(999, "orphan"),
                ResponseEntry::new(2, "kept"),
            ],
            ..QuizEntry::default()
        })
        .unwrap();

    let session =
        QuizSession::open(quiz_id, &bank, &responses, &QuizHandoff::new(&store)).unwrap();

    assert_eq!(ids(&session), ["2"]);
    assert_eq!(session.answers(), ["kept"]);
}

#[test]
fn stored_ids_resolve_in_quiz_order_and_drop_missing_rows() {
    let bank = sample_bank();
    let store = MemoryKeyValueStore::new();
    let responses = ResponseStore::new(&store);
    let quiz_id = responses
        .create_quiz(QuizEntry {
            questions: vec![
                QuestionId::from(6),
                QuestionId::from(999),
                QuestionId::from("P1-extra"),
            ],
            config: Some(QuizConfig {
                num_questions: 3,
                ..QuizConfig::default()
            }),
            ..QuizEntry::default()
        })
        .unwrap();

    let session =
        QuizSession::open(quiz_id, &bank, &responses, &QuizHandoff::new(&store)).unwrap();

    assert_eq!(session.source(), QuestionSource::StoredQuestions);
    assert_eq!(ids(&session), ["6", "P1-extra"]);
    assert_eq!(session.answers(), ["", ""]);
    assert_eq!(session.config().map(|c| c.num_questions), Some(3));
    assert_eq!(session.last_save(), None);
}

#[test]
fn handoff_is_used_once_when_the_entry_is_empty() {
    let bank = sample_bank();
    let store = MemoryKeyValueStore::new();
    let session_store = MemoryKeyValueStore::new();
    let responses = ResponseStore::new(&store);
    let handoff = QuizHandoff::new(&session_store);
    let config = QuizConfig {
        paper: "3".to_string(),
        num_questions: 2,
        ..QuizConfig::default()
    };
    handoff.stash(&bank[5..7], &config).unwrap();

    let quiz_id = QuizId::new(5).unwrap();
    let session = QuizSession::open(quiz_id, &bank, &responses, &handoff).unwrap();
    assert_eq!(session.source(), QuestionSource::Handoff);
    assert_eq!(ids(&session), ["6", "7"]);
    assert_eq!(session.config(), Some(&config));

    assert!(QuizSession::open(quiz_id, &bank, &responses, &handoff).is_none());
}

#[test]
fn unknown_quiz_without_handoff_has_nothing_to_show() {
    let bank = sample_bank();
    let store = MemoryKeyValueStore::new();
    let responses = ResponseStore::new(&store);

    let opened = QuizSession::open(
        QuizId::new(12).unwrap(),
        &bank,
        &responses,
        &QuizHandoff::new(&store),
    );
    assert!(opened.is_none());
}

#[test]
fn save_writes_answers_aligned_with_questions() {
    let bank = sample_bank();
    let store = MemoryKeyValueStore::new();
    let clock = ManualClock::new(1_000);
    let responses = ResponseStore::with_clock(&store, &clock);
    let quiz_id = responses
        .create_quiz(QuizEntry {
            questions: vec![QuestionId::from(1), QuestionId::from(4)],
            ..QuizEntry::default()
        })
        .unwrap();

    let mut session =
        QuizSession::open(quiz_id, &bank, &responses, &QuizHandoff::new(&store)).unwrap();
    assert!(session.set_answer(1, "ranking"));
    assert!(!session.set_answer(2, "ignored"));

    clock.set(2_500);
    assert_eq!(session.save(&responses).unwrap(), 2_500);
    assert_eq!(session.last_save(), Some(2_500));

    let entry = responses.quiz(quiz_id).unwrap();
    assert_eq!(
        entry.responses,
        [ResponseEntry::new(1, ""), ResponseEntry::new(4, "ranking")]
    );
    assert_eq!(entry.questions, [QuestionId::from(1), QuestionId::from(4)]);

    let reopened =
        QuizSession::open(quiz_id, &bank, &responses, &QuizHandoff::new(&store)).unwrap();
    assert_eq!(reopened.source(), QuestionSource::SavedResponses);
    assert_eq!(reopened.answers(), ["", "ranking"]);
    assert_eq!(reopened.last_save(), Some(2_500));
}
