mod common;

use common::{ids, sample_bank};
use quizbank_core::search::filter::{
    ExamSort, ExamSortKey, QuestionSort, QuestionSortKey, SortDirection,
};
use quizbank_core::{
    filter_exams, filter_questions, group_exams, ExamFilter, Familiarity, FilterOptions,
    MemoryKeyValueStore, Question, QuestionFilter, QuestionId, QuizEntry, ResponseEntry,
    ResponseHistory, ResponseStore, TagGroup,
};

#[test]
fn command_term_filter_keeps_only_listed_terms() {
    let mut define = Question::new(1, "A", "a");
    define.command_term = Some("Define".to_string());
    let mut explain = Question::new(2, "B", "b");
    explain.command_term = Some("Explain".to_string());
    let bank = vec![define, explain];

    let filter = QuestionFilter::new().with_command_terms(["Define"]);
    let matched = filter_questions(&bank, &filter, &ResponseHistory::default());

    assert_eq!(ids(&matched), ["1"]);
}

#[test]
fn empty_filter_returns_the_whole_bank_in_order() {
    let bank = sample_bank();
    let matched = filter_questions(&bank, &QuestionFilter::new(), &ResponseHistory::default());

    assert_eq!(matched.len(), bank.len());
    assert_eq!(ids(&matched)[..3], ["1", "2", "3"]);
}

#[test]
fn tag_filter_requires_every_selected_tag_in_a_group() {
    let bank = sample_bank();
    let history = ResponseHistory::default();

    let both = QuestionFilter::new().require_tags(TagGroup::Concept, ["change", "power"]);
    assert_eq!(ids(&filter_questions(&bank, &both, &history)), ["1"]);

    let one = QuestionFilter::new().require_tags(TagGroup::Concept, ["power"]);
    assert_eq!(ids(&filter_questions(&bank, &one, &history)), ["1", "4", "7"]);

    let across_groups = QuestionFilter::new()
        .require_tags(TagGroup::Content, ["algorithms"])
        .require_tags(TagGroup::Context, ["cultural"]);
    assert_eq!(ids(&filter_questions(&bank, &across_groups, &history)), ["5"]);
}

#[test]
fn metadata_filters_combine_and_ignore_blank_values() {
    let bank = sample_bank();
    let history = ResponseHistory::default();

    let filter = QuestionFilter {
        source: Some("IB".to_string()),
        paper: Some("1".to_string()),
        author: Some("  ".to_string()),
        ..QuestionFilter::default()
    };
    assert_eq!(ids(&filter_questions(&bank, &filter, &history)), ["1", "2", "3"]);

    let nothing = QuestionFilter {
        author: Some("Nobody".to_string()),
        ..QuestionFilter::default()
    };
    assert!(filter_questions(&bank, &nothing, &history).is_empty());
}

#[test]
fn search_matches_question_answer_and_stimulus_case_insensitively() {
    let bank = sample_bank();
    let history = ResponseHistory::default();

    let in_answer = QuestionFilter {
        search: Some("SENSORS".to_string()),
        ..QuestionFilter::default()
    };
    assert_eq!(ids(&filter_questions(&bank, &in_answer, &history)), ["2"]);

    let in_stimulus = QuestionFilter {
        search: Some("robots in".to_string()),
        ..QuestionFilter::default()
    };
    assert_eq!(ids(&filter_questions(&bank, &in_stimulus, &history)), ["6", "7"]);
}

#[test]
fn familiarity_splits_on_quiz_history() {
    let bank = sample_bank();
    let store = MemoryKeyValueStore::new();
    let responses = ResponseStore::new(&store);
    responses
        .create_quiz(QuizEntry {
            responses: vec![ResponseEntry::new(2, "x"), ResponseEntry::new(5, "")],
            ..QuizEntry::default()
        })
        .unwrap();
    let history = responses.history();

    let seen = QuestionFilter {
        familiarity: Familiarity::Seen,
        ..QuestionFilter::default()
    };
    assert_eq!(ids(&filter_questions(&bank, &seen, &history)), ["2", "5"]);

    let unseen = QuestionFilter {
        familiarity: Familiarity::Unseen,
        ..QuestionFilter::default()
    };
    let unseen_ids = ids(&filter_questions(&bank, &unseen, &history));
    assert_eq!(unseen_ids.len(), bank.len() - 2);
    assert!(!unseen_ids.contains(&"2".to_string()));
}

#[test]
fn quiz_count_sort_is_stable_and_directional() {
    let bank = sample_bank();
    let store = MemoryKeyValueStore::new();
    let responses = ResponseStore::new(&store);
    for answered in [vec![3, 4], vec![3]] {
        responses
            .create_quiz(QuizEntry {
                responses: answered
                    .into_iter()
                    .map(|id| ResponseEntry::new(id, "answer"))
                    .collect(),
                ..QuizEntry::default()
            })
            .unwrap();
    }
    let history = responses.history();

    let filter = QuestionFilter {
        paper: Some("1".to_string()),
        sort: Some(QuestionSort {
            key: QuestionSortKey::QuizCount,
            direction: SortDirection::Descending,
        }),
        ..QuestionFilter::default()
    };
    assert_eq!(
        ids(&filter_questions(&bank, &filter, &history)),
        ["3", "1", "2", "P1-extra"]
    );
}

#[test]
fn id_sort_places_non_numeric_ids_at_zero() {
    let bank = sample_bank();
    let filter = QuestionFilter {
        paper: Some("1".to_string()),
        sort: Some(QuestionSort {
            key: QuestionSortKey::Id,
            direction: SortDirection::Ascending,
        }),
        ..QuestionFilter::default()
    };

    assert_eq!(
        ids(&filter_questions(&bank, &filter, &ResponseHistory::default())),
        ["P1-extra", "1", "2", "3"]
    );
}

#[test]
fn exam_status_sort_puts_answered_first_when_descending() {
    let bank = sample_bank();
    let store = MemoryKeyValueStore::new();
    let responses = ResponseStore::new(&store);
    responses.save_exam_response("E2", QuestionId::from(5), "essay").unwrap();
    let history = responses.history();

    let filter = QuestionFilter {
        source: Some("IB".to_string()),
        sort: Some(QuestionSort {
            key: QuestionSortKey::ExamStatus,
            direction: SortDirection::Descending,
        }),
        ..QuestionFilter::default()
    };
    assert_eq!(
        ids(&filter_questions(&bank, &filter, &history)),
        ["5", "1", "2", "3", "4"]
    );
}

#[test]
fn exam_filter_passes_when_any_question_matches() {
    let bank = sample_bank();
    let exams = group_exams(&bank);
    let history = ResponseHistory::default();

    let mut filter = ExamFilter::default();
    filter
        .tags
        .insert(TagGroup::Content, ["data".to_string()].into_iter().collect());
    let listed: Vec<String> = filter_exams(&bank, &exams, &filter, &history)
        .into_iter()
        .map(|exam| exam.exam_id)
        .collect();
    assert_eq!(listed, ["E1", "E2"]);

    let by_term = ExamFilter {
        command_terms: ["Recommend".to_string()].into_iter().collect(),
        ..ExamFilter::default()
    };
    let listed = filter_exams(&bank, &exams, &by_term, &history);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].exam_id, "E3");
}

#[test]
fn exam_filter_searches_titles_and_matches_paper_membership() {
    let bank = sample_bank();
    let exams = group_exams(&bank);
    let history = ResponseHistory::default();

    let by_title = ExamFilter {
        search: Some("case b".to_string()),
        ..ExamFilter::default()
    };
    let listed = filter_exams(&bank, &exams, &by_title, &history);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].exam_id, "E1");

    let by_paper = ExamFilter {
        paper: Some("3".to_string()),
        ..ExamFilter::default()
    };
    let listed = filter_exams(&bank, &exams, &by_paper, &history);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].exam_id, "E3");
}

#[test]
fn exams_sort_by_publication_date() {
    let bank = sample_bank();
    let exams = group_exams(&bank);
    let history = ResponseHistory::default();

    let newest_first: Vec<String> = filter_exams(&bank, &exams, &ExamFilter::default(), &history)
        .into_iter()
        .map(|exam| exam.exam_id)
        .collect();
    assert_eq!(newest_first, ["E3", "E1", "E2"]);

    let oldest_first = ExamFilter {
        sort: ExamSort {
            key: ExamSortKey::PublicationDate,
            direction: SortDirection::Ascending,
        },
        ..ExamFilter::default()
    };
    let listed: Vec<String> = filter_exams(&bank, &exams, &oldest_first, &history)
        .into_iter()
        .map(|exam| exam.exam_id)
        .collect();
    assert_eq!(listed, ["E2", "E1", "E3"]);
}

#[test]
fn filter_options_list_distinct_sorted_values() {
    let options = FilterOptions::from_bank(&sample_bank());

    assert_eq!(options.sources, ["IB", "Mock", "Teacher"]);
    assert_eq!(options.authors, ["Jones", "Lee", "Smith"]);
    assert_eq!(options.papers, ["1", "2", "3"]);
    assert_eq!(
        options.tags[&TagGroup::Context],
        ["cultural", "economic", "health", "political", "social"]
    );
    assert!(options.tags[&TagGroup::Challenge].is_empty());
}
