mod common;

use common::sample_bank;
use quizbank_core::{exam_detail, Question};

fn labels(section: &quizbank_core::service::exam_service::ExamSection) -> Vec<&str> {
    section.questions.iter().map(|q| q.label.as_str()).collect()
}

#[test]
fn paper_one_groups_questions_by_material() {
    let detail = exam_detail(&sample_bank(), "E1").unwrap();

    assert_eq!(detail.meta.paper_id.as_deref(), Some("1"));
    assert_eq!(detail.meta.author.as_deref(), Some("Smith"));
    assert_eq!(detail.sections.len(), 2);

    let first = &detail.sections[0];
    assert_eq!(first.nav_label, "Case A");
    assert_eq!(first.stimulus.as_deref(), Some("Stimulus A"));
    assert_eq!(labels(first), ["Q1.a", "Q1.b"]);

    let second = &detail.sections[1];
    assert_eq!(second.nav_label, "Case B");
    assert_eq!(labels(second), ["Q2"]);
    assert_eq!(detail.question_count(), 3);
}

#[test]
fn case_study_papers_use_a_single_section() {
    let detail = exam_detail(&sample_bank(), "E2").unwrap();

    assert_eq!(detail.sections.len(), 1);
    let section = &detail.sections[0];
    assert_eq!(section.title.as_deref(), Some("Case study"));
    assert_eq!(section.stimulus.as_deref(), Some("Shared source"));
    // The second row has no QuestionNo and falls back to its position.
    assert_eq!(labels(section), ["Q1", "Q2"]);
}

#[test]
fn untitled_sections_get_fallback_navigation_labels() {
    let mut rows = Vec::new();
    for (id, paper, stimulus) in [(1, "1", "one"), (2, "1", "two"), (3, "3", "case")] {
        let mut question = Question::new(id, "q", "a");
        question.exam_id = Some(if paper == "1" { "P1" } else { "P3" }.to_string());
        question.paper_id = Some(paper.to_string());
        question.stimulus = Some(stimulus.to_string());
        rows.push(question);
    }

    let paper_one = exam_detail(&rows, "P1").unwrap();
    let nav: Vec<&str> = paper_one
        .sections
        .iter()
        .map(|s| s.nav_label.as_str())
        .collect();
    assert_eq!(nav, ["Question Group 1", "Question Group 2"]);
    assert_eq!(labels(&paper_one.sections[1]), ["Q2"]);

    let paper_three = exam_detail(&rows, "P3").unwrap();
    assert_eq!(paper_three.sections[0].nav_label, "Main Title");
}

#[test]
fn unknown_exam_has_no_detail() {
    assert!(exam_detail(&sample_bank(), "missing").is_none());
}

#[test]
fn questions_iterate_in_display_order() {
    let detail = exam_detail(&sample_bank(), "E3").unwrap();
    let ids: Vec<&str> = detail.questions().map(|q| q.question.id.as_str()).collect();
    assert_eq!(ids, ["6", "7"]);
}
