//! Exam detail view model.
//!
//! Papers 2 and 3 share one case study, so all of their questions sit in a
//! single section under the first row's title and stimulus. Other papers
//! group consecutive material by `(Title, Stimulus)`.

use crate::model::exam::exam_questions;
use crate::model::question::Question;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamMeta {
    pub exam_id: String,
    pub paper_id: Option<String>,
    pub source: Option<String>,
    pub author: Option<String>,
    pub publication_date: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelledQuestion {
    /// Display label, e.g. `Q2.b.ii`.
    pub label: String,
    pub question: Question,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamSection {
    pub title: Option<String>,
    pub stimulus: Option<String>,
    /// Navigation label; falls back when the section has no title.
    pub nav_label: String,
    pub questions: Vec<LabelledQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamDetail {
    pub meta: ExamMeta,
    pub sections: Vec<ExamSection>,
}

impl ExamDetail {
    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    /// Questions in display order.
    pub fn questions(&self) -> impl Iterator<Item = &LabelledQuestion> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }
}

/// Builds the detail view for one exam; `None` when it has no questions.
pub fn exam_detail(bank: &[Question], exam_id: &str) -> Option<ExamDetail> {
    let rows = exam_questions(bank, exam_id);
    let first = *rows.first()?;

    let meta = ExamMeta {
        exam_id: exam_id.to_string(),
        paper_id: first.paper_id.clone(),
        source: first.source.clone(),
        author: first.author.clone(),
        publication_date: first.publication_date.clone(),
        level: first.level.clone(),
    };

    let sections = if is_case_study_paper(first.paper_id.as_deref()) {
        vec![ExamSection {
            title: non_empty(&first.title),
            stimulus: non_empty(&first.stimulus),
            nav_label: non_empty(&first.title).unwrap_or_else(|| "Main Title".to_string()),
            questions: rows
                .iter()
                .enumerate()
                .map(|(index, q)| labelled(q, index + 1))
                .collect(),
        }]
    } else {
        group_by_material(&rows)
    };

    Some(ExamDetail { meta, sections })
}

fn group_by_material(rows: &[&Question]) -> Vec<ExamSection> {
    let mut keys: Vec<(String, String)> = Vec::new();
    let mut sections: Vec<ExamSection> = Vec::new();

    for row in rows {
        let key = (
            row.title.clone().unwrap_or_default(),
            row.stimulus.clone().unwrap_or_default(),
        );
        let index = match keys.iter().position(|existing| *existing == key) {
            Some(index) => index,
            None => {
                keys.push(key);
                let number = sections.len() + 1;
                sections.push(ExamSection {
                    title: non_empty(&row.title),
                    stimulus: non_empty(&row.stimulus),
                    nav_label: non_empty(&row.title)
                        .unwrap_or_else(|| format!("Question Group {number}")),
                    questions: Vec::new(),
                });
                number - 1
            }
        };
        sections[index].questions.push(labelled(row, index + 1));
    }

    sections
}

fn is_case_study_paper(paper_id: Option<&str>) -> bool {
    matches!(paper_id.map(str::trim), Some("2" | "3"))
}

fn labelled(question: &Question, fallback_number: usize) -> LabelledQuestion {
    LabelledQuestion {
        label: question_label(question, fallback_number),
        question: question.clone(),
    }
}

/// `Q{no}[.sub][.subsub]`, using `fallback_number` when the row has no number.
pub fn question_label(question: &Question, fallback_number: usize) -> String {
    let mut label = match non_empty(&question.question_no) {
        Some(number) => format!("Q{number}"),
        None => format!("Q{fallback_number}"),
    };
    for part in [&question.sub_question_no, &question.sub_sub_question_no] {
        if let Some(part) = non_empty(part) {
            label.push('.');
            label.push_str(&part);
        }
    }
    label
}

/// Marks suffix as shown next to a command term, e.g. ` (1 mark)`.
pub fn marks_label(marks: Option<u32>) -> String {
    match marks {
        Some(0) | None => String::new(),
        Some(1) => " (1 mark)".to_string(),
        Some(n) => format!(" ({n} marks)"),
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
