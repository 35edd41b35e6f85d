//! Exam grouping derived from bank rows.
//!
//! Exams are never persisted; they are recomputed from the question list on
//! demand.

use super::question::Question;

/// One exam (all rows sharing an `ExamID`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exam {
    pub exam_id: String,
    pub source: String,
    pub author: String,
    pub publication_date: String,
    pub level: String,
    /// Distinct paper ids, first-seen order.
    pub papers: Vec<String>,
    /// Distinct titles, first-seen order.
    pub titles: Vec<String>,
}

impl Exam {
    fn from_first_row(exam_id: &str, row: &Question) -> Self {
        Self {
            exam_id: exam_id.to_string(),
            source: row.source.clone().unwrap_or_default(),
            author: row.author.clone().unwrap_or_default(),
            publication_date: row.publication_date.clone().unwrap_or_default(),
            level: row.level.clone().unwrap_or_default(),
            papers: Vec::new(),
            titles: Vec::new(),
        }
    }

    pub fn has_paper(&self, paper_id: &str) -> bool {
        self.papers.iter().any(|paper| paper == paper_id)
    }
}

/// Groups bank rows by `ExamID` in first-appearance order.
///
/// Rows without an exam id are skipped. Exam-level metadata comes from the
/// first row of each exam.
pub fn group_exams(bank: &[Question]) -> Vec<Exam> {
    let mut exams: Vec<Exam> = Vec::new();
    for row in bank {
        let Some(exam_id) = row.exam_id.as_deref().filter(|id| !id.is_empty()) else {
            continue;
        };
        let position = match exams.iter().position(|exam| exam.exam_id == exam_id) {
            Some(position) => position,
            None => {
                exams.push(Exam::from_first_row(exam_id, row));
                exams.len() - 1
            }
        };
        let exam = &mut exams[position];
        if let Some(paper) = row.paper_id.as_deref().filter(|p| !p.is_empty()) {
            push_distinct(&mut exam.papers, paper);
        }
        if let Some(title) = row.title.as_deref().filter(|t| !t.is_empty()) {
            push_distinct(&mut exam.titles, title);
        }
    }
    exams
}

/// Rows of one exam, bank order.
pub fn exam_questions<'a>(bank: &'a [Question], exam_id: &str) -> Vec<&'a Question> {
    bank.iter().filter(|q| q.belongs_to_exam(exam_id)).collect()
}

fn push_distinct(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}
