#![allow(dead_code)]

use quizbank_core::{parse_question_bank, Question};

/// Three exams across papers 1-3 plus one loose question with a string id.
pub const SAMPLE_BANK: &str = r#"[
  {"ID": 1, "ExamID": "E1", "PaperID": 1, "Source": "IB", "Author": "Smith",
   "PublicationDate": "2021-05", "Level": "HL", "Title": "Case A", "Stimulus": "Stimulus A",
   "QuestionText": "Define the term algorithm.", "AnswerText": "A finite sequence of steps.",
   "CommandTerm": "Define", "Marks": 2,
   "ConceptTags": ["change", "power"], "ContentTags": ["data"], "ContextTags": ["health"],
   "ChallengeTags": [], "QuestionNo": 1, "SubQuestionNo": "a"},
  {"ID": 2, "ExamID": "E1", "PaperID": 1, "Source": "IB", "Author": "Smith",
   "PublicationDate": "2021-05", "Level": "HL", "Title": "Case A", "Stimulus": "Stimulus A",
   "QuestionText": "Explain how data is collected.", "AnswerText": "Sensors and surveys.",
   "CommandTerm": "Explain", "Marks": 4,
   "ConceptTags": ["change"], "ContentTags": ["data", "media"], "ContextTags": ["economic"],
   "QuestionNo": 1, "SubQuestionNo": "b"},
  {"ID": 3, "ExamID": "E1", "PaperID": 1, "Source": "IB", "Author": "Smith",
   "PublicationDate": "2021-05", "Level": "HL", "Title": "Case B", "Stimulus": "Stimulus B",
   "QuestionText": "Evaluate the impact of networks.", "AnswerText": "Balanced evaluation.",
   "CommandTerm": "Evaluate", "Marks": 8,
   "ConceptTags": ["identity"], "ContentTags": ["networks and the internet"],
   "ContextTags": ["political"], "QuestionNo": 2},
  {"ID": 4, "ExamID": "E2", "PaperID": "2", "Source": "IB", "Author": "Jones",
   "PublicationDate": "2019-11", "Level": "SL", "Title": "Case study", "Stimulus": "Shared source",
   "QuestionText": "Describe one algorithm in the source.", "AnswerText": "Ranking.",
   "CommandTerm": "Describe", "Marks": 3,
   "ConceptTags": ["power"], "ContentTags": ["algorithms"], "ContextTags": ["social"],
   "QuestionNo": 1},
  {"ID": 5, "ExamID": "E2", "PaperID": "2", "Source": "IB", "Author": "Jones",
   "PublicationDate": "2019-11", "Level": "SL", "Title": "Case study", "Stimulus": "Shared source",
   "QuestionText": "Discuss the ethics of ranking.", "AnswerText": "Both sides.",
   "CommandTerm": "Discuss", "Marks": 12,
   "ConceptTags": ["values and ethics"], "ContentTags": ["algorithms", "data"],
   "ContextTags": ["social", "cultural"]},
  {"ID": 6, "ExamID": "E3", "PaperID": 3, "Source": "Mock", "Author": "Smith",
   "PublicationDate": "2023-05", "Level": "HL", "Title": "Intervention", "Stimulus": "Robots in care",
   "QuestionText": "Suggest one improvement.", "AnswerText": "Add oversight.",
   "CommandTerm": "Suggest", "Marks": 4,
   "ConceptTags": ["systems"], "ContentTags": ["robots and autonomous technologies"],
   "ContextTags": ["health"], "QuestionNo": 1},
  {"ID": 7, "ExamID": "E3", "PaperID": 3, "Source": "Mock", "Author": "Smith",
   "PublicationDate": "2023-05", "Level": "HL", "Title": "Intervention", "Stimulus": "Robots in care",
   "QuestionText": "Recommend an intervention.", "AnswerText": "Staff training.",
   "CommandTerm": "Recommend", "Marks": 12,
   "ConceptTags": ["systems", "power"], "ContentTags": ["robots and autonomous technologies"],
   "ContextTags": ["health"], "QuestionNo": 2},
  {"ID": "P1-extra", "PaperID": 1, "Source": "Teacher", "Author": "Lee",
   "QuestionText": "Outline two uses of media data.", "AnswerText": "Ads and trends.",
   "CommandTerm": "Outline", "ContentTags": ["media"]}
]"#;

pub fn sample_bank() -> Vec<Question> {
    parse_question_bank(SAMPLE_BANK.as_bytes()).unwrap()
}

pub fn ids(questions: &[&Question]) -> Vec<String> {
    questions.iter().map(|q| q.id.to_string()).collect()
}
