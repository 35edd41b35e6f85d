//! Command-term vocabulary.
//!
//! Command terms are grouped into three assessment-objective bands. The two
//! lower bands make up the allow-list used by random quiz generation.

/// AO1: knowledge and understanding.
pub const AO1_TERMS: [&str; 5] = ["Define", "Identify", "Describe", "Outline", "State"];

/// AO2: application and analysis.
pub const AO2_TERMS: [&str; 4] = ["Analyse", "Distinguish", "Explain", "Suggest"];

/// AO3: synthesis and evaluation.
pub const AO3_TERMS: [&str; 9] = [
    "Compare",
    "Compare and contrast",
    "Contrast",
    "Discuss",
    "Examine",
    "Evaluate",
    "Justify",
    "To what extent",
    "Recommend",
];

/// Terms accepted by random quiz generation (AO1 followed by AO2).
pub const LOWER_ORDER_TERMS: [&str; 9] = [
    "Define",
    "Identify",
    "Describe",
    "Outline",
    "State",
    "Analyse",
    "Distinguish",
    "Explain",
    "Suggest",
];

const DEFINITIONS: [(&str, &str); 18] = [
    ("Define", "Give the precise meaning of a word, phrase, concept or physical quantity."),
    ("Identify", "Provide an answer from a number of possibilities. Recognise and state briefly a distinguishing fact or feature."),
    ("Describe", "Give a detailed account or picture of a situation, event, pattern or process."),
    ("Outline", "Give a brief account or summary."),
    ("State", "Give a specific name, value or other brief answer without explanation or calculation."),
    ("Analyse", "Break down in order to bring out the essential elements or structure. (To identify parts and relationships, and to interpret information to reach conclusions.)"),
    ("Distinguish", "Make clear the differences between two or more concepts or items."),
    ("Explain", "Give a detailed account including reasons or causes."),
    ("Suggest", "Propose a solution, hypothesis or other possible answer."),
    ("Compare", "Give an account of the similarities between two (or more) items or situations, referring to both (all) of them throughout."),
    ("Compare and contrast", "Give an account of similarities and differences between two (or more) items or situations, referring to both (all) of them throughout."),
    ("Contrast", "Give an account of the differences between two (or more) items or situations, referring to both (all) of them throughout."),
    ("Discuss", "Offer a considered and balanced review that includes a range of arguments, factors or hypotheses. Opinions or conclusions should be presented clearly and supported by appropriate evidence."),
    ("Examine", "Consider an argument or concept in a way that uncovers the assumptions and interrelationships of the issue."),
    ("Evaluate", "Make an appraisal by weighing up the strengths and limitations."),
    ("Justify", "Give valid reasons or evidence to support an answer or conclusion. (See also 'Explain'.)"),
    ("To what extent", "Consider the merits or otherwise of an argument or concept. Opinions and conclusions should be presented clearly and supported with appropriate evidence and sound argument."),
    ("Recommend", "Present an advisable course of action with appropriate supporting evidence/reason in relation to a given situation, problem or issue."),
];

/// Returns the tooltip definition for a command term, if it is known.
pub fn definition(term: &str) -> Option<&'static str> {
    DEFINITIONS
        .iter()
        .find(|(known, _)| *known == term)
        .map(|(_, text)| *text)
}

pub fn is_lower_order(term: &str) -> bool {
    LOWER_ORDER_TERMS.contains(&term)
}

/// Every known term in band order (AO1, AO2, AO3).
pub fn all_terms() -> impl Iterator<Item = &'static str> {
    AO1_TERMS
        .into_iter()
        .chain(AO2_TERMS)
        .chain(AO3_TERMS)
}

#[cfg(test)]
mod tests {
    use super::{all_terms, definition, is_lower_order, LOWER_ORDER_TERMS};

    #[test]
    fn every_term_has_a_definition() {
        for term in all_terms() {
            assert!(definition(term).is_some(), "missing definition for {term}");
        }
        assert_eq!(definition("Summarise"), None);
    }

    #[test]
    fn lower_order_is_ao1_then_ao2() {
        let expected: Vec<&str> = all_terms().take(9).collect();
        assert_eq!(LOWER_ORDER_TERMS.to_vec(), expected);
        assert!(is_lower_order("Suggest"));
        assert!(!is_lower_order("Evaluate"));
    }
}
