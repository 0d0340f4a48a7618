//! Sentence length analyzer

use std::sync::OnceLock;

use a11ydoc_ast::Document;
use a11ydoc_core::{Issue, IssueKind};
use regex::Regex;

use crate::thresholds::MAX_SENTENCE_WORDS;
use crate::{preview, Analyzer};

/// Split text into sentences at `.`, `!` or `?` followed by whitespace
pub fn sentences(text: &str) -> impl Iterator<Item = &str> {
    static SENTENCE_END_RE: OnceLock<Regex> = OnceLock::new();
    let re = SENTENCE_END_RE
        .get_or_init(|| Regex::new(r"[.!?]+\s+").expect("sentence pattern is valid"));
    re.split(text.trim())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Flags the first sentence over 35 words in each paragraph (`LONG_SENTENCE`)
pub struct LongSentenceAnalyzer;

impl Analyzer for LongSentenceAnalyzer {
    fn name(&self) -> &'static str {
        "long-sentences"
    }

    fn analyze(&self, doc: &Document) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (location, para) in doc.located_paragraphs() {
            let text = para.plain_text();
            let long = sentences(&text)
                .map(|sentence| (sentence, sentence.split_whitespace().count()))
                .find(|(_, words)| *words > MAX_SENTENCE_WORDS);
            if let Some((sentence, words)) = long {
                issues.push(Issue::new(
                    IssueKind::LongSentence,
                    location,
                    format!(
                        "Sentence has {} words (more than {} is hard to follow): \"{}\"",
                        words,
                        MAX_SENTENCE_WORDS,
                        preview(sentence)
                    ),
                ));
            }
        }
        issues
    }
}
