//! The branching expression produced by rule application.
//!
//! A [`Sequence`] is what one scan over a name yields: literal fragments
//! interleaved with alternations, each branch carrying the languages it is
//! valid for. A [`BranchingExpression`] is the union of the sequences of
//! every language pass over the same input.

use std::fmt;

use smallvec::SmallVec;

use crate::language::LanguageSet;

/// One choice inside an alternation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Phonetic fragment (may be empty)
    pub text: String,
    /// Languages the fragment is valid for
    pub languages: LanguageSet,
}

/// An element of a [`Sequence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text valid under every language of the sequence.
    Literal(String),
    /// Choose exactly one branch.
    Alternation(SmallVec<[Branch; 2]>),
}

/// The result of scanning one input under one language filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// Languages every expansion of this sequence starts from.
    pub languages: LanguageSet,
    /// Segments in input order.
    pub segments: Vec<Segment>,
}

impl Sequence {
    /// An empty sequence for the given language filter.
    pub fn new(languages: LanguageSet) -> Self {
        Sequence {
            languages,
            segments: Vec::new(),
        }
    }

    /// Append literal text, merging with a preceding literal.
    pub fn push_literal(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Segment::Literal(last)) = self.segments.last_mut() {
            last.push_str(text);
        } else {
            self.segments.push(Segment::Literal(text.to_string()));
        }
    }

    /// Append an alternation.
    ///
    /// A lone branch valid for every language of the sequence cannot narrow
    /// anything and is stored as a literal.
    pub fn push_alternation(&mut self, branches: SmallVec<[Branch; 2]>) {
        if let [only] = branches.as_slice() {
            if only.languages.intersection(self.languages) == self.languages {
                let text = only.text.clone();
                self.push_literal(&text);
                return;
            }
        }
        self.segments.push(Segment::Alternation(branches));
    }

    /// Number of alternation points.
    pub fn alternation_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Alternation(_)))
            .count()
    }

    /// Returns true if nothing was appended.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Union of the sequences produced for one input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BranchingExpression {
    /// One sequence per language pass.
    pub sequences: Vec<Sequence>,
}

/// A concrete phonetic string and the languages it is valid under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateKey {
    /// The phonetic key
    pub phonetic: String,
    /// Languages under which the key arose
    pub languages: LanguageSet,
}

impl CandidateKey {
    /// Create a candidate.
    pub fn new(phonetic: impl Into<String>, languages: LanguageSet) -> Self {
        CandidateKey {
            phonetic: phonetic.into(),
            languages,
        }
    }
}

// ============================================================================
// Display implementations
// ============================================================================

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.text, self.languages)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Alternation(branches) => {
                    f.write_str("(")?;
                    for (i, branch) in branches.iter().enumerate() {
                        if i > 0 {
                            f.write_str("|")?;
                        }
                        write!(f, "{}", branch)?;
                    }
                    f.write_str(")")?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for BranchingExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seq) in self.sequences.iter().enumerate() {
            if i > 0 {
                f.write_str(" ∪ ")?;
            }
            write!(f, "{}", seq)?;
        }
        Ok(())
    }
}

impl fmt::Display for CandidateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.phonetic, self.languages)
    }
}
