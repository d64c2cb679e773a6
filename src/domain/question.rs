//! Questions, answers and the reaction conditions record
//!
//! A decision node asks one `Question`; the edges leaving it are labeled
//! with the `Answer` values admissible for that question. `Conditions`
//! answers every question, which makes the chart traversal total.

use std::fmt;

/// Number of carbon substituents on the carbon bearing the leaving group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Degree {
    /// 0 degrees (methyl substrate)
    Methyl,
    Primary,
    Secondary,
    Tertiary,
}

impl Degree {
    pub const ALL: [Degree; 4] = [
        Degree::Methyl,
        Degree::Primary,
        Degree::Secondary,
        Degree::Tertiary,
    ];

    /// Edge label as it appears on the diagram.
    pub fn label(&self) -> &'static str {
        match self {
            Degree::Methyl => "0\u{b0}",
            Degree::Primary => "1\u{b0}",
            Degree::Secondary => "2\u{b0}",
            Degree::Tertiary => "3\u{b0}",
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The questions asked by decision nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Question {
    /// Four-way root question (0 to 3 degrees)
    SubstrateDegree,
    BulkyBase,
    ChargedNucleophile,
    StrongBase,
    HeatApplied,
}

impl Question {
    /// Prompt text as drawn inside the node. Embedded newlines are
    /// intentional line breaks in the rendered diagram.
    pub fn prompt(&self) -> &'static str {
        match self {
            Question::SubstrateDegree => "Substrate Carbon Degree?",
            Question::BulkyBase => "Bulky\nbase?",
            Question::ChargedNucleophile => "Nu\u{207b} has\ncharge?",
            Question::StrongBase => "Strong\nbase?",
            Question::HeatApplied => "Heat?",
        }
    }

    /// The complete set of answers admissible for this question.
    /// Out-edges of a decision node must cover exactly this set.
    pub fn answers(&self) -> &'static [Answer] {
        const DEGREES: [Answer; 4] = [
            Answer::Degree(Degree::Methyl),
            Answer::Degree(Degree::Primary),
            Answer::Degree(Degree::Secondary),
            Answer::Degree(Degree::Tertiary),
        ];
        const BOOLEAN: [Answer; 2] = [Answer::Yes, Answer::No];

        match self {
            Question::SubstrateDegree => &DEGREES,
            _ => &BOOLEAN,
        }
    }
}

/// Outcome value selecting one edge out of a decision node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer {
    Degree(Degree),
    Yes,
    No,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Degree(d) => write!(f, "{}", d),
            Answer::Yes => write!(f, "YES"),
            Answer::No => write!(f, "NO"),
        }
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        if value {
            Answer::Yes
        } else {
            Answer::No
        }
    }
}

/// The discrete reaction conditions the chart classifies.
///
/// Booleans that are irrelevant for a given degree are simply never
/// consulted by the traversal (e.g. `bulky_base` on a tertiary substrate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conditions {
    pub degree: Degree,
    pub bulky_base: bool,
    pub charged_nucleophile: bool,
    pub strong_base: bool,
    pub heat: bool,
}

impl Conditions {
    pub fn new(degree: Degree) -> Self {
        Self {
            degree,
            bulky_base: false,
            charged_nucleophile: false,
            strong_base: false,
            heat: false,
        }
    }

    /// Answer a decision-node question from this record.
    pub fn answer(&self, question: Question) -> Answer {
        match question {
            Question::SubstrateDegree => Answer::Degree(self.degree),
            Question::BulkyBase => self.bulky_base.into(),
            Question::ChargedNucleophile => self.charged_nucleophile.into(),
            Question::StrongBase => self.strong_base.into(),
            Question::HeatApplied => self.heat.into(),
        }
    }
}
