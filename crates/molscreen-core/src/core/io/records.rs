use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A molecule as produced by the fragment extraction stage. Fields other than
/// `smiles` and `fragments` are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MoleculeRecord {
    pub smiles: String,
    #[serde(default)]
    pub fragments: Option<Vec<FragmentRecord>>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FragmentRecord {
    pub smiles: String,
    pub index: i64,
}

/// One line of a scoring stage output. Name and score are carried through
/// untouched, whatever their JSON type.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScoreRecord {
    pub name: Value,
    pub score: Value,
}

/// First line of an activity file. A record without `activity` deserializes
/// to `None` so callers can report it distinctly from malformed JSON.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ActivityRecord {
    #[serde(default)]
    pub activity: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredActivity<'a> {
    pub name: &'a Value,
    pub score: &'a Value,
    pub activity: &'a Value,
}
