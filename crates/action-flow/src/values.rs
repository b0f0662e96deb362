//! Value source: one delimited clipboard string into ordered field values

use serde::Serialize;

/// Separator between values, as produced by copying a spreadsheet row
pub const VALUE_DELIMITER: char = '\t';

/// Ordered values captured once per run; empty segments are kept
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ValueSequence(Vec<String>);

impl ValueSequence {
    pub fn parse(raw: &str) -> Self {
        Self(raw.split(VALUE_DELIMITER).map(str::to_string).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_every_tab() {
        let values = ValueSequence::parse("Alice\tBob\tCarol");
        assert_eq!(values.iter().collect::<Vec<_>>(), vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn keeps_empty_segments() {
        let values = ValueSequence::parse("\ta\t\t");
        assert_eq!(values.iter().collect::<Vec<_>>(), vec!["", "a", "", ""]);
    }

    #[test]
    fn no_delimiter_yields_single_value() {
        let values = ValueSequence::parse("one value, with comma");
        assert_eq!(values.len(), 1);
        assert_eq!(values.get(0), Some("one value, with comma"));
        assert_eq!(values.get(1), None);
    }

    #[test]
    fn other_whitespace_is_preserved() {
        let values = ValueSequence::parse(" a b \n");
        assert_eq!(values.get(0), Some(" a b \n"));
    }
}
