use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The grammar as supplied by a caller, e.g.
///
/// ```json
/// {
///     "terminals": ["a", "b"],
///     "non_terminals": ["S"],
///     "start_symbol": "S",
///     "productions": { "S": ["a S b", "a b"] }
/// }
/// ```
///
/// `productions` is read as an object but kept as an ordered list, because the
/// order alternatives (and left hand sides) are declared in decides which
/// derivation wins.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct GrammarDefinition {
    pub terminals: Vec<String>,
    pub non_terminals: Vec<String>,
    pub start_symbol: String,
    #[serde(with = "ordered_productions")]
    pub productions: Vec<(String, Vec<String>)>,
}

mod ordered_productions {
    use super::*;

    pub fn serialize<S>(productions: &[(String, Vec<String>)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(productions.len()))?;
        for (lhs, bodies) in productions {
            map.serialize_entry(lhs, bodies)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, Vec<String>)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ProductionsVisitor)
    }

    struct ProductionsVisitor;

    impl<'de> Visitor<'de> for ProductionsVisitor {
        type Value = Vec<(String, Vec<String>)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a map from nonterminal to a list of production bodies")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut productions: Self::Value = Vec::with_capacity(access.size_hint().unwrap_or(0));

            while let Some((lhs, bodies)) = access.next_entry::<String, Vec<String>>()? {
                // A duplicated key keeps its first position but its last value
                match productions.iter_mut().find(|(existing, _)| *existing == lhs) {
                    Some(entry) => entry.1 = bodies,
                    None => productions.push((lhs, bodies)),
                }
            }

            Ok(productions)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn productions_keep_document_order() {
        let text = r#"{
            "terminals": ["a", "b"],
            "non_terminals": ["Z", "A"],
            "start_symbol": "Z",
            "productions": { "Z": ["A b", "b"], "A": ["a"] }
        }"#;
        let definition: GrammarDefinition = serde_json::from_str(text).unwrap();

        let keys: Vec<_> = definition.productions.iter().map(|(lhs, _)| lhs.as_str()).collect();
        assert_eq!(keys, vec!["Z", "A"]);
        assert_eq!(definition.productions[0].1, vec!["A b".to_string(), "b".to_string()]);
    }

    #[test]
    fn duplicate_key_keeps_last_value() {
        let text = r#"{
            "terminals": [], "non_terminals": ["S", "T"], "start_symbol": "S",
            "productions": { "S": ["x"], "T": [], "S": ["y"] }
        }"#;
        let definition: GrammarDefinition = serde_json::from_str(text).unwrap();

        assert_eq!(definition.productions, vec![
            ("S".to_string(), vec!["y".to_string()]),
            ("T".to_string(), vec![]),
        ]);
    }

    #[test]
    fn serializes_productions_as_object() {
        let definition = GrammarDefinition {
            terminals: vec!["a".to_string()],
            non_terminals: vec!["S".to_string()],
            start_symbol: "S".to_string(),
            productions: vec![("S".to_string(), vec!["a S".to_string(), "a".to_string()])],
        };

        assert_eq!(
            serde_json::to_string(&definition).unwrap(),
            r#"{"terminals":["a"],"non_terminals":["S"],"start_symbol":"S","productions":{"S":["a S","a"]}}"#
        );
    }
}
