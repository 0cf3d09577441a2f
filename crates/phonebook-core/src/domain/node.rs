use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

/// A value of a nested phonebook source, tagged by shape.
///
/// Maps keep their entries in document order. An array whose first element is
/// a string becomes a [`Node::Leaf`] holding only its string elements; any
/// other array becomes a [`Node::Sequence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(Vec<String>),
    Branch(Vec<(String, Node)>),
    Sequence(Vec<Node>),
    Text(String),
    /// Numbers, booleans and nulls.
    Scalar,
}

impl Node {
    pub fn from_items(items: Vec<Node>) -> Self {
        if matches!(items.first(), Some(Node::Text(_))) {
            let values = items
                .into_iter()
                .filter_map(|item| match item {
                    Node::Text(value) => Some(value),
                    _ => None,
                })
                .collect();
            return Node::Leaf(values);
        }
        Node::Sequence(items)
    }

    /// Entry under `key` when this node is a map.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Branch(entries) => entries
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Node::Leaf(values) => values.is_empty(),
            Node::Branch(entries) => entries.is_empty(),
            Node::Sequence(items) => items.is_empty(),
            Node::Text(_) | Node::Scalar => false,
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a phonebook tree value")
    }

    fn visit_bool<E>(self, _value: bool) -> Result<Node, E>
    where
        E: de::Error,
    {
        Ok(Node::Scalar)
    }

    fn visit_i64<E>(self, _value: i64) -> Result<Node, E>
    where
        E: de::Error,
    {
        Ok(Node::Scalar)
    }

    fn visit_u64<E>(self, _value: u64) -> Result<Node, E>
    where
        E: de::Error,
    {
        Ok(Node::Scalar)
    }

    fn visit_f64<E>(self, _value: f64) -> Result<Node, E>
    where
        E: de::Error,
    {
        Ok(Node::Scalar)
    }

    fn visit_unit<E>(self) -> Result<Node, E>
    where
        E: de::Error,
    {
        Ok(Node::Scalar)
    }

    fn visit_none<E>(self) -> Result<Node, E>
    where
        E: de::Error,
    {
        Ok(Node::Scalar)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Node, D::Error>
    where
        D: Deserializer<'de>,
    {
        Node::deserialize(deserializer)
    }

    fn visit_str<E>(self, value: &str) -> Result<Node, E>
    where
        E: de::Error,
    {
        Ok(Node::Text(value.to_string()))
    }

    fn visit_string<E>(self, value: String) -> Result<Node, E>
    where
        E: de::Error,
    {
        Ok(Node::Text(value))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Node, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Node>()? {
            items.push(item);
        }
        Ok(Node::from_items(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Node, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Node>()? {
            // A repeated key keeps its first position and takes the last value.
            match entries.iter_mut().find(|(name, _)| *name == key) {
                Some((_, existing)) => *existing = value,
                None => entries.push((key, value)),
            }
        }
        Ok(Node::Branch(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::Node;

    fn parse(raw: &str) -> Node {
        serde_json::from_str(raw).expect("parse node")
    }

    #[test]
    fn string_array_becomes_leaf() {
        assert_eq!(
            parse(r#"["111", "", "222"]"#),
            Node::Leaf(vec!["111".to_string(), "".to_string(), "222".to_string()])
        );
    }

    #[test]
    fn leaf_drops_non_string_elements() {
        assert_eq!(
            parse(r#"["111", 5, null, "222"]"#),
            Node::Leaf(vec!["111".to_string(), "222".to_string()])
        );
    }

    #[test]
    fn array_led_by_object_is_sequence() {
        let node = parse(r#"[{"ICU": ["1234"]}, "5678"]"#);
        let Node::Sequence(items) = node else {
            panic!("expected sequence");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[1], Node::Text("5678".to_string()));
    }

    #[test]
    fn map_preserves_document_order() {
        let node = parse(r#"{"zeta": [], "alpha": [], "mid": []}"#);
        let Node::Branch(entries) = node else {
            panic!("expected branch");
        };
        let keys: Vec<&str> = entries.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn scalars_and_lookup() {
        let node = parse(r#"{"기준일": "2024-03-01", "count": 3, "flag": true}"#);
        assert_eq!(
            node.get("기준일").and_then(Node::as_text),
            Some("2024-03-01")
        );
        assert_eq!(node.get("count"), Some(&Node::Scalar));
        assert!(node.get("missing").is_none());
    }

    #[test]
    fn repeated_key_takes_last_value_at_first_position() {
        let node = parse(r#"{"A": ["1"], "B": ["3"], "A": ["2"]}"#);
        assert_eq!(
            node,
            Node::Branch(vec![
                ("A".to_string(), Node::Leaf(vec!["2".to_string()])),
                ("B".to_string(), Node::Leaf(vec!["3".to_string()])),
            ])
        );
    }

    #[test]
    fn empty_array_is_empty_sequence() {
        let node = parse("[]");
        assert_eq!(node, Node::Sequence(Vec::new()));
        assert!(node.is_empty());
    }
}
