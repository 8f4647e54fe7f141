use crate::error::{Result, TemplateError};
use crate::vars::Vars;
use serde::Serialize;
use serde::ser::*;

/// Separator used when flattening nested structs into variable names.
///
/// Variable names are word characters only, so `user.name` has to become
/// `user_name` to stay addressable from a template.
const PATH_SEPARATOR: char = '_';

/// Intermediate shape produced while serializing.
enum Node {
    Absent,
    Scalar(String),
    Map(Vec<(String, Node)>),
}

/// Flattens any serde-serializable struct or map into a [`Vars`] store.
///
/// Scalars become their string form, `None` and unit values are omitted,
/// nested structs and maps are joined with `_`. Sequences have no flat
/// representation and are rejected.
pub fn to_vars<T: ?Sized + Serialize>(value: &T) -> Result<Vars> {
    let mut vars = Vars::new();
    match value.serialize(NodeSerializer)? {
        Node::Absent => {}
        Node::Map(entries) => flatten("", entries, &mut vars),
        Node::Scalar(s) => {
            return Err(TemplateError::Serialization(format!(
                "Expected a struct or map at top level, got scalar {:?}",
                s
            )));
        }
    }
    Ok(vars)
}

fn flatten(prefix: &str, entries: Vec<(String, Node)>, vars: &mut Vars) {
    for (key, node) in entries {
        let name = if prefix.is_empty() {
            key
        } else {
            format!("{}{}{}", prefix, PATH_SEPARATOR, key)
        };
        match node {
            Node::Absent => {}
            Node::Scalar(s) => {
                vars.insert(name, s);
            }
            Node::Map(nested) => flatten(&name, nested, vars),
        }
    }
}

struct NodeSerializer;

impl Serializer for NodeSerializer {
    type Ok = Node;
    type Error = TemplateError;
    type SerializeSeq = Impossible<Node, TemplateError>;
    type SerializeTuple = Impossible<Node, TemplateError>;
    type SerializeTupleStruct = Impossible<Node, TemplateError>;
    type SerializeTupleVariant = Impossible<Node, TemplateError>;
    type SerializeMap = MapSerializer;
    type SerializeStruct = MapSerializer;
    type SerializeStructVariant = MapSerializer;

    fn serialize_bool(self, v: bool) -> Result<Node> {
        Ok(Node::Scalar(v.to_string()))
    }
    fn serialize_i8(self, v: i8) -> Result<Node> {
        Ok(Node::Scalar(v.to_string()))
    }
    fn serialize_i16(self, v: i16) -> Result<Node> {
        Ok(Node::Scalar(v.to_string()))
    }
    fn serialize_i32(self, v: i32) -> Result<Node> {
        Ok(Node::Scalar(v.to_string()))
    }
    fn serialize_i64(self, v: i64) -> Result<Node> {
        Ok(Node::Scalar(v.to_string()))
    }
    fn serialize_u8(self, v: u8) -> Result<Node> {
        Ok(Node::Scalar(v.to_string()))
    }
    fn serialize_u16(self, v: u16) -> Result<Node> {
        Ok(Node::Scalar(v.to_string()))
    }
    fn serialize_u32(self, v: u32) -> Result<Node> {
        Ok(Node::Scalar(v.to_string()))
    }
    fn serialize_u64(self, v: u64) -> Result<Node> {
        Ok(Node::Scalar(v.to_string()))
    }
    fn serialize_f32(self, v: f32) -> Result<Node> {
        Ok(Node::Scalar(v.to_string()))
    }
    fn serialize_f64(self, v: f64) -> Result<Node> {
        Ok(Node::Scalar(v.to_string()))
    }
    fn serialize_char(self, v: char) -> Result<Node> {
        Ok(Node::Scalar(v.to_string()))
    }
    fn serialize_str(self, v: &str) -> Result<Node> {
        Ok(Node::Scalar(v.to_string()))
    }
    fn serialize_bytes(self, v: &[u8]) -> Result<Node> {
        String::from_utf8(v.to_vec())
            .map(Node::Scalar)
            .map_err(|e| TemplateError::Serialization(format!("Invalid UTF-8 bytes: {}", e)))
    }
    fn serialize_none(self) -> Result<Node> {
        Ok(Node::Absent)
    }
    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Node> {
        value.serialize(self)
    }
    fn serialize_unit(self) -> Result<Node> {
        Ok(Node::Absent)
    }
    fn serialize_unit_struct(self, _: &'static str) -> Result<Node> {
        Ok(Node::Absent)
    }
    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
    ) -> Result<Node> {
        Ok(Node::Scalar(variant.to_string()))
    }
    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<Node> {
        value.serialize(self)
    }
    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        value: &T,
    ) -> Result<Node> {
        value.serialize(self)
    }
    fn serialize_seq(self, _: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(unsupported("sequence"))
    }
    fn serialize_tuple(self, _: usize) -> Result<Self::SerializeTuple> {
        Err(unsupported("tuple"))
    }
    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(unsupported(name))
    }
    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(unsupported(variant))
    }
    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(MapSerializer {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            key: None,
        })
    }
    fn serialize_struct(self, _: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        Ok(MapSerializer {
            entries: Vec::with_capacity(len),
            key: None,
        })
    }
    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(MapSerializer {
            entries: Vec::with_capacity(len),
            key: None,
        })
    }
}

fn unsupported(kind: &str) -> TemplateError {
    TemplateError::Serialization(format!(
        "{} values have no flat variable representation",
        kind
    ))
}

struct MapSerializer {
    entries: Vec<(String, Node)>,
    key: Option<String>,
}

impl SerializeMap for MapSerializer {
    type Ok = Node;
    type Error = TemplateError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        match key.serialize(NodeSerializer)? {
            Node::Scalar(s) => {
                self.key = Some(s);
                Ok(())
            }
            _ => Err(TemplateError::Serialization(
                "Map key must be a scalar".to_string(),
            )),
        }
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let v = value.serialize(NodeSerializer)?;
        let key = self
            .key
            .take()
            .ok_or_else(|| TemplateError::Serialization("Missing key for value".to_string()))?;
        self.entries.push((key, v));
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(Node::Map(self.entries))
    }
}

macro_rules! impl_serialize_struct {
    ($trait:ident) => {
        impl $trait for MapSerializer {
            type Ok = Node;
            type Error = TemplateError;

            fn serialize_field<T: ?Sized + Serialize>(
                &mut self,
                key: &'static str,
                value: &T,
            ) -> Result<()> {
                let v = value.serialize(NodeSerializer)?;
                self.entries.push((key.to_string(), v));
                Ok(())
            }

            fn end(self) -> Result<Node> {
                Ok(Node::Map(self.entries))
            }
        }
    };
}

impl_serialize_struct!(SerializeStruct);
impl_serialize_struct!(SerializeStructVariant);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Address {
        city: String,
        zip: Option<String>,
    }

    #[derive(Serialize)]
    struct User {
        name: String,
        age: u32,
        admin: bool,
        nickname: Option<String>,
        address: Address,
    }

    /// Nested structs are flattened and `None` fields disappear
    #[test]
    fn test_struct_is_flattened() {
        let user = User {
            name: "Alice".to_string(),
            age: 30,
            admin: false,
            nickname: None,
            address: Address {
                city: "Oslo".to_string(),
                zip: None,
            },
        };

        let vars = to_vars(&user).unwrap();
        assert_eq!(vars.get("name"), Some("Alice"));
        assert_eq!(vars.get("age"), Some("30"));
        assert_eq!(vars.get("admin"), Some("false"));
        assert_eq!(vars.get("address_city"), Some("Oslo"));
        assert!(!vars.contains("nickname"));
        assert!(!vars.contains("address_zip"));
        assert_eq!(vars.len(), 4);
    }

    #[test]
    fn test_map_and_unit() {
        let mut map = BTreeMap::new();
        map.insert("x", 1);
        map.insert("y", 2);
        let vars = to_vars(&map).unwrap();
        assert_eq!(vars.get("x"), Some("1"));
        assert_eq!(vars.get("y"), Some("2"));

        assert!(to_vars(&()).unwrap().is_empty());
    }

    #[test]
    fn test_sequences_and_scalars_are_rejected() {
        #[derive(Serialize)]
        struct WithList {
            ids: Vec<i64>,
        }

        let err = to_vars(&WithList { ids: vec![1, 2] }).unwrap_err();
        assert!(matches!(err, TemplateError::Serialization(_)));

        let err = to_vars(&5).unwrap_err();
        assert!(matches!(err, TemplateError::Serialization(_)));
    }
}
