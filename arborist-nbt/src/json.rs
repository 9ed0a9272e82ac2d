//! NBT to JSON conversion, for inspecting templates by eye.

use fastnbt::Value;
use serde_json::{Map, Number, Value as JsonValue};

pub fn nbt_to_json(nbt: Value) -> JsonValue {
    match nbt {
        Value::Compound(c) => {
            let mut map = Map::new();
            for (k, v) in c {
                map.insert(k, nbt_to_json(v));
            }
            JsonValue::Object(map)
        }
        Value::List(l) => JsonValue::Array(l.into_iter().map(nbt_to_json).collect()),
        Value::String(s) => JsonValue::String(s),
        Value::Byte(b) => JsonValue::Number(b.into()),
        Value::Short(s) => JsonValue::Number(s.into()),
        Value::Int(i) => JsonValue::Number(i.into()),
        Value::Long(l) => JsonValue::Number(l.into()),
        Value::Float(f) => JsonValue::Number(Number::from_f64(f as f64).unwrap_or(Number::from(0))),
        Value::Double(d) => JsonValue::Number(Number::from_f64(d).unwrap_or(Number::from(0))),
        // Typed arrays flatten to plain lists; the tag type is not needed for reading.
        Value::ByteArray(ba) => {
            JsonValue::Array(ba.iter().map(|&b| JsonValue::Number(b.into())).collect())
        }
        Value::IntArray(ia) => {
            JsonValue::Array(ia.iter().map(|&i| JsonValue::Number(i.into())).collect())
        }
        Value::LongArray(la) => {
            JsonValue::Array(la.iter().map(|&l| JsonValue::Number(l.into())).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{BlockEntry, BlockState, StructureFile, DATA_VERSION};
    use fastnbt::LongArray;

    #[test]
    fn test_structure_to_json() {
        let mut structure = StructureFile::new([1, 1, 1], DATA_VERSION);
        let leaves = BlockState::new("tfc:wood/leaves/oak").with_property("distance", "1");
        structure.palette.push(leaves);
        structure.blocks.push(BlockEntry::new(0, [0, 0, 0]));

        let value: Value = fastnbt::from_bytes(&fastnbt::to_bytes(&structure).unwrap()).unwrap();
        let json = nbt_to_json(value);

        assert_eq!(json["DataVersion"], 2975);
        assert_eq!(json["size"], serde_json::json!([1, 1, 1]));
        assert_eq!(json["palette"][0]["Name"], "tfc:wood/leaves/oak");
        assert_eq!(json["palette"][0]["Properties"]["distance"], "1");
        assert_eq!(json["blocks"][0]["state"], 0);
    }

    #[test]
    fn test_long_array_flattens() {
        let nbt = Value::LongArray(LongArray::new(vec![1, 2, 3, 4096]));
        assert_eq!(nbt_to_json(nbt), serde_json::json!([1, 2, 3, 4096]));
    }
}
