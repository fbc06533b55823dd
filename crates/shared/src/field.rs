use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A record field that may be absent, explicitly `null`, or set.
///
/// Absent fields stay absent and `null` stays `null` when the record is
/// serialised again. Pair with
/// `#[serde(default, skip_serializing_if = "Field::is_missing")]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    #[default]
    Missing,
    Null,
    Present(T),
}

impl<T> Field<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Missing | Self::Null => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Missing | Self::Null => None,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Present)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(value) => value.serialize(serializer),
            Self::Missing | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Record {
        #[serde(default, skip_serializing_if = "Field::is_missing")]
        uf: Field<String>,
    }

    #[test]
    fn distinguishes_missing_null_and_present() {
        for body in [json!({}), json!({"uf": null}), json!({"uf": "SP"})] {
            let record: Record = serde_json::from_value(body.clone()).expect("decode");
            assert_eq!(serde_json::to_value(&record).expect("encode"), body);
        }

        let present: Record = serde_json::from_value(json!({"uf": "SP"})).expect("decode");
        assert_eq!(present.uf.get().map(String::as_str), Some("SP"));
        let null: Record = serde_json::from_value(json!({"uf": null})).expect("decode");
        assert_eq!(null.uf, Field::Null);
        assert_eq!(null.uf.into_option(), None);
    }
}
