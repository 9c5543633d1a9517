use {
    serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor},
    std::{
        fmt::{Formatter, Result as FmtResult},
        marker::PhantomData,
    },
};

/// Implement Display for a given class by formatting it as pretty-printed JSON.
#[macro_export]
macro_rules! display_json {
    ($cls:ident) => {
        impl std::fmt::Display for $cls {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                let buf = Vec::new();
                let serde_formatter = ::serde_json::ser::PrettyFormatter::with_indent(b"    ");
                let mut ser = ::serde_json::Serializer::with_formatter(buf, serde_formatter);
                if let Err(e) = ::serde::Serialize::serialize(self, &mut ser) {
                    ::log::error!("Failed to serialize {}: {}", stringify!($cls), e);
                    return Err(::std::fmt::Error {});
                }

                match std::str::from_utf8(&ser.into_inner()) {
                    Ok(s) => f.write_str(s),
                    Err(e) => {
                        ::log::error!("JSON serialization contained non-UTF-8 characters: {}", e);
                        Err(::std::fmt::Error {})
                    }
                }
            }
        }
    };
}

/// A JSON array that the policy grammar requires to hold at least one element.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct NonEmptyList<T>(pub(crate) Vec<T>);

struct NonEmptyListVisitor<T> {
    phantom: PhantomData<T>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for NonEmptyListVisitor<T> {
    type Value = NonEmptyList<T>;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        f.write_str("a non-empty list")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut result = match access.size_hint() {
            Some(size) => Vec::with_capacity(size),
            None => Vec::new(),
        };

        while let Some(item) = access.next_element::<T>()? {
            result.push(item);
        }

        if result.is_empty() {
            return Err(de::Error::invalid_length(0, &self));
        }

        Ok(NonEmptyList(result))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NonEmptyList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(NonEmptyListVisitor {
            phantom: PhantomData,
        })
    }
}
