//! Normalization of loosely-typed form fields.
//!
//! The transport encodes fields ambiguously across plain-JSON and
//! multipart-form submissions: an array-like field may arrive absent, as a
//! JSON-array-encoded string, as a bare string, or as an array; numbers
//! and booleans may arrive natively or string-encoded. Every payload
//! normalizes through the types here instead of re-deriving the coercion
//! ad hoc per field.

use std::fmt;

use axum::extract::Multipart;
use rust_decimal::Decimal;
use serde::{
    de::{self, SeqAccess, Visitor},
    Deserialize, Deserializer,
};
use serde_json::{Map, Value};
use service::domain::listing::media::UploadField;

use crate::Error;

/// Ordered sequence of strings coerced from an ambiguously encoded field.
///
/// - absent or JSON `null` → empty sequence;
/// - string parseable as a JSON array → its elements;
/// - string parseable as another JSON value → that value, single-element;
/// - any other string → itself, single-element;
/// - array → as-is.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct List(pub Vec<String>);

impl<'de> Deserialize<'de> for List {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ListVisitor)
    }
}

/// [`Visitor`] of a [`List`].
struct ListVisitor;

impl<'de> Visitor<'de> for ListVisitor {
    type Value = List;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of strings, a JSON-encoded or bare string")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(List(Vec::new()))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(List(coerce_str(v)))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(value) = seq.next_element::<Value>()? {
            items.push(element(value));
        }
        Ok(List(items))
    }
}

/// Coerces an ambiguously encoded string field into a sequence of strings.
fn coerce_str(field: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(field) {
        Ok(Value::Array(items)) => items.into_iter().map(element).collect(),
        Ok(Value::Null) => Vec::new(),
        Ok(value) => vec![element(value)],
        Err(_) => vec![field.to_owned()],
    }
}

/// Renders a parsed JSON element back into its string form.
fn element(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Number coerced from a native or string-encoded value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Num(pub f64);

impl<'de> Deserialize<'de> for Num {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NumVisitor)
    }
}

/// [`Visitor`] of a [`Num`].
struct NumVisitor;

impl Visitor<'_> for NumVisitor {
    type Value = Num;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, natively or string-encoded")
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Num(v))
    }

    #[expect(clippy::cast_precision_loss, reason = "form-encoded numbers")]
    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Num(v as f64))
    }

    #[expect(clippy::cast_precision_loss, reason = "form-encoded numbers")]
    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Num(v as f64))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map(Num).map_err(|_| {
            E::custom(format!("`{v}` is not a valid number"))
        })
    }
}

/// Monetary amount coerced from a native or string-encoded value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Amount(pub Decimal);

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

/// [`Visitor`] of an [`Amount`].
struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a monetary amount, natively or string-encoded")
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Decimal::try_from(v).map(Amount).map_err(|_| {
            E::custom(format!("`{v}` is not a valid amount"))
        })
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map(Amount).map_err(|_| {
            E::custom(format!("`{v}` is not a valid amount"))
        })
    }
}

/// Boolean coerced from a native or string-encoded value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Flag(pub bool);

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FlagVisitor)
    }
}

/// [`Visitor`] of a [`Flag`].
struct FlagVisitor;

impl Visitor<'_> for FlagVisitor {
    type Value = Flag;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, natively or string-encoded")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Flag(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match v {
            "true" => Ok(Flag(true)),
            "false" => Ok(Flag(false)),
            _ => Err(E::custom(format!("`{v}` is not a valid boolean"))),
        }
    }
}

/// Uploaded file part of a multipart payload.
#[derive(Clone, Debug)]
pub struct FilePart {
    /// Form field this part arrived through.
    pub field: UploadField,

    /// Original filename of this part.
    pub filename: String,

    /// Raw bytes of this part.
    pub bytes: Vec<u8>,
}

/// Maximum number of accepted `images` files.
const MAX_IMAGES: usize = 15;

/// Collects a multipart payload into its JSON-shaped text fields and its
/// file parts (`images` ≤ 15, `coverImg` ≤ 1).
///
/// Repeated text fields are promoted into arrays, matching the plain-JSON
/// encoding of the same payload.
///
/// # Errors
///
/// Errors if the payload is malformed or carries unexpected or too many
/// file fields.
pub async fn collect(
    mut multipart: Multipart,
) -> Result<(Map<String, Value>, Vec<FilePart>), Error> {
    let mut fields = Map::new();
    let mut files = Vec::new();
    let mut num_images = 0;
    let mut num_covers = 0;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(e.to_string()))?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };
        let filename = field.file_name().map(ToOwned::to_owned);

        if let Some(filename) = filename {
            let upload_field = match name.as_str() {
                "images" => {
                    num_images += 1;
                    if num_images > MAX_IMAGES {
                        return Err(Error::validation(format!(
                            "at most {MAX_IMAGES} `images` files are accepted",
                        )));
                    }
                    UploadField::Images
                }
                "coverImg" => {
                    num_covers += 1;
                    if num_covers > 1 {
                        return Err(Error::validation(
                            "at most 1 `coverImg` file is accepted",
                        ));
                    }
                    UploadField::Cover
                }
                _ => {
                    return Err(Error::validation(format!(
                        "unexpected `{name}` file field",
                    )));
                }
            };

            let bytes = field
                .bytes()
                .await
                .map_err(|e| Error::validation(e.to_string()))?
                .to_vec();
            files.push(FilePart {
                field: upload_field,
                filename,
                bytes,
            });
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| Error::validation(e.to_string()))?;
            push_text(&mut fields, name, text);
        }
    }

    Ok((fields, files))
}

/// Inserts a text field into the JSON object, promoting repeated keys into
/// an array.
fn push_text(fields: &mut Map<String, Value>, name: String, text: String) {
    match fields.get_mut(&name) {
        Some(Value::Array(items)) => items.push(Value::String(text)),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, Value::String(text)]);
        }
        None => drop(fields.insert(name, Value::String(text))),
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;
    use serde_json::{json, Map, Value};

    use super::{push_text, Amount, Flag, List, Num};

    fn list(value: Value) -> Vec<String> {
        serde_json::from_value::<List>(value).unwrap().0
    }

    #[test]
    fn list_accepts_json_encoded_arrays() {
        assert_eq!(list(json!("[\"pool\",\"garage\"]")), ["pool", "garage"]);
        assert_eq!(list(json!("[]")), [""; 0]);
    }

    #[test]
    fn list_wraps_bare_strings() {
        assert_eq!(list(json!("pool")), ["pool"]);
    }

    #[test]
    fn list_wraps_json_scalars() {
        assert_eq!(list(json!("42")), ["42"]);
        assert_eq!(list(json!("\"pool\"")), ["pool"]);
    }

    #[test]
    fn list_keeps_arrays_as_is() {
        assert_eq!(list(json!(["pool", "garage"])), ["pool", "garage"]);
    }

    #[test]
    fn list_treats_null_as_empty() {
        assert_eq!(list(json!(null)), [""; 0]);
        assert_eq!(list(json!("null")), [""; 0]);
    }

    #[test]
    fn num_accepts_native_and_string_encoded() {
        assert_eq!(serde_json::from_value::<Num>(json!(3)).unwrap(), Num(3.0));
        assert_eq!(
            serde_json::from_value::<Num>(json!(2.5)).unwrap(),
            Num(2.5),
        );
        assert_eq!(
            serde_json::from_value::<Num>(json!("2.5")).unwrap(),
            Num(2.5),
        );
        assert!(serde_json::from_value::<Num>(json!("many")).is_err());
    }

    #[test]
    fn amount_accepts_native_and_string_encoded() {
        assert_eq!(
            serde_json::from_value::<Amount>(json!(250_000)).unwrap(),
            Amount(Decimal::from(250_000)),
        );
        assert_eq!(
            serde_json::from_value::<Amount>(json!("250000")).unwrap(),
            Amount(Decimal::from(250_000)),
        );
    }

    #[test]
    fn flag_accepts_native_and_string_encoded() {
        assert_eq!(
            serde_json::from_value::<Flag>(json!(true)).unwrap(),
            Flag(true),
        );
        assert_eq!(
            serde_json::from_value::<Flag>(json!("false")).unwrap(),
            Flag(false),
        );
        assert!(serde_json::from_value::<Flag>(json!("yes")).is_err());
    }

    #[test]
    fn repeated_text_fields_promote_into_arrays() {
        let mut fields = Map::new();
        push_text(&mut fields, "features".to_owned(), "pool".to_owned());
        push_text(&mut fields, "features".to_owned(), "garage".to_owned());

        assert_eq!(fields["features"], json!(["pool", "garage"]));
    }
}
