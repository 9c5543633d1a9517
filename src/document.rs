use {
    crate::{serutil::NonEmptyList, ParseError, Statement},
    derive_builder::Builder,
    log::debug,
    serde::{
        de::{self, Deserializer, MapAccess, Visitor},
        Deserialize,
    },
    std::fmt::{Formatter, Result as FmtResult},
};

/// The parse tree of a policy document.
///
/// `Version` is kept as raw text; it is not checked against the published policy language versions.
#[derive(Builder, Clone, Debug, Eq, PartialEq)]
pub struct Document {
    #[builder(setter(into, strip_option), default)]
    version: Option<String>,

    #[builder(setter(into, strip_option), default)]
    id: Option<String>,

    statement: Vec<Statement>,
}

impl Document {
    #[inline]
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    /// Parse policy document text.
    ///
    /// Anything after the closing brace of the top-level object is ignored.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut deserializer = serde_json::Deserializer::from_str(text);
        match Document::deserialize(&mut deserializer) {
            Ok(document) => Ok(document),
            Err(e) => {
                debug!("Failed to parse policy document: {:?}", e);
                Err(e.into())
            }
        }
    }

    #[inline]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[inline]
    pub fn statement(&self) -> &[Statement] {
        &self.statement
    }
}

impl<'de> Visitor<'de> for DocumentBuilder {
    type Value = Document;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        formatter.write_str("policy")
    }

    fn visit_map<A: MapAccess<'de>>(mut self, mut access: A) -> Result<Self::Value, A::Error> {
        let builder = &mut self;
        let mut version_seen = false;
        let mut id_seen = false;
        let mut statement_seen = false;

        while let Some(key) = access.next_key::<String>()? {
            match key.as_str() {
                "Version" => {
                    if version_seen {
                        return Err(de::Error::duplicate_field("Version"));
                    }
                    version_seen = true;
                    builder.version(access.next_value::<String>()?);
                }
                "Id" => {
                    if id_seen {
                        return Err(de::Error::duplicate_field("Id"));
                    }
                    id_seen = true;
                    builder.id(access.next_value::<String>()?);
                }
                "Statement" => {
                    if statement_seen {
                        return Err(de::Error::duplicate_field("Statement"));
                    }
                    statement_seen = true;
                    let NonEmptyList(statement) = access.next_value::<NonEmptyList<Statement>>()?;
                    builder.statement(statement);
                }
                _ => return Err(de::Error::unknown_field(&key, &["Version", "Id", "Statement"])),
            }
        }

        if !statement_seen {
            return Err(de::Error::missing_field("Statement"));
        }

        self.build().map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Document, D::Error> {
        d.deserialize_map(DocumentBuilder::default())
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{AnyOrList, Document, Element, ParseErrorCategory, Statement},
        indoc::indoc,
        pretty_assertions::assert_eq,
    };

    #[test_log::test]
    fn test_typical_document() {
        let document = Document::parse(indoc! { r#"
            {
                "Version": "2012-10-17",
                "Id": "PolicyId",
                "Statement": [
                    {
                        "Effect": "Deny",
                        "Action": "iam:CreateUser",
                        "Resource": "*"
                    },
                    {
                        "Effect": "Allow",
                        "Action": ["*"],
                        "Resource": "*"
                    }
                ]
            }"# })
        .unwrap();

        assert_eq!(document.version(), Some("2012-10-17"));
        assert_eq!(document.id(), Some("PolicyId"));
        assert_eq!(document.statement().len(), 2);
        assert_eq!(
            document.statement()[0],
            Statement::new(vec![
                Element::Effect("Deny".to_string()),
                Element::Action(AnyOrList::from("iam:CreateUser")),
                Element::Resource(AnyOrList::Any),
            ])
        );
    }

    #[test_log::test]
    fn test_properties_in_any_order() {
        let document = Document::parse(r#"{"Statement": [{"Effect": "Allow"}], "Id": "x", "Version": "whatever"}"#).unwrap();
        assert_eq!(document.version(), Some("whatever"));
        assert_eq!(document.id(), Some("x"));

        let document = Document::parse(r#"{"Statement": [{"Effect": "Allow"}]}"#).unwrap();
        assert_eq!(document.version(), None);
        assert_eq!(document.id(), None);
    }

    #[test_log::test]
    fn test_trailing_content_ignored() {
        let document = Document::parse("\n\n  {\"Statement\": [{\"Sid\": \"1\"}]} trailing } garbage [").unwrap();
        assert_eq!(document.statement().len(), 1);
    }

    #[test_log::test]
    fn test_missing_and_duplicate_fields() {
        let e = Document::parse("{}").unwrap_err();
        assert_eq!(e.message(), "missing field `Statement`");
        assert_eq!(e.category(), ParseErrorCategory::Data);

        let e = Document::parse(r#"{"Version": "2012-10-17"}"#).unwrap_err();
        assert_eq!(e.message(), "missing field `Statement`");

        let e = Document::parse(r#"{"Id": "a", "Id": "b", "Statement": [{"Sid": "1"}]}"#).unwrap_err();
        assert_eq!(e.message(), "duplicate field `Id`");

        let e = Document::parse(r#"{"Statement": [{"Sid": "1"}], "Statement": [{"Sid": "2"}]}"#).unwrap_err();
        assert_eq!(e.message(), "duplicate field `Statement`");
    }

    #[test_log::test]
    fn test_bad_documents() {
        let e = Document::parse(r#"{"Version": "2012-10-17", "Statement": []}"#).unwrap_err();
        assert_eq!(e.message(), "invalid length 0, expected a non-empty list");
        assert_eq!(e.line(), 1);

        let e = Document::parse(r#"{"Statement": {"Effect": "Allow"}}"#).unwrap_err();
        assert_eq!(e.message(), "invalid type: map, expected a non-empty list");

        let e = Document::parse(r#"{"Statement": [{"Effect": "Allow"}], "Extra": 1}"#).unwrap_err();
        assert_eq!(e.message(), "unknown field `Extra`, expected one of `Version`, `Id`, `Statement`");

        let e = Document::parse(r#"{"Version": 2012, "Statement": [{"Effect": "Allow"}]}"#).unwrap_err();
        assert_eq!(e.message(), "invalid type: integer `2012`, expected a string");

        let e = Document::parse("[1, 2]").unwrap_err();
        assert_eq!(e.message(), "invalid type: sequence, expected policy");

        let e = Document::parse("").unwrap_err();
        assert_eq!(e.category(), ParseErrorCategory::Eof);
    }

    #[test_log::test]
    fn test_escaped_keys() {
        let document = Document::parse(r#"{"Vers\u0069on": "2012-10-17", "\u0053tatement": [{"Sid": "1"}]}"#).unwrap();
        assert_eq!(document.version(), Some("2012-10-17"));
        assert_eq!(document.statement().len(), 1);
    }

    #[test_log::test]
    fn test_trailing_comma_rejected() {
        let e = Document::parse(r#"{"Version": "2012-10-17", "Statement": [{"Sid": "1"}],}"#).unwrap_err();
        assert_eq!(e.category(), ParseErrorCategory::Syntax);
        assert_eq!(e.message(), "trailing comma");

        let e = Document::parse(r#"{"Statement": [{"Sid": "1"},]}"#).unwrap_err();
        assert_eq!(e.message(), "trailing comma");
    }

    #[test_log::test]
    fn test_error_position() {
        let e = Document::parse(indoc! { r#"
            {
                "Statement": [
                    {
                        "Effect": "Allow",
                        "Action": 7
                    }
                ]
            }"# })
        .unwrap_err();
        assert_eq!(e.line(), 5);
        assert!(e.message().starts_with("invalid type: integer `7`"));
        assert_eq!(e.category(), ParseErrorCategory::Data);
    }

    #[test_log::test]
    fn test_builder() {
        let document = Document::builder()
            .version("2012-10-17")
            .statement(vec![Statement::new(vec![Element::Sid("1".to_string())])])
            .build()
            .unwrap();
        assert_eq!(document.version(), Some("2012-10-17"));
        assert_eq!(document.id(), None);

        let e = Document::builder().build().unwrap_err();
        assert_eq!(e.to_string(), "`statement` must be initialized");
    }
}
