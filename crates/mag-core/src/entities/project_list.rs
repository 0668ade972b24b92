use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Summary of a project's most recent edition, as embedded in the project index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditionSummary {
    pub path: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::entities::edition::lenient_timestamp"
    )]
    pub published: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_src: Option<String>,
}

/// The `latest_edition` field of a project-index row.
///
/// `None` is the service's explicit "no published edition" marker (`null`).
/// `Unknown` means the field was missing entirely and is kept distinct so the
/// filter does not drop rows it knows nothing about.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LatestEdition {
    #[default]
    Unknown,
    None,
    Edition(EditionSummary),
    /// Any other defined JSON value, including `0`, `false`, and `""`.
    Opaque(serde_json::Value),
}

impl LatestEdition {
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// `true` unless the service explicitly sent `null`.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        !matches!(self, Self::None)
    }

    #[must_use]
    pub const fn summary(&self) -> Option<&EditionSummary> {
        match self {
            Self::Edition(summary) => Some(summary),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for LatestEdition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(Self::None);
        }
        if value.is_object() {
            if let Ok(summary) = serde_json::from_value::<EditionSummary>(value.clone()) {
                return Ok(Self::Edition(summary));
            }
        }
        Ok(Self::Opaque(value))
    }
}

impl Serialize for LatestEdition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Unknown | Self::None => serializer.serialize_none(),
            Self::Edition(summary) => summary.serialize(serializer),
            Self::Opaque(value) => value.serialize(serializer),
        }
    }
}

/// One row of the project index returned by `POST /projects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectListEntry {
    pub domain: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "LatestEdition::is_unknown")]
    pub latest_edition: LatestEdition,
    /// Fields the index carries that magkit does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(json: &str) -> ProjectListEntry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn null_is_the_none_marker() {
        let row = entry(r#"{"domain": "hallo", "latest_edition": null, "name": "hallo"}"#);
        assert_eq!(row.latest_edition, LatestEdition::None);
        assert!(!row.latest_edition.is_present());
    }

    #[test]
    fn missing_field_is_unknown_not_none() {
        let row = entry(r#"{"domain": "hallo", "name": "hallo"}"#);
        assert_eq!(row.latest_edition, LatestEdition::Unknown);
        assert!(row.latest_edition.is_present());
    }

    #[test]
    fn falsy_values_are_present() {
        for raw in ["0", "false", r#""""#, "[]"] {
            let row = entry(&format!(r#"{{"domain": "d", "latest_edition": {raw}}}"#));
            assert!(
                matches!(row.latest_edition, LatestEdition::Opaque(_)),
                "{raw} should decode as opaque"
            );
            assert!(row.latest_edition.is_present());
        }
    }

    #[test]
    fn summary_decodes_either_date_style() {
        let row = entry(
            r#"{"domain": "testproject", "latest_edition": {"href": "https://testproject.localdev.h5dev.xyz/huizen", "path": "huizen", "publication_date": "2022-04-09", "title": "Huizen"}, "name": "testproject"}"#,
        );
        let summary = row.latest_edition.summary().unwrap();
        assert_eq!(summary.publication_date.as_deref(), Some("2022-04-09"));
        assert_eq!(summary.published, None);

        let row = entry(
            r#"{"domain": "epic", "latest_edition": {"path": "welcome", "published": 1649721600, "title": "Pauw"}, "name": "epic"}"#,
        );
        assert_eq!(
            row.latest_edition.summary().unwrap().published,
            Some(1_649_721_600)
        );
    }

    #[test]
    fn serialization_keeps_null_and_extra_fields() {
        let row = entry(r#"{"domain": "hallo", "latest_edition": null, "name": "hallo", "plan": "pro"}"#);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"domain": "hallo", "latest_edition": null, "name": "hallo", "plan": "pro"})
        );

        let row = entry(r#"{"domain": "hallo", "name": "hallo"}"#);
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("latest_edition").is_none());
    }
}
