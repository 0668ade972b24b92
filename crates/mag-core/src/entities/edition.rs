use serde::{Deserialize, Deserializer, Serialize};

/// One published issue of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edition {
    /// Unique within a project; doubles as the bundle key (e.g. `/welcome`).
    pub path: String,
    pub href: String,
    pub title: String,
    /// Unix timestamp in seconds. `None` for unpublished editions.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub published: Option<i64>,
    #[serde(default)]
    pub num_articles: Option<u32>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub tags: Vec<serde_json::Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub custom_image_src: Option<String>,
    #[serde(default)]
    pub screenshot_src: Option<String>,
}

/// Accept integer, float, and numeric-string timestamps.
///
/// Anything else decodes as `None` so a single malformed record cannot fail a
/// whole project document; it simply sorts as least recent.
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(timestamp_from_value))
}

#[allow(clippy::cast_possible_truncation)]
fn timestamp_from_value(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edition_with(published: &str) -> Edition {
        serde_json::from_str(&format!(
            r#"{{"path": "/a", "href": "https://x/a", "title": "A", "published": {published}}}"#
        ))
        .unwrap()
    }

    #[test]
    fn parses_service_fixture() {
        let json = r#"{
            "custom_image_src": null,
            "description": "",
            "href": "https://testproject.localdev.h5dev.xyz/test",
            "lang": "en",
            "num_articles": 2,
            "path": "/test",
            "published": 1646611200,
            "screenshot_src": "https://testproject.localdev.h5dev.xyz/testproject/test/cover/1654/__screenshot.jpg",
            "tags": [],
            "title": "Be yourself"
        }"#;
        let edition: Edition = serde_json::from_str(json).unwrap();
        assert_eq!(edition.path, "/test");
        assert_eq!(edition.published, Some(1_646_611_200));
        assert_eq!(edition.num_articles, Some(2));
        assert_eq!(edition.description.as_deref(), Some(""));
        assert!(edition.custom_image_src.is_none());
    }

    #[test]
    fn timestamp_accepts_numeric_variants() {
        assert_eq!(edition_with("1644451200").published, Some(1_644_451_200));
        assert_eq!(edition_with("1644451200.9").published, Some(1_644_451_200));
        assert_eq!(edition_with(r#""1644451200""#).published, Some(1_644_451_200));
    }

    #[test]
    fn timestamp_falls_back_to_none() {
        assert_eq!(edition_with("null").published, None);
        assert_eq!(edition_with("true").published, None);
        assert_eq!(edition_with(r#""soon""#).published, None);

        let missing: Edition =
            serde_json::from_str(r#"{"path": "/a", "href": "https://x/a", "title": "A"}"#).unwrap();
        assert_eq!(missing.published, None);
    }
}
