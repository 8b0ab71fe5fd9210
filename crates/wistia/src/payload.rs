//! Typed request bodies sent to the Wistia API.
//!
//! Everything ends up as a flat list of form fields, so [`Payload`] is the
//! common denominator, and the rest of the types here convert into it.

/// Ordered list of form fields. Repeated keys are allowed and preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    fields: Vec<(String, String)>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.fields.push((key.into(), value.to_string()));
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Self::new();
        payload.extend(iter);
        payload
    }
}

impl<K: Into<String>, V: ToString> Extend<(K, V)> for Payload {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.push(key, value);
        }
    }
}

/// Parameters that the uploader must supply when redeeming an expiring token.
///
/// See <https://wistia.com/support/developers/uploader#using-expiring-tokens>
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredParams {
    params: Vec<(String, String)>,
}

impl RequiredParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl ToString) {
        self.params.push((name.into(), value.to_string()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Each param becomes a separate `required_params[{name}]` field.
    pub(crate) fn to_payload(&self) -> Payload {
        self.iter()
            .map(|(name, value)| (format!("required_params[{name}]"), value))
            .collect()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for RequiredParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |params, (name, value)| params.with(name, value))
    }
}

/// Options for [`Client::project_create()`](crate::Client::project_create).
///
/// The flags that are left as `None` fall back to the safe defaults:
/// `anonymousCanUpload=false`, `anonymousCanDownload=false`, `public=true`.
/// Projects are public by default, control where they can be embedded with
/// domain restrictions and expiring tokens.
///
/// See <https://wistia.com/support/developers/data-api#projects_create>
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectOptions {
    pub anonymous_can_upload: Option<bool>,
    pub anonymous_can_download: Option<bool>,
    pub public: Option<bool>,

    /// Any other fields supported by the API, sent as-is after the flags.
    /// Fields that repeat `name` or one of the flags are not sent twice.
    pub extra: Payload,
}

impl ProjectOptions {
    /// `name` and each flag are sent exactly once. A flag left as `None` takes
    /// its value from `extra` if it is there, and falls back to the default
    /// otherwise. A `name` field in `extra` is dropped.
    pub(crate) fn into_payload(self, name: &str) -> Payload {
        let mut extra = self.extra.fields;

        take_last(&mut extra, "name");

        let mut flag = |key: &str, value: Option<bool>, default: bool| {
            let from_extra = take_last(&mut extra, key);
            value
                .map(|value| value.to_string())
                .or(from_extra)
                .unwrap_or_else(|| default.to_string())
        };

        let anonymous_can_upload = flag("anonymousCanUpload", self.anonymous_can_upload, false);
        let anonymous_can_download =
            flag("anonymousCanDownload", self.anonymous_can_download, false);
        let public = flag("public", self.public, true);

        let mut payload = Payload::new()
            .with("name", name)
            .with("anonymousCanUpload", anonymous_can_upload)
            .with("anonymousCanDownload", anonymous_can_download)
            .with("public", public);

        payload.extend(extra);
        payload
    }
}

/// Removes all fields with the given key, returning the value of the last one
fn take_last(fields: &mut Vec<(String, String)>, key: &str) -> Option<String> {
    let mut last = None;
    fields.retain(|(field, value)| {
        if field != key {
            return true;
        }
        last = Some(value.clone());
        false
    });
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::{expect, Expect};

    #[track_caller]
    fn assert_fields(payload: &Payload, expected: Expect) {
        let actual = payload
            .fields()
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("\n");

        expected.assert_eq(&actual);
    }

    #[test]
    fn required_params_keep_order_and_duplicates() {
        let params = RequiredParams::from_iter([
            ("access", "true"),
            ("project_id", "p1"),
            ("access", "false"),
        ]);

        assert_fields(
            &params.to_payload(),
            expect![[r#"
                required_params[access]=true
                required_params[project_id]=p1
                required_params[access]=false"#]],
        );
    }

    #[test]
    fn project_defaults() {
        assert_fields(
            &ProjectOptions::default().into_payload("Demo"),
            expect![[r#"
                name=Demo
                anonymousCanUpload=false
                anonymousCanDownload=false
                public=true"#]],
        );
    }

    #[test]
    fn project_overrides_are_independent() {
        let options = ProjectOptions {
            anonymous_can_download: Some(true),
            ..Default::default()
        };
        assert_fields(
            &options.into_payload("Demo"),
            expect![[r#"
                name=Demo
                anonymousCanUpload=false
                anonymousCanDownload=true
                public=true"#]],
        );

        let options = ProjectOptions {
            anonymous_can_upload: Some(true),
            public: Some(false),
            extra: Payload::new().with("adminEmail", "admin@example.com"),
            ..Default::default()
        };
        assert_fields(
            &options.into_payload("Demo"),
            expect![[r#"
                name=Demo
                anonymousCanUpload=true
                anonymousCanDownload=false
                public=false
                adminEmail=admin@example.com"#]],
        );
    }

    #[test]
    fn project_extra_does_not_repeat_known_fields() {
        let options = ProjectOptions {
            anonymous_can_upload: Some(false),
            extra: Payload::new()
                .with("name", "Other")
                .with("anonymousCanUpload", true)
                .with("public", true)
                .with("public", false)
                .with("adminEmail", "admin@example.com"),
            ..Default::default()
        };

        assert_fields(
            &options.into_payload("Demo"),
            expect![[r#"
                name=Demo
                anonymousCanUpload=false
                anonymousCanDownload=false
                public=false
                adminEmail=admin@example.com"#]],
        );
    }
}
