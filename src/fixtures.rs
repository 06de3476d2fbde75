#[cfg(test)]
pub mod test {
    use std::io::{self, Read};

    use serde::{Deserialize, Serialize};

    use crate::overrides::{BoxError, OverrideApplier};
    use crate::source::DocumentSource;
    use crate::validate::{Validator, Violations};

    /// Well-formed baseline document used across pipeline tests.
    pub const WELL_FORMED: &str =
        r#"{"global":{"log":{"msg-level":"Debug"}},"cors":{"origins":["*"]}}"#;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    pub struct TestSettings {
        pub global: Global,
        pub cors: Cors,
        pub custom: Custom,
        pub google: Google,
    }

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    pub struct Global {
        pub log: Log,
    }

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    pub struct Log {
        /// Document key overridden by an explicit per-field tag.
        #[serde(rename = "msg-level")]
        pub level: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    pub struct Cors {
        pub origins: Vec<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    pub struct Custom {
        pub service: Service,
        pub enabled: bool,
    }

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    pub struct Service {
        pub name: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    pub struct Google {
        pub app: App,
    }

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    pub struct App {
        pub credentials: String,
    }

    /// A document source whose read and/or close can be made to fail.
    #[derive(Default)]
    pub struct FaultySource {
        pub fail_read: bool,
        pub fail_close: bool,
    }

    impl Read for FaultySource {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            if self.fail_read {
                Err(io::Error::other("read error"))
            } else {
                Ok(0) // immediate end of stream
            }
        }
    }

    impl DocumentSource for FaultySource {
        fn close(&mut self) -> io::Result<()> {
            if self.fail_close {
                Err(io::Error::other("close error"))
            } else {
                Ok(())
            }
        }
    }

    /// Sets fields that arrive from outside the document, or fails on demand.
    #[derive(Default)]
    pub struct TestUpdater {
        pub log_level: Option<String>,
        pub credentials: Option<String>,
        pub fail_with: Option<String>,
    }

    impl OverrideApplier<TestSettings> for TestUpdater {
        fn apply(&self, settings: &mut TestSettings) -> Result<(), BoxError> {
            if let Some(level) = &self.log_level {
                settings.global.log.level = level.clone();
            }
            if let Some(credentials) = &self.credentials {
                settings.google.app.credentials = credentials.clone();
            }
            match &self.fail_with {
                Some(message) => Err(message.clone().into()),
                None => Ok(()),
            }
        }
    }

    /// Requires both the log level and the Google credentials to be set.
    pub struct RequiredFields;

    impl Validator<TestSettings> for RequiredFields {
        fn validate(&self, settings: &TestSettings) -> Result<(), Violations> {
            let mut violations = Violations::new();
            if settings.global.log.level.is_empty() {
                violations.push("global.log.level is required");
            }
            if settings.google.app.credentials.is_empty() {
                violations.push("google.app.credentials is required");
            }
            violations.into_result()
        }
    }

    #[test]
    fn test_settings_decodes_the_well_formed_document() {
        let settings: TestSettings = serde_json::from_str(WELL_FORMED).unwrap();
        assert_eq!(settings.global.log.level, "Debug");
        assert_eq!(settings.cors.origins, ["*"]);
        assert_eq!(settings.google.app.credentials, "");
    }
}
