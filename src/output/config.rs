use std::env;
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

static JSON_OVERRIDE: OnceLock<bool> = OnceLock::new();

// `--json` on the command line beats OTT_OUTPUT_FORMAT
pub fn set_json_mode(v: bool) {
    let _ = JSON_OVERRIDE.set(v);
}

impl OutputConfig {
    pub fn from_env() -> Self {
        Self::from_values(env::var("OTT_OUTPUT_FORMAT").ok().as_deref(), env::var("OTT_OUTPUT_PRETTY").ok().as_deref())
    }

    pub fn current() -> Self {
        let mut cfg = Self::from_env();
        if matches!(JSON_OVERRIDE.get(), Some(true)) { cfg.format = OutputFormat::Json; }
        cfg
    }

    fn from_values(format: Option<&str>, pretty: Option<&str>) -> Self {
        let format = match format {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        };
        let pretty = match pretty {
            Some(v) if v.eq_ignore_ascii_case("1") || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes") => true,
            _ => false,
        };
        OutputConfig { format, pretty }
    }
}
