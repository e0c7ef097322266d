use crate::utils::error::Result;
use serde_json::Value;

/// Static manifest of every language bundle shipped with the binary.
/// Adding a language means adding a file and one line here; nothing is
/// discovered at runtime.
const MANIFEST: &[(&str, &str)] = &[
    ("en", include_str!("locales/en.json")),
    ("es", include_str!("locales/es.json")),
    ("nl", include_str!("locales/nl.json")),
];

const FALLBACK_LANGUAGE: &str = "en";

/// Message catalog for one language. An explicit handle, constructed
/// once and passed around; there is no process-wide cache behind it.
/// Lookups fall back to English, and past that to the key itself so a
/// missing translation never panics or blanks out a message.
pub struct Catalog {
    bundle: Value,
    fallback: Value,
}

impl Catalog {
    pub fn new(language: &str) -> Result<Self> {
        let fallback = load_bundle(FALLBACK_LANGUAGE)?;
        let bundle = match MANIFEST.iter().find(|(code, _)| *code == language) {
            Some(_) => load_bundle(language)?,
            None => {
                tracing::warn!("Unknown language '{}', falling back to English", language);
                fallback.clone()
            }
        };
        Ok(Self { bundle, fallback })
    }

    pub fn languages() -> Vec<&'static str> {
        MANIFEST.iter().map(|(code, _)| *code).collect()
    }

    /// Resolve a dot-separated key path like `import.summary`.
    pub fn text(&self, key_path: &str) -> String {
        lookup(&self.bundle, key_path)
            .or_else(|| lookup(&self.fallback, key_path))
            .unwrap_or(key_path)
            .to_string()
    }

    /// Resolve a key path and substitute `{name}` placeholders.
    pub fn render(&self, key_path: &str, args: &[(&str, String)]) -> String {
        let mut message = self.text(key_path);
        for (name, value) in args {
            message = message.replace(&format!("{{{}}}", name), value);
        }
        message
    }
}

fn load_bundle(language: &str) -> Result<Value> {
    let &(_, raw) = MANIFEST
        .iter()
        .find(|(code, _)| *code == language)
        .unwrap_or(&MANIFEST[0]);
    Ok(serde_json::from_str(raw)?)
}

fn lookup<'a>(bundle: &'a Value, key_path: &str) -> Option<&'a str> {
    let mut node = bundle;
    for segment in key_path.split('.') {
        node = node.get(segment)?;
    }
    node.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_manifest_bundle_parses() {
        for (code, _) in MANIFEST {
            Catalog::new(code).unwrap();
        }
    }

    #[test]
    fn test_key_path_lookup() {
        let catalog = Catalog::new("en").unwrap();
        assert_eq!(catalog.text("import.summary"), "Imported {count} rows");
    }

    #[test]
    fn test_render_substitutes_placeholders() {
        let catalog = Catalog::new("es").unwrap();
        let message = catalog.render("import.summary", &[("count", "7".to_string())]);
        assert_eq!(message, "Se importaron 7 filas");
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        let catalog = Catalog::new("xx").unwrap();
        assert_eq!(catalog.text("import.summary"), "Imported {count} rows");
    }

    #[test]
    fn test_missing_key_resolves_to_key_path() {
        let catalog = Catalog::new("en").unwrap();
        assert_eq!(catalog.text("import.no_such_key"), "import.no_such_key");
    }

    #[test]
    fn test_all_bundles_cover_the_english_keys() {
        fn keys(prefix: &str, node: &Value, out: &mut Vec<String>) {
            if let Value::Object(map) = node {
                for (k, v) in map {
                    let path = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{}.{}", prefix, k)
                    };
                    match v {
                        Value::Object(_) => keys(&path, v, out),
                        _ => out.push(path),
                    }
                }
            }
        }

        let english = load_bundle("en").unwrap();
        let mut expected = Vec::new();
        keys("", &english, &mut expected);
        assert!(!expected.is_empty());

        for (code, _) in MANIFEST {
            let bundle = load_bundle(code).unwrap();
            for key in &expected {
                assert!(
                    lookup(&bundle, key).is_some(),
                    "bundle '{}' is missing key '{}'",
                    code,
                    key
                );
            }
        }
    }
}
