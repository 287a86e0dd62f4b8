//! Autocomplete option table emitter
//!
//! Produces the editor's `METHOD_OPTIONS` lookup: for every type alias the
//! resolver collected, a method-name key is derived (first character
//! lowercased, trailing `Type` suffix stripped), the resolver's raw
//! per-method results are merged in, and a hand-authored alias table fans
//! certain derived keys out to the additional names the builders actually
//! use. Every collision keeps the option set with more values. A second
//! block maps the original alias names to their sets for validation error
//! messages. Both blocks are key-sorted for deterministic output.

use crate::diagnostics::ScribeResult;
use crate::resolve::LiteralOptionTable;
use indexmap::IndexMap;

/// Derived key to the additional output keys it also populates
const METHOD_ALIASES: &[(&str, &[&str])] = &[
    ("musicGenre", &["genre"]),
    ("personaTone", &["tone"]),
    ("personaExpertise", &["expertise"]),
    ("outputLength", &["length"]),
    ("outputStyle", &["style"]),
    ("shotType", &["shot"]),
    ("cameraAngle", &["angle"]),
    ("cameraMovement", &["movement"]),
    ("lensType", &["lens"]),
    ("lightingType", &["lighting", "lightingType"]),
    ("focusType", &["focus"]),
    ("bokehStyle", &["bokeh"]),
    ("filterType", &["filter"]),
    ("colorPalette", &["palette"]),
    ("artStyle", &["medium", "look", "artStyle"]),
    ("videoPacing", &["pacing"]),
    ("videoTransition", &["transition"]),
    ("vocalStyle", &["vocalStyle"]),
    ("vocalLanguage", &["language"]),
    ("weatherLighting", &["weather"]),
    ("sensorFormat", &["sensor"]),
    ("songSection", &["section"]),
];

/// Autocomplete option table emitter
#[derive(Debug, Default)]
pub struct OptionsEmitter;

impl OptionsEmitter {
    /// Create a new emitter
    pub fn new() -> Self {
        Self
    }

    /// Render the option tables
    pub fn render(&self, table: &LiteralOptionTable) -> ScribeResult<String> {
        let mut lines: Vec<String> = Vec::new();

        lines.push("/**".to_string());
        lines.push(" * Auto-generated method options for editor autocomplete".to_string());
        lines.push(" * Generated from TypeScript source files via reflection".to_string());
        lines.push(" * DO NOT EDIT MANUALLY - run `scribe` to regenerate".to_string());
        lines.push(" */".to_string());
        lines.push(String::new());
        lines.push("export const METHOD_OPTIONS: Record<string, string[]> = {".to_string());

        let method_map = build_method_map(table);
        let mut keys: Vec<&String> = method_map.keys().collect();
        keys.sort();
        for key in keys {
            lines.push(format!(
                "  {}: {},",
                serde_json::to_string(key)?,
                serde_json::to_string(&method_map[key])?
            ));
        }

        lines.push("};".to_string());
        lines.push(String::new());
        lines.push(
            "// Type name to valid options mapping for enhanced error messages".to_string(),
        );
        lines.push("export const TYPE_OPTIONS: Record<string, string[]> = {".to_string());

        let mut alias_keys: Vec<&String> = table.type_aliases.keys().collect();
        alias_keys.sort();
        for key in alias_keys {
            let values = &table.type_aliases[key];
            if values.is_empty() {
                continue;
            }
            lines.push(format!(
                "  {}: {},",
                serde_json::to_string(key)?,
                serde_json::to_string(values)?
            ));
        }

        lines.push("};".to_string());
        lines.push(String::new());

        Ok(lines.join("\n"))
    }
}

/// Build the merged method-name map: derived alias keys, alias fan-out,
/// then the resolver's raw per-method results. Larger sets win everywhere.
fn build_method_map(table: &LiteralOptionTable) -> IndexMap<String, Vec<String>> {
    let mut method_map: IndexMap<String, Vec<String>> = IndexMap::new();

    for (alias_name, values) in &table.type_aliases {
        if values.is_empty() {
            continue;
        }
        let derived = derive_method_key(alias_name);
        insert_longer(&mut method_map, derived.clone(), values);

        for target in alias_targets(&derived) {
            insert_longer(&mut method_map, target.to_string(), values);
        }
    }

    for (method_name, values) in &table.method_options {
        if values.is_empty() {
            continue;
        }
        insert_longer(&mut method_map, method_name.clone(), values);
    }

    method_map
}

/// Derive a likely method name from a type-alias name: lowercase the first
/// character and strip a trailing `Type` suffix word
fn derive_method_key(name: &str) -> String {
    let mut chars = name.chars();
    let mut key = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    if key.len() > 4 && key.ends_with("Type") {
        key.truncate(key.len() - 4);
    }
    key
}

/// Additional output keys for a derived key
fn alias_targets(derived: &str) -> &'static [&'static str] {
    METHOD_ALIASES
        .iter()
        .find(|(key, _)| *key == derived)
        .map(|(_, targets)| *targets)
        .unwrap_or(&[])
}

/// Keep whichever option set has the greater number of values
fn insert_longer(map: &mut IndexMap<String, Vec<String>>, key: String, values: &[String]) {
    match map.get(&key) {
        Some(existing) if existing.len() >= values.len() => {}
        _ => {
            map.insert(key, values.to_vec());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(
        aliases: &[(&str, &[&str])],
        methods: &[(&str, &[&str])],
    ) -> LiteralOptionTable {
        LiteralOptionTable {
            type_aliases: aliases
                .iter()
                .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
                .collect(),
            method_options: methods
                .iter()
                .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
                .collect(),
        }
    }

    #[test]
    fn test_derive_method_key() {
        assert_eq!(derive_method_key("MusicGenre"), "musicGenre");
        assert_eq!(derive_method_key("LightingType"), "lighting");
        assert_eq!(derive_method_key("Type"), "type");
        assert_eq!(derive_method_key("ShotType"), "shot");
    }

    #[test]
    fn test_alias_fan_out() {
        let output = OptionsEmitter::new()
            .render(&table(&[("MusicGenre", &["jazz", "rock"])], &[]))
            .unwrap();

        assert!(output.contains(r#"  "musicGenre": ["jazz","rock"],"#));
        assert!(output.contains(r#"  "genre": ["jazz","rock"],"#));
    }

    #[test]
    fn test_collision_keeps_larger_set() {
        let output = OptionsEmitter::new()
            .render(&table(
                &[("MusicGenre", &["jazz", "rock"])],
                &[("genre", &["jazz", "rock", "pop", "folk"])],
            ))
            .unwrap();

        assert!(output.contains(r#"  "genre": ["jazz","rock","pop","folk"],"#));
    }

    #[test]
    fn test_smaller_raw_result_does_not_displace() {
        let output = OptionsEmitter::new()
            .render(&table(
                &[("OutputLength", &["short", "medium", "long"])],
                &[("length", &["short"])],
            ))
            .unwrap();

        assert!(output.contains(r#"  "length": ["short","medium","long"],"#));
    }

    #[test]
    fn test_method_options_keys_are_sorted() {
        let output = OptionsEmitter::new()
            .render(&table(
                &[("Zebra", &["z"]), ("Alpha", &["a"])],
                &[("middle", &["m"])],
            ))
            .unwrap();

        let alpha = output.find("\"alpha\"").unwrap();
        let middle = output.find("\"middle\"").unwrap();
        let zebra = output.find("\"zebra\"").unwrap();
        assert!(alpha < middle);
        assert!(middle < zebra);
    }

    #[test]
    fn test_type_options_block_uses_original_names() {
        let output = OptionsEmitter::new()
            .render(&table(&[("LightingType", &["soft", "hard"])], &[]))
            .unwrap();

        assert!(output.contains("export const TYPE_OPTIONS: Record<string, string[]> = {"));
        assert!(output.contains(r#"  "LightingType": ["soft","hard"],"#));
        // The derived key only appears in METHOD_OPTIONS
        let type_options_pos = output.find("TYPE_OPTIONS").unwrap();
        assert!(output[type_options_pos..].contains("\"LightingType\""));
        assert!(!output[type_options_pos..].contains("\"lighting\""));
    }

    #[test]
    fn test_render_is_pure() {
        let t = table(&[("MusicGenre", &["jazz"])], &[("tempo", &["slow", "fast"])]);
        let emitter = OptionsEmitter::new();
        assert_eq!(emitter.render(&t).unwrap(), emitter.render(&t).unwrap());
    }
}
