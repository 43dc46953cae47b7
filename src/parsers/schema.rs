//! Embedded schema.org data (JSON-LD) lookup.
//!
//! Store listing pages describe the app in a `SoftwareApplication` /
//! `MobileApplication` JSON document inside a `<script>` tag. The block may be
//! a single object, an array of objects or an object with a `@graph` array.

use scraper::{Html, Selector};
use serde_json::Value;

/// Outcome of scanning a document for the embedded application schema.
#[derive(Debug, Default)]
pub struct SchemaScan {
    pub schema: Option<Value>,
    /// Number of matching blocks found, decodable or not.
    pub blocks: usize,
    /// Decode errors of blocks that were skipped, in document order.
    pub decode_errors: Vec<String>,
}

/// Scan every element matching `selector` for the application object.
///
/// An object typed `*Application` wins wherever it appears; otherwise the
/// first object of the first decodable block is used.
pub fn find_embedded_schema(document: &Html, selector: &Selector) -> SchemaScan {
    let mut scan = SchemaScan::default();
    let mut fallback = None;

    for element in document.select(selector) {
        scan.blocks += 1;
        let content = element.text().collect::<String>();
        let trimmed = content.trim();

        if trimmed.is_empty() {
            scan.decode_errors.push("empty schema block".to_string());
            continue;
        }

        let json = match serde_json::from_str::<Value>(trimmed) {
            Ok(json) => json,
            Err(e) => {
                scan.decode_errors.push(e.to_string());
                continue;
            }
        };

        let candidates = candidate_objects(&json);
        if let Some(app) = candidates.iter().find(|obj| is_application_type(obj)) {
            scan.schema = Some((*app).clone());
            return scan;
        }
        match candidates.first() {
            Some(first) => {
                if fallback.is_none() {
                    fallback = Some((*first).clone());
                }
            }
            None => scan
                .decode_errors
                .push("schema block holds no JSON object".to_string()),
        }
    }

    scan.schema = fallback;
    scan
}

fn candidate_objects(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().flat_map(candidate_objects).collect(),
        Value::Object(obj) => match obj.get("@graph") {
            Some(Value::Array(graph)) => graph.iter().filter(|v| v.is_object()).collect(),
            _ => vec![value],
        },
        _ => Vec::new(),
    }
}

fn is_application_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(s)) => s.ends_with("Application"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|s| s.ends_with("Application")),
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathStep<'a> {
    Key(&'a str),
    Index(usize),
}

fn path_steps(path: &str) -> Option<Vec<PathStep<'_>>> {
    let mut steps = Vec::new();
    for segment in path.split('.') {
        let (key, mut rest) = match segment.find('[') {
            Some(pos) => (&segment[..pos], &segment[pos..]),
            None => (segment, ""),
        };
        if !key.is_empty() {
            steps.push(PathStep::Key(key));
        }
        while let Some(stripped) = rest.strip_prefix('[') {
            let end = stripped.find(']')?;
            let index = stripped[..end].parse::<usize>().ok()?;
            steps.push(PathStep::Index(index));
            rest = &stripped[end + 1..];
        }
        if !rest.is_empty() {
            return None;
        }
    }
    Some(steps)
}

/// Resolve a path such as `offers[0].price` or `author.name`.
pub fn lookup<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    let steps = path_steps(path)?;
    steps.iter().try_fold(value, |current, step| match step {
        PathStep::Key(key) => current.get(*key),
        PathStep::Index(index) => current.get(*index),
    })
}

/// Scalar JSON value as text. Strings are only trimmed; objects, arrays, null
/// and blank strings are treated as absent.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => super::non_empty(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
