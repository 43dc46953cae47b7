use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+(?:[.,]\d+)*")
        .expect("Invalid number regex")
});

const FREE_WORDS: &[&str] = &["free", "gratis", "gratuit", "kostenlos", "gratuito"];

/// Parse a decimal from listing text such as `4.5`, `$0.99`, `1,99 €`,
/// `1,299.00` or `1.299,00 €`.
///
/// With both separators present the last one is the decimal point. A lone
/// comma followed by one or two digits is a decimal comma; any other comma
/// groups thousands, as do repeated dots.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let found = NUMBER_REGEX.find(text)?.as_str();

    let normalized = match (found.rfind('.'), found.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => found.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => found.replace(',', ""),
        (None, Some(comma)) if found.matches(',').count() == 1 && found.len() - comma <= 3 => {
            found.replace(',', ".")
        }
        (None, Some(_)) => found.replace(',', ""),
        (Some(_), None) if found.matches('.').count() > 1 => found.replace('.', ""),
        _ => found.to_string(),
    };

    normalized.parse::<f64>().ok()
}

/// Parse a price, reading the store's "free" labels as zero.
pub fn parse_price_value(text: &str) -> Option<f64> {
    let lowered = text.trim().to_lowercase();
    if FREE_WORDS.iter().any(|word| lowered == *word) {
        return Some(0.0);
    }
    parse_decimal(text)
}
