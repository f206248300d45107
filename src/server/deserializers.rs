use serde::{Deserialize, Deserializer};

pub fn first_page() -> i64 {
    1
}

// `?page=abc` falls back to the first page instead of rejecting the request
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().map(parse_page).unwrap_or_else(first_page))
}

// out-of-range numbers saturate so they still address a page past the end
fn parse_page(value: &str) -> i64 {
    let value = value.trim();
    if let Ok(page) = value.parse::<i64>() {
        return page;
    }
    let (negative, digits) = match value.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return first_page();
    }
    if negative {
        i64::MIN
    } else {
        i64::MAX
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    pub page: i64,
}

// clients send `null` for "nothing asked yet"
pub fn deserialize_ids_or_null<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<i64>>::deserialize(deserializer)?.unwrap_or_default())
}
