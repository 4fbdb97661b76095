use once_cell::sync::Lazy;
use regex::Regex;

pub const INVALID_EMBARK_ID: &str = "The ID entered does not follow Embark ID's proper format";

static EMBARK_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{3,16}#[0-9]{4}$").expect("embark id pattern"));

/// `name#1234`: 3-16 word characters, a hash, four digits.
pub fn validate_embark_id(id: &str) -> bool {
    EMBARK_ID.is_match(id)
}
