use std::collections::HashMap;

use lazy_static::*;

use crate::config::{FLAG_CDN_PREFIX, UNKNOWN_FLAG};

lazy_static! {
    /// Flag emojis mapped to ISO 3166-1 alpha-2 codes, covering every
    /// country that hosts a Grand Prix. Schedules may use either form.
    static ref FLAG_CODES: HashMap<&'static str, &'static str> = [
        ("🇦🇺", "au"),
        ("🇨🇳", "cn"),
        ("🇯🇵", "jp"),
        ("🇧🇭", "bh"),
        ("🇸🇦", "sa"),
        ("🇺🇸", "us"),
        ("🇨🇦", "ca"),
        ("🇲🇨", "mc"),
        ("🇪🇸", "es"),
        ("🇦🇹", "at"),
        ("🇬🇧", "gb"),
        ("🇧🇪", "be"),
        ("🇭🇺", "hu"),
        ("🇳🇱", "nl"),
        ("🇮🇹", "it"),
        ("🇦🇿", "az"),
        ("🇸🇬", "sg"),
        ("🇲🇽", "mx"),
        ("🇧🇷", "br"),
        ("🇶🇦", "qa"),
        ("🇦🇪", "ae"),
    ]
    .iter()
    .copied()
    .collect();
}

/// The ISO code for a flag identifier, which is either a flag emoji or
/// already an ISO code. Identifiers we cannot resolve map to a sentinel
/// code instead of failing the lookup.
pub fn iso_code(flag: &str) -> String {
    if let Some(code) = FLAG_CODES.get(flag) {
        return (*code).to_string();
    }
    if flag.len() == 2 && flag.chars().all(|c| c.is_ascii_alphabetic()) {
        return flag.to_ascii_lowercase();
    }
    UNKNOWN_FLAG.to_string()
}

/// The flag image URL for a race's flag identifier.
pub fn flag_url(flag: &str) -> String {
    format!("{}/{}.png", FLAG_CDN_PREFIX, iso_code(flag))
}
