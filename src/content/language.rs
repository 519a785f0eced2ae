use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

const LANGUAGE_REGEX: &str = r"^[a-z]{2,3}(-[a-z0-9]{2,8})?$";

fn language_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(LANGUAGE_REGEX).expect("valid language regex"))
}

#[derive(Debug, Error, PartialEq)]
pub enum LanguageError {
    #[error("\"{0}\" is not a language code")]
    Invalid(String),
}

/// A lowercase language code such as `zh`, `en` or `zh-tw`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language(String);

impl Language {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let code = code.trim().to_lowercase().replace('_', "-");
        if language_regex().is_match(&code) {
            Ok(Language(code))
        } else {
            Err(LanguageError::Invalid(code))
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The key of one language's slice of a collection.
///
/// The default locale owns the bare collection name, every other locale gets
/// its code uppercased onto it: `articles`, `articlesEN`, `articlesZH-TW`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition(String);

impl Partition {
    pub fn for_language(
        collection: &str,
        language: &Language,
        default_locale: &Language,
    ) -> Self {
        if language == default_locale {
            Partition(collection.to_owned())
        } else {
            Partition(format!(
                "{}{}",
                collection,
                language.as_str().to_uppercase()
            ))
        }
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(code: &str) -> Language {
        code.parse().unwrap()
    }

    #[test]
    fn language_codes_are_normalised() {
        assert_eq!(lang("EN").as_str(), "en");
        assert_eq!(lang(" zh_TW ").as_str(), "zh-tw");
    }

    #[test]
    fn garbage_is_not_a_language() {
        assert!("".parse::<Language>().is_err());
        assert!("english".parse::<Language>().is_err());
        assert!("../etc".parse::<Language>().is_err());
    }

    #[test]
    fn default_locale_uses_bare_collection() {
        let zh = lang("zh");

        assert_eq!(Partition::for_language("articles", &zh, &zh).key(), "articles");
    }

    #[test]
    fn other_locales_get_uppercase_suffix() {
        let zh = lang("zh");

        assert_eq!(
            Partition::for_language("articles", &lang("en"), &zh).key(),
            "articlesEN"
        );
        assert_eq!(
            Partition::for_language("goods", &lang("zh-tw"), &lang("en")).key(),
            "goodsZH-TW"
        );
    }
}
