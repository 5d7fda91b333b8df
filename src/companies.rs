//! Maps free-text company labels from file names and cells to canonical company names.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::CompanyConfig;

pub const UNKNOWN_COMPANY: &str = "Неизвестная компания";

// Specific keywords must precede the generic fragments they contain.
const KEYWORD_RULES: &[(&str, &str)] = &[
    ("саханефтегазсбыт", "Саханефтегазсбыт"),
    ("саха нефтегазсбыт", "Саханефтегазсбыт"),
    ("снгс", "Саханефтегазсбыт"),
    ("туймаада", "Туймаада-Нефть"),
    ("сибойл", "Сибойл"),
    ("сибирь ойл", "Сибойл"),
    ("экто-ойл", "ЭКТО-Ойл"),
    ("эктоойл", "ЭКТО-Ойл"),
    ("экто ойл", "ЭКТО-Ойл"),
    ("сибирское топливо", "Сибирское топливо"),
    ("паритет", "Паритет"),
    ("газпром", "Газпром"),
    ("роснефть", "Роснефть"),
    ("татнефть", "Татнефть"),

    ("саха", "Саханефтегазсбыт"),
    ("экто", "ЭКТО-Ойл"),
    ("сибирск", "Сибирское топливо"),
    ("сибир", "Сибойл"),
];

const CONJUNCTIVE_RULES: &[(&[&str], &str)] = &[
    (&["нефтегаз", "сбыт", "якут"], "Саханефтегазсбыт"),
    (&["туй", "нефть"], "Туймаада-Нефть"),
    (&["сиб", "топл"], "Сибирское топливо"),
    (&["сиб", "ойл"], "Сибойл"),
];

struct CompanyRule {
    keywords: Vec<String>,
    name: String,
}

impl CompanyRule {
    fn new<K: Into<String>>(keywords: impl IntoIterator<Item = K>, name: &str) -> CompanyRule {
        CompanyRule {
            keywords: keywords.into_iter().map(Into::into).collect(),
            name: name.to_owned(),
        }
    }

    fn matches(&self, value: &str) -> bool {
        self.keywords.iter().all(|keyword| value.contains(keyword.as_str()))
    }
}

/// Evaluates a single ordered rule list: configured rules, then single keyword rules, then conjunctive
/// rules. The first matching rule wins.
pub struct CompanyNormalizer {
    rules: Vec<CompanyRule>,
}

impl Default for CompanyNormalizer {
    fn default() -> CompanyNormalizer {
        CompanyNormalizer::new(&[])
    }
}

impl CompanyNormalizer {
    pub fn new(companies: &[CompanyConfig]) -> CompanyNormalizer {
        let mut rules = Vec::new();

        for company in companies {
            for pattern in &company.patterns {
                rules.push(CompanyRule::new([pattern.to_lowercase()], &company.name));
            }
        }

        for &(keyword, name) in KEYWORD_RULES {
            rules.push(CompanyRule::new([keyword], name));
        }

        for &(keywords, name) in CONJUNCTIVE_RULES {
            rules.push(CompanyRule::new(keywords.iter().copied(), name));
        }

        CompanyNormalizer {rules}
    }

    pub fn find(&self, value: &str) -> Option<&str> {
        let value = clean_name(value).to_lowercase();
        if value.is_empty() {
            return None;
        }

        self.rules.iter()
            .find(|rule| rule.matches(&value))
            .map(|rule| rule.name.as_str())
    }

    pub fn normalize(&self, value: &str) -> String {
        let cleaned = clean_name(value);
        if cleaned.is_empty() {
            return UNKNOWN_COMPANY.to_owned();
        }

        match self.find(&cleaned) {
            Some(name) => name.to_owned(),
            None => cleaned,
        }
    }
}

pub fn is_unknown(name: &str) -> bool {
    name == UNKNOWN_COMPANY
}

fn clean_name(value: &str) -> String {
    lazy_static! {
        static ref QUOTES_REGEX: Regex = Regex::new(r#"["'«»“”„`]"#).unwrap();
        static ref LEGAL_FORM_REGEX: Regex = Regex::new(
            r"(?i)\b(ооо|оао|зао|пао|ао|ип|llc|jsc|ltd|inc)\b\.?").unwrap();
        static ref SPACES_REGEX: Regex = Regex::new(r"\s+").unwrap();
    }

    let value = QUOTES_REGEX.replace_all(value, " ");
    let value = LEGAL_FORM_REGEX.replace_all(&value, " ");
    SPACES_REGEX.replace_all(value.trim(), " ").into_owned()
}
