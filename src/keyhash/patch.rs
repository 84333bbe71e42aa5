// src/keyhash/patch.rs
// Rewrites gperf's lookup routine so it returns a token kind instead of an
// entry pointer, and the identifier kind instead of a null pointer.
//
// Each rule must match exactly as often as gperf's C++ output shape implies.
// All counts are checked before any text is rewritten.

use regex::Regex;

use super::gperf::{GperfConfig, STRUCT_NAME};
use crate::error::ContractMismatchError;

#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub replacement: String,
    pub expected: usize,
}

/// Rules for output generated from [`render_input`](super::gperf::render_input).
pub fn cxx_rules(cfg: &GperfConfig) -> Result<Vec<RewriteRule>, regex::Error> {
    let rule = |name, pattern: &str, replacement, expected| -> Result<RewriteRule, regex::Error> {
        Ok(RewriteRule {
            name,
            pattern: Regex::new(pattern)?,
            replacement,
            expected,
        })
    };
    Ok(vec![
        // declaration inside the class and the out-of-line definition
        rule(
            "return type",
            &format!(r"struct\s*{}\s*\*", regex::escape(STRUCT_NAME)),
            format!("inline {} ", cfg.kind_type.replace('$', "$$")),
            2,
        )?,
        rule(
            "matched entry",
            r"&(wordlist\[key\])",
            "${1}.kind".to_string(),
            1,
        )?,
        rule(
            "no match",
            r"(return\s*)0\s*;",
            format!("${{1}}{};", cfg.sentinel.replace('$', "$$")),
            1,
        )?,
    ])
}

pub fn count_matches(rules: &[RewriteRule], raw: &str) -> Vec<usize> {
    rules
        .iter()
        .map(|r| r.pattern.find_iter(raw).count())
        .collect()
}

pub fn apply(rules: &[RewriteRule], raw: &str) -> Result<String, ContractMismatchError> {
    for (rule, found) in rules.iter().zip(count_matches(rules, raw)) {
        log::debug!(
            "rewrite `{}`: {found}/{} match(es)",
            rule.name,
            rule.expected
        );
        if found != rule.expected {
            return Err(ContractMismatchError {
                rule: rule.name,
                pattern: rule.pattern.as_str().to_string(),
                expected: rule.expected,
                found,
            });
        }
    }

    let mut text = raw.to_string();
    for rule in rules {
        text = rule
            .pattern
            .replace_all(&text, rule.replacement.as_str())
            .into_owned();
    }
    Ok(text)
}
