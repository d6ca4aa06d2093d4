// src/frontend/cpan.rs

//! CPAN version normalisation
//!
//! CPAN distributions often use decimal versions (`1.02`) that MacPorts
//! compares as dotted-decimal (`1.20.0`). The conversion here is the one
//! the perl5 PortGroup performs, which is close to
//! `perl -Mversion -e 'print version->parse("<VERSION>")->normal'` except
//! for versions without any dot.

/// Convert a CPAN version to its dotted-decimal form
///
/// Versions with no dot or more than one dot are returned as-is (minus a
/// leading `v`). Otherwise the fractional part is split into groups of three
/// digits, right-padded with zeros, and at least two groups are emitted.
pub fn standardize_cpan_version(version: &str) -> String {
    let version = version.trim_start_matches('v');
    let parts: Vec<&str> = version.split('.').collect();

    let [integer, fractional] = parts.as_slice() else {
        return version.to_string();
    };

    let mut standard = integer.to_string();
    let digits: Vec<char> = fractional.chars().collect();
    let mut index = 0;
    while index < digits.len() || index < 6 {
        let mut group: String = digits.iter().skip(index).take(3).collect();
        while group.len() < 3 {
            group.push('0');
        }
        // Non-numeric groups (e.g. "_01" dev releases) are kept verbatim.
        match group.parse::<u64>() {
            Ok(n) => standard.push_str(&format!(".{}", n)),
            Err(_) => standard.push_str(&format!(".{}", group)),
        }
        index += 3;
    }

    standard
}

const OPERATORS: [&str; 8] = ["===", "~=", "==", "!=", "<=", ">=", "<", ">"];

/// Standardise every version in a comma-separated specifier
///
/// `">= 1.2, != 1.5, < 2.0"` becomes `">=1.200.0, !=1.500.0, <2.0.0"`.
/// Clauses without a comparison operator are kept as written.
pub fn normalize_cpan_specifier(specifier: &str) -> String {
    specifier
        .split(',')
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(|clause| {
            match OPERATORS.iter().find(|op| clause.starts_with(**op)) {
                Some(op) => {
                    let version = clause[op.len()..].trim();
                    format!("{}{}", op, standardize_cpan_version(version))
                }
                None => clause.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
