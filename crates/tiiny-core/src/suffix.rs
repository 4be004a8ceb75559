/// Suffixes every account can publish under.
pub const DEFAULT_DOMAIN_SUFFIXES: [&str; 3] = [".tiiny.site", ".tiiny.co", ".tiiny.io"];

/// Default suffixes followed by the account's custom domains.
///
/// Custom domains get a leading dot; blanks and repeats are dropped.
pub fn merge_suffixes<'a>(custom_domains: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut suffixes: Vec<String> = DEFAULT_DOMAIN_SUFFIXES
        .iter()
        .map(|s| (*s).to_owned())
        .collect();

    for domain in custom_domains {
        let domain = domain.trim();
        if domain.is_empty() || domain == "." {
            continue;
        }
        let suffix = if domain.starts_with('.') {
            domain.to_owned()
        } else {
            format!(".{domain}")
        };
        if !suffixes.contains(&suffix) {
            suffixes.push(suffix);
        }
    }

    suffixes
}

/// The defaults alone, used when the account lookup fails.
pub fn default_suffixes() -> Vec<String> {
    merge_suffixes([])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn custom_domains_follow_defaults() {
        assert_eq!(
            merge_suffixes(["example.com", ".docs.example.org"]),
            vec![
                ".tiiny.site",
                ".tiiny.co",
                ".tiiny.io",
                ".example.com",
                ".docs.example.org"
            ]
        );
    }

    #[test]
    fn duplicates_and_blanks_dropped() {
        assert_eq!(
            merge_suffixes(["tiiny.site", " ", "a.com", ".a.com", "."]),
            vec![".tiiny.site", ".tiiny.co", ".tiiny.io", ".a.com"]
        );
    }

    #[test]
    fn fallback_is_defaults() {
        assert_eq!(default_suffixes(), DEFAULT_DOMAIN_SUFFIXES);
    }
}
