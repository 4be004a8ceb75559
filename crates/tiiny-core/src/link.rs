use std::fmt;

use crate::error::CoreError;

/// A fully qualified site link split at its first dot.
///
/// `foo.tiiny.site` → subdomain `foo`, suffix `.tiiny.site`. The suffix is
/// taken as-is; it is not checked against the known domains.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteLink {
    pub subdomain: String,
    pub domain_suffix: String,
}

impl SiteLink {
    pub fn parse(link: &str) -> Result<Self, CoreError> {
        let Some((subdomain, rest)) = link.split_once('.') else {
            return Err(CoreError::InvalidLinkFormat { link: link.into() });
        };

        Ok(Self {
            subdomain: subdomain.to_owned(),
            domain_suffix: format!(".{rest}"),
        })
    }

    /// Subdomain and suffix joined back together.
    pub fn domain(&self) -> String {
        format!("{}{}", self.subdomain, self.domain_suffix)
    }
}

impl fmt::Display for SiteLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.subdomain, self.domain_suffix)
    }
}
