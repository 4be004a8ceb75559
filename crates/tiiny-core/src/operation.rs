use std::str::FromStr;

use strum::{AsRefStr, Display, EnumString, VariantNames};

use crate::error::CoreError;

/// The site operations an item can request.
///
/// The html variants upload inline content as `index.html` instead of a
/// binary attachment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, VariantNames,
)]
#[strum(serialize_all = "camelCase")]
pub enum Operation {
    Create,
    CreateHtml,
    Update,
    UpdateHtml,
    Delete,
}

impl Operation {
    /// Parse an operation name, failing with the name that was received.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        Self::from_str(name).map_err(|_| CoreError::UnknownOperation {
            operation: name.into(),
        })
    }

    /// Whether the operation takes its file from `htmlContent`.
    pub fn uses_html(self) -> bool {
        matches!(self, Self::CreateHtml | Self::UpdateHtml)
    }
}
