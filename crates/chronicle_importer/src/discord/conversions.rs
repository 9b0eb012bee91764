//! Conversions between serenity types and importer types.

use chronicle_error::{ChronicleError, ImportError, ImportErrorKind};
use chronicle_interface::ChannelKind;
use serenity::model::channel::ChannelType;

/// Map a serenity channel type to a [`ChannelKind`].
pub fn channel_kind(kind: ChannelType) -> ChannelKind {
    match kind {
        ChannelType::Text => ChannelKind::Text,
        ChannelType::Voice => ChannelKind::Voice,
        ChannelType::Category => ChannelKind::Category,
        ChannelType::News => ChannelKind::Announcement,
        ChannelType::Stage => ChannelKind::Stage,
        ChannelType::Forum => ChannelKind::Forum,
        ChannelType::NewsThread | ChannelType::PublicThread | ChannelType::PrivateThread => {
            ChannelKind::Thread
        }
        ChannelType::Private => ChannelKind::Private,
        _ => ChannelKind::Other,
    }
}

/// Parse a Discord snowflake id.
///
/// # Errors
///
/// `ImportErrorKind::InvalidId` for anything that is not a non-zero integer.
#[track_caller]
pub fn parse_id(id: &str) -> Result<u64, ImportError> {
    match id.parse::<u64>() {
        Ok(value) if value != 0 => Ok(value),
        _ => Err(ImportError::new(ImportErrorKind::InvalidId(id.to_string()))),
    }
}

/// Wrap a serenity failure, keeping its message verbatim.
#[track_caller]
pub(crate) fn transport(err: serenity::Error) -> ChronicleError {
    ImportError::new(ImportErrorKind::Transport(err.to_string())).into()
}

/// Whether a serenity failure means the resource is missing or hidden from us.
pub(crate) fn is_not_found(err: &serenity::Error) -> bool {
    match err {
        serenity::Error::Http(http) => matches!(
            http.status_code().map(|status| status.as_u16()),
            Some(403 | 404)
        ),
        _ => false,
    }
}
