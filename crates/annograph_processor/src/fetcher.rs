//! Fetcher descriptors attached to fields.

use annograph_foundation::{Declaration, Fetcher, Member};

/// Returns the fetcher for a member of a regular type.
///
/// A declared data fetcher wins; otherwise the value is read straight off the
/// source instance.
#[must_use]
pub fn construct(member: &Member) -> Fetcher {
    if let Some(custom) = &member.annotations.data_fetcher {
        return Fetcher::Custom {
            fetcher: custom.fetcher.clone(),
            args: custom.args.clone(),
        };
    }
    if member.is_method() {
        Fetcher::Method {
            member: member.name.clone(),
        }
    } else {
        Fetcher::Property {
            member: member.name.clone(),
        }
    }
}

/// Rewrites a fetcher built from an extension member.
///
/// Default fetchers read from the extension, which is constructed around the
/// source instance at query time. Custom fetchers receive the source directly
/// and are left alone.
#[must_use]
pub fn for_extension(extension: &Declaration, fetcher: Fetcher) -> Fetcher {
    match fetcher {
        Fetcher::Custom { .. } | Fetcher::Extension { .. } => fetcher,
        inner => Fetcher::Extension {
            extension: extension.name.clone(),
            inner: Box::new(inner),
        },
    }
}
