//! User-facing message catalog.
//!
//! Error messages are composed from this table instead of literal prose so a
//! localized catalog can be swapped in (see `messages:` in the config file).

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// Identifiers of the messages the TFVC layer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKey {
    ArgumentRequired,
    NotAnEnuTfCommandLine,
    NoWorkspaceMappings,
    CommandFailed,
}

/// Lookup table of user-facing strings.
pub trait MessageCatalog: Send + Sync {
    fn message(&self, key: MessageKey) -> Cow<'_, str>;
}

/// Built-in English messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCatalog;

impl MessageCatalog for DefaultCatalog {
    fn message(&self, key: MessageKey) -> Cow<'_, str> {
        Cow::Borrowed(match key {
            MessageKey::ArgumentRequired => "Argument is required:",
            MessageKey::NotAnEnuTfCommandLine => {
                "The TF command line appears to be configured for a non-English locale. \
                 Configure an English version of the TF executable."
            }
            MessageKey::NoWorkspaceMappings => {
                "Could not find a workspace with mappings. Perhaps this is not a TFVC workspace?"
            }
            MessageKey::CommandFailed => "The TF command failed:",
        })
    }
}

/// Catalog that replaces individual entries of the default English table.
#[derive(Debug, Default, Clone)]
pub struct OverrideCatalog {
    overrides: HashMap<MessageKey, String>,
}

impl OverrideCatalog {
    pub fn new(overrides: HashMap<MessageKey, String>) -> Self {
        Self { overrides }
    }
}

impl MessageCatalog for OverrideCatalog {
    fn message(&self, key: MessageKey) -> Cow<'_, str> {
        match self.overrides.get(&key) {
            Some(text) if !text.trim().is_empty() => Cow::Borrowed(text.as_str()),
            _ => DefaultCatalog.message(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_text_for_every_key() {
        for key in [
            MessageKey::ArgumentRequired,
            MessageKey::NotAnEnuTfCommandLine,
            MessageKey::NoWorkspaceMappings,
            MessageKey::CommandFailed,
        ] {
            assert!(!DefaultCatalog.message(key).is_empty());
        }
    }

    #[test]
    fn override_catalog_replaces_only_configured_keys() {
        let catalog = OverrideCatalog::new(HashMap::from([(
            MessageKey::NoWorkspaceMappings,
            "Kein Arbeitsbereich gefunden.".to_string(),
        )]));

        assert_eq!(
            catalog.message(MessageKey::NoWorkspaceMappings),
            "Kein Arbeitsbereich gefunden."
        );
        assert_eq!(
            catalog.message(MessageKey::CommandFailed),
            DefaultCatalog.message(MessageKey::CommandFailed)
        );
    }

    #[test]
    fn override_catalog_ignores_blank_entries() {
        let catalog = OverrideCatalog::new(HashMap::from([(
            MessageKey::ArgumentRequired,
            "   ".to_string(),
        )]));
        assert_eq!(
            catalog.message(MessageKey::ArgumentRequired),
            DefaultCatalog.message(MessageKey::ArgumentRequired)
        );
    }

    #[test]
    fn message_keys_deserialize_from_identifiers() {
        let map: HashMap<MessageKey, String> =
            serde_yaml::from_str("NotAnEnuTfCommandLine: localized\n").unwrap();
        assert_eq!(
            map.get(&MessageKey::NotAnEnuTfCommandLine).map(String::as_str),
            Some("localized")
        );
    }
}
