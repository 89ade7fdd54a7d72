//! Service icon keys.
//!
//! Services store a free-text `icon_name`; rendering goes through this
//! closed table. Unknown or missing keys resolve to [`ServiceIcon::DEFAULT`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceIcon {
    Server,
    Tv,
    BookOpen,
    Code,
    Cpu,
    Settings,
    Shield,
    Globe,
}

/// `(icon, stored key, display label)` for every known icon.
pub const ICON_TABLE: &[(ServiceIcon, &str, &str)] = &[
    (ServiceIcon::Server, "server", "Server"),
    (ServiceIcon::Tv, "tv", "TV"),
    (ServiceIcon::BookOpen, "book-open", "Book Open"),
    (ServiceIcon::Code, "code", "Code"),
    (ServiceIcon::Cpu, "cpu", "CPU"),
    (ServiceIcon::Settings, "settings", "Settings"),
    (ServiceIcon::Shield, "shield", "Shield"),
    (ServiceIcon::Globe, "globe", "Globe"),
];

impl ServiceIcon {
    pub const DEFAULT: ServiceIcon = ServiceIcon::Server;

    /// Resolve a stored key, case-insensitively. Never fails.
    pub fn from_key(key: Option<&str>) -> ServiceIcon {
        let Some(key) = key else {
            return Self::DEFAULT;
        };
        let key = key.trim().to_lowercase();
        ICON_TABLE
            .iter()
            .find(|(_, k, _)| *k == key)
            .map(|(icon, _, _)| *icon)
            .unwrap_or(Self::DEFAULT)
    }

    fn entry(self) -> &'static (ServiceIcon, &'static str, &'static str) {
        // The table lists every variant, so the fallback is never taken.
        ICON_TABLE
            .iter()
            .find(|(icon, _, _)| *icon == self)
            .unwrap_or(&ICON_TABLE[0])
    }

    pub fn key(self) -> &'static str {
        self.entry().1
    }

    pub fn label(self) -> &'static str {
        self.entry().2
    }

    pub fn all() -> impl Iterator<Item = ServiceIcon> {
        ICON_TABLE.iter().map(|(icon, _, _)| *icon)
    }
}

impl Default for ServiceIcon {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Serialize for ServiceIcon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for ServiceIcon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = Option::<String>::deserialize(deserializer)?;
        Ok(ServiceIcon::from_key(key.as_deref()))
    }
}
