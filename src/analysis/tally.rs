use std::collections::HashMap;

/// An SSID exactly as it appeared on the air.
///
/// The bytes are not guaranteed to be UTF-8. An empty SSID is a hidden
/// network and is a distinct key from every named one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Ssid(Vec<u8>);

impl Ssid {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_hidden(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).into_owned()
    }
}

impl From<&str> for Ssid {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<&[u8]> for Ssid {
    fn from(value: &[u8]) -> Self {
        Self::new(value)
    }
}

impl From<Vec<u8>> for Ssid {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Ssid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}

/// Per-SSID occurrence counts. Entries are only ever created or
/// incremented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    counts: HashMap<Ssid, u64>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, ssid: Ssid) -> u64 {
        let count = self.counts.entry(ssid).or_insert(0);
        *count += 1;
        *count
    }

    pub fn get(&self, ssid: &Ssid) -> u64 {
        self.counts.get(ssid).copied().unwrap_or(0)
    }

    /// Number of distinct SSIDs.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ssid, u64)> {
        self.counts.iter().map(|(ssid, count)| (ssid, *count))
    }
}
