use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The business entity a location bills to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessIdentity {
    /// 사업자번호 as registered, separators kept (e.g. `767-87-02214`).
    pub registration_id: String,
    /// 상호.
    pub name: String,
    /// 대표자.
    pub owner: String,
}

impl BusinessIdentity {
    pub fn new(
        registration_id: impl Into<String>,
        name: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            registration_id: registration_id.into(),
            name: name.into(),
            owner: owner.into(),
        }
    }
}

/// Static location → business mapping, loaded once at process start.
///
/// Several locations may map to the same business; a location missing from
/// the directory is a recoverable data-quality condition, surfaced as `None`
/// by [`EntityDirectory::lookup`] and never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDirectory {
    entries: IndexMap<String, BusinessIdentity>,
}

impl EntityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<L, I>(entries: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, BusinessIdentity)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(location, identity)| (location.into(), identity))
                .collect(),
        }
    }

    pub fn insert(&mut self, location: impl Into<String>, identity: BusinessIdentity) {
        self.entries.insert(location.into(), identity);
    }

    pub fn lookup(&self, location: &str) -> Option<&BusinessIdentity> {
        self.entries.get(location)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_unknown_location_is_none() {
        let directory = EntityDirectory::from_entries([(
            "관악구 신림동1길 19-5",
            BusinessIdentity::new("461-86-03598", "주식회사스테이모먼트", "유경민"),
        )]);
        assert!(directory.lookup("없는 주소").is_none());
        assert_eq!(
            directory.lookup("관악구 신림동1길 19-5").map(|b| b.name.as_str()),
            Some("주식회사스테이모먼트")
        );
    }
}
