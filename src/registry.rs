use std::collections::HashSet;

/// The fixed set of device ids known to the service.
///
/// Built once at startup from the roster and never mutated afterwards. A
/// device exists iff its id is in here; there is no runtime registration.
pub struct DeviceRegistry {
    ids: HashSet<String>,
}

impl DeviceRegistry {
    /// Builds the registry from the roster list. Duplicate ids collapse to a
    /// single entry; order is irrelevant.
    pub fn new(ids: impl IntoIterator<Item = String>) -> Self {
        DeviceRegistry {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}
