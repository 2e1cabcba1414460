//! Sort specifications

use serde::{Deserialize, Serialize};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// One sort key. A query carries these in priority order: the first is the
/// primary key and each later entry only breaks ties left by the ones before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec<F = String> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F> SortSpec<F> {
    pub fn new(field: impl Into<F>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Ascending sort on `field`
    pub fn asc(field: impl Into<F>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Descending sort on `field`
    pub fn desc(field: impl Into<F>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

impl<F: AsRef<str>> SortSpec<F> {
    pub fn field_name(&self) -> &str {
        self.field.as_ref()
    }
}
