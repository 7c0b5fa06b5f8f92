use crate::facets::Faceted;
use serde::{Deserialize, Serialize};

/// Optional facet constraints. A blank field imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FacetFilter {
    pub instrument: Option<String>,
    pub genre: Option<String>,
    pub skill_level: Option<String>,
}

impl FacetFilter {
    pub fn is_empty(&self) -> bool {
        active(self.instrument.as_deref()).is_none()
            && active(self.genre.as_deref()).is_none()
            && active(self.skill_level.as_deref()).is_none()
    }
}

fn active(field: Option<&str>) -> Option<&str> {
    field.filter(|v| !v.trim().is_empty())
}

/// True iff `record` satisfies every non-blank field of `filter`.
pub fn passes_filter<T: Faceted + ?Sized>(record: &T, filter: &FacetFilter) -> bool {
    if let Some(instrument) = active(filter.instrument.as_deref())
        && !record.instruments().iter().any(|i| i == instrument)
    {
        return false;
    }
    if let Some(genre) = active(filter.genre.as_deref())
        && !record.genres().iter().any(|g| g == genre)
    {
        return false;
    }
    active(filter.skill_level.as_deref()).is_none_or(|level| record.skill_level() == level)
}

/// Keeps the records that are valid and pass `filter`, preserving input order.
pub fn apply_filter<'a, T, V>(records: &'a [T], filter: &FacetFilter, is_valid: V) -> Vec<&'a T>
where
    T: Faceted,
    V: Fn(&T) -> bool,
{
    records
        .iter()
        .filter(|r| is_valid(*r) && passes_filter(*r, filter))
        .collect()
}
