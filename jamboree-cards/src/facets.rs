//! Facet extraction: the distinct instruments, genres and skill levels observed across a
//! collection. Facet sets feed the filter form choices.

use ahash::AHashSet;

pub type FacetSet = AHashSet<String>;

/// Values a record exposes for one facet field.
#[derive(Debug, Clone, Copy)]
pub enum FieldValues<'a> {
    One(&'a str),
    Many(&'a [String]),
}

/// Records that carry the three filterable facets.
pub trait Faceted {
    fn instruments(&self) -> &[String];
    fn genres(&self) -> &[String];
    fn skill_level(&self) -> &str;
}

impl<T: Faceted + ?Sized> Faceted for &T {
    fn instruments(&self) -> &[String] {
        (**self).instruments()
    }
    fn genres(&self) -> &[String] {
        (**self).genres()
    }
    fn skill_level(&self) -> &str {
        (**self).skill_level()
    }
}

/// Collects the distinct values `accessor` yields across `records`. Order is not meaningful.
pub fn unique_values<'a, T, I, F>(records: I, accessor: F) -> FacetSet
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&'a T) -> FieldValues<'a>,
{
    let mut seen = FacetSet::default();
    for record in records {
        match accessor(record) {
            FieldValues::One(value) => {
                seen.insert(value.to_string());
            }
            FieldValues::Many(values) => seen.extend(values.iter().cloned()),
        }
    }
    seen
}

pub fn unique_instruments<T: Faceted>(records: &[T]) -> FacetSet {
    unique_values(records, |r| FieldValues::Many(r.instruments()))
}

pub fn unique_genres<T: Faceted>(records: &[T]) -> FacetSet {
    unique_values(records, |r| FieldValues::Many(r.genres()))
}

pub fn unique_skill_levels<T: Faceted>(records: &[T]) -> FacetSet {
    unique_values(records, |r| FieldValues::One(r.skill_level()))
}

/// All three facet sets for one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub instruments: FacetSet,
    pub genres: FacetSet,
    pub skill_levels: FacetSet,
}

impl Facets {
    pub fn collect<T: Faceted>(records: &[T]) -> Self {
        Self {
            instruments: unique_instruments(records),
            genres: unique_genres(records),
            skill_levels: unique_skill_levels(records),
        }
    }

    pub fn sorted_instruments(&self) -> Vec<String> {
        sorted_vec(&self.instruments)
    }

    pub fn sorted_genres(&self) -> Vec<String> {
        sorted_vec(&self.genres)
    }

    pub fn sorted_skill_levels(&self) -> Vec<String> {
        sorted_vec(&self.skill_levels)
    }
}

fn sorted_vec(set: &FacetSet) -> Vec<String> {
    let mut values: Vec<String> = set.iter().cloned().collect();
    values.sort_unstable();
    values
}
