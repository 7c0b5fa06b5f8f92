pub mod display;
pub mod facets;
pub mod filter;
pub mod truncate;

pub use display::{format_gig_date, join_for_display};
pub use facets::{FacetSet, Faceted, Facets, FieldValues, unique_values};
pub use filter::{FacetFilter, apply_filter, passes_filter};
pub use truncate::{CardBudget, truncate_to};
