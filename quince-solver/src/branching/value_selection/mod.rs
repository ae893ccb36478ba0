//! Provides the [`ValueSelector`] trait which is required
//! for value selectors to implement; the main method in this trait relies on
//! [`ValueSelector::select_value`].
//!
//! Furthermore, it defines several implementations of the [`ValueSelector`] trait such as
//! [`InDomainMin`] and [`InDomainSplit`]. Any [`ValueSelector`]
//! should only select values which are in the domain of the provided variable.

mod in_domain_max;
mod in_domain_median;
mod in_domain_min;
mod in_domain_random;
mod in_domain_split;
mod value_selector;

pub use in_domain_max::*;
pub use in_domain_median::*;
pub use in_domain_min::*;
pub use in_domain_random::*;
pub use in_domain_split::*;
pub use value_selector::ValueSelector;
