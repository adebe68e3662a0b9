//! Read model views for the registry query side.

pub mod domain_detail;
pub mod domain_list;

pub use domain_detail::DomainDetailView;
pub use domain_list::DomainListView;
