pub mod builder;
pub mod request;

pub use builder::{FilterDescriptor, Predicate, QueryBuilder, QueryDescriptor, Sort};
pub use request::{PageRequestSpec, RawParams, SortDirection};
