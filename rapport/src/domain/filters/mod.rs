mod date_filter;
mod status_filter;

pub use date_filter::*;
pub use status_filter::*;

/// A typed query filter, serialized into the backend's `filter=` parameter.
pub trait QueryFilter {
    fn as_query_filter(&self) -> String;
}
