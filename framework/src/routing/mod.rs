mod router;

pub use router::{BoxedHandler, Group, GroupBuilder, RouteBuilder, RouteMatch, Router};
