//! Client-side routing: route table, guard, and navigation driver.

pub mod guard;
pub mod location;
pub mod router;
pub mod table;

pub use guard::Outcome;
pub use location::Location;
pub use router::{LoginRedirect, Navigation, NavigationError, Router};
pub use table::{RouteDescriptor, RouteMeta, RouteName, RouteTable};
