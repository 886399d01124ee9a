pub mod links;
pub mod mapper;
pub mod terms;

pub use links::{resolve_link, LinkError, ResolvedLink};
pub use mapper::{Mapper, MapperError, MappingTables};
