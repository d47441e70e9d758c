pub mod declaration;
pub mod rule;
pub mod serializer;
pub mod sheet;
