pub mod codegen;
pub mod extract;
pub mod validate;
