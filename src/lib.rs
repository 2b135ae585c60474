use anyhow::Error;

pub mod characters;
pub mod io;
pub mod parsimony;
pub mod tree;

mod macros;

type Result<T> = std::result::Result<T, Error>;
