use std::{collections::TryReserveError, result};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("out of memory")]
    OutOfMemory {
        #[from]
        source: TryReserveError,
    },
}

pub type Result<T> = result::Result<T, Error>;
