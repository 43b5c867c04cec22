//! Yamldoc core: configuration values, scalar coercion and override parsing.
//!
//! Nothing in this crate touches the filesystem or logs; diagnostics are
//! returned to the caller as data.
mod config;
mod flags;
mod scalar;

pub use config::{
    Config, Overrides, DEFAULT_ALLOW_ERB, DEFAULT_EXCLUDE, DEFAULT_FRONT_MATTER, DEFAULT_INCLUDE,
    DEFAULT_INDEX, DEFAULT_OUT_DIR, DEFAULT_STRICT, DEFAULT_TOC,
};
pub use flags::{parse_flags, ParsedFlags, FLAG_PREFIX, NEGATED_FLAG_PREFIX};
pub use scalar::{coerce_scalar, loose_bool, parse_flag_bool, ConverterOptions, Meta, Scalar};
