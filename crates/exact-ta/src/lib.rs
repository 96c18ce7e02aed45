//! exact-ta: bit-exact technical analysis indicators
//!
//! This crate reimplements the classic TA-Lib indicator set with the goal of
//! byte-for-byte output parity: the same accumulation order, the same warm-up
//! and lookback conventions, the same epsilon guards and degenerate-input
//! policies as the reference.
//!
//! # Conventions
//!
//! - Outputs are aligned with the input. The first `xxx_lookback()` entries
//!   are NaN (pattern recognizers use `0` instead).
//! - Every indicator has an allocating form and a `_into` form writing into a
//!   caller-supplied buffer.
//! - Compatibility mode and unstable periods are an explicit
//!   [`Settings`](settings::Settings) value, never process-wide state.
//!
//! # Quick Start
//!
//! ```
//! use exact_ta::prelude::*;
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let result = sma(&data, 3).unwrap();
//!
//! assert!(result[0].is_nan());
//! assert!(result[1].is_nan());
//! assert!((result[2] - 2.0).abs() < 1e-10);
//! ```
//!
//! # Error Handling
//!
//! All indicator functions return [`Result<T, Error>`]:
//!
//! ```
//! use exact_ta::prelude::*;
//!
//! let empty: Vec<f64> = vec![];
//! assert!(sma(&empty, 5).is_err());
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::suboptimal_flops)]

pub mod error;
pub mod indicators;
pub mod kernels;
pub mod prelude;
pub mod settings;
pub mod traits;
pub mod utils;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use settings::{Compatibility, Settings, UnstableFn, UnstablePeriod};
pub use traits::{SeriesElement, ValidatedInput};
pub use utils::{
    approx_eq, approx_eq_relative, count_nan_prefix, count_nans, EPSILON, LOOSE_EPSILON,
    TA_EPSILON, TA_REAL_MAX,
};
