/// The call protocol and the built-in catalogue.
///
/// Defines the `builtin_functions!` table every global scope is populated
/// from, user function definition and the shared call path for user
/// functions and built-ins.
pub mod core;

/// Collection built-ins.
///
/// `append`, `insert`, `set`, `pop`, `extend`, `get`, `len`, `has_key` and
/// `sort`. All mutating built-ins change the shared container, so every copy
/// of the list or dictionary observes the change.
pub mod collection;

/// Console built-ins: `print`, `input` and `clear`.
pub mod io;

/// Numeric built-ins.
///
/// `abs`, `min`, `max`, `range`, `oct`, `fact` and `is_prime`.
pub mod math;

/// Script loading built-ins: `run` and `importAs`.
pub mod module;

/// String built-ins.
///
/// `concat`, `split_char`, `slice`, `frequency` and `findIndex`. Indices
/// count characters, not bytes.
pub mod string;

/// Type predicates and conversions.
///
/// `is_number`, `is_string`, `is_list`, `is_function`, `to_str`, `to_int`
/// and `to_float`.
pub mod types;
