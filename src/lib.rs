//! A parser-combinator core: matchers are composable, lazily-enumerating,
//! backtracking parse primitives built out of cheaply-cloned [`Matcher`]
//! handles. Build a grammar out of terminals and combinators, bind any
//! [`matcher::delayed::Delayed`] forward references, then drive it with a
//! [`driver::Parser`].
//!
//! ```
//! use recall::combinators::{digit, plus};
//! use recall::driver::Parser;
//!
//! let number = plus(digit());
//! let parser = Parser::new(number);
//! let result = parser.parse("42 and change").unwrap();
//! assert!(result.is_some());
//! ```

pub mod combinators;
pub mod core_ctx;
pub mod driver;
pub mod error;
pub mod matcher;
pub mod stream;
pub mod value;

pub use driver::Parser;
pub use error::{Error, Position};
pub use matcher::repeat::Direction;
pub use matcher::Matcher;
pub use value::Value;
