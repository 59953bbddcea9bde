//! Mana codec: symbol universe, costs, and rules text with embedded costs.
//!
//! ## Key Types
//!
//! - `ManaSymbol`: One symbol of the universe (`W`, `2W`, `GWP`, ...)
//! - `SymbolTable`: Lookup over canonical, alt and dense spellings
//! - `ManaCost`: Ordered multiset of symbols and generic units
//! - `ManaText`: Text with costs lifted out into recorded slots
//! - `ManaCodec`: Parses and renders both in any `Notation`
//!
//! ## Usage
//!
//! ```
//! use ccg_encode::mana::{ManaCodec, Notation};
//!
//! let codec = ManaCodec::default();
//! let cost = codec.parse_cost("{2}{G/W/P}", Notation::Json);
//! assert_eq!(cost.cmc(), 3);
//! assert_eq!(cost.colors(), "GW");
//! assert_eq!(codec.format_cost(&cost, Notation::Encoded), "{^^GWP}");
//! ```

pub mod cost;
pub mod notation;
pub mod symbol;
pub mod text;

pub use cost::{ManaCost, ManaToken};
pub use notation::{ManaCodec, Notation};
pub use symbol::{Color, ColorSet, ManaSymbol, SymbolTable};
pub use text::ManaText;
