//! Element-specific AST node definitions for gemtext
//!
//!     Gemtext elements are line based: each node except Root and List stands for exactly one
//!     source line (or, for Pre, one fenced block of lines).
//!
//!     Containers:
//!         - Root: the document, holds every other node. See [root](root).
//!         - List: consecutive list lines, holds ListItems only. See [list](list).
//!
//!     Leaves:
//!         - Heading: `#`, `##` or `###` line, with its rank. See [heading](heading).
//!         - Link: `=>` line, with an optional url and a label. See [link](link).
//!         - Pre: a fenced block, with its alt text and raw content. See [preformatted](preformatted).
//!         - Quote: `>` line. See [quote](quote).
//!         - Text: any other line. Break: an intentional blank line. See [text](text).

pub mod heading;
pub mod link;
pub mod list;
pub mod node;
pub mod preformatted;
pub mod quote;
pub mod root;
pub mod text;

pub use heading::Heading;
pub use link::Link;
pub use list::{List, ListItem};
pub use node::Node;
pub use preformatted::Pre;
pub use quote::Quote;
pub use root::Root;
pub use text::{Break, Text};
