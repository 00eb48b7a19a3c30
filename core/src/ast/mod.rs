pub mod decode;
pub mod err;
pub mod kind;
pub mod node;

pub use decode::{decode_template, decode_template_str};
pub use err::MalformedTreeError;
pub use kind::{Attribute, NodeKind};
pub use node::Node;
