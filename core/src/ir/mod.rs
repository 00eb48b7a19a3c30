pub mod encode;
pub mod node;

pub use self::node::IrNode;
