//! Access policies: attributes, monotone formula trees and their text syntax.

mod attribute;
pub use attribute::{ATTRIBUTE_CONTEXT, Attribute};

mod tree;
pub use tree::AccessTree;

mod parser;
pub use parser::{parse_policy, parse_policy_with_limits};
