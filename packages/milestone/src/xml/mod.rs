//! XML utilities.

mod utils;

pub use utils::{
    closing_tag, collect_attributes, declared_namespaces, element_ancestors, escape_attribute,
    find_elements, get_attribute, has_tag, opening_tag, parse_tag_attribute,
    qualified_attribute_name, qualified_name,
};
