//! Type metadata seam
//!
//! A [`SchemaSource`] lists the factories of a type together with the declared
//! name of each parameter. The resolver core validates what it is given; it
//! does not care whether the list came from the `#[named_constructors]`
//! attribute, a hand-written impl, or configuration.

use crate::schema::FactoryDecl;

/// Types that declare named factories
pub trait SchemaSource: Sized + 'static {
    /// Name used in diagnostics
    ///
    /// Defaults to the last path segment of the type, without generic
    /// arguments: `a::Wrap<b::C>` is reported as `Wrap`.
    fn type_name() -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Every factory of the type, eligible or not, in declaration order
    fn factories() -> Vec<FactoryDecl<Self>>;
}

fn short_type_name(full: &str) -> &str {
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}
