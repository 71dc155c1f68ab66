//! Concrete sentence variants and the built-in registration table.

mod bod;
mod dbt;
mod dpt;
mod gga;
mod gll;
mod gsa;
mod gst;
mod gsv;
mod hdt;
mod pgrme;
mod pgrmz;
mod rmc;
mod rte;
mod vtg;
mod zda;

pub use bod::BOD;
pub use dbt::DBT;
pub use dpt::DPT;
pub use gga::GGA;
pub use gll::GLL;
pub use gsa::GSA;
pub use gst::GST;
pub use gsv::GSV;
pub use hdt::HDT;
pub use pgrme::PGRME;
pub use pgrmz::PGRMZ;
pub use rmc::RMC;
pub use rte::RTE;
pub use vtg::VTG;
pub use zda::ZDA;

use crate::{Fields, FromFields, MessageBody, Result, Sentence, registry::VariantDescriptor};

/// Factory shared by every built-in variant: extract `T` from the sentence's fields.
pub fn build<T>(sentence: &Sentence) -> Result<MessageBody>
where
    T: FromFields + Into<MessageBody>,
{
    T::from_fields(&mut Fields::new(&sentence.fields)).map(Into::into)
}

/// Registration table for every built-in variant.
///
/// Standard sentences are registered under their talker-independent wildcard,
/// proprietary ones under their exact id.
///
/// ```rust
/// use nmea0183_stream::{OnConflict, TypeRegistry, nmea_content::sentences::builtin_variants};
///
/// let mut registry = TypeRegistry::new();
/// let count = registry.register_all(builtin_variants(), OnConflict::Fail).unwrap();
/// assert_eq!(count, 15);
/// ```
pub fn builtin_variants() -> Vec<VariantDescriptor> {
    vec![
        VariantDescriptor::new("--BOD", build::<BOD>),
        VariantDescriptor::new("--DBT", build::<DBT>),
        VariantDescriptor::new("--DPT", build::<DPT>),
        VariantDescriptor::new("--GGA", build::<GGA>),
        VariantDescriptor::new("--GLL", build::<GLL>),
        VariantDescriptor::new("--GSA", build::<GSA>),
        VariantDescriptor::new("--GST", build::<GST>),
        VariantDescriptor::new("--GSV", build::<GSV>),
        VariantDescriptor::new("--HDT", build::<HDT>),
        VariantDescriptor::new("--RMC", build::<RMC>),
        VariantDescriptor::new("--RTE", build::<RTE>),
        VariantDescriptor::new("--VTG", build::<VTG>),
        VariantDescriptor::new("--ZDA", build::<ZDA>),
        VariantDescriptor::new("PGRME", build::<PGRME>),
        VariantDescriptor::new("PGRMZ", build::<PGRMZ>),
    ]
}
