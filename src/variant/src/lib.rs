pub mod field;
pub use field::Field;

pub mod reading;
pub use reading::{Assay, Reading, Regime, NOT_SEQUENCED};

pub mod record;
pub use record::{Column, Header, Row, RecordError, SEPARATOR};

pub mod key;
pub use key::{PatientId, VariantKey};
