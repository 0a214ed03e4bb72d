//! Record types and their field-binding tables
//!
//! A record type lists its fields once, as [`FieldBinding`]s holding a
//! getter and a setter. [`FieldTable`] validates that list and is the only
//! way the pipelines reach into a record, so every header lookup resolves
//! against names known before the first row is touched.
//!
//! Most types implement [`Record`] through the [`record!`](crate::record!)
//! macro:
//!
//! ```
//! sheetbind::record! {
//!     #[derive(Debug, Default, Clone, PartialEq)]
//!     pub struct Person {
//!         pub name: String => "Name",
//!         pub age: Option<i32> => "Age",
//!     }
//! }
//!
//! use sheetbind::Record;
//! assert_eq!(Person::bindings()[0].name(), "Name");
//! ```

use crate::error::{SheetError, SheetResult};
use crate::value::{ScalarKind, Value};
use std::collections::HashMap;
use std::fmt;

/// A record type that can be exported to and imported from a sheet
pub trait Record: Default {
    /// Type name used in error messages
    fn record_name() -> &'static str;

    /// One binding per field, in declaration order
    fn bindings() -> Vec<FieldBinding<Self>>;
}

/// Typed accessor/mutator pair for one record field
pub struct FieldBinding<R> {
    name: &'static str,
    kind: ScalarKind,
    get: fn(&R) -> Option<Value>,
    set: fn(&mut R, Option<Value>) -> Result<(), Value>,
}

impl<R> FieldBinding<R> {
    pub fn new(
        name: &'static str,
        kind: ScalarKind,
        get: fn(&R) -> Option<Value>,
        set: fn(&mut R, Option<Value>) -> Result<(), Value>,
    ) -> Self {
        Self {
            name,
            kind,
            get,
            set,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Current value of the field, `None` when the field holds no value
    pub fn get(&self, record: &R) -> Option<Value> {
        (self.get)(record)
    }

    pub fn set(&self, record: &mut R, value: Option<Value>) -> SheetResult<()> {
        (self.set)(record, value).map_err(|rejected| SheetError::TypeMismatch {
            field: self.name,
            expected: self.kind,
            actual: rejected.kind(),
        })
    }
}

impl<R> Clone for FieldBinding<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldBinding<R> {}

impl<R> fmt::Debug for FieldBinding<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Validated name -> binding table for one record type
pub struct FieldTable<R> {
    bindings: Vec<FieldBinding<R>>,
    by_name: HashMap<&'static str, usize>,
}

impl<R: Record> FieldTable<R> {
    /// Build the table for `R`, rejecting duplicate field names
    pub fn of() -> SheetResult<Self> {
        Self::from_bindings(R::bindings())
    }

    pub fn from_bindings(bindings: Vec<FieldBinding<R>>) -> SheetResult<Self> {
        let mut by_name = HashMap::with_capacity(bindings.len());
        for (idx, binding) in bindings.iter().enumerate() {
            if by_name.insert(binding.name, idx).is_some() {
                return Err(SheetError::DuplicateField {
                    record: R::record_name(),
                    field: binding.name.to_string(),
                });
            }
        }
        Ok(Self { bindings, by_name })
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, name: &str) -> Option<&FieldBinding<R>> {
        self.by_name.get(name).map(|&idx| &self.bindings[idx])
    }

    /// Like [`get`](Self::get) but fails with `UnknownField`
    pub fn require(&self, name: &str) -> SheetResult<&FieldBinding<R>> {
        self.get(name).ok_or_else(|| SheetError::UnknownField {
            record: R::record_name(),
            field: name.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldBinding<R>> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Declare a struct and implement [`Record`] for it.
///
/// Each field may carry `=> "Column"` to bind it under a name other than
/// the Rust identifier. Field types must implement [`Scalar`](crate::Scalar).
#[macro_export]
macro_rules! record {
    (@name $field:ident) => {
        stringify!($field)
    };
    (@name $field:ident $column:literal) => {
        $column
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $fty:ty $(=> $column:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $fty,
            )*
        }

        impl $crate::Record for $name {
            fn record_name() -> &'static str {
                stringify!($name)
            }

            fn bindings() -> ::std::vec::Vec<$crate::FieldBinding<Self>> {
                ::std::vec![
                    $(
                        $crate::FieldBinding::new(
                            $crate::record!(@name $field $($column)?),
                            <$fty as $crate::Scalar>::KIND,
                            |record: &Self| $crate::Scalar::to_value(&record.$field),
                            |record: &mut Self, value| {
                                $crate::Scalar::assign(&mut record.$field, value)
                            },
                        ),
                    )*
                ]
            }
        }
    };
}
