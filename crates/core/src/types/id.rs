//! Row IDs for the inventory tables.
//!
//! Every table keys on a SQLite `INTEGER PRIMARY KEY`, and several values
//! travel together: a customer row carries its own id and an `address_id`,
//! the session carries an employee id, and handlers take product or customer
//! ids from the URL. Each table gets its own wrapper so a `CustomerId` cannot
//! be passed to a product delete, or an `AddressId` looked up as a customer.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` (the width of a SQLite `INTEGER`
/// primary key) with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>` and `Into<i64>` implementations
///
/// # Example
///
/// ```rust
/// # use ims_core::define_id;
/// define_id!(WarehouseId);
/// define_id!(ShelfId);
///
/// let warehouse_id = WarehouseId::new(1);
/// let shelf_id = ShelfId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: WarehouseId = shelf_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// `product.id`
define_id!(ProductId);
// `customer.id`
define_id!(CustomerId);
// `address.id`, referenced by `customer.address_id`
define_id!(AddressId);
// `login_credentials.id`, stored in the session after login
define_id!(EmployeeId);
