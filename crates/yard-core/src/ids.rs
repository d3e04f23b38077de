//! Strongly typed identifier wrappers for platform-assigned ids.
//!
//! The positioning platform hands out opaque string ids (MAC-style provider
//! ids, UUID-like trackable and fence ids, barcode strings).  Wrapping each
//! in its own newtype keeps "which id is this?" errors out of function
//! signatures and map keys.  All wrappers serialize transparently as plain
//! JSON strings.

use std::fmt;

/// Generate a typed id wrapper around an owned string.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $name(pub String);

        impl $name {
            /// Borrow the raw platform string.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// `true` for the empty placeholder (e.g. a trackable that has
            /// not been created on the platform yet).
            #[inline]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

typed_id! {
    /// Id of a location provider — the physical (or virtual) position source
    /// a trackable is attached to.  Trucks, forklifts, and products each own
    /// one stable provider id.
    pub struct ProviderId;
}

typed_id! {
    /// Id of a platform-managed trackable (truck order marker, product, …).
    /// Assigned by the platform on creation; empty until then.
    pub struct TrackableId;
}

typed_id! {
    /// Id of a geofenced region.
    pub struct FenceId;
}

typed_id! {
    /// Product barcode.  Doubles as the key of the per-ramp storage-route
    /// tables.
    pub struct Barcode;
}
