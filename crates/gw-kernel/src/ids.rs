//! Strongly typed, zero-cost identifier wrappers for kernel-owned tables.
//!
//! The kernel never hands out references between processes — only these ids.
//! A process that wants to touch an event or a store names it by id and the
//! kernel performs the access, which is what keeps the ownership story flat.

use std::fmt;

/// Generate a typed ID wrapper around a `u32` table index.
macro_rules! kernel_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(pub u32);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(u32::MAX);

            /// Cast to `usize` for direct use as a table index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

kernel_id! {
    /// Index of a process slot in the scheduler.
    pub struct ProcessId;
}

kernel_id! {
    /// Index of a one-shot event in the kernel's event table.
    pub struct EventId;
}

kernel_id! {
    /// Index of a blocking FIFO store in the kernel's store table.
    pub struct StoreId;
}
