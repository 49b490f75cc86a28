use num_traits::{One, PrimInt};

/// Trait implemented by named collision layer enums.
///
/// The enum's discriminant (via `#[repr(u8)]`) determines the bit index.
/// You choose the backing integer type via the associated `Storage`.
pub trait FlagBitmask {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must be < number of bits in `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// A bitmask container over any primitive integer.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitmaskFlags<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> BitmaskFlags<T> {
    pub fn new(bits: T) -> Self {
        Self { bits }
    }

    /// Every bit set.
    pub fn all() -> Self {
        Self { bits: !T::zero() }
    }

    /// No bit set.
    pub fn none() -> Self {
        Self { bits: T::zero() }
    }

    pub fn add<U: FlagBitmask<Storage = T>>(&mut self, layer: U) {
        self.bits = self.bits | layer.mask();
    }

    pub fn remove<U: FlagBitmask<Storage = T>>(&mut self, layer: U) {
        self.bits = self.bits & !layer.mask();
    }

    pub fn has<U: FlagBitmask<Storage = T>>(&self, layer: U) -> bool {
        (self.bits & layer.mask()) != T::zero()
    }

    /// Builder form of [`Self::add`].
    pub fn with<U: FlagBitmask<Storage = T>>(mut self, layer: U) -> Self {
        self.add(layer);
        self
    }

    /// Builder form of [`Self::remove`].
    pub fn without<U: FlagBitmask<Storage = T>>(mut self, layer: U) -> Self {
        self.remove(layer);
        self
    }

    pub fn from_layers<U: FlagBitmask<Storage = T> + Copy>(layers: &[U]) -> Self {
        let bits = layers.iter().fold(T::zero(), |acc, l| acc | l.mask());
        Self { bits }
    }

    /// True if any bit of `other` is also set here.
    pub fn intersects(&self, other: T) -> bool {
        (self.bits & other) != T::zero()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == T::zero()
    }
}

/// Collision layer mask used by the ground query and the level colliders.
///
/// Matches Rapier's 32-bit `Group` memberships.
pub type LayerMask = BitmaskFlags<u32>;

/// Declare a layer enum and implement `FlagBitmask` for it.
///
/// Example:
/// ```rust
/// controller::define_layers!(LevelLayer, u32, {
///     Ground,
///     Platform,
///     Hazard,
/// });
/// ```
#[macro_export]
macro_rules! define_layers {
    ($name:ident, $storage:ty, { $($variant:ident),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[repr(u8)]
        pub enum $name {
            $($variant),*
        }

        impl $crate::layers::FlagBitmask for $name {
            type Storage = $storage;

            fn bit_index(&self) -> u8 {
                *self as u8
            }
        }
    };
}
