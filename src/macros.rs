/// Implements the string form of an algorithm registry enum.
///
/// Every listed name maps to exactly one variant, anything else ends up in
/// the `Other` variant, so deserialization never fails on an unknown name.
/// Callers decide whether an `Other` value is acceptable.
macro_rules! impl_serde_jwa {
    ($T:ty, [
        $($name:literal => $val:expr; $valp:pat,)*
    ]) => {
        impl $T {
            /// Returns the registered name of this algorithm, as it appears
            /// in a JOSE header.
            pub fn name(&self) -> &str {
                match self {
                    $($valp => $name,)*
                    Self::Other(other) => other.as_str(),
                }
            }

            /// Tries to parse the given name into a variant, and returns `None`
            /// if no variant matched.
            pub(crate) fn from_str_without_other(name: &str) -> Option<Self> {
                match name {
                    $($name => Some($val),)*
                    _ => None,
                }
            }
        }

        impl core::fmt::Display for $T {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl core::str::FromStr for $T {
            type Err = core::convert::Infallible;

            fn from_str(name: &str) -> Result<Self, Self::Err> {
                Ok(Self::from_str_without_other(name)
                    .unwrap_or_else(|| Self::Other(alloc::string::ToString::to_string(name))))
            }
        }

        #[allow(unused_qualifications)]
        impl<'de> serde::Deserialize<'de> for $T {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let name = <alloc::borrow::Cow<'_, str> as serde::Deserialize>::deserialize(deserializer)?;

                Ok(Self::from_str_without_other(&name).unwrap_or_else(|| {
                    Self::Other(name.into_owned())
                }))
            }
        }

        #[allow(unused_qualifications)]
        impl serde::Serialize for $T {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                <&str as serde::Serialize>::serialize(&self.name(), serializer)
            }
        }
    };
}
